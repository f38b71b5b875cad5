//! Thermocouple temperature source trait

/// Why a single temperature conversion produced no usable value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Thermocouple disconnected (open circuit)
    OpenCircuit,
    /// Thermocouple shorted to ground
    ShortToGround,
    /// Thermocouple shorted to supply
    ShortToVcc,
    /// Reading outside the amplifier's measurable range
    OutOfRange,
    /// Communication with the amplifier failed
    BusError,
}

/// A source of single-shot Celsius readings
///
/// The source reads whatever channel is currently routed to it; channel
/// selection happens elsewhere. Each call is one independent conversion.
pub trait TemperatureSource {
    /// Take one reading in degrees Celsius
    ///
    /// Implementations must return `Err` rather than a non-finite value.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}
