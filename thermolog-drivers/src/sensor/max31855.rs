//! MAX31855 cold-junction compensated thermocouple amplifier
//!
//! The chip is read-only: pulling CS low latches a conversion and clocks
//! out one 32-bit frame, MSB first.
//!
//! ```text
//!  31..18  thermocouple temperature, signed, 0.25 °C/LSB
//!  16      fault (any of bits 2..0)
//!  15..4   internal temperature, signed, 0.0625 °C/LSB
//!  2       SCV: short to VCC
//!  1       SCG: short to GND
//!  0       OC:  open circuit
//! ```

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use thermolog_core::traits::{SensorError, TemperatureSource};

const FAULT_BIT: u32 = 1 << 16;
const OPEN_CIRCUIT_BIT: u32 = 1 << 0;
const SHORT_GND_BIT: u32 = 1 << 1;
const SHORT_VCC_BIT: u32 = 1 << 2;

/// Thermocouple resolution (°C per LSB)
const TC_LSB_C: f32 = 0.25;

/// Cold-junction resolution (°C per LSB)
const INTERNAL_LSB_C: f32 = 0.0625;

/// MAX31855 on a dedicated chip-select line
pub struct Max31855<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> Max31855<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin<Error = Infallible>,
{
    /// Create a driver and park chip-select high
    pub fn new(spi: SPI, mut cs: CS) -> Self {
        cs.set_high().unwrap_or_else(|e| match e {});
        Self { spi, cs }
    }

    /// Release the bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// Clock out one raw 32-bit frame
    pub fn read_raw(&mut self) -> Result<u32, SensorError> {
        let mut frame = [0u8; 4];

        self.cs.set_low().unwrap_or_else(|e| match e {});
        let transfer = self
            .spi
            .read(&mut frame)
            .and_then(|()| self.spi.flush());
        // Deselect even if the transfer failed
        self.cs.set_high().unwrap_or_else(|e| match e {});

        if transfer.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("MAX31855: SPI transfer failed");
            return Err(SensorError::BusError);
        }

        let raw = u32::from_be_bytes(frame);
        #[cfg(feature = "defmt")]
        defmt::trace!("MAX31855 frame: {=u32:#x}", raw);
        Ok(raw)
    }

    /// Read the cold-junction (die) temperature in °C
    pub fn read_internal(&mut self) -> Result<f32, SensorError> {
        self.read_raw().map(decode_internal)
    }
}

impl<SPI, CS> TemperatureSource for Max31855<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin<Error = Infallible>,
{
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        decode_thermocouple(self.read_raw()?)
    }
}

/// Decode the thermocouple temperature from a raw frame
///
/// A set fault flag maps to the most specific fault bit. A fault flag with
/// no detail bit is reported as out of range.
pub fn decode_thermocouple(raw: u32) -> Result<f32, SensorError> {
    if raw & FAULT_BIT != 0 {
        return Err(if raw & OPEN_CIRCUIT_BIT != 0 {
            SensorError::OpenCircuit
        } else if raw & SHORT_GND_BIT != 0 {
            SensorError::ShortToGround
        } else if raw & SHORT_VCC_BIT != 0 {
            SensorError::ShortToVcc
        } else {
            SensorError::OutOfRange
        });
    }

    // Arithmetic shift sign-extends the 14-bit field
    let counts = (raw as i32) >> 18;
    Ok(counts as f32 * TC_LSB_C)
}

/// Decode the cold-junction temperature from a raw frame
pub fn decode_internal(raw: u32) -> f32 {
    let counts = ((raw as i32) << 16) >> 20;
    counts as f32 * INTERNAL_LSB_C
}
