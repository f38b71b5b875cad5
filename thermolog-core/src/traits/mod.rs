//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod clock;
pub mod mux;
pub mod sensor;
pub mod serial;

pub use clock::Clock;
pub use mux::ChannelSelect;
pub use sensor::{SensorError, TemperatureSource};
pub use serial::SerialPort;
