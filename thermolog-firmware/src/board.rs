//! Board adapters for the core traits

use embassy_time::Instant;
use embedded_io::{Read, ReadReady, Write};
use thermolog_core::traits::{Clock, SerialPort};

/// Line terminator sent after every reply
const LINE_END: &[u8] = b"\r\n";

/// Serial command port over a buffered UART
///
/// Reads only take bytes the interrupt handler has already queued, so
/// `read_byte` never waits.
pub struct UartPort<U> {
    uart: U,
}

impl<U> UartPort<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }
}

impl<U> SerialPort for UartPort<U>
where
    U: Read + ReadReady + Write,
{
    type Error = U::Error;

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.uart.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.uart.write_all(line.as_bytes())?;
        self.uart.write_all(LINE_END)
    }
}

/// Millisecond clock from the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation wraps every ~49.7 days; the sweep timer handles it
        Instant::now().as_millis() as u32
    }
}
