//! Line-oriented serial transport trait

/// Byte input and line output for the command interface
///
/// Implementations must buffer internally: `read_byte` never waits for
/// data, and `write_line` must not block indefinitely.
pub trait SerialPort {
    /// Transport-specific error type
    type Error;

    /// Non-blocking byte read
    ///
    /// Returns:
    /// - `Ok(Some(byte))` if a byte is available
    /// - `Ok(None)` if nothing is waiting
    /// - `Err(Self::Error)` on a transport fault
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Write `line` followed by the line terminator
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}
