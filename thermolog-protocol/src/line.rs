//! Input line accumulation
//!
//! Bytes arrive one at a time from the serial port. `LineParser` collects
//! them until a terminator (`\n` or `\r`) and then hands back the finished
//! line, leaving itself empty for the next one. A CR LF pair therefore
//! yields one line followed by an ignored empty one.

use heapless::Vec;

/// Maximum accepted line length in bytes (terminator excluded)
pub const MAX_LINE_LEN: usize = 64;

/// A complete input line, terminator stripped
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Errors that can occur while accumulating a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// The line exceeded `MAX_LINE_LEN` and was discarded
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Collecting bytes into the buffer
    Collecting,
    /// Buffer overflowed, dropping bytes until the next terminator
    Discarding,
}

/// Accumulates bytes into terminator-delimited lines
#[derive(Debug, Clone)]
pub struct LineParser {
    state: ParseState,
    buffer: Line,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create an empty line parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Collecting,
            buffer: Vec::new(),
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.state = ParseState::Collecting;
        self.buffer.clear();
    }

    /// Number of bytes waiting for a terminator
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true for the bytes that end a line
    pub fn is_terminator(byte: u8) -> bool {
        byte == b'\n' || byte == b'\r'
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty line,
    /// `Ok(None)` when more bytes are needed (or a terminator arrived with
    /// nothing pending), and `Err(LineError::Overflow)` once, at the
    /// terminator of a line that was too long.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        if Self::is_terminator(byte) {
            return match self.state {
                ParseState::Discarding => {
                    self.reset();
                    Err(LineError::Overflow)
                }
                ParseState::Collecting if self.buffer.is_empty() => Ok(None),
                ParseState::Collecting => Ok(Some(core::mem::take(&mut self.buffer))),
            };
        }

        if self.state == ParseState::Collecting && self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.state = ParseState::Discarding;
        }
        Ok(None)
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete line found, if any.
    /// Remaining bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}
