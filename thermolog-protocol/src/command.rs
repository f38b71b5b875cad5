//! Command tokenizer and argument decoding
//!
//! Parsing happens in two stages. [`parse_command`] turns a raw line into a
//! [`Command`], carrying the numeric argument of parametric commands as the
//! raw decoded integer. [`Parameter::validate`] then range-checks that value.
//! Keeping the stages apart lets the executor reject a value without ever
//! touching configuration state.
//!
//! Argument decoding follows C `atol`: leading whitespace is skipped, an
//! optional sign and the leading digits are read, and anything after the
//! digits is ignored. A value with no digits decodes as 0, which is outside
//! every valid range, so `RATE abc` is answered exactly like `RATE 0`.

use core::fmt;
use core::ops::RangeInclusive;

/// Valid sampling period for `RATE`, in seconds
pub const RATE_RANGE_S: RangeInclusive<i32> = 1..=255;

/// Valid active channel count for `CHANNELS`
pub const CHANNEL_RANGE: RangeInclusive<i32> = 1..=12;

/// Valid samples-per-channel for `SAMPLES`
pub const SAMPLE_RANGE: RangeInclusive<i32> = 1..=20;

/// A parsed serial command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Enable periodic logging
    Start,
    /// Disable periodic logging
    Stop,
    /// Perform one sweep immediately
    Acquire,
    /// Report the current configuration
    Status,
    /// Restore factory defaults
    Reset,
    /// Set a numeric parameter (value not yet range-checked)
    Set(Parameter, i32),
}

/// Numeric configuration parameters settable over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parameter {
    /// Periodic sweep interval in seconds
    Rate,
    /// Number of active channels
    Channels,
    /// Samples averaged per channel
    Samples,
}

/// Why a line did not produce a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line was empty after trimming; produces no reply
    Empty,
    /// Line did not match any known verb
    UnknownCommand,
}

/// A parameter value outside its valid range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeError {
    /// The parameter that was rejected
    pub parameter: Parameter,
}

impl Parameter {
    /// All parametric commands, in matching order
    pub const ALL: [Parameter; 3] = [Parameter::Rate, Parameter::Channels, Parameter::Samples];

    /// Wire verb for this parameter
    pub const fn verb(self) -> &'static str {
        match self {
            Parameter::Rate => "RATE",
            Parameter::Channels => "CHANNELS",
            Parameter::Samples => "SAMPLES",
        }
    }

    /// Inclusive valid range for this parameter
    pub const fn range(self) -> RangeInclusive<i32> {
        match self {
            Parameter::Rate => RATE_RANGE_S,
            Parameter::Channels => CHANNEL_RANGE,
            Parameter::Samples => SAMPLE_RANGE,
        }
    }

    /// Human-readable range text used in error replies
    pub const fn range_text(self) -> &'static str {
        match self {
            Parameter::Rate => "Invalid rate (1-255 seconds)",
            Parameter::Channels => "Invalid channels (1-12)",
            Parameter::Samples => "Invalid samples (1-20)",
        }
    }

    /// Range-check a decoded argument
    ///
    /// Every valid range fits in a `u8`, so the accepted value is narrowed.
    pub fn validate(self, raw: i32) -> Result<u8, RangeError> {
        if self.range().contains(&raw) {
            Ok(raw as u8)
        } else {
            Err(RangeError { parameter: self })
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Whitespace as understood by C `isspace`, which includes vertical tab
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Case-insensitively strip `prefix` from the front of `text`
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        text.get(prefix.len()..)
    } else {
        None
    }
}

/// Decode a leading integer the way C `atol` does
///
/// Saturates at the `i32` bounds instead of overflowing.
pub fn decode_int(text: &str) -> i32 {
    let text = text.trim_start_matches(is_space);
    let bytes = text.as_bytes();

    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i32 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = (b - b'0') as i32;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Tokenize one input line into a command
///
/// The line is trimmed and matched case-insensitively. Zero-argument verbs
/// must match the whole line; parametric verbs must be followed by a single
/// space, after which the remainder is decoded with [`decode_int`].
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_matches(is_space);
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    const SIMPLE: [(&str, Command); 5] = [
        ("START", Command::Start),
        ("STOP", Command::Stop),
        ("ACQUIRE", Command::Acquire),
        ("STATUS", Command::Status),
        ("RESET", Command::Reset),
    ];

    if let Some((_, cmd)) = SIMPLE
        .iter()
        .find(|(verb, _)| line.eq_ignore_ascii_case(verb))
    {
        return Ok(*cmd);
    }

    for parameter in Parameter::ALL {
        let verb = parameter.verb();
        if let Some(rest) = strip_prefix_ignore_case(line, verb) {
            if let Some(arg) = rest.strip_prefix(' ') {
                return Ok(Command::Set(parameter, decode_int(arg)));
            }
        }
    }

    Err(ParseError::UnknownCommand)
}
