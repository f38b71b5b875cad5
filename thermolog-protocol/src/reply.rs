//! Outgoing lines
//!
//! Every line the logger writes is a [`Reply`]. Rendering goes through
//! `core::fmt::Display` so a reply can be written straight into a fixed-size
//! `heapless::String` with [`Reply::render`]. The line terminator is added
//! by the serial port, not here.

use core::fmt::{self, Write};
use heapless::String;

use crate::command::{Parameter, RangeError};
use crate::readings::Readings;

/// Longest rendered reply line
pub const MAX_REPLY_LEN: usize = 160;

/// First line written after power-up
pub const BANNER: &str = "Multi-Channel Thermocouple Logger Ready";

/// Second line written after power-up
pub const COMMAND_SUMMARY: &str =
    "Commands: START, STOP, ACQUIRE, RATE, CHANNELS, SAMPLES, STATUS, RESET";

/// Configuration snapshot for the `STATUS` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    /// Sweep interval in whole seconds
    pub rate_s: u32,
    /// Active channel count
    pub channels: u8,
    /// Samples averaged per channel
    pub samples: u8,
    /// Periodic logging enabled
    pub active: bool,
}

/// A single line written to the host
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply<'a> {
    /// `START OK`
    Started,
    /// `STOP OK`
    Stopped,
    /// `RESET OK`
    ResetDone,
    /// `<VERB> OK` after a parameter was stored
    ParameterSet(Parameter),
    /// `<VERB> ERROR: <range>` after a parameter was rejected
    Rejected(RangeError),
    /// `ERROR: Unknown command`
    UnknownCommand,
    /// `STATUS: Rate=..,Channels=..,Samples=..,Active=..`
    Status(StatusReport),
    /// `TEMP: v1,v2,...` in answer to `ACQUIRE`
    Acquired(&'a Readings),
    /// `v1,v2,...` from periodic logging
    Logged(&'a Readings),
}

impl Reply<'_> {
    /// Render into a fixed-capacity line buffer
    pub fn render(&self) -> Result<String<MAX_REPLY_LEN>, fmt::Error> {
        let mut line = String::new();
        write!(line, "{}", self)?;
        Ok(line)
    }
}

impl fmt::Display for Reply<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Started => f.write_str("START OK"),
            Reply::Stopped => f.write_str("STOP OK"),
            Reply::ResetDone => f.write_str("RESET OK"),
            Reply::ParameterSet(parameter) => write!(f, "{} OK", parameter),
            Reply::Rejected(err) => {
                write!(f, "{} ERROR: {}", err.parameter, err.parameter.range_text())
            }
            Reply::UnknownCommand => f.write_str("ERROR: Unknown command"),
            Reply::Status(status) => write!(
                f,
                "STATUS: Rate={},Channels={},Samples={},Active={}",
                status.rate_s, status.channels, status.samples, status.active
            ),
            Reply::Acquired(readings) => write!(f, "TEMP: {}", readings),
            Reply::Logged(readings) => write!(f, "{}", readings),
        }
    }
}
