//! Thermolog serial command protocol
//!
//! This crate defines the plain-text protocol spoken between the logger
//! and a host over a serial line. The protocol is line-oriented ASCII:
//!
//! ```text
//! host → logger:  VERB [ARG]\n        (case-insensitive, whitespace-trimmed,
//!                                      terminated by \n or \r)
//! logger → host:  VERB OK\n
//!                 VERB ERROR: ...\n
//!                 TEMP: 21.50,22.00,nan\n
//!                 21.50,22.00,nan\n    (periodic logging, no prefix)
//! ```
//!
//! The crate is split by direction:
//! - [`line`] accumulates incoming bytes into complete lines
//! - [`command`] tokenizes a line into a [`Command`] and decodes arguments
//! - [`reply`] renders outgoing lines, including [`Readings`] vectors

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod line;
pub mod readings;
pub mod reply;

pub use command::{parse_command, Command, Parameter, ParseError, RangeError};
pub use line::{Line, LineError, LineParser, MAX_LINE_LEN};
pub use readings::{Readings, MAX_CHANNELS};
pub use reply::{Reply, StatusReport, BANNER, COMMAND_SUMMARY, MAX_REPLY_LEN};
