//! Line interpretation
//!
//! `interpret` is pure with respect to the hardware: it only touches the
//! configuration. Commands that need a sweep, or that must restart the
//! logging timer, are handed back to the caller as an [`Outcome`].

use heapless::String;
use thermolog_protocol::{parse_command, Command, ParseError, Reply, MAX_LINE_LEN};

use crate::config::LoggerConfig;

/// What the controller must do after a line has been interpreted
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Write this reply, nothing else
    Reply(Reply<'static>),
    /// Logging was enabled; restart the interval timer, then reply
    LoggingStarted,
    /// Run one sweep now and reply with its readings
    Acquire,
    /// No reply at all (blank line)
    Silent,
}

/// Stand-in for bytes outside ASCII
const NON_ASCII: char = '?';

/// Map a raw line to ASCII text, one character per byte
///
/// Non-ASCII bytes become `?`, so they never match a verb and stop
/// argument decoding like any other non-digit. Returns `None` for a line
/// longer than the input buffer.
fn ascii_text(line: &[u8]) -> Option<String<MAX_LINE_LEN>> {
    let mut text = String::new();
    for &byte in line {
        let c = if byte.is_ascii() { byte as char } else { NON_ASCII };
        text.push(c).ok()?;
    }
    Some(text)
}

/// Apply one raw input line to `config`
///
/// Lines are handled byte by byte: `RATE 5\xff` still sets the rate,
/// while `START\xff` is an unknown command.
pub fn interpret(line: &[u8], config: &mut LoggerConfig) -> Outcome {
    let Some(text) = ascii_text(line) else {
        return Outcome::Reply(Reply::UnknownCommand);
    };

    let command = match parse_command(&text) {
        Ok(command) => command,
        Err(ParseError::Empty) => return Outcome::Silent,
        Err(ParseError::UnknownCommand) => {
            debug!("unknown command ({} bytes)", line.len());
            return Outcome::Reply(Reply::UnknownCommand);
        }
    };

    debug!("command: {}", command);

    match command {
        Command::Start => {
            config.set_logging(true);
            Outcome::LoggingStarted
        }
        Command::Stop => {
            config.set_logging(false);
            Outcome::Reply(Reply::Stopped)
        }
        Command::Acquire => Outcome::Acquire,
        Command::Status => Outcome::Reply(Reply::Status(config.status())),
        Command::Reset => {
            config.reset();
            info!("configuration reset to defaults");
            Outcome::Reply(Reply::ResetDone)
        }
        Command::Set(parameter, raw) => match config.apply(parameter, raw) {
            Ok(()) => {
                info!("{} set to {}", parameter, raw);
                Outcome::Reply(Reply::ParameterSet(parameter))
            }
            Err(err) => {
                warn!("{} rejected: {}", parameter, raw);
                Outcome::Reply(Reply::Rejected(err))
            }
        },
    }
}
