//! Cooperative control loop
//!
//! One call to [`Controller::poll`] is one pass of the loop:
//!
//! 1. Drain every byte the serial port has ready. Each completed line is
//!    interpreted and answered before the next byte is read, so an
//!    `ACQUIRE` in the middle of a burst runs its sweep right there.
//! 2. If logging is active and the interval has elapsed, restart the timer,
//!    sweep, and write the bare readings line.
//!
//! Sweeps block. Bytes that arrive meanwhile wait in the port's own buffer.

use embedded_hal::delay::DelayNs;
use thermolog_protocol::{LineError, LineParser, Reply, BANNER, COMMAND_SUMMARY};

use super::interpreter::{interpret, Outcome};
use crate::config::LoggerConfig;
use crate::sampler::SweepEngine;
use crate::traits::{ChannelSelect, Clock, SerialPort, TemperatureSource};

/// Errors surfaced by one pass of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError<E> {
    /// The serial port failed to read or write
    Serial(E),
    /// A reply did not fit the line buffer and was not sent
    ReplyOverflow,
}

impl<E> ControlError<E> {
    /// Short description for logging
    pub fn describe(&self) -> &'static str {
        match self {
            ControlError::Serial(_) => "serial port error",
            ControlError::ReplyOverflow => "reply too long",
        }
    }
}

/// Timestamp of the last periodic sweep
///
/// All arithmetic wraps, so the trigger keeps working across the `u32`
/// millisecond rollover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepTimer {
    last_ms: u32,
}

impl SweepTimer {
    /// Create a timer that last fired at `now_ms`
    pub const fn new(now_ms: u32) -> Self {
        Self { last_ms: now_ms }
    }

    /// Restart the interval from `now_ms`
    pub fn restart(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }

    /// Time of the last restart
    pub fn last_ms(&self) -> u32 {
        self.last_ms
    }

    /// True once at least `interval_ms` has passed since the last restart
    pub fn is_due(&self, now_ms: u32, interval_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_ms) >= interval_ms
    }
}

/// Owns the hardware and the logger state
pub struct Controller<P, C, M, S, D> {
    port: P,
    clock: C,
    engine: SweepEngine<M, S, D>,
    config: LoggerConfig,
    timer: SweepTimer,
    lines: LineParser,
}

impl<P, C, M, S, D> Controller<P, C, M, S, D>
where
    P: SerialPort,
    C: Clock,
    M: ChannelSelect,
    S: TemperatureSource,
    D: DelayNs,
{
    /// Create a controller starting from `config`
    pub fn new(port: P, clock: C, engine: SweepEngine<M, S, D>, config: LoggerConfig) -> Self {
        let timer = SweepTimer::new(clock.now_ms());
        Self {
            port,
            clock,
            engine,
            config,
            timer,
            lines: LineParser::new(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Periodic sweep timer
    pub fn timer(&self) -> &SweepTimer {
        &self.timer
    }

    /// Write the power-up banner and wait before accepting commands
    pub fn startup(&mut self, delay: &mut impl DelayNs) -> Result<(), ControlError<P::Error>> {
        self.port.write_line(BANNER).map_err(ControlError::Serial)?;
        self.port
            .write_line(COMMAND_SUMMARY)
            .map_err(ControlError::Serial)?;

        let wait_ms = self.engine.reader().timing().startup_delay_ms;
        delay.delay_ms(wait_ms);

        self.timer.restart(self.clock.now_ms());
        info!(
            "logger ready: {} channels, {} samples, {} ms interval",
            self.config.channel_count(),
            self.config.sample_count(),
            self.config.sample_interval_ms()
        );
        Ok(())
    }

    /// Run one pass of the control loop
    ///
    /// A failed read stops draining for this pass and a failed reply is
    /// skipped, but the periodic check always runs. The first error of the
    /// pass is returned once the pass is complete.
    pub fn poll(&mut self) -> Result<(), ControlError<P::Error>> {
        let mut first_error = None;

        loop {
            let byte = match self.port.read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(e) => {
                    warn!("serial read failed, input drain cut short");
                    first_error.get_or_insert(ControlError::Serial(e));
                    break;
                }
            };

            let result = match self.lines.feed(byte) {
                Ok(Some(line)) => {
                    let outcome = interpret(&line, &mut self.config);
                    self.dispatch(outcome)
                }
                Ok(None) => Ok(()),
                Err(LineError::Overflow) => {
                    warn!("input line longer than buffer, discarded");
                    self.send(Reply::UnknownCommand)
                }
            };
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        }

        let now = self.clock.now_ms();
        if self.config.logging_active()
            && self.timer.is_due(now, self.config.sample_interval_ms())
        {
            self.timer.restart(now);
            let readings = self.engine.sweep(&self.config);
            if let Err(e) = self.send(Reply::Logged(&readings)) {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Poll forever, logging and skipping over failed passes
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(err) = self.poll() {
                warn!("control loop: {}", err.describe());
            }
        }
    }

    fn dispatch(&mut self, outcome: Outcome) -> Result<(), ControlError<P::Error>> {
        match outcome {
            Outcome::Reply(reply) => self.send(reply),
            Outcome::LoggingStarted => {
                self.timer.restart(self.clock.now_ms());
                info!("logging started");
                self.send(Reply::Started)
            }
            Outcome::Acquire => {
                let readings = self.engine.sweep(&self.config);
                self.send(Reply::Acquired(&readings))
            }
            Outcome::Silent => Ok(()),
        }
    }

    fn send(&mut self, reply: Reply<'_>) -> Result<(), ControlError<P::Error>> {
        let line = reply.render().map_err(|_| ControlError::ReplyOverflow)?;
        self.port.write_line(&line).map_err(ControlError::Serial)
    }
}
