//! Runtime configuration state
//!
//! One `LoggerConfig` lives for the whole run. It is only changed through
//! validated setters, so every field is always inside its valid range; a
//! rejected value leaves the state untouched.

use thermolog_protocol::{Parameter, RangeError, StatusReport};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Factory default active channel count
pub const DEFAULT_CHANNELS: u8 = 3;

/// Factory default samples per channel
pub const DEFAULT_SAMPLES: u8 = 10;

/// Factory default sweep period in seconds
pub const DEFAULT_RATE_S: u8 = 1;

/// Milliseconds per unit of the `RATE` argument
pub const MS_PER_RATE_UNIT: u32 = 1000;

/// Logger settings shared by the command path and the sweep path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoggerConfig {
    channel_count: u8,
    sample_count: u8,
    sample_interval_ms: u32,
    logging_active: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            channel_count: DEFAULT_CHANNELS,
            sample_count: DEFAULT_SAMPLES,
            sample_interval_ms: DEFAULT_RATE_S as u32 * MS_PER_RATE_UNIT,
            logging_active: false,
        }
    }
}

impl LoggerConfig {
    /// Create a config from raw power-on values, validating each one
    pub fn with_values(rate_s: i32, channels: i32, samples: i32) -> Result<Self, RangeError> {
        let mut config = Self::default();
        config.set_rate_s(rate_s)?;
        config.set_channel_count(channels)?;
        config.set_sample_count(samples)?;
        Ok(config)
    }

    /// Restore every field to its factory default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Active channel count (1..=12)
    pub fn channel_count(&self) -> u8 {
        self.channel_count
    }

    /// Samples averaged per channel (1..=20)
    pub fn sample_count(&self) -> u8 {
        self.sample_count
    }

    /// Periodic sweep interval in milliseconds
    pub fn sample_interval_ms(&self) -> u32 {
        self.sample_interval_ms
    }

    /// Sweep interval in whole seconds, as reported by `STATUS`
    pub fn rate_s(&self) -> u32 {
        self.sample_interval_ms / MS_PER_RATE_UNIT
    }

    /// Periodic logging enabled
    pub fn logging_active(&self) -> bool {
        self.logging_active
    }

    /// Enable or disable periodic logging
    pub fn set_logging(&mut self, active: bool) {
        self.logging_active = active;
    }

    /// Set the sweep period from a `RATE` argument in seconds
    pub fn set_rate_s(&mut self, raw: i32) -> Result<(), RangeError> {
        let rate_s = Parameter::Rate.validate(raw)?;
        self.sample_interval_ms = rate_s as u32 * MS_PER_RATE_UNIT;
        Ok(())
    }

    /// Set the active channel count from a `CHANNELS` argument
    pub fn set_channel_count(&mut self, raw: i32) -> Result<(), RangeError> {
        self.channel_count = Parameter::Channels.validate(raw)?;
        Ok(())
    }

    /// Set the per-channel sample count from a `SAMPLES` argument
    pub fn set_sample_count(&mut self, raw: i32) -> Result<(), RangeError> {
        self.sample_count = Parameter::Samples.validate(raw)?;
        Ok(())
    }

    /// Apply any parametric command
    pub fn apply(&mut self, parameter: Parameter, raw: i32) -> Result<(), RangeError> {
        match parameter {
            Parameter::Rate => self.set_rate_s(raw),
            Parameter::Channels => self.set_channel_count(raw),
            Parameter::Samples => self.set_sample_count(raw),
        }
    }

    /// Snapshot for the `STATUS` reply
    pub fn status(&self) -> StatusReport {
        StatusReport {
            rate_s: self.rate_s(),
            channels: self.channel_count,
            samples: self.sample_count,
            active: self.logging_active,
        }
    }
}
