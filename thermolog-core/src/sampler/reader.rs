//! Per-channel averaging
//!
//! A faulty conversion is dropped from the average but never aborts the
//! channel: the remaining samples are still taken. Only when every sample
//! fails does the channel come back without a value.

use embedded_hal::delay::DelayNs;

use crate::config::SamplingTiming;
use crate::traits::{ChannelSelect, SensorError, TemperatureSource};

/// Largest magnitude accepted from a source (°C)
///
/// Matches the MAX31855 14-bit range. Anything wider is a bad conversion
/// and would not fit the reply line.
pub const MAX_ABS_CELSIUS: f32 = 2048.0;

/// Outcome of sampling one channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSample {
    /// Physical channel number
    pub channel: u8,
    /// Mean of the valid samples, `None` if there were none
    pub average: Option<f32>,
    /// Number of samples included in the mean
    pub valid: u8,
    /// Number of conversions attempted
    pub taken: u8,
    /// Most recent fault seen on this channel
    pub last_fault: Option<SensorError>,
}

/// Takes and averages repeated readings on the selected channel
pub struct SensorReader<S, D> {
    source: S,
    delay: D,
    timing: SamplingTiming,
}

impl<S, D> SensorReader<S, D>
where
    S: TemperatureSource,
    D: DelayNs,
{
    /// Create a reader with the given timing
    pub fn new(source: S, delay: D, timing: SamplingTiming) -> Self {
        Self {
            source,
            delay,
            timing,
        }
    }

    /// Sampling timing in use
    pub fn timing(&self) -> &SamplingTiming {
        &self.timing
    }

    /// Select `channel`, let it settle, and average `samples` conversions
    ///
    /// Blocks for `mux_settle_ms + samples × sample_delay_ms`.
    pub fn sample_channel<M: ChannelSelect>(
        &mut self,
        selector: &mut M,
        channel: u8,
        samples: u8,
    ) -> ChannelSample {
        selector.select(channel);
        self.delay.delay_ms(self.timing.mux_settle_ms);

        let mut sum = 0.0f32;
        let mut valid = 0u8;
        let mut last_fault = None;

        for _ in 0..samples {
            match self.source.read_celsius() {
                Ok(celsius) if (-MAX_ABS_CELSIUS..=MAX_ABS_CELSIUS).contains(&celsius) => {
                    sum += celsius;
                    valid += 1;
                }
                Ok(_) => last_fault = Some(SensorError::OutOfRange),
                Err(e) => last_fault = Some(e),
            }
            self.delay.delay_ms(self.timing.sample_delay_ms);
        }

        let average = if valid > 0 {
            Some(sum / valid as f32)
        } else {
            None
        };

        ChannelSample {
            channel,
            average,
            valid,
            taken: samples,
            last_fault,
        }
    }
}
