//! Full-channel sweeps
//!
//! Channel 0 of the multiplexer is reserved by the board wiring, so a sweep
//! over `n` channels visits physical channels `1..=n` in ascending order.
//! Entry `i` of the result always belongs to channel `i + 1`.

use embedded_hal::delay::DelayNs;
use thermolog_protocol::{Readings, MAX_CHANNELS};

use super::reader::SensorReader;
use crate::config::LoggerConfig;
use crate::traits::{ChannelSelect, TemperatureSource};

/// First physical channel used for thermocouples
pub const FIRST_CHANNEL: u8 = 1;

/// Drives the multiplexer and the reader across all active channels
pub struct SweepEngine<M, S, D> {
    selector: M,
    reader: SensorReader<S, D>,
}

impl<M, S, D> SweepEngine<M, S, D>
where
    M: ChannelSelect,
    S: TemperatureSource,
    D: DelayNs,
{
    /// Create a sweep engine
    pub fn new(selector: M, reader: SensorReader<S, D>) -> Self {
        Self { selector, reader }
    }

    /// Reader used for each channel
    pub fn reader(&self) -> &SensorReader<S, D> {
        &self.reader
    }

    /// Sweep the channels configured in `config`
    pub fn sweep(&mut self, config: &LoggerConfig) -> Readings {
        self.sweep_channels(config.channel_count(), config.sample_count())
    }

    /// Sweep channels `1..=channels`, averaging `samples` readings each
    ///
    /// `channels` is clamped to `MAX_CHANNELS`.
    pub fn sweep_channels(&mut self, channels: u8, samples: u8) -> Readings {
        let channels = channels.min(MAX_CHANNELS as u8);
        debug!("sweep start: {} channels x {} samples", channels, samples);

        let mut readings = Readings::new();
        for channel in FIRST_CHANNEL..FIRST_CHANNEL + channels {
            let sample = self
                .reader
                .sample_channel(&mut self.selector, channel, samples);

            if sample.average.is_none() {
                warn!(
                    "channel {}: no valid sample ({})",
                    channel,
                    sample.last_fault
                );
            }

            if readings.push(sample.average).is_err() {
                break;
            }
        }

        debug!("sweep done: {}/{} channels valid", readings.valid_count(), readings.len());
        readings
    }
}
