//! Sampling sequence timing

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wait after switching the multiplexer before the first conversion (ms)
pub const DEFAULT_MUX_SETTLE_MS: u32 = 100;

/// Wait after each conversion, covers the amplifier's conversion time (ms)
pub const DEFAULT_SAMPLE_DELAY_MS: u32 = 20;

/// Wait after the startup banner before servicing commands (ms)
pub const DEFAULT_STARTUP_DELAY_MS: u32 = 500;

/// Fixed delays of the settle-and-sample sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingTiming {
    /// Signal stabilisation after a channel change (ms)
    pub mux_settle_ms: u32,
    /// Gap after every single-shot reading (ms)
    pub sample_delay_ms: u32,
    /// Pause after the startup banner (ms)
    pub startup_delay_ms: u32,
}

impl Default for SamplingTiming {
    fn default() -> Self {
        Self {
            mux_settle_ms: DEFAULT_MUX_SETTLE_MS,
            sample_delay_ms: DEFAULT_SAMPLE_DELAY_MS,
            startup_delay_ms: DEFAULT_STARTUP_DELAY_MS,
        }
    }
}

impl SamplingTiming {
    /// Expected blocking time of one sweep in milliseconds
    pub fn sweep_duration_ms(&self, channels: u8, samples: u8) -> u32 {
        let per_channel = self.mux_settle_ms + samples as u32 * self.sample_delay_ms;
        channels as u32 * per_channel
    }
}
