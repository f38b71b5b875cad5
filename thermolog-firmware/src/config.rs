//! Board configuration
//!
//! Constants come from logger.toml, validated and generated by build.rs.

use thermolog_core::config::{LoggerConfig, SamplingTiming};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Sampling delays for this board
pub fn sampling_timing() -> SamplingTiming {
    SamplingTiming {
        mux_settle_ms: MUX_SETTLE_MS,
        sample_delay_ms: SAMPLE_DELAY_MS,
        startup_delay_ms: STARTUP_DELAY_MS,
    }
}

/// Logger state at power-on
///
/// build.rs rejects out-of-range values, so the fallback only guards
/// against the ranges drifting apart.
pub fn power_on_config() -> LoggerConfig {
    match LoggerConfig::with_values(POWER_ON_RATE_S, POWER_ON_CHANNELS, POWER_ON_SAMPLES) {
        Ok(config) => config,
        Err(e) => {
            defmt::warn!("logger.toml {} out of range, using defaults", e.parameter);
            LoggerConfig::default()
        }
    }
}
