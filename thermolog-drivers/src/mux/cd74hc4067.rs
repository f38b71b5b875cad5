//! CD74HC4067 16:1 analog multiplexer
//!
//! Four select lines carry the binary channel number, S0 being the least
//! significant bit. The enable input is tied low on the board, so the mux
//! always routes the selected channel.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use thermolog_core::traits::ChannelSelect;

/// Settle time after changing the select lines (µs)
pub const DEFAULT_SELECT_SETTLE_US: u32 = 10;

/// Multiplexer driven by four GPIO select lines
pub struct Cd74hc4067<P, D> {
    /// Select lines S0..S3
    select: [P; 4],
    delay: D,
    settle_us: u32,
    current: Option<u8>,
}

impl<P, D> Cd74hc4067<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    /// Create a driver with the default settle time
    ///
    /// `select` is ordered S0, S1, S2, S3.
    pub fn new(select: [P; 4], delay: D) -> Self {
        Self::with_settle(select, delay, DEFAULT_SELECT_SETTLE_US)
    }

    /// Create a driver with a custom settle time in microseconds
    pub fn with_settle(select: [P; 4], delay: D, settle_us: u32) -> Self {
        Self {
            select,
            delay,
            settle_us,
            current: None,
        }
    }

    /// Channel currently routed, if any has been selected
    pub fn current(&self) -> Option<u8> {
        self.current
    }
}

impl<P, D> ChannelSelect for Cd74hc4067<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    fn select(&mut self, channel: u8) {
        let channel = channel & 0x0F;
        for (bit, pin) in self.select.iter_mut().enumerate() {
            let high = channel & (1 << bit) != 0;
            pin.set_state(PinState::from(high))
                .unwrap_or_else(|e| match e {});
        }
        self.delay.delay_us(self.settle_us);
        self.current = Some(channel);
    }
}
