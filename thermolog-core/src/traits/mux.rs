//! Analog multiplexer channel selection trait

/// Routes one thermocouple channel to the amplifier input
pub trait ChannelSelect {
    /// Select `channel` and wait for the select lines to settle
    ///
    /// Channel numbers are validated by the caller. Selecting the same
    /// channel twice leaves the hardware unchanged.
    fn select(&mut self, channel: u8);
}
