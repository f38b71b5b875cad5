//! Monotonic millisecond clock trait

/// Wall-clock source for the periodic sweep trigger
pub trait Clock {
    /// Milliseconds since an arbitrary epoch
    ///
    /// The counter wraps at `u32::MAX`; consumers compare timestamps with
    /// wrapping subtraction.
    fn now_ms(&self) -> u32;
}
