//! Analog multiplexers

pub mod cd74hc4067;

pub use cd74hc4067::{Cd74hc4067, DEFAULT_SELECT_SETTLE_US};
