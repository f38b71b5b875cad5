//! Channel sampling
//!
//! [`SensorReader`] averages repeated conversions on one channel;
//! [`SweepEngine`] walks every active channel in order and collects the
//! averages into a [`Readings`](thermolog_protocol::Readings) vector.
//! Both block for the full settle-and-sample sequence.

pub mod reader;
pub mod sweep;

pub use reader::{ChannelSample, SensorReader};
pub use sweep::SweepEngine;
