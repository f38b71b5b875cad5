//! Board-agnostic core logic for the thermocouple logger firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (mux, thermocouple, serial, clock)
//! - Runtime configuration state and sampling timing
//! - Per-channel averaging and full-channel sweeps
//! - Command execution and the cooperative control loop
//!
//! Everything runs in a single execution context. A sweep blocks the
//! control loop for its whole duration; serial input queues in the
//! transport until the loop gets back to draining it.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to later modules
mod fmt;

pub mod config;
pub mod controller;
pub mod sampler;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;
