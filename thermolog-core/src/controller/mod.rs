//! Command execution and the control loop
//!
//! The interpreter applies one input line to the configuration and decides
//! what happens next. The controller owns the hardware, drains serial input,
//! runs sweeps when asked or when the logging interval has elapsed, and
//! writes every reply.

pub mod control;
pub mod interpreter;

pub use control::{ControlError, Controller, SweepTimer};
pub use interpreter::{interpret, Outcome};
