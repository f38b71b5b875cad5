//! Configuration types
//!
//! Runtime logger settings mutated over the serial interface, plus the
//! fixed timing of the sampling sequence. Nothing here is persisted.

pub mod timing;
pub mod types;

pub use timing::*;
pub use types::*;
