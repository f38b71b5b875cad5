//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thermolog-core for the logger's front end:
//!
//! - Channel selection (CD74HC4067 16:1 analog multiplexer)
//! - Thermocouple amplifier (MAX31855 over SPI)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod mux;
pub mod sensor;
