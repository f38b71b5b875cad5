//! Simulated hardware for unit tests
//!
//! All parts share one simulated timeline: `MockDelay` advances it,
//! `MockClock` reads it, and `MockSource` stamps every conversion with it.
//! The mux and the source share the selected channel, so a source plan can
//! answer per channel.
#![allow(dead_code)]

use core::cell::{Cell, RefCell};
use embedded_hal::delay::DelayNs;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::traits::{ChannelSelect, Clock, SensorError, SerialPort, TemperatureSource};

/// Sample plan: `(channel, sample index on that channel) -> reading`
pub type Plan = fn(u8, u32) -> Result<f32, SensorError>;

/// Shared simulated timeline in nanoseconds
#[derive(Debug, Clone, Default)]
pub struct Timeline(Rc<Cell<u64>>);

impl Timeline {
    pub fn now_ms(&self) -> u32 {
        (self.0.get() / 1_000_000) as u32
    }

    pub fn advance_ms(&self, ms: u32) {
        self.0.set(self.0.get() + ms as u64 * 1_000_000);
    }
}

pub struct MockDelay(pub Timeline);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let t = &(self.0).0;
        t.set(t.get() + ns as u64);
    }
}

pub struct MockClock(pub Timeline);

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.0.now_ms()
    }
}

/// Records every selection
#[derive(Clone, Default)]
pub struct MockMux {
    pub selected: Rc<Cell<u8>>,
    pub history: Rc<RefCell<Vec<u8>>>,
}

impl ChannelSelect for MockMux {
    fn select(&mut self, channel: u8) {
        self.selected.set(channel);
        self.history.borrow_mut().push(channel);
    }
}

/// Answers conversions from a plan, per selected channel
#[derive(Clone)]
pub struct MockSource {
    selected: Rc<Cell<u8>>,
    timeline: Timeline,
    plan: Plan,
    counts: Rc<RefCell<[u32; 16]>>,
    pub read_times_ms: Rc<RefCell<Vec<(u8, u32)>>>,
}

impl MockSource {
    pub fn new(mux: &MockMux, timeline: &Timeline, plan: Plan) -> Self {
        Self {
            selected: mux.selected.clone(),
            timeline: timeline.clone(),
            plan,
            counts: Rc::new(RefCell::new([0; 16])),
            read_times_ms: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn reads_on(&self, channel: u8) -> u32 {
        self.counts.borrow()[channel as usize]
    }

    pub fn total_reads(&self) -> u32 {
        self.counts.borrow().iter().sum()
    }
}

impl TemperatureSource for MockSource {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let channel = self.selected.get();
        let index = {
            let mut counts = self.counts.borrow_mut();
            let index = counts[channel as usize];
            counts[channel as usize] += 1;
            index
        };
        self.read_times_ms
            .borrow_mut()
            .push((channel, self.timeline.now_ms()));
        (self.plan)(channel, index)
    }
}

/// Plan: every channel reads `20 + channel` degrees
pub fn steady(channel: u8, _index: u32) -> Result<f32, SensorError> {
    Ok(20.0 + channel as f32)
}

/// In-memory serial port
///
/// While `read_faults` is non-zero each read fails once and decrements it.
#[derive(Clone, Default)]
pub struct MockSerial {
    pub input: Rc<RefCell<VecDeque<u8>>>,
    pub output: Rc<RefCell<Vec<String>>>,
    pub read_faults: Rc<Cell<u32>>,
}

impl MockSerial {
    pub fn send(&self, text: &str) {
        self.input.borrow_mut().extend(text.bytes());
    }

    pub fn take_output(&self) -> Vec<String> {
        core::mem::take(&mut *self.output.borrow_mut())
    }
}

impl SerialPort for MockSerial {
    type Error = ();

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let faults = self.read_faults.get();
        if faults > 0 {
            self.read_faults.set(faults - 1);
            return Err(());
        }
        Ok(self.input.borrow_mut().pop_front())
    }

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.output.borrow_mut().push(line.to_string());
        Ok(())
    }
}
