//! End-to-end control loop behaviour over scripted serial input
//!
//! The whole `Controller` runs against a simulated board: a millisecond
//! clock that only moves when something delays, a mux that records every
//! selection, and an amplifier that reads `20 + channel` unless the channel
//! is marked dead.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use proptest::prelude::*;
use thermolog_core::config::{LoggerConfig, SamplingTiming};
use thermolog_core::controller::Controller;
use thermolog_core::sampler::{SensorReader, SweepEngine};
use thermolog_core::traits::{ChannelSelect, Clock, SensorError, SerialPort, TemperatureSource};

#[derive(Clone, Default)]
struct Board {
    now_ns: Rc<Cell<u64>>,
    selected: Rc<Cell<u8>>,
    selections: Rc<RefCell<Vec<u8>>>,
    dead: Rc<Cell<Option<u8>>>,
    conversions: Rc<Cell<u32>>,
    rx: Rc<RefCell<VecDeque<u8>>>,
    tx: Rc<RefCell<Vec<String>>>,
}

impl Board {
    fn now_ms(&self) -> u32 {
        (self.now_ns.get() / 1_000_000) as u32
    }

    fn wait_ms(&self, ms: u32) {
        self.now_ns.set(self.now_ns.get() + ms as u64 * 1_000_000);
    }
}

struct Delay(Board);
struct Millis(Board);
struct Mux(Board);
struct Amplifier(Board);
struct Uart(Board);

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.now_ns.set(self.0.now_ns.get() + ns as u64);
    }
}

impl Clock for Millis {
    fn now_ms(&self) -> u32 {
        self.0.now_ms()
    }
}

impl ChannelSelect for Mux {
    fn select(&mut self, channel: u8) {
        self.0.selected.set(channel);
        self.0.selections.borrow_mut().push(channel);
    }
}

impl TemperatureSource for Amplifier {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.0.conversions.set(self.0.conversions.get() + 1);
        let channel = self.0.selected.get();
        if self.0.dead.get() == Some(channel) {
            Err(SensorError::OpenCircuit)
        } else {
            Ok(20.0 + channel as f32)
        }
    }
}

impl SerialPort for Uart {
    type Error = core::convert::Infallible;

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.0.rx.borrow_mut().pop_front())
    }

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.0.tx.borrow_mut().push(line.to_owned());
        Ok(())
    }
}

struct Logger {
    board: Board,
    controller: Controller<Uart, Millis, Mux, Amplifier, Delay>,
}

impl Logger {
    fn boot() -> Self {
        let board = Board::default();
        let reader = SensorReader::new(
            Amplifier(board.clone()),
            Delay(board.clone()),
            SamplingTiming::default(),
        );
        let mut controller = Controller::new(
            Uart(board.clone()),
            Millis(board.clone()),
            SweepEngine::new(Mux(board.clone()), reader),
            LoggerConfig::default(),
        );
        controller
            .startup(&mut Delay(board.clone()))
            .expect("startup");
        board.tx.borrow_mut().clear();
        Self { board, controller }
    }

    /// Queue `input`, run one loop pass, return the lines written
    fn send(&mut self, input: &str) -> Vec<String> {
        self.board.rx.borrow_mut().extend(input.bytes());
        self.controller.poll().expect("poll");
        std::mem::take(&mut *self.board.tx.borrow_mut())
    }

    fn idle(&mut self) -> Vec<String> {
        self.send("")
    }
}

#[test]
fn banner_is_written_at_startup() {
    let board = Board::default();
    let reader = SensorReader::new(
        Amplifier(board.clone()),
        Delay(board.clone()),
        SamplingTiming::default(),
    );
    let mut controller = Controller::new(
        Uart(board.clone()),
        Millis(board.clone()),
        SweepEngine::new(Mux(board.clone()), reader),
        LoggerConfig::default(),
    );
    controller.startup(&mut Delay(board.clone())).unwrap();

    assert_eq!(
        *board.tx.borrow(),
        [
            "Multi-Channel Thermocouple Logger Ready",
            "Commands: START, STOP, ACQUIRE, RATE, CHANNELS, SAMPLES, STATUS, RESET",
        ]
    );
    assert_eq!(board.now_ms(), 500);
}

#[test]
fn channels_then_status() {
    let mut logger = Logger::boot();
    assert_eq!(logger.send("channels 5\r\n"), ["CHANNELS OK"]);
    assert_eq!(
        logger.send("STATUS\n"),
        ["STATUS: Rate=1,Channels=5,Samples=10,Active=false"]
    );
}

#[test]
fn rejected_rate_keeps_prior_value() {
    let mut logger = Logger::boot();
    assert_eq!(logger.send("RATE 7\n"), ["RATE OK"]);
    assert_eq!(
        logger.send("RATE 0\n"),
        ["RATE ERROR: Invalid rate (1-255 seconds)"]
    );
    assert_eq!(
        logger.send("status\n"),
        ["STATUS: Rate=7,Channels=3,Samples=10,Active=false"]
    );
}

#[test]
fn acquire_is_independent_of_logging() {
    let mut logger = Logger::boot();
    assert_eq!(logger.send("ACQUIRE\n"), ["TEMP: 21.00,22.00,23.00"]);
    assert_eq!(logger.board.conversions.get(), 30);
    assert_eq!(*logger.board.selections.borrow(), [1, 2, 3]);

    // Still idle: no periodic output however long we wait
    logger.board.wait_ms(60_000);
    assert!(logger.idle().is_empty());
}

#[test]
fn dead_channel_reported_as_nan() {
    let mut logger = Logger::boot();
    logger.board.dead.set(Some(2));
    assert_eq!(logger.send("CHANNELS 4\n"), ["CHANNELS OK"]);
    assert_eq!(logger.send("ACQUIRE\n"), ["TEMP: 21.00,nan,23.00,24.00"]);
}

#[test]
fn periodic_logging_fires_on_interval() {
    let mut logger = Logger::boot();
    logger.send("CHANNELS 2\nSAMPLES 1\nRATE 2\n");
    assert_eq!(logger.send("START\n"), ["START OK"]);

    logger.board.wait_ms(1999);
    assert!(logger.idle().is_empty());

    logger.board.wait_ms(1);
    assert_eq!(logger.idle(), ["21.00,22.00"]);

    // Measured from when the sweep fired, not when it finished
    logger.board.wait_ms(2000 - 240);
    assert_eq!(logger.idle(), ["21.00,22.00"]);
}

#[test]
fn acquire_while_logging_keeps_schedule() {
    let mut logger = Logger::boot();
    logger.send("CHANNELS 1\nSAMPLES 1\n");
    assert_eq!(logger.send("START\n"), ["START OK"]);

    logger.board.wait_ms(400);
    assert_eq!(logger.send("ACQUIRE\n"), ["TEMP: 21.00"]);

    // Interval still counts from START, not from the ACQUIRE sweep
    logger.board.wait_ms(1000 - 400 - 120 - 1);
    assert!(logger.idle().is_empty());
    logger.board.wait_ms(1);
    assert_eq!(logger.idle(), ["21.00"]);
}

#[test]
fn stop_halts_logging_until_restarted() {
    let mut logger = Logger::boot();
    logger.send("START\n");
    logger.board.wait_ms(1000);
    assert_eq!(logger.idle().len(), 1);

    assert_eq!(logger.send("STOP\n"), ["STOP OK"]);
    logger.board.wait_ms(30_000);
    assert!(logger.idle().is_empty());

    assert_eq!(logger.send("START\n"), ["START OK"]);
    assert!(logger.idle().is_empty());
    logger.board.wait_ms(1000);
    assert_eq!(logger.idle(), ["21.00,22.00,23.00"]);
}

#[test]
fn reset_restores_defaults() {
    let mut logger = Logger::boot();
    logger.send("RATE 30\nCHANNELS 12\nSAMPLES 20\nSTART\n");
    assert_eq!(logger.send("RESET\n"), ["RESET OK"]);
    assert_eq!(
        logger.send("STATUS\n"),
        ["STATUS: Rate=1,Channels=3,Samples=10,Active=false"]
    );
}

#[test]
fn garbage_gets_one_error_per_line() {
    let mut logger = Logger::boot();
    assert_eq!(
        logger.send("hello\r\n\r\nRATE\nRATE\t5\n"),
        [
            "ERROR: Unknown command",
            "ERROR: Unknown command",
            "ERROR: Unknown command",
        ]
    );
}

proptest! {
    #[test]
    fn channel_setting_round_trips_through_status(n in -50i32..50) {
        let mut logger = Logger::boot();
        let reply = logger.send(&format!("CHANNELS {}\n", n));
        let status = logger.send("STATUS\n");

        if (1..=12).contains(&n) {
            prop_assert_eq!(reply, ["CHANNELS OK"]);
            prop_assert_eq!(
                status,
                [format!("STATUS: Rate=1,Channels={},Samples=10,Active=false", n)]
            );
        } else {
            prop_assert_eq!(reply, ["CHANNELS ERROR: Invalid channels (1-12)"]);
            prop_assert_eq!(status, ["STATUS: Rate=1,Channels=3,Samples=10,Active=false"]);
        }
    }

    #[test]
    fn acquire_emits_one_value_per_channel(n in 1u8..=12) {
        let mut logger = Logger::boot();
        logger.send(&format!("SAMPLES 1\nCHANNELS {}\n", n));
        let lines = logger.send("ACQUIRE\n");

        prop_assert_eq!(lines.len(), 1);
        let values = lines[0].strip_prefix("TEMP: ").unwrap_or_default();
        prop_assert_eq!(values.split(',').count(), n as usize);
        let expected: Vec<u8> = (1..=n).collect();
        prop_assert_eq!(&*logger.board.selections.borrow(), &expected);
    }
}
