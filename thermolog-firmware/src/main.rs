//! Thermolog - Multi-Channel Thermocouple Logger Firmware
//!
//! Main firmware binary for RP2040-based boards. One MAX31855 amplifier
//! reads up to twelve thermocouples through a CD74HC4067 analog mux;
//! the host drives the logger with plain-text commands over UART0.
//!
//! Pinout:
//! - UART0: TX GPIO0, RX GPIO1
//! - Mux select S0..S3: GPIO2..GPIO5
//! - MAX31855: CLK GPIO18, DO GPIO16, CS GPIO17

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use thermolog_core::controller::Controller;
use thermolog_core::sampler::{SensorReader, SweepEngine};
use thermolog_drivers::mux::Cd74hc4067;
use thermolog_drivers::sensor::Max31855;

use crate::board::{EmbassyClock, UartPort};

mod board;
mod config;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Thermolog firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Host link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::BAUDRATE;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    info!("UART initialized at {} baud", config::BAUDRATE);

    // Mux select lines, S0 first
    let select = [
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
    ];
    let mux = Cd74hc4067::with_settle(select, Delay, config::SELECT_SETTLE_US);

    // MAX31855 is read-only, no MOSI
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = config::SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_rxonly(p.SPI0, p.PIN_18, p.PIN_16, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let amplifier = Max31855::new(spi, cs);
    info!("Mux and amplifier initialized");

    let reader = SensorReader::new(amplifier, Delay, config::sampling_timing());
    let engine = SweepEngine::new(mux, reader);

    let mut controller = Controller::new(
        UartPort::new(uart),
        EmbassyClock,
        engine,
        config::power_on_config(),
    );

    if controller.startup(&mut Delay).is_err() {
        warn!("Failed to write startup banner");
    }

    // Sweeps block, so the control loop owns the executor from here on
    controller.run()
}
