//! Build script for thermolog-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates logger.toml at compile time
//! - Generates board_config.rs from logger.toml

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let board = validate_config();
    generate_config(&board);
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated board settings
struct BoardConfig {
    baudrate: u32,
    spi_frequency_hz: u32,
    select_settle_us: u32,
    mux_settle_ms: u32,
    sample_delay_ms: u32,
    startup_delay_ms: u32,
    rate_s: i64,
    channels: i64,
    samples: i64,
}

/// Validate logger.toml configuration at compile time
fn validate_config() -> BoardConfig {
    // Re-run if logger.toml changes
    println!("cargo:rerun-if-changed=logger.toml");

    let config_path = Path::new("logger.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: logger.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a logger.toml board configuration.        ║\n\
            ║  Please create one in the thermolog-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read logger.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in logger.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let baudrate = integer(&config, "serial", "baudrate", 9600, 300..=921_600, &mut errors);
    let spi_frequency_hz = integer(
        &config,
        "spi",
        "frequency_hz",
        1_000_000,
        100_000..=5_000_000,
        &mut errors,
    );
    let select_settle_us = integer(&config, "sampling", "select_settle_us", 10, 1..=1000, &mut errors);
    let mux_settle_ms = integer(&config, "sampling", "mux_settle_ms", 100, 0..=5000, &mut errors);
    let sample_delay_ms = integer(&config, "sampling", "sample_delay_ms", 20, 0..=1000, &mut errors);
    let startup_delay_ms = integer(&config, "sampling", "startup_delay_ms", 500, 0..=10_000, &mut errors);

    // Same ranges the RATE, CHANNELS and SAMPLES commands accept
    let rate_s = integer(&config, "defaults", "rate_s", 1, 1..=255, &mut errors);
    let channels = integer(&config, "defaults", "channels", 3, 1..=12, &mut errors);
    let samples = integer(&config, "defaults", "samples", 10, 1..=20, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration in logger.toml               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=logger.toml validated successfully");

    BoardConfig {
        baudrate: baudrate as u32,
        spi_frequency_hz: spi_frequency_hz as u32,
        select_settle_us: select_settle_us as u32,
        mux_settle_ms: mux_settle_ms as u32,
        sample_delay_ms: sample_delay_ms as u32,
        startup_delay_ms: startup_delay_ms as u32,
        rate_s,
        channels,
        samples,
    }
}

/// Look up `[section] key`, falling back to `default` when absent
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: i64,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> i64 {
    let value = match config.get(section).and_then(|s| s.get(key)) {
        None => return default,
        Some(toml::Value::Integer(v)) => *v,
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            return default;
        }
    };

    if !range.contains(&value) {
        errors.push(format!(
            "[{}] {} must be {}-{}",
            section,
            key,
            range.start(),
            range.end()
        ));
    }
    value
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the validated settings as Rust constants
fn generate_config(board: &BoardConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();

    writeln!(f, "// Generated from logger.toml by build.rs").unwrap();
    writeln!(f, "pub const BAUDRATE: u32 = {};", board.baudrate).unwrap();
    writeln!(f, "pub const SPI_FREQUENCY_HZ: u32 = {};", board.spi_frequency_hz).unwrap();
    writeln!(f, "pub const SELECT_SETTLE_US: u32 = {};", board.select_settle_us).unwrap();
    writeln!(f, "pub const MUX_SETTLE_MS: u32 = {};", board.mux_settle_ms).unwrap();
    writeln!(f, "pub const SAMPLE_DELAY_MS: u32 = {};", board.sample_delay_ms).unwrap();
    writeln!(f, "pub const STARTUP_DELAY_MS: u32 = {};", board.startup_delay_ms).unwrap();
    writeln!(f, "pub const POWER_ON_RATE_S: i32 = {};", board.rate_s).unwrap();
    writeln!(f, "pub const POWER_ON_CHANNELS: i32 = {};", board.channels).unwrap();
    writeln!(f, "pub const POWER_ON_SAMPLES: i32 = {};", board.samples).unwrap();
}
