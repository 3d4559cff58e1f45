use thiserror::Error;

use crate::ConfigError;

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Unknown signal '{0}'")]
    UnknownSignal(String),
    #[error(
        "Signal '{0}' cannot be driven. Only ena, rst_n, ui_in and uio_in are inputs; use `tick()` to advance clk."
    )]
    NotAnInput(String),
    #[error("Clock period must be at least 2 time units, got {0}")]
    InvalidClockPeriod(u64),
    #[error("Cannot schedule an event at t={time}: simulation time is already {now}")]
    ScheduleInPast { time: u64, now: u64 },
    #[error("No clock is running. Call `add_clock()` before running cycles.")]
    NoClock,
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("VCD output error: {0}")]
    Vcd(#[from] std::io::Error),
}
