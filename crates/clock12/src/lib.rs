mod config;
mod design;
mod divider;
mod encoder;
mod ir;
mod scheduler;
mod simulation;
mod simulator;
mod timekeeper;
mod vcd;

/// Write access to the input pins, handed out by `modify()`.
pub struct IOContext<'a> {
    pub(crate) inputs: &'a mut design::Inputs,
}

impl IOContext<'_> {
    /// Drives `signal` with `val`, truncated to the pin width.
    pub fn set<T: Into<u64>>(&mut self, signal: SignalRef, val: T) -> Result<(), SimulatorError> {
        simulator::drive(self.inputs, signal, val.into())
    }
}

pub use config::{ClockConfig, ConfigError, DEFAULT_SYSTEM_CLOCK_HZ, divider_width};
pub use design::{ClockCore, Inputs};
pub use divider::{Control, Divider, DividerState};
pub use encoder::{DecodedTime, PinOut, UIO_OE, decode, encode};
pub use ir::{Port, PortDirection, PortTypeKind, SignalRef};
pub use simulation::Simulation;
pub use simulator::{NamedSignal, Simulator, SimulatorBuilder, SimulatorError};
pub use timekeeper::{
    ClockState, MINUTES_PER_HOUR, SECONDS_PER_TICK, StateError, TICKS_PER_MINUTE,
    TICKS_PER_PERIOD, Tick, TimeKeeper,
};
