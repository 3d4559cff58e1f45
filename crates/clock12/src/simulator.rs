use crate::{
    ClockConfig, IOContext, Port, PortDirection, PortTypeKind, SignalRef,
    design::{ClockCore, Inputs},
    timekeeper::ClockState,
    vcd::VcdWriter,
};

mod builder;
mod error;

pub use builder::SimulatorBuilder;
pub use error::SimulatorError;

pub(crate) const TOP_MODULE: &str = "clock12";

/// A pin with its resolved handle and metadata.
#[derive(Debug, Clone)]
pub struct NamedSignal {
    pub name: String,
    pub signal: SignalRef,
    pub direction: PortDirection,
    pub type_kind: PortTypeKind,
}

/// Cycle-level front end of the clock core.
///
/// Inputs are driven with [`modify`](Simulator::modify), one rising edge is
/// evaluated per [`tick`](Simulator::tick), and any pin can be sampled with
/// [`get`](Simulator::get). Outputs are always recomputed from the current
/// state, so a sample taken right after `tick()` shows that edge's result.
pub struct Simulator {
    pub(crate) core: ClockCore,
    pub(crate) inputs: Inputs,
    pub(crate) clk_level: bool,
    pub(crate) cycles: u64,
    pub(crate) config: ClockConfig,
    pub(crate) divider_width: usize,
    pub(crate) vcd_writer: Option<VcdWriter>,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("cycles", &self.cycles)
            .field("state", &self.core.state())
            .finish()
    }
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder<Simulator> {
        SimulatorBuilder::<Simulator>::create()
    }

    /// Resolves a pin name into a [`SignalRef`].
    pub fn signal(&self, name: &str) -> Result<SignalRef, SimulatorError> {
        Port::from_name(name)
            .map(|port| SignalRef::new(port, self.divider_width))
            .ok_or_else(|| SimulatorError::UnknownSignal(name.to_string()))
    }

    /// Drives input pins. Changes are sampled by the next edge.
    pub fn modify<F>(&mut self, f: F) -> Result<(), SimulatorError>
    where
        F: FnOnce(&mut IOContext) -> Result<(), SimulatorError>,
    {
        let mut ctx = IOContext {
            inputs: &mut self.inputs,
        };
        f(&mut ctx)
    }

    /// Evaluates one rising edge of `clk`.
    pub fn tick(&mut self) {
        self.core.edge(self.inputs.control());
        self.cycles += 1;
    }

    pub fn tick_n(&mut self, count: u64) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// Samples the current value of any pin.
    pub fn get(&self, signal: SignalRef) -> u64 {
        let pins = self.core.outputs();
        match signal.port {
            Port::Clk => self.clk_level as u64,
            Port::Ena => self.inputs.ena as u64,
            Port::RstN => self.inputs.rst_n as u64,
            Port::UiIn => self.inputs.ui_in as u64,
            Port::UioIn => self.inputs.uio_in as u64,
            Port::UoOut => pins.uo_out as u64,
            Port::UioOut => pins.uio_out as u64,
            Port::UioOe => pins.uio_oe as u64,
            Port::ClkDiv => self.core.divider().count() as u64,
        }
    }

    /// The time-keeper's state, for verification.
    pub fn state(&self) -> ClockState {
        self.core.state()
    }

    /// Raw prescaler count, same as sampling `clk_div`.
    pub fn divider_count(&self) -> u32 {
        self.core.divider().count()
    }

    /// Rising edges evaluated so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Returns every pin of the top-level module.
    pub fn named_signals(&self) -> Vec<NamedSignal> {
        Port::ALL
            .into_iter()
            .map(|port| NamedSignal {
                name: port.name().to_string(),
                signal: SignalRef::new(port, self.divider_width),
                direction: port.direction(),
                type_kind: port.type_kind(),
            })
            .collect()
    }

    /// Writes changed pin values to the VCD file, if one was configured.
    pub fn dump(&mut self, timestamp: u64) -> Result<(), SimulatorError> {
        if let Some(mut writer) = self.vcd_writer.take() {
            let res = writer.dump(timestamp, |signal| self.get(signal));
            self.vcd_writer = Some(writer);
            res?;
        }
        Ok(())
    }
}

pub(crate) fn drive(inputs: &mut Inputs, signal: SignalRef, value: u64) -> Result<(), SimulatorError> {
    let value = value & signal.mask();
    match signal.port {
        Port::Ena => inputs.ena = value != 0,
        Port::RstN => inputs.rst_n = value != 0,
        Port::UiIn => inputs.ui_in = value as u8,
        Port::UioIn => inputs.uio_in = value as u8,
        port => return Err(SimulatorError::NotAnInput(port.name().to_string())),
    }
    Ok(())
}
