use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::{Simulator, TOP_MODULE};
use crate::{
    ClockConfig, Simulation, SimulatorError,
    config::divider_width,
    design::{ClockCore, Inputs},
    vcd::VcdWriter,
};

/// A fluent builder for configuring and initializing a [`Simulator`] or
/// [`Simulation`].
///
/// Use [`Simulator::builder()`] or [`Simulation::builder()`] to obtain the
/// appropriate variant. Both share the same configuration methods; only
/// `.build()` differs in return type.
pub struct SimulatorBuilder<Target = Simulator> {
    config: ClockConfig,
    vcd_path: Option<PathBuf>,
    _marker: PhantomData<Target>,
}

/// Configuration methods shared by all builder variants.
impl<Target> SimulatorBuilder<Target> {
    pub(crate) fn create() -> Self {
        Self {
            config: ClockConfig::default(),
            vcd_path: None,
            _marker: PhantomData,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClockConfig) -> Self {
        self.config = config;
        self
    }

    pub fn system_clock_hz(mut self, hz: u64) -> Self {
        self.config.system_clock_hz = hz;
        self
    }

    /// Override the prescaler: one tick every `wrap` enabled edges.
    pub fn divider_wrap(mut self, wrap: u32) -> Self {
        self.config.divider_wrap = Some(wrap);
        self
    }

    /// Enable VCD dumping to the specified file.
    pub fn vcd<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.vcd_path = Some(path.as_ref().to_path_buf());
        self
    }

    fn build_simulator(self) -> Result<Simulator, SimulatorError> {
        self.config.validate()?;
        let wrap = self.config.divider_wrap()?;

        let mut sim = Simulator {
            core: ClockCore::new(wrap),
            inputs: Inputs::default(),
            clk_level: false,
            cycles: 0,
            config: self.config,
            divider_width: divider_width(wrap),
            vcd_writer: None,
        };

        if let Some(path) = self.vcd_path {
            let writer = VcdWriter::new(&path, TOP_MODULE, &sim.named_signals())?;
            log::debug!("dumping waveforms to {}", path.display());
            sim.vcd_writer = Some(writer);
        }

        log::debug!(
            "built {TOP_MODULE}: {} Hz system clock, tick every {} edges ({}-bit divider)",
            sim.config.system_clock_hz,
            wrap,
            sim.divider_width
        );
        Ok(sim)
    }
}

impl SimulatorBuilder<Simulator> {
    pub fn new() -> Self {
        Self::create()
    }

    pub fn build(self) -> Result<Simulator, SimulatorError> {
        self.build_simulator()
    }
}

impl Default for SimulatorBuilder<Simulator> {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorBuilder<Simulation> {
    pub fn build(self) -> Result<Simulation, SimulatorError> {
        self.build_simulator().map(Simulation::new)
    }
}
