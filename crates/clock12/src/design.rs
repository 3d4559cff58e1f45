use std::num::NonZeroU32;

use crate::{
    divider::{Control, Divider},
    encoder::{PinOut, encode},
    timekeeper::{ClockState, TimeKeeper},
};

/// Levels currently driven onto the input pins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inputs {
    pub ena: bool,
    pub rst_n: bool,
    /// Accepted but unused by the design.
    pub ui_in: u8,
    /// Accepted but unused by the design.
    pub uio_in: u8,
}

impl Inputs {
    pub fn control(&self) -> Control {
        Control::from_pins(self.ena, self.rst_n)
    }
}

/// The top-level module: divider feeding the time-keeper, one call per edge.
#[derive(Debug, Clone)]
pub struct ClockCore {
    divider: Divider,
    keeper: TimeKeeper,
    last_control: Option<Control>,
}

impl ClockCore {
    /// Powers up already in the reset state.
    pub fn new(wrap: NonZeroU32) -> Self {
        Self {
            divider: Divider::new(wrap),
            keeper: TimeKeeper::new(),
            last_control: None,
        }
    }

    pub fn divider(&self) -> &Divider {
        &self.divider
    }

    pub fn state(&self) -> ClockState {
        self.keeper.state()
    }

    pub fn outputs(&self) -> PinOut {
        encode(&self.keeper.state())
    }

    /// Evaluates one rising edge of the system clock.
    pub fn edge(&mut self, control: Control) -> PinOut {
        self.log_control(control);

        // The divider settles first; the keeper only ever sees its verdict.
        let tick = self.divider.edge(control);
        if control.reset {
            self.keeper.reset();
        } else if let Some(tick) = tick {
            self.keeper.on_tick(tick);
        }

        self.outputs()
    }

    fn log_control(&mut self, control: Control) {
        let prev = self.last_control.replace(control);
        if prev.map(|c| c.reset) != Some(control.reset) {
            if control.reset {
                log::debug!("reset asserted");
            } else {
                log::debug!("reset released at {}", self.keeper.state());
            }
        }
        if prev.map(|c| c.enable) != Some(control.enable) {
            log::debug!(
                "divider {} at count {}",
                if control.enable { "enabled" } else { "gated" },
                self.divider.count()
            );
        }
    }
}
