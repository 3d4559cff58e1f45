use std::num::NonZeroU32;

use crate::timekeeper::Tick;

/// Reset and enable as sampled on one edge, already decoded from the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub reset: bool,
    pub enable: bool,
}

impl Control {
    pub const RUN: Control = Control {
        reset: false,
        enable: true,
    };

    /// `rst_n` is active low.
    pub fn from_pins(ena: bool, rst_n: bool) -> Self {
        Self {
            reset: !rst_n,
            enable: ena,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DividerState {
    pub count: u32,
}

impl DividerState {
    /// One edge of the prescaler. Reset beats enable, and a gated edge
    /// neither counts nor ticks.
    pub fn next(self, wrap: NonZeroU32, control: Control) -> (DividerState, bool) {
        if control.reset {
            return (DividerState::default(), false);
        }
        if !control.enable {
            return (self, false);
        }
        // count < wrap, so this never overflows
        let count = self.count + 1;
        if count >= wrap.get() {
            (DividerState { count: 0 }, true)
        } else {
            (DividerState { count }, false)
        }
    }
}

/// Prescaler turning system-clock edges into [`Tick`]s.
#[derive(Debug, Clone)]
pub struct Divider {
    wrap: NonZeroU32,
    state: DividerState,
}

impl Divider {
    pub fn new(wrap: NonZeroU32) -> Self {
        Self {
            wrap,
            state: DividerState::default(),
        }
    }

    pub fn wrap(&self) -> NonZeroU32 {
        self.wrap
    }

    pub fn count(&self) -> u32 {
        self.state.count
    }

    pub fn edge(&mut self, control: Control) -> Option<Tick> {
        let (state, wrapped) = self.state.next(self.wrap, control);
        self.state = state;
        wrapped.then(Tick::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESET: Control = Control {
        reset: true,
        enable: true,
    };
    const GATED: Control = Control {
        reset: false,
        enable: false,
    };

    fn wrap(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn drive(divider: &mut Divider, control: Control, edges: usize) -> Vec<(u32, bool)> {
        (0..edges)
            .map(|_| {
                let tick = divider.edge(control).is_some();
                (divider.count(), tick)
            })
            .collect()
    }

    #[test]
    fn test_ticks_once_per_wrap() {
        let mut divider = Divider::new(wrap(4));
        #[rustfmt::skip]
        assert_eq!(drive(&mut divider, Control::RUN, 8), [
            (1, false), (2, false), (3, false), (0, true),
            (1, false), (2, false), (3, false), (0, true),
        ]);
    }

    #[test]
    fn test_wrap_of_one_ticks_every_edge() {
        let mut divider = Divider::new(wrap(1));
        assert_eq!(drive(&mut divider, Control::RUN, 3), [(0, true); 3]);
    }

    #[test]
    fn test_gated_edges_hold() {
        let mut divider = Divider::new(wrap(4));
        drive(&mut divider, Control::RUN, 2);
        assert_eq!(drive(&mut divider, GATED, 5), [(2, false); 5]);
        assert_eq!(drive(&mut divider, Control::RUN, 2), [(3, false), (0, true)]);
    }

    #[test]
    fn test_reset_clears_without_ticking() {
        let mut divider = Divider::new(wrap(4));
        drive(&mut divider, Control::RUN, 3);
        assert_eq!(drive(&mut divider, RESET, 2), [(0, false); 2]);
    }

    #[test]
    fn test_reset_dominates_disable() {
        let mut divider = Divider::new(wrap(4));
        drive(&mut divider, Control::RUN, 3);
        let both = Control::from_pins(false, false);
        assert_eq!(drive(&mut divider, both, 1), [(0, false)]);
    }
}
