use std::fmt;

/// Every pin of the clock's top-level module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Port {
    Clk,
    Ena,
    RstN,
    UiIn,
    UioIn,
    UoOut,
    UioOut,
    UioOe,
    /// Raw prescaler counter, exposed for diagnostics only.
    ClkDiv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortTypeKind {
    Clock,
    ResetSyncLow,
    Logic,
    Bit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

impl Port {
    pub const ALL: [Port; 9] = [
        Port::Clk,
        Port::Ena,
        Port::RstN,
        Port::UiIn,
        Port::UioIn,
        Port::UoOut,
        Port::UioOut,
        Port::UioOe,
        Port::ClkDiv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Port::Clk => "clk",
            Port::Ena => "ena",
            Port::RstN => "rst_n",
            Port::UiIn => "ui_in",
            Port::UioIn => "uio_in",
            Port::UoOut => "uo_out",
            Port::UioOut => "uio_out",
            Port::UioOe => "uio_oe",
            Port::ClkDiv => "clk_div",
        }
    }

    pub fn from_name(name: &str) -> Option<Port> {
        Port::ALL.into_iter().find(|port| port.name() == name)
    }

    pub fn type_kind(self) -> PortTypeKind {
        match self {
            Port::Clk => PortTypeKind::Clock,
            Port::RstN => PortTypeKind::ResetSyncLow,
            Port::Ena => PortTypeKind::Bit,
            _ => PortTypeKind::Logic,
        }
    }

    pub fn direction(self) -> PortDirection {
        match self {
            Port::Clk | Port::Ena | Port::RstN | Port::UiIn | Port::UioIn => PortDirection::Input,
            Port::UoOut | Port::UioOut | Port::UioOe | Port::ClkDiv => PortDirection::Output,
        }
    }

    /// Pins `modify()` may drive. The clock is advanced by ticking, never written.
    pub fn is_drivable(self) -> bool {
        self.direction() == PortDirection::Input && self != Port::Clk
    }

    /// Bit width of the pin. `clk_div` follows the configured prescaler.
    pub fn width(self, divider_width: usize) -> usize {
        match self {
            Port::Clk | Port::Ena | Port::RstN => 1,
            Port::ClkDiv => divider_width,
            _ => 8,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pre-resolved handle to a pin.
///
/// Resolve once with [`Simulator::signal`](crate::Simulator::signal) and reuse
/// the handle for every read and write; no name lookup happens afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalRef {
    pub port: Port,
    pub width: usize,
}

impl SignalRef {
    pub(crate) fn new(port: Port, divider_width: usize) -> Self {
        Self {
            port,
            width: port.width(divider_width),
        }
    }

    pub(crate) fn mask(&self) -> u64 {
        if self.width >= 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }
}
