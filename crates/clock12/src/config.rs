use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::timekeeper::SECONDS_PER_TICK;

pub const DEFAULT_SYSTEM_CLOCK_HZ: u64 = 10_000_000;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("divider_wrap must be at least 1")]
    ZeroDividerWrap,
    #[error("system_clock_hz must be at least 1")]
    ZeroFrequency,
    #[error("a {edges}-edge prescaler does not fit the 32-bit divider counter")]
    DividerOverflow { edges: u64 },
    #[error("system clock of {hz} Hz is too fast to simulate with nanosecond resolution")]
    ClockTooFast { hz: u64 },
    #[error("failed to parse clock configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Clock core parameters, usually read from a TOML file.
///
/// ```toml
/// system_clock_hz = 10_000_000
/// divider_wrap    = 4   # optional, overrides the derived prescaler
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    pub system_clock_hz: u64,
    pub divider_wrap: Option<u32>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            system_clock_hz: DEFAULT_SYSTEM_CLOCK_HZ,
            divider_wrap: None,
        }
    }
}

impl ClockConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ClockConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.divider_wrap()?;
        self.clock_period_ns()?;
        Ok(())
    }

    /// Number of system-clock edges per seconds quantum.
    pub fn divider_wrap(&self) -> Result<NonZeroU32, ConfigError> {
        if let Some(wrap) = self.divider_wrap {
            return NonZeroU32::new(wrap).ok_or(ConfigError::ZeroDividerWrap);
        }
        if self.system_clock_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        let edges = self.system_clock_hz.saturating_mul(SECONDS_PER_TICK as u64);
        u32::try_from(edges)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ConfigError::DividerOverflow { edges })
    }

    /// Period of the system clock, rounded down to whole nanoseconds.
    ///
    /// The timed simulation toggles the clock every half period, so anything
    /// shorter than 2 ns is rejected.
    pub fn clock_period_ns(&self) -> Result<u64, ConfigError> {
        if self.system_clock_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        let period = NANOS_PER_SECOND / self.system_clock_hz;
        if period < 2 {
            return Err(ConfigError::ClockTooFast {
                hz: self.system_clock_hz,
            });
        }
        Ok(period)
    }
}

/// Bits needed to hold every prescaler value `0..wrap`.
pub fn divider_width(wrap: NonZeroU32) -> usize {
    let max = wrap.get() - 1;
    (u32::BITS - max.leading_zeros()).max(1) as usize
}
