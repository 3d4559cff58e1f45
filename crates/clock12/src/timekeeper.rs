use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Real seconds represented by one quantized seconds unit.
pub const SECONDS_PER_TICK: u32 = 4;
/// Quantized seconds units per minute.
pub const TICKS_PER_MINUTE: u8 = 15;
pub const MINUTES_PER_HOUR: u8 = 60;
/// Ticks in one full 12-hour period.
pub const TICKS_PER_PERIOD: u32 = TICKS_PER_MINUTE as u32 * MINUTES_PER_HOUR as u32 * 12;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("hours out of range: {0} (expected 1..=12)")]
    Hours(u8),
    #[error("minutes out of range: {0} (expected 0..=59)")]
    Minutes(u8),
    #[error("seconds ticks out of range: {0} (expected 0..=14)")]
    SecondsTicks(u8),
}

/// Proof that the divider wrapped on this edge.
///
/// Only [`Divider`](crate::Divider) hands these out, so time can only move
/// forward through the prescaler.
#[derive(Debug)]
pub struct Tick {
    _private: (),
}

impl Tick {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClockState {
    pub hours: u8,
    pub minutes: u8,
    pub seconds_ticks: u8,
    /// `false` = AM, `true` = PM.
    pub am_pm: bool,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::RESET
    }
}

impl ClockState {
    /// 12:00:00 AM.
    pub const RESET: ClockState = ClockState {
        hours: 12,
        minutes: 0,
        seconds_ticks: 0,
        am_pm: false,
    };

    /// Builds an arbitrary in-range state, e.g. to start verification at 11:59.
    pub fn try_new(hours: u8, minutes: u8, seconds_ticks: u8, am_pm: bool) -> Result<Self, StateError> {
        let state = Self {
            hours,
            minutes,
            seconds_ticks,
            am_pm,
        };
        state.check()?;
        Ok(state)
    }

    /// Reports the first field outside its range.
    pub fn check(&self) -> Result<(), StateError> {
        if !(1..=12).contains(&self.hours) {
            return Err(StateError::Hours(self.hours));
        }
        if self.minutes >= MINUTES_PER_HOUR {
            return Err(StateError::Minutes(self.minutes));
        }
        if self.seconds_ticks >= TICKS_PER_MINUTE {
            return Err(StateError::SecondsTicks(self.seconds_ticks));
        }
        Ok(())
    }

    pub fn is_pm(&self) -> bool {
        self.am_pm
    }

    pub fn seconds(&self) -> u32 {
        self.seconds_ticks as u32 * SECONDS_PER_TICK
    }

    /// Applies one tick. Carries run strictly in order and each fires only
    /// when the previous stage rolled over.
    pub fn advance(self, _tick: Tick) -> Self {
        let mut next = self;
        if next.carry_seconds() && next.carry_minutes() {
            (next.hours, next.am_pm) = step_hour(next.hours, next.am_pm);
        }
        next
    }

    fn carry_seconds(&mut self) -> bool {
        if self.seconds_ticks >= TICKS_PER_MINUTE - 1 {
            self.seconds_ticks = 0;
            return true;
        }
        self.seconds_ticks += 1;
        false
    }

    fn carry_minutes(&mut self) -> bool {
        if self.minutes >= MINUTES_PER_HOUR - 1 {
            self.minutes = 0;
            return true;
        }
        self.minutes += 1;
        false
    }
}

/// The hour carry. AM/PM flips exactly when the displayed hour becomes 12.
pub(crate) fn step_hour(hours: u8, am_pm: bool) -> (u8, bool) {
    match hours {
        11 => (12, !am_pm),
        12 => (1, am_pm),
        h => (h % 12 + 1, am_pm),
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02} {}",
            self.hours,
            self.minutes,
            self.seconds(),
            if self.am_pm { "PM" } else { "AM" }
        )
    }
}

/// Sole owner of the [`ClockState`].
#[derive(Debug, Clone, Default)]
pub struct TimeKeeper {
    state: ClockState,
}

impl TimeKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a preset time. Out-of-range states are refused.
    pub fn starting_at(state: ClockState) -> Result<Self, StateError> {
        state.check()?;
        Ok(Self { state })
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ClockState::RESET;
    }

    pub fn on_tick(&mut self, tick: Tick) {
        let prev = self.state;
        self.state = prev.advance(tick);
        debug_assert!(self.state.check().is_ok(), "clock left its range: {:?}", self.state);

        if prev.hours != self.state.hours {
            log::trace!("hour carry {} -> {}", prev, self.state);
            if prev.am_pm != self.state.am_pm {
                log::trace!("meridiem flipped to {}", if self.state.am_pm { "PM" } else { "AM" });
            }
        }
    }
}
