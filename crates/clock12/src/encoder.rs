//! Packing of [`ClockState`] onto the two output buses.
//!
//! ```text
//! uo_out : [7:5] minutes[5:3]  [4] am_pm  [3:0] hours
//! uio_out: [7:5] minutes[2:0]  [4] 0      [3:0] seconds_ticks
//! uio_oe : 0xFF
//! ```
use serde::Serialize;
use std::fmt;

use crate::timekeeper::{ClockState, SECONDS_PER_TICK};

/// Every bidirectional pin is driven by the clock.
pub const UIO_OE: u8 = 0xFF;

const HOURS_MASK: u8 = 0x0F;
const AM_PM_BIT: u8 = 4;
const MINUTES_SHIFT: u8 = 5;
const MINUTES_FIELD: u8 = 0x07;
const SECONDS_MASK: u8 = 0x0F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinOut {
    pub uo_out: u8,
    pub uio_out: u8,
    pub uio_oe: u8,
}

pub fn encode(state: &ClockState) -> PinOut {
    let minutes_upper = (state.minutes >> 3) & MINUTES_FIELD;
    let minutes_lower = state.minutes & MINUTES_FIELD;

    PinOut {
        uo_out: (minutes_upper << MINUTES_SHIFT)
            | ((state.am_pm as u8) << AM_PM_BIT)
            | (state.hours & HOURS_MASK),
        uio_out: (minutes_lower << MINUTES_SHIFT) | (state.seconds_ticks & SECONDS_MASK),
        uio_oe: UIO_OE,
    }
}

/// The time as an observer reads it off the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodedTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u32,
    pub pm: bool,
}

pub fn decode(uo_out: u8, uio_out: u8) -> DecodedTime {
    let minutes_upper = (uo_out >> MINUTES_SHIFT) & MINUTES_FIELD;
    let minutes_lower = (uio_out >> MINUTES_SHIFT) & MINUTES_FIELD;
    DecodedTime {
        hours: uo_out & HOURS_MASK,
        minutes: (minutes_upper << 3) | minutes_lower,
        seconds: (uio_out & SECONDS_MASK) as u32 * SECONDS_PER_TICK,
        pm: (uo_out >> AM_PM_BIT) & 1 == 1,
    }
}

impl fmt::Display for DecodedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02} {}",
            self.hours,
            self.minutes,
            self.seconds,
            if self.pm { "PM" } else { "AM" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(h: u8, m: u8, s: u8, pm: bool) -> ClockState {
        ClockState::try_new(h, m, s, pm).unwrap()
    }

    #[test]
    fn test_reset_state_pins() {
        let pins = encode(&ClockState::RESET);
        assert_eq!(pins.uo_out, 0x0C);
        assert_eq!(pins.uio_out, 0x00);
        assert_eq!(pins.uio_oe, 0xFF);
    }

    #[test]
    fn test_minutes_split_across_buses() {
        // 59 = 0b111_011
        let pins = encode(&state(11, 59, 14, true));
        assert_eq!(pins.uo_out, 0b111_1_1011);
        assert_eq!(pins.uio_out, 0b011_0_1110);
    }

    #[test]
    fn test_bit_four_of_uio_out_stays_low() {
        for minutes in 0..60 {
            for ticks in 0..15 {
                let pins = encode(&state(1, minutes, ticks, false));
                assert_eq!(pins.uio_out & 0x10, 0);
            }
        }
    }

    #[test]
    fn test_decode_reads_back_every_state() {
        for hours in 1..=12 {
            for minutes in 0..60 {
                let s = state(hours, minutes, 9, hours % 2 == 0);
                let pins = encode(&s);
                let time = decode(pins.uo_out, pins.uio_out);
                assert_eq!(time.to_string(), s.to_string());
            }
        }
    }
}
