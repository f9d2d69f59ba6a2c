//! Core data types for countdown
//!
//! This module defines the shared data structures used throughout the application.

use std::fmt;

/// Highest value the seconds field may hold
pub const MAX_SECONDS: u32 = 59;

/// Remaining time on the timer
///
/// `seconds` is always in `0..=59`. Every constructor and setter clamps,
/// so there is no way to build an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    minutes: u32,
    seconds: u32,
}

impl Countdown {
    pub const ZERO: Countdown = Countdown { minutes: 0, seconds: 0 };

    /// Create a countdown, clamping seconds into range
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes,
            seconds: seconds.min(MAX_SECONDS),
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn set_minutes(&mut self, minutes: u32) {
        self.minutes = minutes;
    }

    pub fn set_seconds(&mut self, seconds: u32) {
        self.seconds = seconds.min(MAX_SECONDS);
    }

    pub fn is_zero(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    /// Remove one second, borrowing a minute when seconds run out.
    ///
    /// Stays at 0:00 once there is nothing left to borrow.
    pub fn decrement(&mut self) {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = MAX_SECONDS;
        }
    }

    /// Value of one field
    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::Minutes => self.minutes,
            Field::Seconds => self.seconds,
        }
    }

    /// Set one field, clamped to its range
    pub fn set(&mut self, field: Field, value: u32) {
        match field {
            Field::Minutes => self.set_minutes(value),
            Field::Seconds => self.set_seconds(value),
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// Timer run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "Idle",
            RunState::Running => "Running",
            RunState::Paused => "Paused",
        }
    }

    /// Running or Paused
    pub fn is_active(&self) -> bool {
        !matches!(self, RunState::Idle)
    }
}

/// Editable countdown field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Minutes,
    Seconds,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Minutes => "Minutes",
            Field::Seconds => "Seconds",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Field::Minutes => Field::Seconds,
            Field::Seconds => Field::Minutes,
        }
    }
}

/// Value after typing `digit` at the end of `value`.
///
/// Returns `None` when the result no longer fits; callers clamp the rest.
pub fn push_digit(value: u32, digit: u32) -> Option<u32> {
    value.checked_mul(10)?.checked_add(digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_rules() {
        let mut c = Countdown::new(1, 30);
        c.decrement();
        assert_eq!(c, Countdown::new(1, 29));

        let mut c = Countdown::new(2, 0);
        c.decrement();
        assert_eq!(c, Countdown::new(1, 59));

        let mut c = Countdown::ZERO;
        c.decrement();
        assert_eq!(c, Countdown::ZERO);
    }

    #[test]
    fn test_seconds_clamped() {
        assert_eq!(Countdown::new(0, 75).seconds(), 59);

        let mut c = Countdown::default();
        c.set(Field::Seconds, 1000);
        assert_eq!(c.seconds(), 59);
        c.set(Field::Minutes, 1000);
        assert_eq!(c.minutes(), 1000);
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(Countdown::new(5, 7).to_string(), "05:07");
        assert_eq!(Countdown::new(125, 0).to_string(), "125:00");
        assert_eq!(Countdown::ZERO.to_string(), "00:00");
    }

    #[test]
    fn test_push_digit() {
        assert_eq!(push_digit(0, 7), Some(7));
        assert_eq!(push_digit(12, 3), Some(123));
        assert_eq!(push_digit(u32::MAX, 1), None);
    }
}
