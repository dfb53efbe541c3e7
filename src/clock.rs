use crate::{Error, Result};

/// AM/PM designator for the twelve-hour face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }

    #[must_use]
    pub const fn is_pm(self) -> bool {
        matches!(self, Self::Pm)
    }
}

/// Twelve-hour wall clock time.
///
/// Hours stay in `1..=12`, minutes and seconds in `0..=59`. The Time Base
/// advances it with [`ClockTime::tick`]; the edit modes change minutes and hours
/// with [`ClockTime::step_minutes`] and [`ClockTime::step_hours`], which wrap
/// without carrying into the neighbouring field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    hours: u8,
    minutes: u8,
    seconds: u8,
    meridiem: Meridiem,
}

impl ClockTime {
    /// 12:00:00 AM, the power-up value of both the clock and the alarm.
    pub const MIDNIGHT: Self = Self {
        hours: 12,
        minutes: 0,
        seconds: 0,
        meridiem: Meridiem::Am,
    };

    /// # Errors
    ///
    /// Returns [`Error::FieldOutOfRange`] if `hours` is not in `1..=12` or
    /// `minutes`/`seconds` exceed 59.
    pub const fn new(hours: u8, minutes: u8, seconds: u8, meridiem: Meridiem) -> Result<Self> {
        if hours == 0 || hours > 12 || minutes > 59 || seconds > 59 {
            return Err(Error::FieldOutOfRange);
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
            meridiem,
        })
    }

    #[must_use]
    pub const fn hours(&self) -> u8 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    #[must_use]
    pub const fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Advances one second, carrying into minutes and hours.
    pub fn tick(&mut self) {
        self.seconds += 1;
        if self.seconds >= 60 {
            self.seconds = 0;
            self.add_minute();
        }
    }

    /// Advances `seconds` seconds with the same carries as [`ClockTime::tick`].
    pub fn advance_seconds(&mut self, seconds: u16) {
        for _ in 0..seconds {
            self.tick();
        }
    }

    /// Increments the minute. Handles rollover to hours.
    pub fn add_minute(&mut self) {
        self.minutes += 1;
        if self.minutes >= 60 {
            self.minutes = 0;
            self.add_hour();
        }
    }

    /// Increments the hour: 12 wraps to 1, and reaching 12 flips AM/PM.
    ///
    /// Flipping on 11 -> 12 rather than 12 -> 1 makes 11:59:59 AM tick to
    /// 12:00:00 PM and keeps 12:00 AM as midnight.
    pub fn add_hour(&mut self) {
        self.hours += 1;
        if self.hours > 12 {
            self.hours = 1;
        } else if self.hours == 12 {
            self.meridiem = self.meridiem.toggled();
        }
    }

    /// Moves the minutes by `delta`, wrapping within `0..=59`.
    pub fn step_minutes(&mut self, delta: i8) {
        self.minutes = wrap(self.minutes, delta, 0, 59);
    }

    /// Moves the hours by `delta`, wrapping within `1..=12`. The meridiem is
    /// left alone; it has its own toggle.
    pub fn step_hours(&mut self, delta: i8) {
        self.hours = wrap(self.hours, delta, 1, 12);
    }

    pub fn toggle_meridiem(&mut self) {
        self.meridiem = self.meridiem.toggled();
    }
}

impl Default for ClockTime {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

fn wrap(value: u8, delta: i8, low: u8, high: u8) -> u8 {
    let span = i16::from(high - low) + 1;
    let offset = (i16::from(value) - i16::from(low) + i16::from(delta)).rem_euclid(span);
    // `offset` is in `0..span`, so it fits back into the field.
    low + offset as u8
}
