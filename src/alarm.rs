use crate::clock::ClockTime;
use crate::config::SNOOZE_SECONDS;

/// The single alarm setpoint.
///
/// `ringing` is raised by [`AlarmSetting::check`] when the clock matches the
/// setpoint to the second while armed, and lowered only by snooze, dismiss,
/// or disarming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmSetting {
    time: ClockTime,
    enabled: bool,
    ringing: bool,
}

impl AlarmSetting {
    /// A disarmed alarm at `time`.
    #[must_use]
    pub const fn new(time: ClockTime) -> Self {
        Self {
            time,
            enabled: false,
            ringing: false,
        }
    }

    #[must_use]
    pub const fn time(&self) -> ClockTime {
        self.time
    }

    pub fn time_mut(&mut self) -> &mut ClockTime {
        &mut self.time
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn is_ringing(&self) -> bool {
        self.ringing
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.ringing = false;
        }
    }

    /// Flips the armed flag and returns the new value.
    pub fn toggle_enabled(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Compares `now` with the setpoint. Returns `true` only on the call that
    /// starts the alarm ringing. A tick that never gets here is a missed alarm.
    pub fn check(&mut self, now: &ClockTime) -> bool {
        if !self.enabled || self.ringing || *now != self.time {
            return false;
        }
        self.ringing = true;
        true
    }

    /// Silences the alarm and moves the setpoint to [`SNOOZE_SECONDS`] after
    /// `now`, so it rings once more however long it rang before. Returns the
    /// new setpoint.
    pub fn snooze(&mut self, now: &ClockTime) -> ClockTime {
        self.ringing = false;
        self.time = *now;
        self.time.advance_seconds(SNOOZE_SECONDS);
        self.time
    }

    /// Silences and disarms the alarm. The setpoint is kept.
    pub fn dismiss(&mut self) {
        self.set_enabled(false);
    }
}

impl Default for AlarmSetting {
    fn default() -> Self {
        Self::new(ClockTime::MIDNIGHT)
    }
}
