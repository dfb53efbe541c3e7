//! UI modes and what the shared controls mean in each of them.

use crate::config::buttons;

/// The active UI mode. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Normal,
    SetClock,
    SetAlarm,
    /// Reserved: shows and runs the clock exactly like `Normal`.
    ToggleFormat,
}

/// What a debounced button press does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Enter(Mode),
    ExitToNormal,
    ToggleMeridiem(Target),
    ToggleAlarmArmed,
    Snooze,
    Dismiss,
}

/// Which time an edit mode changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    Clock,
    Alarm,
}

/// Which field an encoder edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Minutes,
    Hours,
}

/// Encoder 1 edits minutes, encoder 2 edits hours.
pub const ENCODER_FIELDS: [Field; 2] = [Field::Minutes, Field::Hours];

impl Mode {
    /// Status strip code; a cleared bit marks the mode.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Normal => 0xFF,
            Self::ToggleFormat => 0x7F,
            Self::SetClock => 0xBF,
            Self::SetAlarm => 0xDF,
        }
    }

    /// What the status strip shows: the mode code, inverted.
    #[must_use]
    pub const fn indicator(self) -> u8 {
        !self.code()
    }

    /// Maps a pressed button to its action in this mode.
    ///
    /// Snooze and dismiss are listed unconditionally; the controller ignores
    /// them unless the alarm is ringing.
    #[must_use]
    pub const fn action_for(self, button: u8) -> Option<Action> {
        match (self, button) {
            (Self::Normal, buttons::FORMAT_OR_MERIDIEM) => Some(Action::Enter(Self::ToggleFormat)),
            (Self::Normal, buttons::SET_CLOCK) => Some(Action::Enter(Self::SetClock)),
            (Self::Normal, buttons::SET_ALARM) => Some(Action::Enter(Self::SetAlarm)),
            (Self::Normal, buttons::SNOOZE) => Some(Action::Snooze),
            (Self::Normal, buttons::DISMISS) => Some(Action::Dismiss),

            (Self::SetClock, buttons::FORMAT_OR_MERIDIEM) => {
                Some(Action::ToggleMeridiem(Target::Clock))
            }
            (Self::SetClock, buttons::SET_CLOCK) => Some(Action::ExitToNormal),

            (Self::SetAlarm, buttons::FORMAT_OR_MERIDIEM) => {
                Some(Action::ToggleMeridiem(Target::Alarm))
            }
            (Self::SetAlarm, buttons::ALARM_ARM) => Some(Action::ToggleAlarmArmed),
            (Self::SetAlarm, buttons::SET_ALARM) => Some(Action::ExitToNormal),

            (Self::ToggleFormat, buttons::FORMAT_OR_MERIDIEM) => Some(Action::ExitToNormal),

            _ => None,
        }
    }

    /// The time the encoders edit in this mode, if any.
    #[must_use]
    pub const fn edit_target(self) -> Option<Target> {
        match self {
            Self::SetClock => Some(Target::Clock),
            Self::SetAlarm => Some(Target::Alarm),
            Self::Normal | Self::ToggleFormat => None,
        }
    }

    /// The time the display shows in this mode.
    #[must_use]
    pub const fn shown(self) -> Target {
        match self {
            Self::SetAlarm => Target::Alarm,
            Self::Normal | Self::SetClock | Self::ToggleFormat => Target::Clock,
        }
    }

    /// Whether the Time Base advances the clock in this mode.
    #[must_use]
    pub const fn time_base_runs(self) -> bool {
        !matches!(self, Self::SetClock)
    }
}
