//! Compile-time settings: timing, the physical button map, and output levels.

/// Time Base period.
pub const TICK_PERIOD_US: u32 = 1_000_000;

/// Input-sampling period (debounce, encoders, indicator, brightness).
pub const SAMPLE_PERIOD_US: u32 = 1_000;

/// How long each display cell stays lit per refresh pass.
pub const DIGIT_DWELL_US: u32 = 500;

/// Dark time after the last cell so every cell gets the same on-time.
pub const BLANK_DWELL_US: u32 = 100;

/// How far a snooze pushes the alarm setpoint.
pub const SNOOZE_SECONDS: u16 = 10;

/// Consecutive low samples a button needs before it counts as pressed.
/// At [`SAMPLE_PERIOD_US`] this is a 12 ms debounce.
pub const SETTLE_SAMPLES: u32 = 12;

/// Buzzer tone while the alarm rings.
pub const TONE_HZ: u32 = 500;

/// Where the alarm status line goes on the character LCD.
pub const BANNER_ROW: u8 = 0;
pub const BANNER_COL: u8 = 0;

/// Width of one character LCD line.
pub const BANNER_WIDTH: usize = 16;

/// Bit positions of the buttons on the panel.
///
/// Several buttons mean different things per mode; see [`crate::mode::Mode::action_for`].
pub mod buttons {
    /// NORMAL: enter TOGGLE_FORMAT (and leave it). Edit modes: toggle AM/PM.
    pub const FORMAT_OR_MERIDIEM: u8 = 7;
    /// NORMAL: enter SET_CLOCK. SET_CLOCK: leave it.
    pub const SET_CLOCK: u8 = 6;
    /// NORMAL: enter SET_ALARM. SET_ALARM: leave it.
    pub const SET_ALARM: u8 = 5;
    /// NORMAL, while ringing: snooze.
    pub const SNOOZE: u8 = 3;
    /// NORMAL, while ringing: dismiss.
    pub const DISMISS: u8 = 2;
    /// SET_ALARM: arm or disarm.
    pub const ALARM_ARM: u8 = 0;
}
