//! The single owner of the clock's state.
//!
//! Interrupt handlers reach the controller only through the firmware's
//! critical-section lock: [`Controller::tick`] from the 1 Hz Time Base,
//! [`Controller::sample_inputs`] from the 1 kHz sampling cycle, and
//! [`Controller::display_cells`] from the Render Loop. Each call is one
//! complete read-modify-write. Side effects on hardware are returned as
//! [`Effect`]s for the caller to carry out.

use heapless::Vec;

use crate::alarm::AlarmSetting;
use crate::clock::ClockTime;
use crate::debounce::{ButtonPanel, PressedButtons};
use crate::display::{self, ClockFace, ColonBlink, DisplayCells};
use crate::mode::{Action, Field, Mode, Target, ENCODER_FIELDS};
use crate::quadrature::QuadratureDecoder;

/// Upper bound on effects from one call. The worst sampling cycle is buttons
/// 7, 6, 5 and 2 registering together while the alarm rings, which gives 9.
pub const MAX_EFFECTS: usize = 12;

/// Effects of one controller call, in the order they happened.
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// Something outside the controller has to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    ModeChanged { from: Mode, to: Mode },
    /// The Time Base tick source must stop (`false`) or restart (`true`).
    TimeBase(bool),
    /// The alarm tone must sound (`true`) or stop (`false`).
    Tone(bool),
    AlarmTriggered,
    Snoozed(ClockTime),
    Dismissed,
    /// The alarm status line needs a redraw.
    Banner,
}

/// Raw inputs gathered by one sampling cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelSample {
    /// Button levels, bit `n` is button `n`; high means released.
    pub buttons: u8,
    /// Encoder phases: bits 0-1 encoder 1, bits 2-3 encoder 2.
    pub encoders: u8,
}

impl PanelSample {
    /// Nothing pressed, both encoders resting on `11`.
    pub const IDLE: Self = Self {
        buttons: 0xFF,
        encoders: 0b1111,
    };
}

#[derive(Clone, Debug)]
pub struct Controller {
    clock: ClockTime,
    alarm: AlarmSetting,
    mode: Mode,
    time_base_armed: bool,
    tone: bool,
    colon: ColonBlink,
    buttons: ButtonPanel,
    encoders: [QuadratureDecoder; 2],
}

impl Controller {
    /// Power-up state: 12:00:00 AM, alarm 12:00:00 AM disarmed, NORMAL.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_time(ClockTime::MIDNIGHT)
    }

    #[must_use]
    pub const fn with_time(clock: ClockTime) -> Self {
        Self {
            clock,
            alarm: AlarmSetting::new(ClockTime::MIDNIGHT),
            mode: Mode::Normal,
            time_base_armed: true,
            tone: false,
            colon: ColonBlink::new(),
            buttons: ButtonPanel::new(),
            encoders: [QuadratureDecoder::new(); 2],
        }
    }

    #[must_use]
    pub const fn clock(&self) -> ClockTime {
        self.clock
    }

    #[must_use]
    pub const fn alarm(&self) -> AlarmSetting {
        self.alarm
    }

    /// Replaces the alarm setpoint and armed flag, silencing it.
    pub fn set_alarm(&mut self, time: ClockTime, enabled: bool) {
        self.alarm = AlarmSetting::new(time);
        self.alarm.set_enabled(enabled);
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn is_time_base_armed(&self) -> bool {
        self.time_base_armed
    }

    #[must_use]
    pub const fn is_tone_on(&self) -> bool {
        self.tone
    }

    /// Status strip byte for the current mode.
    #[must_use]
    pub const fn indicator(&self) -> u8 {
        self.mode.indicator()
    }

    /// Time Base: one second elapsed.
    ///
    /// Does nothing while the tick source is suspended. Otherwise advances the
    /// clock, raises the colon blink, beeps a ringing alarm, or starts it on an
    /// exact match.
    pub fn tick(&mut self) -> Effects {
        let mut effects = Effects::new();
        if !self.time_base_armed {
            return effects;
        }

        self.clock.tick();
        self.colon.signal();

        if self.alarm.is_ringing() {
            self.set_tone(!self.tone, &mut effects);
        } else if self.alarm.check(&self.clock) {
            push(&mut effects, Effect::AlarmTriggered);
            self.set_tone(true, &mut effects);
        }
        effects
    }

    /// Sampling cycle: debounce the buttons, decode the encoders, and apply
    /// both to the mode machine.
    pub fn sample_inputs(&mut self, sample: PanelSample) -> Effects {
        let mut effects = Effects::new();

        let pressed = self.buttons.sample(sample.buttons);
        let steps = [
            self.encoders[0].step(sample.encoders),
            self.encoders[1].step(sample.encoders >> 2),
        ];

        self.apply_buttons(pressed, &mut effects);

        if let Some(target) = self.mode.edit_target() {
            for (field, step) in ENCODER_FIELDS.into_iter().zip(steps) {
                if step != 0 {
                    self.edit(target, field, step);
                }
            }
        }
        effects
    }

    /// Render Loop: the five cell codes for the current state.
    ///
    /// Consumes the colon blink flag outside the edit modes; the edit modes
    /// hold the colon on.
    pub fn display_cells(&mut self) -> DisplayCells {
        let time = match self.mode.shown() {
            Target::Clock => self.clock,
            Target::Alarm => self.alarm.time(),
        };
        let colon = match self.mode {
            Mode::SetClock | Mode::SetAlarm => true,
            Mode::Normal | Mode::ToggleFormat => self.colon.consume(),
        };
        display::format(&ClockFace {
            hours: time.hours(),
            minutes: time.minutes(),
            meridiem: time.meridiem(),
            alarm_armed: self.alarm.is_enabled(),
            colon,
        })
    }

    fn apply_buttons(&mut self, pressed: PressedButtons, effects: &mut Effects) {
        let mode = self.mode;
        for button in pressed.iter() {
            if let Some(action) = mode.action_for(button) {
                self.apply(action, effects);
            }
        }
    }

    fn apply(&mut self, action: Action, effects: &mut Effects) {
        match action {
            Action::Enter(mode) => self.enter(mode, effects),
            Action::ExitToNormal => self.enter(Mode::Normal, effects),
            Action::ToggleMeridiem(target) => self.time_mut(target).toggle_meridiem(),
            Action::ToggleAlarmArmed => {
                if !self.alarm.toggle_enabled() {
                    self.set_tone(false, effects);
                }
                push(effects, Effect::Banner);
            }
            Action::Snooze => {
                if self.alarm.is_ringing() {
                    let next = self.alarm.snooze(&self.clock);
                    self.set_tone(false, effects);
                    push(effects, Effect::Snoozed(next));
                }
            }
            Action::Dismiss => {
                if self.alarm.is_ringing() {
                    self.alarm.dismiss();
                    self.set_tone(false, effects);
                    push(effects, Effect::Dismissed);
                    push(effects, Effect::Banner);
                }
            }
        }
    }

    fn enter(&mut self, to: Mode, effects: &mut Effects) {
        let from = self.mode;
        if from == to {
            return;
        }
        self.mode = to;
        push(effects, Effect::ModeChanged { from, to });

        let runs = to.time_base_runs();
        if runs != self.time_base_armed {
            self.time_base_armed = runs;
            push(effects, Effect::TimeBase(runs));
        }
        if from == Mode::SetAlarm || to == Mode::SetAlarm {
            push(effects, Effect::Banner);
        }
    }

    fn edit(&mut self, target: Target, field: Field, step: i8) {
        let time = self.time_mut(target);
        match field {
            Field::Minutes => time.step_minutes(step),
            Field::Hours => time.step_hours(step),
        }
    }

    fn time_mut(&mut self, target: Target) -> &mut ClockTime {
        match target {
            Target::Clock => &mut self.clock,
            Target::Alarm => self.alarm.time_mut(),
        }
    }

    fn set_tone(&mut self, on: bool, effects: &mut Effects) {
        if self.tone != on {
            self.tone = on;
            push(effects, Effect::Tone(on));
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

fn push(effects: &mut Effects, effect: Effect) {
    let pushed = effects.push(effect).is_ok();
    debug_assert!(pushed, "effect list overflow");
}
