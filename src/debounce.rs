//! Shift-register debounce with built-in edge detection.
//!
//! Every sample shifts the raw pin level (1 = released, the buttons are
//! active-low) into a 16-bit history whose top bits are forced high. The
//! history equals [`PRESS_EDGE`] exactly once per press: after
//! [`SETTLE_SAMPLES`] consecutive low samples that follow a high one. Holding
//! the button shifts the edge out again, so a held button reports one press.

use crate::config::SETTLE_SAMPLES;

/// Bits above the settle window, always set so the pattern needs a leading high.
const PADDING: u16 = u16::MAX << (SETTLE_SAMPLES + 1);

/// A high sample followed by `SETTLE_SAMPLES` lows, under the padding.
const PRESS_EDGE: u16 = u16::MAX << SETTLE_SAMPLES;

/// Number of buttons on the panel.
pub const BUTTON_COUNT: usize = 8;

/// Debounce history for one input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Debouncer {
    history: u16,
}

impl Debouncer {
    #[must_use]
    pub const fn new() -> Self {
        Self { history: 0 }
    }

    /// Shifts in one raw sample (`level_high == true` means released) and
    /// returns `true` on the sample that completes a debounced press.
    pub fn sample(&mut self, level_high: bool) -> bool {
        self.history = (self.history << 1) | u16::from(level_high) | PADDING;
        self.history == PRESS_EDGE
    }
}

/// Buttons that completed a debounced press on one sampling cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressedButtons(u8);

impl PressedButtons {
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, button: u8) -> bool {
        button < 8 && self.0 & (1 << button) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Pressed button indexes, highest first.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..8u8).rev().filter(move |&button| self.contains(button))
    }
}

/// Debounce state for the whole button panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonPanel {
    inputs: [Debouncer; BUTTON_COUNT],
}

impl ButtonPanel {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inputs: [Debouncer::new(); BUTTON_COUNT],
        }
    }

    /// Samples every button from one panel read. Bit `n` of `levels` is the
    /// raw level of button `n`.
    pub fn sample(&mut self, levels: u8) -> PressedButtons {
        let mut pressed = 0u8;
        for (bit, input) in self.inputs.iter_mut().enumerate() {
            if input.sample(levels & (1 << bit) != 0) {
                pressed |= 1 << bit;
            }
        }
        PressedButtons(pressed)
    }
}
