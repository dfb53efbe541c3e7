//! Display Formatter: turns a time into the five cell codes of the
//! multiplexed seven-segment board.

use crate::clock::Meridiem;

/// Number of multiplexed cells: four digits and the colon.
pub const CELL_COUNT: usize = 5;

/// Segment bits, lit when set. Bit 0 is segment `a`, bit 6 is `g`.
pub const DIGITS: [u8; 10] = [
    0b_0011_1111, // 0
    0b_0000_0110, // 1
    0b_0101_1011, // 2
    0b_0100_1111, // 3
    0b_0110_0110, // 4
    0b_0110_1101, // 5
    0b_0111_1101, // 6
    0b_0000_0111, // 7
    0b_0111_1111, // 8
    0b_0110_1111, // 9
];

/// Decorating dot on a digit cell; marks PM and alarm-armed.
pub const INDICATOR: u8 = 0b_1000_0000;

/// The colon cell's two dots sit on segments `a` and `b`.
pub const COLON: u8 = 0b_0000_0011;

/// One cell's segment pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentCode(u8);

impl SegmentCode {
    pub const BLANK: Self = Self(0);

    #[must_use]
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    /// Glyph for the last decimal digit of `value`.
    #[must_use]
    pub const fn digit(value: u8) -> Self {
        Self(DIGITS[(value % 10) as usize])
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn with_indicator(self) -> Self {
        Self(self.0 | INDICATOR)
    }

    #[must_use]
    pub const fn has_indicator(self) -> bool {
        self.0 & INDICATOR != 0
    }

    /// Port levels for the common-anode board, where a low line lights a segment.
    #[must_use]
    pub const fn active_low(self) -> u8 {
        !self.0
    }
}

/// Position on the display, in strobe order. The discriminant is the
/// digit-select address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cell {
    MinuteOnes = 0,
    MinuteTens = 1,
    Colon = 2,
    HourOnes = 3,
    HourTens = 4,
}

impl Cell {
    pub const ALL: [Self; CELL_COUNT] = [
        Self::MinuteOnes,
        Self::MinuteTens,
        Self::Colon,
        Self::HourOnes,
        Self::HourTens,
    ];

    #[must_use]
    pub const fn select(self) -> u8 {
        self as u8
    }
}

/// The five rendered codes, indexed by [`Cell`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayCells([SegmentCode; CELL_COUNT]);

impl DisplayCells {
    #[must_use]
    pub const fn get(&self, cell: Cell) -> SegmentCode {
        self.0[cell as usize]
    }

    /// Cells paired with their codes, in strobe order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, SegmentCode)> + '_ {
        Cell::ALL.into_iter().zip(self.0.iter().copied())
    }
}

/// Everything the formatter needs for one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockFace {
    pub hours: u8,
    pub minutes: u8,
    pub meridiem: Meridiem,
    pub alarm_armed: bool,
    pub colon: bool,
}

/// Formats a face into cell codes. PM lights the minute-ones dot and an armed
/// alarm lights the hour-tens dot.
#[must_use]
pub fn format(face: &ClockFace) -> DisplayCells {
    let mut minute_ones = SegmentCode::digit(face.minutes % 10);
    let minute_tens = SegmentCode::digit(face.minutes / 10);
    let hour_ones = SegmentCode::digit(face.hours % 10);
    let mut hour_tens = SegmentCode::digit(face.hours / 10);

    if face.meridiem.is_pm() {
        minute_ones = minute_ones.with_indicator();
    }
    if face.alarm_armed {
        hour_tens = hour_tens.with_indicator();
    }
    let colon = if face.colon {
        SegmentCode::new(COLON)
    } else {
        SegmentCode::BLANK
    };

    DisplayCells([minute_ones, minute_tens, colon, hour_ones, hour_tens])
}

/// One-shot colon blink handshake.
///
/// The Time Base raises the flag once per second; the formatter consumes it
/// and flips the colon, so the colon changes once per elapsed second however
/// often the display is redrawn in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColonBlink {
    pending: bool,
    lit: bool,
}

impl ColonBlink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: false,
            lit: false,
        }
    }

    /// Producer side; called by the Time Base.
    pub fn signal(&mut self) {
        self.pending = true;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consumer side; applies a pending flip, clears the flag, and returns
    /// whether the colon is lit.
    pub fn consume(&mut self) -> bool {
        if self.pending {
            self.pending = false;
            self.lit = !self.lit;
        }
        self.lit
    }
}
