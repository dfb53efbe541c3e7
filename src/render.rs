//! Render Loop: strobes the five cells onto the multiplexed display.
//!
//! One [`Renderer::refresh`] lights each cell for [`DIGIT_DWELL_US`] and then
//! blanks the display for [`BLANK_DWELL_US`], so the last cell is not lit
//! longer than the others. It never waits on input and can be preempted
//! anywhere; every cell code is complete before it is written.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::{BLANK_DWELL_US, DIGIT_DWELL_US};
use crate::display::{Cell, DisplayCells, SegmentCode};
use crate::{Error, Result};

/// Digit-select address that lights no cell.
pub const IDLE_SELECT: u8 = 6;

/// A multiplexed seven-segment display.
pub trait SegmentPort {
    type Error;

    /// Lights `code` on `cell` and nothing else.
    fn strobe(&mut self, cell: Cell, code: SegmentCode) -> core::result::Result<(), Self::Error>;

    /// Turns every segment off.
    fn blank(&mut self) -> core::result::Result<(), Self::Error>;
}

/// A display wired to GPIO: eight active-low segment lines (a..g, dot) and a
/// three-line digit-select decoder.
pub struct PinPort<P> {
    segments: [P; 8],
    select: [P; 3],
}

impl<P: OutputPin> PinPort<P> {
    pub fn new(segments: [P; 8], select: [P; 3]) -> Self {
        Self { segments, select }
    }

    fn write_select(&mut self, address: u8) -> core::result::Result<(), P::Error> {
        for (bit, pin) in self.select.iter_mut().enumerate() {
            set_level(pin, address & (1 << bit) != 0)?;
        }
        Ok(())
    }

    fn write_segments(&mut self, levels: u8) -> core::result::Result<(), P::Error> {
        for (bit, pin) in self.segments.iter_mut().enumerate() {
            set_level(pin, levels & (1 << bit) != 0)?;
        }
        Ok(())
    }
}

impl<P: OutputPin> SegmentPort for PinPort<P> {
    type Error = P::Error;

    fn strobe(&mut self, cell: Cell, code: SegmentCode) -> core::result::Result<(), Self::Error> {
        // Dark while the decoder moves so the old pattern never shows on the new cell.
        self.write_segments(SegmentCode::BLANK.active_low())?;
        self.write_select(cell.select())?;
        self.write_segments(code.active_low())
    }

    fn blank(&mut self) -> core::result::Result<(), Self::Error> {
        self.write_segments(SegmentCode::BLANK.active_low())?;
        self.write_select(IDLE_SELECT)
    }
}

fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> core::result::Result<(), P::Error> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

/// Drives one refresh pass at a time.
pub struct Renderer<S, D> {
    port: S,
    delay: D,
}

impl<S, D> Renderer<S, D>
where
    S: SegmentPort,
    D: DelayUs<u32>,
{
    pub fn new(port: S, delay: D) -> Self {
        Self { port, delay }
    }

    /// One full pass over the five cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Strobe`] if the port fails; the display is left as is.
    pub fn refresh(&mut self, cells: &DisplayCells) -> Result<()> {
        for (cell, code) in cells.iter() {
            self.port.strobe(cell, code).map_err(|_| Error::Strobe)?;
            self.delay.delay_us(DIGIT_DWELL_US);
        }
        self.port.blank().map_err(|_| Error::Strobe)?;
        self.delay.delay_us(BLANK_DWELL_US);
        Ok(())
    }

    pub fn release(self) -> (S, D) {
        (self.port, self.delay)
    }
}

/// Maps a light-sensor reading to the dimming PWM duty for a counter of
/// `max_duty`. Darker rooms give a dimmer display; zero still leaves the
/// display faintly on.
#[must_use]
pub fn brightness_duty(light: u8, max_duty: u16) -> u16 {
    const FLOOR: u32 = 8;
    let level = FLOOR + u32::from(light) * (255 - FLOOR) / 255;
    // `level` is at most 255, so the product fits and the result is <= max_duty.
    (u32::from(max_duty) * level / 255) as u16
}
