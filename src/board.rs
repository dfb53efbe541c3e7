//! The shift-register I/O board on the SPI bus.
//!
//! One exchange clocks the status strip byte out to its 74HC595 and, in the
//! same transfer, clocks the button and encoder levels in from the 74HC165
//! chain. The transfer busy-waits on the SPI peripheral; it is short and
//! bounded by the bus clock, so it runs inside the sampling interrupt.

use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;

use crate::controller::PanelSample;
use crate::{Error, Result};

/// Byte-exchange with the I/O board.
///
/// `load` is the 74HC165 SH/LD line (low latches the parallel inputs);
/// `latch` is the 74HC595 storage clock (a rising edge shows the new byte).
pub struct IoBoard<SPI, LD, LAT> {
    spi: SPI,
    load: LD,
    latch: LAT,
}

impl<SPI, LD, LAT> IoBoard<SPI, LD, LAT>
where
    SPI: Transfer<u8>,
    LD: OutputPin,
    LAT: OutputPin,
{
    /// Takes the bus and parks both control lines idle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transfer`] if a control line cannot be driven.
    pub fn new(spi: SPI, mut load: LD, mut latch: LAT) -> Result<Self> {
        load.set_high().map_err(|_| Error::Transfer)?;
        latch.set_low().map_err(|_| Error::Transfer)?;
        Ok(Self { spi, load, latch })
    }

    /// Sends `indicator` to the status strip and returns the sampled inputs.
    ///
    /// The first byte clocked in comes from the button register, the second
    /// from the encoder register. The strip keeps the last byte clocked out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transfer`] if the bus or a control line fails.
    pub fn exchange(&mut self, indicator: u8) -> Result<PanelSample> {
        self.load.set_low().map_err(|_| Error::Transfer)?;
        self.load.set_high().map_err(|_| Error::Transfer)?;

        let mut frame = [0x00, indicator];
        let received = self.spi.transfer(&mut frame).map_err(|_| Error::Transfer)?;
        let sample = PanelSample {
            buttons: received[0],
            encoders: received[1] & 0x0F,
        };

        self.latch.set_high().map_err(|_| Error::Transfer)?;
        self.latch.set_low().map_err(|_| Error::Transfer)?;
        Ok(sample)
    }

    pub fn release(self) -> (SPI, LD, LAT) {
        (self.spi, self.load, self.latch)
    }
}
