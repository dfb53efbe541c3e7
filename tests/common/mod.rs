//! Shared test infrastructure for the alarm clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;

use alarm_clock::config::SETTLE_SAMPLES;
use alarm_clock::{ClockTime, Controller, Effect, Meridiem, PanelSample};
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;

pub fn at(hours: u8, minutes: u8, seconds: u8, meridiem: Meridiem) -> ClockTime {
    ClockTime::new(hours, minutes, seconds, meridiem).unwrap()
}

// ============================================================================
// Panel driving
// ============================================================================

/// Idles long enough to clear every button history, then holds `button`
/// until it registers.
pub fn press(controller: &mut Controller, button: u8) -> Vec<Effect> {
    let mut effects = Vec::new();
    for _ in 0..20 {
        effects.extend(controller.sample_inputs(PanelSample::IDLE));
    }
    let held = PanelSample {
        buttons: !(1 << button),
        ..PanelSample::IDLE
    };
    for _ in 0..SETTLE_SAMPLES {
        effects.extend(controller.sample_inputs(held));
    }
    effects
}

/// Turns encoder 0 (minutes) or 1 (hours) by `detents`; negative turns
/// backwards.
pub fn turn(controller: &mut Controller, encoder: usize, detents: i32) {
    let forward: [u8; 4] = [0b01, 0b11, 0b10, 0b00];
    let backward: [u8; 4] = [0b10, 0b11, 0b01, 0b00];
    let sequence = if detents >= 0 { forward } else { backward };
    let shift = 2 * encoder;
    controller.sample_inputs(PanelSample {
        buttons: 0xFF,
        encoders: 0,
    });
    let mut remaining = detents.unsigned_abs();
    for phase in sequence.iter().cycle() {
        if remaining == 0 {
            break;
        }
        controller.sample_inputs(PanelSample {
            buttons: 0xFF,
            encoders: *phase << shift,
        });
        if *phase == 0b11 || *phase == 0b00 {
            remaining -= 1;
        }
    }
}

// ============================================================================
// Mock pins
// ============================================================================

/// Every pin write, in order: (pin id, level high).
pub type PinLog = Rc<RefCell<Vec<(u8, bool)>>>;

/// Output pin that records its writes into a shared log.
pub struct MockPin {
    id: u8,
    log: PinLog,
    fail: bool,
}

impl MockPin {
    pub fn new(id: u8, log: &PinLog) -> Self {
        Self {
            id,
            log: Rc::clone(log),
            fail: false,
        }
    }

    pub fn failing(id: u8, log: &PinLog) -> Self {
        Self {
            fail: true,
            ..Self::new(id, log)
        }
    }

    fn write(&mut self, high: bool) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.log.borrow_mut().push((self.id, high));
        Ok(())
    }
}

impl OutputPin for MockPin {
    type Error = ();

    fn set_low(&mut self) -> Result<(), ()> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), ()> {
        self.write(true)
    }
}

/// Last level written to each pin id after replaying `log`.
pub fn levels(log: &[(u8, bool)]) -> [Option<bool>; 16] {
    let mut out = [None; 16];
    for &(id, high) in log {
        out[id as usize] = Some(high);
    }
    out
}

// ============================================================================
// Mock SPI and delay
// ============================================================================

/// Full-duplex bus that answers each transfer with queued replies and keeps
/// what it was sent.
#[derive(Default)]
pub struct MockSpi {
    pub replies: Vec<Vec<u8>>,
    pub sent: Vec<Vec<u8>>,
    pub fail: bool,
}

impl Transfer<u8> for MockSpi {
    type Error = ();

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], ()> {
        if self.fail {
            return Err(());
        }
        self.sent.push(words.to_vec());
        if !self.replies.is_empty() {
            let reply = self.replies.remove(0);
            words.copy_from_slice(&reply);
        }
        Ok(words)
    }
}

/// Delay that just sums the requested time.
#[derive(Default)]
pub struct MockDelay {
    pub waits: Vec<u32>,
}

impl MockDelay {
    pub fn total_us(&self) -> u32 {
        self.waits.iter().sum()
    }
}

impl DelayUs<u32> for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.waits.push(us);
    }
}
