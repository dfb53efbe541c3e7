//! Control core of a seven-segment alarm clock.
//!
//! The state engine is interrupt-driven: a 1 Hz tick advances the time, a
//! 1 kHz sampling cycle debounces buttons and decodes two quadrature encoders
//! into mode changes and field edits, and a free-running render loop
//! multiplexes the result onto a five-cell display. [`Controller`] owns all of
//! that state; the firmware shares it between handlers behind a lock.
//!
//! Hardware seams use `embedded-hal` traits so everything here also runs on
//! the host.
#![cfg_attr(not(test), no_std)]

pub mod alarm;
pub mod banner;
pub mod board;
pub mod clock;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod display;
mod error;
pub mod mode;
pub mod quadrature;
pub mod render;

pub use alarm::AlarmSetting;
pub use clock::{ClockTime, Meridiem};
pub use controller::{Controller, Effect, Effects, PanelSample};
pub use display::{Cell, DisplayCells, SegmentCode};
pub use error::{Error, Result};
pub use mode::Mode;
