//! The display port, renderer, and I/O board against mock peripherals

mod common;
use common::*;

use alarm_clock::board::IoBoard;
use alarm_clock::config::{BLANK_DWELL_US, DIGIT_DWELL_US};
use alarm_clock::display::{self, ClockFace};
use alarm_clock::render::{PinPort, Renderer, SegmentPort, IDLE_SELECT};
use alarm_clock::{Cell, Error, Meridiem, PanelSample, SegmentCode};

// Pin ids: segments 0..8, select 8..11.
fn port(log: &PinLog) -> PinPort<MockPin> {
    let segments = core::array::from_fn(|i| MockPin::new(i as u8, log));
    let select = core::array::from_fn(|i| MockPin::new(8 + i as u8, log));
    PinPort::new(segments, select)
}

fn segment_byte(levels: &[Option<bool>; 16]) -> u8 {
    (0..8).fold(0, |byte, bit| {
        byte | (u8::from(levels[bit] == Some(true)) << bit)
    })
}

fn select_address(levels: &[Option<bool>; 16]) -> u8 {
    (0..3).fold(0, |addr, bit| {
        addr | (u8::from(levels[8 + bit] == Some(true)) << bit)
    })
}

#[test]
fn strobe_drives_active_low_segments_on_the_selected_cell() {
    let log = PinLog::default();
    let mut port = port(&log);
    let code = SegmentCode::digit(7).with_indicator();
    port.strobe(Cell::HourOnes, code).unwrap();

    let levels = levels(&log.borrow());
    assert_eq!(segment_byte(&levels), code.active_low());
    assert_eq!(select_address(&levels), Cell::HourOnes.select());
}

#[test]
fn strobe_goes_dark_before_moving_the_select_lines() {
    let log = PinLog::default();
    let mut port = port(&log);
    port.strobe(Cell::MinuteOnes, SegmentCode::digit(8)).unwrap();
    log.borrow_mut().clear();

    port.strobe(Cell::MinuteTens, SegmentCode::digit(8)).unwrap();
    let writes = log.borrow();
    let first_select = writes.iter().position(|&(id, _)| id >= 8).unwrap();
    // Every segment line was driven high (off) before the decoder moved.
    let before = levels(&writes[..first_select]);
    assert_eq!(segment_byte(&before), 0xFF);
}

#[test]
fn blank_parks_on_the_idle_address() {
    let log = PinLog::default();
    let mut port = port(&log);
    port.blank().unwrap();
    let levels = levels(&log.borrow());
    assert_eq!(segment_byte(&levels), 0xFF);
    assert_eq!(select_address(&levels), IDLE_SELECT);
}

#[test]
fn refresh_visits_every_cell_in_order_then_blanks() {
    let log = PinLog::default();
    let cells = display::format(&ClockFace {
        hours: 9,
        minutes: 41,
        meridiem: Meridiem::Pm,
        alarm_armed: false,
        colon: true,
    });
    let mut renderer = Renderer::new(port(&log), MockDelay::default());
    renderer.refresh(&cells).unwrap();

    // Replay the log, snapshotting the lit pattern each time a strobe ends.
    let writes = log.borrow();
    let mut shown = Vec::new();
    let mut state = [None; 16];
    for (n, &(id, high)) in writes.iter().enumerate() {
        state[id as usize] = Some(high);
        let strobe_done = (n + 1) % 19 == 0;
        if strobe_done && shown.len() < 5 {
            shown.push((select_address(&state), !segment_byte(&state)));
        }
    }
    let expected: Vec<_> = cells
        .iter()
        .map(|(cell, code)| (cell.select(), code.bits()))
        .collect();
    assert_eq!(shown, expected);
    assert_eq!(select_address(&state), IDLE_SELECT);

    let (_, delay) = renderer.release();
    assert_eq!(delay.waits.len(), 6);
    assert_eq!(delay.total_us(), 5 * DIGIT_DWELL_US + BLANK_DWELL_US);
}

#[test]
fn refresh_reports_a_failing_port() {
    let log = PinLog::default();
    let segments = core::array::from_fn(|i| MockPin::failing(i as u8, &log));
    let select = core::array::from_fn(|i| MockPin::new(8 + i as u8, &log));
    let mut renderer = Renderer::new(PinPort::new(segments, select), MockDelay::default());
    let cells = display::format(&ClockFace {
        hours: 12,
        minutes: 0,
        meridiem: Meridiem::Am,
        alarm_armed: false,
        colon: false,
    });
    assert_eq!(renderer.refresh(&cells), Err(Error::Strobe));
}

#[test]
fn exchange_sends_the_indicator_and_splits_the_reply() {
    let log = PinLog::default();
    let spi = MockSpi {
        replies: vec![vec![0b1101_1111, 0b1010_0110]],
        ..MockSpi::default()
    };
    let mut board = IoBoard::new(spi, MockPin::new(0, &log), MockPin::new(1, &log)).unwrap();
    let sample = board.exchange(0x40).unwrap();

    assert_eq!(
        sample,
        PanelSample {
            buttons: 0b1101_1111,
            encoders: 0b0110,
        }
    );
    let (spi, _, _) = board.release();
    assert_eq!(spi.sent, [vec![0x00, 0x40]]);
}

#[test]
fn exchange_pulses_load_before_and_latch_after() {
    let log = PinLog::default();
    let mut board = IoBoard::new(
        MockSpi::default(),
        MockPin::new(0, &log),
        MockPin::new(1, &log),
    )
    .unwrap();
    log.borrow_mut().clear();
    board.exchange(0x00).unwrap();

    assert_eq!(
        *log.borrow(),
        [(0, false), (0, true), (1, true), (1, false)]
    );
}

#[test]
fn exchange_reports_a_failing_bus() {
    let log = PinLog::default();
    let spi = MockSpi {
        fail: true,
        ..MockSpi::default()
    };
    let mut board = IoBoard::new(spi, MockPin::new(0, &log), MockPin::new(1, &log)).unwrap();
    assert_eq!(board.exchange(0x00), Err(Error::Transfer));
}
