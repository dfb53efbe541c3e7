//! Alarm status line on the character LCD.

use crate::alarm::AlarmSetting;
use crate::clock::Meridiem;
use crate::config::{BANNER_COL, BANNER_ROW, BANNER_WIDTH};
use crate::{Error, Result};

/// A text display that takes a cursor position and a string.
pub trait MessageSink {
    type Error;

    fn set_cursor(&mut self, row: u8, col: u8) -> core::result::Result<(), Self::Error>;

    fn write_str(&mut self, text: &str) -> core::result::Result<(), Self::Error>;
}

/// Renders the status line into `buf`: `ALARM hh:mm AM` padded to the line
/// width while armed, all blanks otherwise.
///
/// # Errors
///
/// Returns [`Error::MessageFormat`] if the text does not fit `buf`.
pub fn status_line<'a>(alarm: &AlarmSetting, buf: &'a mut [u8; BANNER_WIDTH]) -> Result<&'a str> {
    if !alarm.is_enabled() {
        buf.fill(b' ');
        return core::str::from_utf8(&buf[..]).map_err(|_| Error::MessageFormat);
    }
    let time = alarm.time();
    let meridiem = match time.meridiem() {
        Meridiem::Am => "AM",
        Meridiem::Pm => "PM",
    };
    format_no_std::show(
        buf,
        format_args!(
            "ALARM {:02}:{:02} {:<w$}",
            time.hours(),
            time.minutes(),
            meridiem,
            w = BANNER_WIDTH - 12
        ),
    )
    .map_err(|_| Error::MessageFormat)
}

/// Redraws the status line.
///
/// # Errors
///
/// Returns [`Error::Message`] if the sink rejects a command, or
/// [`Error::MessageFormat`] if the line cannot be rendered.
pub fn show<M: MessageSink>(sink: &mut M, alarm: &AlarmSetting) -> Result<()> {
    let mut buf = [0u8; BANNER_WIDTH];
    let line = status_line(alarm, &mut buf)?;
    sink.set_cursor(BANNER_ROW, BANNER_COL)
        .map_err(|_| Error::Message)?;
    sink.write_str(line).map_err(|_| Error::Message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockTime;

    #[derive(Default)]
    struct Recorder {
        cursor: Option<(u8, u8)>,
        text: std::string::String,
    }

    impl MessageSink for Recorder {
        type Error = ();

        fn set_cursor(&mut self, row: u8, col: u8) -> core::result::Result<(), ()> {
            self.cursor = Some((row, col));
            Ok(())
        }

        fn write_str(&mut self, text: &str) -> core::result::Result<(), ()> {
            self.text.push_str(text);
            Ok(())
        }
    }

    struct Broken;

    impl MessageSink for Broken {
        type Error = ();

        fn set_cursor(&mut self, _: u8, _: u8) -> core::result::Result<(), ()> {
            Err(())
        }

        fn write_str(&mut self, _: &str) -> core::result::Result<(), ()> {
            Err(())
        }
    }

    fn armed_at(hours: u8, minutes: u8, meridiem: Meridiem) -> AlarmSetting {
        let mut alarm = AlarmSetting::new(ClockTime::new(hours, minutes, 0, meridiem).unwrap());
        alarm.set_enabled(true);
        alarm
    }

    #[test]
    fn armed_line_shows_the_setpoint() {
        let mut buf = [0u8; BANNER_WIDTH];
        let line = status_line(&armed_at(7, 5, Meridiem::Pm), &mut buf).unwrap();
        assert_eq!(line, "ALARM 07:05 PM  ");
        assert_eq!(line.len(), BANNER_WIDTH);
    }

    #[test]
    fn disarmed_line_is_blank() {
        let mut buf = [0u8; BANNER_WIDTH];
        let line = status_line(&AlarmSetting::default(), &mut buf).unwrap();
        assert_eq!(line, " ".repeat(BANNER_WIDTH));
    }

    #[test]
    fn show_positions_then_writes() {
        let mut sink = Recorder::default();
        show(&mut sink, &armed_at(12, 0, Meridiem::Am)).unwrap();
        assert_eq!(sink.cursor, Some((BANNER_ROW, BANNER_COL)));
        assert_eq!(sink.text, "ALARM 12:00 AM  ");
    }

    #[test]
    fn sink_failure_is_reported() {
        assert_eq!(
            show(&mut Broken, &armed_at(12, 0, Meridiem::Am)),
            Err(Error::Message)
        );
    }
}
