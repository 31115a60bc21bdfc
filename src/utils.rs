//! Wall-clock formatting helpers shared by the dock bar and the clock tool.

use jiff::Zoned;

use crate::types::ClockFormat;

/// The `"HH:MM"` key for the current minute, compared verbatim against
/// stored timer times.
pub fn minute_key(now: &Zoned) -> String {
    format!("{:02}:{:02}", now.hour(), now.minute())
}

/// Format a time-of-day for display in the dock bar.
///
/// 12-hour mode drops the leading zero and appends `AM`/`PM`; 24-hour mode
/// is plain zero-padded `HH:MM`.
pub fn format_clock(hour: i8, minute: i8, format: ClockFormat) -> String {
    match format {
        ClockFormat::TwentyFourHour => format!("{hour:02}:{minute:02}"),
        ClockFormat::TwelveHour => {
            let display_hour = ((hour + 11) % 12) + 1;
            let ampm = if hour >= 12 { "PM" } else { "AM" };
            format!("{display_hour}:{minute:02} {ampm}")
        }
    }
}

/// Short date line under the clock, e.g. `Wed, Aug 27`.
pub fn format_date(now: &Zoned) -> String {
    now.strftime("%a, %b %d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_four_hour_is_zero_padded() {
        assert_eq!(format_clock(9, 5, ClockFormat::TwentyFourHour), "09:05");
        assert_eq!(format_clock(23, 59, ClockFormat::TwentyFourHour), "23:59");
    }

    #[test]
    fn twelve_hour_wraps_midnight_and_noon() {
        assert_eq!(format_clock(0, 0, ClockFormat::TwelveHour), "12:00 AM");
        assert_eq!(format_clock(12, 0, ClockFormat::TwelveHour), "12:00 PM");
        assert_eq!(format_clock(15, 7, ClockFormat::TwelveHour), "3:07 PM");
        assert_eq!(format_clock(1, 30, ClockFormat::TwelveHour), "1:30 AM");
    }

    #[test]
    fn minute_key_matches_timer_format() {
        let zoned: Zoned = "2026-08-27T09:00:42[UTC]".parse().unwrap();
        assert_eq!(minute_key(&zoned), "09:00");
    }
}
