//! Conversion of `HH:MM` slot times into 12-hour display strings.

use chrono::NaiveTime;

/// Parse a slot time in `HH:MM` or `HH:MM:SS` form
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Render a 24-hour slot time as 12-hour with an AM/PM suffix.
///
/// Hour 0 renders as 12 AM and hour 12 as 12 PM. Unparseable input is
/// returned unchanged.
pub fn format_12h(raw: &str) -> String {
    match parse_clock(raw) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

pub fn format_range(start: &str, end: &str) -> String {
    format!("{} - {}", format_12h(start), format_12h(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_afternoon_hour() {
        assert_eq!(format_12h("13:00"), "1:00 PM");
    }

    #[test]
    fn test_midnight_is_twelve_am() {
        assert_eq!(format_12h("00:00"), "12:00 AM");
    }

    #[test]
    fn test_noon_is_twelve_pm() {
        assert_eq!(format_12h("12:30"), "12:30 PM");
    }

    #[test]
    fn test_seconds_are_accepted() {
        assert_eq!(format_12h("09:05:00"), "9:05 AM");
    }

    #[test]
    fn test_garbage_passes_through() {
        assert_eq!(format_12h("soon"), "soon");
    }

    #[test]
    fn test_range() {
        assert_eq!(format_range("09:00", "12:00"), "9:00 AM - 12:00 PM");
    }
}
