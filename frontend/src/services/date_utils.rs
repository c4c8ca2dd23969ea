use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use js_sys::Date;

/// Local wall-clock time from the browser
pub fn now() -> NaiveDateTime {
    let now = Date::new_0();
    let date = NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1, // JavaScript months are 0-indexed
        now.get_date(),
    );
    let time = NaiveTime::from_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds());
    match (date, time) {
        (Some(date), Some(time)) => date.and_time(time),
        _ => NaiveDateTime::default(),
    }
}

pub fn today() -> NaiveDate {
    now().date()
}

/// Column heading such as `Mon, Oct 19`
pub fn format_day_heading(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Long form such as `Monday, October 19, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_day_heading(date), "Mon, Oct 19");
        assert_eq!(format_long_date(date), "Monday, October 19, 2026");
    }
}
