//! Seven-day windows the availability grid navigates through.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// First day of a displayed week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// Days between the week start and `date`
    fn offset_of(self, date: NaiveDate) -> i64 {
        let weekday = date.weekday();
        let offset = match self {
            WeekStart::Monday => weekday.num_days_from_monday(),
            WeekStart::Sunday => weekday.num_days_from_sunday(),
        };
        i64::from(offset)
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            other => Err(format!("unknown week start: {}", other)),
        }
    }
}

/// Seven consecutive dates starting on the configured week start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    start: NaiveDate,
    days: [NaiveDate; 7],
}

impl WeekWindow {
    /// The window containing `pivot`
    pub fn containing(pivot: NaiveDate, week_start: WeekStart) -> Self {
        let start = pivot - Duration::days(week_start.offset_of(pivot));
        Self::starting_at(start)
    }

    fn starting_at(start: NaiveDate) -> Self {
        let mut days = [start; 7];
        for (offset, day) in days.iter_mut().enumerate() {
            *day = start + Duration::days(offset as i64);
        }
        Self { start, days }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.days[6]
    }

    pub fn days(&self) -> &[NaiveDate; 7] {
        &self.days
    }

    /// Move by whole weeks; negative values go back in time
    pub fn shift(&self, weeks: i64) -> Self {
        Self::starting_at(self.start + Duration::days(7 * weeks))
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn previous(&self) -> Self {
        self.shift(-1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Header label, e.g. `Oct 19 - Oct 25, 2026`
    pub fn label(&self) -> String {
        let end = self.end();
        if self.start.year() == end.year() {
            format!(
                "{} - {}",
                self.start.format("%b %-d"),
                end.format("%b %-d, %Y")
            )
        } else {
            format!(
                "{} - {}",
                self.start.format("%b %-d, %Y"),
                end.format("%b %-d, %Y")
            )
        }
    }

    /// ISO dates sent as the `dates[]` query parameters
    pub fn query_dates(&self) -> Vec<String> {
        self.days
            .iter()
            .map(|day| day.format("%Y-%m-%d").to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_alignment() {
        // 2026-10-22 is a Thursday
        let window = WeekWindow::containing(date(2026, 10, 22), WeekStart::Monday);
        assert_eq!(window.start(), date(2026, 10, 19));
        assert_eq!(window.start().weekday(), Weekday::Mon);
        assert_eq!(window.end(), date(2026, 10, 25));
    }

    #[test]
    fn test_sunday_alignment() {
        let window = WeekWindow::containing(date(2026, 10, 22), WeekStart::Sunday);
        assert_eq!(window.start(), date(2026, 10, 18));
        assert_eq!(window.end().weekday(), Weekday::Sat);
    }

    #[test]
    fn test_pivot_on_week_start_is_its_own_start() {
        let window = WeekWindow::containing(date(2026, 10, 19), WeekStart::Monday);
        assert_eq!(window.start(), date(2026, 10, 19));
    }

    #[test]
    fn test_days_are_consecutive() {
        let window = WeekWindow::containing(date(2026, 12, 30), WeekStart::Monday);
        for pair in window.days().windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        assert!(window.contains(date(2027, 1, 3)));
        assert!(!window.contains(date(2027, 1, 4)));
    }

    #[test]
    fn test_forward_then_back_is_identity() {
        let mut pivot = date(2024, 1, 1);
        for _ in 0..400 {
            let window = WeekWindow::containing(pivot, WeekStart::Monday);
            assert_eq!(window.next().previous(), window);
            assert_eq!(window.previous().next(), window);
            assert_eq!(window.shift(5).shift(-5), window);
            pivot = pivot + Duration::days(3);
        }
    }

    #[test]
    fn test_label_across_years() {
        let window = WeekWindow::containing(date(2026, 12, 30), WeekStart::Monday);
        assert_eq!(window.label(), "Dec 28, 2026 - Jan 3, 2027");

        let window = WeekWindow::containing(date(2026, 10, 22), WeekStart::Monday);
        assert_eq!(window.label(), "Oct 19 - Oct 25, 2026");
    }

    #[test]
    fn test_query_dates() {
        let window = WeekWindow::containing(date(2026, 10, 22), WeekStart::Monday);
        let dates = window.query_dates();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], "2026-10-19");
        assert_eq!(dates[6], "2026-10-25");
    }

    #[test]
    fn test_parse_week_start() {
        assert_eq!("Sunday".parse::<WeekStart>(), Ok(WeekStart::Sunday));
        assert_eq!("mon".parse::<WeekStart>(), Ok(WeekStart::Monday));
        assert!("friday".parse::<WeekStart>().is_err());
    }
}
