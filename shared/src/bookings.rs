//! Rows for the my-bookings and booking-history tables.

use crate::envelope::{decode_bare, decode_envelope, ApiError};
use crate::{BookingId, BookingListing, BookingPage, BookingRecord, BookingStatus};
use chrono::NaiveDate;
use serde_json::Value;

/// Decode a booking listing that may or may not be enveloped.
///
/// `{"result": ..., "data": ...}` goes through the envelope rules; a bare
/// array or `{"bookings": [...]}` object is read directly.
pub fn decode_listing(status: u16, body: &str) -> Result<BookingPage, ApiError> {
    let enveloped = serde_json::from_str::<Value>(body)
        .map(|value| {
            ["result", "status", "data"]
                .iter()
                .any(|field| value.get(field).is_some())
        })
        .unwrap_or(false);

    if enveloped {
        decode_envelope::<BookingListing>(status, body)
            .map(|success| success.into_data().map(BookingListing::into_page).unwrap_or_default())
    } else {
        decode_bare::<BookingListing>(status, body).map(BookingListing::into_page)
    }
}

/// Stored `ACTIVE` on a date strictly before today reads as `COMPLETED`
pub fn display_status(status: BookingStatus, date: Option<NaiveDate>, today: NaiveDate) -> BookingStatus {
    match (status, date) {
        (BookingStatus::Active, Some(date)) if date < today => BookingStatus::Completed,
        (status, _) => status,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRow {
    pub id: BookingId,
    pub user: String,
    pub category: String,
    pub date: String,
    pub time_range: String,
    pub status: BookingStatus,
    pub cancelled_at: Option<String>,
    pub can_cancel: bool,
}

impl BookingRow {
    pub fn from_record(record: &BookingRecord, today: NaiveDate) -> Self {
        let date = record.date();
        let status = display_status(record.status, date, today);
        Self {
            id: record.id,
            user: record
                .user
                .as_ref()
                .map(|user| user.display_name().to_string())
                .unwrap_or_else(|| "-".to_string()),
            category: record
                .category()
                .map(|category| category.name.clone())
                .unwrap_or_else(|| "Uncategorized".to_string()),
            date: date
                .map(|date| date.format("%b %-d, %Y").to_string())
                .unwrap_or_else(|| "-".to_string()),
            time_range: record
                .time_slot()
                .map(|slot| slot.display_range())
                .unwrap_or_else(|| "-".to_string()),
            status,
            cancelled_at: record.cancelled_at.as_deref().map(short_timestamp),
            can_cancel: status == BookingStatus::Active && date.is_some_and(|date| date >= today),
        }
    }
}

/// `2026-10-01T10:15:00Z` -> `2026-10-01 10:15`
fn short_timestamp(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// 1-based page cursor for the booking history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn first(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..*self
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1).max(1),
            ..*self
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Without a total, a short page means there is nothing after it
    pub fn has_next(&self, total: Option<u64>, returned: usize) -> bool {
        match total {
            Some(total) => u64::from(self.page) * u64::from(self.page_size) < total,
            None => returned >= self.page_size as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BookedBy, Category, TimeSlot};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn record(status: BookingStatus, on: NaiveDate) -> BookingRecord {
        BookingRecord {
            id: 7,
            user: Some(BookedBy {
                name: "Sam Ortiz".to_string(),
                username: None,
            }),
            event: None,
            date: Some(on),
            time_slot: Some(TimeSlot {
                id: 1,
                start_time: "13:00:00".to_string(),
                end_time: "15:30:00".to_string(),
            }),
            category: Some(Category {
                id: 2,
                name: "Pottery".to_string(),
            }),
            status,
            booked_at: None,
            cancelled_at: None,
        }
    }

    #[test]
    fn test_active_in_the_past_displays_completed() {
        let today = date(10, 19);
        assert_eq!(
            display_status(BookingStatus::Active, Some(date(10, 18)), today),
            BookingStatus::Completed
        );
        assert_eq!(
            display_status(BookingStatus::Active, Some(today), today),
            BookingStatus::Active
        );
        assert_eq!(
            display_status(BookingStatus::Cancelled, Some(date(10, 1)), today),
            BookingStatus::Cancelled
        );
    }

    #[test]
    fn test_row_fields() {
        let row = BookingRow::from_record(&record(BookingStatus::Active, date(10, 22)), date(10, 19));
        assert_eq!(row.user, "Sam Ortiz");
        assert_eq!(row.category, "Pottery");
        assert_eq!(row.date, "Oct 22, 2026");
        assert_eq!(row.time_range, "1:00 PM - 3:30 PM");
        assert!(row.can_cancel);

        let past = BookingRow::from_record(&record(BookingStatus::Active, date(10, 2)), date(10, 19));
        assert_eq!(past.status, BookingStatus::Completed);
        assert!(!past.can_cancel);
    }

    #[test]
    fn test_cancelled_at_is_shortened() {
        let mut cancelled = record(BookingStatus::Cancelled, date(10, 22));
        cancelled.cancelled_at = Some("2026-10-10T09:05:00Z".to_string());
        let row = BookingRow::from_record(&cancelled, date(10, 19));
        assert_eq!(row.cancelled_at.as_deref(), Some("2026-10-10 09:05"));
        assert!(!row.can_cancel);
    }

    #[test]
    fn test_listing_shapes() {
        let bare = decode_listing(200, r#"{"bookings": [{"id": 1, "status": "ACTIVE"}]}"#).unwrap();
        assert_eq!(bare.bookings.len(), 1);
        assert_eq!(bare.total, None);

        let enveloped = decode_listing(
            200,
            r#"{"result": "Success", "data": {"results": [], "count": 31}}"#,
        )
        .unwrap();
        assert_eq!(enveloped.total, Some(31));

        let failed = decode_listing(200, r#"{"result": "Failed", "message": "Nope"}"#);
        assert_eq!(failed, Err(ApiError::Logical(Some("Nope".to_string()))));

        assert!(decode_listing(401, "").unwrap_err().is_unauthorized());
    }

    #[test]
    fn test_paging() {
        let first = PageRequest::first(10);
        assert!(!first.has_previous());
        assert_eq!(first.previous().page, 1);
        assert!(first.has_next(Some(25), 10));
        assert!(!first.next().next().has_next(Some(25), 5));
        assert!(!first.next().has_next(Some(20), 10));

        assert!(first.has_next(None, 10));
        assert!(!first.has_next(None, 4));
    }
}
