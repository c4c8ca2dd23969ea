use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod bookings;
pub mod endpoints;
pub mod envelope;
pub mod grid;
pub mod machine;
pub mod policy;
pub mod request;
pub mod session;
pub mod time_format;
pub mod validation;
pub mod week;

pub use bookings::{BookingRow, PageRequest};
pub use envelope::{ApiError, ApiSuccess, GENERIC_FAILURE};
pub use grid::{CellKey, CellState, CellTone, CellView, GridProjection, WeekGrid};
pub use machine::{GridEvent, GridMachine, GridMutation, GridPhase, ModalKind, Selection};
pub use policy::{Capability, CellCapabilities, Role};
pub use request::{HttpMethod, RequestDescriptor, RequestSlot, RequestToken, RequestTracker};
pub use session::{AuthState, GuardDecision, SessionAction};
pub use validation::ValidationError;
pub use week::{WeekStart, WeekWindow};

pub type CategoryId = i64;
pub type TimeSlotId = i64;
pub type BookingId = i64;

/// A fixed daily time range shared by every date in the grid.
///
/// Times travel as `HH:MM` or `HH:MM:SS` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub start_time: String,
    pub end_time: String,
}

impl TimeSlot {
    /// Display form such as `9:00 AM - 12:00 PM`
    pub fn display_range(&self) -> String {
        time_format::format_range(&self.start_time, &self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Booking status of an availability record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    #[default]
    #[serde(alias = "Available")]
    Available,
    #[serde(alias = "Booked")]
    Booked,
}

/// The user attached to a booked cell or a booking record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookedBy {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl BookedBy {
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            &self.name
        } else {
            self.username.as_deref().unwrap_or("Unknown")
        }
    }
}

/// Server-side record for one (date, time slot) pair.
///
/// A missing record means the cell is unconfigured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityCell {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: AvailabilityStatus,
    #[serde(default)]
    pub user: Option<BookedBy>,
    #[serde(default)]
    pub is_self_booked: bool,
}

impl AvailabilityCell {
    pub fn key(&self) -> CellKey {
        CellKey {
            date: self.date,
            time_slot_id: self.time_slot.id,
        }
    }

    pub fn is_booked(&self) -> bool {
        self.status == AvailabilityStatus::Booked
    }
}

/// Body of `GET /api/check-session/`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckSessionResponse {
    pub authenticated: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl CheckSessionResponse {
    pub fn user(&self) -> Option<SessionUser> {
        self.authenticated.then(|| SessionUser {
            username: self.username.clone(),
            name: self.name.clone(),
            is_admin: self.is_admin,
        })
    }
}

/// Identity of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

/// Create-or-update of a cell's category assignment.
///
/// The server upserts on (date, time_slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub date: NaiveDate,
    pub time_slot: TimeSlotId,
    pub category: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDeleteRequest {
    pub date: NaiveDate,
    pub time_slot: TimeSlotId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBookingRequest {
    pub date: NaiveDate,
    pub time_slot: TimeSlotId,
    #[serde(rename = "categoryId")]
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Active,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Active => "ACTIVE",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Availability record nested inside a booking
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingEvent {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// One row of my-bookings or the admin booking history.
///
/// Depending on the endpoint the slot details are either flattened onto
/// the record or nested under `event`; the accessors check both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: BookingId,
    #[serde(default)]
    pub user: Option<BookedBy>,
    #[serde(default)]
    pub event: Option<BookingEvent>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
    #[serde(default)]
    pub category: Option<Category>,
    pub status: BookingStatus,
    #[serde(default)]
    pub booked_at: Option<String>,
    #[serde(default)]
    pub cancelled_at: Option<String>,
}

impl BookingRecord {
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
            .or_else(|| self.event.as_ref().and_then(|event| event.date))
    }

    pub fn time_slot(&self) -> Option<&TimeSlot> {
        self.time_slot
            .as_ref()
            .or_else(|| self.event.as_ref().and_then(|event| event.time_slot.as_ref()))
    }

    pub fn category(&self) -> Option<&Category> {
        self.category
            .as_ref()
            .or_else(|| self.event.as_ref().and_then(|event| event.category.as_ref()))
    }
}

/// Admin booking history page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingPage {
    #[serde(default, alias = "results")]
    pub bookings: Vec<BookingRecord>,
    #[serde(default, alias = "count")]
    pub total: Option<u64>,
}

/// Booking listings arrive either as a bare array or as a page object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookingListing {
    List(Vec<BookingRecord>),
    Page(BookingPage),
}

impl BookingListing {
    pub fn into_page(self) -> BookingPage {
        match self {
            BookingListing::List(bookings) => BookingPage {
                bookings,
                total: None,
            },
            BookingListing::Page(page) => page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_cell_defaults() {
        let json = r#"{
            "date": "2026-10-20",
            "time_slot": {"id": 1, "start_time": "09:00:00", "end_time": "12:00:00"}
        }"#;
        let cell: AvailabilityCell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.status, AvailabilityStatus::Available);
        assert!(cell.category.is_none());
        assert!(!cell.is_self_booked);
        assert_eq!(
            cell.key(),
            CellKey {
                date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
                time_slot_id: 1
            }
        );
    }

    #[test]
    fn test_availability_status_accepts_both_casings() {
        let booked: AvailabilityStatus = serde_json::from_str("\"BOOKED\"").unwrap();
        let legacy: AvailabilityStatus = serde_json::from_str("\"Booked\"").unwrap();
        assert_eq!(booked, AvailabilityStatus::Booked);
        assert_eq!(legacy, AvailabilityStatus::Booked);
    }

    #[test]
    fn test_user_booking_request_uses_camel_case_category() {
        let request = UserBookingRequest {
            date: NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(),
            time_slot: 2,
            category_id: 7,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["categoryId"], 7);
        assert_eq!(value["date"], "2026-10-21");
    }

    #[test]
    fn test_booking_record_reads_nested_event() {
        let json = r#"{
            "id": 4,
            "event": {
                "date": "2026-10-01",
                "time_slot": {"id": 1, "start_time": "09:00", "end_time": "12:00"},
                "category": {"id": 3, "name": "Yoga"}
            },
            "status": "ACTIVE",
            "booked_at": "2026-09-30T10:00:00Z",
            "cancelled_at": null
        }"#;
        let record: BookingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2026, 10, 1));
        assert_eq!(record.category().map(|c| c.name.as_str()), Some("Yoga"));
        assert_eq!(record.time_slot().map(|s| s.id), Some(1));
    }

    #[test]
    fn test_booking_listing_accepts_list_and_page() {
        let list: BookingListing = serde_json::from_str("[]").unwrap();
        assert_eq!(list.into_page().total, None);

        let page: BookingListing =
            serde_json::from_str(r#"{"bookings": [], "total": 42}"#).unwrap();
        assert_eq!(page.into_page().total, Some(42));
    }

    #[test]
    fn test_check_session_user_only_when_authenticated() {
        let anonymous = CheckSessionResponse::default();
        assert!(anonymous.user().is_none());

        let signed_in = CheckSessionResponse {
            authenticated: true,
            username: "ana@example.com".to_string(),
            name: "Ana Lopez".to_string(),
            is_admin: true,
        };
        let user = signed_in.user().unwrap();
        assert!(user.is_admin);
        assert_eq!(user.name, "Ana Lopez");
    }
}
