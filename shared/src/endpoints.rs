//! Descriptors for every backend endpoint the front end calls.

use crate::envelope::ApiError;
use crate::request::{HttpMethod, RequestDescriptor};
use crate::{
    AvailabilityDeleteRequest, AvailabilityRequest, BookingId, CategoryId, CategoryRequest,
    LoginRequest, RegisterRequest, UserBookingRequest, WeekWindow,
};

pub const CSRF: &str = "/api/csrf/";
pub const CHECK_SESSION: &str = "/api/check-session/";
pub const LOGIN: &str = "/api/login/";
pub const LOGOUT: &str = "/api/logout/";
pub const REGISTER: &str = "/api/register/";
pub const CATEGORIES: &str = "/api/categories/";
pub const TIME_SLOTS: &str = "/api/timeslots/";
pub const AVAILABILITY: &str = "/api/availability/";
pub const USER_BOOKINGS: &str = "/api/user-bookings/";
pub const MY_BOOKINGS: &str = "/api/my-bookings/";

pub fn csrf() -> RequestDescriptor {
    RequestDescriptor::get(CSRF)
}

pub fn check_session() -> RequestDescriptor {
    RequestDescriptor::get(CHECK_SESSION)
}

pub fn login(request: &LoginRequest) -> Result<RequestDescriptor, ApiError> {
    RequestDescriptor::new(HttpMethod::Post, LOGIN).with_json(request)
}

pub fn logout() -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Post, LOGOUT)
}

pub fn register(request: &RegisterRequest) -> Result<RequestDescriptor, ApiError> {
    RequestDescriptor::new(HttpMethod::Post, REGISTER).with_json(request)
}

pub fn list_categories() -> RequestDescriptor {
    RequestDescriptor::get(CATEGORIES)
}

pub fn create_category(request: &CategoryRequest) -> Result<RequestDescriptor, ApiError> {
    RequestDescriptor::new(HttpMethod::Post, CATEGORIES).with_json(request)
}

pub fn update_category(
    id: CategoryId,
    request: &CategoryRequest,
) -> Result<RequestDescriptor, ApiError> {
    RequestDescriptor::new(HttpMethod::Put, format!("{}{}/", CATEGORIES, id)).with_json(request)
}

pub fn list_time_slots() -> RequestDescriptor {
    RequestDescriptor::get(TIME_SLOTS)
}

/// Availability for every day of `window`, one `dates[]` param per day
pub fn availability_for(window: &WeekWindow) -> RequestDescriptor {
    window
        .query_dates()
        .into_iter()
        .fold(RequestDescriptor::get(AVAILABILITY), |descriptor, date| {
            descriptor.param("dates[]", date)
        })
}

pub fn save_availability(request: &AvailabilityRequest) -> Result<RequestDescriptor, ApiError> {
    RequestDescriptor::new(HttpMethod::Post, AVAILABILITY).with_json(request)
}

pub fn delete_availability(
    request: &AvailabilityDeleteRequest,
) -> Result<RequestDescriptor, ApiError> {
    RequestDescriptor::new(HttpMethod::Delete, AVAILABILITY).with_json(request)
}

pub fn book_slot(request: &UserBookingRequest) -> Result<RequestDescriptor, ApiError> {
    RequestDescriptor::new(HttpMethod::Post, USER_BOOKINGS).with_json(request)
}

pub fn my_bookings() -> RequestDescriptor {
    RequestDescriptor::get(MY_BOOKINGS)
}

pub fn cancel_booking(id: BookingId) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Delete, format!("{}{}/", MY_BOOKINGS, id))
}

/// Admin booking history, 1-based pages
pub fn booking_history(page: u32, page_size: u32) -> RequestDescriptor {
    RequestDescriptor::get(USER_BOOKINGS)
        .param("page", page.to_string())
        .param("page_size", page_size.to_string())
}
