pub mod availability;
pub mod booking_history;
pub mod categories;
pub mod login;
pub mod my_bookings;
pub mod not_found;
pub mod register;
