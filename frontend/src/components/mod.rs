pub mod availability_grid;
pub mod booking_modal;
pub mod category_modal;
pub mod confirm_modal;
pub mod header;
pub mod protected_route;
pub mod toast;
