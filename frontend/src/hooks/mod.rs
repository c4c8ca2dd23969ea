pub mod use_request;
pub mod use_toast;
pub mod use_week_grid;
