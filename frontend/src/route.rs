use yew_router::prelude::*;

#[derive(Routable, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/")]
    Availability,
    #[at("/my-bookings")]
    MyBookings,
    #[at("/bookings")]
    BookingHistory,
    #[at("/categories")]
    Categories,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Rendered without a session check
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::NotFound)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::BookingHistory | Route::Categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in [
            Route::Login,
            Route::Register,
            Route::Availability,
            Route::MyBookings,
            Route::BookingHistory,
            Route::Categories,
        ] {
            assert_eq!(Route::recognize(&route.to_path()), Some(route));
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(Route::recognize("/nope"), Some(Route::NotFound));
        assert_eq!(Route::Availability.to_path(), "/");
    }

    #[test]
    fn test_guard_requirements() {
        assert!(Route::Categories.requires_admin());
        assert!(Route::BookingHistory.requires_admin());
        assert!(!Route::MyBookings.requires_admin());
        assert!(Route::Login.is_public());
        assert!(Route::NotFound.is_public());
        assert!(!Route::Availability.is_public());
    }
}
