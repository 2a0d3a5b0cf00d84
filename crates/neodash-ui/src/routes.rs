//! Routing definitions for the NeoDash shell.
use yew_router::prelude::*;

/// Top-level pages.
#[derive(Clone, Copy, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    /// Overview metrics.
    #[at("/")]
    Dashboard,
    /// Lead management.
    #[at("/leads")]
    Leads,
    /// Reporting.
    #[at("/analytics")]
    Analytics,
    /// Customer conversations.
    #[at("/messages")]
    Messages,
    /// Preferences.
    #[at("/settings")]
    Settings,
    /// Fallback for unknown paths.
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Heading shown on the page.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Leads => "Leads Management",
            Self::Analytics => "Analytics",
            Self::Messages => "Messages",
            Self::Settings => "Settings",
            Self::NotFound => "Page not found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Dashboard,
            Route::Leads,
            Route::Analytics,
            Route::Messages,
            Route::Settings,
        ] {
            assert_eq!(Route::recognize(&route.to_path()), Some(route));
        }
        assert_eq!(Route::Leads.to_path(), "/leads");
        assert_eq!(Route::not_found_route(), Some(Route::NotFound));
    }
}
