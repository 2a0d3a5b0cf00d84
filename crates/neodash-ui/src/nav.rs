//! Sidebar navigation table and layout metrics.

use neodash_hooks::motion::{ENTER_MS, Transition};

use crate::routes::Route;

/// Brand text shown in the expanded sidebar.
pub const BRAND: &str = "NeoAuto";
/// Header title when a page does not set one.
pub const DEFAULT_TITLE: &str = "NeoAutomotive Platform";
/// Sidebar width while collapsed, in pixels.
pub const SIDEBAR_COLLAPSED_PX: u32 = 64;
/// Sidebar width while expanded, in pixels.
pub const SIDEBAR_EXPANDED_PX: u32 = 240;
/// Width animation between the two states.
pub const SIDEBAR_TRANSITION: Transition = Transition::Tween {
    duration_ms: ENTER_MS,
};

/// One sidebar entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    /// Visible label, hidden while collapsed.
    pub label: &'static str,
    /// Destination.
    pub route: Route,
    /// SVG path data for a 20x20 icon.
    pub icon: &'static str,
}

/// Default sidebar entries, in display order.
pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        label: "Dashboard",
        route: Route::Dashboard,
        icon: "M2 10a8 8 0 018-8v8h8a8 8 0 11-16 0z M12 2.252A8.014 8.014 0 0117.748 8H12V2.252z",
    },
    NavItem {
        label: "Leads",
        route: Route::Leads,
        icon: "M9 6a3 3 0 11-6 0 3 3 0 016 0zM17 6a3 3 0 11-6 0 3 3 0 016 0zM12.93 17c.046-.327.07-.66.07-1a6.97 6.97 0 00-1.5-4.33A5 5 0 0119 16v1h-6.07zM6 11a5 5 0 015 5v1H1v-1a5 5 0 015-5z",
    },
    NavItem {
        label: "Analytics",
        route: Route::Analytics,
        icon: "M2 11a1 1 0 011-1h2a1 1 0 011 1v5a1 1 0 01-1 1H3a1 1 0 01-1-1v-5zM8 7a1 1 0 011-1h2a1 1 0 011 1v9a1 1 0 01-1 1H9a1 1 0 01-1-1V7zM14 4a1 1 0 011-1h2a1 1 0 011 1v12a1 1 0 01-1 1h-2a1 1 0 01-1-1V4z",
    },
    NavItem {
        label: "Messages",
        route: Route::Messages,
        icon: "M2 5a2 2 0 012-2h7a2 2 0 012 2v4a2 2 0 01-2 2H9l-3 3v-3H4a2 2 0 01-2-2V5z M15 7v2a4 4 0 01-4 4H9.828l-1.766 1.767c.28.149.599.233.938.233h2l3 3v-3h2a2 2 0 002-2V9a2 2 0 00-2-2h-1z",
    },
    NavItem {
        label: "Settings",
        route: Route::Settings,
        icon: "M11.49 3.17c-.38-1.56-2.6-1.56-2.98 0a1.532 1.532 0 01-2.286.948c-1.372-.836-2.942.734-2.106 2.106.54.886.061 2.042-.947 2.287-1.561.379-1.561 2.6 0 2.978a1.532 1.532 0 01.947 2.287c-.836 1.372.734 2.942 2.106 2.106a1.532 1.532 0 012.287.947c.379 1.561 2.6 1.561 2.978 0a1.533 1.533 0 012.287-.947c1.372.836 2.942-.734 2.106-2.106a1.533 1.533 0 01.947-2.287c1.561-.379 1.561-2.6 0-2.978a1.532 1.532 0 01-.947-2.287c.836-1.372-.734-2.942-2.106-2.106a1.532 1.532 0 01-2.287-.947zM10 13a3 3 0 100-6 3 3 0 000 6z",
    },
];

impl NavItem {
    /// Whether this entry points at the current route.
    #[must_use]
    pub fn is_active(&self, current: Option<Route>) -> bool {
        current == Some(self.route)
    }
}

/// Sidebar width for the collapse state.
#[must_use]
pub const fn sidebar_width(collapsed: bool) -> u32 {
    if collapsed {
        SIDEBAR_COLLAPSED_PX
    } else {
        SIDEBAR_EXPANDED_PX
    }
}

/// Inline style for the sidebar.
#[must_use]
pub fn sidebar_style(collapsed: bool) -> String {
    format!(
        "width: {}px; transition: {};",
        sidebar_width(collapsed),
        SIDEBAR_TRANSITION.css_transition(&["width"])
    )
}

/// Inline style that keeps the main column clear of the fixed sidebar.
#[must_use]
pub fn main_offset_style(collapsed: bool) -> String {
    format!(
        "margin-left: {}px; transition: {};",
        sidebar_width(collapsed),
        SIDEBAR_TRANSITION.css_transition(&["margin-left"])
    )
}

/// Accessible label of the collapse button.
#[must_use]
pub const fn collapse_label(collapsed: bool) -> &'static str {
    if collapsed {
        "Expand sidebar"
    } else {
        "Collapse sidebar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_page_once() {
        let routes: Vec<Route> = NAV_ITEMS.iter().map(|item| item.route).collect();
        assert_eq!(
            routes,
            vec![
                Route::Dashboard,
                Route::Leads,
                Route::Analytics,
                Route::Messages,
                Route::Settings
            ]
        );
        assert!(!routes.contains(&Route::NotFound));
    }

    #[test]
    fn only_the_current_route_is_active() {
        let active: Vec<&str> = NAV_ITEMS
            .iter()
            .filter(|item| item.is_active(Some(Route::Leads)))
            .map(|item| item.label)
            .collect();
        assert_eq!(active, vec!["Leads"]);
        assert!(NAV_ITEMS.iter().all(|item| !item.is_active(None)));
    }

    #[test]
    fn widths_and_styles_follow_collapse_state() {
        assert_eq!(sidebar_width(true), 64);
        assert_eq!(sidebar_width(false), 240);
        assert_eq!(
            sidebar_style(true),
            "width: 64px; transition: width 300ms ease-out;"
        );
        assert!(main_offset_style(false).starts_with("margin-left: 240px;"));
        assert_eq!(collapse_label(true), "Expand sidebar");
    }
}
