//! Utility-class tokens shared by the visual primitives.
//!
//! Kept free of Yew types so class composition is testable natively.

use neodash_hooks::motion::Transition;

const FOCUS_RING: &str = "focus:outline-none focus:ring-2 focus:ring-primary-500";

/// Sizing tokens for buttons and toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Size {
    /// Small.
    Sm,
    /// Medium.
    #[default]
    Md,
    /// Large.
    Lg,
}

impl Size {
    /// Padding and text size for a button of this size.
    #[must_use]
    pub const fn button_class(self) -> &'static str {
        match self {
            Self::Sm => "text-sm px-3 py-1",
            Self::Md => "text-base px-4 py-2",
            Self::Lg => "text-lg px-6 py-3",
        }
    }
}

/// Visual weight of a button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Filled brand color.
    #[default]
    Primary,
    /// Filled secondary color.
    Secondary,
    /// Bordered, transparent fill.
    Outline,
    /// Text only.
    Ghost,
}

impl ButtonVariant {
    /// Color classes for the variant.
    #[must_use]
    pub const fn as_class(self) -> &'static str {
        match self {
            Self::Primary => "bg-primary-500 hover:bg-primary-600 text-white",
            Self::Secondary => "bg-secondary-500 hover:bg-secondary-600 text-white",
            Self::Outline => {
                "border border-primary-500 text-primary-500 hover:bg-primary-50 dark:hover:bg-primary-900"
            }
            Self::Ghost => "text-primary-500 hover:bg-primary-50 dark:hover:bg-primary-900",
        }
    }
}

/// Full class list for a button.
///
/// A loading button is also disabled.
#[must_use]
pub fn button_classes(variant: ButtonVariant, size: Size, disabled: bool, loading: bool) -> String {
    let mut classes = vec![
        "rounded-md font-medium transition-colors duration-200 active:scale-95",
        FOCUS_RING,
        "focus:ring-offset-2",
        variant.as_class(),
        size.button_class(),
    ];
    if disabled || loading {
        classes.push("opacity-60 cursor-not-allowed");
    }
    classes.join(" ")
}

/// Surface style of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CardVariant {
    /// Raised white surface.
    #[default]
    Default,
    /// Tinted with the brand color.
    Primary,
    /// Bordered, no shadow.
    Flat,
}

impl CardVariant {
    /// Surface classes for the variant.
    #[must_use]
    pub const fn as_class(self) -> &'static str {
        match self {
            Self::Default => "bg-white dark:bg-gray-800 shadow-md rounded-lg",
            Self::Primary => "bg-primary-50 dark:bg-primary-900 shadow-md rounded-lg",
            Self::Flat => {
                "bg-gray-50 dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-lg"
            }
        }
    }
}

/// Full class list for a card.
#[must_use]
pub fn card_classes(variant: CardVariant, clickable: bool) -> String {
    let mut classes = format!("{} p-6", variant.as_class());
    if clickable {
        classes.push_str(" cursor-pointer");
    }
    classes
}

/// Class list for a text input.
#[must_use]
pub fn input_classes(has_error: bool) -> String {
    let border = if has_error {
        "border-red-500"
    } else {
        "border-gray-300 dark:border-gray-600"
    };
    format!(
        "w-full px-3 py-2 bg-white dark:bg-gray-700 border rounded-md {FOCUS_RING} transition-colors duration-200 {border}"
    )
}

/// Class for the helper or error line under an input.
#[must_use]
pub const fn input_hint_class(has_error: bool) -> &'static str {
    if has_error {
        "mt-1 text-sm text-red-500"
    } else {
        "mt-1 text-sm text-gray-500 dark:text-gray-400"
    }
}

/// Knob spring of the toggle switch.
pub const TOGGLE_SPRING: Transition = Transition::Spring {
    stiffness: 500,
    damping: 30,
};

/// Track and knob dimensions of a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleMetrics {
    /// Track size classes.
    pub track: &'static str,
    /// Knob size classes.
    pub knob: &'static str,
    /// Knob travel when on, in pixels.
    pub travel_px: u32,
}

impl Size {
    /// Toggle dimensions for this size.
    #[must_use]
    pub const fn toggle_metrics(self) -> ToggleMetrics {
        match self {
            Self::Sm => ToggleMetrics {
                track: "w-8 h-4",
                knob: "w-3 h-3",
                travel_px: 16,
            },
            Self::Md => ToggleMetrics {
                track: "w-11 h-6",
                knob: "w-5 h-5",
                travel_px: 20,
            },
            Self::Lg => ToggleMetrics {
                track: "w-14 h-7",
                knob: "w-6 h-6",
                travel_px: 28,
            },
        }
    }
}

/// Class list for a toggle track.
#[must_use]
pub fn toggle_track_classes(size: Size, on: bool, disabled: bool) -> String {
    let fill = if on {
        "bg-primary-500"
    } else {
        "bg-gray-300 dark:bg-gray-600"
    };
    let cursor = if disabled {
        "opacity-50 cursor-not-allowed"
    } else {
        "cursor-pointer"
    };
    format!(
        "{} {fill} rounded-full p-0.5 {cursor} {FOCUS_RING} focus:ring-offset-2",
        size.toggle_metrics().track
    )
}

/// Inline style placing the toggle knob.
#[must_use]
pub fn toggle_knob_style(size: Size, on: bool) -> String {
    let offset = if on { size.toggle_metrics().travel_px } else { 0 };
    format!(
        "transform: translateX({offset}px); transition: {};",
        TOGGLE_SPRING.css_transition(&["transform"])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_classes_combine_variant_size_and_state() {
        let idle = button_classes(ButtonVariant::Ghost, Size::Sm, false, false);
        assert!(idle.contains("text-primary-500"));
        assert!(idle.contains("px-3 py-1"));
        assert!(!idle.contains("cursor-not-allowed"));

        let loading = button_classes(ButtonVariant::Primary, Size::Lg, false, true);
        assert!(loading.contains("bg-primary-500"));
        assert!(loading.ends_with("opacity-60 cursor-not-allowed"));
    }

    #[test]
    fn card_and_input_classes_reflect_state() {
        assert!(card_classes(CardVariant::Flat, true).ends_with("p-6 cursor-pointer"));
        assert!(!card_classes(CardVariant::Default, false).contains("cursor-pointer"));
        assert!(input_classes(true).ends_with("border-red-500"));
        assert!(input_classes(false).contains("border-gray-300"));
        assert_eq!(input_hint_class(true), "mt-1 text-sm text-red-500");
    }

    #[test]
    fn toggle_knob_travels_by_size() {
        assert_eq!(Size::Lg.toggle_metrics().travel_px, 28);
        assert!(toggle_knob_style(Size::Md, true).starts_with("transform: translateX(20px);"));
        assert!(toggle_knob_style(Size::Md, false).starts_with("transform: translateX(0px);"));
        assert!(toggle_track_classes(Size::Sm, false, true).contains("opacity-50"));
        assert!(toggle_track_classes(Size::Sm, true, false).contains("bg-primary-500"));
    }
}
