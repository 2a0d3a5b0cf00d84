//! Responsive breakpoint definitions for the Web UI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BreakpointError;

/// Named viewport-width threshold.
///
/// `Xs` is an upper bound; every other breakpoint is a lower bound, so several
/// breakpoints can match the same width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Breakpoint {
    /// Width ≤ 639.
    #[serde(rename = "xs")]
    Xs,
    /// Width ≥ 640.
    #[serde(rename = "sm")]
    Sm,
    /// Width ≥ 768.
    #[serde(rename = "md")]
    Md,
    /// Width ≥ 1024.
    #[serde(rename = "lg")]
    Lg,
    /// Width ≥ 1280.
    #[serde(rename = "xl")]
    Xl,
    /// Width ≥ 1536.
    #[serde(rename = "2xl")]
    Xxl,
}

impl Breakpoint {
    /// Every breakpoint, smallest first.
    pub const ALL: [Self; 6] = [Self::Xs, Self::Sm, Self::Md, Self::Lg, Self::Xl, Self::Xxl];

    /// Name used in config and CSS.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "2xl",
        }
    }

    /// Boundary width in CSS pixels.
    #[must_use]
    pub const fn boundary(self) -> u32 {
        match self {
            Self::Xs => 639,
            Self::Sm => 640,
            Self::Md => 768,
            Self::Lg => 1024,
            Self::Xl => 1280,
            Self::Xxl => 1536,
        }
    }

    /// Whether the boundary is an upper (`max-width`) bound.
    #[must_use]
    pub const fn is_upper_bound(self) -> bool {
        matches!(self, Self::Xs)
    }

    /// Evaluate the predicate for a viewport width.
    #[must_use]
    pub const fn matches_width(self, width: u32) -> bool {
        if self.is_upper_bound() {
            width <= self.boundary()
        } else {
            width >= self.boundary()
        }
    }

    /// Media query text for `window.matchMedia`.
    #[must_use]
    pub fn media_query(self) -> String {
        let bound = if self.is_upper_bound() {
            "max-width"
        } else {
            "min-width"
        };
        format!("({bound}: {}px)", self.boundary())
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Breakpoint {
    type Err = BreakpointError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bp| bp.name() == value)
            .ok_or_else(|| BreakpointError::Unknown {
                name: value.to_string(),
            })
    }
}
