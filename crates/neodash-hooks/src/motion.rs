//! Animation presets shared by the shell and the visual primitives.
//!
//! Presets describe keyframes as data. Components render them as inline CSS
//! through [`Frame::css_style`]; the serde form is what a JS animation layer
//! would consume.

use serde::{Deserialize, Serialize};

/// Standard enter duration.
pub const ENTER_MS: u32 = 300;
/// Standard exit duration.
pub const EXIT_MS: u32 = 200;
/// Delay between staggered children.
pub const STAGGER_MS: u32 = 100;

/// Timing of a transition into a frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    /// Fixed-duration ease.
    Tween {
        /// Duration in milliseconds.
        duration_ms: u32,
    },
    /// Physics spring.
    Spring {
        /// Spring stiffness.
        stiffness: u32,
        /// Spring damping.
        damping: u32,
    },
    /// Parent transition that delays each child.
    Stagger {
        /// Own duration in milliseconds, if the parent animates itself.
        duration_ms: Option<u32>,
        /// Delay between consecutive children in milliseconds.
        stagger_ms: u32,
    },
    /// Infinite back-and-forth loop.
    Pulse {
        /// One-way duration in milliseconds.
        duration_ms: u32,
    },
}

impl Transition {
    /// Spring used across the presets.
    pub const SPRING: Self = Self::Spring {
        stiffness: 300,
        damping: 30,
    };

    /// Approximate duration for CSS, where springs have no native form.
    #[must_use]
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Tween { duration_ms } | Self::Pulse { duration_ms } => duration_ms,
            Self::Spring { stiffness, damping } => {
                let settle = damping.saturating_mul(4_000) / stiffness.max(1);
                settle.clamp(150, 800)
            }
            Self::Stagger { duration_ms, .. } => duration_ms.unwrap_or(ENTER_MS),
        }
    }

    /// Timing function paired with [`Transition::duration_ms`].
    #[must_use]
    pub const fn easing(self) -> &'static str {
        match self {
            Self::Spring { .. } => "cubic-bezier(0.34, 1.56, 0.64, 1)",
            Self::Pulse { .. } => "ease-in-out",
            Self::Tween { .. } | Self::Stagger { .. } => "ease-out",
        }
    }

    /// CSS `transition` value for the listed properties.
    #[must_use]
    pub fn css_transition(self, properties: &[&str]) -> String {
        let duration = self.duration_ms();
        let easing = self.easing();
        properties
            .iter()
            .map(|property| format!("{property} {duration}ms {easing}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Visual state at one point of an animation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Opacity in 0.0..=1.0.
    pub opacity: f32,
    /// Horizontal offset in pixels.
    pub x: f32,
    /// Vertical offset in pixels.
    pub y: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// How this frame is reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

impl Frame {
    /// Fully visible, untransformed frame.
    pub const REST: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        transition: None,
    };

    const fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Inline CSS declarations for the frame.
    #[must_use]
    pub fn css_style(&self) -> String {
        let mut style = format!(
            "opacity: {}; transform: translate({}px, {}px) scale({});",
            self.opacity, self.x, self.y, self.scale
        );
        if let Some(transition) = self.transition {
            style.push_str(" transition: ");
            style.push_str(&transition.css_transition(&["opacity", "transform"]));
            style.push(';');
        }
        style
    }
}

/// Named frames for entering, resting and leaving.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variants {
    /// Frame before entering.
    pub hidden: Frame,
    /// Frame once entered.
    pub visible: Frame,
    /// Frame while leaving, when the preset animates exits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit: Option<Frame>,
}

impl Variants {
    /// Frame for a visibility flag.
    #[must_use]
    pub const fn frame(&self, visible: bool) -> &Frame {
        if visible { &self.visible } else { &self.hidden }
    }
}

const fn hidden(opacity: f32, x: f32, y: f32, scale: f32) -> Frame {
    Frame {
        opacity,
        x,
        y,
        scale,
        transition: None,
    }
}

const EXIT: Transition = Transition::Tween {
    duration_ms: EXIT_MS,
};

/// Opacity fade.
#[must_use]
pub const fn fade_in() -> Variants {
    Variants {
        hidden: hidden(0.0, 0.0, 0.0, 1.0),
        visible: Frame::REST.with_transition(Transition::Tween {
            duration_ms: ENTER_MS,
        }),
        exit: Some(hidden(0.0, 0.0, 0.0, 1.0).with_transition(EXIT)),
    }
}

/// Rise 20px while fading in.
#[must_use]
pub const fn slide_up() -> Variants {
    Variants {
        hidden: hidden(0.0, 0.0, 20.0, 1.0),
        visible: Frame::REST.with_transition(Transition::SPRING),
        exit: Some(hidden(0.0, 0.0, 20.0, 1.0).with_transition(EXIT)),
    }
}

/// Enter from 20px to the left.
#[must_use]
pub const fn slide_in() -> Variants {
    Variants {
        hidden: hidden(0.0, -20.0, 0.0, 1.0),
        visible: Frame::REST.with_transition(Transition::SPRING),
        exit: Some(hidden(0.0, -20.0, 0.0, 1.0).with_transition(EXIT)),
    }
}

/// Grow from 90% while fading in.
#[must_use]
pub const fn scale_in() -> Variants {
    Variants {
        hidden: hidden(0.0, 0.0, 0.0, 0.9),
        visible: Frame::REST.with_transition(Transition::SPRING),
        exit: Some(hidden(0.0, 0.0, 0.0, 0.9).with_transition(EXIT)),
    }
}

/// Parent fade that staggers its children.
#[must_use]
pub const fn stagger_children() -> Variants {
    Variants {
        hidden: hidden(0.0, 0.0, 0.0, 1.0),
        visible: Frame::REST.with_transition(Transition::Stagger {
            duration_ms: None,
            stagger_ms: STAGGER_MS,
        }),
        exit: None,
    }
}

/// Route change fade, parent before children.
#[must_use]
pub const fn page_transition() -> Variants {
    Variants {
        hidden: hidden(0.0, 0.0, 0.0, 1.0),
        visible: Frame::REST.with_transition(Transition::Stagger {
            duration_ms: Some(ENTER_MS),
            stagger_ms: STAGGER_MS,
        }),
        exit: Some(hidden(0.0, 0.0, 0.0, 1.0).with_transition(EXIT)),
    }
}

/// Looping placeholder pulse.
#[must_use]
pub const fn loading_pulse() -> Variants {
    Variants {
        hidden: hidden(0.6, 0.0, 0.0, 0.95),
        visible: Frame::REST.with_transition(Transition::Pulse { duration_ms: 800 }),
        exit: None,
    }
}
