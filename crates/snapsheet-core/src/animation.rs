//! Transition descriptions for the settle, open and close animations.
//!
//! The sheet does not interpolate heights itself: the host animates between the
//! old and new height using the transition rendered by [`TransitionSpec::css`].

use std::borrow::Cow;

/// Timing curves understood by CSS transitions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// The browser's default curve.
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowIn,
    /// Arbitrary cubic bezier control points `(x1, y1, x2, y2)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// CSS timing-function keyword or expression.
    pub fn css(&self) -> Cow<'static, str> {
        match self {
            Easing::Linear => Cow::Borrowed("linear"),
            Easing::Ease => Cow::Borrowed("ease"),
            Easing::EaseIn => Cow::Borrowed("ease-in"),
            Easing::EaseOut => Cow::Borrowed("ease-out"),
            Easing::EaseInOut => Cow::Borrowed("ease-in-out"),
            Easing::FastOutSlowIn => Cow::Borrowed("cubic-bezier(0.4, 0, 0.2, 1)"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                Cow::Owned(format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"))
            }
        }
    }
}

/// Transition applied to the sheet content while it moves to a new height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    /// Duration of the `max-height` transition in milliseconds.
    pub duration_millis: u64,
    /// Easing of the `max-height` transition.
    pub easing: Easing,
    /// Duration of the secondary `height` transition in milliseconds.
    pub height_duration_millis: u64,
}

impl TransitionSpec {
    const HEIGHT_DURATION_MILLIS: u64 = 500;

    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            height_duration_millis: Self::HEIGHT_DURATION_MILLIS,
        }
    }

    /// Renders the value of the CSS `transition` property.
    pub fn css(&self) -> String {
        let height_secs = self.height_duration_millis as f64 / 1000.0;
        format!(
            "height {height_secs}s, max-height {}ms {}",
            self.duration_millis,
            self.easing.css()
        )
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::tween(crate::DEFAULT_SNAPPING_TIME_MS, Easing::Ease)
    }
}
