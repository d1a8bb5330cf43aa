//! Opacity state and linear fade transitions.
//!
//! A [`Fade`] holds the widget's current opacity and at most one in-flight
//! transition. Starting a new fade replaces the old one and continues from
//! whatever opacity the bar currently has; there is no fade queue.

use crate::easing::Easing;
use std::time::Duration;

/// Fixed duration of fade-in and fade-out transitions.
pub const FADE_DURATION: Duration = Duration::from_millis(200);

/// Direction of a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// Towards fully opaque.
    In,
    /// Towards fully transparent.
    Out,
}

impl FadeDirection {
    fn target(self) -> f64 {
        match self {
            FadeDirection::In => 1.0,
            FadeDirection::Out => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Transition {
    direction: FadeDirection,
    from: f64,
    elapsed: Duration,
}

/// Opacity animated independently of the width queue.
#[derive(Debug, Clone)]
pub struct Fade {
    opacity: f64,
    duration: Duration,
    transition: Option<Transition>,
}

impl Default for Fade {
    fn default() -> Self {
        Self::new(FADE_DURATION)
    }
}

impl Fade {
    /// A fully opaque, idle fade with the given transition duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            opacity: 1.0,
            duration,
            transition: None,
        }
    }

    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Direction of the in-flight transition, if any.
    pub fn direction(&self) -> Option<FadeDirection> {
        self.transition.as_ref().map(|t| t.direction)
    }

    /// True while a transition is running.
    pub fn is_fading(&self) -> bool {
        self.transition.is_some()
    }

    /// Starts animating towards full opacity.
    pub fn fade_in(&mut self) {
        self.start(FadeDirection::In);
    }

    /// Starts animating towards full transparency.
    pub fn fade_out(&mut self) {
        self.start(FadeDirection::Out);
    }

    fn start(&mut self, direction: FadeDirection) {
        self.transition = Some(Transition {
            direction,
            from: self.opacity,
            elapsed: Duration::ZERO,
        });
    }

    /// Advances the in-flight transition by `dt`.
    ///
    /// Returns true when the opacity changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };

        transition.elapsed = transition.elapsed.saturating_add(dt);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (transition.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };

        let target = transition.direction.target();
        let from = transition.from;
        let next = from + (target - from) * Easing::Linear.apply(t);
        let changed = (next - self.opacity).abs() > f64::EPSILON;
        self.opacity = next.clamp(0.0, 1.0);

        if t >= 1.0 {
            self.opacity = target;
            self.transition = None;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_opaque_and_idle() {
        let fade = Fade::default();
        assert_eq!(fade.opacity(), 1.0);
        assert!(!fade.is_fading());
    }

    #[test]
    fn test_fade_out_is_linear() {
        let mut fade = Fade::default();
        fade.fade_out();
        assert_eq!(fade.direction(), Some(FadeDirection::Out));

        assert!(fade.advance(Duration::from_millis(50)));
        assert!((fade.opacity() - 0.75).abs() < 1e-9);

        fade.advance(Duration::from_millis(100));
        assert!((fade.opacity() - 0.25).abs() < 1e-9);

        fade.advance(Duration::from_millis(50));
        assert_eq!(fade.opacity(), 0.0);
        assert!(!fade.is_fading());
    }

    #[test]
    fn test_new_fade_replaces_in_flight_fade() {
        let mut fade = Fade::default();
        fade.fade_out();
        fade.advance(Duration::from_millis(100));
        assert!((fade.opacity() - 0.5).abs() < 1e-9);

        fade.fade_in();
        assert_eq!(fade.direction(), Some(FadeDirection::In));
        fade.advance(Duration::from_millis(100));
        // from 0.5 towards 1.0, half way
        assert!((fade.opacity() - 0.75).abs() < 1e-9);

        fade.advance(FADE_DURATION);
        assert_eq!(fade.opacity(), 1.0);
    }

    #[test]
    fn test_fade_in_when_already_opaque_completes_without_change() {
        let mut fade = Fade::default();
        fade.fade_in();
        assert!(!fade.advance(FADE_DURATION));
        assert!(!fade.is_fading());
        assert_eq!(fade.opacity(), 1.0);
    }

    #[test]
    fn test_advance_without_transition_is_noop() {
        let mut fade = Fade::default();
        assert!(!fade.advance(Duration::from_secs(1)));
    }
}
