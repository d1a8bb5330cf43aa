//! Easing curves that map linear animation time onto animation progress.
//!
//! Width animations use a cubic Bézier curve so that the bar accelerates out
//! of its start position and settles gently into the target. Opacity fades
//! use [`Easing::Linear`].
//!
//! ```rust
//! use animated_progress::easing::Easing;
//!
//! let eased = Easing::EASE.apply(0.5);
//! assert!(eased > 0.5); // ahead of linear time in the middle of the curve
//! assert_eq!(Easing::Linear.apply(0.25), 0.25);
//! ```

// Precision of the x -> s inversion of the Bézier polynomial.
const SOLVE_EPSILON: f64 = 1e-7;
const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 48;

/// A time-to-progress curve over the unit interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Progress equals elapsed time.
    Linear,
    /// A CSS-style cubic Bézier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    ///
    /// `x1` and `x2` must lie in `[0, 1]` for the curve to be a function of
    /// time; they are clamped when sampled.
    CubicBezier {
        /// X of the first control point.
        x1: f64,
        /// Y of the first control point.
        y1: f64,
        /// X of the second control point.
        x2: f64,
        /// Y of the second control point.
        y2: f64,
    },
}

impl Easing {
    /// Gentle ease-in, strong ease-out. The default curve for width animation.
    pub const EASE: Easing = Easing::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    /// Symmetric ease-in/ease-out.
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// Maps elapsed time `t` (clamped to `[0, 1]`) to animation progress.
    ///
    /// Both endpoints are exact: `apply(0.0) == 0.0` and `apply(1.0) == 1.0`,
    /// which the scheduler relies on to detect completion.
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Easing::Linear => t,
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let x1 = x1.clamp(0.0, 1.0);
                let x2 = x2.clamp(0.0, 1.0);
                let s = solve_for_x(t, x1, x2);
                sample(s, y1, y2)
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::EASE
    }
}

/// One axis of the Bézier polynomial, in Horner form.
fn sample(s: f64, p1: f64, p2: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * s + b) * s + c) * s
}

fn sample_derivative(s: f64, p1: f64, p2: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * s + 2.0 * b) * s + c
}

/// Finds the curve parameter whose x coordinate is `x`.
///
/// Newton-Raphson converges in a handful of steps for typical curves; flat
/// derivatives fall back to bisection, which always converges because x is
/// monotonic in s for control points inside the unit square.
fn solve_for_x(x: f64, x1: f64, x2: f64) -> f64 {
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = sample(s, x1, x2) - x;
        if err.abs() < SOLVE_EPSILON {
            return s;
        }
        let slope = sample_derivative(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = x;
    for _ in 0..BISECTION_ITERATIONS {
        let value = sample(s, x1, x2);
        if (value - x).abs() < SOLVE_EPSILON {
            break;
        }
        if x > value {
            lo = s;
        } else {
            hi = s;
        }
        s = lo + (hi - lo) * 0.5;
    }
    s
}
