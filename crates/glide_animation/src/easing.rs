//! Timing functions for transitions
//!
//! The named variants use the control points of the CSS keywords so that the
//! curve sampled here matches what a browser-like host renders for the same
//! transition rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
}

/// Error returned when a timing function string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseEasingError {
    #[error("unknown timing function: {0}")]
    Unknown(String),

    #[error("malformed cubic-bezier: {0}")]
    MalformedBezier(String),

    #[error("cubic-bezier x control points must lie in [0, 1]: {0}")]
    XOutOfRange(String),
}

impl Easing {
    /// Control points of the curve (x1, y1, x2, y2), None for linear
    pub fn control_points(&self) -> Option<(f32, f32, f32, f32)> {
        match *self {
            Easing::Linear => None,
            Easing::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            Easing::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Easing::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Easing::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Easing::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self.control_points() {
            None => t.clamp(0.0, 1.0),
            Some(points) => bezier_progress(t, points),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::Ease => f.write_str("ease"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        match value.as_str() {
            "linear" => return Ok(Easing::Linear),
            "ease" => return Ok(Easing::Ease),
            "ease-in" => return Ok(Easing::EaseIn),
            "ease-out" => return Ok(Easing::EaseOut),
            "ease-in-out" => return Ok(Easing::EaseInOut),
            _ => {}
        }

        let Some(args) = value
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Err(ParseEasingError::Unknown(s.to_string()));
        };

        let points: Vec<f32> = args
            .split(',')
            .map(|part| part.trim().parse::<f32>())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseEasingError::MalformedBezier(s.to_string()))?;

        let &[x1, y1, x2, y2] = points.as_slice() else {
            return Err(ParseEasingError::MalformedBezier(s.to_string()));
        };
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(ParseEasingError::XOutOfRange(s.to_string()));
        }
        Ok(Easing::CubicBezier(x1, y1, x2, y2))
    }
}

impl Serialize for Easing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Newton steps plus bisection fallbacks allowed per sample
const MAX_BEZIER_STEPS: usize = 40;

const BEZIER_EPSILON: f64 = 1e-7;

/// One coordinate of a unit cubic bezier, as a polynomial in the curve
/// parameter `s` with `at(0) == 0` and `at(1) == 1`
#[derive(Clone, Copy)]
struct Cubic {
    a: f64,
    b: f64,
    c: f64,
}

impl Cubic {
    fn new(p1: f32, p2: f32) -> Self {
        let c = 3.0 * f64::from(p1);
        let b = 3.0 * (f64::from(p2) - f64::from(p1)) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    #[inline]
    fn at(self, s: f64) -> f64 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    #[inline]
    fn derivative(self, s: f64) -> f64 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }
}

/// Eased progress at time fraction `t` for control points `(x1, y1, x2, y2)`
///
/// Finds the curve parameter whose x equals `t` and returns its y. Computed
/// in f64 so long glides don't jitter.
fn bezier_progress(t: f32, (x1, y1, x2, y2): (f32, f32, f32, f32)) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let (x, y) = (Cubic::new(x1, x2), Cubic::new(y1, y2));
    let target = f64::from(t);

    // x(s) is monotonic for x control points in [0, 1], so [lo, hi] always
    // brackets the root; Newton steps that leave it are replaced by bisection
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut s = target;
    for _ in 0..MAX_BEZIER_STEPS {
        let error = x.at(s) - target;
        if error.abs() < BEZIER_EPSILON {
            break;
        }
        if error < 0.0 {
            lo = s;
        } else {
            hi = s;
        }

        let slope = x.derivative(s);
        let newton = s - error / slope;
        s = if slope.abs() > BEZIER_EPSILON && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };
    }

    y.at(s) as f32
}
