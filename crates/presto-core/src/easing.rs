//! Easing curves.
//!
//! Every variant defines a single `base_curve` (its ease-in shape) as a pure
//! function on [0, 1] with `base_curve(0) == 0` and `base_curve(1) == 1`.
//! [`Easing::curve`] derives the ease-out and ease-in-out forms from it.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Which part of the motion is eased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingMode {
    /// Slow start: `base_curve(v)`.
    In,
    /// Slow end: `1 - base_curve(1 - v)`.
    Out,
    /// Slow start and end, mirrored around `v = 0.5`.
    InOut,
}

/// Easing function family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    Quadratic,
    Cubic,
    Quartic,
    Quintic,
    Sinusoidal,
    Exponential,
    Circular,
    Back,
    Bounce,
    Elastic,
}

const BACK_OVERSHOOT: f64 = 1.70158;
const ELASTIC_PERIOD: f64 = 0.3;

impl Easing {
    pub const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::Quadratic,
        Easing::Cubic,
        Easing::Quartic,
        Easing::Quintic,
        Easing::Sinusoidal,
        Easing::Exponential,
        Easing::Circular,
        Easing::Back,
        Easing::Bounce,
        Easing::Elastic,
    ];

    /// Stable identifier used in configuration files.
    pub fn id(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Quadratic => "quadratic",
            Easing::Cubic => "cubic",
            Easing::Quartic => "quartic",
            Easing::Quintic => "quintic",
            Easing::Sinusoidal => "sinusoidal",
            Easing::Exponential => "exponential",
            Easing::Circular => "circular",
            Easing::Back => "back",
            Easing::Bounce => "bounce",
            Easing::Elastic => "elastic",
        }
    }

    /// Look up an easing by identifier (case-insensitive, common short aliases accepted).
    pub fn from_id(id: &str) -> Option<Easing> {
        let id = id.trim().to_ascii_lowercase();
        let easing = match id.as_str() {
            "linear" | "none" => Easing::Linear,
            "quadratic" | "quad" => Easing::Quadratic,
            "cubic" => Easing::Cubic,
            "quartic" | "quart" => Easing::Quartic,
            "quintic" | "quint" => Easing::Quintic,
            "sinusoidal" | "sine" => Easing::Sinusoidal,
            "exponential" | "expo" => Easing::Exponential,
            "circular" | "circ" => Easing::Circular,
            "back" => Easing::Back,
            "bounce" => Easing::Bounce,
            "elastic" => Easing::Elastic,
            _ => return None,
        };
        Some(easing)
    }

    /// Like [`Easing::from_id`] but fails closed to `Linear`.
    pub fn resolve(id: &str) -> Easing {
        Easing::from_id(id).unwrap_or_else(|| {
            tracing::warn!("unknown easing '{}', falling back to linear", id);
            Easing::Linear
        })
    }

    /// The ease-in shape of this curve.
    pub fn base_curve(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::Quadratic => t * t,
            Easing::Cubic => t * t * t,
            Easing::Quartic => t.powi(4),
            Easing::Quintic => t.powi(5),
            Easing::Sinusoidal => 1.0 - (t * FRAC_PI_2).cos(),
            Easing::Exponential => exponential_in(t),
            Easing::Circular => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Easing::Back => t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT),
            Easing::Bounce => 1.0 - bounce_out(1.0 - t),
            Easing::Elastic => elastic_in(t),
        }
    }

    /// Evaluate the curve in the given mode. Input is clamped to [0, 1];
    /// the output may overshoot for `Back` and `Elastic`.
    pub fn curve(&self, v: f64, mode: EasingMode) -> f64 {
        let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        match mode {
            EasingMode::In => self.base_curve(v),
            EasingMode::Out => 1.0 - self.base_curve(1.0 - v),
            EasingMode::InOut => {
                if v <= 0.5 {
                    self.base_curve(2.0 * v) / 2.0
                } else {
                    (2.0 - self.base_curve(2.0 * (1.0 - v))) / 2.0
                }
            }
        }
    }

    pub fn ease_in(&self, v: f64) -> f64 {
        self.curve(v, EasingMode::In)
    }

    pub fn ease_out(&self, v: f64) -> f64 {
        self.curve(v, EasingMode::Out)
    }

    pub fn ease_in_out(&self, v: f64) -> f64 {
        self.curve(v, EasingMode::InOut)
    }
}

fn exponential_in(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * (t - 1.0))
    }
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

fn elastic_in(t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let s = ELASTIC_PERIOD / 4.0;
    let t = t - 1.0;
    -(2f64.powf(10.0 * t) * ((t - s) * (2.0 * PI) / ELASTIC_PERIOD).sin())
}
