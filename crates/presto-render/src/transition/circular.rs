//! Circular: a circle centred on the surface grows or shrinks.

use presto_core::{Rect, Size2D, TransitionKind};

use super::Partition;
use crate::region::Region;

/// Radius of the circle at `percent`. It spans from zero to the half
/// diagonal, which reaches every corner.
pub fn radius(bounds: Rect, kind: TransitionKind, percent: f64) -> f64 {
    let max = Size2D::new(bounds.width, bounds.height).half_diagonal();
    match kind {
        TransitionKind::CircularCollapse => max * (1.0 - percent),
        _ => max * percent,
    }
}

/// Expand shows the next frame inside a growing circle. Collapse keeps the
/// previous frame inside a shrinking circle.
pub fn partition(bounds: Rect, kind: TransitionKind, percent: f64) -> Partition {
    let circle = Region::circle(bounds.center(), radius(bounds, kind, percent));
    let full = Region::rect(bounds);
    if kind == TransitionKind::CircularCollapse {
        Partition {
            next: full.difference(circle.clone()),
            previous: circle,
        }
    } else {
        Partition {
            previous: full.difference(circle.clone()),
            next: circle,
        }
    }
}
