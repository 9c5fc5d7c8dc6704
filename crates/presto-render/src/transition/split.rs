//! Split: two bands at opposite edges close in on, or open out from, the centre line.
//!
//! `HorizontalSplit*` uses top and bottom bands, `VerticalSplit*` left and
//! right bands. Expand opens the next frame from the centre outward; Collapse
//! closes the next frame in from the edges.

use presto_core::{Rect, TransitionKind};

use super::Partition;
use crate::region::Region;

/// Bands at both edges of `bounds`, each `fraction` of half the extent deep.
///
/// Band depths are floored on the leading edge and ceiled on the trailing
/// edge, so at `fraction == 1` the two bands cover odd extents completely.
pub fn outer_bands(bounds: Rect, horizontal: bool, fraction: f64) -> Region {
    let extent = if horizontal { bounds.height } else { bounds.width };
    let half = extent / 2.0;
    let lead = (half * fraction).floor();
    let trail = (half * fraction).ceil();
    let (first, second) = if horizontal {
        (
            Rect::new(bounds.x, bounds.y, bounds.width, lead),
            Rect::new(bounds.x, bounds.bottom() - trail, bounds.width, trail),
        )
    } else {
        (
            Rect::new(bounds.x, bounds.y, lead, bounds.height),
            Rect::new(bounds.right() - trail, bounds.y, trail, bounds.height),
        )
    };
    Region::rect(first).union(Region::rect(second))
}

/// Partition for a split kind. Non-split kinds are treated as a horizontal expand.
pub fn partition(bounds: Rect, kind: TransitionKind, percent: f64) -> Partition {
    let horizontal = matches!(
        kind,
        TransitionKind::HorizontalSplitExpand | TransitionKind::HorizontalSplitCollapse
    );
    let collapse = matches!(
        kind,
        TransitionKind::HorizontalSplitCollapse | TransitionKind::VerticalSplitCollapse
    );
    let full = Region::rect(bounds);
    if collapse {
        let next = outer_bands(bounds, horizontal, percent);
        Partition {
            previous: full.difference(next.clone()),
            next,
        }
    } else {
        let previous = outer_bands(bounds, horizontal, 1.0 - percent);
        Partition {
            next: full.difference(previous.clone()),
            previous,
        }
    }
}
