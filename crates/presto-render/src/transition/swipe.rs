//! Swipe: a straight edge sweeps across the surface, revealing the next frame.

use presto_core::{Rect, SlideDirection};

use super::Partition;
use crate::region::Region;

/// The part of `bounds` showing the next frame. It grows from the edge the
/// swipe starts at: `Left` starts at the right edge, `Down` at the top.
pub fn revealed(bounds: Rect, slide: SlideDirection, percent: f64) -> Rect {
    let w = bounds.width * percent;
    let h = bounds.height * percent;
    match slide {
        SlideDirection::Left => Rect::new(bounds.right() - w, bounds.y, w, bounds.height),
        SlideDirection::Right => Rect::new(bounds.x, bounds.y, w, bounds.height),
        SlideDirection::Up => Rect::new(bounds.x, bounds.bottom() - h, bounds.width, h),
        SlideDirection::Down => Rect::new(bounds.x, bounds.y, bounds.width, h),
    }
}

pub fn partition(bounds: Rect, slide: SlideDirection, percent: f64) -> Partition {
    let next = Region::rect(revealed(bounds, slide, percent));
    Partition {
        previous: Region::rect(bounds).difference(next.clone()),
        next,
    }
}
