//! Blinds: the surface is cut into strips, each showing a shrinking band of
//! the previous frame centred in it.

use presto_core::Rect;

use super::Partition;
use crate::region::Region;

/// The previous frame's bands. Horizontal blinds stack strips top to bottom;
/// vertical blinds lay them left to right. Each band loses `percent / 2` of
/// its strip at both ends.
pub fn bands(bounds: Rect, count: u32, vertical: bool, percent: f64) -> Region {
    Region::bands(bounds, count, vertical, percent / 2.0)
}

pub fn partition(bounds: Rect, count: u32, vertical: bool, percent: f64) -> Partition {
    let previous = bands(bounds, count, vertical, percent);
    Partition {
        next: Region::rect(bounds).difference(previous.clone()),
        previous,
    }
}
