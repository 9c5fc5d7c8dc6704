//! Zoom: a rectangular window scales about the surface centre.
//!
//! ZoomIn grows a window from nothing to the full surface, with the next frame
//! inside it. ZoomOut shrinks a window from the full surface to nothing, with
//! the previous frame inside it. The other frame is clipped to the area outside
//! the window, so no pixel shows both frames.
//!
//! Direction picks the frame that scales. `In` scales the next frame and `Out`
//! scales the previous frame. A frame inside the window is scaled to fill it.
//! A frame outside the window is enlarged by `1 + window scale`, so it settles
//! at its natural size as the window vanishes, or leaves at double size as the
//! window fills the surface.

use presto_core::{Direction, FrameBuffer, Rect};

use super::{draw_clipped, Frames};
use crate::region::Region;
use crate::surface::{Placement, Surface};

/// Placement of a frame covering `bounds` scaled by `scale` about its centre.
/// The top-left lands at `0.5 * (1 - scale)` of each dimension.
pub fn placement(bounds: Rect, scale: f64) -> Placement {
    let r = bounds.scaled_about_center(scale);
    Placement::at(r.x, r.y).with_scale(scale)
}

/// Scale of the window relative to the surface at `percent`.
pub fn window_scale(growing: bool, percent: f64) -> f64 {
    if growing {
        percent
    } else {
        1.0 - percent
    }
}

/// The window, and the region outside it, at `percent`.
pub fn partition(bounds: Rect, growing: bool, percent: f64) -> (Region, Region) {
    let window = Region::rect(bounds.scaled_about_center(window_scale(growing, percent)));
    let outside = Region::rect(bounds).difference(window.clone());
    (window, outside)
}

pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    frames: Frames<'_>,
    growing: bool,
    direction: Direction,
    percent: f64,
) {
    let bounds = surface.bounds();
    let scale = window_scale(growing, percent);
    let (window, outside) = partition(bounds, growing, percent);

    // Growing windows hold the next frame; shrinking ones the previous.
    let (inner, outer): (Option<&FrameBuffer>, Option<&FrameBuffer>) = if growing {
        (Some(frames.next), frames.previous)
    } else {
        (frames.previous, Some(frames.next))
    };
    let inner_scaled = matches!(
        (growing, direction),
        (true, Direction::In) | (false, Direction::Out)
    );

    let (inner_at, outer_at) = if inner_scaled {
        (placement(bounds, scale), Placement::ORIGIN)
    } else {
        (Placement::ORIGIN, placement(bounds, 1.0 + scale))
    };
    draw_clipped(surface, outer, &outside, outer_at);
    draw_clipped(surface, inner, &window, inner_at);
}
