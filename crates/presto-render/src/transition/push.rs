//! Push: one frame slides across the surface.

use presto_core::{Direction, Point2D, Size2D, SlideDirection};

use super::{draw, Frames};
use crate::surface::{Placement, Surface};

/// Unit vector of the motion for a slide direction, in screen space (y down).
fn motion(slide: SlideDirection) -> (f64, f64) {
    match slide {
        SlideDirection::Left => (-1.0, 0.0),
        SlideDirection::Right => (1.0, 0.0),
        SlideDirection::Up => (0.0, -1.0),
        SlideDirection::Down => (0.0, 1.0),
    }
}

/// Top-left corner of the moving frame.
///
/// `In` brings the next frame from the edge opposite the motion to the
/// origin. `Out` moves the previous frame from the origin off the edge in
/// the direction of motion.
pub fn offset(size: Size2D, slide: SlideDirection, direction: Direction, percent: f64) -> Point2D {
    let (mx, my) = motion(slide);
    let travel = match direction {
        Direction::In => -(1.0 - percent),
        Direction::Out => percent,
    };
    Point2D::new(mx * travel * size.width, my * travel * size.height)
}

pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    frames: Frames<'_>,
    slide: SlideDirection,
    direction: Direction,
    percent: f64,
) {
    let at = offset(surface.size(), slide, direction, percent);
    match direction {
        Direction::In => {
            draw(surface, frames.previous, Placement::ORIGIN);
            draw(surface, Some(frames.next), Placement::at(at.x, at.y));
        }
        Direction::Out => {
            draw(surface, Some(frames.next), Placement::ORIGIN);
            draw(surface, frames.previous, Placement::at(at.x, at.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size2D = Size2D::new(100.0, 50.0);

    #[test]
    fn test_in_starts_off_screen() {
        assert_eq!(offset(SIZE, SlideDirection::Left, Direction::In, 0.0), Point2D::new(100.0, 0.0));
        assert_eq!(offset(SIZE, SlideDirection::Right, Direction::In, 0.0), Point2D::new(-100.0, 0.0));
        assert_eq!(offset(SIZE, SlideDirection::Up, Direction::In, 0.0), Point2D::new(0.0, 50.0));
        assert_eq!(offset(SIZE, SlideDirection::Down, Direction::In, 0.0), Point2D::new(0.0, -50.0));
    }

    #[test]
    fn test_in_ends_at_origin() {
        for slide in SlideDirection::ALL {
            let p = offset(SIZE, slide, Direction::In, 1.0);
            assert_eq!(p.x.abs() + p.y.abs(), 0.0);
        }
    }

    #[test]
    fn test_out_leaves_in_motion_direction() {
        assert_eq!(offset(SIZE, SlideDirection::Left, Direction::Out, 0.5), Point2D::new(-50.0, 0.0));
        assert_eq!(offset(SIZE, SlideDirection::Down, Direction::Out, 1.0), Point2D::new(0.0, 50.0));
    }
}
