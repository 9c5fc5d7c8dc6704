//! Cross-fade.

use presto_core::Direction;

use super::{draw, Frames};
use crate::surface::{Placement, Surface};

/// `In` fades the next frame up over the previous one. `Out` fades the
/// previous frame away over the next one.
pub fn render<S: Surface + ?Sized>(surface: &mut S, frames: Frames<'_>, direction: Direction, percent: f64) {
    match direction {
        Direction::In => {
            draw(surface, frames.previous, Placement::ORIGIN);
            draw(surface, Some(frames.next), Placement::ORIGIN.with_opacity(percent));
        }
        Direction::Out => {
            draw(surface, Some(frames.next), Placement::ORIGIN);
            draw(surface, frames.previous, Placement::ORIGIN.with_opacity(1.0 - percent));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;
    use presto_core::{Color, FrameBuffer};

    #[test]
    fn test_fade_in_halfway_blends() {
        let prev = FrameBuffer::solid(2, 2, &Color::BLACK);
        let next = FrameBuffer::solid(2, 2, &Color::WHITE);
        let mut canvas = Canvas::new(2, 2);
        render(&mut canvas, Frames::new(Some(&prev), &next), Direction::In, 0.5);
        let px = canvas.frame().get_pixel(0, 0).unwrap_or_default();
        assert!((126..=129).contains(&px[0]), "got {:?}", px);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_fade_out_without_previous_shows_next() {
        let next = FrameBuffer::solid(2, 2, &Color::GREEN);
        let mut canvas = Canvas::new(2, 2);
        render(&mut canvas, Frames::new(None, &next), Direction::Out, 0.0);
        assert_eq!(canvas.frame(), &next);
    }
}
