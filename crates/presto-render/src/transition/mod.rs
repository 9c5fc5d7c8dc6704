//! Transition effects.
//!
//! A [`Transition`] composites the previous and next slide frames onto a
//! [`Surface`] for a given percent complete. Rendering is stateless: the
//! same inputs always produce the same pixels, and every clip pushed during
//! a render is popped before it returns.
//!
//! Direction decides which frame animates. `In` animates the next frame
//! over a fixed previous frame; `Out` animates the previous frame away from
//! a fixed next frame.

pub mod blinds;
pub mod circular;
pub mod fade;
pub mod push;
pub mod registry;
pub mod split;
pub mod swipe;
pub mod zoom;

use presto_core::{Direction, FrameBuffer, TransitionKind, TransitionSpec};

use crate::region::Region;
use crate::surface::{clip, Placement, Surface};

pub use registry::{TransitionDescriptor, TransitionRegistry};

/// The two frames a transition blends. A missing previous frame draws nothing.
#[derive(Debug, Clone, Copy)]
pub struct Frames<'a> {
    pub previous: Option<&'a FrameBuffer>,
    pub next: &'a FrameBuffer,
}

impl<'a> Frames<'a> {
    pub fn new(previous: Option<&'a FrameBuffer>, next: &'a FrameBuffer) -> Self {
        Self { previous, next }
    }
}

/// Split of the surface into the pixels showing each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub previous: Region,
    pub next: Region,
}

/// A transition effect: kind, direction and the blind count for blinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub kind: TransitionKind,
    pub direction: Direction,
    pub blind_count: u32,
}

impl Transition {
    pub fn new(kind: TransitionKind, direction: Direction) -> Self {
        Self {
            kind,
            direction,
            blind_count: presto_core::transition::DEFAULT_BLIND_COUNT,
        }
    }

    pub fn swap() -> Self {
        Self::new(TransitionKind::Swap, Direction::In)
    }

    pub fn from_spec(spec: &TransitionSpec) -> Self {
        Self::new(spec.kind, spec.direction).with_blind_count(spec.blind_count)
    }

    pub fn with_blind_count(mut self, count: u32) -> Self {
        self.blind_count = count.max(1);
        self
    }

    /// Composite `frames` onto `surface` at `percent` complete.
    ///
    /// `percent` is clamped to `[0, 1]`; NaN is treated as 0.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        previous: Option<&FrameBuffer>,
        next: &FrameBuffer,
        percent: f64,
    ) {
        let percent = clamp_percent(percent);
        let frames = Frames::new(previous, next);
        let depth = surface.clip_depth();

        match self.kind {
            TransitionKind::Swap => surface.replace(next),
            TransitionKind::Fade => fade::render(surface, frames, self.direction, percent),
            TransitionKind::Push(slide) => {
                push::render(surface, frames, slide, self.direction, percent)
            }
            TransitionKind::Swipe(slide) => {
                let partition = swipe::partition(surface.bounds(), slide, percent);
                render_partition(surface, frames, self.direction, &partition);
            }
            TransitionKind::HorizontalSplitExpand
            | TransitionKind::HorizontalSplitCollapse
            | TransitionKind::VerticalSplitExpand
            | TransitionKind::VerticalSplitCollapse => {
                let partition = split::partition(surface.bounds(), self.kind, percent);
                render_partition(surface, frames, self.direction, &partition);
            }
            TransitionKind::CircularExpand | TransitionKind::CircularCollapse => {
                let partition = circular::partition(surface.bounds(), self.kind, percent);
                render_partition(surface, frames, self.direction, &partition);
            }
            TransitionKind::ZoomIn | TransitionKind::ZoomOut => zoom::render(
                surface,
                frames,
                self.kind == TransitionKind::ZoomIn,
                self.direction,
                percent,
            ),
            TransitionKind::HorizontalBlinds | TransitionKind::VerticalBlinds => {
                let partition = blinds::partition(
                    surface.bounds(),
                    self.blind_count,
                    self.kind == TransitionKind::VerticalBlinds,
                    percent,
                );
                render_partition(surface, frames, self.direction, &partition);
            }
        }

        debug_assert_eq!(surface.clip_depth(), depth, "transition leaked a clip");
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::swap()
    }
}

impl From<&TransitionSpec> for Transition {
    fn from(spec: &TransitionSpec) -> Self {
        Self::from_spec(spec)
    }
}

pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 1.0)
    }
}

pub(crate) fn draw<S: Surface + ?Sized>(surface: &mut S, frame: Option<&FrameBuffer>, placement: Placement) {
    if let Some(frame) = frame {
        surface.draw_image(frame, placement);
    }
}

pub(crate) fn draw_clipped<S: Surface + ?Sized>(
    surface: &mut S,
    frame: Option<&FrameBuffer>,
    region: &Region,
    placement: Placement,
) {
    let Some(frame) = frame else {
        return;
    };
    if region.is_empty() {
        return;
    }
    let mut clipped = clip(surface, region);
    clipped.draw_image(frame, placement);
}

/// `In`: previous whole, next through its region. `Out`: next whole,
/// previous through its region.
pub(crate) fn render_partition<S: Surface + ?Sized>(
    surface: &mut S,
    frames: Frames<'_>,
    direction: Direction,
    partition: &Partition,
) {
    match direction {
        Direction::In => {
            draw(surface, frames.previous, Placement::ORIGIN);
            draw_clipped(surface, Some(frames.next), &partition.next, Placement::ORIGIN);
        }
        Direction::Out => {
            draw(surface, Some(frames.next), Placement::ORIGIN);
            draw_clipped(surface, frames.previous, &partition.previous, Placement::ORIGIN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Canvas, CommandRecorder};
    use presto_core::{Color, SlideDirection};

    #[test]
    fn test_percent_is_clamped() {
        assert_eq!(clamp_percent(-0.5), 0.0);
        assert_eq!(clamp_percent(1.5), 1.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(0.25), 0.25);
    }

    #[test]
    fn test_out_of_range_percent_matches_endpoint() {
        let prev = FrameBuffer::solid(8, 8, &Color::RED);
        let next = FrameBuffer::solid(8, 8, &Color::BLUE);
        let t = Transition::new(TransitionKind::Swipe(SlideDirection::Left), Direction::In);

        let mut a = Canvas::new(8, 8);
        t.render(&mut a, Some(&prev), &next, 7.0);
        let mut b = Canvas::new(8, 8);
        t.render(&mut b, Some(&prev), &next, 1.0);
        assert_eq!(a.frame(), b.frame());
    }

    #[test]
    fn test_swap_replaces() {
        let next = FrameBuffer::solid(3, 3, &Color::GREEN);
        let mut canvas = Canvas::from_frame(FrameBuffer::solid(3, 3, &Color::RED));
        Transition::swap().render(&mut canvas, None, &next, 0.0);
        assert_eq!(canvas.frame(), &next);
    }

    #[test]
    fn test_missing_previous_is_skipped() {
        let next = FrameBuffer::solid(4, 4, &Color::BLUE);
        let mut rec = CommandRecorder::new(4, 4);
        Transition::new(TransitionKind::CircularExpand, Direction::Out).render(&mut rec, None, &next, 0.5);
        assert_eq!(rec.draw_count(), 1);
        assert!(rec.is_balanced());
    }

    #[test]
    fn test_blind_count_floor() {
        let t = Transition::new(TransitionKind::HorizontalBlinds, Direction::In).with_blind_count(0);
        assert_eq!(t.blind_count, 1);
    }

    #[test]
    fn test_from_spec_carries_blinds() {
        let spec = TransitionSpec::new(
            TransitionKind::VerticalBlinds,
            Direction::Out,
            300,
            presto_core::Easing::Linear,
        )
        .with_blind_count(5);
        let t = Transition::from(&spec);
        assert_eq!(t.kind, TransitionKind::VerticalBlinds);
        assert_eq!(t.direction, Direction::Out);
        assert_eq!(t.blind_count, 5);
    }
}
