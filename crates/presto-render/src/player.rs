//! Live transition playback between slides.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use presto_core::config::DisplayConfig;
use presto_core::{Color, FrameBuffer, TransitionSpec};

use crate::animation::{play, AnimationHandle, AnimationTarget, Animator, Scheduler};
use crate::presentation::{PresentationRenderer, Slide};
use crate::surface::{Canvas, Surface};
use crate::transition::Transition;

/// Composites the outgoing and incoming slides onto an output canvas.
///
/// The incoming slide is re-rendered on every tick so dynamic layers keep
/// moving during the transition. The outgoing slide is frozen at the last
/// frame it rendered.
pub struct TransitionPlayer {
    output: Canvas,
    next: Canvas,
    previous: Option<FrameBuffer>,
    renderer: Option<PresentationRenderer>,
    transition: Transition,
    render_background: bool,
    rendered_current: bool,
    last_percent: f64,
    frames_rendered: u64,
}

impl TransitionPlayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            output: Canvas::new(width, height),
            next: Canvas::new(width, height),
            previous: None,
            renderer: None,
            transition: Transition::swap(),
            render_background: true,
            rendered_current: false,
            last_percent: 0.0,
            frames_rendered: 0,
        }
    }

    pub fn from_config(display: &DisplayConfig) -> Self {
        Self::new(display.width, display.height).with_render_background(display.render_background)
    }

    pub fn with_render_background(mut self, render_background: bool) -> Self {
        self.render_background = render_background;
        self
    }

    /// Switch to `slide`. The current slide's last frame becomes the previous frame.
    pub fn show(&mut self, slide: &Slide, transition: Transition) {
        if self.rendered_current {
            self.previous = Some(self.next.frame().clone());
        }
        tracing::debug!(
            slide = %slide.id,
            transition = transition.kind.id(),
            direction = transition.direction.id(),
            has_previous = self.previous.is_some(),
            "showing slide"
        );
        self.renderer = Some(PresentationRenderer::new(slide));
        self.transition = transition;
        self.rendered_current = false;
        self.last_percent = 0.0;
    }

    /// Render the incoming slide and composite the transition at `percent`.
    pub fn render_tick(&mut self, percent: f64) {
        if !self.output.is_alive() {
            return;
        }
        let Some(renderer) = self.renderer.as_mut() else {
            tracing::warn!("render requested before any slide was shown");
            return;
        };
        self.next.clear(&Color::TRANSPARENT);
        renderer.render_frame(&mut self.next, self.render_background);
        self.rendered_current = true;

        self.output.clear(&Color::TRANSPARENT);
        self.transition
            .render(&mut self.output, self.previous.as_ref(), self.next.frame(), percent);
        self.last_percent = percent;
        self.frames_rendered += 1;
    }

    /// Start an animated transition to `slide` on `scheduler`.
    pub fn begin(
        this: &Rc<RefCell<Self>>,
        slide: &Slide,
        spec: &TransitionSpec,
        tick_period: Duration,
        now: Instant,
        scheduler: &mut dyn Scheduler,
    ) -> AnimationHandle<Self> {
        this.borrow_mut().show(slide, Transition::from_spec(spec));
        let animator = Animator::for_transition(spec).with_tick_period(tick_period);
        play(animator, this, now, scheduler)
    }

    pub fn output(&self) -> &FrameBuffer {
        self.output.frame()
    }

    pub fn previous_frame(&self) -> Option<&FrameBuffer> {
        self.previous.as_ref()
    }

    pub fn current_slide(&self) -> Option<&str> {
        self.renderer.as_ref().map(|r| r.slide_id())
    }

    pub fn last_percent(&self) -> f64 {
        self.last_percent
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Tear down the output. Running animations end on their next tick.
    pub fn shutdown(&mut self) {
        self.output.detach();
    }
}

impl AnimationTarget for TransitionPlayer {
    fn is_alive(&self) -> bool {
        self.output.is_alive()
    }

    fn request_render(&mut self, percent_complete: f64) {
        self.render_tick(percent_complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::SolidFill;
    use presto_core::{Direction, Rect, TransitionKind};

    fn solid_slide(id: &str, color: Color) -> Slide {
        Slide::new(id).with_component(SolidFill::rect("fill", Rect::new(0.0, 0.0, 4.0, 4.0), color))
    }

    #[test]
    fn test_first_slide_has_no_previous() {
        let mut player = TransitionPlayer::new(4, 4);
        player.show(&solid_slide("a", Color::RED), Transition::new(TransitionKind::Fade, Direction::In));
        assert!(player.previous_frame().is_none());
        player.render_tick(1.0);
        assert_eq!(player.output().get_pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_previous_is_last_rendered_frame() {
        let mut player = TransitionPlayer::new(4, 4);
        player.show(&solid_slide("a", Color::RED), Transition::swap());
        player.render_tick(1.0);
        player.show(&solid_slide("b", Color::BLUE), Transition::new(TransitionKind::Fade, Direction::In));
        assert_eq!(player.previous_frame().and_then(|f| f.get_pixel(0, 0)), Some([255, 0, 0, 255]));
        player.render_tick(0.0);
        assert_eq!(player.output().get_pixel(0, 0), Some([255, 0, 0, 255]));
        player.render_tick(1.0);
        assert_eq!(player.output().get_pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(player.current_slide(), Some("b"));
        assert_eq!(player.frames_rendered(), 3);
    }

    #[test]
    fn test_shutdown_stops_rendering() {
        let mut player = TransitionPlayer::new(2, 2);
        player.show(&solid_slide("a", Color::RED), Transition::swap());
        player.shutdown();
        assert!(!player.is_alive());
        player.render_tick(1.0);
        assert_eq!(player.frames_rendered(), 0);
    }
}
