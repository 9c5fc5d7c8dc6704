//! Percent-complete state machine.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use presto_core::{Easing, EasingMode, TransitionSpec};

use super::scheduler::{Scheduler, TickControl, TickHandle};

/// Something an [`Animator`] renders into on every tick.
pub trait AnimationTarget {
    /// A target that is no longer alive ends the animation without rendering.
    fn is_alive(&self) -> bool {
        true
    }

    fn request_render(&mut self, percent_complete: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPhase {
    Idle,
    Running,
    Complete,
}

/// Progress of one playback. Created by [`Animator::start`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub start_time: Instant,
    pub duration: Duration,
    /// Eased progress in `[0, 1]`.
    pub percent_complete: f64,
    pub complete: bool,
    /// Set once progress reaches 1; the following tick stops the animator.
    pub last_iteration: bool,
}

/// Drives one playback from `Idle` through `Running` to `Complete`.
///
/// Progress follows elapsed wall-clock time, so a late or dropped tick does
/// not slow the animation down. A completed animator is not restarted.
#[derive(Debug, Clone)]
pub struct Animator {
    duration: Duration,
    easing: Easing,
    mode: EasingMode,
    tick_period: Duration,
    phase: AnimatorPhase,
    state: Option<AnimationState>,
}

impl Animator {
    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(20);

    pub fn new(duration: Duration, easing: Easing, mode: EasingMode) -> Self {
        Self {
            duration,
            easing,
            mode,
            tick_period: Self::DEFAULT_TICK_PERIOD,
            phase: AnimatorPhase::Idle,
            state: None,
        }
    }

    /// Animator for `spec`: its duration, easing and the direction's easing mode.
    pub fn for_transition(spec: &TransitionSpec) -> Self {
        Self::new(spec.duration(), spec.easing, spec.easing_mode())
    }

    /// Tick period used when the animator is played on a scheduler. Minimum 1ms.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period.max(Duration::from_millis(1));
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    pub fn state(&self) -> Option<&AnimationState> {
        self.state.as_ref()
    }

    pub fn percent_complete(&self) -> f64 {
        self.state.map_or(0.0, |s| s.percent_complete)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == AnimatorPhase::Complete
    }

    /// Begin playback at `now`. Returns `false` if already started.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.phase != AnimatorPhase::Idle {
            tracing::warn!(phase = ?self.phase, "animator already started");
            return false;
        }
        self.state = Some(AnimationState {
            start_time: now,
            duration: self.duration,
            percent_complete: 0.0,
            complete: false,
            last_iteration: false,
        });
        self.phase = AnimatorPhase::Running;
        tracing::debug!(duration_ms = self.duration.as_millis() as u64, easing = self.easing.id(), "animation started");
        true
    }

    /// Advance to `now` and ask `target` to render the new progress.
    pub fn tick(&mut self, now: Instant, target: &mut dyn AnimationTarget) -> TickControl {
        if self.phase != AnimatorPhase::Running {
            return TickControl::Stop;
        }
        if !target.is_alive() {
            tracing::debug!("animation target torn down, stopping");
            self.stop(target);
            return TickControl::Stop;
        }
        let Some(state) = self.state.as_mut() else {
            self.phase = AnimatorPhase::Complete;
            return TickControl::Stop;
        };

        if state.last_iteration {
            self.stop(target);
            return TickControl::Stop;
        }
        if state.duration.is_zero() {
            state.percent_complete = 1.0;
            state.last_iteration = true;
            self.stop(target);
            return TickControl::Stop;
        }

        let elapsed = now.saturating_duration_since(state.start_time);
        if elapsed >= state.duration {
            state.percent_complete = 1.0;
            state.last_iteration = true;
        } else {
            let t = elapsed.as_secs_f64() / state.duration.as_secs_f64();
            state.percent_complete = self.easing.curve(t, self.mode).clamp(0.0, 1.0);
        }

        let percent = state.percent_complete;
        tracing::trace!(percent, "animation tick");
        target.request_render(percent);
        TickControl::Continue
    }

    /// Force completion. Safe to call repeatedly; only the first call renders,
    /// and only if the target is still alive.
    pub fn stop(&mut self, target: &mut dyn AnimationTarget) {
        if !self.finish() {
            return;
        }
        if target.is_alive() {
            target.request_render(1.0);
        }
    }

    /// Mark complete at 100% without rendering. Returns `false` if already complete.
    fn finish(&mut self) -> bool {
        if self.phase == AnimatorPhase::Complete {
            return false;
        }
        let duration = self.duration;
        let state = self.state.get_or_insert_with(|| AnimationState {
            start_time: Instant::now(),
            duration,
            percent_complete: 0.0,
            complete: false,
            last_iteration: false,
        });
        state.percent_complete = 1.0;
        state.complete = true;
        state.last_iteration = true;
        self.phase = AnimatorPhase::Complete;
        tracing::debug!("animation complete");
        true
    }
}

/// A playing animation registered on a [`Scheduler`].
pub struct AnimationHandle<T: AnimationTarget + 'static> {
    animator: Rc<RefCell<Animator>>,
    target: Weak<RefCell<T>>,
    tick: TickHandle,
}

impl<T: AnimationTarget + 'static> AnimationHandle<T> {
    pub fn percent_complete(&self) -> f64 {
        self.animator.borrow().percent_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.animator.borrow().is_complete()
    }

    pub fn tick_handle(&self) -> TickHandle {
        self.tick
    }

    /// Cancel the tick and finish the animation.
    pub fn stop(&self, scheduler: &mut dyn Scheduler) {
        scheduler.cancel(self.tick);
        let mut animator = self.animator.borrow_mut();
        match self.target.upgrade() {
            Some(target) => animator.stop(&mut *target.borrow_mut()),
            None => {
                animator.finish();
            }
        }
    }
}

/// Start `animator` at `now` and register its ticks on `scheduler`.
///
/// The target is held weakly: once it is dropped the next tick completes the
/// animation and unregisters it.
pub fn play<T: AnimationTarget + 'static>(
    mut animator: Animator,
    target: &Rc<RefCell<T>>,
    now: Instant,
    scheduler: &mut dyn Scheduler,
) -> AnimationHandle<T> {
    animator.start(now);
    let period = animator.tick_period();
    let animator = Rc::new(RefCell::new(animator));
    let weak = Rc::downgrade(target);

    let tick_animator = Rc::clone(&animator);
    let tick_target = weak.clone();
    let tick = scheduler.schedule_repeating(
        period,
        Box::new(move |now| {
            let Ok(mut animator) = tick_animator.try_borrow_mut() else {
                return TickControl::Continue;
            };
            match tick_target.upgrade() {
                Some(target) => match target.try_borrow_mut() {
                    Ok(mut target) => animator.tick(now, &mut *target),
                    Err(_) => {
                        tracing::trace!("animation target busy, skipping tick");
                        TickControl::Continue
                    }
                },
                None => {
                    tracing::debug!("animation target dropped, stopping");
                    animator.finish();
                    TickControl::Stop
                }
            }
        }),
    );

    AnimationHandle {
        animator,
        target: weak,
        tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        renders: Vec<f64>,
        dead: bool,
    }

    impl AnimationTarget for Recorder {
        fn is_alive(&self) -> bool {
            !self.dead
        }

        fn request_render(&mut self, percent_complete: f64) {
            self.renders.push(percent_complete);
        }
    }

    fn linear(ms: u64) -> Animator {
        Animator::new(Duration::from_millis(ms), Easing::Linear, EasingMode::In)
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let mut a = linear(0);
        let mut target = Recorder::default();
        let t0 = Instant::now();
        a.start(t0);
        assert_eq!(a.tick(t0, &mut target), TickControl::Stop);
        assert!(a.is_complete());
        assert_eq!(a.percent_complete(), 1.0);
        assert_eq!(target.renders, vec![1.0]);
    }

    #[test]
    fn test_halfway_is_between() {
        let mut a = linear(100);
        let mut target = Recorder::default();
        let t0 = Instant::now();
        a.start(t0);
        assert_eq!(a.tick(t0 + Duration::from_millis(50), &mut target), TickControl::Continue);
        let p = a.percent_complete();
        assert!(p > 0.0 && p < 1.0);
        assert!((p - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_last_iteration_then_stop() {
        let mut a = linear(100);
        let mut target = Recorder::default();
        let t0 = Instant::now();
        a.start(t0);
        assert_eq!(a.tick(t0 + Duration::from_millis(150), &mut target), TickControl::Continue);
        assert_eq!(a.percent_complete(), 1.0);
        assert!(a.state().is_some_and(|s| s.last_iteration));
        assert!(!a.is_complete());
        assert_eq!(a.tick(t0 + Duration::from_millis(170), &mut target), TickControl::Stop);
        assert!(a.is_complete());
        assert_eq!(target.renders, vec![1.0, 1.0]);
    }

    #[test]
    fn test_stop_early_forces_completion_once() {
        let mut a = linear(1000);
        let mut target = Recorder::default();
        a.start(Instant::now());
        a.stop(&mut target);
        a.stop(&mut target);
        assert!(a.is_complete());
        assert_eq!(a.percent_complete(), 1.0);
        assert!(a.state().is_some_and(|s| s.complete));
        assert_eq!(target.renders, vec![1.0]);
    }

    #[test]
    fn test_dead_target_stops_without_render() {
        let mut a = linear(100);
        let mut target = Recorder {
            dead: true,
            ..Default::default()
        };
        let t0 = Instant::now();
        a.start(t0);
        assert_eq!(a.tick(t0, &mut target), TickControl::Stop);
        assert!(a.is_complete());
        assert!(target.renders.is_empty());
    }

    #[test]
    fn test_easing_mode_applies() {
        let mut a = Animator::new(Duration::from_millis(100), Easing::Quadratic, EasingMode::In);
        let mut target = Recorder::default();
        let t0 = Instant::now();
        a.start(t0);
        a.tick(t0 + Duration::from_millis(50), &mut target);
        assert!((a.percent_complete() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_tick_before_start_and_restart() {
        let mut a = linear(10);
        let mut target = Recorder::default();
        assert_eq!(a.tick(Instant::now(), &mut target), TickControl::Stop);
        assert!(a.start(Instant::now()));
        assert!(!a.start(Instant::now()));
        assert_eq!(a.phase(), AnimatorPhase::Running);
    }

    #[test]
    fn test_tick_period_floor() {
        assert_eq!(linear(10).with_tick_period(Duration::ZERO).tick_period(), Duration::from_millis(1));
    }
}
