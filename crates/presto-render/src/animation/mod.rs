//! Animation timing.
//!
//! An [`Animator`] converts elapsed time into an eased percent complete and
//! asks its [`AnimationTarget`] to render. A [`Scheduler`] fires the animator
//! at a fixed tick period; [`play`] wires the two together and holds the
//! target weakly so a torn-down target ends the animation.

pub mod animator;
pub mod clock;
pub mod scheduler;

pub use animator::{play, AnimationHandle, AnimationState, AnimationTarget, Animator, AnimatorPhase};
pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{IntervalScheduler, Scheduler, TickCallback, TickControl, TickHandle};
