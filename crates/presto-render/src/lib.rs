//! # presto-render
//!
//! The Presto rendering engine. Composites slide transitions frame by frame:
//! region clipping, the transition effect library, animation timing, and the
//! layer partitioning that keeps video and live clocks out of cached static
//! content.

pub mod animation;
pub mod component;
pub mod feed;
pub mod layer;
pub mod player;
pub mod presentation;
pub mod region;
pub mod sequence;
pub mod surface;
pub mod transition;

pub use animation::{Animator, Clock, IntervalScheduler, ManualClock, Scheduler, SystemClock};
pub use component::{Component, ComponentKind, LiveClock, Picture, SolidFill, VideoFeed};
pub use feed::LatestFrame;
pub use layer::{partition_layers, RenderLayer};
pub use player::TransitionPlayer;
pub use presentation::{Background, PresentationRenderer, Slide};
pub use region::{Mask, Region};
pub use sequence::render_sequence;
pub use surface::{Canvas, CommandRecorder, DrawCommand, Placement, Surface};
pub use transition::{Transition, TransitionDescriptor, TransitionRegistry};
