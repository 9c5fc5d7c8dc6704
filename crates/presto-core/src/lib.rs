//! # presto-core
//!
//! Core types and primitives for the Presto presentation engine.
//! This crate contains the foundational types shared by the renderer and the CLI:
//! frame buffers, colors, geometry, easing curves, transition descriptors,
//! configuration, content hashing, and error types.

pub mod color;
pub mod config;
pub mod easing;
pub mod error;
pub mod frame;
pub mod hash;
pub mod math;
pub mod transition;

pub use color::Color;
pub use config::PrestoConfig;
pub use easing::{Easing, EasingMode};
pub use error::{PrestoError, PrestoResult};
pub use frame::FrameBuffer;
pub use math::{Point2D, Rect, Size2D};
pub use transition::{Direction, SlideDirection, TransitionKind, TransitionSpec};
