//! SHA-256 digests of rendered frames.
//!
//! A transition rendered at the same progress must produce identical bytes on
//! every run, so digests are the cheapest way to compare whole sequences.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::frame::FrameBuffer;

/// 32-byte SHA-256 digest of one frame or a frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn digest(&self) -> &[u8; 32] {
        &self.0
    }

    /// First eight hex digits, enough to tell sequences apart in logs.
    pub fn short(&self) -> String {
        self.0[..4].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

/// Incremental digest over frames fed in presentation order.
#[derive(Default)]
pub struct FrameHasher {
    inner: Sha256,
    frames: u64,
}

impl FrameHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: &FrameBuffer) -> &mut Self {
        // Equal bytes at different sizes must not collide.
        self.inner.update(frame.width.to_le_bytes());
        self.inner.update(frame.height.to_le_bytes());
        self.inner.update(&frame.data);
        self.frames += 1;
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn finish(self) -> ContentHash {
        let mut inner = self.inner;
        inner.update(self.frames.to_le_bytes());
        ContentHash(inner.finalize().into())
    }
}

pub fn hash_frame(frame: &FrameBuffer) -> ContentHash {
    let mut hasher = FrameHasher::new();
    hasher.push(frame);
    hasher.finish()
}

pub fn hash_frames(frames: &[FrameBuffer]) -> ContentHash {
    let mut hasher = FrameHasher::new();
    for frame in frames {
        hasher.push(frame);
    }
    hasher.finish()
}
