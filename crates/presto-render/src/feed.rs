//! Latest-frame snapshots shared between a producer thread and the render loop.

use std::sync::Arc;

use parking_lot::Mutex;
use presto_core::FrameBuffer;

#[derive(Default)]
struct Slot {
    frame: Option<Arc<FrameBuffer>>,
    version: u64,
}

/// Last-writer-wins frame slot.
///
/// A decoder publishes frames from its own thread; the render loop reads the
/// most recent one without waiting for a new frame. Clones share the slot.
#[derive(Clone, Default)]
pub struct LatestFrame {
    slot: Arc<Mutex<Slot>>,
}

impl LatestFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frame. Returns the new version number.
    pub fn publish(&self, frame: FrameBuffer) -> u64 {
        self.publish_shared(Arc::new(frame))
    }

    pub fn publish_shared(&self, frame: Arc<FrameBuffer>) -> u64 {
        let mut slot = self.slot.lock();
        slot.frame = Some(frame);
        slot.version += 1;
        slot.version
    }

    pub fn latest(&self) -> Option<Arc<FrameBuffer>> {
        self.slot.lock().frame.clone()
    }

    /// Number of frames published so far.
    pub fn version(&self) -> u64 {
        self.slot.lock().version
    }

    pub fn clear(&self) {
        self.slot.lock().frame = None;
    }
}

impl std::fmt::Debug for LatestFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("LatestFrame")
            .field("version", &slot.version)
            .field("dimensions", &slot.frame.as_ref().map(|fr| fr.dimensions()))
            .finish()
    }
}
