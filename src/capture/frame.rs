//! Frame ownership and release discipline
//!
//! Camera stacks recycle a small pool of frame buffers; a frame that is never
//! released starves the pool and stalls capture. `FrameHandle` ties the
//! release to `Drop`, so every exit path out of analysis (match, no-match,
//! recognizer failure, panic unwind) returns the buffer exactly once.

use std::fmt;

use parking_lot::Mutex;

use crate::geometry::FrameGeometry;

type Releaser = Box<dyn FnOnce() + Send>;

/// Exclusive ownership token for one camera frame.
///
/// Holds the frame's pixel data and geometry plus an optional releaser hook
/// supplied by the frame source. The releaser runs exactly once, when the
/// handle is dropped.
pub struct FrameHandle {
    data: Vec<u8>,
    geometry: FrameGeometry,
    releaser: Mutex<Option<Releaser>>,
}

impl FrameHandle {
    /// Create a frame with no release hook (the buffer is plain owned memory)
    pub fn new(data: Vec<u8>, geometry: FrameGeometry) -> Self {
        Self {
            data,
            geometry,
            releaser: Mutex::new(None),
        }
    }

    /// Create a frame whose buffer must be returned to the frame source.
    ///
    /// The releaser is invoked when the handle is dropped, on whatever thread
    /// drops it.
    pub fn with_releaser(
        data: Vec<u8>,
        geometry: FrameGeometry,
        releaser: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            data,
            geometry,
            releaser: Mutex::new(Some(Box::new(releaser))),
        }
    }

    /// Raw image data as delivered by the camera stack
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Dimensions and rotation of this frame
    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        if let Some(release) = self.releaser.lock().take() {
            release();
        }
    }
}

impl fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameHandle")
            .field("bytes", &self.data.len())
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}
