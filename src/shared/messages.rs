//! Messages from the analysis worker to the host's render thread
//!
//! Analysis never touches view state directly; everything the UI needs
//! crosses over as a message so the render thread applies updates on its own
//! schedule.

use crate::analysis::MatchResult;

/// One update produced during frame analysis.
///
/// Per analyzed frame the worker sends zero or more `LineRead` messages, an
/// optional `RecognitionFailed`, and exactly one `Frame`. Dropped frames send
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanUpdate {
    /// A non-empty normalized numeric line was read (diagnostic log feed)
    LineRead(String),
    /// The recognizer failed on this frame; the session continues
    RecognitionFailed(String),
    /// The frame's match outcome. On `Matched` the host is expected to draw
    /// the highlight and play its cue; on `NoMatch` to clear any prior
    /// highlight.
    Frame(MatchResult),
}

impl ScanUpdate {
    /// Whether this update closes out a frame
    pub fn is_frame_result(&self) -> bool {
        matches!(self, Self::Frame(_))
    }
}
