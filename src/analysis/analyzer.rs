//! Per-frame analysis
//!
//! One `analyze` call owns one frame from admission to release. Recognition
//! failures never escape this module; they degrade to a `NoMatch` report so
//! the session keeps running on the next frame.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::capture::FrameHandle;
use crate::geometry::{self, Rect, Viewport};
use crate::vision::{matcher, ConfusionTable, TextRecognizer};

use super::{FrameReport, MatchResult};

/// Runs recognition and matching on a single frame at a time.
pub struct FrameAnalyzer {
    recognizer: Arc<dyn TextRecognizer>,
    codes: Vec<String>,
    confusions: ConfusionTable,
    viewport: Viewport,
}

impl FrameAnalyzer {
    /// Create an analyzer for one scanning session.
    ///
    /// The code list and confusion table are fixed for the session; the
    /// viewport describes the preview surface match rectangles are mapped
    /// into.
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        codes: Vec<String>,
        confusions: ConfusionTable,
        viewport: Viewport,
    ) -> Self {
        Self {
            recognizer,
            codes,
            confusions,
            viewport,
        }
    }

    /// Analyze one frame to completion.
    ///
    /// Takes ownership of the frame; it is released (dropped) on every exit
    /// path once recognition and matching finish. Blocks and lines are
    /// visited in engine order and the search stops at the first line
    /// containing a target code.
    pub async fn analyze(&self, frame: FrameHandle) -> FrameReport {
        let geometry = frame.geometry();

        let recognized = match self.recognizer.recognize(frame.data(), geometry).await {
            Ok(text) => text,
            Err(err) => {
                warn!("text recognition failed: {err:#}");
                return FrameReport {
                    result: MatchResult::NoMatch,
                    lines: Vec::new(),
                    ocr_failed: true,
                };
            }
        };

        let mut lines = Vec::new();
        let mut result = MatchResult::NoMatch;

        'blocks: for block in &recognized.blocks {
            for line in &block.lines {
                let numeric = self.confusions.normalize(&line.text);
                if !numeric.is_empty() {
                    lines.push(numeric.clone());
                }

                if let Some(code) = matcher::find_match(&numeric, &self.codes) {
                    debug!("matched code {code} in line {numeric:?}");
                    result = MatchResult::Matched {
                        code: code.to_string(),
                        region: line.bounds.and_then(|b| self.map_bounds(b, geometry)),
                    };
                    break 'blocks;
                }
            }
        }

        FrameReport {
            result,
            lines,
            ocr_failed: false,
        }
    }

    /// Map a matched line's box into viewport space, degrading to no
    /// highlight on bad geometry rather than failing the frame
    fn map_bounds(&self, bounds: Rect, frame: crate::geometry::FrameGeometry) -> Option<Rect> {
        match geometry::map_to_viewport(bounds, frame, self.viewport) {
            Ok(mapped) => Some(mapped),
            Err(err) => {
                warn!("dropping match highlight: {err}");
                None
            }
        }
    }
}
