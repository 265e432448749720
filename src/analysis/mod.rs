//! Analysis Layer
//!
//! Orchestrates one frame at a time through recognition, normalization,
//! matching, and coordinate mapping, under a keep-latest admission policy so
//! the pipeline always works on the freshest camera view.

pub mod analyzer;
pub mod pipeline;

pub use analyzer::FrameAnalyzer;
pub use pipeline::AnalysisPipeline;

use crate::geometry::Rect;

/// Outcome of matching one analyzed frame.
///
/// Exactly one is produced per frame that reaches the analyzer; dropped
/// frames produce none at all. `Matched` carries the viewport-space highlight
/// rectangle when the recognizer located the line, and `None` when it could
/// not (the match itself is still reported).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// No target code was found in this frame
    NoMatch,
    /// A target code was found
    Matched {
        /// The matched code, exactly as the caller supplied it
        code: String,
        /// Highlight rectangle in preview viewport coordinates
        region: Option<Rect>,
    },
}

impl MatchResult {
    /// Whether this result carries a match
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

/// Everything the analyzer produced for one frame
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// The per-frame match outcome
    pub result: MatchResult,
    /// Every non-empty normalized numeric line seen, in recognition order up
    /// to and including the matching line
    pub lines: Vec<String>,
    /// Whether the recognizer failed on this frame (absorbed as `NoMatch`)
    pub ocr_failed: bool,
}
