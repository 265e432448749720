//! Text recognizer interface
//!
//! The OCR engine is an external collaborator. This crate only defines the
//! async contract it must satisfy and the shape of its results: blocks of
//! lines, each line carrying raw text and, when the engine provides one, a
//! bounding box in the same pixel space as the submitted frame.

use anyhow::Result;
use async_trait::async_trait;

use crate::geometry::{FrameGeometry, Rect};

/// One recognized line of text
#[derive(Debug, Clone)]
pub struct TextLine {
    /// Raw text as the engine produced it
    pub text: String,
    /// Bounding box in source-frame pixels, if the engine located one
    pub bounds: Option<Rect>,
}

impl TextLine {
    /// Create a line with a bounding box
    pub fn new(text: impl Into<String>, bounds: Rect) -> Self {
        Self {
            text: text.into(),
            bounds: Some(bounds),
        }
    }

    /// Create a line the engine could not locate visually
    pub fn unlocated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounds: None,
        }
    }
}

/// A block of adjacent lines, as grouped by the engine
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Create a block from its lines
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }
}

/// Full recognition result for one frame.
///
/// Block and line order is whatever the engine returned; this crate treats it
/// as engine-defined and does not re-sort.
#[derive(Debug, Clone, Default)]
pub struct RecognizedText {
    pub blocks: Vec<TextBlock>,
}

impl RecognizedText {
    /// Create a result from its blocks
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// Total number of lines across all blocks
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }
}

/// Asynchronous black-box text recognizer.
///
/// Implementations receive the frame's raw image data plus its geometry (the
/// rotation acts as an orientation hint) and resolve with either recognized
/// text or a failure. A failure is a per-frame event: the analyzer logs it
/// and moves on to the next frame.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in one frame's image data
    async fn recognize(&self, image: &[u8], geometry: FrameGeometry) -> Result<RecognizedText>;
}
