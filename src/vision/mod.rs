//! Vision Layer
//!
//! Text-side half of the scanning pipeline: the recognizer contract the
//! external OCR engine fulfills, normalization of its raw output into
//! canonical numeric strings, and matching those strings against the target
//! code list.

pub mod matcher;
pub mod normalize;
pub mod recognizer;

pub use matcher::find_match;
pub use normalize::ConfusionTable;
pub use recognizer::{RecognizedText, TextBlock, TextLine, TextRecognizer};
