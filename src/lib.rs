//! parcel-scan - Live camera feed scanning for parcel tracking codes
//!
//! Scans frames from a camera feed for a caller-supplied list of tracking
//! codes. Each frame is handed to an external async OCR engine; recognized
//! lines are normalized (whitespace stripped, confusable letters mapped to
//! digits, non-digits dropped) and tested for substring containment against
//! the code list. The first match per frame is reported together with its
//! bounding box remapped into the preview surface's coordinate space,
//! accounting for sensor rotation and aspect-fit letterboxing.
//!
//! The camera stack, the OCR engine, and all UI belong to the host
//! application. The crate owns the per-frame analysis pipeline: keep-latest
//! frame admission, a single serial worker, release-exactly-once frame
//! lifetime, and message passing of results back to the render thread.
//!
//! # Usage sketch
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use parcel_scan::{ScanConfig, ScanSession, Viewport};
//! # async fn demo(recognizer: Arc<dyn parcel_scan::TextRecognizer>) -> anyhow::Result<()> {
//! let mut config = ScanConfig::default();
//! config.codes = vec!["01212394".to_string()];
//!
//! let session = ScanSession::start(&config, recognizer, Viewport::new(1080, 1920))?;
//! // camera callback: session.submit_frame(frame);
//! // render thread:   for update in session.updates().try_iter() { .. }
//! session.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod capture;
pub mod config;
pub mod geometry;
pub mod session;
pub mod shared;
pub mod vision;

pub use analysis::{AnalysisPipeline, FrameAnalyzer, FrameReport, MatchResult};
pub use capture::FrameHandle;
pub use config::{load_config, save_config, ScanConfig};
pub use geometry::{map_to_viewport, FrameGeometry, GeometryError, Rect, Rotation, Viewport};
pub use session::ScanSession;
pub use shared::{ScanLogBuffer, ScanUpdate};
pub use vision::{ConfusionTable, RecognizedText, TextBlock, TextLine, TextRecognizer};
