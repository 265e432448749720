//! Scanning session lifecycle
//!
//! Ties the pieces together for the host application: validates the
//! configuration and preview geometry once at start, runs the analysis
//! pipeline for the session's lifetime, and tears everything down in order
//! (stop admission, finish the in-flight frame, stop the worker).

use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use crossbeam_channel::Receiver;
use tracing::info;

use crate::analysis::{AnalysisPipeline, FrameAnalyzer};
use crate::capture::FrameHandle;
use crate::config::ScanConfig;
use crate::geometry::Viewport;
use crate::shared::ScanUpdate;
use crate::vision::TextRecognizer;

/// One live scanning session.
///
/// Created on a tokio runtime; the host feeds it frames from its camera
/// callback and drains [`ScanUpdate`] messages on its render thread. The code
/// list is fixed once the session starts.
pub struct ScanSession {
    pipeline: AnalysisPipeline,
    updates: Receiver<ScanUpdate>,
}

impl ScanSession {
    /// Start a session.
    ///
    /// Fails fast when the preview viewport is degenerate or the configured
    /// confusion overrides are malformed; a session that cannot analyze
    /// correctly never starts. Must be called from within a tokio runtime.
    pub fn start(
        config: &ScanConfig,
        recognizer: Arc<dyn TextRecognizer>,
        viewport: Viewport,
    ) -> Result<Self> {
        ensure!(
            viewport.width > 0 && viewport.height > 0,
            "preview viewport has zero area ({}x{})",
            viewport.width,
            viewport.height
        );
        let confusions = config
            .confusion_table()
            .context("invalid confusion overrides")?;

        info!(
            "starting scan session: {} target codes, viewport {}x{}",
            config.codes.len(),
            viewport.width,
            viewport.height
        );

        let (updates_tx, updates_rx) = crossbeam_channel::unbounded();
        let analyzer = FrameAnalyzer::new(recognizer, config.codes.clone(), confusions, viewport);
        let pipeline = AnalysisPipeline::spawn(analyzer, updates_tx);

        Ok(Self {
            pipeline,
            updates: updates_rx,
        })
    }

    /// Submit a frame from the camera callback.
    ///
    /// Non-blocking; under the keep-latest policy the frame may supersede a
    /// pending one or be dropped itself later. Returns false once the session
    /// is shutting down (the frame is released either way).
    pub fn submit_frame(&self, frame: FrameHandle) -> bool {
        self.pipeline.submit(frame)
    }

    /// Receiver the host drains on its render thread
    pub fn updates(&self) -> &Receiver<ScanUpdate> {
        &self.updates
    }

    /// Stop the session: no more frames are admitted, the in-flight analysis
    /// finishes and releases its frame, then the worker exits.
    pub async fn shutdown(self) {
        self.pipeline.shutdown().await;
        info!("scan session stopped");
    }
}
