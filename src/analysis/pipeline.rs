//! Frame admission and the analysis worker
//!
//! The camera produces frames faster than recognition consumes them. The
//! pipeline keeps only the most recent pending frame: a stale queued frame is
//! superseded (and thereby released) the moment a newer one arrives, so the
//! worker always analyzes the current camera view rather than a backlog. One
//! worker task runs analyses serially, which also keeps results in admission
//! order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::capture::FrameHandle;
use crate::shared::ScanUpdate;

use super::FrameAnalyzer;

/// Keep-latest admission queue of depth one.
///
/// `offer` transfers frame ownership to the slot; a superseded frame is
/// dropped immediately, which releases it back to its source. After `close`
/// no further frames are admitted.
pub struct FrameSlot {
    pending: Mutex<Option<FrameHandle>>,
    notify: Notify,
    closed: AtomicBool,
}

impl FrameSlot {
    /// Create an empty open slot
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            notify: Notify::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Offer a frame for analysis.
    ///
    /// Returns false if the slot is closed; the frame is dropped (released)
    /// either way once superseded or refused.
    pub fn offer(&self, frame: FrameHandle) -> bool {
        if self.closed.load(Ordering::Acquire) {
            trace!("slot closed, refusing frame");
            return false;
        }
        let superseded = self.pending.lock().replace(frame);
        if superseded.is_some() {
            trace!("superseding pending frame with a newer one");
        }
        self.notify.notify_one();
        true
    }

    /// Take the pending frame, if any
    fn take(&self) -> Option<FrameHandle> {
        self.pending.lock().take()
    }

    /// Stop admitting frames and drop any not-yet-started pending frame
    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        drop(self.take());
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Serial frame-analysis pipeline.
///
/// Owns the admission slot and the single worker task. Frames submitted while
/// one is under analysis wait in the slot, where a newer submission replaces
/// them; the worker therefore sees at most one frame at a time and never a
/// backlog.
pub struct AnalysisPipeline {
    slot: Arc<FrameSlot>,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl AnalysisPipeline {
    /// Spawn the worker task on the current tokio runtime.
    ///
    /// Reports are forwarded to `updates` as [`ScanUpdate`] messages: each
    /// analyzed frame yields its normalized lines, a failure notice when
    /// recognition failed, and exactly one [`MatchResult`].
    ///
    /// [`MatchResult`]: super::MatchResult
    pub fn spawn(analyzer: FrameAnalyzer, updates: Sender<ScanUpdate>) -> Self {
        let slot = Arc::new(FrameSlot::new());
        let shutdown = CancellationToken::new();
        let worker = tokio::spawn(run_worker(
            slot.clone(),
            analyzer,
            updates,
            shutdown.clone(),
        ));

        Self {
            slot,
            shutdown,
            worker: Some(worker),
        }
    }

    /// Submit a frame under the keep-latest policy.
    ///
    /// Returns false once the pipeline is shutting down.
    pub fn submit(&self, frame: FrameHandle) -> bool {
        self.slot.offer(frame)
    }

    /// Stop admission, let the in-flight analysis finish, and wait for the
    /// worker to exit.
    pub async fn shutdown(mut self) {
        self.slot.close();
        self.shutdown.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
        info!("analysis pipeline stopped");
    }
}

impl Drop for AnalysisPipeline {
    fn drop(&mut self) {
        // shutdown() may never have been awaited; at minimum stop admission
        self.slot.close();
        self.shutdown.cancel();
    }
}

/// Worker loop: take the latest pending frame, analyze it, forward the report
async fn run_worker(
    slot: Arc<FrameSlot>,
    analyzer: FrameAnalyzer,
    updates: Sender<ScanUpdate>,
    shutdown: CancellationToken,
) {
    debug!("analysis worker started");
    loop {
        let frame = loop {
            if let Some(frame) = slot.take() {
                break frame;
            }
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("analysis worker exiting");
                    return;
                }
                _ = slot.notify.notified() => {}
            }
        };

        let report = analyzer.analyze(frame).await;

        let mut delivered = true;
        for line in &report.lines {
            delivered &= updates.send(ScanUpdate::LineRead(line.clone())).is_ok();
        }
        if report.ocr_failed {
            delivered &= updates
                .send(ScanUpdate::RecognitionFailed(
                    "text recognition failed".to_string(),
                ))
                .is_ok();
        }
        delivered &= updates.send(ScanUpdate::Frame(report.result)).is_ok();

        if !delivered {
            // receiver gone, nobody is listening anymore
            debug!("update channel closed, analysis worker exiting");
            return;
        }
    }
}
