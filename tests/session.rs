//! End-to-end session tests with a scripted recognizer and release-counting
//! frame doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use parcel_scan::{
    FrameGeometry, FrameHandle, MatchResult, Rect, Rotation, ScanConfig, ScanSession, ScanUpdate,
    RecognizedText, TextBlock, TextLine, TextRecognizer, Viewport,
};
use tokio::sync::{mpsc, Semaphore};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("parcel_scan=debug")
        .try_init();
}

/// Frame tagged by its first data byte, counting releases
fn tagged_frame(tag: u8, released: &Arc<AtomicUsize>) -> FrameHandle {
    let counter = released.clone();
    FrameHandle::with_releaser(
        vec![tag; 4],
        FrameGeometry::new(1000, 2000, Rotation::Deg90),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    )
}

/// Recognizer that reads the frame tag back as a numeric line
struct EchoRecognizer;

#[async_trait]
impl TextRecognizer for EchoRecognizer {
    async fn recognize(&self, image: &[u8], _geometry: FrameGeometry) -> Result<RecognizedText> {
        let tag = image[0];
        Ok(RecognizedText::new(vec![TextBlock::new(vec![
            TextLine::new(format!("NO {tag:03}"), Rect::new(100, 100, 300, 200)),
        ])]))
    }
}

/// Recognizer that reports each started frame and waits for a permit before
/// resolving, so tests control exactly when a frame is "in flight"
struct GatedRecognizer {
    started: mpsc::UnboundedSender<u8>,
    gate: Arc<Semaphore>,
}

#[async_trait]
impl TextRecognizer for GatedRecognizer {
    async fn recognize(&self, image: &[u8], _geometry: FrameGeometry) -> Result<RecognizedText> {
        let tag = image[0];
        self.started.send(tag).expect("test listening");
        self.gate.acquire().await.expect("gate open").forget();
        Ok(RecognizedText::new(vec![TextBlock::new(vec![
            TextLine::unlocated(format!("{tag:03}")),
        ])]))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_match_flows_from_frame_to_update() {
    init_tracing();

    let mut config = ScanConfig::default();
    config.codes = vec!["007".to_string()];

    let session =
        ScanSession::start(&config, Arc::new(EchoRecognizer), Viewport::new(1000, 500)).unwrap();

    let released = Arc::new(AtomicUsize::new(0));
    assert!(session.submit_frame(tagged_frame(7, &released)));

    // line log first, then the frame result
    let first = session.updates().recv_timeout(RECV_TIMEOUT).unwrap();
    assert_eq!(first, ScanUpdate::LineRead("0007".to_string()));

    let second = session.updates().recv_timeout(RECV_TIMEOUT).unwrap();
    // rotated 1000x2000 frame shows as 2000x1000 in the 1000x500 viewport:
    // uniform half scale, no offsets
    assert_eq!(
        second,
        ScanUpdate::Frame(MatchResult::Matched {
            code: "007".to_string(),
            region: Some(Rect::new(50, 50, 150, 100)),
        })
    );

    assert_eq!(released.load(Ordering::SeqCst), 1);
    session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_no_match_clears_and_releases() {
    init_tracing();

    let mut config = ScanConfig::default();
    config.codes = vec!["999".to_string()];

    let session =
        ScanSession::start(&config, Arc::new(EchoRecognizer), Viewport::new(1000, 500)).unwrap();

    let released = Arc::new(AtomicUsize::new(0));
    assert!(session.submit_frame(tagged_frame(1, &released)));

    let mut saw_result = false;
    while let Ok(update) = session.updates().recv_timeout(RECV_TIMEOUT) {
        if update.is_frame_result() {
            assert_eq!(update, ScanUpdate::Frame(MatchResult::NoMatch));
            saw_result = true;
            break;
        }
    }
    assert!(saw_result);
    assert_eq!(released.load(Ordering::SeqCst), 1);
    session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_keep_latest_supersedes_queued_frame() {
    init_tracing();

    let gate = Arc::new(Semaphore::new(0));
    let (started_tx, mut started_rx) = mpsc::unbounded_channel();
    let recognizer = Arc::new(GatedRecognizer {
        started: started_tx,
        gate: gate.clone(),
    });

    let session = ScanSession::start(
        &ScanConfig::default(),
        recognizer,
        Viewport::new(1000, 500),
    )
    .unwrap();

    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let third = Arc::new(AtomicUsize::new(0));

    assert!(session.submit_frame(tagged_frame(1, &first)));
    assert_eq!(started_rx.recv().await, Some(1));

    // two frames arrive while the first is in flight; only the newer survives
    assert!(session.submit_frame(tagged_frame(2, &second)));
    assert!(session.submit_frame(tagged_frame(3, &third)));
    assert_eq!(second.load(Ordering::SeqCst), 1);

    gate.add_permits(1);
    assert_eq!(started_rx.recv().await, Some(3));
    gate.add_permits(1);

    // exactly two frames were analyzed, in admission order
    let results: Vec<ScanUpdate> = session
        .updates()
        .iter()
        .filter(|u| u.is_frame_result())
        .take(2)
        .collect();
    assert_eq!(results.len(), 2);

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(third.load(Ordering::SeqCst), 1);
    // the superseded frame was never started
    assert!(started_rx.try_recv().is_err());

    session.shutdown().await;
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_finishes_in_flight_and_drops_pending() {
    init_tracing();

    let gate = Arc::new(Semaphore::new(0));
    let (started_tx, mut started_rx) = mpsc::unbounded_channel();
    let recognizer = Arc::new(GatedRecognizer {
        started: started_tx,
        gate: gate.clone(),
    });

    let session = ScanSession::start(
        &ScanConfig::default(),
        recognizer,
        Viewport::new(1000, 500),
    )
    .unwrap();
    let updates = session.updates().clone();

    let in_flight = Arc::new(AtomicUsize::new(0));
    let pending = Arc::new(AtomicUsize::new(0));

    assert!(session.submit_frame(tagged_frame(1, &in_flight)));
    assert_eq!(started_rx.recv().await, Some(1));
    assert!(session.submit_frame(tagged_frame(2, &pending)));

    let shutdown = tokio::spawn(session.shutdown());

    // the pending frame is dropped by teardown without analysis; the
    // in-flight one runs to completion once the gate opens
    gate.add_permits(1);
    shutdown.await.unwrap();

    assert_eq!(in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(pending.load(Ordering::SeqCst), 1);
    assert!(started_rx.try_recv().is_err());

    // the completed frame still produced its result
    let results: Vec<ScanUpdate> = updates.try_iter().filter(|u| u.is_frame_result()).collect();
    assert_eq!(results, vec![ScanUpdate::Frame(MatchResult::NoMatch)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_start_rejects_zero_viewport() {
    let result = ScanSession::start(
        &ScanConfig::default(),
        Arc::new(EchoRecognizer),
        Viewport::new(0, 500),
    );
    assert!(result.is_err());
}
