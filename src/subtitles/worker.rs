//! Background caption loading
//!
//! Processes load requests on a dedicated thread and sends results back via
//! channels. Every result carries the generation of its request so the
//! controller can discard loads that were superseded while in flight.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::segment::SegmentList;
use super::source::SubtitleSource;
use crate::player::LoadRequest;

/// Result of a background load operation
#[derive(Debug)]
pub struct LoadResult {
    /// Generation of the request that produced this result
    pub generation: u64,
    /// The media id that was requested
    pub media_id: String,
    /// Loaded segments (empty when retrieval failed)
    pub segments: SegmentList,
}

/// Background worker loop that processes load requests.
///
/// Receives requests from `request_rx`, loads each through `source`, and
/// sends a `LoadResult` back via `result_tx`. Exits when the request channel
/// is closed (all senders dropped).
pub fn worker_loop<S: SubtitleSource>(
    source: S,
    request_rx: Receiver<LoadRequest>,
    result_tx: Sender<LoadResult>,
) {
    while let Ok(request) = request_rx.recv() {
        let segments = source.load(&request.media_id);
        // Ignore send errors (main thread may have exited)
        let _ = result_tx.send(LoadResult {
            generation: request.generation,
            media_id: request.media_id,
            segments,
        });
    }
}

/// Owns the loader thread and both ends of its channels.
pub struct SubtitleLoader {
    request_tx: Option<Sender<LoadRequest>>,
    result_rx: Receiver<LoadResult>,
    handle: Option<JoinHandle<()>>,
}

impl SubtitleLoader {
    /// Spawn the worker thread for `source`.
    pub fn spawn<S: SubtitleSource + 'static>(source: S) -> Self {
        let (request_tx, request_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("caption-loader".to_string())
            .spawn(move || worker_loop(source, request_rx, result_tx))
            .ok();

        if handle.is_none() {
            tracing::warn!("failed to spawn caption loader thread");
        }

        Self {
            request_tx: Some(request_tx),
            result_rx,
            handle,
        }
    }

    /// Queue a request. Returns false if the worker is gone.
    pub fn request(&self, request: LoadRequest) -> bool {
        match &self.request_tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        }
    }

    /// Take a finished result without blocking.
    pub fn try_recv(&self) -> Option<LoadResult> {
        self.result_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoadResult> {
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for SubtitleLoader {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.request_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
