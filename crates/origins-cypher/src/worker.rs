//! Search worker — debounces submissions, dispatches them, reports back.
//!
//! ```text
//! submit ──► Debouncer ──┐
//!                        ├──► dispatch loop ──► tokio::spawn(search) ──► SearchEvent
//! submit_now ────────────┘
//! ```
//!
//! Every dispatched request gets the next sequence number. Requests run
//! concurrently and are never cancelled, so completions may arrive out of
//! order; consumers compare `seq` to decide whether a result set is stale.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use origins_core::{build_query, QueryOptions, ResultSet, SearchError, SearchRequest};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::client::SearchBackend;
use crate::debounce::Debouncer;

#[derive(Debug, Clone)]
pub struct WorkerOptions {
    pub debounce: Duration,
    pub query: QueryOptions,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(200),
            query: QueryOptions::default(),
        }
    }
}

/// Progress reports from the worker.
#[derive(Debug)]
pub enum SearchEvent {
    /// A request left the debouncer and is in flight.
    Started { seq: u64, request: SearchRequest },
    /// A response was decoded.
    Completed(ResultSet),
    /// The request failed. Nothing is retried.
    Failed {
        seq: u64,
        request: SearchRequest,
        error: SearchError,
    },
}

impl SearchEvent {
    pub fn seq(&self) -> u64 {
        match self {
            SearchEvent::Started { seq, .. } | SearchEvent::Failed { seq, .. } => *seq,
            SearchEvent::Completed(set) => set.seq,
        }
    }
}

/// Handle to a running worker. Dropping it does not stop in-flight
/// requests; call [`SearchWorker::shutdown`] to stop accepting new ones.
pub struct SearchWorker {
    debouncer: Debouncer<SearchRequest>,
    immediate: mpsc::UnboundedSender<SearchRequest>,
    cancel: CancellationToken,
    dispatched: Arc<AtomicU64>,
    paginate: Arc<AtomicBool>,
}

impl SearchWorker {
    /// Start the worker on the current tokio runtime.
    pub fn spawn<B: SearchBackend>(
        backend: Arc<B>,
        options: WorkerOptions,
    ) -> (Self, mpsc::UnboundedReceiver<SearchEvent>) {
        let cancel = CancellationToken::new();
        let (dispatch_tx, dispatch_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let dispatched = Arc::new(AtomicU64::new(0));
        let paginate = Arc::new(AtomicBool::new(options.query.paginate));

        let debouncer = Debouncer::spawn(options.debounce, dispatch_tx.clone(), cancel.clone());

        tokio::spawn(dispatch_loop(
            backend,
            options.query,
            dispatch_rx,
            events_tx,
            cancel.clone(),
            dispatched.clone(),
            paginate.clone(),
        ));

        let worker = Self {
            debouncer,
            immediate: dispatch_tx,
            cancel,
            dispatched,
            paginate,
        };
        (worker, events_rx)
    }

    /// Queue a request behind the debounce window.
    pub fn submit(&self, request: SearchRequest) {
        if !self.debouncer.submit(request) {
            tracing::warn!("search worker: debouncer stopped, submission dropped");
        }
    }

    /// Dispatch a request right away, skipping the debounce window.
    pub fn submit_now(&self, request: SearchRequest) {
        if self.immediate.send(request).is_err() {
            tracing::warn!("search worker: dispatch loop stopped, submission dropped");
        }
    }

    /// Switch SKIP/LIMIT on or off for requests dispatched from now on.
    pub fn set_paginate(&self, on: bool) {
        tracing::debug!(on, "search worker: paginate");
        self.paginate.store(on, Ordering::SeqCst);
    }

    /// Number of requests dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::SeqCst)
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn dispatch_loop<B: SearchBackend>(
    backend: Arc<B>,
    options: QueryOptions,
    mut rx: mpsc::UnboundedReceiver<SearchRequest>,
    events: mpsc::UnboundedSender<SearchEvent>,
    cancel: CancellationToken,
    dispatched: Arc<AtomicU64>,
    paginate: Arc<AtomicBool>,
) {
    loop {
        let request = tokio::select! {
            _ = cancel.cancelled() => break,
            msg = rx.recv() => match msg {
                Some(request) => request,
                None => break,
            },
        };

        let seq = dispatched.fetch_add(1, Ordering::SeqCst) + 1;
        let query = build_query(
            &request,
            &QueryOptions {
                paginate: paginate.load(Ordering::SeqCst),
                ..options.clone()
            },
        );
        tracing::debug!(seq, term = ?request.trimmed_term(), page = request.page, "search: dispatch");

        if events
            .send(SearchEvent::Started { seq, request: request.clone() })
            .is_err()
        {
            break;
        }

        let backend = backend.clone();
        let events = events.clone();
        tokio::spawn(async move {
            let event = match backend.search(&query).await {
                Ok(records) => {
                    tracing::debug!(seq, rows = records.len(), "search: completed");
                    SearchEvent::Completed(ResultSet::new(seq, request, records))
                }
                Err(error) => {
                    tracing::warn!(seq, %error, "search: failed");
                    SearchEvent::Failed { seq, request, error }
                }
            };
            let _ = events.send(event);
        });
    }
    tracing::debug!("search worker stopped");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
