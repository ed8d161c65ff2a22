//! Request-scoped observability handle.
//!
//! The pipeline never configures logging itself. Callers hand it an
//! [`Observer`], which carries the `tracing` span events are recorded under
//! and a few counters the caller can read back once the request is done.

use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::Span;

/// Observability context threaded through one request.
#[derive(Debug)]
pub struct Observer {
    span: Span,
    attempts: AtomicUsize,
    accepted: AtomicUsize,
    rejected: AtomicUsize,
}

/// Snapshot of an [`Observer`]'s counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObserverStats {
    /// Sampling attempts performed.
    pub attempts: usize,
    /// Candidates that passed every constraint.
    pub accepted: usize,
    /// Candidates rejected by a constraint.
    pub rejected: usize,
}

impl Observer {
    /// Wraps an existing span.
    #[must_use]
    pub fn new(span: Span) -> Self {
        Self {
            span,
            attempts: AtomicUsize::new(0),
            accepted: AtomicUsize::new(0),
            rejected: AtomicUsize::new(0),
        }
    }

    /// Opens an `info` span for one request.
    #[must_use]
    pub fn for_request(kind: &'static str) -> Self {
        Self::new(tracing::info_span!("request", kind))
    }

    /// Observer that records counters but emits under no span.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Span::none())
    }

    /// The request span.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Runs `f` inside the request span.
    pub fn in_scope<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.span.in_scope(f)
    }

    /// Child span for one pipeline stage.
    #[must_use]
    pub fn stage(&self, name: &'static str) -> Span {
        tracing::debug_span!(parent: &self.span, "stage", name)
    }

    /// Records one sampling attempt and its verdict.
    pub fn record_attempt(&self, accepted: bool) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if accepted {
            self.accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Current counter values.
    #[must_use]
    pub fn stats(&self) -> ObserverStats {
        ObserverStats {
            attempts: self.attempts.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::disabled()
    }
}
