//! Cooperative cancellation for in-flight classification calls.

use crate::core::TagError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation flag shared between a caller and an in-flight
/// classification call.
///
/// Cancellation is cooperative: the orchestrator checks the token
/// between pipeline stages and aborts with `TagError::Cancelled` once it
/// is set. Variant inference that is already running is joined, not
/// forcibly aborted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Stage boundary check used by the orchestrator.
    pub(crate) fn check(&self) -> Result<(), TagError> {
        if self.is_cancelled() {
            Err(TagError::Cancelled)
        } else {
            Ok(())
        }
    }
}
