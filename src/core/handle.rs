//! Process-lifetime classifier handle with one-shot lazy initialization.

use crate::core::traits::{ClassifierProvider, ImageClassifier};
use crate::core::TagError;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Lazily-initialized, process-lifetime handle to the classifier
/// capability.
///
/// Lifecycle: uninitialized until the first `get_or_load`, loading while
/// the provider runs (concurrent callers block on the same in-flight
/// load instead of triggering their own), then ready for the rest of the
/// process lifetime. There is no unloaded terminal state.
///
/// A failed load leaves the handle uninitialized, so the next call
/// retries the provider.
pub struct ClassifierHandle {
    provider: Box<dyn ClassifierProvider>,
    cell: OnceCell<Arc<dyn ImageClassifier>>,
}

impl ClassifierHandle {
    /// Creates a handle around the given provider. The provider is not
    /// invoked until the first `get_or_load`.
    pub fn new(provider: Box<dyn ClassifierProvider>) -> Self {
        Self {
            provider,
            cell: OnceCell::new(),
        }
    }

    /// Returns the loaded classifier, loading it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the provider's load error; the handle stays
    /// uninitialized so a later call can retry.
    pub fn get_or_load(&self) -> Result<&Arc<dyn ImageClassifier>, TagError> {
        self.cell.get_or_try_init(|| {
            debug!("loading classifier backend");
            let started = Instant::now();
            let classifier = self.provider.load()?;
            info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "classifier backend ready"
            );
            Ok(classifier)
        })
    }

    /// Whether the backend has been loaded.
    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl std::fmt::Debug for ClassifierHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierHandle")
            .field("ready", &self.is_ready())
            .finish()
    }
}
