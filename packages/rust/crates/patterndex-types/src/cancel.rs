//! Cooperative stop signal shared between the CLI and long-running scans.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{CorpusError, CorpusResult};

/// Cloneable cancellation flag.
///
/// Raising it does not interrupt anything by itself; scanners and rules poll
/// it between units of work and bail out with `CorpusError::Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a flag in the "running" state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the stop signal.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the stop signal has been raised.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Return `Err(Cancelled)` once the signal is raised.
    pub fn check(&self) -> CorpusResult<()> {
        if self.is_cancelled() {
            return Err(CorpusError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let flag = CancelFlag::new();
        let observer = flag.clone();
        assert!(observer.check().is_ok());
        flag.cancel();
        assert!(observer.is_cancelled());
        assert!(matches!(observer.check(), Err(CorpusError::Cancelled)));
    }
}
