use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{AnalysisError, Result};

/// Hands out submissions; only the most recent one is allowed to deliver a result.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    latest: Arc<AtomicU64>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new image. Every earlier submission becomes stale.
    pub fn submit(&self) -> Submission {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Submission {
            id,
            latest: Arc::clone(&self.latest),
        }
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl Submission {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self) -> bool {
        self.latest() == self.id
    }

    pub fn ensure_current(&self) -> Result<()> {
        if self.is_current() {
            Ok(())
        } else {
            Err(AnalysisError::Superseded { id: self.id })
        }
    }
}
