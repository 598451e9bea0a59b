//! Cooperative cancellation for long-running analysis stages.
//!
//! A [`CancellationToken`] is a cheaply clonable handle on a shared flag.
//! Stages call [`CancellationToken::check`] at safe points; once the flag is
//! set every clone observes it and the stage aborts with
//! [`Error::Cancelled`](crate::core::errors::Error::Cancelled) without
//! returning partial results.

use crate::core::errors::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation for every holder of this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(Error::Cancelled)` once cancellation was requested
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
