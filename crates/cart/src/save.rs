//! The "save cart" contract.
//!
//! The cart model never talks to the commerce backend itself. On commit it
//! hands a [`CommitPayload`] to a [`CartSaver`] supplied by the caller, which
//! owns transport, retries, and user notification.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::model::CommitPayload;

/// Error reported by a [`CartSaver`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SaveError(Box<dyn std::error::Error + Send + Sync>);

impl SaveError {
    /// Wrap any error raised by a save implementation.
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

/// External collaborator that persists a committed cart.
pub trait CartSaver {
    /// Submit the revised line quantities to the backend.
    ///
    /// Zero-quantity lines signal removal.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] if the backend could not accept the payload.
    fn save(
        &self,
        payload: &CommitPayload,
    ) -> impl Future<Output = Result<(), SaveError>>;
}

/// In-memory saver that records every payload it receives.
///
/// Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingSaver {
    saved: Mutex<Vec<CommitPayload>>,
}

impl RecordingSaver {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All payloads saved so far, oldest first.
    #[must_use]
    pub fn saved(&self) -> Vec<CommitPayload> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent payload, if any.
    #[must_use]
    pub fn last(&self) -> Option<CommitPayload> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl CartSaver for RecordingSaver {
    async fn save(&self, payload: &CommitPayload) -> Result<(), SaveError> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload.clone());
        Ok(())
    }
}
