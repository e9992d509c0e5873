//! Shared error types for the services crate.

use thiserror::Error;

use lumen_core::model::{DeckError, DeckId, PreferencesError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProfileStore`.
///
/// Domain operations on the store are total; only persistence can fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DeckService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeckServiceError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("deck not found: {0}")]
    NotFound(DeckId),
    #[error(transparent)]
    Store(#[from] ProfileStoreError),
}

/// Errors emitted by study sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no cards available for session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error("session is not complete yet")]
    Incomplete,
    #[error(transparent)]
    Store(#[from] ProfileStoreError),
}

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesServiceError {
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Store(#[from] ProfileStoreError),
}
