pub mod deck;
pub mod prefs;
pub mod profile;
pub mod stats;
pub mod study;

use lumen_core::model::{DeckId, ProfileId};
use services::ProfileStore;
use thiserror::Error;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Failures reported by the command layer itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid --db value: {0}")]
    InvalidDbUrl(String),
    #[error("no active profile; run `lumen profile create <name>` or `lumen profile use <id>`")]
    NoActiveProfile,
    #[error("no profile with id {0}")]
    UnknownProfile(ProfileId),
    #[error("no deck with id {0}")]
    UnknownDeck(DeckId),
    #[error("nothing to import from {0}")]
    EmptyImport(String),
    #[error("invalid card \"{0}\"; expected front,back")]
    InvalidCard(String),
}

pub(crate) fn require_active(store: &ProfileStore) -> Result<(), CliError> {
    if store.active_profile().is_some() {
        Ok(())
    } else {
        Err(CliError::NoActiveProfile)
    }
}
