use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::deck::Deck;
use crate::model::ids::{DeckId, ProfileId};
use crate::model::stats::Stats;

/// Avatar assigned when the user does not pick one.
pub const DEFAULT_AVATAR: &str =
    "https://api.dicebear.com/7.x/initials/svg?seed=User&backgroundColor=102218&fontFamily=Lexend";

/// Shortest accepted profile name, in characters.
pub const MIN_NAME_CHARS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("profile name must be at least {MIN_NAME_CHARS} characters")]
    NameTooShort,
}

/// Check a name typed into the onboarding or rename form.
///
/// # Errors
///
/// Returns `ProfileError::NameTooShort` when fewer than two visible characters remain.
pub fn validate_name(name: &str) -> Result<String, ProfileError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_NAME_CHARS {
        return Err(ProfileError::NameTooShort);
    }
    Ok(trimmed.to_owned())
}

/// A local user: their decks and their study statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub decks: Vec<Deck>,
    #[serde(default)]
    pub stats: Stats,
}

impl Profile {
    /// A fresh profile with no decks and zeroed stats.
    #[must_use]
    pub fn new(id: ProfileId, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: avatar.into(),
            decks: Vec::new(),
            stats: Stats::default(),
        }
    }

    #[must_use]
    pub fn deck(&self, id: &DeckId) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id() == id)
    }
}
