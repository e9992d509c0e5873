use serde::{Deserialize, Serialize};

use crate::model::ids::CardId;

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// Editable card row, as it exists before a deck is saved.
///
/// Rows with a blank front or back are dropped when the owning deck draft is
/// validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub id: Option<CardId>,
    pub front: String,
    pub back: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub hint: Option<String>,
}

impl CardDraft {
    #[must_use]
    pub fn text_only(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            ..Self::default()
        }
    }

    /// True when both sides carry non-blank text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.front.trim().is_empty() && !self.back.trim().is_empty()
    }

    /// Turn a complete draft into a card, keeping its id or minting a new one.
    ///
    /// Returns `None` when either side is blank.
    #[must_use]
    pub fn into_card(self) -> Option<Card> {
        if !self.is_complete() {
            return None;
        }
        Some(Card {
            id: self.id.unwrap_or_else(CardId::generate),
            front: self.front.trim().to_owned(),
            back: self.back.trim().to_owned(),
            front_image_url: normalize_optional(self.front_image_url),
            back_image_url: normalize_optional(self.back_image_url),
            hint: normalize_optional(self.hint),
        })
    }
}

impl From<&Card> for CardDraft {
    fn from(card: &Card) -> Self {
        Self {
            id: Some(card.id.clone()),
            front: card.front.clone(),
            back: card.back.clone(),
            front_image_url: card.front_image_url.clone(),
            back_image_url: card.back_image_url.clone(),
            hint: card.hint.clone(),
        }
    }
}

/// A single flashcard. Identity is fixed; content changes through deck edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
