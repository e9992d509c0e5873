use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::card::{normalize_optional, Card, CardDraft};
use crate::model::ids::DeckId;

/// Cover image used when a deck is created without one.
pub const DEFAULT_DECK_IMAGE: &str =
    "https://images.unsplash.com/photo-1513258496099-48168024aec0?auto=format&fit=crop&q=80&w=400";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    /// Name and/or category are blank. Both flags are reported at once so a
    /// form can highlight every missing field.
    #[error("deck is missing required fields (name: {name}, category: {category})")]
    MissingDetails { name: bool, category: bool },

    #[error("deck needs at least one card with a front and a back")]
    NoCards,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Order in which a deck's cards are presented during study.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    #[default]
    Sequential,
    Random,
}

impl StudyMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StudyMode::Sequential => "sequential",
            StudyMode::Random => "random",
        }
    }
}

impl std::str::FromStr for StudyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sequential" => Ok(StudyMode::Sequential),
            "random" => Ok(StudyMode::Random),
            other => Err(format!("unknown study mode: {other}")),
        }
    }
}

/// Highlight colour assigned to a deck when it is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Blue,
    Red,
    Green,
    Yellow,
}

impl AccentColor {
    pub const ALL: [AccentColor; 4] = [
        AccentColor::Blue,
        AccentColor::Red,
        AccentColor::Green,
        AccentColor::Yellow,
    ];

    /// Picks a colour by index, wrapping around the palette.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// A named collection of flashcards with aggregate mastery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    id: DeckId,
    name: String,
    category: String,
    #[serde(default)]
    mastery: u8,
    #[serde(default)]
    last_reviewed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default)]
    accent_color: AccentColor,
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(default)]
    study_mode: StudyMode,
}

impl Deck {
    // Accessors
    #[must_use]
    pub fn id(&self) -> &DeckId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Percentage (0..=100) of cards known in the last completed session.
    #[must_use]
    pub fn mastery(&self) -> u8 {
        self.mastery
    }

    /// Date of the last completed session, `None` for a deck never studied.
    #[must_use]
    pub fn last_reviewed(&self) -> Option<NaiveDate> {
        self.last_reviewed
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub fn accent_color(&self) -> AccentColor {
        self.accent_color
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn study_mode(&self) -> StudyMode {
        self.study_mode
    }

    /// Record the outcome of a completed session on this deck.
    pub(crate) fn record_session(&mut self, mastery: u8, today: NaiveDate) {
        self.mastery = mastery.min(100);
        self.last_reviewed = Some(today);
    }
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Form state for creating or editing a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckDraft {
    pub name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub study_mode: StudyMode,
    pub cards: Vec<CardDraft>,
}

impl DeckDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            image_url: Some(DEFAULT_DECK_IMAGE.to_owned()),
            study_mode: StudyMode::Sequential,
            cards: vec![CardDraft::default()],
        }
    }

    /// Replace the card rows wholesale.
    ///
    /// An empty list leaves the current rows untouched.
    pub fn replace_cards(&mut self, cards: Vec<CardDraft>) -> bool {
        if cards.is_empty() {
            return false;
        }
        self.cards = cards;
        true
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::MissingDetails` if name or category is blank, and
    /// `DeckError::NoCards` if no row has both a front and a back.
    pub fn validate(self) -> Result<ValidatedDeck, DeckError> {
        let name = self.name.trim().to_owned();
        let category = self.category.trim().to_owned();
        if name.is_empty() || category.is_empty() {
            return Err(DeckError::MissingDetails {
                name: name.is_empty(),
                category: category.is_empty(),
            });
        }

        let cards: Vec<Card> = self
            .cards
            .into_iter()
            .filter_map(CardDraft::into_card)
            .collect();
        if cards.is_empty() {
            return Err(DeckError::NoCards);
        }

        Ok(ValidatedDeck {
            name,
            category,
            image_url: normalize_optional(self.image_url),
            study_mode: self.study_mode,
            cards,
        })
    }
}

impl From<&Deck> for DeckDraft {
    fn from(deck: &Deck) -> Self {
        Self {
            name: deck.name.clone(),
            category: deck.category.clone(),
            image_url: deck.image_url.clone(),
            study_mode: deck.study_mode,
            cards: deck.cards.iter().map(CardDraft::from).collect(),
        }
    }
}

/// A draft that passed validation and can become a `Deck`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDeck {
    pub name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub study_mode: StudyMode,
    pub cards: Vec<Card>,
}

impl ValidatedDeck {
    /// Build a brand-new deck: no mastery, never reviewed.
    #[must_use]
    pub fn into_new_deck(self, id: DeckId, accent_color: AccentColor) -> Deck {
        Deck {
            id,
            name: self.name,
            category: self.category,
            mastery: 0,
            last_reviewed: None,
            image_url: self.image_url,
            accent_color,
            cards: self.cards,
            study_mode: self.study_mode,
        }
    }

    /// Apply edits to an existing deck, keeping its identity and progress.
    #[must_use]
    pub fn apply_to(self, existing: &Deck) -> Deck {
        Deck {
            id: existing.id.clone(),
            name: self.name,
            category: self.category,
            mastery: existing.mastery,
            last_reviewed: existing.last_reviewed,
            image_url: self.image_url,
            accent_color: existing.accent_color,
            cards: self.cards,
            study_mode: self.study_mode,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
