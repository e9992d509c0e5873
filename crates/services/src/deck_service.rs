use rand::Rng;

use lumen_core::model::{AccentColor, Deck, DeckDraft, DeckId};
use lumen_core::transfer::{export_cards, export_file_name, import_cards};

use crate::error::DeckServiceError;
use crate::profile_store::ProfileStore;

/// Text file produced when exporting a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckExport {
    pub file_name: String,
    pub contents: String,
}

/// Orchestrates deck creation, editing and card transfer for the active profile.
#[derive(Clone, Default)]
pub struct DeckService;

impl DeckService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a draft and add it to the active profile as a new deck.
    ///
    /// Returns `Ok(None)` when there is no active profile.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Deck` for validation failures (nothing is saved).
    /// Returns `DeckServiceError::Store` if persistence fails.
    pub async fn create_deck(
        &self,
        store: &mut ProfileStore,
        draft: DeckDraft,
    ) -> Result<Option<Deck>, DeckServiceError> {
        let validated = draft.validate()?;
        let accent = AccentColor::from_index(rand::rng().random_range(0..AccentColor::ALL.len()));
        let deck = validated.into_new_deck(DeckId::generate(), accent);
        if store.add_deck(deck.clone()).await? {
            log::debug!("created deck {} with {} card(s)", deck.id(), deck.card_count());
            Ok(Some(deck))
        } else {
            Ok(None)
        }
    }

    /// Load an existing deck into an editable draft.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::NotFound` if the active profile has no such deck.
    pub fn draft_for(&self, store: &ProfileStore, id: &DeckId) -> Result<DeckDraft, DeckServiceError> {
        store
            .deck(id)
            .map(DeckDraft::from)
            .ok_or_else(|| DeckServiceError::NotFound(id.clone()))
    }

    /// Save an edited draft over the deck with the given id.
    ///
    /// Mastery, last-reviewed date, accent colour and existing card ids are kept.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::NotFound` if the deck is missing,
    /// `DeckServiceError::Deck` if validation fails, or
    /// `DeckServiceError::Store` if persistence fails.
    pub async fn save_edit(
        &self,
        store: &mut ProfileStore,
        id: &DeckId,
        draft: DeckDraft,
    ) -> Result<Deck, DeckServiceError> {
        let existing = store
            .deck(id)
            .ok_or_else(|| DeckServiceError::NotFound(id.clone()))?;
        let updated = draft.validate()?.apply_to(existing);
        store.update_deck(updated.clone()).await?;
        Ok(updated)
    }

    /// Replace the draft's card rows with those parsed from `front,back` text.
    ///
    /// Returns how many rows were imported; zero leaves the draft untouched.
    pub fn import_into(&self, draft: &mut DeckDraft, text: &str) -> usize {
        let cards = import_cards(text);
        let count = cards.len();
        if draft.replace_cards(cards) {
            count
        } else {
            0
        }
    }

    /// Render a deck's cards for download.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::NotFound` if the active profile has no such deck.
    pub fn export(&self, store: &ProfileStore, id: &DeckId) -> Result<DeckExport, DeckServiceError> {
        let deck = store
            .deck(id)
            .ok_or_else(|| DeckServiceError::NotFound(id.clone()))?;
        Ok(DeckExport {
            file_name: export_file_name(deck.name()),
            contents: export_cards(deck.cards()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lumen_core::model::{CardDraft, DeckError, StudyMode, DEFAULT_AVATAR};
    use lumen_core::time::fixed_clock;
    use storage::repository::InMemoryStore;
    use storage::state::StateRepository;

    async fn store_with_profile() -> ProfileStore {
        let state = StateRepository::new(Arc::new(InMemoryStore::new()));
        let mut store = ProfileStore::load(fixed_clock(), state).await.unwrap();
        store.create_profile("Ana", DEFAULT_AVATAR).await.unwrap();
        store
    }

    fn draft() -> DeckDraft {
        let mut draft = DeckDraft::new("Spanish Verbs", "Languages");
        draft.cards = vec![
            CardDraft::text_only("ser", "to be"),
            CardDraft::text_only("tener", "to have"),
        ];
        draft
    }

    #[tokio::test]
    async fn create_deck_validates_before_saving() {
        let mut store = store_with_profile().await;
        let service = DeckService::new();

        let err = service
            .create_deck(&mut store, DeckDraft::new("", "Languages"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DeckServiceError::Deck(DeckError::MissingDetails { name: true, .. })
        ));
        assert!(store.decks().is_empty());
        assert!(!store.has_unread_notifications());
    }

    #[tokio::test]
    async fn create_deck_adds_to_front() {
        let mut store = store_with_profile().await;
        let service = DeckService::new();

        let deck = service.create_deck(&mut store, draft()).await.unwrap().unwrap();
        assert_eq!(store.decks()[0].id(), deck.id());
        assert_eq!(deck.mastery(), 0);
        assert_eq!(deck.card_count(), 2);
    }

    #[tokio::test]
    async fn create_deck_without_profile_is_noop() {
        let state = StateRepository::new(Arc::new(InMemoryStore::new()));
        let mut store = ProfileStore::load(fixed_clock(), state).await.unwrap();
        let created = DeckService::new().create_deck(&mut store, draft()).await.unwrap();
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn save_edit_keeps_card_ids() {
        let mut store = store_with_profile().await;
        let service = DeckService::new();
        let deck = service.create_deck(&mut store, draft()).await.unwrap().unwrap();

        let mut edit = service.draft_for(&store, deck.id()).unwrap();
        edit.cards[0].back = "to be (essential)".into();
        edit.study_mode = StudyMode::Random;
        let saved = service.save_edit(&mut store, deck.id(), edit).await.unwrap();

        assert_eq!(saved.cards()[0].id, deck.cards()[0].id);
        assert_eq!(saved.cards()[0].back, "to be (essential)");
        assert_eq!(store.deck(deck.id()).unwrap().study_mode(), StudyMode::Random);
    }

    #[tokio::test]
    async fn missing_deck_reports_not_found() {
        let mut store = store_with_profile().await;
        let service = DeckService::new();
        let id = DeckId::new("deck_missing");

        assert!(matches!(
            service.draft_for(&store, &id),
            Err(DeckServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.save_edit(&mut store, &id, draft()).await,
            Err(DeckServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.export(&store, &id),
            Err(DeckServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn export_then_import_reproduces_pairs() {
        let mut store = store_with_profile().await;
        let service = DeckService::new();
        let deck = service.create_deck(&mut store, draft()).await.unwrap().unwrap();

        let export = service.export(&store, deck.id()).unwrap();
        assert_eq!(export.file_name, "Spanish_Verbs.csv");
        assert_eq!(export.contents, "ser,to be\ntener,to have");

        let mut fresh = DeckDraft::new("Copy", "Languages");
        assert_eq!(service.import_into(&mut fresh, &export.contents), 2);
        let pairs: Vec<_> = fresh
            .cards
            .iter()
            .map(|c| (c.front.as_str(), c.back.as_str()))
            .collect();
        assert_eq!(pairs, vec![("ser", "to be"), ("tener", "to have")]);
    }

    #[test]
    fn import_without_rows_keeps_draft() {
        let mut fresh = draft();
        assert_eq!(DeckService::new().import_into(&mut fresh, "no commas here\n\n"), 0);
        assert_eq!(fresh.cards.len(), 2);
    }
}
