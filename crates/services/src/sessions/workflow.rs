use lumen_core::model::{StudyMode, StudyTarget};
use lumen_core::progress::SessionResult;

use super::plan::SessionPlan;
use super::service::{Rating, StudySession};
use crate::error::SessionError;
use crate::profile_store::ProfileStore;

/// Result of answering a single card in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAnswerResult {
    pub rating: Rating,
    pub is_complete: bool,
    /// Set once the last card is rated and progress has been recorded.
    pub result: Option<SessionResult>,
}

/// Orchestrates session start and recording progress when a session ends.
#[derive(Clone, Default)]
pub struct SessionLoopService;

impl SessionLoopService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Start a session over the active profile's decks.
    ///
    /// Without an explicit `mode` a single deck uses its own study mode and
    /// `All` runs sequentially.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the target is unknown or has no cards.
    pub fn start_session(
        &self,
        store: &ProfileStore,
        target: StudyTarget,
        mode: Option<StudyMode>,
    ) -> Result<StudySession, SessionError> {
        let mode = mode.unwrap_or_else(|| match &target {
            StudyTarget::Deck(id) => store.deck(id).map(|d| d.study_mode()).unwrap_or_default(),
            StudyTarget::All => StudyMode::Sequential,
        });
        let plan = SessionPlan::build(store.decks(), target, mode);
        log::debug!("starting {} session with {} card(s)", mode.as_str(), plan.total());
        StudySession::new(plan)
    }

    /// Rate the current card and, on the last one, fold the result into the store.
    ///
    /// Progress is written before the session advances, so a failed write
    /// leaves the last card unanswered and the call can be repeated.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session already ended, or
    /// `SessionError::Store` if persisting progress fails.
    pub async fn answer_current(
        &self,
        store: &mut ProfileStore,
        session: &mut StudySession,
        rating: Rating,
    ) -> Result<SessionAnswerResult, SessionError> {
        let result = session.completing_result(rating);
        if let Some(result) = result {
            store
                .update_progress(result, Some(session.target()))
                .await?;
            log::info!(
                "session complete: {} of {} known",
                result.known_count,
                result.total_count
            );
        }
        session.rate(rating)?;
        Ok(SessionAnswerResult {
            rating,
            is_complete: session.is_complete(),
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lumen_core::model::{CardDraft, DeckDraft, DEFAULT_AVATAR};
    use lumen_core::time::fixed_clock;
    use storage::repository::{InMemoryStore, KeyValueStore, StorageError};
    use storage::state::StateRepository;

    use crate::deck_service::DeckService;

    async fn store_with_deck(mode: StudyMode) -> (ProfileStore, StudyTarget) {
        let state = StateRepository::new(Arc::new(InMemoryStore::new()));
        let mut store = ProfileStore::load(fixed_clock(), state).await.unwrap();
        store.create_profile("Ana", DEFAULT_AVATAR).await.unwrap();

        let mut draft = DeckDraft::new("Capitals", "Geography");
        draft.study_mode = mode;
        draft.cards = (1..=5)
            .map(|i| CardDraft::text_only(format!("q{i}"), format!("a{i}")))
            .collect();
        let deck = DeckService::new()
            .create_deck(&mut store, draft)
            .await
            .unwrap()
            .unwrap();
        (store, StudyTarget::Deck(deck.id().clone()))
    }

    #[tokio::test]
    async fn finishing_a_session_records_progress() {
        let (mut store, target) = store_with_deck(StudyMode::Sequential).await;
        let loop_service = SessionLoopService::new();
        let mut session = loop_service
            .start_session(&store, target.clone(), None)
            .unwrap();

        let ratings = [
            Rating::Known,
            Rating::Known,
            Rating::Unsure,
            Rating::Known,
            Rating::Forgotten,
        ];
        let mut last = None;
        for rating in ratings {
            last = Some(
                loop_service
                    .answer_current(&mut store, &mut session, rating)
                    .await
                    .unwrap(),
            );
        }

        let last = last.unwrap();
        assert!(last.is_complete);
        assert_eq!(last.result, Some(SessionResult::new(5, 3, 5)));

        let stats = store.stats();
        assert_eq!(stats.daily_progress, 5);
        assert_eq!(stats.streak, 1);
        let deck = store.deck(target.deck_id().unwrap()).unwrap();
        assert_eq!(deck.mastery(), 60);
        assert_eq!(deck.last_reviewed(), Some(store.clock().today()));
    }

    #[tokio::test]
    async fn intermediate_answers_do_not_touch_stats() {
        let (mut store, target) = store_with_deck(StudyMode::Sequential).await;
        let loop_service = SessionLoopService::new();
        let mut session = loop_service.start_session(&store, target, None).unwrap();

        let answer = loop_service
            .answer_current(&mut store, &mut session, Rating::Known)
            .await
            .unwrap();
        assert!(!answer.is_complete);
        assert!(answer.result.is_none());
        assert_eq!(store.stats().daily_progress, 0);
    }

    struct ReadOnlyStore(InMemoryStore);

    #[async_trait::async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key).await
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk full".into()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk full".into()))
        }
    }

    #[tokio::test]
    async fn failed_write_keeps_last_card_answerable() {
        let kv = InMemoryStore::new();
        let mut store = ProfileStore::load(fixed_clock(), StateRepository::new(Arc::new(kv.clone())))
            .await
            .unwrap();
        store.create_profile("Ana", DEFAULT_AVATAR).await.unwrap();
        let mut draft = DeckDraft::new("Capitals", "Geography");
        draft.cards = vec![CardDraft::text_only("France", "Paris")];
        let deck = DeckService::new()
            .create_deck(&mut store, draft)
            .await
            .unwrap()
            .unwrap();
        let target = StudyTarget::Deck(deck.id().clone());

        let frozen = StateRepository::new(Arc::new(ReadOnlyStore(kv.clone())));
        let mut frozen_store = ProfileStore::load(fixed_clock(), frozen).await.unwrap();
        let loop_service = SessionLoopService::new();
        let mut session = loop_service
            .start_session(&frozen_store, target.clone(), None)
            .unwrap();

        let err = loop_service
            .answer_current(&mut frozen_store, &mut session, Rating::Known)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Store(_)));
        assert!(!session.is_complete());
        assert_eq!(session.progress().answered, 0);

        // same session, writable store
        let answer = loop_service
            .answer_current(&mut store, &mut session, Rating::Known)
            .await
            .unwrap();
        assert_eq!(answer.result, Some(SessionResult::new(1, 1, 1)));
        assert_eq!(store.deck(deck.id()).unwrap().mastery(), 100);
    }

    #[tokio::test]
    async fn mode_defaults_to_deck_setting() {
        let (store, target) = store_with_deck(StudyMode::Random).await;
        let session = SessionLoopService::new()
            .start_session(&store, target.clone(), None)
            .unwrap();
        assert_eq!(session.mode(), StudyMode::Random);

        let explicit = SessionLoopService::new()
            .start_session(&store, target, Some(StudyMode::Sequential))
            .unwrap();
        assert_eq!(explicit.mode(), StudyMode::Sequential);
    }

    #[tokio::test]
    async fn unknown_target_is_empty() {
        let (store, _) = store_with_deck(StudyMode::Sequential).await;
        let target: StudyTarget = "deck_missing".parse().unwrap();
        assert!(matches!(
            SessionLoopService::new().start_session(&store, target, None),
            Err(SessionError::Empty)
        ));
    }
}
