use std::sync::Arc;

use chrono::NaiveDate;
use lumen_core::model::{CardDraft, DeckDraft, StudyMode, StudyTarget, DEFAULT_AVATAR};
use services::{Clock, DeckService, ProfileStore, Rating, SessionLoopService};
use storage::repository::{InMemoryStore, KeyValueStore};
use storage::state::StateRepository;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

async fn study_all(store: &mut ProfileStore, target: StudyTarget, rating: Rating) {
    let loop_svc = SessionLoopService::new();
    let mut session = loop_svc
        .start_session(store, target, Some(StudyMode::Sequential))
        .unwrap();
    while !session.is_complete() {
        loop_svc
            .answer_current(store, &mut session, rating)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn streak_follows_calendar_days_across_restarts() {
    let kv: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let state = StateRepository::new(Arc::clone(&kv));

    let mut store = ProfileStore::load(Clock::on(day(1)), state.clone())
        .await
        .unwrap();
    store.create_profile("Ana", DEFAULT_AVATAR).await.unwrap();
    let mut draft = DeckDraft::new("Capitals", "Geography");
    draft.cards = vec![
        CardDraft::text_only("France", "Paris"),
        CardDraft::text_only("Spain", "Madrid"),
    ];
    let deck = DeckService::new()
        .create_deck(&mut store, draft)
        .await
        .unwrap()
        .unwrap();
    let target = StudyTarget::Deck(deck.id().clone());

    study_all(&mut store, target.clone(), Rating::Known).await;
    study_all(&mut store, target.clone(), Rating::Forgotten).await;
    let stats = store.stats();
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.daily_progress, 4);
    assert_eq!(store.deck(deck.id()).unwrap().mastery(), 0);

    // next day, fresh process
    let mut store = ProfileStore::load(Clock::on(day(2)), state.clone())
        .await
        .unwrap();
    study_all(&mut store, target.clone(), Rating::Known).await;
    let stats = store.stats();
    assert_eq!(stats.streak, 2);
    assert_eq!(stats.daily_progress, 2);
    assert_eq!(stats.total_cards_reviewed, 6);
    assert_eq!(stats.last_study_date, Some(day(2)));

    // skipping a day restarts the streak
    let mut store = ProfileStore::load(Clock::on(day(4)), state).await.unwrap();
    study_all(&mut store, StudyTarget::All, Rating::Unsure).await;
    let stats = store.stats();
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.activity_data[6], 8);
    assert_eq!(store.deck(deck.id()).unwrap().mastery(), 100);
}

#[tokio::test]
async fn studying_all_decks_leaves_mastery_alone() {
    let state = StateRepository::new(Arc::new(InMemoryStore::new()));
    let mut store = ProfileStore::load(Clock::on(day(10)), state).await.unwrap();
    store.create_profile("Ben", DEFAULT_AVATAR).await.unwrap();

    let service = DeckService::new();
    for name in ["One", "Two"] {
        let mut draft = DeckDraft::new(name, "Misc");
        draft.cards = vec![CardDraft::text_only(format!("{name}?"), "!")];
        service.create_deck(&mut store, draft).await.unwrap();
    }

    study_all(&mut store, StudyTarget::All, Rating::Known).await;
    assert_eq!(store.stats().daily_progress, 2);
    assert!(store.decks().iter().all(|d| d.mastery() == 0));
    assert!(store.decks().iter().all(|d| d.last_reviewed().is_none()));
}
