#![forbid(unsafe_code)]

pub mod app_services;
pub mod deck_service;
pub mod error;
pub mod library;
pub mod preferences_service;
pub mod profile_store;
pub mod sessions;
pub mod stats;

pub use lumen_core::Clock;

pub use app_services::AppServices;
pub use deck_service::{DeckExport, DeckService};
pub use error::{
    AppServicesError, DeckServiceError, PreferencesServiceError, ProfileStoreError, SessionError,
};
pub use library::{categories, filter_decks, CategoryFilter};
pub use preferences_service::PreferencesService;
pub use profile_store::ProfileStore;
pub use sessions::{
    Rating, SessionAnswerResult, SessionLoopService, SessionPlan, SessionProgress, StudyCard,
    StudySession, Tally,
};
pub use stats::{ActivityBar, StatsOverview};
