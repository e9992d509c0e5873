use std::sync::Arc;

use storage::repository::Storage;
use storage::state::StateRepository;

use crate::deck_service::DeckService;
use crate::error::AppServicesError;
use crate::preferences_service::PreferencesService;
use crate::profile_store::ProfileStore;
use crate::sessions::SessionLoopService;
use crate::Clock;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    state: StateRepository,
    deck_service: Arc<DeckService>,
    session_loop: Arc<SessionLoopService>,
    preferences: Arc<PreferencesService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services over a throwaway in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let state = StateRepository::new(Arc::clone(&storage.kv));
        Self {
            clock,
            preferences: Arc::new(PreferencesService::new(state.clone())),
            state,
            deck_service: Arc::new(DeckService::new()),
            session_loop: Arc::new(SessionLoopService::new()),
        }
    }

    /// Load the profile state for this session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Store` if the state cannot be read.
    pub async fn load_profile_store(&self) -> Result<ProfileStore, AppServicesError> {
        Ok(ProfileStore::load(self.clock, self.state.clone()).await?)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn deck_service(&self) -> Arc<DeckService> {
        Arc::clone(&self.deck_service)
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }
}
