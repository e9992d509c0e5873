use lumen_core::model::{Deck, DeckId, Profile, ProfileId, Stats, StudyTarget};
use lumen_core::progress::{apply_progress, SessionResult};
use storage::state::StateRepository;

use crate::error::ProfileStoreError;
use crate::Clock;

/// Application state: every local profile and which one is active.
///
/// Owned by the entry point and handed to callers by reference. Each mutation
/// updates memory first and then writes the full profile collection back to
/// storage before returning.
pub struct ProfileStore {
    clock: Clock,
    state: StateRepository,
    profiles: Vec<Profile>,
    active_id: Option<ProfileId>,
    has_unread_notifications: bool,
}

impl ProfileStore {
    /// Load profiles and the active selection from storage.
    ///
    /// A persisted active id that names no profile is dropped.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError::Storage` if the state cannot be read.
    pub async fn load(clock: Clock, state: StateRepository) -> Result<Self, ProfileStoreError> {
        let profiles = state.load_profiles().await?;
        let mut active_id = state.load_active_profile_id().await?;
        if let Some(id) = &active_id {
            if !profiles.iter().any(|p| &p.id == id) {
                log::warn!("active profile {id} no longer exists; clearing selection");
                active_id = None;
            }
        }
        log::debug!("loaded {} profile(s)", profiles.len());

        Ok(Self {
            clock,
            state,
            profiles,
            active_id,
            has_unread_notifications: false,
        })
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    #[must_use]
    pub fn active_profile_id(&self) -> Option<&ProfileId> {
        self.active_id.as_ref()
    }

    #[must_use]
    pub fn active_profile(&self) -> Option<&Profile> {
        let id = self.active_id.as_ref()?;
        self.profiles.iter().find(|p| &p.id == id)
    }

    /// Decks of the active profile, most recent first. Empty without one.
    #[must_use]
    pub fn decks(&self) -> &[Deck] {
        self.active_profile()
            .map(|p| p.decks.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn deck(&self, id: &DeckId) -> Option<&Deck> {
        self.active_profile()?.deck(id)
    }

    /// Stats of the active profile, or fresh defaults without one.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.active_profile()
            .map(|p| p.stats.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_unread_notifications(&self) -> bool {
        self.has_unread_notifications
    }

    pub fn mark_notifications_read(&mut self) {
        self.has_unread_notifications = false;
    }

    //
    // ─── PROFILES ──────────────────────────────────────────────────────────────
    //

    /// Append a new profile with empty decks and default stats, and make it active.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError::Storage` if persistence fails.
    pub async fn create_profile(
        &mut self,
        name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Result<Profile, ProfileStoreError> {
        let profile = Profile::new(ProfileId::generate(), name, avatar);
        self.profiles.push(profile.clone());
        self.active_id = Some(profile.id.clone());
        self.persist_profiles().await?;
        self.persist_active_id().await?;
        log::debug!("created profile {}", profile.id);
        Ok(profile)
    }

    /// Remove a profile. Clears the selection if it was active.
    ///
    /// Returns `false` (and writes nothing) when no profile has that id.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError::Storage` if persistence fails.
    pub async fn delete_profile(&mut self, id: &ProfileId) -> Result<bool, ProfileStoreError> {
        let before = self.profiles.len();
        self.profiles.retain(|p| &p.id != id);
        if self.profiles.len() == before {
            return Ok(false);
        }
        self.persist_profiles().await?;
        if self.active_id.as_ref() == Some(id) {
            self.active_id = None;
            self.persist_active_id().await?;
        }
        Ok(true)
    }

    /// Change which profile is visible. `None` logs out.
    ///
    /// An id that names no profile leaves the selection unchanged and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError::Storage` if persistence fails.
    pub async fn set_active_profile(
        &mut self,
        id: Option<ProfileId>,
    ) -> Result<bool, ProfileStoreError> {
        if let Some(id) = &id {
            if !self.profiles.iter().any(|p| &p.id == id) {
                log::warn!("cannot activate unknown profile {id}");
                return Ok(false);
            }
        }
        self.active_id = id;
        self.persist_active_id().await?;
        Ok(true)
    }

    /// Rename the active profile and replace its avatar.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError::Storage` if persistence fails.
    pub async fn update_profile(
        &mut self,
        name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Result<bool, ProfileStoreError> {
        let (name, avatar) = (name.into(), avatar.into());
        self.update_active(|p| {
            p.name = name;
            p.avatar = avatar;
        })
        .await
    }

    //
    // ─── DECKS ─────────────────────────────────────────────────────────────────
    //

    /// Put a deck at the front of the active profile's list and flag a notification.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError::Storage` if persistence fails.
    pub async fn add_deck(&mut self, deck: Deck) -> Result<bool, ProfileStoreError> {
        let applied = self.update_active(|p| p.decks.insert(0, deck)).await?;
        if applied {
            self.has_unread_notifications = true;
        }
        Ok(applied)
    }

    /// Remove a deck from the active profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError::Storage` if persistence fails.
    pub async fn delete_deck(&mut self, id: &DeckId) -> Result<bool, ProfileStoreError> {
        self.update_active(|p| p.decks.retain(|d| d.id() != id)).await
    }

    /// Replace the active profile's deck that has the same id.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError::Storage` if persistence fails.
    pub async fn update_deck(&mut self, deck: Deck) -> Result<bool, ProfileStoreError> {
        self.update_active(|p| {
            if let Some(slot) = p.decks.iter_mut().find(|d| d.id() == deck.id()) {
                *slot = deck;
            }
        })
        .await
    }

    //
    // ─── PROGRESS ──────────────────────────────────────────────────────────────
    //

    /// Fold a finished study session into the active profile's stats and decks.
    ///
    /// `target` names the deck whose mastery is refreshed; `None` or
    /// [`StudyTarget::All`] only touches the stats.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError::Storage` if persistence fails.
    pub async fn update_progress(
        &mut self,
        result: SessionResult,
        target: Option<&StudyTarget>,
    ) -> Result<bool, ProfileStoreError> {
        let today = self.clock.today();
        self.update_active(|p| {
            let update = apply_progress(&p.stats, &p.decks, result, target, today);
            if update.deck_updated {
                log::debug!("refreshed mastery for {}", p.id);
            }
            p.stats = update.stats;
            p.decks = update.decks;
        })
        .await
    }

    //
    // ─── PERSISTENCE ───────────────────────────────────────────────────────────
    //

    async fn update_active(
        &mut self,
        apply: impl FnOnce(&mut Profile),
    ) -> Result<bool, ProfileStoreError> {
        let Some(id) = self.active_id.clone() else {
            return Ok(false);
        };
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        apply(profile);
        self.persist_profiles().await?;
        Ok(true)
    }

    async fn persist_profiles(&self) -> Result<(), ProfileStoreError> {
        self.state.save_profiles(&self.profiles).await?;
        Ok(())
    }

    async fn persist_active_id(&self) -> Result<(), ProfileStoreError> {
        self.state
            .save_active_profile_id(self.active_id.as_ref())
            .await?;
        Ok(())
    }
}
