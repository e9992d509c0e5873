use std::sync::Arc;

use lumen_core::model::{Language, Preferences, Profile, ProfileId};

use crate::repository::{KeyValueStore, StorageError};

/// Keys of the persisted application state.
pub mod keys {
    pub const PROFILES: &str = "lumen_profiles";
    pub const ACTIVE_PROFILE_ID: &str = "lumen_active_profile_id";
    pub const LANGUAGE: &str = "lumen_lang";
    pub const AUDIO_ENABLED: &str = "lumen_audio";
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Typed access to the application state kept in a [`KeyValueStore`].
///
/// Every value is read and written whole; there are no partial updates.
#[derive(Clone)]
pub struct StateRepository {
    kv: Arc<dyn KeyValueStore>,
}

impl StateRepository {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load every profile. A missing key yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored JSON is malformed.
    pub async fn load_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        match self.kv.get(keys::PROFILES).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(ser),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the full profile collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub async fn save_profiles(&self, profiles: &[Profile]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(profiles).map_err(ser)?;
        self.kv.set(keys::PROFILES, &raw).await?;
        log::debug!("persisted {} profile(s)", profiles.len());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_active_profile_id(&self) -> Result<Option<ProfileId>, StorageError> {
        let raw = self.kv.get(keys::ACTIVE_PROFILE_ID).await?;
        Ok(raw
            .filter(|id| !id.trim().is_empty())
            .map(ProfileId::new))
    }

    /// Store the active profile id, or remove the key when there is none.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save_active_profile_id(&self, id: Option<&ProfileId>) -> Result<(), StorageError> {
        match id {
            Some(id) => self.kv.set(keys::ACTIVE_PROFILE_ID, id.as_str()).await,
            None => self.kv.remove(keys::ACTIVE_PROFILE_ID).await,
        }
    }

    /// Load preferences, falling back to defaults for missing or unreadable values.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_preferences(&self) -> Result<Preferences, StorageError> {
        let defaults = Preferences::default();

        let language = match self.kv.get(keys::LANGUAGE).await? {
            Some(raw) => raw.parse::<Language>().unwrap_or_else(|err| {
                log::warn!("ignoring stored language: {err}");
                defaults.language
            }),
            None => defaults.language,
        };

        let audio_enabled = match self.kv.get(keys::AUDIO_ENABLED).await? {
            Some(raw) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|err| {
                log::warn!("ignoring stored audio flag: {err}");
                defaults.audio_enabled
            }),
            None => defaults.audio_enabled,
        };

        Ok(Preferences {
            language,
            audio_enabled,
        })
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save_language(&self, language: Language) -> Result<(), StorageError> {
        self.kv.set(keys::LANGUAGE, language.code()).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn save_audio_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&enabled).map_err(ser)?;
        self.kv.set(keys::AUDIO_ENABLED, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;
    use lumen_core::model::DEFAULT_AVATAR;

    fn repo() -> (InMemoryStore, StateRepository) {
        let store = InMemoryStore::new();
        let repo = StateRepository::new(Arc::new(store.clone()));
        (store, repo)
    }

    #[tokio::test]
    async fn missing_profiles_load_as_empty() {
        let (_, repo) = repo();
        assert!(repo.load_profiles().await.unwrap().is_empty());
        assert_eq!(repo.load_active_profile_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn profiles_round_trip() {
        let (_, repo) = repo();
        let profiles = vec![
            Profile::new(ProfileId::new("u_1"), "Ana", DEFAULT_AVATAR),
            Profile::new(ProfileId::new("u_2"), "Ben", "ben.svg"),
        ];
        repo.save_profiles(&profiles).await.unwrap();
        assert_eq!(repo.load_profiles().await.unwrap(), profiles);
    }

    #[tokio::test]
    async fn malformed_profiles_surface_serialization_error() {
        let (store, repo) = repo();
        store.set(keys::PROFILES, "{not json").await.unwrap();
        let err = repo.load_profiles().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn clearing_active_id_removes_key() {
        let (store, repo) = repo();
        let id = ProfileId::new("u_1");
        repo.save_active_profile_id(Some(&id)).await.unwrap();
        assert_eq!(
            store.get(keys::ACTIVE_PROFILE_ID).await.unwrap().as_deref(),
            Some("u_1")
        );

        repo.save_active_profile_id(None).await.unwrap();
        assert_eq!(store.get(keys::ACTIVE_PROFILE_ID).await.unwrap(), None);
    }

    #[tokio::test]
    async fn preferences_default_and_round_trip() {
        let (store, repo) = repo();
        assert_eq!(repo.load_preferences().await.unwrap(), Preferences::default());

        repo.save_language(Language::En).await.unwrap();
        repo.save_audio_enabled(false).await.unwrap();
        assert_eq!(store.get(keys::AUDIO_ENABLED).await.unwrap().as_deref(), Some("false"));

        let prefs = repo.load_preferences().await.unwrap();
        assert_eq!(prefs.language, Language::En);
        assert!(!prefs.audio_enabled);
    }

    #[tokio::test]
    async fn unreadable_preferences_fall_back_to_defaults() {
        let (store, repo) = repo();
        store.set(keys::LANGUAGE, "klingon").await.unwrap();
        store.set(keys::AUDIO_ENABLED, "maybe").await.unwrap();
        assert_eq!(repo.load_preferences().await.unwrap(), Preferences::default());
    }
}
