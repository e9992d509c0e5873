use lumen_core::model::{Language, Preferences};
use storage::state::StateRepository;

use crate::error::PreferencesServiceError;

#[derive(Clone)]
pub struct PreferencesService {
    state: StateRepository,
}

impl PreferencesService {
    #[must_use]
    pub fn new(state: StateRepository) -> Self {
        Self { state }
    }

    /// Load persisted preferences (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn load(&self) -> Result<Preferences, PreferencesServiceError> {
        Ok(self.state.load_preferences().await?)
    }

    /// Parse and persist a language code.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError::Preferences` for an unsupported code,
    /// or `PreferencesServiceError::Storage` if the write fails.
    pub async fn set_language(&self, code: &str) -> Result<Language, PreferencesServiceError> {
        let language: Language = code.parse()?;
        self.state.save_language(language).await?;
        Ok(language)
    }

    /// # Errors
    ///
    /// Returns `PreferencesServiceError::Storage` if the write fails.
    pub async fn set_audio_enabled(&self, enabled: bool) -> Result<(), PreferencesServiceError> {
        self.state.save_audio_enabled(enabled).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use storage::repository::InMemoryStore;

    fn service() -> PreferencesService {
        PreferencesService::new(StateRepository::new(Arc::new(InMemoryStore::new())))
    }

    #[tokio::test]
    async fn defaults_when_nothing_saved() {
        let prefs = service().load().await.unwrap();
        assert_eq!(prefs.language, Language::De);
        assert!(prefs.audio_enabled);
    }

    #[tokio::test]
    async fn saved_values_are_loaded_back() {
        let service = service();
        assert_eq!(service.set_language("en").await.unwrap(), Language::En);
        service.set_audio_enabled(false).await.unwrap();

        let prefs = service.load().await.unwrap();
        assert_eq!(prefs.language, Language::En);
        assert!(!prefs.audio_enabled);
    }

    #[tokio::test]
    async fn unknown_language_is_rejected() {
        let service = service();
        assert!(matches!(
            service.set_language("fr").await,
            Err(PreferencesServiceError::Preferences(_))
        ));
        assert_eq!(service.load().await.unwrap().language, Language::De);
    }
}
