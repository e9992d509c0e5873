mod card;
mod deck;
mod ids;
mod preferences;
mod profile;
mod stats;

pub use ids::{ALL_DECKS, CardId, DeckId, ParseIdError, ProfileId, StudyTarget};

pub use card::{Card, CardDraft};
pub use deck::{AccentColor, DEFAULT_DECK_IMAGE, Deck, DeckDraft, DeckError, StudyMode, ValidatedDeck};
pub use preferences::{Language, Preferences, PreferencesError};
pub use profile::{DEFAULT_AVATAR, MIN_NAME_CHARS, Profile, ProfileError, validate_name};
pub use stats::{ACTIVITY_DAYS, DEFAULT_DAILY_GOAL, Stats, percent_of_goal};
