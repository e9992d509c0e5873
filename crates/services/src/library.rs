//! Deck library browsing: search and category filters.

use lumen_core::model::Deck;

/// Category selection in the library view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` (any case) or an empty string selects every category.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(raw.to_owned())
        }
    }

    fn matches(&self, deck: &Deck) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => deck.category() == category,
        }
    }
}

/// Decks whose name or category contains `search` (case-insensitive) and
/// that pass the category filter, in stored order.
#[must_use]
pub fn filter_decks<'a>(decks: &'a [Deck], search: &str, category: &CategoryFilter) -> Vec<&'a Deck> {
    let needle = search.trim().to_lowercase();
    decks
        .iter()
        .filter(|deck| category.matches(deck))
        .filter(|deck| {
            needle.is_empty()
                || deck.name().to_lowercase().contains(&needle)
                || deck.category().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories(decks: &[Deck]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for deck in decks {
        if !seen.contains(&deck.category()) {
            seen.push(deck.category());
        }
    }
    seen
}
