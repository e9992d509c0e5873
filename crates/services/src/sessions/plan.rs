use rand::rng;
use rand::seq::SliceRandom;

use lumen_core::model::{Card, Deck, DeckId, StudyMode, StudyTarget};

/// A card queued for study, with the deck it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyCard {
    pub deck_id: DeckId,
    /// Position of the card inside its deck, for jumping to the editor.
    pub index: usize,
    pub card: Card,
}

/// Ordered cards for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub target: StudyTarget,
    pub mode: StudyMode,
    pub cards: Vec<StudyCard>,
}

impl SessionPlan {
    /// Collect the cards a target refers to and order them.
    ///
    /// `All` takes every card of every deck, deck by deck. A deck id that
    /// matches nothing yields an empty plan.
    #[must_use]
    pub fn build(decks: &[Deck], target: StudyTarget, mode: StudyMode) -> Self {
        let selected: Vec<&Deck> = match &target {
            StudyTarget::All => decks.iter().collect(),
            StudyTarget::Deck(id) => decks.iter().filter(|d| d.id() == id).collect(),
        };

        let mut cards: Vec<StudyCard> = selected
            .into_iter()
            .flat_map(|deck| {
                deck.cards().iter().enumerate().map(|(index, card)| StudyCard {
                    deck_id: deck.id().clone(),
                    index,
                    card: card.clone(),
                })
            })
            .collect();

        if mode == StudyMode::Random {
            cards.as_mut_slice().shuffle(&mut rng());
        }

        Self {
            target,
            mode,
            cards,
        }
    }

    /// Total number of cards in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cards.len()
    }

    /// Returns true when no cards were selected for this session.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::model::{AccentColor, CardDraft, DeckDraft};

    fn deck(id: &str, fronts: &[&str]) -> Deck {
        let mut draft = DeckDraft::new(id, "Test");
        draft.cards = fronts
            .iter()
            .map(|f| CardDraft::text_only(*f, "back"))
            .collect();
        draft
            .validate()
            .unwrap()
            .into_new_deck(DeckId::new(id), AccentColor::Blue)
    }

    fn fronts(plan: &SessionPlan) -> Vec<&str> {
        plan.cards.iter().map(|c| c.card.front.as_str()).collect()
    }

    #[test]
    fn sequential_keeps_stored_order() {
        let decks = vec![deck("d1", &["a", "b", "c"])];
        let plan = SessionPlan::build(
            &decks,
            StudyTarget::Deck(DeckId::new("d1")),
            StudyMode::Sequential,
        );
        assert_eq!(fronts(&plan), vec!["a", "b", "c"]);
        assert_eq!(plan.cards[2].index, 2);
    }

    #[test]
    fn all_flattens_decks_in_order() {
        let decks = vec![deck("d1", &["a", "b"]), deck("d2", &["c"])];
        let plan = SessionPlan::build(&decks, StudyTarget::All, StudyMode::Sequential);
        assert_eq!(fronts(&plan), vec!["a", "b", "c"]);
        assert_eq!(plan.cards[2].deck_id, DeckId::new("d2"));
        assert_eq!(plan.cards[2].index, 0);
    }

    #[test]
    fn random_is_a_permutation() {
        let decks = vec![deck("d1", &["a", "b", "c", "d", "e"])];
        let plan = SessionPlan::build(
            &decks,
            StudyTarget::Deck(DeckId::new("d1")),
            StudyMode::Random,
        );
        let mut seen = fronts(&plan);
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn unknown_deck_is_empty() {
        let decks = vec![deck("d1", &["a"])];
        let plan = SessionPlan::build(
            &decks,
            StudyTarget::Deck(DeckId::new("nope")),
            StudyMode::Sequential,
        );
        assert!(plan.is_empty());
        assert_eq!(plan.total(), 0);
    }
}
