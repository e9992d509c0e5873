use lumen_core::model::{DeckId, StudyMode, StudyTarget};
use lumen_core::progress::SessionResult;

use super::plan::{SessionPlan, StudyCard};
use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── RATINGS ───────────────────────────────────────────────────────────────────
//

/// How well the user recalled a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    Known,
    Unsure,
    Forgotten,
}

/// Running count of ratings in a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub known: u32,
    pub unsure: u32,
    pub forgotten: u32,
}

impl Tally {
    fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Known => self.known += 1,
            Rating::Unsure => self.unsure += 1,
            Rating::Forgotten => self.forgotten += 1,
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory study session stepping through a plan one card at a time.
pub struct StudySession {
    target: StudyTarget,
    mode: StudyMode,
    cards: Vec<StudyCard>,
    current: usize,
    flipped: bool,
    tally: Tally,
}

impl StudySession {
    /// Start a session from a plan.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the plan holds no cards.
    pub fn new(plan: SessionPlan) -> Result<Self, SessionError> {
        if plan.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            target: plan.target,
            mode: plan.mode,
            cards: plan.cards,
            current: 0,
            flipped: false,
            tally: Tally::default(),
        })
    }

    #[must_use]
    pub fn target(&self) -> &StudyTarget {
        &self.target
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Total number of cards in this session.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.cards.len()
    }

    /// The card being studied, or `None` once every card is rated.
    #[must_use]
    pub fn current(&self) -> Option<&StudyCard> {
        self.cards.get(self.current)
    }

    /// Deck and in-deck index of the current card, for opening it in the editor.
    #[must_use]
    pub fn current_location(&self) -> Option<(&DeckId, usize)> {
        self.current().map(|c| (&c.deck_id, c.index))
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Toggle between front and back of the current card.
    pub fn flip(&mut self) {
        if !self.is_complete() {
            self.flipped = !self.flipped;
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.current.min(self.cards.len());
        SessionProgress {
            total: self.cards.len(),
            answered,
            remaining: self.cards.len() - answered,
            is_complete: self.is_complete(),
        }
    }

    /// Rate the current card and move to the next one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if every card is already rated.
    pub fn rate(&mut self, rating: Rating) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        self.tally.record(rating);
        self.current += 1;
        self.flipped = false;
        Ok(())
    }

    /// The result rating the current card would produce, if it is the last one.
    ///
    /// Lets callers record progress before the session advances.
    #[must_use]
    pub fn completing_result(&self, rating: Rating) -> Option<SessionResult> {
        if self.current + 1 != self.cards.len() {
            return None;
        }
        let known = self.tally.known + u32::from(rating == Rating::Known);
        let total = u32::try_from(self.cards.len()).unwrap_or(u32::MAX);
        Some(SessionResult::new(total, known, total))
    }

    /// Counts to report once the session is complete.
    ///
    /// Every card in the session counts as reviewed and as the mastery total.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` while cards remain unrated.
    pub fn result(&self) -> Result<SessionResult, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::Incomplete);
        }
        let total = u32::try_from(self.cards.len()).unwrap_or(u32::MAX);
        Ok(SessionResult::new(total, self.tally.known, total))
    }
}
