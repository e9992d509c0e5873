//! Streak, daily progress and mastery bookkeeping after a study session.
//!
//! Everything here is pure: callers pass the prior state plus the calendar
//! day and get the next state back.

use chrono::NaiveDate;

use crate::model::{Deck, Stats, StudyTarget, ACTIVITY_DAYS};

/// Counts reported by a completed study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub cards_reviewed: u32,
    pub known_count: u32,
    pub total_count: u32,
}

impl SessionResult {
    #[must_use]
    pub fn new(cards_reviewed: u32, known_count: u32, total_count: u32) -> Self {
        Self {
            cards_reviewed,
            known_count,
            total_count,
        }
    }
}

/// New stats and decks produced by [`apply_progress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub stats: Stats,
    pub decks: Vec<Deck>,
    /// True when a deck matched the target and got a fresh mastery value.
    pub deck_updated: bool,
}

/// `round(known / total * 100)`, clamped to 100. `None` when `total` is zero.
#[must_use]
pub fn mastery_percent(known: u32, total: u32) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (f64::from(known) / f64::from(total) * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(pct.min(100.0) as u8)
}

/// Next streak value given the previous study day.
///
/// A gap of one day extends the streak, a longer gap restarts it at 1, and a
/// session on the same day (or a date behind the last one) leaves it as is.
#[must_use]
pub fn next_streak(streak: u32, last_study_date: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(last) = last_study_date else {
        return 1;
    };
    let gap = (today - last).num_days();
    if gap == 1 {
        streak.saturating_add(1)
    } else if gap > 1 {
        1
    } else {
        streak
    }
}

/// Fold a finished session into the profile's stats and decks.
#[must_use]
pub fn apply_progress(
    stats: &Stats,
    decks: &[Deck],
    result: SessionResult,
    target: Option<&StudyTarget>,
    today: NaiveDate,
) -> ProgressUpdate {
    let reviewed = result.cards_reviewed;

    let daily_progress = if stats.last_study_date == Some(today) {
        stats.daily_progress.saturating_add(reviewed)
    } else {
        reviewed
    };

    let mut activity_data = stats.activity_data;
    let last = ACTIVITY_DAYS - 1;
    activity_data[last] = activity_data[last].saturating_add(reviewed);

    let next_stats = Stats {
        streak: next_streak(stats.streak, stats.last_study_date, today),
        daily_goal: stats.daily_goal,
        daily_progress,
        last_study_date: Some(today),
        total_cards_reviewed: stats.total_cards_reviewed.saturating_add(u64::from(reviewed)),
        activity_data,
    };

    let mut next_decks = decks.to_vec();
    let mut deck_updated = false;
    if let Some(deck_id) = target.and_then(StudyTarget::deck_id) {
        if let Some(mastery) = mastery_percent(result.known_count, result.total_count) {
            if let Some(deck) = next_decks.iter_mut().find(|d| d.id() == deck_id) {
                deck.record_session(mastery, today);
                deck_updated = true;
            }
        }
    }

    ProgressUpdate {
        stats: next_stats,
        decks: next_decks,
        deck_updated,
    }
}
