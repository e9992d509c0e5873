//! Dashboard numbers derived from a profile's stats and decks.

use lumen_core::model::{percent_of_goal, Deck, Language, Stats, ACTIVITY_DAYS};

const WEEKDAYS_DE: [&str; ACTIVITY_DAYS] = ["M", "D", "M", "D", "F", "S", "S"];
const WEEKDAYS_EN: [&str; ACTIVITY_DAYS] = ["M", "T", "W", "T", "F", "S", "S"];

/// One bar of the weekly activity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityBar {
    pub label: &'static str,
    pub reviews: u32,
    /// Bar height relative to the daily goal, capped at 100.
    pub height_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsOverview {
    pub total_cards: usize,
    pub average_mastery: u8,
    pub streak: u32,
    pub daily_goal: u32,
    pub daily_progress: u32,
    pub daily_goal_percent: u8,
    pub total_cards_reviewed: u64,
    pub activity: Vec<ActivityBar>,
}

impl StatsOverview {
    #[must_use]
    pub fn build(stats: &Stats, decks: &[Deck], language: Language) -> Self {
        let labels = match language {
            Language::De => WEEKDAYS_DE,
            Language::En => WEEKDAYS_EN,
        };
        let activity = stats
            .activity_data
            .iter()
            .zip(labels)
            .map(|(&reviews, label)| ActivityBar {
                label,
                reviews,
                height_percent: percent_of_goal(reviews, stats.daily_goal),
            })
            .collect();

        Self {
            total_cards: decks.iter().map(Deck::card_count).sum(),
            average_mastery: average_mastery(decks),
            streak: stats.streak,
            daily_goal: stats.daily_goal,
            daily_progress: stats.daily_progress,
            daily_goal_percent: stats.daily_goal_percent(),
            total_cards_reviewed: stats.total_cards_reviewed,
            activity,
        }
    }
}

/// Rounded mean of deck mastery; 0 without decks.
#[must_use]
pub fn average_mastery(decks: &[Deck]) -> u8 {
    if decks.is_empty() {
        return 0;
    }
    let sum: u32 = decks.iter().map(|d| u32::from(d.mastery())).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = (f64::from(sum) / decks.len() as f64).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mean = mean.min(100.0) as u8;
    mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lumen_core::model::{AccentColor, CardDraft, DeckDraft, DeckId, StudyTarget};
    use lumen_core::progress::{apply_progress, SessionResult};

    fn deck(id: &str, cards: usize) -> Deck {
        let mut draft = DeckDraft::new(id, "Test");
        draft.cards = (0..cards)
            .map(|i| CardDraft::text_only(format!("q{i}"), "a"))
            .collect();
        draft
            .validate()
            .unwrap()
            .into_new_deck(DeckId::new(id), AccentColor::Red)
    }

    #[test]
    fn empty_profile_has_zeroes() {
        let overview = StatsOverview::build(&Stats::default(), &[], Language::En);
        assert_eq!(overview.total_cards, 0);
        assert_eq!(overview.average_mastery, 0);
        assert_eq!(overview.daily_goal_percent, 0);
        assert_eq!(overview.activity.len(), ACTIVITY_DAYS);
        assert!(overview.activity.iter().all(|b| b.height_percent == 0));
    }

    #[test]
    fn totals_and_average_follow_decks() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let decks = vec![deck("a", 4), deck("b", 2)];
        let update = apply_progress(
            &Stats::default(),
            &decks,
            SessionResult::new(4, 3, 4),
            Some(&StudyTarget::Deck(DeckId::new("a"))),
            today,
        );

        let overview = StatsOverview::build(&update.stats, &update.decks, Language::De);
        assert_eq!(overview.total_cards, 6);
        // (75 + 0) / 2 rounds up
        assert_eq!(overview.average_mastery, 38);
        assert_eq!(overview.daily_goal_percent, 20);
        assert_eq!(overview.activity[6].reviews, 4);
        assert_eq!(overview.activity[6].height_percent, 20);
    }

    #[test]
    fn bars_cap_at_full_height() {
        let mut stats = Stats::default();
        stats.activity_data[0] = 50;
        let overview = StatsOverview::build(&stats, &[], Language::En);
        assert_eq!(overview.activity[0].height_percent, 100);
    }

    #[test]
    fn labels_follow_language() {
        let stats = Stats::default();
        let de: Vec<_> = StatsOverview::build(&stats, &[], Language::De)
            .activity
            .iter()
            .map(|b| b.label)
            .collect();
        let en: Vec<_> = StatsOverview::build(&stats, &[], Language::En)
            .activity
            .iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(de[1], "D");
        assert_eq!(en[1], "T");
    }
}
