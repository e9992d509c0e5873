use lumen_core::model::Language;
use services::{ProfileStore, StatsOverview};

use super::{require_active, CommandResult};

const BAR_WIDTH: usize = 20;

pub fn show(store: &ProfileStore, language: Language) -> CommandResult {
    require_active(store)?;
    let overview = StatsOverview::build(&store.stats(), store.decks(), language);

    println!("Streak:          {} day(s)", overview.streak);
    println!(
        "Today:           {}/{} cards ({}%)",
        overview.daily_progress, overview.daily_goal, overview.daily_goal_percent
    );
    println!("Cards in decks:  {}", overview.total_cards);
    println!("Average mastery: {}%", overview.average_mastery);
    println!("Total reviewed:  {}", overview.total_cards_reviewed);
    println!();
    for bar in &overview.activity {
        let filled = usize::from(bar.height_percent) * BAR_WIDTH / 100;
        println!(
            "{} |{:<width$}| {}",
            bar.label,
            "#".repeat(filled),
            bar.reviews,
            width = BAR_WIDTH
        );
    }
    Ok(())
}
