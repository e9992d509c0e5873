use std::io::Read;
use std::path::{Path, PathBuf};

use lumen_core::model::{CardDraft, DeckDraft, DeckId, StudyMode};
use lumen_core::transfer::import_cards;
use services::{filter_decks, CategoryFilter, DeckService, ProfileStore};

use super::{require_active, CliError, CommandResult};

/// Deck fields given on the command line; `None` keeps the current value.
pub struct DeckArgs {
    pub name: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub mode: Option<StudyMode>,
    pub csv: Option<PathBuf>,
    /// Extra `front,back` rows appended after any CSV import.
    pub cards: Vec<String>,
}

impl DeckArgs {
    fn apply(self, draft: &mut DeckDraft, decks: &DeckService) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(image) = self.image {
            draft.image_url = Some(image);
        }
        if let Some(mode) = self.mode {
            draft.study_mode = mode;
        }
        if let Some(path) = self.csv {
            let text = read_source(&path)?;
            if decks.import_into(draft, &text) == 0 {
                return Err(CliError::EmptyImport(path.display().to_string()).into());
            }
        }
        if !self.cards.is_empty() {
            draft.cards.retain(CardDraft::is_complete);
            for raw in &self.cards {
                draft.cards.push(parse_card_arg(raw)?);
            }
        }
        Ok(())
    }
}

/// One `front,back` pair given on the command line.
fn parse_card_arg(raw: &str) -> Result<CardDraft, CliError> {
    let mut rows = import_cards(raw);
    match (rows.pop(), rows.is_empty()) {
        (Some(card), true) => Ok(card),
        _ => Err(CliError::InvalidCard(raw.to_owned())),
    }
}

fn read_source(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

pub fn list(store: &ProfileStore, search: &str, category: &str) -> CommandResult {
    require_active(store)?;
    let decks = filter_decks(store.decks(), search, &CategoryFilter::parse(category));
    if decks.is_empty() {
        println!("No decks found.");
        return Ok(());
    }
    for deck in decks {
        let reviewed = deck
            .last_reviewed()
            .map_or_else(|| "never".to_owned(), |d| d.to_string());
        println!(
            "{}  {} [{}]  {} cards, {}% mastered, last studied {reviewed}",
            deck.id(),
            deck.name(),
            deck.category(),
            deck.card_count(),
            deck.mastery()
        );
    }
    Ok(())
}

pub fn show(store: &ProfileStore, id: &str) -> CommandResult {
    require_active(store)?;
    let id: DeckId = id.parse()?;
    let deck = store.deck(&id).ok_or(CliError::UnknownDeck(id.clone()))?;
    println!("{} [{}]", deck.name(), deck.category());
    println!(
        "mode: {}, mastery: {}%, accent: {:?}",
        deck.study_mode().as_str(),
        deck.mastery(),
        deck.accent_color()
    );
    for (index, card) in deck.cards().iter().enumerate() {
        println!("{:>3}. {} -> {}", index + 1, card.front, card.back);
        if let Some(hint) = &card.hint {
            println!("     hint: {hint}");
        }
    }
    Ok(())
}

pub async fn create(decks: &DeckService, store: &mut ProfileStore, args: DeckArgs) -> CommandResult {
    require_active(store)?;
    let mut draft = DeckDraft::new("", "");
    args.apply(&mut draft, decks)?;
    match decks.create_deck(store, draft).await? {
        Some(deck) => {
            println!("Created deck {} with {} cards", deck.id(), deck.card_count());
            if store.has_unread_notifications() {
                println!("New: \"{}\" is ready to study", deck.name());
                store.mark_notifications_read();
            }
            Ok(())
        }
        None => Err(CliError::NoActiveProfile.into()),
    }
}

pub async fn edit(
    decks: &DeckService,
    store: &mut ProfileStore,
    id: &str,
    args: DeckArgs,
) -> CommandResult {
    require_active(store)?;
    let id: DeckId = id.parse()?;
    let mut draft = decks.draft_for(store, &id)?;
    args.apply(&mut draft, decks)?;
    let deck = decks.save_edit(store, &id, draft).await?;
    println!("Saved {} ({} cards)", deck.name(), deck.card_count());
    Ok(())
}

pub async fn delete(store: &mut ProfileStore, id: &str) -> CommandResult {
    require_active(store)?;
    let id: DeckId = id.parse()?;
    if store.deck(&id).is_none() {
        return Err(CliError::UnknownDeck(id).into());
    }
    store.delete_deck(&id).await?;
    println!("Deleted deck {id}");
    Ok(())
}

pub fn export(decks: &DeckService, store: &ProfileStore, id: &str, out: &Path) -> CommandResult {
    require_active(store)?;
    let id: DeckId = id.parse()?;
    let export = decks.export(store, &id)?;
    std::fs::create_dir_all(out)?;
    let path = out.join(&export.file_name);
    std::fs::write(&path, export.contents)?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub async fn import(
    decks: &DeckService,
    store: &mut ProfileStore,
    id: &str,
    file: &Path,
) -> CommandResult {
    let args = DeckArgs {
        name: None,
        category: None,
        image: None,
        mode: None,
        csv: Some(file.to_path_buf()),
        cards: Vec::new(),
    };
    edit(decks, store, id, args).await
}
