mod commands;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use lumen_core::model::{ProfileId, StudyMode};
use services::{AppServices, Clock};

use commands::CliError;

#[derive(Parser)]
#[command(name = "lumen", about = "Local flashcard profiles, decks and study sessions", version)]
struct Cli {
    /// SQLite database holding profiles and preferences
    #[arg(long, global = true, env = "LUMEN_DB_URL", default_value = "sqlite://lumen.sqlite3")]
    db: String,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, env = "LUMEN_TODAY")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage local profiles
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Manage the active profile's decks
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Study a deck, or every deck with `all`
    Study {
        /// Deck id or `all`
        target: String,
        /// Card order; defaults to the deck's own setting
        #[arg(long)]
        mode: Option<StudyMode>,
    },

    /// Show streak, goal and activity for the active profile
    Stats,

    /// Language and audio preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Create a profile and make it active
    Create {
        name: String,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// List profiles
    List,
    /// Switch to another profile
    Use { id: ProfileId },
    /// Delete a profile and its decks
    Delete { id: ProfileId },
    /// Clear the active profile
    Logout,
    /// Rename the active profile
    Rename {
        name: String,
        #[arg(long)]
        avatar: Option<String>,
    },
}

#[derive(clap::Args)]
struct DeckFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Cover image URL
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    mode: Option<StudyMode>,
    /// `front,back` lines replacing the deck's cards (use "-" for stdin)
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Add one `front,back` card; repeat for more
    #[arg(long = "card", value_name = "FRONT,BACK")]
    cards: Vec<String>,
}

#[derive(Subcommand)]
enum DeckCommand {
    /// List decks, optionally filtered
    List {
        /// Case-insensitive match on name or category
        #[arg(long, default_value = "")]
        search: String,
        /// Category name, or `all`
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Show a deck and its cards
    Show { id: String },
    /// Create a deck from the given fields
    Create(DeckFields),
    /// Change fields of an existing deck
    Edit {
        id: String,
        #[command(flatten)]
        fields: DeckFields,
    },
    /// Delete a deck
    Delete { id: String },
    /// Write a deck's cards as `front,back` lines
    Export {
        id: String,
        /// Directory for the exported file
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Replace a deck's cards with `front,back` lines from a file
    Import { id: String, file: PathBuf },
}

#[derive(Subcommand)]
enum PrefsCommand {
    /// Print current preferences
    Show,
    /// Set the interface language (`en` or `de`)
    Language { code: String },
    /// Turn audio on or off
    Audio {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| CliError::InvalidDbUrl(db_url.to_owned()))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(CliError::InvalidDbUrl(db_url.to_owned()).into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_url = normalize_sqlite_url(&cli.db);
    prepare_sqlite_file(&db_url)?;

    let clock = cli.today.map_or_else(Clock::default_clock, Clock::on);
    let services = AppServices::new_sqlite(&db_url, clock).await?;
    let mut store = services.load_profile_store().await?;
    log::debug!("opened {db_url} with {} profile(s)", store.profiles().len());

    match cli.command {
        Command::Profile(cmd) => match cmd {
            ProfileCommand::Create { name, avatar } => {
                commands::profile::create(&mut store, &name, avatar.as_deref()).await
            }
            ProfileCommand::List => {
                commands::profile::list(&store);
                Ok(())
            }
            ProfileCommand::Use { id } => commands::profile::switch(&mut store, id).await,
            ProfileCommand::Delete { id } => commands::profile::delete(&mut store, &id).await,
            ProfileCommand::Logout => commands::profile::logout(&mut store).await,
            ProfileCommand::Rename { name, avatar } => {
                commands::profile::rename(&mut store, &name, avatar.as_deref()).await
            }
        },
        Command::Deck(cmd) => {
            let decks = services.deck_service();
            match cmd {
                DeckCommand::List { search, category } => {
                    commands::deck::list(&store, &search, &category)
                }
                DeckCommand::Show { id } => commands::deck::show(&store, &id),
                DeckCommand::Create(fields) => {
                    commands::deck::create(&decks, &mut store, fields.into()).await
                }
                DeckCommand::Edit { id, fields } => {
                    commands::deck::edit(&decks, &mut store, &id, fields.into()).await
                }
                DeckCommand::Delete { id } => commands::deck::delete(&mut store, &id).await,
                DeckCommand::Export { id, out } => commands::deck::export(&decks, &store, &id, &out),
                DeckCommand::Import { id, file } => {
                    commands::deck::import(&decks, &mut store, &id, &file).await
                }
            }
        }
        Command::Study { target, mode } => {
            let prefs = services.preferences().load().await?;
            commands::study::run(&services.session_loop(), &mut store, &target, mode, prefs).await
        }
        Command::Stats => {
            let prefs = services.preferences().load().await?;
            commands::stats::show(&store, prefs.language)
        }
        Command::Prefs(cmd) => {
            let prefs = services.preferences();
            match cmd {
                PrefsCommand::Show => commands::prefs::show(&prefs).await,
                PrefsCommand::Language { code } => commands::prefs::language(&prefs, &code).await,
                PrefsCommand::Audio { enabled } => commands::prefs::audio(&prefs, enabled).await,
            }
        }
    }
}

impl From<DeckFields> for commands::deck::DeckArgs {
    fn from(fields: DeckFields) -> Self {
        Self {
            name: fields.name,
            category: fields.category,
            image: fields.image,
            mode: fields.mode,
            csv: fields.csv,
            cards: fields.cards,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
