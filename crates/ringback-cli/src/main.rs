//! `ringback` — keep track of who you haven't called in a while.
//!
//! # Usage
//!
//! ```text
//! ringback add "Ada Lovelace" --date 2024-04-30
//! ringback list --search ada
//! ringback called 3f0c…
//! ringback export --output
//! ringback import ringback-backup.json
//! ```

mod app;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ringback_core::RecordId;
use ringback_service::ContactService;
use ringback_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ringback", version, about = "Remember to call the people you care about")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "ringback.toml")]
  config: PathBuf,

  /// Database file; overrides `store_path` from the config.
  #[arg(long)]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show contacts, most overdue first.
  List {
    /// Only show names containing this text.
    #[arg(short, long, default_value = "")]
    search: String,
  },
  /// Add a contact.
  Add {
    name: String,
    /// Day of the last contact (YYYY-MM-DD); defaults to now.
    #[arg(short, long)]
    date: Option<String>,
  },
  /// Change a contact's name or last contact date.
  Edit {
    id: String,
    #[arg(short, long)]
    name: Option<String>,
    /// Day of the last contact (YYYY-MM-DD).
    #[arg(short, long)]
    date: Option<String>,
  },
  /// Record that you just contacted someone.
  Called { id: String },
  /// Delete a contact.
  Remove { id: String },
  /// Write a backup of every contact as JSON.
  Export {
    /// Output file; stdout if omitted, the default backup name if given
    /// without a value.
    #[arg(
      short,
      long,
      num_args = 0..=1,
      default_missing_value = ringback_backup::DEFAULT_FILE_NAME
    )]
    output: Option<PathBuf>,
  },
  /// Replace every contact with the contents of a backup.
  Import { file: PathBuf },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so `export` can write JSON to stdout.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let cfg = Settings::load(&cli.config)?;
  let store_path = cli
    .store
    .as_deref()
    .map(settings::expand_tilde)
    .unwrap_or(cfg.store_path);

  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let mut contacts = ContactService::load(store)
    .await
    .context("failed to load contacts")?;

  match cli.command {
    Command::List { search } => app::list(&contacts, &search),
    Command::Add { name, date } => app::add(&mut contacts, name, date.as_deref()).await?,
    Command::Edit { id, name, date } => {
      app::edit(&mut contacts, RecordId::from(id), name, date.as_deref()).await?
    }
    Command::Called { id } => app::called(&mut contacts, RecordId::from(id)).await?,
    Command::Remove { id } => app::remove(&mut contacts, RecordId::from(id)).await?,
    Command::Export { output } => app::export(&contacts, output.as_deref())?,
    Command::Import { file } => app::import(&mut contacts, &file).await?,
  }

  Ok(())
}
