//! Runtime configuration, layered from an optional TOML file and
//! `RINGBACK_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Where the database lives unless configured otherwise.
pub const DEFAULT_STORE_PATH: &str = "~/.local/share/ringback/people.db";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
  /// SQLite database file; a leading `~/` is expanded.
  pub store_path: PathBuf,
}

impl Settings {
  /// Read `file` (if it exists) and then the environment, over defaults.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("RINGBACK"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    let mut cfg: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
