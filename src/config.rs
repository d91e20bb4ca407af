//! Configuration - database connection string and optional TOML overrides
//!
//! The database is reachable through a `DATABASE_URL` connection string
//! (`sqlite://path`, `sqlite:path`, a bare path, or `sqlite::memory:`).
//! A `trainer.toml` next to the binary may override the database and port.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Default connection string when neither flag, env, nor config provide one
pub const DEFAULT_DATABASE_URL: &str = "sqlite:learning_trainer.db";

/// Default HTTP port for `serve`
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrainerConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("trainer.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TrainerConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TrainerConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Load `.env` into the process environment. Missing files are fine.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

/// Resolve the connection string: flag > DATABASE_URL > trainer.toml > default
pub fn resolve_database_url(flag: Option<String>, config: Option<&TrainerConfig>) -> String {
    flag.or_else(|| std::env::var("DATABASE_URL").ok())
        .or_else(|| config.and_then(|c| c.database.clone()))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// True when the connection string names an in-memory database
pub fn is_memory_url(url: &str) -> bool {
    matches!(strip_scheme(url), ":memory:" | "")
}

/// Filesystem path of a file-backed connection string
pub fn database_path_from_url(url: &str) -> crate::Result<PathBuf> {
    let path = strip_scheme(url);
    if path == ":memory:" || path.is_empty() {
        return Err(crate::Error::InvalidDatabaseUrl(format!(
            "{} is not file-backed",
            url
        )));
    }
    let path = path.split('?').next().unwrap_or(path);
    Ok(PathBuf::from(path))
}

/// Database segment of a connection string: the last path segment with any
/// query string and sqlite file extension stripped. In-memory URLs report
/// `memory`.
pub fn database_name_from_url(url: &str) -> String {
    if is_memory_url(url) {
        return "memory".to_string();
    }

    static SEGMENT_RE: OnceLock<Regex> = OnceLock::new();
    let re = SEGMENT_RE.get_or_init(|| Regex::new(r"/([^/?]+)(?:\?|$)").expect("segment regex"));

    let stripped = strip_scheme(url);
    let segment = re
        .captures(stripped)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or_else(|| stripped.split('?').next().unwrap_or(stripped));

    strip_sqlite_extension(segment).to_string()
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

fn strip_sqlite_extension(segment: &str) -> &str {
    for ext in [".db", ".sqlite3", ".sqlite"] {
        if let Some(stem) = segment.strip_suffix(ext) {
            return stem;
        }
    }
    segment
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
