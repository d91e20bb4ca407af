//! # Learning Trainer - AI-assisted spaced-repetition learning platform
//!
//! Phase 1 foundation: routing/rendering shell, SQLite-backed persistence,
//! and a seed command for local development.
//!
//! Learning Trainer provides:
//! - A minimal web shell (home page + document metadata) served over axum
//! - SQLite-backed storage for users, content, questions, and sessions
//! - Inert spaced-repetition bookkeeping on recorded interactions
//! - A one-shot seed routine populating demo rows

pub mod config;
pub mod user;
pub mod content;
pub mod session;
pub mod storage;
pub mod seed;
pub mod server;

// Re-exports for convenient access
pub use user::{User, UserPreferences, LearningProgress};
pub use content::{Content, Question, QuestionKind};
pub use session::{LearningSession, Interaction, LearningMode, SessionStatus};
pub use storage::SqliteStore;

/// Result type alias for Learning Trainer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Learning Trainer operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
