//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - users(id, email, name, password_hash)
//! - user_preferences(user_id, learning_mode, settings JSON)
//! - learning_progress(user_id, counters, streaks, experience)
//! - content(id, title, file_path, topics, difficulty)
//! - questions(id, content_id, kind, correct_answer JSON)
//! - learning_sessions(id, user_id, content_id, mode, status, counts)
//! - interactions(id, session_id, question_id, answer, review bookkeeping)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
