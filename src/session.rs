//! Learning sessions and per-question interactions
//!
//! A session records one pass of a user through a content's questions.
//! Each answered question becomes an `Interaction` carrying the
//! spaced-repetition bookkeeping fields (ease factor, interval, repetition
//! count, next review time). No scheduler consumes these values yet; they
//! are stored for the future review engine.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// How a session presents its questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningMode {
    /// Fixed question order, full feedback
    Standard,
    /// Due-for-review questions only
    Review,
    /// Timed, feedback withheld until the end
    Exam,
}

impl LearningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningMode::Standard => "standard",
            LearningMode::Review => "review",
            LearningMode::Exam => "exam",
        }
    }
}

impl FromStr for LearningMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "default" => Ok(LearningMode::Standard),
            "review" | "spaced" => Ok(LearningMode::Review),
            "exam" | "test" => Ok(LearningMode::Exam),
            _ => Err(Error::Parse(format!("Unknown learning mode: {}", s))),
        }
    }
}

impl std::fmt::Display for LearningMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Abandoned,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::Abandoned => "abandoned",
        }
    }
}

impl FromStr for SessionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "active" | "started" | "in-progress" => Ok(SessionStatus::Active),
            "completed" | "done" | "finished" => Ok(SessionStatus::Completed),
            "abandoned" | "cancelled" | "canceled" => Ok(SessionStatus::Abandoned),
            _ => Err(Error::Parse(format!("Unknown session status: {}", s))),
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One pass of a user through a content's questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningSession {
    pub id: String,
    pub user_id: String,
    pub content_id: String,
    pub mode: LearningMode,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_questions: u32,
    pub answered_questions: u32,
    pub correct_answers: u32,
}

impl LearningSession {
    /// Start a new active session
    pub fn start(
        user_id: impl Into<String>,
        content_id: impl Into<String>,
        mode: LearningMode,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            content_id: content_id.into(),
            mode,
            status: SessionStatus::Active,
            started_at: Utc::now(),
            completed_at: None,
            total_questions: 0,
            answered_questions: 0,
            correct_answers: 0,
        }
    }

    /// Mark the session completed at the given time
    pub fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.status = SessionStatus::Completed;
        self.completed_at = Some(at);
        self
    }

    pub fn with_counts(mut self, total: u32, answered: u32, correct: u32) -> Self {
        self.total_questions = total;
        self.answered_questions = answered;
        self.correct_answers = correct;
        self
    }
}

/// Spaced-repetition bookkeeping carried by an interaction.
///
/// Stored values only; nothing computes with them in this phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub next_review_at: Option<DateTime<Utc>>,
    pub repetition_count: u32,
    pub ease_factor: f64,
    /// Review interval in days
    pub interval: u32,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            next_review_at: None,
            repetition_count: 0,
            ease_factor: 2.5,
            interval: 0,
        }
    }
}

/// Record of a single question attempt within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub session_id: String,
    pub question_id: String,
    /// The answer payload as submitted, stored opaquely
    pub user_answer: serde_json::Value,
    pub is_correct: bool,
    /// Time spent on the question in seconds
    pub time_spent: u32,
    pub feedback: Option<String>,
    pub hints: Vec<String>,
    pub review: ReviewState,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(
        session_id: impl Into<String>,
        question_id: impl Into<String>,
        user_answer: serde_json::Value,
        is_correct: bool,
        time_spent: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            question_id: question_id.into(),
            user_answer,
            is_correct,
            time_spent,
            feedback: None,
            hints: Vec::new(),
            review: ReviewState::default(),
            created_at: Utc::now(),
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    pub fn with_hints(mut self, hints: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_review(mut self, review: ReviewState) -> Self {
        self.review = review;
        self
    }
}
