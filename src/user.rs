//! User account, preferences, and aggregate learning progress
//!
//! A user owns exactly one `UserPreferences` and one `LearningProgress`
//! row; the storage layer enforces that through upsert semantics.

use crate::session::LearningMode;
use crate::{Error, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    /// Argon2id hash in PHC string format
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly hashed password
    pub fn new(email: impl Into<String>, password: &str) -> Result<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            name: None,
            password_hash: hash_password(password)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Hash a password with Argon2id and a random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Per-user configuration controlling learning mode and display options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub id: String,
    pub user_id: String,
    pub learning_mode: LearningMode,
    pub scheduling_enabled: bool,
    pub custom_settings: CustomSettings,
    pub feedback_settings: FeedbackSettings,
    pub gamification_settings: GamificationSettings,
}

impl UserPreferences {
    /// Default preferences for a new user
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            learning_mode: LearningMode::Standard,
            scheduling_enabled: false,
            custom_settings: CustomSettings::default(),
            feedback_settings: FeedbackSettings::default(),
            gamification_settings: GamificationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomSettings {
    pub questions_per_session: u32,
    /// Inclusive [low, high] difficulty bounds on a 1..=10 scale
    pub difficulty_range: [u8; 2],
    pub feedback_level: FeedbackLevel,
}

impl Default for CustomSettings {
    fn default() -> Self {
        Self {
            questions_per_session: 10,
            difficulty_range: [3, 7],
            feedback_level: FeedbackLevel::Detailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackLevel {
    Brief,
    Detailed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSettings {
    pub show_explanations: bool,
    pub show_hints: bool,
    pub immediate_correction: bool,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            show_explanations: true,
            show_hints: true,
            immediate_correction: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationSettings {
    pub enabled: bool,
    pub show_badges: bool,
    pub show_leaderboard: bool,
}

impl Default for GamificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            show_badges: true,
            show_leaderboard: false,
        }
    }
}

/// Per-user aggregate counters, updated after sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningProgress {
    pub id: String,
    pub user_id: String,
    pub total_sessions: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Accumulated answer time in seconds
    pub total_time_spent: u64,
    pub level: u32,
    pub experience_points: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_study_date: Option<DateTime<Utc>>,
}

impl LearningProgress {
    /// Zeroed progress for a new user
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            total_sessions: 0,
            total_questions: 0,
            correct_answers: 0,
            total_time_spent: 0,
            level: 1,
            experience_points: 0,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
        }
    }
}
