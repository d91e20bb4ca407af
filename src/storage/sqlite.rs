//! SQLite storage implementation

use std::path::Path;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::config;
use crate::content::{Content, CorrectAnswer, Question, QuestionKind, QuestionOptions};
use crate::session::{Interaction, LearningMode, LearningSession, ReviewState, SessionStatus};
use crate::user::{
    CustomSettings, FeedbackSettings, GamificationSettings, LearningProgress, User,
    UserPreferences,
};
use super::schema;

/// SQLite-backed storage for the learning domain
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open from a connection string (`sqlite://path`, `sqlite:path`,
    /// a bare path, or `sqlite::memory:`)
    pub fn open_from_url(url: &str) -> Result<Self> {
        if config::is_memory_url(url) {
            return Self::open_in_memory();
        }
        Self::open(&config::database_path_from_url(url)?)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute("PRAGMA foreign_keys = ON", [])?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Connectivity Probes ==========

    /// Execute a trivial query to confirm the connection is usable
    pub fn ping(&self) -> Result<()> {
        let _: i64 = self.conn.query_row("SELECT 1", [], |row| row.get(0))?;
        Ok(())
    }

    /// Name of the attached main database: the file stem of its path,
    /// or `memory` for an in-memory database
    pub fn database_name(&self) -> Result<String> {
        let file: String = self.conn.query_row(
            "SELECT file FROM pragma_database_list WHERE name = 'main'",
            [],
            |row| row.get(0),
        )?;
        if file.is_empty() {
            return Ok("memory".to_string());
        }
        Ok(Path::new(&file)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or(file))
    }

    /// Probe for a loadable vector-search extension (sqlite-vec / sqlite-vss).
    ///
    /// The probe itself always executes; the boolean reports whether an
    /// extension has registered its version function on this connection.
    pub fn vector_search_available(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pragma_function_list WHERE name IN ('vec_version', 'vss_version')",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ========== User Operations ==========

    /// Insert a user, keeping the existing row when the email is taken.
    /// Returns the stored row either way.
    pub fn upsert_user(&self, user: &User) -> Result<User> {
        self.conn.execute(
            r#"
            INSERT INTO users (id, email, name, password_hash, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(email) DO NOTHING
            "#,
            params![
                user.id,
                user.email,
                user.name,
                user.password_hash,
                user.created_at,
                user.updated_at,
            ],
        )?;
        self.get_user_by_email(&user.email)?
            .ok_or_else(|| Error::NotFound(format!("user {}", user.email)))
    }

    /// Get a user by id
    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.conn
            .query_row(
                "SELECT id, email, name, password_hash, created_at, updated_at FROM users WHERE id = ?1",
                [id],
                row_to_user,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a user by email
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.conn
            .query_row(
                "SELECT id, email, name, password_hash, created_at, updated_at FROM users WHERE email = ?1",
                [email],
                row_to_user,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Count all users
    pub fn count_users(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Preferences Operations ==========

    /// Insert or replace the single preferences row for a user
    pub fn upsert_preferences(&self, prefs: &UserPreferences) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO user_preferences
                (id, user_id, learning_mode, scheduling_enabled,
                 custom_settings, feedback_settings, gamification_settings)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(user_id) DO UPDATE SET
                learning_mode = excluded.learning_mode,
                scheduling_enabled = excluded.scheduling_enabled,
                custom_settings = excluded.custom_settings,
                feedback_settings = excluded.feedback_settings,
                gamification_settings = excluded.gamification_settings
            "#,
            params![
                prefs.id,
                prefs.user_id,
                prefs.learning_mode.as_str(),
                prefs.scheduling_enabled,
                serde_json::to_string(&prefs.custom_settings)?,
                serde_json::to_string(&prefs.feedback_settings)?,
                serde_json::to_string(&prefs.gamification_settings)?,
            ],
        )?;
        Ok(())
    }

    /// Get the preferences row for a user
    pub fn get_preferences(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        self.conn
            .query_row(
                r#"
                SELECT id, user_id, learning_mode, scheduling_enabled,
                       custom_settings, feedback_settings, gamification_settings
                FROM user_preferences WHERE user_id = ?1
                "#,
                [user_id],
                row_to_preferences,
            )
            .optional()
            .map_err(Into::into)
    }

    // ========== Progress Operations ==========

    /// Insert or replace the single progress row for a user
    pub fn upsert_progress(&self, progress: &LearningProgress) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO learning_progress
                (id, user_id, total_sessions, total_questions, correct_answers,
                 total_time_spent, level, experience_points, current_streak,
                 longest_streak, last_study_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(user_id) DO UPDATE SET
                total_sessions = excluded.total_sessions,
                total_questions = excluded.total_questions,
                correct_answers = excluded.correct_answers,
                total_time_spent = excluded.total_time_spent,
                level = excluded.level,
                experience_points = excluded.experience_points,
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak,
                last_study_date = excluded.last_study_date
            "#,
            params![
                progress.id,
                progress.user_id,
                progress.total_sessions,
                progress.total_questions,
                progress.correct_answers,
                progress.total_time_spent as i64,
                progress.level,
                progress.experience_points as i64,
                progress.current_streak,
                progress.longest_streak,
                progress.last_study_date,
            ],
        )?;
        Ok(())
    }

    /// Update the existing progress row for a user
    pub fn update_progress(&self, progress: &LearningProgress) -> Result<()> {
        let updated = self.conn.execute(
            r#"
            UPDATE learning_progress SET
                total_sessions = ?2,
                total_questions = ?3,
                correct_answers = ?4,
                total_time_spent = ?5,
                level = ?6,
                experience_points = ?7,
                current_streak = ?8,
                longest_streak = ?9,
                last_study_date = ?10
            WHERE user_id = ?1
            "#,
            params![
                progress.user_id,
                progress.total_sessions,
                progress.total_questions,
                progress.correct_answers,
                progress.total_time_spent as i64,
                progress.level,
                progress.experience_points as i64,
                progress.current_streak,
                progress.longest_streak,
                progress.last_study_date,
            ],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("progress for user {}", progress.user_id)));
        }
        Ok(())
    }

    /// Get the progress row for a user
    pub fn get_progress(&self, user_id: &str) -> Result<Option<LearningProgress>> {
        self.conn
            .query_row(
                r#"
                SELECT id, user_id, total_sessions, total_questions, correct_answers,
                       total_time_spent, level, experience_points, current_streak,
                       longest_streak, last_study_date
                FROM learning_progress WHERE user_id = ?1
                "#,
                [user_id],
                row_to_progress,
            )
            .optional()
            .map_err(Into::into)
    }

    // ========== Content Operations ==========

    /// Insert a content row
    pub fn insert_content(&self, content: &Content) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO content
                (id, title, description, file_path, file_type, topics,
                 difficulty, analyzed_at, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                content.id,
                content.title,
                content.description,
                content.file_path,
                content.file_type,
                serde_json::to_string(&content.topics)?,
                content.difficulty,
                content.analyzed_at,
                content.created_at,
                content.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a content row by id
    pub fn get_content(&self, id: &str) -> Result<Option<Content>> {
        self.conn
            .query_row(
                r#"
                SELECT id, title, description, file_path, file_type, topics,
                       difficulty, analyzed_at, created_at, updated_at
                FROM content WHERE id = ?1
                "#,
                [id],
                row_to_content,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all content, oldest first
    pub fn list_content(&self) -> Result<Vec<Content>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, title, description, file_path, file_type, topics,
                   difficulty, analyzed_at, created_at, updated_at
            FROM content ORDER BY created_at
            "#,
        )?;

        let rows = stmt
            .query_map([], row_to_content)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(rows)
    }

    /// Count all content rows
    pub fn count_content(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM content", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Question Operations ==========

    /// Insert a question
    pub fn insert_question(&self, question: &Question) -> Result<()> {
        let options = question
            .options
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn.execute(
            r#"
            INSERT INTO questions
                (id, content_id, kind, question_text, options, correct_answer,
                 explanation, difficulty, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                question.id,
                question.content_id,
                question.kind.as_str(),
                question.question_text,
                options,
                serde_json::to_string(&question.correct_answer)?,
                question.explanation,
                question.difficulty,
                question.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a question by id
    pub fn get_question(&self, id: &str) -> Result<Option<Question>> {
        self.conn
            .query_row(
                r#"
                SELECT id, content_id, kind, question_text, options, correct_answer,
                       explanation, difficulty, created_at
                FROM questions WHERE id = ?1
                "#,
                [id],
                row_to_question,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All questions belonging to a content row, oldest first
    pub fn questions_for_content(&self, content_id: &str) -> Result<Vec<Question>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, content_id, kind, question_text, options, correct_answer,
                   explanation, difficulty, created_at
            FROM questions WHERE content_id = ?1 ORDER BY created_at
            "#,
        )?;

        let rows = stmt
            .query_map([content_id], row_to_question)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(rows)
    }

    /// Count all questions
    pub fn count_questions(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Session Operations ==========

    /// Insert a learning session
    pub fn insert_session(&self, session: &LearningSession) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO learning_sessions
                (id, user_id, content_id, mode, status, started_at, completed_at,
                 total_questions, answered_questions, correct_answers)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                session.id,
                session.user_id,
                session.content_id,
                session.mode.as_str(),
                session.status.as_str(),
                session.started_at,
                session.completed_at,
                session.total_questions,
                session.answered_questions,
                session.correct_answers,
            ],
        )?;
        Ok(())
    }

    /// Get a session by id
    pub fn get_session(&self, id: &str) -> Result<Option<LearningSession>> {
        self.conn
            .query_row(
                r#"
                SELECT id, user_id, content_id, mode, status, started_at, completed_at,
                       total_questions, answered_questions, correct_answers
                FROM learning_sessions WHERE id = ?1
                "#,
                [id],
                row_to_session,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All sessions for a user, oldest first
    pub fn sessions_for_user(&self, user_id: &str) -> Result<Vec<LearningSession>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, user_id, content_id, mode, status, started_at, completed_at,
                   total_questions, answered_questions, correct_answers
            FROM learning_sessions WHERE user_id = ?1 ORDER BY started_at
            "#,
        )?;

        let rows = stmt
            .query_map([user_id], row_to_session)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(rows)
    }

    /// Count all sessions
    pub fn count_sessions(&self) -> Result<usize> {
        let count: i64 =
            self.conn.query_row("SELECT COUNT(*) FROM learning_sessions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Interaction Operations ==========

    /// Insert an interaction
    pub fn insert_interaction(&self, interaction: &Interaction) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO interactions
                (id, session_id, question_id, user_answer, is_correct, time_spent,
                 feedback, hints, next_review_at, repetition_count, ease_factor,
                 interval, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                interaction.id,
                interaction.session_id,
                interaction.question_id,
                serde_json::to_string(&interaction.user_answer)?,
                interaction.is_correct,
                interaction.time_spent,
                interaction.feedback,
                serde_json::to_string(&interaction.hints)?,
                interaction.review.next_review_at,
                interaction.review.repetition_count,
                interaction.review.ease_factor,
                interaction.review.interval,
                interaction.created_at,
            ],
        )?;
        Ok(())
    }

    /// All interactions recorded within a session, oldest first
    pub fn interactions_for_session(&self, session_id: &str) -> Result<Vec<Interaction>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, session_id, question_id, user_answer, is_correct, time_spent,
                   feedback, hints, next_review_at, repetition_count, ease_factor,
                   interval, created_at
            FROM interactions WHERE session_id = ?1 ORDER BY created_at
            "#,
        )?;

        let rows = stmt
            .query_map([session_id], row_to_interaction)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(rows)
    }

    /// Count all interactions
    pub fn count_interactions(&self) -> Result<usize> {
        let count: i64 =
            self.conn.query_row("SELECT COUNT(*) FROM interactions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Bulk Operations ==========

    /// Begin a transaction for bulk operations
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit(&mut self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    /// Rollback a transaction
    pub fn rollback(&mut self) -> Result<()> {
        self.conn.execute("ROLLBACK", [])?;
        Ok(())
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            users: self.count_users()?,
            content: self.count_content()?,
            questions: self.count_questions()?,
            sessions: self.count_sessions()?,
            interactions: self.count_interactions()?,
        })
    }
}

// ========== Row Mappers ==========

fn json_col<T: serde::de::DeserializeOwned>(idx: usize, raw: String) -> rusqlite::Result<T> {
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn enum_col<T>(idx: usize, raw: &str) -> rusqlite::Result<T>
where
    T: FromStr<Err = Error>,
{
    raw.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn row_to_preferences(row: &rusqlite::Row) -> rusqlite::Result<UserPreferences> {
    let mode_str: String = row.get(2)?;
    let custom: String = row.get(4)?;
    let feedback: String = row.get(5)?;
    let gamification: String = row.get(6)?;

    Ok(UserPreferences {
        id: row.get(0)?,
        user_id: row.get(1)?,
        learning_mode: enum_col::<LearningMode>(2, &mode_str)?,
        scheduling_enabled: row.get(3)?,
        custom_settings: json_col::<CustomSettings>(4, custom)?,
        feedback_settings: json_col::<FeedbackSettings>(5, feedback)?,
        gamification_settings: json_col::<GamificationSettings>(6, gamification)?,
    })
}

fn row_to_progress(row: &rusqlite::Row) -> rusqlite::Result<LearningProgress> {
    let time_spent: i64 = row.get(5)?;
    let experience: i64 = row.get(7)?;

    Ok(LearningProgress {
        id: row.get(0)?,
        user_id: row.get(1)?,
        total_sessions: row.get(2)?,
        total_questions: row.get(3)?,
        correct_answers: row.get(4)?,
        total_time_spent: time_spent as u64,
        level: row.get(6)?,
        experience_points: experience as u64,
        current_streak: row.get(8)?,
        longest_streak: row.get(9)?,
        last_study_date: row.get(10)?,
    })
}

fn row_to_content(row: &rusqlite::Row) -> rusqlite::Result<Content> {
    let topics: String = row.get(5)?;

    Ok(Content {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        file_path: row.get(3)?,
        file_type: row.get(4)?,
        topics: json_col::<Vec<String>>(5, topics)?,
        difficulty: row.get(6)?,
        analyzed_at: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn row_to_question(row: &rusqlite::Row) -> rusqlite::Result<Question> {
    let kind_str: String = row.get(2)?;
    let options: Option<String> = row.get(4)?;
    let correct: String = row.get(5)?;

    Ok(Question {
        id: row.get(0)?,
        content_id: row.get(1)?,
        kind: enum_col::<QuestionKind>(2, &kind_str)?,
        question_text: row.get(3)?,
        options: options
            .map(|raw| json_col::<QuestionOptions>(4, raw))
            .transpose()?,
        correct_answer: json_col::<CorrectAnswer>(5, correct)?,
        explanation: row.get(6)?,
        difficulty: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn row_to_session(row: &rusqlite::Row) -> rusqlite::Result<LearningSession> {
    let mode_str: String = row.get(3)?;
    let status_str: String = row.get(4)?;

    Ok(LearningSession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        content_id: row.get(2)?,
        mode: enum_col::<LearningMode>(3, &mode_str)?,
        status: enum_col::<SessionStatus>(4, &status_str)?,
        started_at: row.get(5)?,
        completed_at: row.get(6)?,
        total_questions: row.get(7)?,
        answered_questions: row.get(8)?,
        correct_answers: row.get(9)?,
    })
}

fn row_to_interaction(row: &rusqlite::Row) -> rusqlite::Result<Interaction> {
    let answer: String = row.get(3)?;
    let hints: String = row.get(7)?;
    let next_review_at: Option<DateTime<Utc>> = row.get(8)?;

    Ok(Interaction {
        id: row.get(0)?,
        session_id: row.get(1)?,
        question_id: row.get(2)?,
        user_answer: json_col::<serde_json::Value>(3, answer)?,
        is_correct: row.get(4)?,
        time_spent: row.get(5)?,
        feedback: row.get(6)?,
        hints: json_col::<Vec<String>>(7, hints)?,
        review: ReviewState {
            next_review_at,
            repetition_count: row.get(9)?,
            ease_factor: row.get(10)?,
            interval: row.get(11)?,
        },
        created_at: row.get(12)?,
    })
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub users: usize,
    pub content: usize,
    pub questions: usize,
    pub sessions: usize,
    pub interactions: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Users: {}", self.users)?;
        writeln!(f, "  Content: {}", self.content)?;
        writeln!(f, "  Questions: {}", self.questions)?;
        writeln!(f, "  Sessions: {}", self.sessions)?;
        writeln!(f, "  Interactions: {}", self.interactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Content, CorrectAnswer, Question, QuestionKind};
    use crate::session::{Interaction, LearningMode, LearningSession, ReviewState};
    use crate::user::{LearningProgress, User, UserPreferences};
    use chrono::Duration;

    fn sample_user() -> User {
        User::new("test@example.com", "password123")
            .unwrap()
            .with_name("Test User")
    }

    fn sample_content() -> Content {
        Content::new("Introduction to TypeScript", "/content/typescript-intro.md", "md", 4)
            .with_description("Learn the basics of TypeScript.")
            .with_topics(["TypeScript", "Programming"])
    }

    #[test]
    fn test_user_upsert_keeps_existing_row() {
        let store = SqliteStore::open_in_memory().unwrap();

        let first = store.upsert_user(&sample_user()).unwrap();
        let second = store.upsert_user(&sample_user()).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.count_users().unwrap(), 1);

        let fetched = store.get_user_by_email("test@example.com").unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("Test User"));
    }

    #[test]
    fn test_one_preferences_row_per_user() {
        let store = SqliteStore::open_in_memory().unwrap();
        let user = store.upsert_user(&sample_user()).unwrap();

        store.upsert_preferences(&UserPreferences::for_user(&user.id)).unwrap();

        let mut updated = UserPreferences::for_user(&user.id);
        updated.learning_mode = LearningMode::Review;
        store.upsert_preferences(&updated).unwrap();

        let fetched = store.get_preferences(&user.id).unwrap().unwrap();
        assert_eq!(fetched.learning_mode, LearningMode::Review);

        let count: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM user_preferences", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_progress_update() {
        let store = SqliteStore::open_in_memory().unwrap();
        let user = store.upsert_user(&sample_user()).unwrap();

        store.upsert_progress(&LearningProgress::for_user(&user.id)).unwrap();

        let mut progress = store.get_progress(&user.id).unwrap().unwrap();
        progress.total_sessions = 1;
        progress.total_questions = 2;
        progress.correct_answers = 1;
        progress.experience_points = 50;
        store.update_progress(&progress).unwrap();

        let fetched = store.get_progress(&user.id).unwrap().unwrap();
        assert_eq!(fetched.total_sessions, 1);
        assert_eq!(fetched.experience_points, 50);

        let orphan = LearningProgress::for_user("nobody");
        assert!(store.update_progress(&orphan).is_err());
    }

    #[test]
    fn test_content_and_questions() {
        let store = SqliteStore::open_in_memory().unwrap();

        let content = sample_content();
        store.insert_content(&content).unwrap();

        let question = Question::new(
            &content.id,
            QuestionKind::MultipleChoice,
            "What is TypeScript?",
            CorrectAnswer::Exact { answer: "A superset of JavaScript".to_string() },
            3,
        )
        .with_choices(["A JavaScript library", "A superset of JavaScript"])
        .with_explanation("TypeScript compiles to plain JavaScript.");
        store.insert_question(&question).unwrap();

        let free_text = Question::new(
            &content.id,
            QuestionKind::FreeText,
            "Explain interface vs type.",
            CorrectAnswer::Keywords { keywords: vec!["interface".into(), "type".into()] },
            7,
        );
        store.insert_question(&free_text).unwrap();

        let fetched = store.get_content(&content.id).unwrap().unwrap();
        assert_eq!(fetched.topics, vec!["TypeScript", "Programming"]);
        assert_eq!(store.list_content().unwrap().len(), 1);

        let questions = store.questions_for_content(&content.id).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].kind, QuestionKind::MultipleChoice);
        assert!(questions[0].options.is_some());
        assert!(questions[1].options.is_none());

        let refetched = store.get_question(&question.id).unwrap().unwrap();
        assert_eq!(refetched.question_text, "What is TypeScript?");
    }

    #[test]
    fn test_session_with_interactions() {
        let store = SqliteStore::open_in_memory().unwrap();
        let user = store.upsert_user(&sample_user()).unwrap();
        let content = sample_content();
        store.insert_content(&content).unwrap();

        let question = Question::new(
            &content.id,
            QuestionKind::MultipleChoice,
            "What is TypeScript?",
            CorrectAnswer::Exact { answer: "A superset of JavaScript".to_string() },
            3,
        );
        store.insert_question(&question).unwrap();

        let session = LearningSession::start(&user.id, &content.id, LearningMode::Standard)
            .with_counts(2, 2, 1)
            .completed(Utc::now());
        store.insert_session(&session).unwrap();

        let interaction = Interaction::new(
            &session.id,
            &question.id,
            serde_json::json!({"answer": "A superset of JavaScript"}),
            true,
            45,
        )
        .with_feedback("Excellent! You got it right.")
        .with_review(ReviewState {
            next_review_at: Some(Utc::now() + Duration::days(1)),
            repetition_count: 1,
            ease_factor: 2.6,
            interval: 1,
        });
        store.insert_interaction(&interaction).unwrap();

        let fetched = store.get_session(&session.id).unwrap().unwrap();
        assert_eq!(fetched.mode, LearningMode::Standard);
        assert_eq!(store.get_user(&user.id).unwrap().unwrap().email, user.email);

        let sessions = store.sessions_for_user(&user.id).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].status, crate::session::SessionStatus::Completed);

        let interactions = store.interactions_for_session(&session.id).unwrap();
        assert_eq!(interactions.len(), 1);
        assert!(interactions[0].is_correct);
        assert_eq!(interactions[0].review.ease_factor, 2.6);
        assert_eq!(interactions[0].review.interval, 1);
        assert!(interactions[0].review.next_review_at.is_some());
        assert_eq!(interactions[0].user_answer["answer"], "A superset of JavaScript");
    }

    #[test]
    fn test_ping_and_probes() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.ping().unwrap();
        assert_eq!(store.database_name().unwrap(), "memory");

        // The probe must execute whether or not a vector extension is loaded
        let available = store.vector_search_available().unwrap();
        assert!(!available);
    }

    #[test]
    fn test_rollback_discards_batch() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.begin_transaction().unwrap();
        store.insert_content(&sample_content()).unwrap();
        store.rollback().unwrap();

        assert_eq!(store.count_content().unwrap(), 0);
    }

    #[test]
    fn test_stats() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_user(&sample_user()).unwrap();
        store.insert_content(&sample_content()).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.users, 1);
        assert_eq!(stats.content, 1);
        assert_eq!(stats.questions, 0);

        let rendered = stats.to_string();
        assert!(rendered.contains("Users: 1"));
    }
}
