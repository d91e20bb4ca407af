//! Database schema definitions

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    name TEXT,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

/// SQL to create the user_preferences table
/// One row per user, enforced through the UNIQUE user_id column
pub const CREATE_USER_PREFERENCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS user_preferences (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE REFERENCES users(id),
    learning_mode TEXT NOT NULL,
    scheduling_enabled INTEGER NOT NULL DEFAULT 0,
    custom_settings TEXT NOT NULL,
    feedback_settings TEXT NOT NULL,
    gamification_settings TEXT NOT NULL
)
"#;

/// SQL to create the learning_progress table
/// One row per user, enforced through the UNIQUE user_id column
pub const CREATE_LEARNING_PROGRESS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS learning_progress (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE REFERENCES users(id),
    total_sessions INTEGER NOT NULL DEFAULT 0,
    total_questions INTEGER NOT NULL DEFAULT 0,
    correct_answers INTEGER NOT NULL DEFAULT 0,
    total_time_spent INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1,
    experience_points INTEGER NOT NULL DEFAULT 0,
    current_streak INTEGER NOT NULL DEFAULT 0,
    longest_streak INTEGER NOT NULL DEFAULT 0,
    last_study_date TEXT
)
"#;

/// SQL to create the content table
pub const CREATE_CONTENT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS content (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    file_path TEXT NOT NULL,
    file_type TEXT NOT NULL,
    topics TEXT NOT NULL,
    difficulty INTEGER NOT NULL,
    analyzed_at TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

/// SQL to create the questions table
pub const CREATE_QUESTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id TEXT PRIMARY KEY,
    content_id TEXT NOT NULL REFERENCES content(id),
    kind TEXT NOT NULL,
    question_text TEXT NOT NULL,
    options TEXT,
    correct_answer TEXT NOT NULL,
    explanation TEXT,
    difficulty INTEGER NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// SQL to create the learning_sessions table
pub const CREATE_LEARNING_SESSIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS learning_sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id),
    content_id TEXT NOT NULL REFERENCES content(id),
    mode TEXT NOT NULL,
    status TEXT NOT NULL,
    started_at TEXT NOT NULL,
    completed_at TEXT,
    total_questions INTEGER NOT NULL DEFAULT 0,
    answered_questions INTEGER NOT NULL DEFAULT 0,
    correct_answers INTEGER NOT NULL DEFAULT 0
)
"#;

/// SQL to create the interactions table
/// The review columns (next_review_at, repetition_count, ease_factor,
/// interval) are stored bookkeeping for the future review scheduler
pub const CREATE_INTERACTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS interactions (
    id TEXT PRIMARY KEY,
    session_id TEXT NOT NULL REFERENCES learning_sessions(id),
    question_id TEXT NOT NULL REFERENCES questions(id),
    user_answer TEXT NOT NULL,
    is_correct INTEGER NOT NULL,
    time_spent INTEGER NOT NULL DEFAULT 0,
    feedback TEXT,
    hints TEXT NOT NULL,
    next_review_at TEXT,
    repetition_count INTEGER NOT NULL DEFAULT 0,
    ease_factor REAL NOT NULL DEFAULT 2.5,
    interval INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_questions_content ON questions(content_id)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_user ON learning_sessions(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_content ON learning_sessions(content_id)",
    "CREATE INDEX IF NOT EXISTS idx_interactions_session ON interactions(session_id)",
    "CREATE INDEX IF NOT EXISTS idx_interactions_question ON interactions(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_interactions_next_review ON interactions(next_review_at)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_USERS_TABLE,
        CREATE_USER_PREFERENCES_TABLE,
        CREATE_LEARNING_PROGRESS_TABLE,
        CREATE_CONTENT_TABLE,
        CREATE_QUESTIONS_TABLE,
        CREATE_LEARNING_SESSIONS_TABLE,
        CREATE_INTERACTIONS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
