//! One-shot seed routine populating demo rows for local development
//!
//! Re-running is safe for the demo user (upserted by email); content,
//! questions, and sessions are created fresh on every run.

use chrono::{Duration, Utc};
use crate::content::{Content, CorrectAnswer, Question, QuestionKind};
use crate::session::{Interaction, LearningMode, LearningSession, ReviewState};
use crate::storage::SqliteStore;
use crate::user::{LearningProgress, User, UserPreferences};
use crate::Result;

pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "password123";

/// Row counts produced by a seed run
#[derive(Debug)]
pub struct SeedSummary {
    pub user_email: String,
    pub questions: usize,
    pub interactions: usize,
}

/// Insert the demo user, sample content with questions, and one completed
/// session, then update the user's aggregate progress.
pub fn run(store: &mut SqliteStore) -> Result<SeedSummary> {
    println!("🌱 Starting database seeding...");

    let user = store.upsert_user(
        &User::new(DEMO_EMAIL, DEMO_PASSWORD)?.with_name("Test User"),
    )?;
    store.upsert_preferences(&UserPreferences::for_user(&user.id))?;
    store.upsert_progress(&LearningProgress::for_user(&user.id))?;

    println!("✅ Created test user: {}", user.email);

    let content = Content::new(
        "Introduction to TypeScript",
        "/content/typescript-intro.md",
        "md",
        4,
    )
    .with_description(
        "Learn the basics of TypeScript including types, interfaces, and generics.",
    )
    .with_topics(["TypeScript", "Programming", "JavaScript"])
    .analyzed(Utc::now());
    store.insert_content(&content)?;

    println!("✅ Created sample content: {}", content.title);

    let questions = vec![
        Question::new(
            &content.id,
            QuestionKind::MultipleChoice,
            "What is TypeScript?",
            CorrectAnswer::Exact {
                answer: "A superset of JavaScript".to_string(),
            },
            3,
        )
        .with_choices([
            "A JavaScript library",
            "A superset of JavaScript",
            "A database",
            "A CSS framework",
        ])
        .with_explanation(
            "TypeScript is a strongly typed superset of JavaScript that compiles to plain JavaScript.",
        ),
        Question::new(
            &content.id,
            QuestionKind::MultipleChoice,
            "Which keyword is used to define a type in TypeScript?",
            CorrectAnswer::Exact {
                answer: "Both type and interface".to_string(),
            },
            5,
        )
        .with_choices(["class", "type", "interface", "Both type and interface"])
        .with_explanation(
            "TypeScript provides both \"type\" and \"interface\" keywords for defining custom types.",
        ),
        Question::new(
            &content.id,
            QuestionKind::FreeText,
            "Explain the difference between \"interface\" and \"type\" in TypeScript.",
            CorrectAnswer::Keywords {
                keywords: vec![
                    "interface".to_string(),
                    "type".to_string(),
                    "extend".to_string(),
                    "union".to_string(),
                    "intersection".to_string(),
                    "declaration merging".to_string(),
                ],
            },
            7,
        )
        .with_explanation(
            "Interfaces can be extended and merged, while types can use unions and intersections. Both can describe object shapes.",
        ),
    ];

    // The question insertions are independent of one another; batch them
    store.begin_transaction()?;
    for question in &questions {
        store.insert_question(question)?;
    }
    store.commit()?;

    println!("✅ Created {} sample questions", questions.len());

    let now = Utc::now();
    let mut session = LearningSession::start(&user.id, &content.id, LearningMode::Standard)
        .with_counts(2, 2, 1)
        .completed(now);
    session.started_at = now - Duration::hours(1);
    store.insert_session(&session)?;

    let interactions = [
        Interaction::new(
            &session.id,
            &questions[0].id,
            serde_json::json!({ "answer": "A superset of JavaScript" }),
            true,
            45,
        )
        .with_feedback("Excellent! You got it right.")
        .with_review(ReviewState {
            next_review_at: Some(now + Duration::days(1)),
            repetition_count: 1,
            ease_factor: 2.6,
            interval: 1,
        }),
        Interaction::new(
            &session.id,
            &questions[1].id,
            serde_json::json!({ "answer": "type" }),
            false,
            60,
        )
        .with_feedback("Not quite. TypeScript provides both \"type\" and \"interface\" keywords.")
        .with_hints(["Think about multiple ways to define types in TypeScript"])
        .with_review(ReviewState {
            next_review_at: Some(now + Duration::minutes(10)),
            repetition_count: 0,
            ease_factor: 2.5,
            interval: 0,
        }),
    ];
    for interaction in &interactions {
        store.insert_interaction(interaction)?;
    }

    println!("✅ Created sample learning session");

    let mut progress = store
        .get_progress(&user.id)?
        .unwrap_or_else(|| LearningProgress::for_user(&user.id));
    progress.total_sessions = 1;
    progress.total_questions = 2;
    progress.correct_answers = 1;
    progress.total_time_spent = 105; // 45 + 60 seconds
    progress.experience_points = 50;
    progress.current_streak = 1;
    progress.longest_streak = 1;
    progress.last_study_date = Some(now);
    store.update_progress(&progress)?;

    println!("✅ Updated user progress");

    println!("\n🎉 Database seeding completed successfully!");
    println!("\nTest credentials:");
    println!("  Email: {}", DEMO_EMAIL);
    println!("  Password: {}\n", DEMO_PASSWORD);

    Ok(SeedSummary {
        user_email: user.email,
        questions: questions.len(),
        interactions: interactions.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStatus;
    use crate::user::verify_password;

    #[test]
    fn test_seed_populates_demo_rows() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let summary = run(&mut store).unwrap();
        assert_eq!(summary.user_email, DEMO_EMAIL);
        assert_eq!(summary.questions, 3);
        assert_eq!(summary.interactions, 2);

        let stats = store.stats().unwrap();
        assert_eq!(stats.users, 1);
        assert_eq!(stats.content, 1);
        assert_eq!(stats.questions, 3);
        assert_eq!(stats.sessions, 1);
        assert_eq!(stats.interactions, 2);

        let user = store.get_user_by_email(DEMO_EMAIL).unwrap().unwrap();
        assert!(verify_password(DEMO_PASSWORD, &user.password_hash).unwrap());

        let sessions = store.sessions_for_user(&user.id).unwrap();
        assert_eq!(sessions[0].status, SessionStatus::Completed);
        assert!(sessions[0].started_at < sessions[0].completed_at.unwrap());

        let interactions = store.interactions_for_session(&sessions[0].id).unwrap();
        assert_eq!(interactions.len(), 2);
        assert!(interactions.iter().any(|i| !i.is_correct));

        let progress = store.get_progress(&user.id).unwrap().unwrap();
        assert_eq!(progress.total_sessions, 1);
        assert_eq!(progress.total_time_spent, 105);
        assert_eq!(progress.experience_points, 50);
    }

    #[test]
    fn test_reseeding_keeps_one_demo_user() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        run(&mut store).unwrap();
        run(&mut store).unwrap();

        // The demo user and its 1-1 rows are upserted; sample rows accumulate
        assert_eq!(store.count_users().unwrap(), 1);
        assert_eq!(store.count_content().unwrap(), 2);
        assert_eq!(store.count_questions().unwrap(), 6);
    }
}
