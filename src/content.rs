//! Learning content and generated questions
//!
//! Content rows describe an analyzed source document; each content row owns
//! a set of questions generated from it.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// A unit of learning material (an analyzed document).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Path of the source file the material was derived from
    pub file_path: String,
    pub file_type: String,
    pub topics: Vec<String>,
    /// Difficulty on a 1..=10 scale
    pub difficulty: u8,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content {
    pub fn new(
        title: impl Into<String>,
        file_path: impl Into<String>,
        file_type: impl Into<String>,
        difficulty: u8,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            file_path: file_path.into(),
            file_type: file_type.into(),
            topics: Vec::new(),
            difficulty,
            analyzed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_topics(mut self, topics: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the content as analyzed at the given time
    pub fn analyzed(mut self, at: DateTime<Utc>) -> Self {
        self.analyzed_at = Some(at);
        self
    }
}

/// Kinds of questions generated from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    FreeText,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple-choice",
            QuestionKind::FreeText => "free-text",
        }
    }
}

impl FromStr for QuestionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "multiple-choice" | "multiple_choice" | "mc" | "mcq" => Ok(QuestionKind::MultipleChoice),
            "free-text" | "free_text" | "text" | "open" => Ok(QuestionKind::FreeText),
            _ => Err(Error::Parse(format!("Unknown question kind: {}", s))),
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answer choices for a multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOptions {
    pub choices: Vec<String>,
}

/// Grading key for a question.
///
/// Multiple-choice questions store the exact expected answer; free-text
/// questions store the keywords a good answer should contain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Exact { answer: String },
    Keywords { keywords: Vec<String> },
}

/// A single question generated from a content row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub content_id: String,
    pub kind: QuestionKind,
    pub question_text: String,
    pub options: Option<QuestionOptions>,
    pub correct_answer: CorrectAnswer,
    pub explanation: Option<String>,
    pub difficulty: u8,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(
        content_id: impl Into<String>,
        kind: QuestionKind,
        question_text: impl Into<String>,
        correct_answer: CorrectAnswer,
        difficulty: u8,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content_id: content_id.into(),
            kind,
            question_text: question_text.into(),
            options: None,
            correct_answer,
            explanation: None,
            difficulty,
            created_at: Utc::now(),
        }
    }

    pub fn with_choices(mut self, choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = Some(QuestionOptions {
            choices: choices.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_kind_roundtrip() {
        for kind in [QuestionKind::MultipleChoice, QuestionKind::FreeText] {
            let parsed: QuestionKind = kind.as_str().parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_question_kind_aliases() {
        assert_eq!(QuestionKind::from_str("mcq").unwrap(), QuestionKind::MultipleChoice);
        assert_eq!(QuestionKind::from_str("text").unwrap(), QuestionKind::FreeText);
        assert!(QuestionKind::from_str("essay").is_err());
    }

    #[test]
    fn test_correct_answer_serde() {
        let exact: CorrectAnswer =
            serde_json::from_str(r#"{"answer": "A superset of JavaScript"}"#).unwrap();
        assert!(matches!(exact, CorrectAnswer::Exact { .. }));

        let keywords: CorrectAnswer =
            serde_json::from_str(r#"{"keywords": ["interface", "type"]}"#).unwrap();
        match keywords {
            CorrectAnswer::Keywords { keywords } => assert_eq!(keywords.len(), 2),
            _ => panic!("expected keywords variant"),
        }
    }

    #[test]
    fn test_question_builder() {
        let question = Question::new(
            "c1",
            QuestionKind::MultipleChoice,
            "What is TypeScript?",
            CorrectAnswer::Exact {
                answer: "A superset of JavaScript".to_string(),
            },
            3,
        )
        .with_choices(["A JavaScript library", "A superset of JavaScript"])
        .with_explanation("TypeScript compiles to plain JavaScript.");

        assert_eq!(question.options.as_ref().unwrap().choices.len(), 2);
        assert!(question.explanation.is_some());
        assert_eq!(question.kind, QuestionKind::MultipleChoice);
    }
}
