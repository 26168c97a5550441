//! Question Entity
//!
//! Immutable once loaded. The correct answer, when the server sends it, is
//! kept private so nothing can show it before the attempt is submitted.

use kernel::id::{QuestionId, QuizId};
use serde::{Deserialize, Serialize};

const TRUE_FALSE_CHOICES: [&str; 2] = ["True", "False"];

/// Question kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "MCQ")]
    Mcq,
    #[serde(rename = "TRUE_FALSE")]
    TrueFalse,
}

/// A single quiz question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub quiz_id: QuizId,
    pub text: String,
    pub options: Vec<String>,
    pub question_type: QuestionType,
    correct_answer: Option<String>,
}

impl Question {
    pub fn new(
        id: QuestionId,
        quiz_id: QuizId,
        text: impl Into<String>,
        options: Vec<String>,
        question_type: QuestionType,
    ) -> Self {
        Self {
            id,
            quiz_id,
            text: text.into(),
            options,
            question_type,
            correct_answer: None,
        }
    }

    pub fn with_correct_answer(mut self, answer: impl Into<String>) -> Self {
        self.correct_answer = Some(answer.into());
        self
    }

    /// Choices the user may pick from
    ///
    /// True/false questions sent without options fall back to `True`/`False`.
    pub fn choices(&self) -> Vec<&str> {
        if self.options.is_empty() && self.question_type == QuestionType::TrueFalse {
            return TRUE_FALSE_CHOICES.to_vec();
        }
        self.options.iter().map(String::as_str).collect()
    }

    /// Whether `option` is one of this question's choices
    pub fn offers(&self, option: &str) -> bool {
        self.choices().contains(&option)
    }

    /// `None` when the server did not disclose the answer
    pub fn is_correct(&self, option: &str) -> Option<bool> {
        self.correct_answer.as_deref().map(|answer| answer == option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq() -> Question {
        Question::new(
            "q1".into(),
            "quiz1".into(),
            "2 + 2 = ?",
            vec!["3".to_string(), "4".to_string()],
            QuestionType::Mcq,
        )
    }

    #[test]
    fn test_offers_only_listed_options() {
        let question = mcq();
        assert!(question.offers("4"));
        assert!(!question.offers("5"));
    }

    #[test]
    fn test_true_false_defaults() {
        let question = Question::new(
            "q2".into(),
            "quiz1".into(),
            "Rust has a garbage collector",
            Vec::new(),
            QuestionType::TrueFalse,
        );
        assert_eq!(question.choices(), ["True", "False"]);
        assert!(question.offers("False"));
    }

    #[test]
    fn test_correct_answer_is_optional() {
        assert_eq!(mcq().is_correct("4"), None);
        let question = mcq().with_correct_answer("4");
        assert_eq!(question.is_correct("4"), Some(true));
        assert_eq!(question.is_correct("3"), Some(false));
    }

    #[test]
    fn test_question_type_wire_names() {
        let kind: QuestionType = serde_json::from_str("\"TRUE_FALSE\"").unwrap();
        assert_eq!(kind, QuestionType::TrueFalse);
        assert_eq!(serde_json::to_string(&QuestionType::Mcq).unwrap(), "\"MCQ\"");
    }
}
