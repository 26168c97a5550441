//! Quiz Attempt
//!
//! One user's instance of answering a quiz. Answers are keyed by question id,
//! so each question contributes at most one entry to the submission.

use std::collections::BTreeMap;

use kernel::id::{AttemptId, QuestionId, QuizId, UserId};
use serde::Serialize;

use crate::domain::entity::question::Question;
use crate::error::{QuizError, QuizResult};

#[derive(Debug, Clone)]
pub struct QuizAttempt {
    id: AttemptId,
    quiz_id: QuizId,
    user_id: UserId,
    duration_seconds: i64,
    questions: Vec<Question>,
    answers: BTreeMap<QuestionId, String>,
}

/// Payload posted to `quiz-attempts/submit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub user_id: UserId,
    pub quiz_id: QuizId,
    pub quiz_attempt_id: AttemptId,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub selected_option: String,
}

impl QuizAttempt {
    pub fn new(
        id: AttemptId,
        quiz_id: QuizId,
        user_id: UserId,
        duration_seconds: i64,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id,
            quiz_id,
            user_id,
            duration_seconds,
            questions,
            answers: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &AttemptId {
        &self.id
    }

    pub fn quiz_id(&self) -> &QuizId {
        &self.quiz_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn duration_seconds(&self) -> i64 {
        self.duration_seconds
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    /// Record the user's choice, replacing any earlier one
    pub fn select(&mut self, question_id: &QuestionId, option: &str) -> QuizResult<()> {
        let question = self
            .question(question_id)
            .ok_or_else(|| QuizError::UnknownQuestion {
                question_id: question_id.to_string(),
            })?;

        if !question.offers(option) {
            return Err(QuizError::InvalidOption {
                question_id: question_id.to_string(),
                option: option.to_string(),
            });
        }

        self.answers.insert(question_id.clone(), option.to_string());
        Ok(())
    }

    pub fn answer(&self, question_id: &QuestionId) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Questions without an answer, in quiz order
    pub fn unanswered(&self) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
    }

    /// Build the payload; only answered questions are included
    pub fn submission(&self) -> Submission {
        Submission {
            user_id: self.user_id.clone(),
            quiz_id: self.quiz_id.clone(),
            quiz_attempt_id: self.id.clone(),
            answers: self
                .answers
                .iter()
                .map(|(question_id, option)| SubmittedAnswer {
                    question_id: question_id.clone(),
                    selected_option: option.clone(),
                })
                .collect(),
        }
    }

    /// Local score; `None` if an answered question has no disclosed answer
    pub fn grade(&self) -> Option<u32> {
        let mut score = 0;
        for question in &self.questions {
            let correct = match self.answer(&question.id) {
                Some(option) => question.is_correct(option)?,
                None => false,
            };
            if correct {
                score += 1;
            }
        }
        Some(score)
    }
}
