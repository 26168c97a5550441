//! Quiz Entity

use kernel::id::QuizId;

use super::question::Question;

/// A quiz as listed in the catalogue
///
/// List views may only carry question ids, so `questions` can be empty while
/// `question_count` is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    pub description: String,
    pub duration_minutes: i64,
    pub questions: Vec<Question>,
    pub question_count: usize,
    pub is_active: bool,
}

impl Quiz {
    pub fn duration_seconds(&self) -> i64 {
        self.duration_minutes.saturating_mul(60)
    }
}
