//! Wire DTOs for the quiz endpoints
//!
//! Server documents carry their id in `_id`; everything else is camelCase.

use chrono::{DateTime, Utc};
use kernel::id::{AttemptId, QuizId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::question::{Question, QuestionType};
use crate::domain::entity::quiz::Quiz;
use crate::domain::entity::result::ResultEntry;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub quiz_id: Option<String>,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    pub question_type: QuestionType,
}

impl QuestionDto {
    /// `quiz_id` fills in for questions sent without their parent id
    pub fn into_question(self, quiz_id: &QuizId) -> Question {
        let parent = self.quiz_id.map(QuizId::new).unwrap_or_else(|| quiz_id.clone());
        let question = Question::new(
            self.id.into(),
            parent,
            self.question_text,
            self.options,
            self.question_type,
        );
        match self.correct_answer {
            Some(answer) => question.with_correct_answer(answer),
            None => question,
        }
    }
}

/// List endpoints may send question ids instead of documents
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuestionRef {
    Full(QuestionDto),
    Id(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: i64,
    #[serde(default)]
    pub questions: Vec<QuestionRef>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl From<QuizDto> for Quiz {
    fn from(dto: QuizDto) -> Self {
        let id = QuizId::new(dto.id);
        let question_count = dto.questions.len();
        let questions = dto
            .questions
            .into_iter()
            .filter_map(|q| match q {
                QuestionRef::Full(question) => Some(question.into_question(&id)),
                QuestionRef::Id(_) => None,
            })
            .collect();

        Quiz {
            id,
            title: dto.title,
            description: dto.description,
            duration_minutes: dto.duration,
            questions,
            question_count,
            is_active: dto.is_active,
        }
    }
}

/// `POST quiz-attempts/` request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAttemptRequest<'a> {
    pub user_id: &'a UserId,
    pub quiz_id: &'a QuizId,
}

/// `POST quiz-attempts/` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAttemptResponse {
    pub saved_quiz_attempt: SavedAttemptDto,
    #[serde(default)]
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize)]
pub struct SavedAttemptDto {
    #[serde(rename = "_id")]
    pub id: AttemptId,
    /// Minutes
    pub duration: i64,
}

/// Element of `GET results/user/:userId`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDto {
    #[serde(rename = "_id")]
    pub id: String,
    /// Populated quiz document; `null` once the quiz is deleted
    #[serde(default)]
    pub quiz_id: Option<ResultQuizDto>,
    pub score: u32,
    pub total_questions: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ResultQuizDto {
    pub title: String,
    #[serde(default)]
    pub duration: Option<i64>,
}

impl From<ResultDto> for ResultEntry {
    fn from(dto: ResultDto) -> Self {
        let (quiz_title, quiz_duration_minutes) = match dto.quiz_id {
            Some(quiz) => (Some(quiz.title), quiz.duration),
            None => (None, None),
        };
        ResultEntry {
            id: dto.id.into(),
            quiz_title,
            quiz_duration_minutes,
            score: dto.score,
            total_questions: dto.total_questions,
            submitted_at: dto.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quiz_list_with_question_ids() {
        let dto: QuizDto = serde_json::from_value(json!({
            "_id": "quiz1",
            "title": "Rust basics",
            "description": "Ownership and borrowing",
            "duration": 10,
            "questions": ["q1", "q2"],
            "isActive": true,
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();

        let quiz = Quiz::from(dto);
        assert_eq!(quiz.question_count, 2);
        assert!(quiz.questions.is_empty());
        assert_eq!(quiz.duration_seconds(), 600);
    }

    #[test]
    fn test_quiz_with_full_questions() {
        let dto: QuizDto = serde_json::from_value(json!({
            "_id": "quiz1",
            "title": "Rust basics",
            "duration": 5,
            "questions": [{
                "_id": "q1",
                "questionText": "Is Rust memory safe?",
                "options": ["True", "False"],
                "correctAnswer": "True",
                "questionType": "TRUE_FALSE"
            }]
        }))
        .unwrap();

        let quiz = Quiz::from(dto);
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].quiz_id.as_str(), "quiz1");
        assert_eq!(quiz.questions[0].is_correct("True"), Some(true));
        assert!(quiz.is_active);
    }

    #[test]
    fn test_start_attempt_response() {
        let response: StartAttemptResponse = serde_json::from_value(json!({
            "savedQuizAttempt": { "_id": "att1", "userId": "u1", "quizId": "quiz1", "duration": 2 },
            "questions": [{
                "_id": "q1",
                "quizId": "quiz1",
                "questionText": "2 + 2",
                "options": ["3", "4"],
                "questionType": "MCQ"
            }]
        }))
        .unwrap();

        assert_eq!(response.saved_quiz_attempt.id.as_str(), "att1");
        assert_eq!(response.saved_quiz_attempt.duration, 2);
        assert_eq!(response.questions.len(), 1);
    }

    #[test]
    fn test_result_with_deleted_quiz() {
        let dto: ResultDto = serde_json::from_value(json!({
            "_id": "r1",
            "quizId": null,
            "score": 3,
            "totalQuestions": 5,
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();

        let entry = ResultEntry::from(dto);
        assert_eq!(entry.quiz_title, None);
        assert_eq!(entry.score, 3);
        assert_eq!(entry.submitted_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }
}
