//! Result Entry
//!
//! One row of the user's results table.

use chrono::{DateTime, Utc};
use kernel::id::ResultId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub id: ResultId,
    /// `None` when the quiz has since been deleted
    pub quiz_title: Option<String>,
    pub quiz_duration_minutes: Option<i64>,
    pub score: u32,
    pub total_questions: u32,
    pub submitted_at: DateTime<Utc>,
}
