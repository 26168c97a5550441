//! Active Attempt
//!
//! A [`QuizAttempt`] together with the timer counting it down. Dropping the
//! active attempt drops the timer, which stops it.

use kernel::id::QuestionId;

use crate::application::attempt_timer::TimerHandle;
use crate::domain::attempt::QuizAttempt;
use crate::error::QuizResult;

#[derive(Debug)]
pub struct ActiveAttempt {
    attempt: QuizAttempt,
    timer: TimerHandle,
}

impl ActiveAttempt {
    pub fn new(attempt: QuizAttempt, timer: TimerHandle) -> Self {
        Self { attempt, timer }
    }

    pub fn attempt(&self) -> &QuizAttempt {
        &self.attempt
    }

    pub fn timer(&self) -> &TimerHandle {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut TimerHandle {
        &mut self.timer
    }

    /// Record an answer; allowed until the attempt is submitted or discarded
    pub fn select(&mut self, question_id: &QuestionId, option: &str) -> QuizResult<()> {
        self.attempt.select(question_id, option)
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn is_expired(&self) -> bool {
        self.timer.is_expired()
    }

    pub fn into_parts(self) -> (QuizAttempt, TimerHandle) {
        (self.attempt, self.timer)
    }
}
