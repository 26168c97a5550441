//! Command handlers
//!
//! Each handler drives one use case and prints the outcome. Failures are
//! returned as `AppError` so the entry point can show them uniformly.

use std::io::Write;
use std::sync::Arc;

use auth::application::{
    ForgotPasswordUseCase, LoginInput, LoginUseCase, LogoutUseCase, ResetPasswordInput,
    ResetPasswordUseCase, SignUpInput, SignUpUseCase,
};
use auth::{ApiClient, AppError, AppResult};
use kernel::id::QuizId;
use platform::storage::FileStore;
use platform::transport::ReqwestTransport;
use quiz::application::{
    QuizCatalog, ResultsUseCase, StartAttemptUseCase, SubmitAttemptUseCase, TimeoutOutcome,
};
use quiz::{ActiveAttempt, QuizConfig, QuizError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::cli::{Command, USAGE};

pub type Client = ApiClient<ReqwestTransport, FileStore>;

type Input = Lines<BufReader<Stdin>>;

pub struct App {
    pub client: Arc<Client>,
    pub quiz_config: Arc<QuizConfig>,
}

impl App {
    pub async fn run(&self, command: Command) -> AppResult<()> {
        let mut input = BufReader::new(tokio::io::stdin()).lines();

        match command {
            Command::Help => {
                println!("{USAGE}");
                Ok(())
            }
            Command::Login { email } => self.login(&mut input, email).await,
            Command::SignUp { name, email } => self.sign_up(&mut input, name, email).await,
            Command::Forgot { email } => {
                ForgotPasswordUseCase::new(Arc::clone(&self.client))
                    .execute(&email)
                    .await?;
                println!("If the address is registered, a reset token is on its way.");
                Ok(())
            }
            Command::Reset { email, token } => self.reset(&mut input, email, token).await,
            Command::Logout => {
                LogoutUseCase::new(Arc::clone(self.client.session())).execute()?;
                println!("Logged out.");
                Ok(())
            }
            Command::Quizzes => self.quizzes().await,
            Command::Take { quiz_id } => self.take(&mut input, quiz_id).await,
            Command::Results => self.results().await,
        }
    }

    async fn login(&self, input: &mut Input, email: String) -> AppResult<()> {
        let password = prompt(input, "Password: ").await?.unwrap_or_default();
        let output = LoginUseCase::new(Arc::clone(&self.client))
            .execute(LoginInput { email, password })
            .await?;
        println!("Logged in as {}.", output.user_id);
        Ok(())
    }

    async fn sign_up(&self, input: &mut Input, name: String, email: String) -> AppResult<()> {
        let password = prompt(input, "Password: ").await?.unwrap_or_default();
        SignUpUseCase::new(Arc::clone(&self.client))
            .execute(SignUpInput {
                name,
                email,
                password,
            })
            .await?;
        println!("Account created. You can log in now.");
        Ok(())
    }

    async fn reset(&self, input: &mut Input, email: String, token: String) -> AppResult<()> {
        let new_password = prompt(input, "New password: ").await?.unwrap_or_default();
        ResetPasswordUseCase::new(Arc::clone(&self.client))
            .execute(ResetPasswordInput {
                email,
                token,
                new_password,
            })
            .await?;
        println!("Password updated. You can log in now.");
        Ok(())
    }

    async fn quizzes(&self) -> AppResult<()> {
        let quizzes = QuizCatalog::new(Arc::clone(&self.client)).list().await?;
        if quizzes.is_empty() {
            println!("No quizzes available.");
            return Ok(());
        }

        for quiz in quizzes.iter().filter(|q| q.is_active) {
            println!(
                "{}  {} ({} min, {} questions)",
                quiz.id, quiz.title, quiz.duration_minutes, quiz.question_count
            );
            if !quiz.description.is_empty() {
                println!("    {}", quiz.description);
            }
        }
        Ok(())
    }

    async fn results(&self) -> AppResult<()> {
        let results = ResultsUseCase::new(Arc::clone(&self.client))
            .for_current_user()
            .await?;
        if results.is_empty() {
            println!("No results found.");
            return Ok(());
        }

        println!("{:<4} {:<30} {:>8} {:>7} {:>10}  Submitted", "#", "Title", "Minutes", "Score", "Questions");
        for (index, result) in results.iter().enumerate() {
            let minutes = result
                .quiz_duration_minutes
                .map(|m| m.to_string())
                .unwrap_or_default();
            println!(
                "{:<4} {:<30} {:>8} {:>7} {:>10}  {}",
                index + 1,
                result.quiz_title.as_deref().unwrap_or("(deleted quiz)"),
                minutes,
                result.score,
                result.total_questions,
                result
                    .submitted_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M"),
            );
        }
        Ok(())
    }

    async fn take(&self, input: &mut Input, quiz_id: QuizId) -> AppResult<()> {
        let mut attempt = StartAttemptUseCase::new(Arc::clone(&self.client))
            .execute(&quiz_id)
            .await?;
        let submit = SubmitAttemptUseCase::new(Arc::clone(&self.client), Arc::clone(&self.quiz_config));

        println!(
            "You have {} to answer {} questions. Type the option number, or 's' to submit early.",
            clock(attempt.remaining_seconds()),
            attempt.attempt().questions().len()
        );

        let questions = attempt.attempt().questions().to_vec();
        'questions: for (number, question) in questions.iter().enumerate() {
            println!("\n{}. {}", number + 1, question.text);
            let choices = question.choices();
            for (index, choice) in choices.iter().enumerate() {
                println!("   {}) {}", index + 1, choice);
            }

            loop {
                print!("[{}] > ", clock(attempt.remaining_seconds()));
                flush();

                match next_event(input, &mut attempt).await? {
                    Event::TimedOut => return self.timed_out(&submit, attempt).await,
                    Event::Line(None) => break 'questions,
                    Event::Line(Some(line)) => {
                        let line = line.trim();
                        if line.eq_ignore_ascii_case("s") {
                            break 'questions;
                        }
                        let choice = line
                            .parse::<usize>()
                            .ok()
                            .and_then(|n| n.checked_sub(1))
                            .and_then(|i| choices.get(i));
                        match choice {
                            Some(choice) => {
                                attempt.select(&question.id, choice)?;
                                break;
                            }
                            None => println!("Pick a number between 1 and {}.", choices.len()),
                        }
                    }
                }
            }
        }

        loop {
            let local_score = attempt.attempt().grade();
            match submit.execute(attempt).await {
                Ok(result) => {
                    let total = result.total_questions.unwrap_or(questions.len() as u32);
                    match (result.score, local_score) {
                        (Some(score), _) => println!("Submitted. Score: {score}/{total}"),
                        (None, Some(score)) => println!("Submitted. Score: {score}/{total}"),
                        (None, None) => println!("Submitted."),
                    }
                    return Ok(());
                }
                Err(rejected) => {
                    if matches!(rejected.error, QuizError::AttemptExpired) {
                        return self.timed_out(&submit, rejected.attempt).await;
                    }
                    eprintln!("{}", AppError::from(rejected.error));
                    attempt = rejected.attempt;

                    print!("Retry submission? [y/N] ");
                    flush();
                    match next_event(input, &mut attempt).await? {
                        Event::TimedOut => return self.timed_out(&submit, attempt).await,
                        Event::Line(Some(answer)) if answer.trim().eq_ignore_ascii_case("y") => {}
                        Event::Line(_) => {
                            println!("Attempt abandoned.");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn timed_out(
        &self,
        submit: &SubmitAttemptUseCase<ReqwestTransport, FileStore>,
        attempt: ActiveAttempt,
    ) -> AppResult<()> {
        println!("\nTime is up!");
        match submit.handle_timeout(attempt).await {
            Ok(TimeoutOutcome::Discarded) => {
                println!("Your answers were not submitted.");
                Ok(())
            }
            Ok(TimeoutOutcome::Submitted(_)) => {
                println!("Your answers were submitted automatically.");
                Ok(())
            }
            Err(rejected) => Err(rejected.error.into()),
        }
    }
}

enum Event {
    Line(Option<String>),
    TimedOut,
}

/// Wait for the next input line or the attempt's timeout, whichever comes first
async fn next_event(input: &mut Input, attempt: &mut ActiveAttempt) -> AppResult<Event> {
    if attempt.is_expired() {
        return Ok(Event::TimedOut);
    }
    let event = tokio::select! {
        fired = attempt.timer_mut().expired() => {
            if fired { Event::TimedOut } else { Event::Line(None) }
        }
        line = input.next_line() => Event::Line(line?),
    };
    Ok(event)
}

async fn prompt(input: &mut Input, label: &str) -> AppResult<Option<String>> {
    print!("{label}");
    flush();
    Ok(input.next_line().await?.map(|line| line.trim_end().to_string()))
}

fn flush() {
    // Prompts are best effort; a closed stdout surfaces on the next println.
    let _ = std::io::stdout().flush();
}

fn clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_format() {
        assert_eq!(clock(0), "0:00");
        assert_eq!(clock(65), "1:05");
        assert_eq!(clock(600), "10:00");
    }
}
