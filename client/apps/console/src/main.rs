//! Quiz Console Entry Point
//!
//! Wires configuration, the persisted session and the HTTP transport, then
//! runs one command. Uses `anyhow` for startup errors; command failures are
//! `kernel::error::AppError` and are printed for the user.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use auth::{ApiClient, SessionStore};
use platform::config::ClientConfig;
use platform::storage::FileStore;
use platform::transport::ReqwestTransport;
use quiz::QuizConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Command, USAGE};
use crate::commands::App;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; logs go to stderr so they never mix with prompts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "console=info,auth=info,quiz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = Command::parse(env::args().skip(1)) else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    };

    let config = Arc::new(ClientConfig::from_env()?);
    let quiz_config = Arc::new(QuizConfig::from_env()?);

    let storage = FileStore::open(&config.session_file)?;
    let session = Arc::new(SessionStore::restore(storage)?);
    tracing::debug!(
        authenticated = session.get().is_authenticated(),
        "Session loaded"
    );

    let client = Arc::new(ApiClient::new(
        Arc::new(ReqwestTransport::new()),
        session,
        Arc::clone(&config),
    )?);

    let app = App {
        client,
        quiz_config,
    };

    match app.run(command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
