//! services/summarizer/src/bin/summarizer.rs

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use summarizer_core::{MemorySessionStore, SessionClient, SessionStore};
use summarizer_lib::{
    adapters::{FileSessionStore, HttpBackend},
    cli::{Cli, CliCommand},
    config::Config,
    error::AppError,
    terminal::{self, render::render},
};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let result = run(Cli::parse()).await;
    ExitCode::from(terminal::exit_status(result, &mut std::io::stderr()))
}

async fn run(cli: Cli) -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let mut config = Config::from_env()?;
    cli.apply(&mut config)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Backend at {}", config.backend_url);

    // --- 2. Initialize Adapters ---
    let backend = Arc::new(HttpBackend::new(config.backend_url.clone())?);
    let store: Arc<dyn SessionStore> = if cli.ephemeral {
        info!("Using an in-memory session");
        Arc::new(MemorySessionStore::new())
    } else {
        info!("Session persisted at {}", config.session_file.display());
        Arc::new(FileSessionStore::new(&config.session_file))
    };

    // --- 3. Bootstrap the Session ---
    let client = SessionClient::new(backend, store);
    client.bootstrap().await;

    // --- 4. Dispatch ---
    let mut stdout = std::io::stdout();
    match cli.command.unwrap_or(CliCommand::Repl) {
        CliCommand::Repl => {
            let stdin = BufReader::new(tokio::io::stdin());
            terminal::repl(&client, stdin, &mut stdout).await?;
        }
        CliCommand::Status => {
            println!("Session: {}", client.session_id());
            print!("{}", render(&client.snapshot()));
        }
        CliCommand::Health => {
            let health = client.health().await?;
            println!("Backend is {}: {}", health.status, health.message);
        }
        CliCommand::Reset => {
            let session_id = client.reset().await;
            println!("Started new session {session_id}");
            print!("{}", render(&client.snapshot()));
        }
        CliCommand::Summarize { url, questions } => {
            terminal::summarize_once(&client, &url, &questions, &mut stdout).await?;
        }
    }

    Ok(())
}
