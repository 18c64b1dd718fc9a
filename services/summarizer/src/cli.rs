//! services/summarizer/src/cli.rs
//!
//! Command-line arguments. Flags given here override the environment.

use crate::config::{normalize_backend_url, Config, ConfigError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "summarizer",
    about = "Summarize articles and ask follow-up questions about them",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Base address of the summarization backend
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// File holding the persisted session identifier
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<Level>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Interactive session (the default)
    Repl,
    /// Show the session's usage counters
    Status,
    /// Check that the backend is reachable
    Health,
    /// Discard the current session and start a new one
    Reset,
    /// Summarize one article, optionally asking follow-up questions
    Summarize {
        /// Article URL
        url: String,

        /// A follow-up question (repeat for the second slot)
        #[arg(short, long = "question")]
        questions: Vec<String>,
    },
}

impl Cli {
    /// Folds command-line overrides into the environment configuration.
    pub fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(url) = &self.backend_url {
            config.backend_url = normalize_backend_url(url)
                .map_err(|reason| ConfigError::InvalidValue("--backend-url".to_string(), reason))?;
        }
        if let Some(path) = &self.session_file {
            config.session_file = path.clone();
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> Config {
        Config {
            backend_url: "http://localhost:5000".to_string(),
            session_file: PathBuf::from("/tmp/id"),
            log_level: Level::WARN,
        }
    }

    #[test]
    fn defaults_to_interactive_mode() {
        let cli = Cli::try_parse_from(["summarizer"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(!cli.ephemeral);
    }

    #[test]
    fn summarize_collects_repeated_questions() {
        let cli = Cli::try_parse_from([
            "summarizer",
            "summarize",
            "https://example.com/a",
            "-q",
            "Who?",
            "--question",
            "Why?",
            "--ephemeral",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(CliCommand::Summarize {
                url: "https://example.com/a".to_string(),
                questions: vec!["Who?".to_string(), "Why?".to_string()],
            })
        );
        assert!(cli.ephemeral);
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::try_parse_from([
            "summarizer",
            "status",
            "--backend-url",
            "https://api.example.com/",
            "--session-file",
            "/var/tmp/sid",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let mut config = config();

        cli.apply(&mut config).unwrap();

        assert_eq!(
            config,
            Config {
                backend_url: "https://api.example.com".to_string(),
                session_file: PathBuf::from("/var/tmp/sid"),
                log_level: Level::DEBUG,
            }
        );
    }

    #[test]
    fn malformed_backend_flag_is_rejected() {
        let cli = Cli::try_parse_from(["summarizer", "--backend-url", "ftp://x"]).unwrap();
        assert!(cli.apply(&mut config()).is_err());
    }
}
