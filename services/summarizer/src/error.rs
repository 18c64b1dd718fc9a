//! services/summarizer/src/error.rs
//!
//! Defines the primary error type for the summarizer binary.

use crate::config::ConfigError;
use summarizer_core::{ClientError, PortError};

/// The primary error type for the `summarizer` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// A user-visible operation failure (validation or backend rejection).
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Represents a standard Input/Output error (e.g., reading the terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The command line asked for something the client cannot do.
    #[error("Usage error: {0}")]
    Usage(String),
}
