//! crates/summarizer_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the client's core logic.
//! These traits form the boundary of the hexagonal architecture, so the core
//! never depends on a concrete HTTP stack or storage medium.

use async_trait::async_trait;
use crate::domain::{HealthStatus, QuotaStatus, SummaryOutcome};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The backend answered with a non-2xx status. `message` is the `error`
    /// field of the response body, when there was one.
    #[error("Backend rejected the request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// The request itself failed: connection refused, I/O, unreadable body.
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Session storage failure: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The external summarization service.
#[async_trait]
pub trait SummarizerBackend: Send + Sync {
    /// `GET /session-status?session_id=<id>`
    async fn session_status(&self, session_id: &str) -> PortResult<QuotaStatus>;

    /// `POST /summarize` with `{url, session_id}`.
    async fn summarize(&self, url: &str, session_id: &str) -> PortResult<SummaryOutcome>;

    /// `POST /ask` with `{question, url, session_id}`.
    async fn ask(&self, question: &str, url: &str, session_id: &str) -> PortResult<String>;

    /// `GET /health`
    async fn health(&self) -> PortResult<HealthStatus>;
}

/// Persistent storage for the single session identifier.
///
/// Plays the part browser local storage plays for a web page: one fixed key,
/// read at bootstrap, written once, cleared on reset.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> PortResult<Option<String>>;
    fn set(&self, session_id: &str) -> PortResult<()>;
    fn clear(&self) -> PortResult<()>;
}
