pub mod client;
pub mod domain;
pub mod ports;
pub mod session;

pub use client::{ClientError, SessionClient};
pub use domain::{
    ArticleResult, ClientSnapshot, Controls, HealthStatus, Notice, QaPair, QuotaStatus,
    SummaryOutcome, UiStatus, QA_SLOTS,
};
pub use ports::{PortError, PortResult, SessionStore, SummarizerBackend};
pub use session::{generate_session_id, MemorySessionStore, SESSION_KEY};
