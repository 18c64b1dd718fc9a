//! crates/summarizer_core/src/client.rs
//!
//! The session-scoped request client. It owns the session identity, the
//! current summary, the two Q&A slots and the cached quota snapshot, and it is
//! the only thing that talks to the summarization backend.
//!
//! Every mutating operation follows the same shape: validate against local
//! state, mark its own request as in flight, call the backend, fold the result
//! into state, and on success re-fetch the quota snapshot before clearing the
//! in-flight flag. The state lock is never held across an `.await`, so the
//! summarize call and both question slots can be in flight at once.

use crate::domain::{
    ArticleResult, ClientSnapshot, Controls, HealthStatus, Notice, QuotaStatus,
    SummaryOutcome, UiStatus, QA_SLOTS,
};
use crate::ports::{PortError, PortResult, SessionStore, SummarizerBackend};
use crate::session::generate_session_id;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

pub const SUMMARY_CACHED: &str = "Summary loaded from cache";
pub const SUMMARY_FRESH: &str = "Article summarized successfully!";
const SUMMARIZE_FALLBACK: &str = "Failed to summarize article";
const ASK_FALLBACK: &str = "Failed to get answer";

//=========================================================================================
// Client Error
//=========================================================================================

/// The user-visible outcome of a failed operation.
///
/// The `Display` text is exactly what lands in the error slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Please enter a valid URL")]
    EmptyUrl,
    #[error("Summary limit reached for this session")]
    SummaryLimitReached,
    #[error("Please enter a question")]
    EmptyQuestion,
    #[error("Please summarize an article first")]
    NoSummary,
    #[error("Q&A limit reached for this session")]
    QaLimitReached,
    #[error("There is no question slot {0}")]
    InvalidSlot(usize),
    /// The operation's own request is still in flight. Never shown; it stands
    /// in for a disabled button.
    #[error("A request is already in progress")]
    Busy,
    /// The backend refused the request; carries its message or a fallback.
    #[error("{0}")]
    Rejected(String),
    #[error("Network error. Please check if the backend server is running.")]
    Network,
}

impl ClientError {
    /// Validation failures are detected before any network I/O.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Rejected(_) | Self::Network)
    }

    fn from_port(err: PortError, fallback: &str) -> Self {
        match err {
            PortError::Rejected { message, .. } => Self::Rejected(
                message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            ),
            PortError::Transport(_) | PortError::Storage(_) => Self::Network,
        }
    }
}

//=========================================================================================
// Session Client
//=========================================================================================

pub struct SessionClient {
    backend: Arc<dyn SummarizerBackend>,
    store: Arc<dyn SessionStore>,
    state: Mutex<ClientSnapshot>,
}

impl SessionClient {
    /// Creates a client with default state. Call [`SessionClient::bootstrap`]
    /// before issuing any operation.
    pub fn new(backend: Arc<dyn SummarizerBackend>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            backend,
            store,
            state: Mutex::new(ClientSnapshot {
                session_id: String::new(),
                url: String::new(),
                article: None,
                qa: Default::default(),
                quota: QuotaStatus::default(),
                status: UiStatus::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClientSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Obtains the persisted session identifier (creating and persisting one
    /// if absent), then fetches its quota. Returns the identifier in use.
    pub async fn bootstrap(&self) -> String {
        let session_id = self.obtain_session_id();
        self.lock().session_id = session_id.clone();
        self.refresh_quota(&session_id).await;
        session_id
    }

    fn obtain_session_id(&self) -> String {
        match self.store.get() {
            Ok(Some(existing)) => {
                debug!(session_id = %existing, "Reusing persisted session");
                return existing;
            }
            Ok(None) => {}
            Err(e) => warn!("Could not read persisted session, starting a new one: {}", e),
        }
        self.persist_fresh_session()
    }

    /// Synthesizes a new identifier and writes it to the store without
    /// consulting what the store currently holds.
    fn persist_fresh_session(&self) -> String {
        let fresh = generate_session_id();
        if let Err(e) = self.store.set(&fresh) {
            warn!("Could not persist session {}: {}", fresh, e);
        }
        info!(session_id = %fresh, "Created new session");
        fresh
    }

    /// Replaces the quota snapshot with the backend's view of `session_id`.
    ///
    /// Failures are logged and leave the previous snapshot in place.
    pub async fn refresh_quota(&self, session_id: &str) {
        match self.backend.session_status(session_id).await {
            Ok(quota) => {
                debug!(?quota, "Quota snapshot refreshed");
                self.lock().quota = quota;
            }
            Err(e) => warn!("Error fetching session status: {}", e),
        }
    }

    pub fn snapshot(&self) -> ClientSnapshot {
        self.lock().clone()
    }

    pub fn controls(&self) -> Controls {
        self.lock().controls()
    }

    pub fn session_id(&self) -> String {
        self.lock().session_id.clone()
    }

    /// Edits the URL field.
    pub fn set_url(&self, url: &str) {
        self.lock().url = url.to_string();
    }

    /// Edits the question in slot `index`.
    pub fn set_question(&self, index: usize, question: &str) -> Result<(), ClientError> {
        let mut state = self.lock();
        let slot = state
            .qa
            .get_mut(index)
            .ok_or(ClientError::InvalidSlot(index))?;
        slot.question = question.to_string();
        Ok(())
    }

    //-------------------------------------------------------------------------------------
    // Summarize
    //-------------------------------------------------------------------------------------

    /// Submits the current URL field for summarization.
    pub async fn summarize(&self) -> Result<SummaryOutcome, ClientError> {
        let (url, session_id) = {
            let mut state = self.lock();
            if state.status.loading {
                return Err(ClientError::Busy);
            }
            let url = state.url.trim().to_string();
            if url.is_empty() {
                return Err(surface(&mut state, ClientError::EmptyUrl));
            }
            if !state.quota.can_summarize() {
                return Err(surface(&mut state, ClientError::SummaryLimitReached));
            }
            state.status.loading = true;
            state.status.notice = None;
            (url, state.session_id.clone())
        };

        info!(%url, %session_id, "Requesting summary");
        let result = match self.backend.summarize(&url, &session_id).await {
            Ok(outcome) => {
                {
                    let mut state = self.lock();
                    state.article = Some(outcome.article.clone());
                    let message = if outcome.cached { SUMMARY_CACHED } else { SUMMARY_FRESH };
                    state.status.notice = Some(Notice::Success(message.to_string()));
                }
                self.refresh_quota(&session_id).await;
                Ok(outcome)
            }
            Err(e) => {
                warn!("Summarize failed: {}", e);
                let err = ClientError::from_port(e, SUMMARIZE_FALLBACK);
                self.lock().status.notice = Some(Notice::Error(err.to_string()));
                Err(err)
            }
        };

        self.lock().status.loading = false;
        result
    }

    //-------------------------------------------------------------------------------------
    // Ask Question
    //-------------------------------------------------------------------------------------

    /// Submits the question in slot `index` about the current article.
    ///
    /// The live URL field is sent as-is, which may differ from the URL that
    /// produced the displayed summary.
    pub async fn ask_question(&self, index: usize) -> Result<String, ClientError> {
        let (question, url, session_id) = {
            let mut state = self.lock();
            if index >= QA_SLOTS {
                return Err(ClientError::InvalidSlot(index));
            }
            if state.status.qa_loading[index] {
                return Err(ClientError::Busy);
            }
            let question = state.qa[index].question.trim().to_string();
            if question.is_empty() {
                return Err(surface(&mut state, ClientError::EmptyQuestion));
            }
            if !state.has_summary() {
                return Err(surface(&mut state, ClientError::NoSummary));
            }
            if !state.quota.can_ask_questions() {
                return Err(surface(&mut state, ClientError::QaLimitReached));
            }
            state.status.qa_loading[index] = true;
            state.status.clear_error();
            (question, state.url.clone(), state.session_id.clone())
        };

        info!(slot = index, %session_id, "Asking follow-up question");
        let result = match self.backend.ask(&question, &url, &session_id).await {
            Ok(answer) => {
                self.lock().qa[index].answer = answer.clone();
                self.refresh_quota(&session_id).await;
                Ok(answer)
            }
            Err(e) => {
                warn!("Ask failed for slot {}: {}", index, e);
                let err = ClientError::from_port(e, ASK_FALLBACK);
                self.lock().status.notice = Some(Notice::Error(err.to_string()));
                Err(err)
            }
        };

        self.lock().status.qa_loading[index] = false;
        result
    }

    //-------------------------------------------------------------------------------------
    // Reset
    //-------------------------------------------------------------------------------------

    /// Rolls over to a brand new session. The backend is not asked to reset
    /// anything; the new identifier simply starts with its default quota.
    ///
    /// The new identifier never comes from the store, so a store that failed
    /// to clear cannot hand the old session back.
    pub async fn reset(&self) -> String {
        if let Err(e) = self.store.clear() {
            warn!("Could not clear persisted session: {}", e);
        }
        {
            let mut state = self.lock();
            info!(previous = %state.session_id, "Resetting session");
            state.article = None;
            state.qa = Default::default();
            state.status.notice = None;
        }
        let session_id = self.persist_fresh_session();
        self.lock().session_id = session_id.clone();
        self.refresh_quota(&session_id).await;
        session_id
    }

    /// Asks the backend's health endpoint whether it is up.
    pub async fn health(&self) -> PortResult<HealthStatus> {
        self.backend.health().await
    }

    /// The current article, if a summarize call has succeeded.
    pub fn article(&self) -> Option<ArticleResult> {
        self.lock().article.clone()
    }
}

/// Writes `err` into the message slot and hands it back.
fn surface(state: &mut ClientSnapshot, err: ClientError) -> ClientError {
    state.status.notice = Some(Notice::Error(err.to_string()));
    err
}
