//! services/summarizer/src/adapters/http_backend.rs
//!
//! The HTTP adapter, the concrete implementation of the `SummarizerBackend`
//! port from the `core` crate. It speaks JSON to the summarization service
//! using `reqwest`.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use summarizer_core::{
    ArticleResult, HealthStatus, PortError, PortResult, QuotaStatus, SummarizerBackend,
    SummaryOutcome,
};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An HTTP adapter that implements the `SummarizerBackend` port.
#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a new `HttpBackend` rooted at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> PortResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("summarizer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PortError::Transport(e.to_string()))?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wraps an already configured `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

//=========================================================================================
// Wire Record Structs
//=========================================================================================

#[derive(Serialize)]
struct SummarizeBody<'a> {
    url: &'a str,
    session_id: &'a str,
}

#[derive(Serialize)]
struct AskBody<'a> {
    question: &'a str,
    url: &'a str,
    session_id: &'a str,
}

#[derive(Deserialize)]
struct QuotaRecord {
    summary_count: u32,
    qa_count: u32,
    max_summary: u32,
    max_qa: u32,
}
impl QuotaRecord {
    fn to_domain(self) -> QuotaStatus {
        QuotaStatus {
            summary_count: self.summary_count,
            qa_count: self.qa_count,
            max_summary: self.max_summary,
            max_qa: self.max_qa,
        }
    }
}

#[derive(Deserialize)]
struct SummaryRecord {
    summary: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    cached: bool,
}
impl SummaryRecord {
    fn to_domain(self) -> SummaryOutcome {
        SummaryOutcome {
            article: ArticleResult {
                title: self.title,
                summary: self.summary,
            },
            cached: self.cached,
        }
    }
}

#[derive(Deserialize)]
struct AnswerRecord {
    answer: String,
}

#[derive(Deserialize)]
struct HealthRecord {
    status: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct ErrorRecord {
    #[serde(default)]
    error: Option<String>,
}

//=========================================================================================
// Response Handling
//=========================================================================================

/// Reads the body as JSON and maps the status code.
///
/// A non-2xx status becomes [`PortError::Rejected`] carrying the body's
/// `error` field. A body that is not the expected JSON is a transport failure,
/// whatever the status.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> PortResult<T> {
    let status = resp.status();
    let body = resp.bytes().await.map_err(transport)?;

    if !status.is_success() {
        let record: ErrorRecord = serde_json::from_slice(&body)
            .map_err(|e| PortError::Transport(format!("unreadable error body: {e}")))?;
        return Err(PortError::Rejected {
            status: status.as_u16(),
            message: record.error,
        });
    }

    serde_json::from_slice(&body)
        .map_err(|e| PortError::Transport(format!("unreadable response body: {e}")))
}

fn transport(e: reqwest::Error) -> PortError {
    PortError::Transport(e.to_string())
}

//=========================================================================================
// Port Implementation
//=========================================================================================

#[async_trait]
impl SummarizerBackend for HttpBackend {
    async fn session_status(&self, session_id: &str) -> PortResult<QuotaStatus> {
        let resp = self
            .http
            .get(self.endpoint("session-status"))
            .query(&[("session_id", session_id)])
            .send()
            .await
            .map_err(transport)?;
        let record: QuotaRecord = read_json(resp).await?;
        Ok(record.to_domain())
    }

    async fn summarize(&self, url: &str, session_id: &str) -> PortResult<SummaryOutcome> {
        debug!(%url, "POST /summarize");
        let resp = self
            .http
            .post(self.endpoint("summarize"))
            .json(&SummarizeBody { url, session_id })
            .send()
            .await
            .map_err(transport)?;
        let record: SummaryRecord = read_json(resp).await?;
        Ok(record.to_domain())
    }

    async fn ask(&self, question: &str, url: &str, session_id: &str) -> PortResult<String> {
        debug!(%url, "POST /ask");
        let resp = self
            .http
            .post(self.endpoint("ask"))
            .json(&AskBody {
                question,
                url,
                session_id,
            })
            .send()
            .await
            .map_err(transport)?;
        let record: AnswerRecord = read_json(resp).await?;
        Ok(record.answer)
    }

    async fn health(&self) -> PortResult<HealthStatus> {
        let resp = self
            .http
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(transport)?;
        let record: HealthRecord = read_json(resp).await?;
        Ok(HealthStatus {
            status: record.status,
            message: record.message,
        })
    }
}
