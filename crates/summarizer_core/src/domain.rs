//! crates/summarizer_core/src/domain.rs
//!
//! Defines the pure, core data structures for the summarizer client.
//! These structs are independent of any wire or storage format.

/// Number of follow-up question slots offered per article.
pub const QA_SLOTS: usize = 2;

/// A cached snapshot of the per-session quota counters.
///
/// The authoritative copy lives on the backend. The client only ever replaces
/// this snapshot with a freshly fetched one; it never increments it locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    pub summary_count: u32,
    pub qa_count: u32,
    pub max_summary: u32,
    pub max_qa: u32,
}

impl Default for QuotaStatus {
    /// The snapshot shown before the backend has answered for the first time.
    fn default() -> Self {
        Self {
            summary_count: 0,
            qa_count: 0,
            max_summary: 1,
            max_qa: 2,
        }
    }
}

impl QuotaStatus {
    pub fn can_summarize(&self) -> bool {
        self.summary_count < self.max_summary
    }

    pub fn can_ask_questions(&self) -> bool {
        self.qa_count < self.max_qa
    }
}

/// The title and summary of the most recently summarized article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleResult {
    pub title: String,
    pub summary: String,
}

/// A successful summarize response, before it is folded into client state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub article: ArticleResult,
    /// The backend returned a previously computed summary.
    pub cached: bool,
}

/// One follow-up question slot. The answer is empty until the backend replies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

// Represents the backend's answer to a health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

/// The single message slot shown to the user. Error and success are mutually
/// exclusive; setting either replaces whatever was there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

/// Transient request flags plus the message slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiStatus {
    pub loading: bool,
    pub qa_loading: [bool; QA_SLOTS],
    pub notice: Option<Notice>,
}

impl UiStatus {
    pub fn error(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Error(message)) => Some(message),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Success(message)) => Some(message),
            _ => None,
        }
    }

    /// Drops the message only if it is an error, leaving a success in place.
    pub fn clear_error(&mut self) {
        if matches!(self.notice, Some(Notice::Error(_))) {
            self.notice = None;
        }
    }
}

/// Which inputs and buttons are currently usable.
///
/// Derived from the last fetched [`QuotaStatus`] and the in-flight flags;
/// never predicted ahead of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub url_input: bool,
    pub summarize_button: bool,
    /// The Q&A section is only shown once a summary exists.
    pub qa_section: bool,
    pub question_input: [bool; QA_SLOTS],
    pub ask_button: [bool; QA_SLOTS],
}

/// A point-in-time copy of everything the front end renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSnapshot {
    pub session_id: String,
    pub url: String,
    pub article: Option<ArticleResult>,
    pub qa: [QaPair; QA_SLOTS],
    pub quota: QuotaStatus,
    pub status: UiStatus,
}

impl ClientSnapshot {
    /// An article whose summary text is empty counts as no summary at all.
    pub fn has_summary(&self) -> bool {
        self.article
            .as_ref()
            .is_some_and(|article| !article.summary.is_empty())
    }

    pub fn controls(&self) -> Controls {
        let can_summarize = self.quota.can_summarize();
        let can_ask = self.quota.can_ask_questions();
        let question_input: [bool; QA_SLOTS] =
            std::array::from_fn(|i| can_ask && !self.status.qa_loading[i]);
        let ask_button: [bool; QA_SLOTS] = std::array::from_fn(|i| {
            question_input[i] && !self.qa[i].question.trim().is_empty()
        });

        Controls {
            url_input: can_summarize,
            summarize_button: can_summarize && !self.status.loading,
            qa_section: self.has_summary(),
            question_input,
            ask_button,
        }
    }
}
