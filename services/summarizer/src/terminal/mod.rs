//! services/summarizer/src/terminal/mod.rs
//!
//! The terminal front end: executes parsed commands against a
//! `SessionClient` and draws the resulting state.

pub mod protocol;
pub mod render;

use crate::error::AppError;
use protocol::{Command, ParseError, HELP};
use render::render;
use std::io::Write;
use summarizer_core::{ClientError, SessionClient, QA_SLOTS};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

/// Tells the loop whether to keep reading input.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one command. Operation failures are already in the client's message
/// slot, so they are drawn rather than returned.
pub async fn execute<W: Write>(
    client: &SessionClient,
    command: Command,
    out: &mut W,
) -> Result<Flow, AppError> {
    debug!(?command, "Executing command");
    match command {
        Command::Url(url) => {
            if !client.controls().url_input {
                writeln!(out, "The URL field is locked: {}", ClientError::SummaryLimitReached)?;
                return Ok(Flow::Continue);
            }
            client.set_url(&url);
        }
        Command::Summarize => {
            if let Err(e) = client.summarize().await {
                debug!("Summarize did not complete: {}", e);
            }
        }
        Command::Question { slot, text } => {
            if !client.controls().question_input.get(slot).copied().unwrap_or(false) {
                writeln!(out, "Question {} is locked.", slot + 1)?;
                return Ok(Flow::Continue);
            }
            client.set_question(slot, &text)?;
        }
        Command::Ask(slot) => {
            if let Err(e) = client.ask_question(slot).await {
                debug!("Ask did not complete: {}", e);
            }
        }
        Command::Reset => {
            let session_id = client.reset().await;
            writeln!(out, "Started new session {session_id}")?;
        }
        Command::Status => {}
        Command::Health => {
            match client.health().await {
                Ok(health) => writeln!(out, "Backend is {}: {}", health.status, health.message)?,
                Err(e) => writeln!(out, "Backend unreachable: {e}")?,
            }
            return Ok(Flow::Continue);
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    }

    write!(out, "{}", render(&client.snapshot()))?;
    Ok(Flow::Continue)
}

/// The interactive loop. Reads commands line by line until `quit` or end of
/// input.
pub async fn repl<R, W>(client: &SessionClient, input: R, out: &mut W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!(session_id = %client.session_id(), "Interactive session started");
    write!(out, "{}", render(&client.snapshot()))?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        if execute(client, command, out).await? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

/// Summarizes `url`, then asks each question in its own slot. Returns the
/// first failure after drawing the final state.
pub async fn summarize_once<W: Write>(
    client: &SessionClient,
    url: &str,
    questions: &[String],
    out: &mut W,
) -> Result<(), AppError> {
    if questions.len() > QA_SLOTS {
        return Err(AppError::Usage(format!(
            "at most {QA_SLOTS} questions can be asked per article"
        )));
    }

    client.set_url(url);
    let mut result = client.summarize().await.map(|_| ());
    if result.is_ok() {
        for (slot, question) in questions.iter().enumerate() {
            client.set_question(slot, question)?;
            if let Err(e) = client.ask_question(slot).await {
                result = Err(e);
                break;
            }
        }
    }

    write!(out, "{}", render(&client.snapshot()))?;
    result.map_err(AppError::from)
}

/// Reports how a run ended and picks the process exit status. Errors are
/// written with their `Display` text.
pub fn exit_status<W: Write>(result: Result<(), AppError>, err: &mut W) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            if writeln!(err, "Error: {e}").is_err() {
                debug!("Could not report error: {}", e);
            }
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use summarizer_core::{
        ArticleResult, HealthStatus, MemorySessionStore, PortError, PortResult, QuotaStatus,
        SummarizerBackend, SummaryOutcome,
    };

    /// One summary and two questions per session, like the real service.
    #[derive(Default)]
    struct StubBackend {
        counts: Mutex<(u32, u32)>,
    }

    #[async_trait]
    impl SummarizerBackend for StubBackend {
        async fn session_status(&self, _session_id: &str) -> PortResult<QuotaStatus> {
            let (summary_count, qa_count) = *self.counts.lock().unwrap();
            Ok(QuotaStatus {
                summary_count,
                qa_count,
                max_summary: 1,
                max_qa: 2,
            })
        }

        async fn summarize(&self, url: &str, _session_id: &str) -> PortResult<SummaryOutcome> {
            if url == "https://down.example" {
                return Err(PortError::Transport("refused".to_string()));
            }
            self.counts.lock().unwrap().0 += 1;
            Ok(SummaryOutcome {
                article: ArticleResult {
                    title: "Title".to_string(),
                    summary: "Summary.".to_string(),
                },
                cached: false,
            })
        }

        async fn ask(&self, question: &str, _url: &str, _session_id: &str) -> PortResult<String> {
            self.counts.lock().unwrap().1 += 1;
            Ok(format!("Re: {question}"))
        }

        async fn health(&self) -> PortResult<HealthStatus> {
            Err(PortError::Transport("connection refused".to_string()))
        }
    }

    async fn client() -> SessionClient {
        let client = SessionClient::new(
            Arc::new(StubBackend::default()),
            Arc::new(MemorySessionStore::new()),
        );
        client.bootstrap().await;
        client
    }

    #[tokio::test]
    async fn repl_drives_a_full_session() {
        let client = client().await;
        let input = "url https://example.com/a\nsummarize\nq1 Why?\nask 1\nbogus\nquit\nstatus\n";
        let mut out = Vec::new();

        repl(&client, input.as_bytes(), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("## Title\nSummary.\n"));
        assert!(text.contains("  Q: Why?\n  A: Re: Why?\n"));
        assert!(text.contains("Unknown command 'bogus'"));
        assert!(text.contains("Summaries: 1/1  Q&A: 1/2"));
        assert_eq!(client.snapshot().qa[0].answer, "Re: Why?");
    }

    #[tokio::test]
    async fn locked_url_field_is_not_edited() {
        let client = client().await;
        let mut out = Vec::new();
        execute(&client, Command::Url("https://example.com/a".into()), &mut out)
            .await
            .unwrap();
        execute(&client, Command::Summarize, &mut out).await.unwrap();

        out.clear();
        execute(&client, Command::Url("https://example.com/b".into()), &mut out)
            .await
            .unwrap();

        assert_eq!(client.snapshot().url, "https://example.com/a");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "The URL field is locked: Summary limit reached for this session\n"
        );
    }

    #[tokio::test]
    async fn health_failure_is_printed() {
        let client = client().await;
        let mut out = Vec::new();

        let flow = execute(&client, Command::Health, &mut out).await.unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(String::from_utf8(out)
            .unwrap()
            .starts_with("Backend unreachable: Transport failure"));
    }

    #[tokio::test]
    async fn one_shot_summary_with_questions() {
        let client = client().await;
        let mut out = Vec::new();
        let questions = vec!["One?".to_string(), "Two?".to_string()];

        summarize_once(&client, "https://example.com/a", &questions, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Summaries: 1/1  Q&A: 2/2\n"));
        assert!(text.contains("  A: Re: Two?\n"));
    }

    #[tokio::test]
    async fn one_shot_failure_is_drawn_and_returned() {
        let client = client().await;
        let mut out = Vec::new();

        let err = summarize_once(&client, "https://down.example", &[], &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Client(ClientError::Network)));
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Error: Network error. Please check if the backend server is running."));
    }

    #[test]
    fn failures_are_reported_with_display_text() {
        let mut err = Vec::new();

        let code = exit_status(Err(AppError::Client(ClientError::Network)), &mut err);

        assert_eq!(code, 1);
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Error: Network error. Please check if the backend server is running.\n"
        );
        assert_eq!(exit_status(Ok(()), &mut Vec::new()), 0);
    }

    #[tokio::test]
    async fn one_shot_rejects_a_third_question() {
        let client = client().await;
        let questions = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let err = summarize_once(&client, "https://example.com/a", &questions, &mut Vec::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Usage(_)));
    }
}
