//! services/summarizer/src/terminal/render.rs
//!
//! Draws a `ClientSnapshot` as plain text.

use std::fmt;
use summarizer_core::{ClientSnapshot, Notice};

/// A snapshot laid out for the terminal.
pub struct Screen<'a>(pub &'a ClientSnapshot);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let controls = snapshot.controls();
        let quota = &snapshot.quota;

        writeln!(
            f,
            "Summaries: {}/{}  Q&A: {}/{}",
            quota.summary_count, quota.max_summary, quota.qa_count, quota.max_qa
        )?;

        match &snapshot.status.notice {
            Some(Notice::Error(message)) => writeln!(f, "Error: {message}")?,
            Some(Notice::Success(message)) => writeln!(f, "{message}")?,
            None => {}
        }

        let url_state = if controls.url_input { "" } else { " (locked)" };
        writeln!(f, "Article URL{url_state}: {}", snapshot.url)?;
        if snapshot.status.loading {
            writeln!(f, "Summarizing...")?;
        }

        if let Some(article) = &snapshot.article {
            writeln!(f)?;
            writeln!(f, "## {}", article.title)?;
            writeln!(f, "{}", article.summary)?;
        }

        if !controls.qa_section {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "Ask Follow-up Questions")?;
        for (index, pair) in snapshot.qa.iter().enumerate() {
            let lock = if controls.question_input[index] { "" } else { " (locked)" };
            writeln!(f, "Question {}{lock}: {}", index + 1, pair.question)?;
            if snapshot.status.qa_loading[index] {
                writeln!(f, "  Getting Answer...")?;
            }
            if !pair.answer.is_empty() {
                writeln!(f, "  Q: {}", pair.question)?;
                writeln!(f, "  A: {}", pair.answer)?;
            }
        }
        Ok(())
    }
}

pub fn render(snapshot: &ClientSnapshot) -> String {
    Screen(snapshot).to_string()
}
