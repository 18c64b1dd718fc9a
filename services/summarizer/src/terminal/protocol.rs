//! services/summarizer/src/terminal/protocol.rs
//!
//! Defines the line protocol the interactive terminal accepts. Each line the
//! user types is parsed into one `Command`.

use std::str::FromStr;
use summarizer_core::QA_SLOTS;

/// Represents the commands a user can type at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replaces the URL field.
    Url(String),
    /// Submits the URL field for summarization.
    Summarize,
    /// Replaces the question text in a slot (zero-based).
    Question { slot: usize, text: String },
    /// Submits the question in a slot (zero-based).
    Ask(usize),
    /// Rolls over to a new session.
    Reset,
    /// Redraws the current state.
    Status,
    /// Checks that the backend is reachable.
    Health,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Nothing to do")]
    Empty,
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("Question slot must be 1 or 2, got '{0}'")]
    BadSlot(String),
}

pub const HELP: &str = "\
Commands:
  url <address>      set the article URL
  summarize          summarize the article at the current URL
  q1 <text>          set question 1 (q2 for question 2)
  ask <1|2>          ask question 1 or 2 about the article
  reset              start a new session
  status             show the current state
  health             check that the backend is reachable
  help               show this list
  quit               leave";

/// Converts a user-facing slot number ("1" or "2") to an index.
fn parse_slot(raw: &str) -> Result<usize, ParseError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=QA_SLOTS).contains(n))
        .map(|n| n - 1)
        .ok_or_else(|| ParseError::BadSlot(raw.trim().to_string()))
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line.trim_end(), ""));
        // Arguments keep their inner whitespace; only the separator is dropped.
        let rest = rest.trim_end_matches(['\r', '\n']);

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "url" => Ok(Command::Url(rest.to_string())),
            "summarize" | "s" => Ok(Command::Summarize),
            "q1" => Ok(Command::Question {
                slot: 0,
                text: rest.to_string(),
            }),
            "q2" => Ok(Command::Question {
                slot: 1,
                text: rest.to_string(),
            }),
            "ask" => {
                if rest.trim().is_empty() {
                    return Err(ParseError::MissingArgument("ask"));
                }
                parse_slot(rest).map(Command::Ask)
            }
            "reset" => Ok(Command::Reset),
            "status" => Ok(Command::Status),
            "health" => Ok(Command::Health),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_field_edits_verbatim() {
        assert_eq!(
            "url  https://example.com/a ".parse(),
            Ok(Command::Url(" https://example.com/a ".to_string()))
        );
        assert_eq!(
            "q2 What is the main claim?".parse(),
            Ok(Command::Question {
                slot: 1,
                text: "What is the main claim?".to_string()
            })
        );
        assert_eq!("url".parse(), Ok(Command::Url(String::new())));
    }

    #[test]
    fn parses_ask_slots_as_zero_based() {
        assert_eq!("ask 1".parse(), Ok(Command::Ask(0)));
        assert_eq!("ASK 2".parse(), Ok(Command::Ask(1)));
        assert_eq!("ask 3".parse::<Command>(), Err(ParseError::BadSlot("3".to_string())));
        assert_eq!("ask".parse::<Command>(), Err(ParseError::MissingArgument("ask")));
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!("summarize".parse(), Ok(Command::Summarize));
        assert_eq!("  reset  ".parse(), Ok(Command::Reset));
        assert_eq!("exit".parse(), Ok(Command::Quit));
        assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!(
            "fly away".parse::<Command>(),
            Err(ParseError::Unknown("fly".to_string()))
        );
    }
}
