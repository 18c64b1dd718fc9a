//! crates/summarizer_core/src/session.rs
//!
//! Session identifier synthesis and an in-memory `SessionStore`.

use crate::ports::{PortResult, SessionStore};
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use uuid::Uuid;

/// The fixed storage key the identifier is persisted under.
pub const SESSION_KEY: &str = "ai_summarizer_session_id";

const PREFIX: &str = "session_";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Synthesizes a fresh `session_<epoch-millis>_<9-char base36>` identifier.
pub fn generate_session_id() -> String {
    session_id_at(Utc::now(), Uuid::new_v4())
}

/// Builds an identifier from an explicit timestamp and randomness source.
pub fn session_id_at(now: DateTime<Utc>, entropy: Uuid) -> String {
    format!(
        "{PREFIX}{}_{}",
        now.timestamp_millis(),
        base36_suffix(entropy.as_u128())
    )
}

fn base36_suffix(mut value: u128) -> String {
    let mut digits = [b'0'; SUFFIX_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36[(value % 36) as usize];
        value /= 36;
    }
    digits.iter().map(|&b| b as char).collect()
}

/// Checks that `id` has the shape produced by [`generate_session_id`].
pub fn is_well_formed(id: &str) -> bool {
    let Some(rest) = id.strip_prefix(PREFIX) else {
        return false;
    };
    let Some((millis, suffix)) = rest.split_once('_') else {
        return false;
    };
    !millis.is_empty()
        && millis.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix.bytes().all(|b| BASE36.contains(&b))
}

//=========================================================================================
// In-memory Store
//=========================================================================================

/// A `SessionStore` that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an identifier already persisted, as after a previous run.
    pub fn with_session(session_id: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(session_id.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> PortResult<Option<String>> {
        Ok(self.slot().clone())
    }

    fn set(&self, session_id: &str) -> PortResult<()> {
        *self.slot() = Some(session_id.to_string());
        Ok(())
    }

    fn clear(&self) -> PortResult<()> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn id_embeds_millis_and_padded_suffix() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let id = session_id_at(now, Uuid::from_u128(35));
        assert_eq!(id, "session_1700000000123_00000000z");
        assert!(is_well_formed(&id));
    }

    #[test]
    fn generated_ids_are_well_formed_and_distinct() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert!(is_well_formed(&a), "{a}");
        assert!(is_well_formed(&b), "{b}");
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_foreign_shapes() {
        assert!(!is_well_formed("abc"));
        assert!(!is_well_formed("session_123"));
        assert!(!is_well_formed("session_12x_abcdefghi"));
        assert!(!is_well_formed("session_123_ABCDEFGHI"));
        assert!(!is_well_formed("session_123_abcd"));
    }

    #[test]
    fn memory_store_get_set_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get().unwrap(), None);
        store.set("session_1_aaaaaaaaa").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("session_1_aaaaaaaaa"));
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }
}
