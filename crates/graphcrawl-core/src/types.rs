//! Strong type definitions for graphcrawl.
//!
//! State fingerprints are newtypes so they cannot be confused with other
//! strings flowing through the crawler.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::Action;
use crate::error::{CoreError, Result};

/// Number of characters shown by [`StateId::short`].
pub const SHORT_LEN: usize = 6;

/// An opaque fingerprint identifying one application state.
///
/// Produced by the device driver. Two observations of the same UI yield the
/// same `StateId`; the crawler never looks inside it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    /// Wrap a fingerprint produced by a driver.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an untrusted fingerprint (model files, CLI input).
    ///
    /// Rejects empty strings and strings containing whitespace or control
    /// characters.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CoreError::InvalidStateId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Fingerprint a raw UI dump as a Blake3 hex digest.
    pub fn fingerprint(ui_dump: &[u8]) -> Self {
        Self(hex::encode(blake3::hash(ui_dump).as_bytes()))
    }

    /// The fingerprint as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log lines.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({})", self.0)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A discovered transition: performing `action` in `from` led to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: StateId,
    pub action: Action,
    pub to: StateId,
}

impl Edge {
    pub fn new(from: impl Into<StateId>, action: Action, to: impl Into<StateId>) -> Self {
        Self {
            from: from.into(),
            action,
            to: to.into(),
        }
    }
}

/// One step of a replay path: perform `action`, expect to land in `expected`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub expected: StateId,
    pub action: Action,
}

impl PathStep {
    pub fn new(expected: impl Into<StateId>, action: Action) -> Self {
        Self {
            expected: expected.into(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = StateId::fingerprint(b"<hierarchy><node text=\"Login\"/></hierarchy>");
        let b = StateId::fingerprint(b"<hierarchy><node text=\"Login\"/></hierarchy>");
        let c = StateId::fingerprint(b"<hierarchy><node text=\"Home\"/></hierarchy>");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_short_truncates() {
        let id = StateId::new("abcdef0123");
        assert_eq!(id.short(), "abcdef");

        let tiny = StateId::new("R");
        assert_eq!(tiny.short(), "R");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(StateId::parse("home").is_ok());
        assert_eq!(
            StateId::parse(""),
            Err(CoreError::InvalidStateId(String::new()))
        );
        assert!(StateId::parse("two words").is_err());
        assert!(StateId::parse("tab\there").is_err());
    }

    #[test]
    fn test_state_id_serializes_as_plain_string() {
        let id = StateId::new("R-click_center");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"R-click_center\"");

        let back: StateId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_state_id_debug() {
        let id = StateId::new("R");
        assert_eq!(format!("{:?}", id), "StateId(R)");
        assert_eq!(format!("{}", id), "R");
    }
}
