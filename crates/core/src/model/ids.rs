use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based index of a question within a session.
///
/// Numbers are assigned by the question pool and strictly increase across a
/// session; `History::append` enforces the ordering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionNumber(u32);

impl QuestionNumber {
    /// Creates a new `QuestionNumber`
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Short label identifying one option of a question (e.g. `"A"`).
///
/// Uniqueness within a question is enforced by `Question::new`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionKey(String);

impl OptionKey {
    /// Creates a new `OptionKey`
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the underlying label
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OptionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Opaque identity of the quiz taker, issued by the auth layer.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new `UserId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Certification track the session draws questions from (e.g. `"saa-c03"`).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificationTrack(String);

impl CertificationTrack {
    /// Creates a new `CertificationTrack`
    #[must_use]
    pub fn new(track: impl Into<String>) -> Self {
        Self(track.into())
    }

    /// Returns the underlying track name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionNumber({})", self.0)
    }
}

impl fmt::Debug for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionKey({})", self.0)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Debug for CertificationTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CertificationTrack({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CertificationTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_number_display() {
        let number = QuestionNumber::new(42);
        assert_eq!(number.to_string(), "42");
        assert_eq!(number.value(), 42);
    }

    #[test]
    fn question_numbers_order_by_value() {
        assert!(QuestionNumber::new(2) < QuestionNumber::new(10));
    }

    #[test]
    fn option_key_from_str() {
        let key = OptionKey::from("A");
        assert_eq!(key, OptionKey::new("A"));
        assert_eq!(key.as_str(), "A");
    }

    #[test]
    fn user_id_is_opaque_text() {
        let id = UserId::new("google-oauth2|12345");
        assert_eq!(id.to_string(), "google-oauth2|12345");
    }

    #[test]
    fn track_display() {
        let track = CertificationTrack::new("saa-c03");
        assert_eq!(track.as_str(), "saa-c03");
    }
}
