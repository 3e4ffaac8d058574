//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An email address, as the user typed it.
///
/// Users are keyed by this value. It is stored and compared verbatim: no
/// trimming, no case folding and no syntax check, so `Reader@example.com`
/// and `reader@example.com` are different users.
///
/// ## Examples
///
/// ```
/// use webtoon_core::Email;
///
/// let email = Email::from("Reader@Example.com");
/// assert_eq!(email.as_str(), "Reader@Example.com");
/// assert_ne!(email, Email::from("reader@example.com"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Wrap an address exactly as given.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Email {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Email {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_is_kept_verbatim() {
        assert_eq!(Email::from("  Admin@Gmail.COM ").as_str(), "  Admin@Gmail.COM ");
        assert_eq!(Email::new("obito").as_str(), "obito");
        assert_eq!(Email::new("").as_str(), "");
    }

    #[test]
    fn test_comparison_is_exact() {
        assert_eq!(Email::from("admin@gmail.com"), Email::new("admin@gmail.com"));
        assert_ne!(Email::from("ADMIN@GMAIL.COM"), Email::from("admin@gmail.com"));
    }

    #[test]
    fn test_display() {
        let email = Email::from("reader@example.com".to_string());
        assert_eq!(format!("{email}"), "reader@example.com");
    }
}
