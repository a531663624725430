//! Error types for the navigator's external collaborators.
//!
//! Neither error type ever escapes the navigation core:
//!
//! - [`HistoryError`] is returned by a [`HistoryBackend`](crate::HistoryBackend)
//!   when it cannot record an entry. The bridge logs it and falls back to
//!   in-memory navigation.
//! - [`IdentityError`] is returned by an
//!   [`IdentityProvider`](crate::IdentityProvider). The auth gate treats every
//!   variant as "not authenticated" and fails closed.
//!
//! Navigation itself reports values, not errors: see
//! [`NavigationOutcome`](crate::NavigationOutcome) and
//! [`GateDecision`](crate::GateDecision).
//!
//! # Examples
//!
//! ```
//! use suite_navigator::error::{HistoryError, IdentityError};
//!
//! let err = HistoryError::Unavailable;
//! assert_eq!(err.to_string(), "history API is not available on this platform");
//!
//! let err = IdentityError::backend("timeout");
//! assert!(!err.is_no_session());
//! ```

use thiserror::Error;

/// Failure of the platform history primitive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// The host has no history API (headless host, tests, non-browser shell).
    #[error("history API is not available on this platform")]
    Unavailable,

    /// The history API refused to record the entry.
    #[error("history rejected entry '{path}': {message}")]
    Rejected { path: String, message: String },
}

/// Failure of the "who is the current caller" query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// There is no signed-in session.
    #[error("no active session")]
    NoSession,

    /// The identity service could not be reached or answered with an error.
    #[error("identity service error: {message}")]
    Backend { message: String },

    /// The service answered with a document we could not read.
    #[error("malformed identity document: {message}")]
    Malformed { message: String },
}

impl IdentityError {
    /// Create a [`Backend`](Self::Backend) error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a [`Malformed`](Self::Malformed) error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// `true` for the ordinary signed-out case, `false` for real failures.
    pub fn is_no_session(&self) -> bool {
        matches!(self, Self::NoSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_error_display() {
        let err = HistoryError::Rejected {
            path: "/rooms".to_string(),
            message: "quota exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "history rejected entry '/rooms': quota exceeded"
        );
    }

    #[test]
    fn test_identity_error_display() {
        assert_eq!(IdentityError::NoSession.to_string(), "no active session");
        assert_eq!(
            IdentityError::backend("503").to_string(),
            "identity service error: 503"
        );
        assert_eq!(
            IdentityError::malformed("missing $id").to_string(),
            "malformed identity document: missing $id"
        );
    }

    #[test]
    fn test_identity_error_no_session() {
        assert!(IdentityError::NoSession.is_no_session());
        assert!(!IdentityError::backend("x").is_no_session());
    }
}
