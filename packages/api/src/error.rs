//! # Error taxonomy
//!
//! Every fallible operation in the client returns [`Error`]. The variant is the
//! machine-checkable kind screens branch on; the `Display` text is the
//! human-readable message they show.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`Error::Validation`] | Input is rejected before any request is sent. Carries the offending field. |
//! | [`Error::NotFound`] | A lookup yielded nothing (unknown email, missing recipe). |
//! | [`Error::Auth`] | The password does not match. |
//! | [`Error::Conflict`] | Registration with an email that already exists. |
//! | [`Error::Request`] | Transport failure or non-2xx status. The message is generic. |

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Request(String),
}

/// Discriminant of [`Error`], for callers that only care about the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Auth,
    Conflict,
    Request,
}

impl Error {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Auth(_) => ErrorKind::Auth,
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::Request(_) => ErrorKind::Request,
        }
    }

    /// The rejected field, for validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_message() {
        let err = Error::validation("title", "Title is required.");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("title"));
        assert_eq!(err.to_string(), "Title is required.");

        let err = Error::Request("Failed to fetch recipes".into());
        assert_eq!(err.kind(), ErrorKind::Request);
        assert_eq!(err.field(), None);
    }
}
