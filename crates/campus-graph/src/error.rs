//! Error types for the campus core.
//!
//! Every failure is local and synchronous. Operations validate before they
//! mutate, so an `Err` always means the campus is unchanged.

use crate::sessions::SessionStatus;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CampusError>;

/// Errors raised by the snapshot store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),
}

/// The kind of entity a lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Skill,
    Event,
    Session,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::User => "user",
            Self::Skill => "skill",
            Self::Event => "event",
            Self::Session => "session",
        };
        write!(f, "{}", s)
    }
}

/// Stable classification of a [`CampusError`], for callers that map
/// failures onto their own responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Capacity,
    InvalidTransition,
    Store,
}

#[derive(Error, Debug)]
pub enum CampusError {
    /// Malformed or out-of-range input.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Duplicate identifier or duplicate registration.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Event {event} is full ({max} participants)")]
    Capacity { event: String, max: u32 },

    /// `from` is `None` when the requested status could not be parsed.
    #[error("Invalid session transition to {to}{}", .from.map(|s| format!(" from {s}")).unwrap_or_default())]
    InvalidTransition {
        from: Option<SessionStatus>,
        to: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CampusError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Returns the error's classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Capacity { .. } => ErrorKind::Capacity,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Store(_) => ErrorKind::Store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CampusError::validation("bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CampusError::not_found(EntityKind::User, "u9").kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_messages() {
        let err = CampusError::not_found(EntityKind::Event, "evt_x");
        assert_eq!(err.to_string(), "event not found: evt_x");

        let err = CampusError::InvalidTransition {
            from: Some(SessionStatus::Completed),
            to: "Cancelled".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid session transition to Cancelled from Completed"
        );

        let err = CampusError::InvalidTransition {
            from: None,
            to: "Paused".into(),
        };
        assert_eq!(err.to_string(), "Invalid session transition to Paused");
    }
}
