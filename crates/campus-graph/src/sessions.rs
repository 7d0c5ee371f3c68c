//! Mentoring sessions and their status lifecycle.
//!
//! ```text
//!              ┌──> Completed
//!  Scheduled ──┤
//!              └──> Cancelled
//! ```
//!
//! Both end states are terminal. Transitions are only ever driven by callers.

use crate::error::{CampusError, EntityKind, Result};
use crate::ids::{IdSequence, SessionId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Scheduled)
    }

    /// Checks a transition against the lifecycle.
    pub fn transition(self, to: SessionStatus) -> Result<SessionStatus> {
        match (self, to) {
            (Self::Scheduled, Self::Completed) | (Self::Scheduled, Self::Cancelled) => Ok(to),
            _ => Err(CampusError::InvalidTransition {
                from: Some(self),
                to: to.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = CampusError;

    /// Parses a status name case-insensitively. Anything outside the three
    /// known states is an invalid transition target.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(CampusError::InvalidTransition {
                from: None,
                to: s.to_string(),
            }),
        }
    }
}

/// Booking payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub mentor_id: UserId,
    pub topic: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub duration: String,
}

impl SessionRequest {
    pub fn new(mentor_id: UserId, topic: impl Into<String>) -> Self {
        Self {
            mentor_id,
            topic: topic.into(),
            date: String::new(),
            time: String::new(),
            duration: String::new(),
        }
    }

    pub fn at(
        mut self,
        date: impl Into<String>,
        time: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        self.date = date.into();
        self.time = time.into();
        self.duration = duration.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub mentor_id: UserId,
    pub topic: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRegistry {
    sessions: BTreeMap<SessionId, Session>,
    ids: IdSequence,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Books a session in the `Scheduled` state.
    ///
    /// The caller is responsible for checking that the mentor exists.
    pub fn book(&mut self, request: SessionRequest) -> Result<&Session> {
        if request.topic.trim().is_empty() {
            return Err(CampusError::validation("session topic must not be blank"));
        }

        let id = SessionId::new(self.ids.next());
        let session = Session {
            id,
            mentor_id: request.mentor_id,
            topic: request.topic,
            date: request.date,
            time: request.time,
            duration: request.duration,
            status: SessionStatus::Scheduled,
        };
        Ok(&*self.sessions.entry(id).or_insert(session))
    }

    pub fn update_status(&mut self, id: SessionId, status: SessionStatus) -> Result<&Session> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| CampusError::not_found(EntityKind::Session, id))?;

        session.status = session.status.transition(status)?;
        Ok(&*session)
    }

    pub fn get(&self, id: SessionId) -> Result<&Session> {
        self.sessions
            .get(&id)
            .ok_or_else(|| CampusError::not_found(EntityKind::Session, id))
    }

    /// Iterates over sessions ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    pub fn for_mentor(&self, mentor: UserId) -> impl Iterator<Item = &Session> {
        self.sessions.values().filter(move |s| s.mentor_id == mentor)
    }

    /// Number of completed sessions per mentor.
    pub fn completed_by_mentor(&self) -> BTreeMap<UserId, usize> {
        let mut counts = BTreeMap::new();
        for session in self.sessions.values() {
            if session.status == SessionStatus::Completed {
                *counts.entry(session.mentor_id).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
        self.ids.reset();
    }
}
