//! Append-only interaction log.
//!
//! Every successful mutation of the campus appends exactly one entry. The
//! sequence number is the logical clock analytics use for recency; the wall
//! clock timestamp is informational.

use crate::edge::EdgeKind;
use crate::ids::{EventId, Proficiency, SessionId, SkillId, UserId};
use crate::sessions::SessionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A domain mutation recorded in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    UserRegistered {
        user: UserId,
    },
    SkillClaimed {
        user: UserId,
        skill: SkillId,
        kind: EdgeKind,
        proficiency: Proficiency,
    },
    EventCreated {
        event: EventId,
    },
    ParticipantRegistered {
        event: EventId,
        user: UserId,
    },
    SessionBooked {
        session: SessionId,
        mentor: UserId,
    },
    SessionStatusChanged {
        session: SessionId,
        status: SessionStatus,
    },
}

impl Interaction {
    /// Short tag naming the kind of mutation.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user_registered",
            Self::SkillClaimed { .. } => "skill_claimed",
            Self::EventCreated { .. } => "event_created",
            Self::ParticipantRegistered { .. } => "participant_registered",
            Self::SessionBooked { .. } => "session_booked",
            Self::SessionStatusChanged { .. } => "session_status_changed",
        }
    }

    /// Id of the entity the mutation was applied to.
    pub fn entity_id(&self) -> String {
        match self {
            Self::UserRegistered { user } | Self::SkillClaimed { user, .. } => user.to_string(),
            Self::EventCreated { event } | Self::ParticipantRegistered { event, .. } => {
                event.to_string()
            }
            Self::SessionBooked { session, .. } | Self::SessionStatusChanged { session, .. } => {
                session.to_string()
            }
        }
    }
}

/// One log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Logical timestamp, starting at 1.
    pub seq: u64,
    pub recorded_at: DateTime<Utc>,
    pub interaction: Interaction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionLog {
    entries: Vec<LogEntry>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interaction and returns its sequence number.
    pub fn append(&mut self, interaction: Interaction) -> u64 {
        let seq = self.last_seq() + 1;
        self.entries.push(LogEntry {
            seq,
            recorded_at: Utc::now(),
            interaction,
        });
        seq
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries with a sequence number strictly greater than `seq`.
    pub fn since(&self, seq: u64) -> &[LogEntry] {
        // seq n lives at position n - 1
        let start = (seq as usize).min(self.entries.len());
        &self.entries[start..]
    }

    /// The most recent `window` entries.
    pub fn tail(&self, window: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(window);
        &self.entries[start..]
    }

    /// Sequence number of the latest entry, 0 when empty.
    pub fn last_seq(&self) -> u64 {
        self.entries.last().map(|e| e.seq).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry. Only the full campus reset calls this.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
