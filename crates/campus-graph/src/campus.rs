//! The campus store: one owned value holding the skill graph, the event and
//! session registries, and the interaction log.
//!
//! Every mutating operation validates first, applies its change, and then
//! appends exactly one log entry. A failed operation leaves all four parts
//! untouched.

use crate::edge::EdgeUpdate;
use crate::error::{CampusError, EntityKind, Result};
use crate::events::{Event, EventRegistry, NewEvent};
use crate::graph::{GraphStats, SkillGraph};
use crate::ids::{EventId, SessionId, UserId};
use crate::log::{Interaction, InteractionLog};
use crate::node::{NewUser, SkillClaim, UserProfile};
use crate::sessions::{Session, SessionRegistry, SessionRequest, SessionStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Campus {
    graph: SkillGraph,
    events: EventRegistry,
    sessions: SessionRegistry,
    log: InteractionLog,
}

impl Campus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &SkillGraph {
        &self.graph
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    // ── Users and skills ────────────────────────────────────────────────

    pub fn add_user(&mut self, profile: NewUser) -> Result<UserId> {
        let id = self.graph.add_user(profile)?;
        self.log.append(Interaction::UserRegistered { user: id });
        info!("Registered user {}", id);
        Ok(id)
    }

    pub fn get_user(&self, id: UserId) -> Result<UserProfile> {
        self.graph.get_user(id)
    }

    /// Adds or updates one skill association of a user.
    pub fn add_skill_edge(&mut self, user: UserId, claim: SkillClaim) -> Result<EdgeUpdate> {
        let update = self.graph.add_skill_edge(user, &claim)?;
        let kind = claim.kind();
        self.log.append(Interaction::SkillClaimed {
            user,
            skill: claim.skill_id,
            kind,
            proficiency: update.proficiency(),
        });
        Ok(update)
    }

    // ── Events ──────────────────────────────────────────────────────────

    pub fn create_event(&mut self, draft: NewEvent) -> Result<&Event> {
        let event = self.events.create(draft)?;
        self.log.append(Interaction::EventCreated {
            event: event.id.clone(),
        });
        info!("Created event {} ({})", event.id, event.title);
        Ok(event)
    }

    /// Registers an existing user for an event.
    pub fn register_participant(&mut self, event: &EventId, user: UserId) -> Result<&Event> {
        if !self.graph.contains_user(user) {
            return Err(CampusError::not_found(EntityKind::User, user));
        }

        let registered = self.events.register(event, user)?;
        self.log.append(Interaction::ParticipantRegistered {
            event: event.clone(),
            user,
        });
        debug!(
            "{} joined {} ({}/{})",
            user, event, registered.participants, registered.max_participants
        );
        Ok(registered)
    }

    pub fn get_event(&self, id: &EventId) -> Result<&Event> {
        self.events.get(id)
    }

    /// All events ordered by id.
    pub fn list_events(&self) -> Vec<&Event> {
        self.events.iter().collect()
    }

    // ── Sessions ────────────────────────────────────────────────────────

    /// Books a mentoring session with an existing user as mentor.
    pub fn book_session(&mut self, request: SessionRequest) -> Result<&Session> {
        if !self.graph.contains_user(request.mentor_id) {
            return Err(CampusError::not_found(EntityKind::User, request.mentor_id));
        }

        let session = self.sessions.book(request)?;
        self.log.append(Interaction::SessionBooked {
            session: session.id,
            mentor: session.mentor_id,
        });
        info!("Booked session {} with {}", session.id, session.mentor_id);
        Ok(session)
    }

    pub fn update_status(&mut self, id: SessionId, status: SessionStatus) -> Result<&Session> {
        let session = self.sessions.update_status(id, status)?;
        self.log
            .append(Interaction::SessionStatusChanged { session: id, status });
        info!("Session {} is now {}", id, status);
        Ok(session)
    }

    pub fn get_session(&self, id: SessionId) -> Result<&Session> {
        self.sessions.get(id)
    }

    /// Sessions mentored by a user, ordered by id.
    pub fn sessions_for_mentor(&self, mentor: UserId) -> Vec<&Session> {
        self.sessions.for_mentor(mentor).collect()
    }

    // ── Maintenance ─────────────────────────────────────────────────────

    /// Resets everything, including the log and id counters.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.events.clear();
        self.sessions.clear();
        self.log.clear();
        info!("Campus cleared");
    }

    pub fn stats(&self) -> CampusStats {
        CampusStats {
            graph: self.graph.stats(),
            events: self.events.len(),
            sessions: self.sessions.len(),
            log_entries: self.log.len(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampusStats {
    pub graph: GraphStats,
    pub events: usize,
    pub sessions: usize,
    pub log_entries: usize,
}
