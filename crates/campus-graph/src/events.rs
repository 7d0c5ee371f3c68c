//! Event registry.
//!
//! Events are keyed by caller-supplied ids. Registration increments the
//! participant count by one per distinct user until capacity is reached.

use crate::error::{CampusError, EntityKind, Result};
use crate::ids::{EventId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Event creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Opaque schedule string, e.g. "Tomorrow".
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub category: String,
    /// Participants already signed up outside the platform.
    #[serde(default)]
    pub participants: u32,
    pub max_participants: u32,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewEvent {
    /// A minimal event with the given capacity.
    pub fn new(id: impl Into<EventId>, title: impl Into<String>, max_participants: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            time: String::new(),
            location: String::new(),
            category: String::new(),
            participants: 0,
            max_participants,
            host: String::new(),
            tags: Vec::new(),
        }
    }

    fn validate(&self) -> Result<()> {
        self.id.validate()?;
        if self.title.trim().is_empty() {
            return Err(CampusError::validation("event title must not be blank"));
        }
        if self.max_participants == 0 {
            return Err(CampusError::validation(
                "max_participants must be at least 1",
            ));
        }
        if self.participants > self.max_participants {
            return Err(CampusError::validation(format!(
                "participants ({}) exceed max_participants ({})",
                self.participants, self.max_participants
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub category: String,
    pub participants: u32,
    pub max_participants: u32,
    pub host: String,
    pub tags: Vec<String>,
    /// Users registered through the platform.
    pub registrants: BTreeSet<UserId>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.participants >= self.max_participants
    }

    pub fn remaining(&self) -> u32 {
        self.max_participants.saturating_sub(self.participants)
    }

    pub fn is_registered(&self, user: UserId) -> bool {
        self.registrants.contains(&user)
    }
}

impl From<NewEvent> for Event {
    fn from(draft: NewEvent) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            description: draft.description,
            time: draft.time,
            location: draft.location,
            category: draft.category,
            participants: draft.participants,
            max_participants: draft.max_participants,
            host: draft.host,
            tags: draft.tags,
            registrants: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRegistry {
    events: BTreeMap<EventId, Event>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, draft: NewEvent) -> Result<&Event> {
        draft.validate()?;
        if self.events.contains_key(&draft.id) {
            return Err(CampusError::Conflict(format!(
                "event {} already exists",
                draft.id
            )));
        }

        let id = draft.id.clone();
        let event = self.events.entry(id).or_insert_with(|| draft.into());
        Ok(&*event)
    }

    /// Registers a user for an event.
    ///
    /// The caller is responsible for checking that the user exists.
    pub fn register(&mut self, id: &EventId, user: UserId) -> Result<&Event> {
        let event = self
            .events
            .get_mut(id)
            .ok_or_else(|| CampusError::not_found(EntityKind::Event, id))?;

        if event.is_registered(user) {
            return Err(CampusError::Conflict(format!(
                "{} is already registered for {}",
                user, id
            )));
        }
        if event.is_full() {
            warn!("Rejected {} for {}: event is full", user, id);
            return Err(CampusError::Capacity {
                event: id.to_string(),
                max: event.max_participants,
            });
        }

        event.participants += 1;
        event.registrants.insert(user);
        Ok(&*event)
    }

    pub fn get(&self, id: &EventId) -> Result<&Event> {
        self.events
            .get(id)
            .ok_or_else(|| CampusError::not_found(EntityKind::Event, id))
    }

    /// Iterates over events ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Events a user registered for through the platform.
    pub fn registered_by(&self, user: UserId) -> impl Iterator<Item = &Event> {
        self.events.values().filter(move |e| e.is_registered(user))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_create_from_payload() {
        let draft: NewEvent = serde_json::from_value(serde_json::json!({
            "id": "evt_test",
            "title": "Test Event",
            "description": "Integration Test",
            "time": "Tomorrow",
            "location": "Lab",
            "type": "Hackathon",
            "participants": 0,
            "max_participants": 10,
            "host": "Tester",
            "tags": ["Test"]
        }))
        .unwrap();

        let mut registry = EventRegistry::new();
        let event = registry.create(draft).unwrap();
        assert_eq!(event.category, "Hackathon");
        assert_eq!(event.participants, 0);
        assert_eq!(event.remaining(), 10);
    }

    #[test]
    fn test_duplicate_id_conflicts() {
        let mut registry = EventRegistry::new();
        registry.create(NewEvent::new("evt", "First", 5)).unwrap();
        let err = registry
            .create(NewEvent::new("evt", "Second", 5))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(registry.get(&"evt".into()).unwrap().title, "First");
    }

    #[test]
    fn test_creation_validation() {
        let mut registry = EventRegistry::new();
        let mut draft = NewEvent::new("evt", "Overbooked", 3);
        draft.participants = 4;
        assert_eq!(
            registry.create(draft).unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            registry
                .create(NewEvent::new("evt", "No seats", 0))
                .unwrap_err()
                .kind(),
            ErrorKind::Validation
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_until_full() {
        let mut registry = EventRegistry::new();
        registry.create(NewEvent::new("evt", "Small", 2)).unwrap();
        let id = EventId::new("evt");

        assert_eq!(registry.register(&id, UserId::new(1)).unwrap().participants, 1);
        assert_eq!(registry.register(&id, UserId::new(2)).unwrap().participants, 2);

        let err = registry.register(&id, UserId::new(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(registry.get(&id).unwrap().participants, 2);
    }

    #[test]
    fn test_prefilled_participants_count_toward_capacity() {
        let mut registry = EventRegistry::new();
        let mut draft = NewEvent::new("evt", "Almost full", 3);
        draft.participants = 2;
        registry.create(draft).unwrap();
        let id = EventId::new("evt");

        registry.register(&id, UserId::new(1)).unwrap();
        assert!(registry.get(&id).unwrap().is_full());
        assert_eq!(
            registry.register(&id, UserId::new(2)).unwrap_err().kind(),
            ErrorKind::Capacity
        );
    }

    #[test]
    fn test_double_registration_conflicts() {
        let mut registry = EventRegistry::new();
        registry.create(NewEvent::new("evt", "Talk", 10)).unwrap();
        let id = EventId::new("evt");

        registry.register(&id, UserId::new(1)).unwrap();
        let err = registry.register(&id, UserId::new(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(registry.get(&id).unwrap().participants, 1);
        assert_eq!(registry.registered_by(UserId::new(1)).count(), 1);
    }

    #[test]
    fn test_unknown_event() {
        let mut registry = EventRegistry::new();
        let err = registry
            .register(&"missing".into(), UserId::new(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
