//! Shared access to a campus across tasks.
//!
//! Mutations hold the write lock for their whole validate-apply-log step,
//! so the log order is the order in which writers acquired the lock.
//! Analytics hold the read lock and always see a consistent campus.

use crate::analytics::{LeaderboardEntry, MentorMatch, TrendingSkill};
use crate::campus::{Campus, CampusStats};
use crate::edge::EdgeUpdate;
use crate::error::Result;
use crate::events::{Event, NewEvent};
use crate::ids::{EventId, SessionId, UserId};
use crate::node::{NewUser, SkillClaim, UserProfile};
use crate::sessions::{Session, SessionRequest, SessionStatus};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared campus state.
pub type SharedCampus = Arc<RwLock<Campus>>;

/// A cloneable handle to one campus.
#[derive(Debug, Clone, Default)]
pub struct CampusHandle {
    inner: SharedCampus,
}

impl CampusHandle {
    pub fn new(campus: Campus) -> Self {
        Self {
            inner: Arc::new(RwLock::new(campus)),
        }
    }

    /// Returns the underlying lock for callers that need several operations
    /// under one guard.
    pub fn shared(&self) -> SharedCampus {
        self.inner.clone()
    }

    pub async fn add_user(&self, profile: NewUser) -> Result<UserId> {
        self.inner.write().await.add_user(profile)
    }

    pub async fn get_user(&self, id: UserId) -> Result<UserProfile> {
        self.inner.read().await.get_user(id)
    }

    pub async fn add_skill_edge(&self, user: UserId, claim: SkillClaim) -> Result<EdgeUpdate> {
        self.inner.write().await.add_skill_edge(user, claim)
    }

    pub async fn create_event(&self, draft: NewEvent) -> Result<Event> {
        self.inner.write().await.create_event(draft).cloned()
    }

    pub async fn register_participant(&self, event: &EventId, user: UserId) -> Result<Event> {
        self.inner
            .write()
            .await
            .register_participant(event, user)
            .cloned()
    }

    pub async fn get_event(&self, id: &EventId) -> Result<Event> {
        self.inner.read().await.get_event(id).cloned()
    }

    pub async fn book_session(&self, request: SessionRequest) -> Result<Session> {
        self.inner.write().await.book_session(request).cloned()
    }

    pub async fn update_status(&self, id: SessionId, status: SessionStatus) -> Result<Session> {
        self.inner.write().await.update_status(id, status).cloned()
    }

    pub async fn trending_skills(&self, limit: usize) -> Vec<TrendingSkill> {
        self.inner.read().await.trending_skills(limit)
    }

    pub async fn trending_recent(&self, window: u64, limit: usize) -> Vec<TrendingSkill> {
        self.inner.read().await.trending_recent(window, limit)
    }

    pub async fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.inner.read().await.leaderboard(limit)
    }

    pub async fn mentor_matches(&self, user: UserId, limit: usize) -> Result<Vec<MentorMatch>> {
        self.inner.read().await.mentor_matches(user, limit)
    }

    pub async fn stats(&self) -> CampusStats {
        self.inner.read().await.stats()
    }

    /// Resets the campus. Test and bootstrap use only.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Clones the whole campus under one read guard.
    pub async fn snapshot(&self) -> Campus {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_registrations_respect_capacity() {
        let handle = CampusHandle::default();
        handle
            .create_event(NewEvent::new("evt", "Workshop", 5))
            .await
            .unwrap();

        let mut users = Vec::new();
        for i in 0..8 {
            let id = handle
                .add_user(NewUser::new(
                    format!("Student {i}"),
                    format!("s{i}@srmap.edu.in"),
                    1,
                    "ECE",
                ))
                .await
                .unwrap();
            users.push(id);
        }

        let tasks: Vec<_> = users
            .into_iter()
            .map(|user| {
                let handle = handle.clone();
                tokio::spawn(async move {
                    handle
                        .register_participant(&EventId::new("evt"), user)
                        .await
                        .is_ok()
                })
            })
            .collect();

        let mut accepted = 0;
        for task in tasks {
            if task.await.unwrap() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 5);
        let event = handle.get_event(&EventId::new("evt")).await.unwrap();
        assert_eq!(event.participants, 5);
        assert_eq!(event.registrants.len(), 5);
    }

    #[tokio::test]
    async fn test_concurrent_writers_get_distinct_ids() {
        let handle = CampusHandle::default();

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let handle = handle.clone();
                tokio::spawn(async move {
                    handle
                        .add_user(NewUser::new(
                            format!("User {i}"),
                            format!("u{i}@srmap.edu.in"),
                            2,
                            "ME",
                        ))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);

        let snapshot = handle.snapshot().await;
        let seqs: Vec<u64> = snapshot.log().entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, (1..=16).collect::<Vec<u64>>());
    }
}
