use crate::campus::Campus;
use crate::error::StoreError;
use crate::handle::CampusHandle;
use sled::Db;
use std::path::Path;
use tracing::debug;

/// Key the campus snapshot is stored under.
const SNAPSHOT_KEY: &str = "campus_snapshot";

/// Saves and loads whole-campus snapshots.
///
/// Graph, registries, log and id counters are encoded together, so a loaded
/// snapshot is exactly the campus that was saved.
pub struct SnapshotStore {
    db: Db,
}

impl SnapshotStore {
    /// Opens or creates a snapshot store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Saves the campus, replacing any previous snapshot.
    pub fn save(&self, campus: &Campus) -> Result<(), StoreError> {
        let bytes = bincode::serialize(campus)?;
        debug!("Saving snapshot ({} bytes)", bytes.len());
        self.db.insert(SNAPSHOT_KEY, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    /// Saves a shared campus while holding its read lock, so no writer can
    /// interleave with the snapshot.
    pub async fn save_shared(&self, handle: &CampusHandle) -> Result<(), StoreError> {
        let shared = handle.shared();
        let campus = shared.read().await;
        self.save(&campus)
    }

    /// Loads the saved campus, if any.
    pub fn load(&self) -> Result<Option<Campus>, StoreError> {
        if let Some(bytes) = self.db.get(SNAPSHOT_KEY)? {
            let campus: Campus = bincode::deserialize(&bytes)?;
            Ok(Some(campus))
        } else {
            Ok(None)
        }
    }

    /// Clears the stored snapshot.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.db.remove(SNAPSHOT_KEY)?;
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NewEvent;
    use crate::node::{NewUser, SkillClaim};
    use crate::sessions::{SessionRequest, SessionStatus};
    use tempfile::tempdir;

    #[test]
    fn test_save_load_empty() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();

        assert!(store.load().unwrap().is_none());
        store.save(&Campus::new()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.stats().graph.node_count, 0);
    }

    #[test]
    fn test_round_trip_keeps_counters() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();

        let mut campus = Campus::new();
        let user = campus
            .add_user(NewUser::new("Rahul", "rahul@srmap.edu.in", 3, "CSE"))
            .unwrap();
        campus
            .add_skill_edge(user, SkillClaim::teaching("1", "Python", 5))
            .unwrap();
        campus.create_event(NewEvent::new("evt", "Meetup", 3)).unwrap();
        campus.register_participant(&"evt".into(), user).unwrap();
        let session = campus
            .book_session(SessionRequest::new(user, "Python Help"))
            .unwrap()
            .id;
        campus
            .update_status(session, SessionStatus::Completed)
            .unwrap();

        store.save(&campus).unwrap();
        let mut loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.log().len(), campus.log().len());
        assert_eq!(loaded.leaderboard(0), campus.leaderboard(0));
        assert_eq!(loaded.get_event(&"evt".into()).unwrap().participants, 1);

        // ids continue where the saved campus left off
        let next = loaded
            .add_user(NewUser::new("Priya", "priya@srmap.edu.in", 1, "ECE"))
            .unwrap();
        assert_eq!(next.to_string(), "u2");
    }

    #[tokio::test]
    async fn test_save_shared() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();

        let handle = CampusHandle::default();
        handle
            .add_user(NewUser::new("Priya", "priya@srmap.edu.in", 2, "CSE"))
            .await
            .unwrap();
        store.save_shared(&handle).await.unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.graph().user_count(), 1);
        assert_eq!(loaded.log().len(), 1);
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();
        store.save(&Campus::new()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
