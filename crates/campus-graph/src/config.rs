//! Runtime configuration.

use std::path::PathBuf;

/// Defaults for analytics queries and the snapshot store location.
#[derive(Debug, Clone)]
pub struct CampusConfig {
    /// Directory of the sled database holding the snapshot.
    pub store_path: PathBuf,
    /// Number of trending skills returned (0 = all).
    pub trending_limit: usize,
    /// Number of leaderboard entries returned (0 = all).
    pub leaderboard_limit: usize,
    /// Log entries considered by recent trending (0 = whole history).
    pub recent_window: u64,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".campus"),
            trending_limit: 10,
            leaderboard_limit: 10,
            recent_window: 0,
        }
    }
}
