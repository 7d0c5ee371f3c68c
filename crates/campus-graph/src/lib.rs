//! Campus Graph - skill-exchange domain model and analytics
//!
//! This crate holds the in-memory model of a campus mentorship platform:
//! students and skills as a graph, event and session registries layered on
//! top, and an append-only interaction log. Trending skills and the
//! contribution leaderboard are computed from that state on demand.
//!
//! # Architecture
//!
//! - [`SkillGraph`] wraps petgraph; users and skills are nodes, "teaches" and
//!   "wants to learn" are edges.
//! - [`EventRegistry`] and [`SessionRegistry`] reference users by id.
//! - [`InteractionLog`] records every successful mutation in order.
//! - [`Campus`] owns all of the above and is the only way to mutate them.
//! - [`CampusHandle`] shares a campus between tasks behind a tokio `RwLock`.
//!
//! # Example
//!
//! ```no_run
//! use campus_graph::{Campus, NewUser, SkillClaim};
//!
//! let mut campus = Campus::new();
//!
//! let rahul = campus.add_user(NewUser::new("Rahul", "rahul@srmap.edu.in", 3, "CSE"))?;
//! campus.add_skill_edge(rahul, SkillClaim::teaching("1", "Python", 5))?;
//!
//! let board = campus.leaderboard(10);
//! # Ok::<(), campus_graph::CampusError>(())
//! ```

mod analytics;
mod campus;
mod config;
mod edge;
mod error;
mod events;
mod graph;
mod handle;
mod ids;
mod log;
mod node;
pub mod seed;
mod sessions;
mod store;

pub use analytics::{LeaderboardEntry, MentorMatch, TrendingSkill};
pub use campus::{Campus, CampusStats};
pub use config::CampusConfig;
pub use edge::{EdgeKind, EdgeUpdate, GraphEdge, SkillEdge};
pub use error::{CampusError, EntityKind, ErrorKind, Result, StoreError};
pub use events::{Event, EventRegistry, NewEvent};
pub use graph::{GraphStats, NodeId, SkillGraph};
pub use handle::{CampusHandle, SharedCampus};
pub use ids::{EventId, Proficiency, SessionId, SkillId, UserId};
pub use log::{Interaction, InteractionLog, LogEntry};
pub use node::{CampusNode, NewUser, Skill, SkillAssociation, SkillClaim, User, UserProfile};
pub use sessions::{Session, SessionRegistry, SessionRequest, SessionStatus};
pub use store::SnapshotStore;
