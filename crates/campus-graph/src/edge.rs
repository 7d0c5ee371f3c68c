//! Edge types for the skill graph.
//!
//! Every edge runs from a user to a skill. A user can hold at most one edge
//! of each kind per skill.

use crate::ids::{Proficiency, SkillId, UserId};
use serde::{Deserialize, Serialize};

/// The relationship between a user and a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// The user offers to teach the skill.
    Teaches,

    /// The user wants to learn the skill.
    WantsToLearn,
}

impl EdgeKind {
    /// Maps the `is_teaching` flag of a skill claim to an edge kind.
    pub fn from_teaching(is_teaching: bool) -> Self {
        if is_teaching {
            Self::Teaches
        } else {
            Self::WantsToLearn
        }
    }

    pub fn is_teaching(&self) -> bool {
        matches!(self, Self::Teaches)
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Teaches => "teaches",
            Self::WantsToLearn => "wants_to_learn",
        };
        write!(f, "{}", s)
    }
}

/// An edge in the skill graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEdge {
    /// The kind of relationship.
    pub kind: EdgeKind,

    /// Self-assessed level for the skill.
    pub proficiency: Proficiency,
}

impl SkillEdge {
    pub fn new(kind: EdgeKind, proficiency: Proficiency) -> Self {
        Self { kind, proficiency }
    }
}

/// A flattened edge for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub user: UserId,
    pub skill: SkillId,
    pub kind: EdgeKind,
    pub proficiency: Proficiency,
}

/// Whether `add_skill_edge` created a new edge or replaced the proficiency
/// of an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeUpdate {
    Inserted {
        proficiency: Proficiency,
    },
    Updated {
        previous: Proficiency,
        proficiency: Proficiency,
    },
}

impl EdgeUpdate {
    /// The proficiency the edge carries after the update.
    pub fn proficiency(&self) -> Proficiency {
        match self {
            Self::Inserted { proficiency } | Self::Updated { proficiency, .. } => *proficiency,
        }
    }
}
