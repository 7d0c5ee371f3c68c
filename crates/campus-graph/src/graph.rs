//! Core graph data structure.
//!
//! `SkillGraph` wraps petgraph and adds id indexes for fast lookups. Users
//! and skills are nodes; "teaches" and "wants to learn" are user → skill
//! edges carrying a proficiency.

use crate::edge::{EdgeKind, EdgeUpdate, GraphEdge, SkillEdge};
use crate::error::{CampusError, EntityKind, Result};
use crate::ids::{IdSequence, Proficiency, SkillId, UserId};
use crate::node::{CampusNode, NewUser, Skill, SkillAssociation, SkillClaim, User, UserProfile};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Index of a node in the graph.
pub type NodeId = NodeIndex;

/// The user/skill relationship graph.
///
/// The indexes are ordered maps so that iteration over users and skills is
/// deterministic (by id).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillGraph {
    /// The underlying petgraph graph.
    pub(crate) graph: DiGraph<CampusNode, SkillEdge>,

    /// Maps user ids to graph node indexes.
    user_index: BTreeMap<UserId, NodeId>,

    /// Maps skill ids to graph node indexes.
    skill_index: BTreeMap<SkillId, NodeId>,

    user_ids: IdSequence,
}

impl SkillGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user and returns their freshly assigned id.
    pub fn add_user(&mut self, profile: NewUser) -> Result<UserId> {
        profile.validate()?;

        let id = UserId::new(self.user_ids.next());
        let index = self.graph.add_node(CampusNode::User(profile.into_user(id)));
        self.user_index.insert(id, index);

        Ok(id)
    }

    /// Gets a user node.
    pub fn user(&self, id: UserId) -> Option<&User> {
        let index = self.user_index.get(&id)?;
        self.graph.node_weight(*index)?.as_user()
    }

    pub fn contains_user(&self, id: UserId) -> bool {
        self.user_index.contains_key(&id)
    }

    /// Gets a user together with their skill associations.
    pub fn get_user(&self, id: UserId) -> Result<UserProfile> {
        let user = self
            .user(id)
            .ok_or_else(|| CampusError::not_found(EntityKind::User, id))?;

        Ok(UserProfile {
            user: user.clone(),
            skills: self.skills_of(id),
        })
    }

    /// Gets a skill node.
    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        let index = self.skill_index.get(id)?;
        self.graph.node_weight(*index)?.as_skill()
    }

    pub fn get_skill(&self, id: &SkillId) -> Result<&Skill> {
        self.skill(id)
            .ok_or_else(|| CampusError::not_found(EntityKind::Skill, id))
    }

    /// Adds or updates a user → skill edge.
    ///
    /// The skill node is created on first reference. A second claim for the
    /// same (user, skill, kind) replaces the proficiency instead of adding a
    /// parallel edge.
    pub fn add_skill_edge(&mut self, user: UserId, claim: &SkillClaim) -> Result<EdgeUpdate> {
        let user_idx = *self
            .user_index
            .get(&user)
            .ok_or_else(|| CampusError::not_found(EntityKind::User, user))?;
        claim.skill_id.validate()?;
        let proficiency = Proficiency::new(claim.proficiency)?;

        let skill_idx = match self.skill_index.get(&claim.skill_id) {
            Some(index) => *index,
            None => {
                if claim.skill_name.trim().is_empty() {
                    return Err(CampusError::validation(format!(
                        "skill {} is new and needs a name",
                        claim.skill_id
                    )));
                }
                self.insert_skill(claim.skill_id.clone(), claim.skill_name.clone())
            }
        };

        let kind = claim.kind();
        let existing = self
            .graph
            .edges_connecting(user_idx, skill_idx)
            .find(|edge_ref| edge_ref.weight().kind == kind)
            .map(|edge_ref| edge_ref.id());

        match existing.and_then(|edge| self.graph.edge_weight_mut(edge)) {
            Some(edge) => {
                let previous = edge.proficiency;
                edge.proficiency = proficiency;
                debug!(
                    "Updated {} {} {} ({} -> {})",
                    user, kind, claim.skill_id, previous, proficiency
                );
                Ok(EdgeUpdate::Updated {
                    previous,
                    proficiency,
                })
            }
            None => {
                self.graph
                    .add_edge(user_idx, skill_idx, SkillEdge::new(kind, proficiency));
                debug!("Added {} {} {}", user, kind, claim.skill_id);
                Ok(EdgeUpdate::Inserted { proficiency })
            }
        }
    }

    fn insert_skill(&mut self, id: SkillId, name: String) -> NodeId {
        let index = self.graph.add_node(CampusNode::Skill(Skill {
            id: id.clone(),
            name,
        }));
        self.skill_index.insert(id, index);
        index
    }

    /// Returns all skill associations of a user, ordered by skill id then kind.
    pub fn skills_of(&self, user: UserId) -> Vec<SkillAssociation> {
        let Some(&index) = self.user_index.get(&user) else {
            return Vec::new();
        };

        let mut skills: Vec<SkillAssociation> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .filter_map(|edge_ref| {
                let skill = self.graph.node_weight(edge_ref.target())?.as_skill()?;
                let edge = edge_ref.weight();
                Some(SkillAssociation {
                    skill_id: skill.id.clone(),
                    skill_name: skill.name.clone(),
                    kind: edge.kind,
                    proficiency: edge.proficiency,
                })
            })
            .collect();

        skills.sort_by(|a, b| a.skill_id.cmp(&b.skill_id).then(a.kind.cmp(&b.kind)));
        skills
    }

    /// Users holding an edge of `kind` into the skill, ordered by user id.
    pub fn users_with(&self, skill: &SkillId, kind: EdgeKind) -> Vec<(&User, Proficiency)> {
        let Some(&index) = self.skill_index.get(skill) else {
            return Vec::new();
        };

        let mut users: Vec<(&User, Proficiency)> = self
            .graph
            .edges_directed(index, Direction::Incoming)
            .filter(|edge_ref| edge_ref.weight().kind == kind)
            .filter_map(|edge_ref| {
                let user = self.graph.node_weight(edge_ref.source())?.as_user()?;
                Some((user, edge_ref.weight().proficiency))
            })
            .collect();

        users.sort_by_key(|(user, _)| user.id);
        users
    }

    /// Users offering to teach the skill.
    pub fn teachers_of(&self, skill: &SkillId) -> Vec<(&User, Proficiency)> {
        self.users_with(skill, EdgeKind::Teaches)
    }

    /// Users wanting to learn the skill.
    pub fn learners_of(&self, skill: &SkillId) -> Vec<(&User, Proficiency)> {
        self.users_with(skill, EdgeKind::WantsToLearn)
    }

    /// Counts the edges of `kind` attached to a node.
    pub(crate) fn degree(&self, index: NodeId, direction: Direction, kind: EdgeKind) -> usize {
        self.graph
            .edges_directed(index, direction)
            .filter(|edge_ref| edge_ref.weight().kind == kind)
            .count()
    }

    /// Iterates over users with their node indexes, ordered by id.
    pub(crate) fn user_entries(&self) -> impl Iterator<Item = (NodeId, &User)> + '_ {
        self.user_index.values().filter_map(|&index| {
            let user = self.graph.node_weight(index)?.as_user()?;
            Some((index, user))
        })
    }

    /// Iterates over skills with their node indexes, ordered by id.
    pub(crate) fn skill_entries(&self) -> impl Iterator<Item = (NodeId, &Skill)> + '_ {
        self.skill_index.values().filter_map(|&index| {
            let skill = self.graph.node_weight(index)?.as_skill()?;
            Some((index, skill))
        })
    }

    /// Iterates over all users, ordered by id.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.user_entries().map(|(_, user)| user)
    }

    /// Iterates over all skills, ordered by id.
    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skill_entries().map(|(_, skill)| skill)
    }

    pub fn user_count(&self) -> usize {
        self.user_index.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skill_index.len()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns all edges with user and skill ids for export.
    pub fn export_edges(&self) -> Vec<GraphEdge> {
        self.graph
            .edge_references()
            .filter_map(|edge_ref| {
                let user = self.graph.node_weight(edge_ref.source())?.as_user()?;
                let skill = self.graph.node_weight(edge_ref.target())?.as_skill()?;
                let weight = edge_ref.weight();
                Some(GraphEdge {
                    user: user.id,
                    skill: skill.id.clone(),
                    kind: weight.kind,
                    proficiency: weight.proficiency,
                })
            })
            .collect()
    }

    /// Resets the graph to empty. User ids restart at `u1`.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.user_index.clear();
        self.skill_index.clear();
        self.user_ids.reset();
    }
}

/// Graph statistics for status output.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub users: usize,
    pub skills: usize,
}

impl SkillGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            users: self.user_count(),
            skills: self.skill_count(),
        }
    }
}
