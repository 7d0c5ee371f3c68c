//! Derived rankings over the campus graph.
//!
//! Everything here is a pure read. Results are recomputed on each call and
//! ordered deterministically: score descending, then id ascending.

use crate::campus::Campus;
use crate::edge::EdgeKind;
use crate::error::{CampusError, EntityKind, Result};
use crate::ids::{Proficiency, SkillId, UserId};
use crate::log::Interaction;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A skill ranked by demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingSkill {
    pub skill_id: SkillId,
    pub skill_name: String,
    /// Number of users wanting to learn the skill.
    pub score: usize,
}

/// A user ranked by contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub name: String,
    /// `teaching + completed_sessions`.
    pub score: usize,
    /// Number of skills the user offers to teach.
    pub teaching: usize,
    /// Number of sessions the user mentored to completion.
    pub completed_sessions: usize,
}

/// A potential mentor for one of a learner's wanted skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorMatch {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub mentor_id: UserId,
    pub mentor_name: String,
    pub proficiency: Proficiency,
}

/// Truncates to `limit` entries; 0 means unlimited.
fn apply_limit<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if limit > 0 {
        items.truncate(limit);
    }
    items
}

fn sort_trending(skills: &mut [TrendingSkill]) {
    skills.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.skill_id.cmp(&b.skill_id))
    });
}

impl Campus {
    /// Ranks skills by the number of "wants to learn" edges.
    ///
    /// Skills nobody wants to learn are left out.
    pub fn trending_skills(&self, limit: usize) -> Vec<TrendingSkill> {
        let graph = self.graph();

        let mut trending: Vec<TrendingSkill> = graph
            .skill_entries()
            .map(|(index, skill)| TrendingSkill {
                skill_id: skill.id.clone(),
                skill_name: skill.name.clone(),
                score: graph.degree(index, Direction::Incoming, EdgeKind::WantsToLearn),
            })
            .filter(|t| t.score > 0)
            .collect();

        sort_trending(&mut trending);
        debug!("Trending: {} skills with demand", trending.len());
        apply_limit(trending, limit)
    }

    /// Like [`Campus::trending_skills`], but only counts learning claims made
    /// within the last `window` log entries. A window of 0 counts everything.
    ///
    /// A claim that was updated several times inside the window counts once.
    pub fn trending_recent(&self, window: u64, limit: usize) -> Vec<TrendingSkill> {
        if window == 0 {
            return self.trending_skills(limit);
        }

        let log = self.log();
        let cutoff = log.last_seq().saturating_sub(window);

        let claims: BTreeSet<(&SkillId, UserId)> = log
            .since(cutoff)
            .iter()
            .filter_map(|entry| match &entry.interaction {
                Interaction::SkillClaimed {
                    user,
                    skill,
                    kind: EdgeKind::WantsToLearn,
                    ..
                } => Some((skill, *user)),
                _ => None,
            })
            .collect();

        let mut demand: BTreeMap<&SkillId, usize> = BTreeMap::new();
        for (skill, _) in claims {
            *demand.entry(skill).or_insert(0) += 1;
        }

        let mut trending: Vec<TrendingSkill> = demand
            .into_iter()
            .filter_map(|(id, score)| {
                let skill = self.graph().skill(id)?;
                Some(TrendingSkill {
                    skill_id: skill.id.clone(),
                    skill_name: skill.name.clone(),
                    score,
                })
            })
            .collect();

        sort_trending(&mut trending);
        debug!(
            "Trending in last {} entries: {} skills",
            window,
            trending.len()
        );
        apply_limit(trending, limit)
    }

    /// Ranks every user by teaching edges plus completed mentored sessions.
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let graph = self.graph();
        let completed = self.sessions().completed_by_mentor();

        let mut board: Vec<LeaderboardEntry> = graph
            .user_entries()
            .map(|(index, user)| {
                let teaching = graph.degree(index, Direction::Outgoing, EdgeKind::Teaches);
                let completed_sessions = completed.get(&user.id).copied().unwrap_or(0);
                LeaderboardEntry {
                    user_id: user.id,
                    name: user.name.clone(),
                    score: teaching + completed_sessions,
                    teaching,
                    completed_sessions,
                }
            })
            .collect();

        board.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        debug!("Leaderboard over {} users", board.len());
        apply_limit(board, limit)
    }

    /// Finds other users who teach the skills `user` wants to learn.
    ///
    /// Ordered by proficiency descending, then mentor id, then skill id.
    pub fn mentor_matches(&self, user: UserId, limit: usize) -> Result<Vec<MentorMatch>> {
        let graph = self.graph();
        if !graph.contains_user(user) {
            return Err(CampusError::not_found(EntityKind::User, user));
        }

        let mut matches: Vec<MentorMatch> = graph
            .skills_of(user)
            .into_iter()
            .filter(|assoc| assoc.kind == EdgeKind::WantsToLearn)
            .flat_map(|assoc| {
                graph
                    .teachers_of(&assoc.skill_id)
                    .into_iter()
                    .filter(|(mentor, _)| mentor.id != user)
                    .map(|(mentor, proficiency)| MentorMatch {
                        skill_id: assoc.skill_id.clone(),
                        skill_name: assoc.skill_name.clone(),
                        mentor_id: mentor.id,
                        mentor_name: mentor.name.clone(),
                        proficiency,
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        matches.sort_by(|a, b| {
            b.proficiency
                .cmp(&a.proficiency)
                .then_with(|| a.mentor_id.cmp(&b.mentor_id))
                .then_with(|| a.skill_id.cmp(&b.skill_id))
        });

        Ok(apply_limit(matches, limit))
    }
}
