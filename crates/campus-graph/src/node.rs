//! Node payloads and the typed requests that create them.

use crate::edge::EdgeKind;
use crate::error::{CampusError, Result};
use crate::ids::{Proficiency, SkillId, UserId};
use serde::{Deserialize, Serialize};

/// Highest accepted academic year.
pub const MAX_ACADEMIC_YEAR: u8 = 5;

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub year: u8,
    pub branch: String,
}

/// A skill users can teach or learn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

/// A node in the skill graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CampusNode {
    User(User),
    Skill(Skill),
}

impl CampusNode {
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            Self::Skill(_) => None,
        }
    }

    pub fn as_skill(&self) -> Option<&Skill> {
        match self {
            Self::Skill(skill) => Some(skill),
            Self::User(_) => None,
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub year: u8,
    pub branch: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        year: u8,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            year,
            branch: branch.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CampusError::validation("name must not be blank"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(CampusError::validation(format!(
                "invalid email address: {:?}",
                self.email
            )));
        }
        if !(1..=MAX_ACADEMIC_YEAR).contains(&self.year) {
            return Err(CampusError::validation(format!(
                "year must be between 1 and {}, got {}",
                MAX_ACADEMIC_YEAR, self.year
            )));
        }
        if self.branch.trim().is_empty() {
            return Err(CampusError::validation("branch must not be blank"));
        }
        Ok(())
    }

    pub(crate) fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            year: self.year,
            branch: self.branch,
        }
    }
}

/// Add/update-skill payload.
///
/// `proficiency` stays a raw number here so that an out-of-range level is
/// reported as a validation error by the engine rather than a decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillClaim {
    pub skill_id: SkillId,
    #[serde(default)]
    pub skill_name: String,
    pub proficiency: u8,
    pub is_teaching: bool,
}

impl SkillClaim {
    pub fn teaching(skill_id: impl Into<SkillId>, name: impl Into<String>, level: u8) -> Self {
        Self {
            skill_id: skill_id.into(),
            skill_name: name.into(),
            proficiency: level,
            is_teaching: true,
        }
    }

    pub fn learning(skill_id: impl Into<SkillId>, name: impl Into<String>, level: u8) -> Self {
        Self {
            is_teaching: false,
            ..Self::teaching(skill_id, name, level)
        }
    }

    pub fn kind(&self) -> EdgeKind {
        EdgeKind::from_teaching(self.is_teaching)
    }
}

/// One skill association as seen from a user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAssociation {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub kind: EdgeKind,
    pub proficiency: Proficiency,
}

/// A user together with their skill associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub skills: Vec<SkillAssociation>,
}

impl UserProfile {
    pub fn teaching(&self) -> impl Iterator<Item = &SkillAssociation> {
        self.skills.iter().filter(|s| s.kind.is_teaching())
    }

    pub fn learning(&self) -> impl Iterator<Item = &SkillAssociation> {
        self.skills.iter().filter(|s| !s.kind.is_teaching())
    }
}
