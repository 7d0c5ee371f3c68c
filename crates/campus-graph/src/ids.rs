//! Identifier and value types shared across the graph and registries.

use crate::error::{CampusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generates a sequential identifier rendered as `<prefix><n>`.
///
/// Ordering follows `n`, so `u2 < u10`.
macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(u64);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new(n: u64) -> Self {
                Self(n)
            }

            pub fn number(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", Self::PREFIX, self.0)
            }
        }

        impl FromStr for $name {
            type Err = CampusError;

            fn from_str(s: &str) -> Result<Self> {
                s.strip_prefix(Self::PREFIX)
                    .and_then(|n| n.parse::<u64>().ok())
                    .filter(|n| *n > 0)
                    .map(Self)
                    .ok_or_else(|| {
                        CampusError::validation(format!(
                            "malformed {} id: {:?}",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = CampusError;

            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.to_string()
            }
        }
    };
}

sequential_id!(
    /// Engine-assigned user identifier (`u1`, `u2`, ...).
    UserId,
    "u"
);

sequential_id!(
    /// Engine-assigned session identifier (`s1`, `s2`, ...).
    SessionId,
    "s"
);

/// Hands out sequential ids starting at 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    pub fn reset(&mut self) {
        self.last = 0;
    }
}

/// Caller-supplied skill identifier, e.g. `"1"` or `"python"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

/// Caller-supplied event identifier, e.g. `"evt_hack"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub(crate) fn validate(&self) -> Result<()> {
                if self.0.trim().is_empty() {
                    return Err(CampusError::validation(concat!(
                        stringify!($name),
                        " must not be blank"
                    )));
                }
                Ok(())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(SkillId);
string_id!(EventId);

/// Skill proficiency on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Proficiency(u8);

impl Proficiency {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(CampusError::validation(format!(
                "proficiency must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                level
            )))
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Proficiency {
    type Error = CampusError;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

impl From<Proficiency> for u8 {
    fn from(p: Proficiency) -> u8 {
        p.0
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
