//! Demo dataset.
//!
//! Seeding goes through the public `Campus` operations, so the demo data is
//! validated and logged exactly like client traffic. Users are added first
//! (so that they receive `u1`, `u2`, ... in table order), then skills, then
//! events and sessions.

use crate::campus::Campus;
use crate::error::Result;
use crate::events::NewEvent;
use crate::ids::{EventId, UserId};
use crate::node::{NewUser, SkillClaim};
use crate::sessions::{SessionRequest, SessionStatus};
use serde::Serialize;
use tracing::info;

/// Skill catalog: (id, name).
pub const SKILL_CATALOG: &[(&str, &str)] = &[
    ("1", "Python"),
    ("2", "Machine Learning"),
    ("3", "Web Development"),
    ("4", "Data Structures"),
    ("5", "UI/UX Design"),
    ("6", "Cloud Computing"),
    ("7", "Rust"),
    ("8", "Public Speaking"),
];

/// (name, email, year, branch)
const STUDENTS: &[(&str, &str, u8, &str)] = &[
    ("Rahul Sharma", "rahul@srmap.edu.in", 3, "CSE"),
    ("Priya Patel", "priya@srmap.edu.in", 2, "CSE"),
    ("Arjun Reddy", "arjun@srmap.edu.in", 4, "ECE"),
    ("Sneha Iyer", "sneha@srmap.edu.in", 1, "CSE"),
    ("Karthik Nair", "karthik@srmap.edu.in", 2, "ME"),
    ("Ananya Gupta", "ananya@srmap.edu.in", 3, "EEE"),
];

/// (student index, skill id, proficiency, teaches)
const CLAIMS: &[(usize, &str, u8, bool)] = &[
    (0, "1", 5, true),
    (0, "2", 4, true),
    (0, "6", 2, false),
    (1, "3", 5, true),
    (1, "5", 4, true),
    (1, "2", 2, false),
    (2, "4", 5, true),
    (2, "7", 3, true),
    (2, "1", 3, false),
    (3, "1", 1, false),
    (3, "2", 1, false),
    (3, "3", 1, false),
    (4, "6", 4, true),
    (4, "7", 1, false),
    (4, "2", 2, false),
    (5, "8", 5, true),
    (5, "5", 3, true),
    (5, "1", 2, false),
];

/// What [`seed_demo`] created.
#[derive(Debug, Clone, Serialize)]
pub struct SeedSummary {
    pub users: Vec<UserId>,
    pub skill_claims: usize,
    pub events: Vec<EventId>,
    pub sessions: usize,
}

fn catalog_name(id: &str) -> &'static str {
    SKILL_CATALOG
        .iter()
        .find(|(skill, _)| *skill == id)
        .map(|(_, name)| *name)
        .unwrap_or_default()
}

fn demo_events() -> Vec<NewEvent> {
    vec![
        NewEvent {
            description: "24-hour build sprint, teams of up to four".into(),
            time: "Saturday 9:00 AM".into(),
            location: "Innovation Lab".into(),
            category: "Hackathon".into(),
            host: "Coding Club".into(),
            tags: vec!["Python".into(), "Web Development".into()],
            ..NewEvent::new("evt_hack", "Campus Hack Night", 40)
        },
        NewEvent {
            description: "Hands-on introduction to model training".into(),
            time: "Friday 3:00 PM".into(),
            location: "Seminar Hall 2".into(),
            category: "Workshop".into(),
            host: "Rahul Sharma".into(),
            participants: 3,
            tags: vec!["Machine Learning".into()],
            ..NewEvent::new("evt_ml", "ML Foundations Workshop", 25)
        },
        NewEvent {
            description: "Five-minute talks on anything you have built".into(),
            time: "Wednesday 5:30 PM".into(),
            location: "Amphitheatre".into(),
            category: "Talk".into(),
            host: "Ananya Gupta".into(),
            tags: vec!["Public Speaking".into()],
            ..NewEvent::new("evt_talks", "Lightning Talks", 12)
        },
    ]
}

/// Populates `campus` with the demo dataset.
///
/// Seeding an empty campus always yields the same ids (`u1` is Rahul).
pub fn seed_demo(campus: &mut Campus) -> Result<SeedSummary> {
    let users = STUDENTS
        .iter()
        .map(|(name, email, year, branch)| {
            campus.add_user(NewUser::new(*name, *email, *year, *branch))
        })
        .collect::<Result<Vec<UserId>>>()?;

    for (student, skill, level, teaches) in CLAIMS {
        let claim = SkillClaim {
            skill_id: (*skill).into(),
            skill_name: catalog_name(skill).to_string(),
            proficiency: *level,
            is_teaching: *teaches,
        };
        campus.add_skill_edge(users[*student], claim)?;
    }

    let mut events = Vec::new();
    for draft in demo_events() {
        events.push(campus.create_event(draft)?.id.clone());
    }
    campus.register_participant(&events[0], users[1])?;
    campus.register_participant(&events[0], users[3])?;
    campus.register_participant(&events[1], users[3])?;

    let python = campus
        .book_session(SessionRequest::new(users[0], "Python basics").at(
            "Monday",
            "10:00 AM",
            "1 hr",
        ))?
        .id;
    campus.update_status(python, SessionStatus::Completed)?;
    campus.book_session(SessionRequest::new(users[1], "Responsive layouts").at(
        "Tuesday",
        "4:00 PM",
        "45 min",
    ))?;
    let dsa = campus
        .book_session(SessionRequest::new(users[2], "Graph algorithms").at(
            "Thursday",
            "6:00 PM",
            "1 hr",
        ))?
        .id;
    campus.update_status(dsa, SessionStatus::Completed)?;

    let summary = SeedSummary {
        users,
        skill_claims: CLAIMS.len(),
        events,
        sessions: campus.sessions().len(),
    };
    info!(
        "Seeded {} users, {} skill claims, {} events, {} sessions",
        summary.users.len(),
        summary.skill_claims,
        summary.events.len(),
        summary.sessions
    );
    Ok(summary)
}

/// Clears `campus` and seeds it again.
pub fn reseed(campus: &mut Campus) -> Result<SeedSummary> {
    campus.clear();
    seed_demo(campus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_deterministic() {
        let mut a = Campus::new();
        let mut b = Campus::new();
        seed_demo(&mut a).unwrap();
        seed_demo(&mut b).unwrap();

        assert_eq!(a.trending_skills(0), b.trending_skills(0));
        assert_eq!(a.leaderboard(0), b.leaderboard(0));
    }

    #[test]
    fn test_u1_is_rahul() {
        let mut campus = Campus::new();
        let summary = seed_demo(&mut campus).unwrap();

        assert_eq!(summary.users[0], UserId::new(1));
        let rahul = campus.get_user(UserId::new(1)).unwrap();
        assert_eq!(rahul.user.name, "Rahul Sharma");
        assert_eq!(rahul.teaching().count(), 2);
    }

    #[test]
    fn test_seed_contents() {
        let mut campus = Campus::new();
        let summary = seed_demo(&mut campus).unwrap();

        assert_eq!(summary.users.len(), STUDENTS.len());
        assert_eq!(campus.graph().skill_count(), SKILL_CATALOG.len());
        assert_eq!(campus.graph().edge_count(), CLAIMS.len());
        assert_eq!(campus.events().len(), 3);
        assert_eq!(
            campus.get_event(&"evt_ml".into()).unwrap().participants,
            4
        );

        // Python: Arjun, Sneha, Ananya. ML: Priya, Sneha, Karthik.
        let trending = campus.trending_skills(2);
        assert_eq!(trending[0].skill_name, "Python");
        assert_eq!(trending[0].score, 3);
        assert_eq!(trending[1].skill_name, "Machine Learning");

        // Rahul: 2 teaching + 1 completed, Arjun: 2 teaching + 1 completed
        let board = campus.leaderboard(2);
        assert_eq!(board[0].user_id, UserId::new(1));
        assert_eq!(board[0].score, 3);
        assert_eq!(board[1].user_id, UserId::new(3));
        assert_eq!(board[1].score, 3);
    }

    #[test]
    fn test_reseed_restarts_ids() {
        let mut campus = Campus::new();
        seed_demo(&mut campus).unwrap();
        let summary = reseed(&mut campus).unwrap();
        assert_eq!(summary.users[0], UserId::new(1));
        assert_eq!(campus.graph().user_count(), STUDENTS.len());
    }
}
