//! End-to-end flows through the public campus API.

use campus_graph::seed::{reseed, seed_demo};
use campus_graph::{
    Campus, CampusHandle, ErrorKind, NewEvent, NewUser, SessionRequest, SessionStatus,
    SkillClaim, UserId,
};

fn student(name: &str) -> NewUser {
    NewUser::new(
        name,
        format!("{}@srmap.edu.in", name.to_lowercase().replace(' ', ".")),
        1,
        "CSE",
    )
}

fn seeded() -> Campus {
    let mut campus = Campus::new();
    seed_demo(&mut campus).unwrap();
    campus
}

fn score_of(campus: &Campus, user: UserId) -> usize {
    campus
        .leaderboard(0)
        .into_iter()
        .find(|e| e.user_id == user)
        .map(|e| e.score)
        .unwrap()
}

#[test]
fn user_registration_flow() {
    let mut campus = seeded();

    let user = campus
        .add_user(NewUser::new(
            "Integration Test User",
            "test@srmap.edu.in",
            1,
            "CSE",
        ))
        .unwrap();

    let profile = campus.get_user(user).unwrap();
    assert_eq!(profile.user.name, "Integration Test User");
    assert_eq!(profile.user.email, "test@srmap.edu.in");
    assert!(profile.skills.is_empty());

    campus
        .add_skill_edge(user, SkillClaim::teaching("1", "Python", 5))
        .unwrap();
    let profile = campus.get_user(user).unwrap();
    assert_eq!(profile.skills.len(), 1);
    assert_eq!(profile.skills[0].skill_name, "Python");
}

#[test]
fn fresh_ids_are_never_reused() {
    let mut campus = seeded();
    let issued: Vec<UserId> = campus.graph().users().map(|u| u.id).collect();

    for i in 0..5 {
        let id = campus.add_user(student(&format!("New {i}"))).unwrap();
        assert!(!issued.contains(&id));
        assert_eq!(campus.get_user(id).unwrap().user.name, format!("New {i}"));
    }
}

#[test]
fn event_flow() {
    let mut campus = seeded();

    let draft: NewEvent = serde_json::from_value(serde_json::json!({
        "id": "evt_test",
        "title": "Test Event",
        "description": "Integration Test",
        "time": "Tomorrow",
        "location": "Lab",
        "type": "Hackathon",
        "participants": 0,
        "max_participants": 10,
        "host": "Tester",
        "tags": ["Test"]
    }))
    .unwrap();
    campus.create_event(draft).unwrap();

    campus
        .register_participant(&"evt_test".into(), UserId::new(1))
        .unwrap();
    assert_eq!(
        campus.get_event(&"evt_test".into()).unwrap().participants,
        1
    );
}

#[test]
fn capacity_is_enforced_exactly() {
    let mut campus = Campus::new();
    let max = 4;
    campus
        .create_event(NewEvent::new("evt_small", "Small Room", max))
        .unwrap();

    let users: Vec<UserId> = (0..=max)
        .map(|i| campus.add_user(student(&format!("Student {i}"))).unwrap())
        .collect();

    for (k, user) in users.iter().take(max as usize).enumerate() {
        let event = campus
            .register_participant(&"evt_small".into(), *user)
            .unwrap();
        assert_eq!(event.participants as usize, k + 1);
    }

    let err = campus
        .register_participant(&"evt_small".into(), users[max as usize])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capacity);
    assert_eq!(
        campus.get_event(&"evt_small".into()).unwrap().participants,
        max
    );
}

#[test]
fn session_flow() {
    let mut campus = seeded();

    let session = campus
        .book_session(SessionRequest::new(UserId::new(1), "Python Help").at(
            "Tomorrow",
            "10:00 AM",
            "1 hr",
        ))
        .unwrap()
        .id;
    assert_eq!(
        campus.get_session(session).unwrap().status,
        SessionStatus::Scheduled
    );

    let status: SessionStatus = "Completed".parse().unwrap();
    let updated = campus.update_status(session, status).unwrap();
    assert_eq!(updated.status.to_string(), "Completed");

    let err = campus
        .update_status(session, SessionStatus::Cancelled)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
}

#[test]
fn analytics_are_stable_reads() {
    let campus = seeded();
    let log_len = campus.log().len();

    let trending = campus.trending_skills(0);
    assert!(!trending.is_empty());
    for pair in trending.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].skill_id < pair[1].skill_id)
        );
    }
    assert_eq!(campus.trending_skills(0), trending);

    let board = campus.leaderboard(0);
    assert_eq!(campus.leaderboard(0), board);
    assert_eq!(campus.log().len(), log_len);
}

#[test]
fn idle_users_rank_last_with_zero() {
    let mut campus = seeded();
    let idle = campus.add_user(student("Idle Student")).unwrap();

    let board = campus.leaderboard(0);
    let position = board.iter().position(|e| e.user_id == idle).unwrap();
    assert_eq!(board[position].score, 0);
    assert!(board[..position].iter().all(|e| e.score >= 1 || e.user_id < idle));
    assert!(board[position..].iter().all(|e| e.score == 0));
}

#[test]
fn end_to_end_python_mentoring() {
    let mut campus = Campus::new();
    let a = campus.add_user(student("Alice")).unwrap();
    let b = campus.add_user(student("Bob")).unwrap();

    campus
        .add_skill_edge(a, SkillClaim::teaching("1", "Python", 5))
        .unwrap();
    campus
        .add_skill_edge(b, SkillClaim::learning("1", "Python", 1))
        .unwrap();

    let trending = campus.trending_skills(10);
    let python = trending
        .iter()
        .find(|t| t.skill_name == "Python")
        .unwrap();
    assert!(python.score >= 1);

    let before = score_of(&campus, a);
    let session = campus
        .book_session(SessionRequest::new(a, "Python Help"))
        .unwrap()
        .id;
    campus
        .update_status(session, SessionStatus::Completed)
        .unwrap();
    assert_eq!(score_of(&campus, a), before + 1);

    let matches = campus.mentor_matches(b, 0).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].mentor_id, a);
}

#[test]
fn reset_and_reseed() {
    let mut campus = seeded();
    campus.add_user(student("Extra")).unwrap();

    let summary = reseed(&mut campus).unwrap();
    assert_eq!(summary.users.first(), Some(&UserId::new(1)));
    assert_eq!(campus.graph().user_count(), summary.users.len());
    assert!(campus.get_event(&"evt_test".into()).is_err());
}

#[tokio::test]
async fn shared_handle_flow() {
    let mut campus = Campus::new();
    seed_demo(&mut campus).unwrap();
    let handle = CampusHandle::new(campus);

    let user = handle.add_user(student("Handle User")).await.unwrap();
    handle
        .add_skill_edge(user, SkillClaim::learning("7", "Rust", 1))
        .await
        .unwrap();

    let matches = handle.mentor_matches(user, 0).await.unwrap();
    assert_eq!(matches[0].mentor_id, UserId::new(3));

    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.trending_skills(0), handle.trending_skills(0).await);
}
