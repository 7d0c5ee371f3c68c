//! CLI command implementations.

use campus_graph::seed::{reseed, SKILL_CATALOG};
use campus_graph::{
    Campus, CampusConfig, CampusHandle, EdgeKind, EventId, GraphEdge, LogEntry, SnapshotStore,
    UserId,
};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Loads the saved campus, seeding and saving a demo one if the store is
/// empty.
fn load_or_seed(config: &CampusConfig) -> Result<Campus> {
    let store = SnapshotStore::open(&config.store_path)?;
    if let Some(campus) = store.load()? {
        debug!("Loaded snapshot from {}", config.store_path.display());
        return Ok(campus);
    }

    println!(
        "{} No snapshot in {}, seeding demo data",
        "⚠".yellow(),
        config.store_path.display()
    );
    let mut campus = Campus::new();
    reseed(&mut campus)?;
    store.save(&campus)?;
    Ok(campus)
}

/// Reset the store and load the demo dataset.
pub fn seed(config: &CampusConfig) -> Result<()> {
    let store = SnapshotStore::open(&config.store_path)?;

    let mut campus = Campus::new();
    let summary = reseed(&mut campus)?;
    store.save(&campus)?;

    println!(
        "{} Seeded {} users, {} skills, {} events and {} sessions",
        "✓".green(),
        summary.users.len().to_string().cyan(),
        SKILL_CATALOG.len().to_string().cyan(),
        summary.events.len().to_string().cyan(),
        summary.sessions.to_string().cyan()
    );
    println!("  Saved to {}", config.store_path.display());

    Ok(())
}

/// Show graph and registry statistics.
pub fn status(config: &CampusConfig) -> Result<()> {
    let campus = load_or_seed(config)?;
    let stats = campus.stats();

    println!("{}", "Campus status".cyan().bold());
    println!("  Users:       {}", stats.graph.users);
    println!("  Skills:      {}", stats.graph.skills);
    println!("  Skill edges: {}", stats.graph.edge_count);
    println!("  Events:      {}", stats.events);
    println!("  Sessions:    {}", stats.sessions);
    println!("  Log entries: {}", stats.log_entries);

    if let Some(last) = campus.log().entries().last() {
        println!(
            "  Last change: {} {} {}",
            last.interaction.kind().yellow(),
            last.interaction.entity_id(),
            format!("(#{} at {})", last.seq, last.recorded_at.to_rfc3339()).dimmed()
        );
    }

    Ok(())
}

/// Rank skills by demand.
pub async fn trending(config: &CampusConfig, json: bool) -> Result<()> {
    let handle = CampusHandle::new(load_or_seed(config)?);
    let skills = handle
        .trending_recent(config.recent_window, config.trending_limit)
        .await;

    if json {
        let out = serde_json::json!({ "trending_skills": skills });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if skills.is_empty() {
        println!("No skill demand recorded yet");
        return Ok(());
    }

    if config.recent_window > 0 {
        println!(
            "Trending skills (last {} changes):\n",
            config.recent_window
        );
    } else {
        println!("Trending skills:\n");
    }
    for (rank, skill) in skills.iter().enumerate() {
        println!(
            "  {:>2}. {} {} {}",
            rank + 1,
            skill.skill_name.cyan(),
            format!("({})", skill.skill_id).dimmed(),
            format!("{} learners", skill.score).yellow()
        );
    }

    Ok(())
}

/// Rank students by contribution.
pub async fn leaderboard(config: &CampusConfig, json: bool) -> Result<()> {
    let handle = CampusHandle::new(load_or_seed(config)?);
    let board = handle.leaderboard(config.leaderboard_limit).await;

    if json {
        let out = serde_json::json!({ "leaderboard": board });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Leaderboard:\n");
    for (rank, entry) in board.iter().enumerate() {
        println!(
            "  {:>2}. {} {} {} {}",
            rank + 1,
            entry.name.cyan(),
            format!("({})", entry.user_id).dimmed(),
            entry.score.to_string().green().bold(),
            format!(
                "[{} taught, {} sessions]",
                entry.teaching, entry.completed_sessions
            )
            .dimmed()
        );
    }

    Ok(())
}

/// Show a student's profile.
pub fn user(config: &CampusConfig, id: &str) -> Result<()> {
    let campus = load_or_seed(config)?;
    let id: UserId = id.parse()?;
    let profile = campus.get_user(id)?;

    println!(
        "{} {}",
        profile.user.name.cyan().bold(),
        format!("({})", profile.user.id).dimmed()
    );
    println!("  {}", profile.user.email);
    println!("  Year {} · {}", profile.user.year, profile.user.branch);

    if profile.skills.is_empty() {
        println!("\n  No skills yet");
    }
    for skill in &profile.skills {
        let label = match skill.kind {
            EdgeKind::Teaches => "teaches".green(),
            EdgeKind::WantsToLearn => "learning".yellow(),
        };
        println!(
            "  {:>8} {} {}",
            label,
            skill.skill_name,
            format!("(level {})", skill.proficiency).dimmed()
        );
    }

    let sessions = campus.sessions_for_mentor(id);
    if !sessions.is_empty() {
        println!("\n  Mentoring sessions:");
        for session in sessions {
            println!(
                "    {} {} {}",
                session.id.to_string().dimmed(),
                session.topic,
                session.status.to_string().yellow()
            );
        }
    }

    Ok(())
}

/// Show an event.
pub fn event(config: &CampusConfig, id: &str) -> Result<()> {
    let campus = load_or_seed(config)?;
    let event = campus.get_event(&EventId::new(id))?;

    println!(
        "{} {}",
        event.title.cyan().bold(),
        format!("({})", event.id).dimmed()
    );
    if !event.description.is_empty() {
        println!("  {}", event.description);
    }
    println!(
        "  {} · {} · {}",
        event.category, event.time, event.location
    );
    println!("  Hosted by {}", event.host);

    let seats = format!("{}/{}", event.participants, event.max_participants);
    let seats = if event.is_full() {
        seats.red()
    } else {
        seats.green()
    };
    println!("  Participants: {}", seats);

    if !event.tags.is_empty() {
        println!("  Tags: {}", event.tags.join(", ").dimmed());
    }

    Ok(())
}

/// Suggest mentors for a student.
pub fn mentors(config: &CampusConfig, id: &str, limit: usize) -> Result<()> {
    let campus = load_or_seed(config)?;
    let id: UserId = id.parse()?;
    let matches = campus.mentor_matches(id, limit)?;

    if matches.is_empty() {
        println!("No mentors found for {}", id);
        return Ok(());
    }

    println!("Found {} mentor matches:\n", matches.len());
    for m in matches {
        println!(
            "  {} {} {} {}",
            m.skill_name.yellow(),
            m.mentor_name.cyan(),
            format!("({})", m.mentor_id).dimmed(),
            format!("level {}", m.proficiency).green()
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct Export<'a> {
    version: &'static str,
    users: Vec<campus_graph::UserProfile>,
    edges: Vec<GraphEdge>,
    events: Vec<&'a campus_graph::Event>,
    sessions: Vec<&'a campus_graph::Session>,
    log: &'a [LogEntry],
}

/// Export the snapshot to JSON.
pub fn export(config: &CampusConfig, output: &Path) -> Result<()> {
    let campus = load_or_seed(config)?;

    let users = campus
        .graph()
        .users()
        .map(|u| campus.get_user(u.id))
        .collect::<campus_graph::Result<Vec<_>>>()?;

    let export = Export {
        version: env!("CARGO_PKG_VERSION"),
        users,
        edges: campus.graph().export_edges(),
        events: campus.list_events(),
        sessions: campus.sessions().iter().collect(),
        log: campus.log().entries(),
    };

    fs::write(output, serde_json::to_string_pretty(&export)?)?;
    println!("{} Exported to {}", "✓".green(), output.display());

    Ok(())
}

/// Remove the saved snapshot.
pub fn reset(config: &CampusConfig) -> Result<()> {
    let store = SnapshotStore::open(&config.store_path)?;
    store.clear()?;
    println!("{} Cleared {}", "✓".green(), config.store_path.display());
    Ok(())
}
