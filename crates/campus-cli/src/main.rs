//! Campus CLI - Command-line interface for the campus skill graph
//!
//! Seeds a demo campus, persists it as a snapshot, and prints the
//! analytics computed from it.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "campus")]
#[command(author = "SkillGraph Contributors")]
#[command(version)]
#[command(about = "Peer mentoring graph: skills, events, sessions and rankings", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory of the snapshot store
    #[arg(long, global = true, default_value = ".campus")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the store and load the demo dataset
    Seed,

    /// Show graph and registry statistics
    Status,

    /// Rank skills by how many students want to learn them
    Trending {
        /// Maximum results to return (0 = all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only count claims from the last N log entries
        #[arg(short, long)]
        window: Option<u64>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Rank students by teaching and completed mentoring sessions
    Leaderboard {
        /// Maximum results to return (0 = all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show a student's profile
    User {
        /// User id, e.g. u1
        id: String,
    },

    /// Show an event
    Event {
        /// Event id, e.g. evt_hack
        id: String,
    },

    /// Suggest mentors for the skills a student wants to learn
    Mentors {
        /// User id, e.g. u4
        id: String,

        /// Maximum results to return (0 = all)
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Export the snapshot to JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = "campus-snapshot.json")]
        output: PathBuf,
    },

    /// Remove the saved snapshot
    Reset,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let mut config = campus_graph::CampusConfig {
        store_path: cli.store,
        ..Default::default()
    };

    let result = match cli.command {
        Commands::Seed => commands::seed(&config),
        Commands::Status => commands::status(&config),
        Commands::Trending {
            limit,
            window,
            json,
        } => {
            if let Some(limit) = limit {
                config.trending_limit = limit;
            }
            if let Some(window) = window {
                config.recent_window = window;
            }
            commands::trending(&config, json).await
        }
        Commands::Leaderboard { limit, json } => {
            if let Some(limit) = limit {
                config.leaderboard_limit = limit;
            }
            commands::leaderboard(&config, json).await
        }
        Commands::User { id } => commands::user(&config, &id),
        Commands::Event { id } => commands::event(&config, &id),
        Commands::Mentors { id, limit } => commands::mentors(&config, &id, limit),
        Commands::Export { output } => commands::export(&config, &output),
        Commands::Reset => commands::reset(&config),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
