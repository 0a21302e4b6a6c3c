// ABOUTME: Liftlog CLI - syncs Hevy workouts into SQLite and prints derived training metrics
// ABOUTME: Read commands run a cooldown-gated sync first unless --offline is given
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Pull new workouts (skipped inside the cooldown unless --force)
//! liftlog-cli sync
//! liftlog-cli sync --force
//!
//! # Personal records, optionally for one year or at a rep target
//! liftlog-cli records --metric e1rm --year 2024
//! liftlog-cli records --metric max_weight_at_reps --reps 5
//!
//! # Best set per workout for one exercise
//! liftlog-cli progress 79D0BB3A --from 2024-01-01 --to 2024-06-30
//!
//! # Muscle radar compared with the preceding period
//! liftlog-cli muscles --from 2024-03-01 --to 2024-03-31
//!
//! # Year rollup
//! liftlog-cli dashboard --year 2024
//!
//! # Catalog maintenance
//! liftlog-cli exercises discover
//! liftlog-cli exercises set-muscles 79D0BB3A --muscles petto,tricipiti
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use liftlog::config::environment::{AppConfig, DatabaseUrl};
use liftlog::database::Database;
use liftlog::errors::AppResult;
use liftlog::logging::LoggingConfig;
use tracing::{info, warn};

use helpers::context::CliContext;
use helpers::display::log_sync_outcome;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "liftlog-cli",
    about = "Hevy workout sync and training analytics",
    long_about = "Mirrors your Hevy workout history into a local SQLite database and computes personal records, exercise progress, muscle coverage, and yearly rollups from it."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Skip the lazy sync before read commands
    #[arg(long, global = true)]
    offline: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Pull workouts from Hevy
    Sync {
        /// Ignore the cooldown and run a full pass
        #[arg(long)]
        force: bool,
    },

    /// List stored workouts, newest first
    Workouts {
        /// Restrict to one calendar year
        #[arg(long)]
        year: Option<i32>,

        /// First day (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// Last day (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Include workouts flagged as ignored
        #[arg(long)]
        include_ignored: bool,
    },

    /// Show one workout with its sets
    Workout {
        /// Workout id
        id: String,
    },

    /// Best set per exercise
    Records {
        /// `max_weight`, `e1rm` or `max_weight_at_reps`
        #[arg(long, default_value = "max_weight")]
        metric: String,

        /// Rep target for `max_weight_at_reps`
        #[arg(long)]
        reps: Option<i64>,

        /// Restrict to one calendar year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Per-workout best set of one exercise
    Progress {
        /// Exercise template id
        template_id: String,

        /// First day (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: String,

        /// Last day (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: String,
    },

    /// Muscle counts and radar against the preceding period
    Muscles {
        /// First day (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: String,

        /// Last day (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: String,
    },

    /// Yearly volume and frequency rollup
    Dashboard {
        /// Calendar year
        #[arg(long)]
        year: i32,
    },

    /// Exercise catalog maintenance
    Exercises {
        #[command(subcommand)]
        action: ExerciseCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ExerciseCommand {
    /// List catalog entries with their muscles and equipment
    List,

    /// Register catalog entries for every template id seen in synced sets
    Discover,

    /// Add an exercise or retitle an existing template
    Add {
        /// Display title
        title: String,

        /// Template id
        #[arg(long)]
        template_id: Option<String>,
    },

    /// Replace the muscles trained by an exercise
    SetMuscles {
        /// Template id
        template_id: String,

        /// Comma-separated muscle names
        #[arg(long, value_delimiter = ',')]
        muscles: Vec<String>,
    },

    /// Replace the equipment used by an exercise
    SetEquipment {
        /// Template id
        template_id: String,

        /// Comma-separated equipment names
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Err(e) = logging.init() {
        eprintln!("logging disabled: {e}");
    }

    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }

    info!("Connecting to database: {}", config.database.url);
    let database = Database::new(&config.database.url.to_connection_string()).await?;
    let context = CliContext::new(config, database);

    // Reads see fresh data unless the user opted out
    if cli.offline {
        info!("offline mode, skipping sync");
    } else if command_reads_workouts(&cli.command) {
        match context.ensure_synced().await {
            Ok(outcome) => log_sync_outcome(&outcome),
            Err(e) => warn!("sync before read failed, showing stored data: {e}"),
        }
    }

    match cli.command {
        Command::Sync { force } => commands::sync::run(&context, force).await?,
        Command::Workouts {
            year,
            from,
            to,
            include_ignored,
        } => {
            commands::reads::workouts(&context, year, from, to, include_ignored).await?;
        }
        Command::Workout { id } => commands::reads::workout(&context, &id).await?,
        Command::Records { metric, reps, year } => {
            commands::reads::records(&context, &metric, reps, year).await?;
        }
        Command::Progress {
            template_id,
            from,
            to,
        } => commands::reads::progress(&context, &template_id, &from, &to).await?,
        Command::Muscles { from, to } => commands::reads::muscles(&context, &from, &to).await?,
        Command::Dashboard { year } => commands::reads::dashboard(&context, year).await?,
        Command::Exercises { action } => match action {
            ExerciseCommand::List => commands::exercises::list(&context).await?,
            ExerciseCommand::Discover => commands::exercises::discover(&context).await?,
            ExerciseCommand::Add { title, template_id } => {
                commands::exercises::add(&context, &title, template_id.as_deref()).await?;
            }
            ExerciseCommand::SetMuscles {
                template_id,
                muscles,
            } => commands::exercises::set_muscles(&context, &template_id, &muscles).await?,
            ExerciseCommand::SetEquipment {
                template_id,
                equipment,
            } => commands::exercises::set_equipment(&context, &template_id, &equipment).await?,
        },
    }

    Ok(())
}

/// Commands whose output depends on synced workouts
const fn command_reads_workouts(command: &Command) -> bool {
    matches!(
        command,
        Command::Workouts { .. }
            | Command::Workout { .. }
            | Command::Records { .. }
            | Command::Progress { .. }
            | Command::Muscles { .. }
            | Command::Dashboard { .. }
    )
}
