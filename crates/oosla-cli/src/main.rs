mod cmd;
mod output;

use clap::{Parser, Subcommand};
use oosla_core::types::Priority;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "oosla",
    about = "SLA aging monitor — classify open tickets, post reminders, write reports",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate all configured project/priority combinations for a team
    Run {
        /// Team name; resolves the onboarding document <onboard-dir>/<team>.{yaml,json}
        team: String,

        /// Tracker account used for search and comment calls
        #[arg(long, env = "JIRA_USER")]
        user: String,

        #[arg(long, env = "JIRA_PASSWORD", hide_env_values = true)]
        password: String,

        /// Restrict the run to one priority; also gates which tickets notify
        #[arg(long, env = "JIRA_PRIORITY")]
        priority: Option<Priority>,

        /// Directory holding team onboarding documents
        #[arg(long, default_value = "onboard")]
        onboard_dir: PathBuf,

        /// Directory report artifacts are written into
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Override the tracker base URL from the team document
        #[arg(long)]
        base_url: Option<String>,

        /// Classify and write reports without posting comments or watchers
        #[arg(long)]
        dry_run: bool,
    },

    /// Load and validate a team document, printing the resolved SLA table
    Validate {
        team: String,

        #[arg(long, default_value = "onboard")]
        onboard_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run {
            team,
            user,
            password,
            priority,
            onboard_dir,
            output_dir,
            base_url,
            dry_run,
        } => cmd::run::run(
            &team,
            &user,
            &password,
            priority,
            &onboard_dir,
            &output_dir,
            base_url.as_deref(),
            dry_run,
            cli.json,
        ),
        Commands::Validate { team, onboard_dir } => {
            cmd::validate::run(&team, &onboard_dir, cli.json)
        }
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
