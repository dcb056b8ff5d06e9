mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    alerts::AlertsSubcommand, config::ConfigSubcommand, patients::PatientsSubcommand,
    records::RecordsSubcommand, workflows::WorkflowsSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mediflow",
    about = "MediFlow clinical dashboard: alerts, patients, records, and care workflows",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .mediflow/)
    #[arg(long, global = true, env = "MEDIFLOW_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .mediflow/ with a config and the demo dataset
    Init {
        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Headline counters: critical, follow-up, stable patients and active alerts
    Stats,

    /// List, acknowledge, and dismiss alerts
    Alerts {
        #[command(subcommand)]
        subcommand: AlertsSubcommand,
    },

    /// Patient care workflows and their progress
    Workflows {
        #[command(subcommand)]
        subcommand: WorkflowsSubcommand,
    },

    /// Patients and monitoring snapshots
    Patients {
        #[command(subcommand)]
        subcommand: PatientsSubcommand,
    },

    /// Medical records
    Records {
        #[command(subcommand)]
        subcommand: RecordsSubcommand,
    },

    /// Orchestrator event log
    Events,

    /// Show or validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Serve the dashboard API
    Serve {
        /// Port to listen on (default: server.port from config)
        #[arg(long)]
        port: Option<u16>,

        /// Open the dashboard in a browser
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Stats => cmd::stats::run(&root, cli.json),
        Commands::Alerts { subcommand } => cmd::alerts::run(&root, subcommand, cli.json),
        Commands::Workflows { subcommand } => cmd::workflows::run(&root, subcommand, cli.json),
        Commands::Patients { subcommand } => cmd::patients::run(&root, subcommand, cli.json),
        Commands::Records { subcommand } => cmd::records::run(&root, subcommand, cli.json),
        Commands::Events => cmd::events::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Serve { port, open } => cmd::serve::run(&root, port, open),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
