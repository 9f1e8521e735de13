use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitforge", version, about = "Habitforge habit tracker CLI")]
struct Cli {
    /// Ledger file to use instead of the configured one
    #[arg(long, global = true, env = "HABITFORGE_DATA")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Reward management
    Reward {
        #[command(subcommand)]
        action: commands::reward::RewardAction,
    },
    /// Habit statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Current level and XP
    Level,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive menu
    Menu,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("habitforge=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action, cli.data),
        Commands::Reward { action } => commands::reward::run(action, cli.data),
        Commands::Stats { json } => commands::stats::run(json, cli.data),
        Commands::Level => commands::stats::level(cli.data),
        Commands::Config { action } => commands::config::run(action),
        Commands::Menu => commands::menu::run(cli.data),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
