use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayplanner", version, about = "Dayplanner CLI")]
struct Cli {
    /// Registered username to act as (defaults to config `default_user`)
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User registration and lookup
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Planning profile (name, sleep schedule, preferences)
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Daily schedule generation
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Clock time arithmetic
    Clock {
        #[command(subcommand)]
        action: commands::clock::ClockAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let user = cli.user;
    tracing::debug!(user = ?user, "dispatching command");
    let result = match cli.command {
        Commands::User { action } => commands::user::run(action, user),
        Commands::Profile { action } => commands::profile::run(action, user),
        Commands::Task { action } => commands::task::run(action, user),
        Commands::Schedule { action } => commands::schedule::run(action, user),
        Commands::Config { action } => commands::config::run(action),
        Commands::Clock { action } => commands::clock::run(action),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
