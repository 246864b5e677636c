use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use habits_core::storage::StorageBackend;

mod commands;

#[derive(Parser)]
#[command(name = "habits", version, about = "Track daily habits and streaks")]
struct Cli {
    /// Storage backend, overriding the config file
    #[arg(long, global = true, env = "HABITS_BACKEND")]
    backend: Option<StorageBackend>,

    /// Evaluate at this instant (RFC 3339) instead of the current time
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check in a habit, starting to track it if it is new
    Check {
        /// Habit name; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List tracked habits
    List {
        /// Include completed habits
        #[arg(long)]
        all: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one habit as JSON
    Show {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Stop tracking a habit
    Delete {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let ctx = commands::Context {
        backend: cli.backend,
        now: cli.now.unwrap_or_else(Utc::now),
    };

    let result = match cli.command {
        None => commands::list::run(&ctx, false, false),
        Some(Commands::Check { name, json }) => commands::check::run(&ctx, &name.join(" "), json),
        Some(Commands::List { all, json }) => commands::list::run(&ctx, all, json),
        Some(Commands::Show { name }) => commands::show::run(&ctx, &name.join(" ")),
        Some(Commands::Delete { name }) => commands::delete::run(&ctx, &name.join(" ")),
        Some(Commands::Config { action }) => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
