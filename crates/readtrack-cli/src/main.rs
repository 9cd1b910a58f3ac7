use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod session;

#[derive(Parser)]
#[command(name = "readtrack", version, about = "Reading progress tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the reading plan with completion marks
    List {
        #[command(flatten)]
        args: commands::list::ListArgs,
    },
    /// Mark reading units complete, or incomplete if already complete
    Toggle {
        /// Reading unit ids (e.g. GEN EXO)
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Completion statistics
    Stats {
        #[command(flatten)]
        args: commands::stats::StatsArgs,
    },
    /// Progress maintenance (reset, prune, import, export)
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Inspect the active schedule
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("READTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::List { args } => commands::list::run(args),
        Commands::Toggle { ids } => commands::toggle::run(&ids),
        Commands::Stats { args } => commands::stats::run(args),
        Commands::Progress { action } => commands::progress::run(action),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
