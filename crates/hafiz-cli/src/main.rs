use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hafiz-cli", version, about = "Hafiz CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review session: the due queue and grading
    Review {
        #[command(subcommand)]
        action: commands::review::ReviewAction,
    },
    /// Learn session: today's segment
    Learn {
        #[command(subcommand)]
        action: commands::learn::LearnAction,
    },
    /// Schedule overview
    Today {
        #[command(subcommand)]
        action: commands::today::TodayAction,
    },
    /// Streak, heatmap and weekly statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Review { action } => commands::review::run(action).await,
        Commands::Learn { action } => commands::learn::run(action).await,
        Commands::Today { action } => commands::today::run(action).await,
        Commands::Stats { action } => commands::stats::run(action).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
