use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "schedule-builder", version, about = "Schedule Builder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the availability grid
    Grid(commands::grid::GridArgs),
    /// Replay a gesture script against a schedule
    Paint(commands::paint::PaintArgs),
    /// Summarize a roster's availability
    Report(commands::report::ReportArgs),
    /// Edit a roster file
    Roster {
        #[command(subcommand)]
        action: commands::roster::RosterAction,
    },
    /// List selection modes
    Modes,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
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
    let result = match cli.command {
        Commands::Grid(args) => commands::grid::run(args),
        Commands::Paint(args) => commands::paint::run(args),
        Commands::Report(args) => commands::report::run(args),
        Commands::Roster { action } => commands::roster::run(action),
        Commands::Modes => commands::modes::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "schedule-builder",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
