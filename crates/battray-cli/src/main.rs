use clap::{Parser, Subcommand};

mod commands;
mod sysfs;

#[derive(Parser)]
#[command(name = "battray", version, about = "Battray battery status CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current battery status once
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the monitor loop, printing status changes and notifications
    Watch,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status { json } => commands::status::run(json),
        Commands::Watch => commands::watch::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
