use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "crunchq", version, about = "Crunchq scheduling simulations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Caffeine task queue simulation
    Caffeine {
        #[command(subcommand)]
        action: commands::caffeine::CaffeineAction,
    },
    /// Assignment deadline scheduler simulation
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Refrigerator stack walkthrough
    Fridge {
        #[command(subcommand)]
        action: commands::fridge::FridgeAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Caffeine { action } => commands::caffeine::run(action),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Fridge { action } => commands::fridge::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
