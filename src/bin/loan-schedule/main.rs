mod commands;
mod output;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

use commands::{ExportArgs, ScheduleArgs};

/// Fixed-rate annuity loan schedules
#[derive(Parser)]
#[command(
    name = "loan-schedule",
    version,
    about = "Fixed-rate annuity loan schedules",
    long_about = "Computes a monthly repayment schedule for a fixed-rate loan using the \
                  annuity method with exact decimal rounding, and prints or exports it \
                  as delimited text."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the repayment schedule
    Schedule(ScheduleArgs),
    /// Write the repayment schedule with loan info to a file
    Export(ExportArgs),
    /// Print version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("logger unavailable: {}", e);
    }

    let result = match cli.command {
        Commands::Schedule(args) => commands::run_schedule(&args).map(|text| print!("{}", text)),
        Commands::Export(args) => commands::run_export(&args).map(|path| {
            println!("schedule exported to {}", path.display());
        }),
        Commands::Version => {
            println!("loan-schedule {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    if let Err(e) = result {
        log::debug!("command failed: {:?}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
