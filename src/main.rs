use anyhow::Context;
use clap::Parser;
use ispu_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let result = commands::run(args).context("ispu-processor failed");

    match result {
        Ok(_stats) => {
            // Success - output has already been written by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("ISPU Processor - Indonesian Air Pollution Standard Index");
    println!("========================================================");
    println!();
    println!("Validate air quality CSV uploads and compute the ISPU index, health");
    println!("category and dominant pollutant for every daily observation.");
    println!();
    println!("USAGE:");
    println!("    ispu-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    validate    Check that a CSV upload satisfies a header contract");
    println!("    index       Compute ISPU indices for every row of one or more uploads");
    println!("    calc        Compute the ISPU index for a single set of concentrations");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity (repeatable)");
    println!("    -q, --quiet      Only log errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Check a prediction upload (meteorology columns, at most 7 rows):");
    println!("    ispu-processor validate week.csv --schema meteorology");
    println!();
    println!("    # Index a pollutant history and export the results as CSV:");
    println!("    ispu-processor index history.csv --format csv -o history_ispu.csv");
    println!();
    println!("    # Index of a single day:");
    println!("    ispu-processor calc --pm10 27 --so2 85 --co 2000 --o3 5.5 --no2 2.1");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ispu-processor <COMMAND> --help");
}
