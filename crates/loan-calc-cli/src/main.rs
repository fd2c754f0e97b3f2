mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use rust_decimal::Decimal;
use std::process;

use loan_calc_core::amortization::AmortizationEngine;

use commands::compliance::ComplianceArgs;
use commands::loan::{LoanArgs, ReportArgs};

/// Loan amortization with statutory rate-ceiling checks
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Loan amortization with statutory rate-ceiling checks",
    long_about = "A CLI for computing level monthly loan payments with decimal precision. \
                  Validates loan parameters, checks the rate against the legal ceiling \
                  for the loan category, and previews the first year of the schedule."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Ceiling override file (JSON or YAML), merged over the statutory table
    #[arg(long, global = true)]
    limits: Option<String>,

    /// Principal above which a loan is flagged as unusually large
    #[arg(long, global = true)]
    large_loan_threshold: Option<Decimal>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute payment, totals and a 12-month schedule preview
    Amortize(LoanArgs),
    /// Validate loan parameters without computing
    Validate(LoanArgs),
    /// Check a rate against the legal ceiling for a loan category
    Compliance(ComplianceArgs),
    /// Print the effective ceiling table
    Limits,
    /// Produce a timestamped loan report
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn build_engine(cli: &Cli) -> Result<AmortizationEngine, Box<dyn std::error::Error>> {
    let limits = input::limits::load_limits(cli.limits.as_deref())?;
    let engine = AmortizationEngine::new(limits);
    Ok(match cli.large_loan_threshold {
        Some(threshold) => engine.with_large_loan_threshold(threshold),
        None => engine,
    })
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine = match build_engine(&cli) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::loan::run_amortize(&engine, args),
        Commands::Validate(args) => commands::loan::run_validate(&engine, args),
        Commands::Compliance(args) => commands::compliance::run_compliance(&engine, args),
        Commands::Limits => commands::compliance::run_limits(&engine),
        Commands::Report(args) => commands::loan::run_report(&engine, args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
