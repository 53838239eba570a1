//! sheetjson CLI - machine comparison workbook to JSON conversion
//!
//! A command-line tool for turning comparison workbooks into nested JSON.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sheetjson::layout::{locate_header, machine_columns, SheetStrategy};
use sheetjson::render::{write_output, JsonFormat, OutputMode};
use sheetjson::{ConvertOptions, FailurePolicy, WorkbookReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert machine comparison workbooks to JSON
#[derive(Parser)]
#[command(
    name = "sheetjson",
    version,
    about = "Convert comparison workbooks to JSON",
    long_about = "sheetjson - Excel to JSON converter for machine comparison workbooks.\n\n\
                  Finds the \"Máquina\"/\"Machine\" header in each sheet and emits\n\
                  sheet → machine → attribute → value."
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a workbook to JSON
    Convert {
        /// Path to the .xlsx file
        input: PathBuf,

        /// Output .json file, or directory when --split is set
        #[arg(short, long)]
        out: PathBuf,

        /// Write one JSON file per sheet into the --out directory
        #[arg(long)]
        split: bool,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,

        /// Skip sheets without the expected layout instead of aborting
        #[arg(long)]
        skip_invalid: bool,

        /// Add "brand" and "model" entries to brand-grouped records
        #[arg(long)]
        brand_fields: bool,
    },

    /// Show the detected layout of every sheet
    Info {
        /// Path to the .xlsx file
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert {
            input,
            out,
            split,
            compact,
            skip_invalid,
            brand_fields,
        } => {
            let pb = create_spinner("Parsing workbook...");

            let policy = if skip_invalid {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            };
            let options = ConvertOptions::new()
                .with_failure_policy(policy)
                .with_brand_fields(brand_fields);
            let conversion = sheetjson::convert_file(&input, &options);
            pb.finish_and_clear();
            let conversion = conversion?;

            for skipped in &conversion.skipped {
                println!(
                    "{} Skipped sheet {}: {}",
                    "!".yellow().bold(),
                    skipped.name,
                    skipped.error
                );
            }

            let mode = if split {
                OutputMode::Split(out)
            } else {
                OutputMode::Combined(out)
            };
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };

            tracing::debug!(
                sheets = conversion.workbook.len(),
                skipped = conversion.skipped.len(),
                "conversion finished"
            );
            for path in write_output(&conversion.workbook, &mode, format)? {
                tracing::debug!(path = %path.display(), "output written");
                println!("{} wrote {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing workbook...");
            let reader = WorkbookReader::open(&input).map_err(|e| e.in_workbook(&input))?;
            pb.finish_and_clear();

            println!("{}", "Workbook Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Sheets".bold(), reader.sheet_count());

            for name in reader.sheet_names() {
                println!("\n{}", name.cyan().bold());
                let grid = match reader.read_grid(name) {
                    Ok(grid) => grid,
                    Err(e) => {
                        println!("  {}: {}", "Error".red().bold(), e);
                        continue;
                    }
                };
                println!("  {}: {} x {}", "Size".bold(), grid.height(), grid.width());
                println!("  {}: {:?}", "Strategy".bold(), SheetStrategy::for_sheet(name));
                match locate_header(&grid, name) {
                    Ok(location) => {
                        let machines = machine_columns(&grid, &location);
                        println!("  {}: {}", "Header".bold(), location.reference());
                        println!("  {}: {}", "Machines".bold(), machines.len());
                    }
                    Err(e) => println!("  {} {}", "!".yellow().bold(), e),
                }
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "sheetjson".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Excel to JSON converter for machine comparison workbooks");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
