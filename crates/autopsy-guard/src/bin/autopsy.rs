//! autopsy CLI
//!
//! Scans `.npy` files for NaN/Inf and prints their statistics.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use autopsy_guard::{engine_status, FailureReport, FailureSource, WatchConfig};
use autopsy_io::{analyze, open_npy, to_json_value, StatsReport};
use clap::{Parser, Subcommand};
use comfy_table::Table;

#[derive(Parser)]
#[command(name = "autopsy", version, about = "Numerical failure diagnostics for float arrays")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute statistics for one or more .npy files
    Scan {
        files: Vec<PathBuf>,
        /// Treat multi-dimensional arrays as flat vectors
        #[arg(long)]
        flatten: bool,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
        /// Exit with status 1 if any file holds NaN or Inf
        #[arg(long)]
        fail_on_nonfinite: bool,
    },
    /// Print the effective watch config
    Config {
        /// Project root to look for .autopsy/watch.toml in
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// Print which engine is active
    Status,
}

#[derive(serde::Serialize)]
struct ConfigFile {
    watch: WatchConfig,
}

/// Failure entry for a scanned file, built from its existing report
fn failure_for(path: &Path, report: StatsReport) -> Option<FailureReport> {
    report.has_failure().then(|| {
        FailureReport::new(
            "scan",
            FailureSource::Input(path.display().to_string()),
            report,
        )
    })
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    match Cli::parse().command {
        Command::Scan {
            files,
            flatten,
            json,
            fail_on_nonfinite,
        } => {
            let mut failed = false;

            for path in files {
                let mut array = open_npy(&path)?;
                if flatten {
                    array = array.flatten();
                }
                let report = analyze(&array)?;

                if json {
                    let mut value = to_json_value(&report);
                    value["file"] = path.display().to_string().into();
                    println!("{}", value);
                } else {
                    let mut table = Table::new();
                    table.set_header(vec!["Field", "Value"]);
                    for (name, value) in report.fields() {
                        table.add_row(vec![name.to_string(), value.to_string()]);
                    }
                    println!("{}\n{}", path.display(), table);
                }

                if let Some(failure) = failure_for(&path, report) {
                    eprintln!("{}", failure.render());
                    failed = true;
                }
            }

            if failed && fail_on_nonfinite {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Config { project } => {
            let config = WatchConfig::load_standard(project.as_deref())?;
            print!("{}", toml::to_string(&ConfigFile { watch: config })?);
        }
        Command::Status => println!("{}", engine_status()),
    }

    Ok(ExitCode::SUCCESS)
}
