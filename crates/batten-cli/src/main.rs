//! Batten command-line interface.
//!
//! Run spline quadrature benchmarks from TOML configuration files:
//! ```sh
//! batten-cli run job.toml
//! batten-cli validate job.toml
//! batten-cli functions
//! ```

mod config;
mod functions;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "batten-cli")]
#[command(about = "Batten: Natural Cubic Spline Quadrature Benchmark")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a benchmark from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the benchmark.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Display information about the built-in sample functions.
    Functions,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Batten Spline Benchmark");
            println!("=======================");
            let job = config::load_config(&config)?;
            job.validate()?;
            println!("Configuration: {}", config.display());

            let result = runner::run_benchmark(&job)?;

            // Determine output directory
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            // CSV trial results (default on)
            if job.output.save_csv {
                let csv_path = out_dir.join("trials.csv");
                runner::write_trials_csv(&result, &csv_path)?;
            }

            // JSON trial results (optional)
            if job.output.save_json {
                let json_path = out_dir.join("trials.json");
                runner::write_trials_json(&result, &json_path)?;
            }

            println!("Benchmark complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            job.validate()?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Functions => {
            println!("Built-in sample functions:");
            println!();
            for f in functions::BUILTINS {
                println!("    {:<8} — {}", f.name, f.description);
            }
            println!();
            println!("Any of these can be set as [function] name in a job file.");
            Ok(())
        }
    }
}
