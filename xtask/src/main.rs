use std::path::PathBuf;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use supply_core::cache::simulate_cached;
use supply_experiments::{
    export_sweep, run_parallel_sweep, PostalCodeSpace, SpaceSource, SweepConfig, SweepError,
    SweepMetrics,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the hyper-local supply workspace",
    long_about = "A unified CLI for simulating postal codes, running sweeps,\n\
                  benchmarks, and CI checks in the hyper-local supply workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one or more postal codes and print the result as JSON
    Simulate {
        /// Postal codes to simulate; malformed codes fall back to the default
        #[arg(required = true)]
        postal_codes: Vec<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Print the headline summary instead of the full hub list
        #[arg(long)]
        summary: bool,
    },
    /// Sweep the simulator over a set of postal codes and export the results
    Sweep {
        /// JSON sweep config; command-line flags override its fields
        #[arg(long, env = "SUPPLY_SWEEP_CONFIG")]
        config: Option<PathBuf>,
        /// Sample this many random 6-digit codes
        #[arg(long, conflicts_with = "codes")]
        random: Option<usize>,
        /// Seed for random sampling
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Explicit comma-separated postal codes
        #[arg(long, value_delimiter = ',')]
        codes: Option<Vec<String>>,
        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,
        /// Worker threads (defaults to all cores)
        #[arg(long)]
        threads: Option<usize>,
        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
    },
    /// Run the metro sweep example
    Example,
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run examples
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    match Command::new("cargo").args(args).status() {
        Ok(status) => status,
        Err(err) => {
            error!(%err, "failed to execute cargo");
            exit(1);
        }
    }
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── commands ───────────────────────────────────────────────────────

fn simulate_codes(postal_codes: &[String], pretty: bool, summary: bool) -> serde_json::Result<()> {
    for code in postal_codes {
        let result = simulate_cached(code);
        let value = if summary {
            serde_json::to_value(result.summary())?
        } else {
            serde_json::to_value(result.as_ref())?
        };
        let text = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        println!("{text}");
    }
    Ok(())
}

struct SweepOverrides {
    config: Option<PathBuf>,
    random: Option<usize>,
    seed: u64,
    codes: Option<Vec<String>>,
    output: Option<PathBuf>,
    threads: Option<usize>,
    quiet: bool,
}

fn sweep(overrides: SweepOverrides) -> Result<(), SweepError> {
    let mut config = match &overrides.config {
        Some(path) => SweepConfig::from_json_file(path)?,
        None => SweepConfig::default(),
    };
    if let Some(count) = overrides.random {
        config.space = SpaceSource::Random {
            count,
            seed: overrides.seed,
        };
    }
    if let Some(codes) = overrides.codes {
        config.space = SpaceSource::Codes { codes };
    }
    if let Some(output) = overrides.output {
        config.output_dir = output;
    }
    if overrides.threads.is_some() {
        config.num_threads = overrides.threads;
    }
    if overrides.quiet {
        config.show_progress = false;
    }

    let space: PostalCodeSpace = config.space.build();
    let records = run_parallel_sweep(
        &space,
        &config.params,
        config.num_threads,
        config.show_progress,
    )?;
    let metrics = SweepMetrics::from_records(&records);
    let dir = export_sweep(&records, &metrics, &config.output_dir, &space.fingerprint())?;

    info!(
        postal_codes = metrics.postal_codes,
        median_fastest_eta = metrics.median_fastest_eta_minutes,
        p90_fastest_eta = metrics.p90_fastest_eta_minutes,
        output = %dir.display(),
        "sweep exported"
    );
    Ok(())
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test supply_core");
    run_cargo(&["test", "-p", "supply_core"]);

    step("Test supply_experiments");
    run_cargo(&["test", "-p", "supply_experiments"]);
}

fn ci_examples() {
    step("Run postal_sweep");
    run_cargo(&[
        "run",
        "-p",
        "supply_experiments",
        "--example",
        "postal_sweep",
        "--release",
    ]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "supply_core", "--bench", "performance"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Simulate {
            postal_codes,
            pretty,
            summary,
        } => {
            if let Err(err) = simulate_codes(&postal_codes, pretty, summary) {
                error!(%err, "failed to serialize simulation");
                exit(1);
            }
        }
        Commands::Sweep {
            config,
            random,
            seed,
            codes,
            output,
            threads,
            quiet,
        } => {
            let overrides = SweepOverrides {
                config,
                random,
                seed,
                codes,
                output,
                threads,
                quiet,
            };
            if let Err(err) = sweep(overrides) {
                error!(%err, "sweep failed");
                exit(1);
            }
        }
        Commands::Example => {
            run_cargo(&[
                "run",
                "-p",
                "supply_experiments",
                "--example",
                "postal_sweep",
                "--release",
            ]);
        }
        Commands::Bench => {
            run_cargo(&["bench", "--package", "supply_core", "--bench", "performance"]);
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
