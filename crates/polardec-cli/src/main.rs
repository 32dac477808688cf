//! polardec CLI: batch decomposition, synthesis, benchmarking and validation.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

mod commands;

#[derive(Parser)]
#[command(name = "polardec")]
#[command(version, about = "polardec: Lu-Chipman polar decomposition of Mueller matrices")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompose every matrix of a JSON batch.
    Decompose {
        /// Path to the batch input (JSON).
        input: String,

        /// Output JSON file path. Printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,

        /// Decomposition config (TOML); overrides the config in the input.
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Write a JSON batch of matrices synthesized from random factors.
    Synthesize {
        /// Scenario to draw from (pure_diattenuator, retarder_diattenuator,
        /// full_depolarizing, near_singular).
        #[arg(short, long, default_value = "full_depolarizing")]
        scenario: String,

        /// Number of matrices.
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output JSON file path. Printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the round-trip accuracy benchmark.
    Benchmark {
        /// Which scenario to run, or `all`.
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Samples per scenario.
        #[arg(short = 'n', long, default_value_t = 200)]
        samples: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Use the strict configuration.
        #[arg(long)]
        strict: bool,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a config (.toml) or batch input (.json).
    Validate {
        /// Path to the file.
        path: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    Registry::default().with(filter).with(fmt_layer).init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decompose {
            input,
            output,
            config,
        } => commands::decompose(&input, output.as_deref(), config.as_deref()),
        Commands::Synthesize {
            scenario,
            count,
            seed,
            output,
        } => commands::synthesize(&scenario, count, seed, output.as_deref()),
        Commands::Benchmark {
            scenario,
            samples,
            seed,
            strict,
            output,
        } => commands::benchmark(&scenario, samples, seed, strict, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
