//! `lakehouse` CLI: bronze sample generation and DuckDB inspection.

use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lh_common::OutputFormat;
use lh_config::{
    load_config, GeneratorConfig, GeneratorOverrides, InspectorConfig, InspectorOverrides,
    ENV_CONFIG_PATH,
};
use lh_core::generate::run_generate;
use lh_core::inspect::run_inspect;
use lh_core::logging::{init_logging, LogFormat};
use lh_core::{CoreError, ExitCode};
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(name = "lakehouse", version, about = "Bronze-layer sample data and DuckDB inspection")]
struct Cli {
    /// JSON config file (defaults to <config dir>/lakehouse/config.json when present)
    #[arg(long, global = true, env = ENV_CONFIG_PATH, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Debug-level logging unless LAKEHOUSE_LOG/RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fabricate users, events, subscriptions, and invoices as bronze Parquet partitions
    Generate(GenerateArgs),
    /// List tables and views of a DuckDB file with row counts
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of users
    #[arg(long)]
    users: Option<usize>,

    /// Number of events
    #[arg(long)]
    events: Option<usize>,

    /// Bronze root directory (env: LAKEHOUSE_BRONZE_PATH)
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Database file (env: DUCKDB_PATH)
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// List objects without counting rows
    #[arg(long)]
    no_counts: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose);

    let code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("Error: {}", err);
            err.exit_code()
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: &Cli) -> Result<(), CoreError> {
    let loaded = load_config(cli.config.as_deref())?;
    if let Some(source) = &loaded.source {
        debug!(path = %source.display(), "loaded config file");
    }

    match &cli.command {
        Commands::Generate(args) => {
            let overrides = GeneratorOverrides {
                users: args.users,
                events: args.events,
                bronze_path: args.output.clone(),
                seed: args.seed,
            };
            let config = GeneratorConfig::resolve(&overrides, &loaded.config);
            let summary = run_generate(&config)?;
            debug!(seed = summary.seed, partitions = summary.partitions.len(), "generate finished");
            println!("Sample Bronze data generated successfully.");
        }
        Commands::Inspect(args) => {
            let overrides = InspectorOverrides {
                duckdb_path: args.database.clone(),
                count_rows: args.no_counts.then_some(false),
            };
            let config = InspectorConfig::resolve(&overrides, &loaded.config);
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_inspect(&config, args.format, &mut out)?;
        }
    }
    Ok(())
}
