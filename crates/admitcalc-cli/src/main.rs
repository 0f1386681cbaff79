//! admitcalc CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "admitcalc",
    version,
    about = "University admission chance estimator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate admission chances and rank programs
    Calculate {
        /// Academic marks as a percentage (0-100)
        #[arg(long, allow_negative_numbers = true)]
        marks: f64,

        /// Raw entry test score
        #[arg(long, allow_negative_numbers = true)]
        test_score: f64,

        /// Maximum possible entry test score (default from config, else 200)
        #[arg(long, allow_negative_numbers = true)]
        test_max: Option<f64>,

        /// Only evaluate this university
        #[arg(long)]
        university: Option<String>,

        /// Only evaluate programs with this id
        #[arg(long)]
        program: Option<String>,

        /// Number of ranked results to show
        #[arg(long)]
        top: Option<usize>,

        /// Output format: table, json
        #[arg(long)]
        format: Option<String>,

        /// Save the full ranked report as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Catalog TOML file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate catalog TOML files
    Validate {
        /// Catalog file or directory (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List universities, or the programs of one university
    List {
        /// University id
        #[arg(long)]
        university: Option<String>,

        /// Catalog TOML file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two saved reports
    Compare {
        /// Earlier report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Later report JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if any program's chance declined
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example catalog
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("admitcalc=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Calculate {
            marks,
            test_score,
            test_max,
            university,
            program,
            top,
            format,
            output,
            catalog,
            config,
        } => commands::calculate::execute(
            marks, test_score, test_max, university, program, top, format, output, catalog,
            config,
        ),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::List {
            university,
            catalog,
            config,
        } => commands::list::execute(university, catalog, config),
        Commands::Compare {
            baseline,
            current,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, fail_on_decline, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
