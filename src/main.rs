//! convcheck - Newton iterate convergence checker
//!
//! Evaluates one Newton-Raphson iterate of an MNA system against SPICE-style
//! tolerances and prints a per-unknown report.
//!
//! # Usage
//!
//! ```bash
//! convcheck iterate.txt --nv 3 --options tol.opt --diagnostic --forward-diagnostics
//! my_solver --dump-iterate | convcheck --nv 3 --vea 1u
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use circuit_convergence::{
    error::{ConvergenceError, Result},
    input::IterateTable,
    options::{self, ToleranceConfig},
    utils, ConvergenceEvaluator, ConvergenceReport,
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Newton-Raphson convergence checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Iterate table (`x dx residuum` per line); reads stdin when omitted
    #[arg(value_name = "ITERATE_FILE")]
    iterate_file: Option<PathBuf>,

    /// Number of voltage-like unknowns (defaults to all of them)
    #[arg(long)]
    nv: Option<usize>,

    /// Options deck with `.options` lines
    #[arg(short, long, value_name = "DECK")]
    options: Option<PathBuf>,

    /// Relative voltage tolerance
    #[arg(long, value_parser = parse_tolerance)]
    ver: Option<f64>,

    /// Absolute voltage tolerance
    #[arg(long, value_parser = parse_tolerance)]
    vea: Option<f64>,

    /// Relative current tolerance
    #[arg(long, value_parser = parse_tolerance)]
    ier: Option<f64>,

    /// Absolute current tolerance
    #[arg(long, value_parser = parse_tolerance)]
    iea: Option<f64>,

    /// Check unknowns one by one, stopping at the first failure
    #[arg(short, long)]
    diagnostic: bool,

    /// Apply --diagnostic to both partitions of the full iterate
    #[arg(long)]
    forward_diagnostics: bool,

    /// Comma-separated names of the unknowns, in vector order
    #[arg(long, value_delimiter = ',')]
    names: Vec<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn parse_tolerance(text: &str) -> std::result::Result<f64, String> {
    options::parse_value(text).ok_or_else(|| format!("'{text}' is not a number"))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if TermLogger::init(
        args.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("logger already initialised");
    }

    // Build the tolerance configuration
    let mut config = match &args.options {
        Some(path) => options::load_options(&utils::check_file(path)?)?,
        None => ToleranceConfig::default(),
    };
    if let Some(ver) = args.ver {
        config = config.with_ver(ver);
    }
    if let Some(vea) = args.vea {
        config = config.with_vea(vea);
    }
    if let Some(ier) = args.ier {
        config = config.with_ier(ier);
    }
    if let Some(iea) = args.iea {
        config = config.with_iea(iea);
    }
    let config = config.validated()?;
    log::info!(
        "tolerances: ver={:e} vea={:e} ier={:e} iea={:e}",
        config.ver,
        config.vea,
        config.ier,
        config.iea
    );

    // Read the iterate
    let table = match &args.iterate_file {
        Some(path) => IterateTable::from_file(&utils::check_file(path)?)?,
        None => IterateTable::from_stdin()?,
    };
    let nv = args.nv.unwrap_or(table.len());
    if nv > table.len() {
        return Err(ConvergenceError::PartitionOutOfRange {
            index: nv,
            len: table.len(),
        });
    }

    if args.diagnostic && !args.forward_diagnostics {
        log::warn!("--diagnostic is ignored for the full iterate unless --forward-diagnostics is set");
    }

    // Evaluate
    let evaluator =
        ConvergenceEvaluator::new(config).with_forwarded_diagnostics(args.forward_diagnostics);
    let verdict = evaluator.evaluate(&table.x, &table.dx, &table.residuum, nv, args.diagnostic)?;

    let report = ConvergenceReport::with_names(&verdict, nv, table.len(), &args.names);
    report.log_failures();
    println!("{report}");

    Ok(if verdict.converged {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
