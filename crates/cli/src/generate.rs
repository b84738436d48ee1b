//! plumbline-gen - Generate golden reference JSON from PDFs
//!
//! Runs the reference extractor over every PDF in the input directories
//! and writes one `<stem>.json` golden record per file into the output
//! directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use plumbline_core::batch::{FileOutcome, GoldenBuilder, MissingDirPolicy};
use plumbline_core::golden::Profile;
use plumbline_core::oracle::BridgeExtractor;
use tracing_subscriber::EnvFilter;

/// Schema profile for the emitted JSON.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum ProfileArg {
    /// Canonical schema (default)
    #[default]
    Full,
    /// Narrow export without doctop/upright, text, lines and rects
    Legacy,
}

impl From<ProfileArg> for Profile {
    fn from(p: ProfileArg) -> Self {
        match p {
            ProfileArg::Full => Profile::Full,
            ProfileArg::Legacy => Profile::Legacy,
        }
    }
}

/// Handling of input directories that do not exist.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum MissingDirsArg {
    /// Abort before processing anything (default)
    #[default]
    Fatal,
    /// Warn and continue with the remaining directories
    Warn,
}

impl From<MissingDirsArg> for MissingDirPolicy {
    fn from(m: MissingDirsArg) -> Self {
        match m {
            MissingDirsArg::Fatal => MissingDirPolicy::Fatal,
            MissingDirsArg::Warn => MissingDirPolicy::Warn,
        }
    }
}

/// Generate golden reference JSON for PDF extraction tests.
#[derive(Parser, Debug)]
#[command(name = "plumbline-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of source PDFs (repeatable, processed in order)
    #[arg(short = 'i', long = "input", default_value = "tests/fixtures/pdfs")]
    inputs: Vec<PathBuf>,

    /// Directory golden JSON is written to
    #[arg(short = 'o', long = "output", default_value = "tests/fixtures/golden")]
    output: PathBuf,

    /// Additional file name to skip (repeatable)
    #[arg(short = 's', long = "skip")]
    skip: Vec<String>,

    /// Do not apply the built-in skip-list
    #[arg(long = "no-default-skips", action = ArgAction::SetTrue)]
    no_default_skips: bool,

    /// Input file extension
    #[arg(long, default_value = "pdf")]
    extension: String,

    /// Schema profile of the emitted JSON
    #[arg(short = 'p', long, value_enum, default_value = "full")]
    profile: ProfileArg,

    /// What to do when an input directory does not exist
    #[arg(long = "missing-dirs", value_enum, default_value = "fatal")]
    missing_dirs: MissingDirsArg,

    /// Python interpreter with pdfplumber installed
    #[arg(long, env = "PLUMBLINE_PYTHON", default_value = "python3")]
    python: PathBuf,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let mut builder = GoldenBuilder::new(&args.output)
        .input_dirs(&args.inputs)
        .extension(&args.extension)
        .default_skips(!args.no_default_skips)
        .profile(args.profile.into())
        .missing_dirs(args.missing_dirs.into());
    for name in &args.skip {
        builder = builder.skip(name);
    }

    let oracle = BridgeExtractor::new(&args.python);
    let report = builder
        .run(&oracle)
        .context("golden generation aborted")?;

    for entry in &report.entries {
        match &entry.outcome {
            FileOutcome::Succeeded(summary) => println!("  {summary}"),
            FileOutcome::Skipped => println!("  SKIP {} (in skip list)", entry.source),
            FileOutcome::Failed(reason) => println!("  FAIL {}: {}", entry.source, reason),
        }
    }
    println!();
    println!("{report}");
    println!("Output: {}", args.output.display());

    Ok(())
}
