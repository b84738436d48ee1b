//! plumbline-check - Lint golden reference JSON
//!
//! Loads golden files and reports every record that breaks the golden
//! invariants (4-decimal precision, ordered bounding boxes, zero-based
//! page numbering, string-only table cells).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use plumbline_core::GoldenError;
use plumbline_core::golden::check_file;
use tracing_subscriber::EnvFilter;

/// Check golden JSON files for invariant violations.
#[derive(Parser, Debug)]
#[command(name = "plumbline-check")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Golden JSON files or directories containing them
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// Expand directories into their `*.json` files, sorted by name.
fn collect(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in fs::read_dir(path)? {
                let entry = entry?.path();
                if entry.extension().is_some_and(|ext| ext == "json") {
                    found.push(entry);
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn check_one(path: &Path) -> bool {
    match check_file(path) {
        Ok(doc) => {
            println!("  ok   {} ({} pages)", path.display(), doc.pages.len());
            true
        }
        Err(GoldenError::Check { path, violations }) => {
            println!("  FAIL {}", path.display());
            for v in &violations {
                println!("       {v}");
            }
            false
        }
        Err(e) => {
            println!("  FAIL {}: {}", path.display(), e);
            false
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let files = collect(&args.paths)?;
    let failed = files.iter().filter(|p| !check_one(p)).count();

    println!();
    println!("Checked: {}, Failed: {}", files.len(), failed);
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
