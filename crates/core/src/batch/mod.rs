//! Batch golden generation.
//!
//! Walks the configured input directories in a fixed order and produces
//! one golden artifact per input:
//!
//! 1. discover `*.<extension>` files, sorted by name within each directory
//! 2. skip-listed names are recorded as skipped and never opened
//! 3. everything else goes through [`extract_document`]; a failure is
//!    recorded and the batch moves on
//! 4. successes are written atomically as `<stem>.json`; an artifact left
//!    by an earlier run for an input that now fails or is skipped is removed
//!
//! The only fatal condition is a missing input directory, detected before
//! any file is touched.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{GoldenError, Result};
use crate::golden::{Profile, extract_document, source_name, to_json};
use crate::oracle::ReferenceExtractor;

pub mod builder;
pub mod report;
pub mod writer;

pub use builder::GoldenBuilder;
pub use report::{BatchEntry, BatchReport, FileOutcome, FileSummary};

/// Inputs known to be unusable for automated extraction: a
/// password-protected document and a zero-byte file.
pub const DEFAULT_SKIP_LIST: &[&str] = &["password-example.pdf", "empty.pdf"];

pub const DEFAULT_EXTENSION: &str = "pdf";

/// What to do when a configured input directory does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingDirPolicy {
    /// Abort the run before processing anything.
    #[default]
    Fatal,
    /// Log and carry on with the remaining directories.
    Warn,
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dirs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// Extension without the dot, matched case-sensitively.
    pub extension: String,
    /// File names (not paths) never handed to the oracle.
    pub skip_list: BTreeSet<String>,
    pub profile: Profile,
    pub missing_dirs: MissingDirPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dirs: Vec::new(),
            output_dir: PathBuf::from("golden"),
            extension: DEFAULT_EXTENSION.to_string(),
            skip_list: DEFAULT_SKIP_LIST.iter().map(|s| s.to_string()).collect(),
            profile: Profile::Full,
            missing_dirs: MissingDirPolicy::Fatal,
        }
    }
}

impl BatchConfig {
    pub fn is_skipped(&self, path: &Path) -> bool {
        self.skip_list.contains(&source_name(path))
    }

    /// Artifact path for an input.
    pub fn artifact_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_name(input));
        self.output_dir.join(format!("{stem}.json"))
    }
}

/// List candidate inputs: per directory in configured order, files sorted
/// by name.
pub fn discover(config: &BatchConfig) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for dir in &config.input_dirs {
        if !dir.is_dir() {
            match config.missing_dirs {
                MissingDirPolicy::Fatal => return Err(GoldenError::InputDirMissing(dir.clone())),
                MissingDirPolicy::Warn => {
                    warn!(dir = %dir.display(), "input directory not found, skipping");
                    continue;
                }
            }
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let matches = path
                .extension()
                .is_some_and(|ext| ext == config.extension.as_str());
            if matches && path.is_file() {
                found.push(path);
            }
        }
        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        inputs.extend(found);
    }
    Ok(inputs)
}

/// Run one input through extraction and, on success, write its artifact.
pub fn process_file<E: ReferenceExtractor>(
    extractor: &E,
    path: &Path,
    config: &BatchConfig,
) -> FileOutcome {
    if config.is_skipped(path) {
        info!(source = %source_name(path), "skipped (in skip list)");
        return FileOutcome::Skipped;
    }

    let artifact = config.artifact_path(path);
    let written = extract_document(extractor, path).and_then(|doc| {
        let bytes = to_json(&doc, config.profile)?;
        writer::write_atomic(&artifact, &bytes)?;
        Ok(doc.counts())
    });

    match written {
        Ok(counts) => {
            let summary = FileSummary { artifact, counts };
            info!(source = %source_name(path), "{summary}");
            FileOutcome::Succeeded(summary)
        }
        Err(e) => {
            warn!(source = %source_name(path), error = %e, "extraction failed");
            FileOutcome::Failed(e.to_string())
        }
    }
}

/// Generate golden artifacts for every discovered input.
///
/// Returns `Err` only for run-level faults (missing input directory,
/// unusable output directory); per-file outcomes live in the report. An
/// artifact exists afterwards exactly for the inputs that succeeded.
pub fn run_batch<E: ReferenceExtractor>(extractor: &E, config: &BatchConfig) -> Result<BatchReport> {
    let inputs = discover(config)?;
    fs::create_dir_all(&config.output_dir)?;
    info!(
        inputs = inputs.len(),
        output = %config.output_dir.display(),
        "generating golden files"
    );

    let mut report = BatchReport::default();
    let mut written: HashSet<PathBuf> = HashSet::new();
    for path in inputs {
        let outcome = process_file(extractor, &path, config);
        match &outcome {
            FileOutcome::Succeeded(summary) => {
                if !written.insert(summary.artifact.clone()) {
                    warn!(
                        artifact = %summary.artifact.display(),
                        source = %path.display(),
                        "artifact overwritten by a later input with the same stem"
                    );
                }
            }
            FileOutcome::Skipped | FileOutcome::Failed(_) => {
                let artifact = config.artifact_path(&path);
                if !written.contains(&artifact) {
                    remove_stale(&artifact)?;
                }
            }
        }
        report.push(BatchEntry {
            source: source_name(&path),
            path,
            outcome,
        });
    }
    Ok(report)
}

/// Remove an artifact whose input produced no record in this run.
fn remove_stale(artifact: &Path) -> Result<()> {
    match fs::remove_file(artifact) {
        Ok(()) => {
            info!(artifact = %artifact.display(), "removed stale artifact");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_skip_list() {
        let config = BatchConfig::default();
        assert!(config.is_skipped(Path::new("any/dir/empty.pdf")));
        assert!(config.is_skipped(Path::new("password-example.pdf")));
        assert!(!config.is_skipped(Path::new("empty.pdf.bak")));
    }

    #[test]
    fn artifact_replaces_extension() {
        let config = BatchConfig {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(
            config.artifact_path(Path::new("in/issue-1234.v2.pdf")),
            PathBuf::from("out/issue-1234.v2.json")
        );
    }

    #[test]
    fn missing_directory_is_fatal_by_default() {
        let config = BatchConfig {
            input_dirs: vec![PathBuf::from("/nonexistent/plumbline/inputs")],
            ..Default::default()
        };
        assert!(matches!(
            discover(&config),
            Err(GoldenError::InputDirMissing(_))
        ));
    }

    #[test]
    fn missing_directory_can_be_tolerated() {
        let config = BatchConfig {
            input_dirs: vec![PathBuf::from("/nonexistent/plumbline/inputs")],
            missing_dirs: MissingDirPolicy::Warn,
            ..Default::default()
        };
        assert!(discover(&config).unwrap().is_empty());
    }
}
