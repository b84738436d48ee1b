//! Builder pattern for batch golden generation.
//!
//! Provides a fluent API for configuring and running a batch.
//!
//! # Example
//! ```ignore
//! use plumbline_core::batch::GoldenBuilder;
//! use plumbline_core::oracle::BridgeExtractor;
//!
//! let report = GoldenBuilder::new("tests/fixtures/golden")
//!     .input_dir("tests/fixtures/generated")
//!     .input_dir("tests/fixtures/downloaded")
//!     .skip("broken-xref.pdf")
//!     .run(&BridgeExtractor::default())?;
//! println!("{report}");
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::golden::Profile;
use crate::oracle::ReferenceExtractor;

use super::{
    BatchConfig, BatchReport, DEFAULT_EXTENSION, DEFAULT_SKIP_LIST, MissingDirPolicy, run_batch,
};

/// A builder for configuring a golden generation batch.
///
/// This wraps [`BatchConfig`] and [`run_batch`].
#[derive(Debug, Clone)]
pub struct GoldenBuilder {
    output_dir: PathBuf,
    input_dirs: Vec<PathBuf>,
    extension: String,
    skips: BTreeSet<String>,
    default_skips: bool,
    profile: Profile,
    missing_dirs: MissingDirPolicy,
}

impl GoldenBuilder {
    /// Creates a new GoldenBuilder writing artifacts into `output_dir`.
    ///
    /// # Example
    /// ```ignore
    /// let builder = GoldenBuilder::new("golden");
    /// ```
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            input_dirs: Vec::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            skips: BTreeSet::new(),
            default_skips: true,
            profile: Profile::Full,
            missing_dirs: MissingDirPolicy::Fatal,
        }
    }

    /// Adds an input directory. Directories are processed in the order
    /// they are added.
    pub fn input_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.input_dirs.push(dir.as_ref().to_path_buf());
        self
    }

    /// Adds several input directories.
    pub fn input_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.input_dirs
            .extend(dirs.into_iter().map(|d| d.as_ref().to_path_buf()));
        self
    }

    /// Sets the input file extension (without the dot).
    ///
    /// # Example
    /// ```ignore
    /// let builder = GoldenBuilder::new("golden").extension("PDF");
    /// ```
    pub fn extension(mut self, ext: &str) -> Self {
        self.extension = ext.trim_start_matches('.').to_string();
        self
    }

    /// Adds a file name to the skip-list.
    pub fn skip(mut self, file_name: &str) -> Self {
        self.skips.insert(file_name.to_string());
        self
    }

    /// Sets whether the built-in skip-list ([`DEFAULT_SKIP_LIST`]) applies
    /// (default: true).
    pub fn default_skips(mut self, enabled: bool) -> Self {
        self.default_skips = enabled;
        self
    }

    /// Sets the serialization profile.
    ///
    /// # Example
    /// ```ignore
    /// use plumbline_core::golden::Profile;
    ///
    /// let builder = GoldenBuilder::new("golden").profile(Profile::Legacy);
    /// ```
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets how missing input directories are handled.
    pub fn missing_dirs(mut self, policy: MissingDirPolicy) -> Self {
        self.missing_dirs = policy;
        self
    }

    /// Builds the `BatchConfig` from this builder's configuration.
    pub fn build(&self) -> BatchConfig {
        let mut skip_list = self.skips.clone();
        if self.default_skips {
            skip_list.extend(DEFAULT_SKIP_LIST.iter().map(|s| s.to_string()));
        }

        BatchConfig {
            input_dirs: self.input_dirs.clone(),
            output_dir: self.output_dir.clone(),
            extension: self.extension.clone(),
            skip_list,
            profile: self.profile,
            missing_dirs: self.missing_dirs,
        }
    }

    /// Runs the batch against `extractor`.
    ///
    /// # Errors
    /// Returns an error if an input directory is missing (under
    /// [`MissingDirPolicy::Fatal`]) or the output directory cannot be
    /// created. Per-file failures are reported, not returned.
    pub fn run<E: ReferenceExtractor>(self, extractor: &E) -> Result<BatchReport> {
        run_batch(extractor, &self.build())
    }
}
