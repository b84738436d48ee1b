//! Child-process bridge to the reference extractor.
//!
//! The oracle (pdfplumber) runs in a Python child process fed by a small
//! embedded driver script. The child answers on stdout with one JSON
//! message per line:
//!
//! ```text
//! {"kind":"open","extractor_version":"0.11.9","page_count":2}
//! {"kind":"page","page_number":1,"width":612.0,...,"tables":[...]}
//! {"kind":"page","page_number":2,...,"table_error":"..."}
//! ```
//!
//! A `{"kind":"error","message":...}` line in place of the header means the
//! document could not be opened. In place of a page it means that one page
//! could not be produced at all; it is served as [`RawPage::unavailable`]
//! and the stream continues. Single views that raised are listed under
//! `view_errors` on an otherwise normal page message. The child's stderr is
//! inherited so the oracle's own warnings stay visible.

use std::ffi::{OsStr, OsString};
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{GoldenError, Result};
use crate::raw::RawPage;

use super::{ReferenceDocument, ReferenceExtractor};

/// Driver script executed by the interpreter with the document path as its
/// only argument.
pub const BRIDGE_SCRIPT: &str = include_str!("bridge.py");

/// Default interpreter.
pub const DEFAULT_PYTHON: &str = "python3";

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Message {
    Open {
        extractor_version: String,
        page_count: usize,
    },
    Page(Box<RawPage>),
    Error {
        #[serde(default)]
        page_number: Option<usize>,
        message: String,
    },
}

/// Reference extractor running the oracle in a child process.
#[derive(Debug, Clone)]
pub struct BridgeExtractor {
    program: OsString,
    script: String,
    envs: Vec<(OsString, OsString)>,
}

impl Default for BridgeExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PYTHON)
    }
}

impl BridgeExtractor {
    /// Bridge using `python` as the interpreter.
    pub fn new(python: impl AsRef<OsStr>) -> Self {
        Self::with_script(python, BRIDGE_SCRIPT)
    }

    /// Bridge running `program -c script <path>`. Any program that accepts
    /// `-c` and speaks the line protocol will do.
    pub fn with_script(program: impl AsRef<OsStr>, script: impl Into<String>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            script: script.into(),
            envs: Vec::new(),
        }
    }

    /// Set an environment variable for the child, e.g. `PYTHONPATH` to pick
    /// up a specific pdfplumber checkout.
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }
}

impl ReferenceExtractor for BridgeExtractor {
    type Document = BridgeDocument;

    fn open(&self, path: &Path) -> Result<BridgeDocument> {
        let mut child = Command::new(&self.program)
            .arg("-c")
            .arg(&self.script)
            .arg(path)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                GoldenError::Oracle(format!(
                    "failed to start {}: {}",
                    self.program.to_string_lossy(),
                    e
                ))
            })?;

        let Some(stdout) = child.stdout.take() else {
            reap(&mut child);
            return Err(GoldenError::Oracle("child stdout not captured".to_string()));
        };

        let mut doc = BridgeDocument {
            child,
            lines: BufReader::new(stdout).lines(),
            version: String::new(),
            page_count: 0,
            pages_read: 0,
            closed: false,
        };

        let open_error = |message: String| GoldenError::Open {
            path: path.to_path_buf(),
            message,
        };
        // `doc` drops on every early return below, which reaps the child
        match doc.read_message()? {
            Some(Message::Open {
                extractor_version,
                page_count,
            }) => {
                debug!(path = %path.display(), page_count, "oracle opened document");
                doc.version = extractor_version;
                doc.page_count = page_count;
                Ok(doc)
            }
            Some(Message::Error { message, .. }) => Err(open_error(message)),
            Some(Message::Page(_)) => Err(GoldenError::Oracle(
                "page received before open header".to_string(),
            )),
            None => {
                let status = doc.wait()?;
                Err(open_error(format!("oracle exited without output ({status})")))
            }
        }
    }
}

/// Open document on the child process side.
#[derive(Debug)]
pub struct BridgeDocument {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    version: String,
    page_count: usize,
    pages_read: usize,
    closed: bool,
}

impl BridgeDocument {
    fn read_message(&mut self) -> Result<Option<Message>> {
        match self.lines.next() {
            Some(line) => {
                let line = line?;
                let message = serde_json::from_str(&line).map_err(|e| {
                    GoldenError::Oracle(format!("malformed bridge message: {e}"))
                })?;
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }

    fn wait(&mut self) -> Result<std::process::ExitStatus> {
        self.closed = true;
        Ok(self.child.wait()?)
    }
}

impl ReferenceDocument for BridgeDocument {
    type Page = RawPage;

    fn extractor_version(&self) -> &str {
        &self.version
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn next_page(&mut self) -> Result<Option<RawPage>> {
        if self.pages_read >= self.page_count {
            return Ok(None);
        }
        let index = self.pages_read;
        match self.read_message()? {
            Some(Message::Page(page)) => {
                self.pages_read += 1;
                Ok(Some(*page))
            }
            Some(Message::Error {
                page_number,
                message,
            }) => {
                self.pages_read += 1;
                let page_number = page_number.unwrap_or(index + 1);
                warn!(page = index, error = %message, "oracle could not produce page");
                Ok(Some(RawPage::unavailable(page_number, &message)))
            }
            Some(Message::Open { .. }) => Err(GoldenError::Oracle(
                "unexpected second open header".to_string(),
            )),
            None => Err(GoldenError::Oracle(format!(
                "oracle stopped after {} of {} pages",
                index, self.page_count
            ))),
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        if self.pages_read < self.page_count {
            let _ = self.child.kill();
        }
        let status = self.wait()?;
        if self.pages_read == self.page_count && !status.success() {
            return Err(GoldenError::Oracle(format!("oracle exited with {status}")));
        }
        Ok(())
    }
}

impl Drop for BridgeDocument {
    fn drop(&mut self) {
        if !self.closed {
            reap(&mut self.child);
        }
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
