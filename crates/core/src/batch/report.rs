//! Batch outcomes.

use std::fmt;
use std::path::PathBuf;

use crate::golden::ObjectCounts;

/// Result of processing one input.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Succeeded(FileSummary),
    /// Listed in the skip-list; never opened.
    Skipped,
    /// Open or extraction failed; no artifact was written.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub artifact: PathBuf,
    pub counts: ObjectCounts,
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let c = &self.counts;
        write!(
            f,
            "{}  ({} pages, {} chars, {} words, {} lines, {} rects, {} tables)",
            name, c.pages, c.chars, c.words, c.lines, c.rects, c.tables
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Input file name.
    pub source: String,
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Ordered per-input outcomes of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn push(&mut self, entry: BatchEntry) {
        self.entries.push(entry);
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Succeeded(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    pub fn entry(&self, source: &str) -> Option<&BatchEntry> {
        self.entries.iter().find(|e| e.source == source)
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done! Generated: {}, Skipped: {}, Failed: {}",
            self.succeeded(),
            self.skipped(),
            self.failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source: &str, outcome: FileOutcome) -> BatchEntry {
        BatchEntry {
            source: source.to_string(),
            path: PathBuf::from(source),
            outcome,
        }
    }

    #[test]
    fn counts_and_summary_line() {
        let mut report = BatchReport::default();
        report.push(entry(
            "a.pdf",
            FileOutcome::Succeeded(FileSummary {
                artifact: PathBuf::from("out/a.json"),
                counts: ObjectCounts {
                    pages: 1,
                    chars: 12,
                    words: 3,
                    ..Default::default()
                },
            }),
        ));
        report.push(entry("empty.pdf", FileOutcome::Skipped));
        report.push(entry("bad.pdf", FileOutcome::Failed("corrupt".into())));

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.to_string(),
            "Done! Generated: 1, Skipped: 1, Failed: 1"
        );
        match &report.entry("a.pdf").unwrap().outcome {
            FileOutcome::Succeeded(s) => assert_eq!(
                s.to_string(),
                "a.json  (1 pages, 12 chars, 3 words, 0 lines, 0 rects, 0 tables)"
            ),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
