//! Append-only run state and its JSON snapshots.
//!
//! A reporting session accumulates one [`PageStatistics`] row and one raw
//! findings batch per processed page. After every page both sequences are
//! written out in full:
//!
//! - `statistics.json` — array of statistics rows.
//! - `results.json` — array of findings arrays (the history).
//!
//! Snapshots are whole-file overwrites, so a crash between pages loses at
//! most the page in flight. `results.json` is what the codes report reads,
//! possibly from a later process.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use audit_report_core::{Finding, History, PageStatistics};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, StoreError};

/// File name of the statistics snapshot.
pub const STATISTICS_FILE: &str = "statistics.json";
/// File name of the raw results snapshot.
pub const RESULTS_FILE: &str = "results.json";

/// In-memory record of every page processed in one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunState {
    statistics: Vec<PageStatistics>,
    history: History,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_statistics(&mut self, record: PageStatistics) {
        self.statistics.push(record);
    }

    pub fn append_history(&mut self, batch: Vec<Finding>) {
        self.history.push(batch);
    }

    pub fn statistics(&self) -> &[PageStatistics] {
        &self.statistics
    }

    pub fn history(&self) -> &[Vec<Finding>] {
        &self.history
    }

    /// Number of pages recorded so far.
    pub fn len(&self) -> usize {
        self.statistics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statistics.is_empty()
    }

    /// Overwrites both snapshots in `dir` with the full accumulated state.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](StoreError::IoError) if either file cannot be
    /// written.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        write_json(&dir.join(STATISTICS_FILE), &self.statistics)?;
        write_json(&dir.join(RESULTS_FILE), &self.history)?;
        debug!(
            dir = %dir.display(),
            pages = self.statistics.len(),
            "Wrote run state snapshots"
        );
        Ok(())
    }

    /// Reads the history snapshot from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingSnapshot`](StoreError::MissingSnapshot) if
    /// `results.json` does not exist and
    /// [`JsonError`](StoreError::JsonError) if it is not a JSON array of
    /// findings arrays.
    pub fn load_history(dir: impl AsRef<Path>) -> Result<History> {
        read_json(&dir.as_ref().join(RESULTS_FILE))
    }

    /// Reads the statistics snapshot from `dir`.
    pub fn load_statistics(dir: impl AsRef<Path>) -> Result<Vec<PageStatistics>> {
        read_json(&dir.as_ref().join(STATISTICS_FILE))
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => StoreError::MissingSnapshot(path.to_path_buf()),
        _ => StoreError::IoError(err),
    })?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn stats(url: &str) -> PageStatistics {
        PageStatistics {
            url: url.to_string(),
            hash: audit_report_core::derive_id(url),
            date: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            error_count: 1,
            warning_count: 0,
            notice_count: 2,
        }
    }

    #[test]
    fn test_appends_preserve_order() {
        let mut state = RunState::new();
        assert!(state.is_empty());
        state.append_statistics(stats("a"));
        state.append_statistics(stats("b"));
        state.append_history(vec![Finding::new("X", "error", "a")]);
        state.append_history(Vec::new());

        assert_eq!(state.len(), 2);
        assert_eq!(state.statistics()[0].url, "a");
        assert_eq!(state.statistics()[1].url, "b");
        assert_eq!(state.history()[0].len(), 1);
        assert!(state.history()[1].is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = RunState::new();
        state.append_statistics(stats("a"));
        state.append_history(vec![Finding::new("X", "error", "a").with_message("m")]);
        state.save(dir.path()).unwrap();

        assert_eq!(RunState::load_statistics(dir.path()).unwrap(), state.statistics());
        assert_eq!(RunState::load_history(dir.path()).unwrap(), state.history());
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = RunState::new();
        state.append_statistics(stats("a"));
        state.append_history(vec![Finding::new("X", "error", "a")]);
        state.save(dir.path()).unwrap();

        state.append_statistics(stats("b"));
        state.append_history(vec![Finding::new("Y", "notice", "b")]);
        state.save(dir.path()).unwrap();

        let history = RunState::load_history(dir.path()).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1][0].code, "Y");
        assert_eq!(RunState::load_statistics(dir.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_load_history_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let err = RunState::load_history(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::MissingSnapshot(ref p) if p.ends_with(RESULTS_FILE)));
    }

    #[test]
    fn test_load_history_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(RESULTS_FILE), "{not json").unwrap();
        let err = RunState::load_history(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::JsonError(_)));
    }

    #[test]
    fn test_load_history_accepts_checker_output() {
        let dir = tempfile::tempdir().unwrap();
        let raw = r#"[[{"code":"X","type":"error","typeCode":1,"message":"m","context":null,"selector":"p","url":"a","level":"error"}],[]]"#;
        std::fs::write(dir.path().join(RESULTS_FILE), raw).unwrap();

        let history = RunState::load_history(dir.path()).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0][0].selector, "p");
        assert_eq!(history[0][0].context, "");
        assert_eq!(history[0][0].extra["typeCode"], 1);
    }

    #[test]
    fn test_load_history_tolerates_wrong_typed_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(RESULTS_FILE), r#"[[{"code":123,"level":2}]]"#).unwrap();

        let history = RunState::load_history(dir.path()).unwrap();
        let finding = &history[0][0];
        assert_eq!(finding.code, "123");
        assert_eq!(finding.severity(), None);

        let codes = audit_report_core::aggregate_codes(&history);
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].instances, 1);
    }
}
