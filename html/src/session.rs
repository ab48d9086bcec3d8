//! Report session: per-page reports and the incrementally written index.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use audit_report_core::{Finding, PageSummary, report_file_name, summarize_page};
use audit_report_store::{ReporterConfig, RunState};
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::error::{ReportError, Result};
use crate::templates::{BuiltinTemplates, IndexHeaderView, PageView, Templates, load_stylesheet};

/// File name of the running page index.
pub const INDEX_FILE: &str = "index.html";

/// One reporting session writing into one output directory.
///
/// Opening a session creates the output directory and appends a header to
/// `index.html`. Each [`report_page`](Self::report_page) call then writes the
/// page's own report, appends its entry to the index and rewrites the JSON
/// snapshots with everything seen so far.
///
/// Index entries are buffered and flushed once per page. The handle gets a
/// final flush from [`close`](Self::close), or on drop if the session is
/// abandoned. Only one session may write to a given directory at a
/// time.
///
/// # Examples
///
/// ```no_run
/// use audit_report_core::Finding;
/// use audit_report_html::ReportSession;
/// use audit_report_store::ReporterConfig;
///
/// let config = ReporterConfig::new("reports");
/// let mut session = ReportSession::open(&config)?;
/// let url = "https://example.com/";
/// let page = session.report_page(vec![Finding::new("X", "error", url)], url)?;
/// assert_eq!(page.counts.error, 1);
/// session.close()?;
/// # Ok::<(), audit_report_html::ReportError>(())
/// ```
pub struct ReportSession<T = BuiltinTemplates> {
    output_directory: PathBuf,
    css: String,
    templates: T,
    index: BufWriter<File>,
    state: RunState,
}

impl ReportSession<BuiltinTemplates> {
    /// Opens a session rendering with [`BuiltinTemplates`].
    pub fn open(config: &ReporterConfig) -> Result<Self> {
        Self::with_templates(config, BuiltinTemplates)
    }
}

impl<T: Templates> ReportSession<T> {
    /// Opens a session rendering with `templates`.
    ///
    /// # Errors
    ///
    /// Fails if the output directory cannot be created, the stylesheet cannot
    /// be read, or `index.html` cannot be opened for appending.
    pub fn with_templates(config: &ReporterConfig, templates: T) -> Result<Self> {
        let output_directory = config.output_directory.clone();
        create_output_dir(&output_directory)?;
        let css = load_stylesheet(config)?;

        let index_path = output_directory.join(INDEX_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&index_path)
            .map_err(|source| ReportError::WriteArtifact {
                path: index_path.clone(),
                source,
            })?;
        let mut index = BufWriter::new(file);

        let header = templates.index_header(&IndexHeaderView {
            date: Utc::now(),
            title: config.title.as_deref(),
            css: &css,
        });
        write_fragment(&mut index, &index_path, &header)?;
        flush_index(&mut index, &index_path)?;

        info!(dir = %output_directory.display(), "Opened report session");

        Ok(Self {
            output_directory,
            css,
            templates,
            index,
            state: RunState::new(),
        })
    }

    /// Aggregates one page's findings and writes its artifacts.
    ///
    /// Returns the page summary, whose `results` carry the classified
    /// findings as they were recorded in the history.
    ///
    /// # Errors
    ///
    /// Any I/O failure aborts the call. Pages reported before the failure
    /// remain intact on disk.
    pub fn report_page(&mut self, results: Vec<Finding>, url: &str) -> Result<PageSummary> {
        let page = summarize_page(url, results);
        let date = Utc::now();

        self.state.append_statistics(page.statistics(date));
        self.state.append_history(page.results.clone());

        let view = PageView {
            date,
            page: &page,
            css: &self.css,
        };

        let report_path = self.output_directory.join(report_file_name(&page.hash));
        write_artifact(&report_path, &self.templates.page_report(&view))?;

        let entry = self.templates.index_entry(&view);
        let index_path = self.output_directory.join(INDEX_FILE);
        write_fragment(&mut self.index, &index_path, &entry)?;

        self.state.save(&self.output_directory)?;
        flush_index(&mut self.index, &index_path)?;

        debug!(
            url = url,
            hash = %page.hash,
            errors = page.counts.error,
            warnings = page.counts.warning,
            notices = page.counts.notice,
            "Reported page"
        );
        Ok(page)
    }

    /// Records an error reported by the checker.
    pub fn report_error(&self, message: &str) {
        error!(detail = message, "Checker reported an error");
    }

    /// Everything recorded in this session so far.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Flushes and closes the index handle.
    pub fn close(mut self) -> Result<()> {
        let index_path = self.output_directory.join(INDEX_FILE);
        flush_index(&mut self.index, &index_path)?;
        info!(pages = self.state.len(), "Closed report session");
        Ok(())
    }
}

impl<T> Drop for ReportSession<T> {
    fn drop(&mut self) {
        // A no-op after `close`, which leaves nothing buffered.
        if let Err(err) = self.index.flush() {
            warn!(error = %err, "Failed to flush index on drop");
        }
    }
}

pub(crate) fn create_output_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| ReportError::CreateOutputDir {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| ReportError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })
}

fn write_fragment(index: &mut BufWriter<File>, path: &Path, fragment: &str) -> Result<()> {
    index
        .write_all(fragment.as_bytes())
        .map_err(|source| ReportError::WriteArtifact {
            path: path.to_path_buf(),
            source,
        })
}

/// Pushes buffered fragments to disk. Called once per page, after the
/// snapshots, so a crash loses at most the page in flight.
fn flush_index(index: &mut BufWriter<File>, path: &Path) -> Result<()> {
    index.flush().map_err(|source| ReportError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })
}
