//! Code-centric report built from the persisted history.

use audit_report_core::{CodeAggregate, aggregate_codes, report_file_name};
use audit_report_store::{ReporterConfig, RunState};
use chrono::Utc;
use tracing::{debug, info};

use crate::error::Result;
use crate::session::{create_output_dir, write_artifact};
use crate::templates::{BuiltinTemplates, CodeReportView, CodesIndexView, Templates, load_stylesheet};

/// File name of the ranked code index.
pub const CODES_INDEX_FILE: &str = "index-codes.html";

/// Writes the codes report with [`BuiltinTemplates`].
pub fn write_codes_report(config: &ReporterConfig) -> Result<Vec<CodeAggregate>> {
    write_codes_report_with(config, &BuiltinTemplates)
}

/// Regroups every finding in `results.json` by diagnostic code and writes
/// `index-codes.html` plus one report per code.
///
/// Reads only the persisted history, so it can run in a different process
/// from the session that recorded the pages. Existing artifacts are
/// overwritten. Returns the aggregates in ranked order.
///
/// # Errors
///
/// Fails if the output directory cannot be created, `results.json` is
/// missing or unreadable, or an artifact cannot be written.
pub fn write_codes_report_with<T: Templates>(
    config: &ReporterConfig,
    templates: &T,
) -> Result<Vec<CodeAggregate>> {
    let dir = &config.output_directory;
    create_output_dir(dir)?;

    let history = RunState::load_history(dir)?;
    let codes = aggregate_codes(&history);
    let css = load_stylesheet(config)?;
    let date = Utc::now();

    let index = templates.codes_index(&CodesIndexView {
        date,
        title: config.title.as_deref(),
        codes: &codes,
        css: &css,
    });
    write_artifact(&dir.join(CODES_INDEX_FILE), &index)?;

    for code in &codes {
        let report = templates.code_report(&CodeReportView {
            date,
            code,
            css: &css,
        });
        write_artifact(&dir.join(report_file_name(&code.hash)), &report)?;
        debug!(code = %code.code, instances = code.instances, "Wrote code report");
    }

    info!(
        pages = history.len(),
        codes = codes.len(),
        "Wrote codes report"
    );
    Ok(codes)
}
