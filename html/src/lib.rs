//! Static HTML reports for accessibility audit results.
//!
//! Two entry points:
//!
//! - [`ReportSession`] — opened once per run; each
//!   [`report_page`](ReportSession::report_page) call writes a page report,
//!   appends to `index.html` and refreshes `statistics.json` and
//!   `results.json`.
//! - [`write_codes_report`] — reads `results.json` and writes
//!   `index-codes.html` plus one report per diagnostic code.
//!
//! Every artifact lands in [`ReporterConfig::output_directory`]. Page and
//! code reports are named by [`derive_id`] of the URL or code.
//!
//! Rendering goes through the [`Templates`] trait; [`BuiltinTemplates`] is
//! used unless another implementation is supplied.
//!
//! [`ReporterConfig::output_directory`]: audit_report_store::ReporterConfig::output_directory
//! [`derive_id`]: audit_report_core::derive_id

mod codes;
mod error;
mod session;
pub mod templates;

pub use codes::{CODES_INDEX_FILE, write_codes_report, write_codes_report_with};
pub use error::{ReportError, Result};
pub use session::{INDEX_FILE, ReportSession};
pub use templates::{BuiltinTemplates, Templates};
