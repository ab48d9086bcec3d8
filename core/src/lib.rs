//! Aggregation and deduplication engine for accessibility audit reports.
//!
//! This crate holds the pure logic of the reporter:
//!
//! - [`derive_id`] — stable SHA-1 identifiers for report pages.
//! - [`classify`] — severity bucket and guideline sub-codes of a [`Finding`].
//! - [`summarize_page`] — per-page counts, percentages and sub-codes.
//! - [`aggregate_codes`] — cross-page grouping of findings by diagnostic code,
//!   ranked by frequency.
//!
//! Persistence lives in `audit-report-store` and HTML output in
//! `audit-report-html`.
//!
//! # Example
//!
//! ```
//! use audit_report_core::*;
//!
//! let url = "https://example.com/";
//! let page = summarize_page(url, vec![
//!     Finding::new("WCAG2AA.Principle1.Guideline1_1.1_1_1.H37", "error", url),
//!     Finding::new("WCAG2AA.Principle1.Guideline1_1.1_1_1.H37", "error", url),
//! ]);
//! assert_eq!(page.counts.error, 2);
//! assert_eq!(page.note_codes, vec!["H37"]);
//!
//! let codes = aggregate_codes(&[page.results]);
//! assert_eq!(codes[0].instances, 2);
//! ```

pub mod classify;
pub mod codes;
pub mod identifier;
pub mod page;
mod types;

pub use classify::{Classification, classify, extract_sub_codes};
pub use codes::{CodeAggregate, CodeOccurrence, aggregate_codes};
pub use identifier::{derive_id, report_file_name, report_url};
pub use page::{PageStatistics, PageSummary, SeverityCounts, summarize_page};
pub use types::*;
