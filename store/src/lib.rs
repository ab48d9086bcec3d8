//! Run state and configuration persistence for accessibility audit reports.
//!
//! # Quick start
//!
//! ```no_run
//! use audit_report_core::summarize_page;
//! use audit_report_store::{ReporterConfig, RunState};
//!
//! let config = ReporterConfig::new("reports");
//! let mut state = RunState::new();
//!
//! let page = summarize_page("https://example.com/", Vec::new());
//! state.append_statistics(page.statistics(chrono::Utc::now()));
//! state.append_history(page.results);
//! state.save(&config.output_directory).unwrap();
//!
//! // Later, possibly in another process
//! let history = RunState::load_history(&config.output_directory).unwrap();
//! assert_eq!(history.len(), 1);
//! ```

mod config;
mod error;
mod state;

pub use config::ReporterConfig;
pub use error::{Result, StoreError};
pub use state::{RESULTS_FILE, RunState, STATISTICS_FILE};
