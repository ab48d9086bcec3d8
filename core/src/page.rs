//! Per-page aggregation: severity counts, percentages and sub-codes.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::identifier::{derive_id, report_url};
use crate::types::{Finding, Severity};

/// Number of findings in each severity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub error: usize,
    pub warning: usize,
    pub notice: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Notice => self.notice += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Notice => self.notice,
        }
    }

    /// Number of classified findings.
    pub fn classified(&self) -> usize {
        self.error + self.warning + self.notice
    }

    /// Share of `severity` among classified findings, as an unrounded
    /// percentage.
    ///
    /// The denominator is floored at 1, so a page with nothing classified
    /// reports 0% everywhere.
    pub fn percentage(&self, severity: Severity) -> f64 {
        let total = self.classified().max(1);
        (self.get(severity) as f64 * 100.0) / total as f64
    }
}

/// Append-only statistics row written to `statistics.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStatistics {
    pub url: String,
    pub hash: String,
    pub date: DateTime<Utc>,
    pub error_count: usize,
    pub warning_count: usize,
    pub notice_count: usize,
}

/// Aggregated view of one page's findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub url: String,
    /// Identifier of the page's report, see [`derive_id`].
    pub hash: String,
    /// Link to the page's report relative to the output directory.
    pub report_url: String,
    pub counts: SeverityCounts,
    /// Distinct guideline sub-codes across all findings, sorted.
    pub note_codes: Vec<String>,
    /// The classified findings, in input order.
    pub results: Vec<Finding>,
}

impl PageSummary {
    pub fn error_percentage(&self) -> f64 {
        self.counts.percentage(Severity::Error)
    }

    pub fn warning_percentage(&self) -> f64 {
        self.counts.percentage(Severity::Warning)
    }

    pub fn notice_percentage(&self) -> f64 {
        self.counts.percentage(Severity::Notice)
    }

    /// Builds the statistics row for this page, stamped with `date`.
    pub fn statistics(&self, date: DateTime<Utc>) -> PageStatistics {
        PageStatistics {
            url: self.url.clone(),
            hash: self.hash.clone(),
            date,
            error_count: self.counts.error,
            warning_count: self.counts.warning,
            notice_count: self.counts.notice,
        }
    }
}

/// Classifies every finding of one page and aggregates the results.
///
/// Findings without a `url` are stamped with the page URL so the persisted
/// history can attribute them later.
///
/// # Examples
///
/// ```
/// use audit_report_core::{Finding, summarize_page};
///
/// let url = "https://example.com/";
/// let summary = summarize_page(url, vec![
///     Finding::new("A", "error", url),
///     Finding::new("B", "error", url),
///     Finding::new("C", "warning", url),
/// ]);
/// assert_eq!(summary.counts.error, 2);
/// assert_eq!(summary.counts.warning, 1);
/// assert_eq!(summary.notice_percentage(), 0.0);
/// ```
pub fn summarize_page(url: &str, mut results: Vec<Finding>) -> PageSummary {
    let hash = derive_id(url);
    let mut counts = SeverityCounts::default();
    let mut note_codes = BTreeSet::new();

    for finding in &mut results {
        if finding.url.is_empty() {
            finding.url = url.to_string();
        }
        let classification = classify(finding);
        if let Some(severity) = classification.severity {
            counts.record(severity);
        }
        note_codes.extend(classification.sub_codes);
    }

    PageSummary {
        url: url.to_string(),
        report_url: report_url(&hash),
        hash,
        counts,
        note_codes: note_codes.into_iter().collect(),
        results,
    }
}
