//! Cross-page aggregation of findings by diagnostic code.
//!
//! Aggregates are rebuilt from the full history on every call. The history is
//! the source of truth and may have been loaded from disk by a different
//! process than the one that recorded it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::identifier::{derive_id, report_url};
use crate::types::Finding;

/// Where one occurrence of a code was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeOccurrence {
    pub url: String,
    pub context: String,
    pub selector: String,
}

impl From<&Finding> for CodeOccurrence {
    fn from(finding: &Finding) -> Self {
        Self {
            url: finding.url.clone(),
            context: finding.context.clone(),
            selector: finding.selector.clone(),
        }
    }
}

/// All occurrences of one diagnostic code across every page.
///
/// `kind`, `level` and `message` are taken from the first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAggregate {
    #[serde(rename = "type")]
    pub kind: String,
    pub level: String,
    pub code: String,
    pub hash: String,
    pub report_url: String,
    pub message: String,
    /// Always equal to `urls.len()`.
    pub instances: usize,
    pub urls: Vec<CodeOccurrence>,
}

impl CodeAggregate {
    fn first(finding: &Finding) -> Self {
        let hash = derive_id(&finding.code);
        Self {
            kind: finding.kind.clone(),
            level: finding.level.clone(),
            code: finding.code.clone(),
            report_url: report_url(&hash),
            hash,
            message: finding.message.clone(),
            instances: 1,
            urls: vec![CodeOccurrence::from(finding)],
        }
    }

    fn push(&mut self, finding: &Finding) {
        self.instances += 1;
        self.urls.push(CodeOccurrence::from(finding));
    }
}

/// Groups every finding in `history` by exact code and ranks the groups by
/// number of instances, most frequent first.
///
/// The ranking is stable: codes with the same number of instances keep the
/// order in which they were first seen.
///
/// # Examples
///
/// ```
/// use audit_report_core::{Finding, aggregate_codes};
///
/// let history = vec![
///     vec![Finding::new("X", "error", "https://a.test/")],
///     vec![Finding::new("X", "error", "https://b.test/")],
/// ];
/// let codes = aggregate_codes(&history);
/// assert_eq!(codes.len(), 1);
/// assert_eq!(codes[0].instances, 2);
/// ```
pub fn aggregate_codes(history: &[Vec<Finding>]) -> Vec<CodeAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut codes: Vec<CodeAggregate> = Vec::new();

    for finding in history.iter().flatten() {
        match index.get(finding.code.as_str()) {
            Some(&slot) => codes[slot].push(finding),
            None => {
                index.insert(finding.code.as_str(), codes.len());
                codes.push(CodeAggregate::first(finding));
            }
        }
    }

    // `sort_by` is stable, which keeps first-seen order among ties.
    codes.sort_by(|a, b| b.instances.cmp(&a.instances));
    codes
}
