//! Severity classification and guideline sub-code extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Finding, Severity};

static GUIDELINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Principle.+Guideline").expect("static regex must compile"));

/// Index of the dot-delimited segment holding the comma-separated sub-codes.
const SUB_CODE_SEGMENT: usize = 4;

/// Outcome of classifying one finding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    /// `None` when the finding's level is not a known bucket.
    pub severity: Option<Severity>,
    pub sub_codes: Vec<String>,
}

/// Extracts the guideline sub-codes embedded in a diagnostic code.
///
/// Codes shaped like `Standard.PrincipleN.GuidelineN_N.N_N_N.A,B` carry their
/// sub-codes in the fifth segment. Codes without that shape, including
/// guideline codes that stop short of a fifth segment, have none.
///
/// # Examples
///
/// ```
/// use audit_report_core::extract_sub_codes;
///
/// assert_eq!(
///     extract_sub_codes("WCAG2AA.Principle1.Guideline1_3.1_3_1.H42,H63"),
///     vec!["H42", "H63"]
/// );
/// assert!(extract_sub_codes("SimpleCode").is_empty());
/// ```
pub fn extract_sub_codes(code: &str) -> Vec<String> {
    if !GUIDELINE_CODE_RE.is_match(code) {
        return Vec::new();
    }
    code.split('.')
        .nth(SUB_CODE_SEGMENT)
        .map(|segment| segment.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

/// Classifies `finding` and records its sub-codes in
/// [`Finding::note_codes`].
pub fn classify(finding: &mut Finding) -> Classification {
    let sub_codes = extract_sub_codes(&finding.code);
    finding.note_codes = sub_codes.clone();
    Classification {
        severity: finding.severity(),
        sub_codes,
    }
}
