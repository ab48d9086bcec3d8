//! Stable report identifiers.
//!
//! Every report page is named after the SHA-1 digest of the string it is
//! about: the page URL for per-page reports, the diagnostic code for per-code
//! reports. Identifiers are 40 lowercase hex characters and therefore safe to
//! use as file names on every platform.

use sha1::{Digest, Sha1};

/// Returns the lowercase hex SHA-1 digest of `input`'s UTF-8 bytes.
///
/// # Examples
///
/// ```
/// use audit_report_core::derive_id;
///
/// assert_eq!(derive_id("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
/// assert_eq!(derive_id("").len(), 40);
/// ```
pub fn derive_id(input: &str) -> String {
    let hash = Sha1::digest(input.as_bytes());
    format!("{:x}", hash)
}

/// File name of the report page for `id`.
pub fn report_file_name(id: &str) -> String {
    format!("{id}.html")
}

/// Relative link to the report page for `id`, as used inside index pages.
pub fn report_url(id: &str) -> String {
    format!("./{}", report_file_name(id))
}
