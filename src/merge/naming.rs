//! Output file naming.

/// Name used when the requested output name is blank.
pub const DEFAULT_OUTPUT_NAME: &str = "Merged_PDFs";

/// Characters that are not allowed in an output file name.
const FORBIDDEN: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Turn a user supplied name into a safe file stem.
///
/// Surrounding whitespace is trimmed, a blank name falls back to
/// [`DEFAULT_OUTPUT_NAME`], and every forbidden character becomes `_`.
/// Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use pdfstack::merge::sanitize;
///
/// assert_eq!(sanitize("  Q3 report  "), "Q3 report");
/// assert_eq!(sanitize("a/b:c"), "a_b_c");
/// assert_eq!(sanitize("   "), "Merged_PDFs");
/// ```
pub fn sanitize(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_OUTPUT_NAME.to_string();
    }

    trimmed
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect()
}
