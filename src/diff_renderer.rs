//! Unified diff rendering.
//!
//! Turns a before/after pair of line sequences into the standard unified
//! diff text, with caller-supplied header labels. Pure: no side effects
//! besides the returned string.

use similar::TextDiff;

/// Render a unified diff between two line sequences.
///
/// `before_label` and `after_label` become the `---`/`+++` file headers.
/// Identical sequences render as the empty string.
pub fn render(
    original: &[String],
    transformed: &[String],
    before_label: &str,
    after_label: &str,
) -> String {
    if original == transformed {
        return String::new();
    }

    let old = original.concat();
    let new = transformed.concat();
    let diff = TextDiff::from_lines(&old, &new);
    diff.unified_diff()
        .header(before_label, after_label)
        .to_string()
}
