//! Line substitution.
//!
//! One line in, one line out. The line is transformed with its
//! terminator intact, so patterns may match or consume the newline
//! itself. Replacement templates use the regex engine's expansion
//! syntax: `$1`, `${name}`, `$$` for a literal dollar sign.

use regex::Regex;

use crate::error::{Error, Result};

/// Apply the substitution to one line.
///
/// With `first_only` set, at most one non-overlapping match is replaced;
/// otherwise all of them are. Pure: nothing besides the inputs is
/// observed or mutated.
pub fn substitute_line(re: &Regex, template: &str, first_only: bool, line: &str) -> Result<String> {
    check_template(re, template)?;
    let replaced = if first_only {
        re.replace(line, template)
    } else {
        re.replace_all(line, template)
    };
    Ok(replaced.into_owned())
}

/// Verify that every capture-group reference in `template` resolves
/// against `re`.
///
/// The regex engine expands a reference to a nonexistent group to the
/// empty string; this check turns such templates into a hard error
/// before any line is touched. The reference grammar mirrors the
/// engine's: after `$`, the longest run of `[0-9A-Za-z_]` characters is
/// the group name (braced forms excepted), and an all-digit name is a
/// group index.
pub fn check_template(re: &Regex, template: &str) -> Result<()> {
    let mut rest = template;
    while let Some(dollar) = rest.find('$') {
        rest = &rest[dollar + 1..];
        if let Some(after) = rest.strip_prefix('$') {
            // `$$` is a literal dollar sign.
            rest = after;
            continue;
        }
        if let Some(after) = rest.strip_prefix('{') {
            match after.find('}') {
                Some(end) => {
                    let name = &after[..end];
                    // A braced form with anything but name characters is
                    // not a reference; the engine keeps it literal.
                    if !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        check_group(re, name)?;
                    }
                    rest = &after[end + 1..];
                }
                // An unterminated brace is passed through literally.
                None => break,
            }
            continue;
        }
        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(rest.len());
        if end > 0 {
            check_group(re, &rest[..end])?;
        }
        rest = &rest[end..];
    }
    Ok(())
}

fn check_group(re: &Regex, name: &str) -> Result<()> {
    let resolves = match name.parse::<usize>() {
        Ok(index) => index < re.captures_len(),
        Err(_) => re.capture_names().flatten().any(|n| n == name),
    };
    if resolves {
        Ok(())
    } else {
        Err(Error::InvalidSubstitution(format!("${name}")))
    }
}
