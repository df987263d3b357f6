//! Pattern resolution.
//!
//! The first positional argument is either a regular expression or, with
//! the read-from-file switch, a path to a file whose contents are the
//! expression. The file is read verbatim; since lines carry their
//! terminators through the whole pipeline, a trailing newline in a
//! pattern file anchors the match at end of line.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{Error, Result};

/// Compile the pattern argument into a regex, reading it from a file
/// first when `from_file` is set.
///
/// A missing or non-regular pattern file is a distinct failure from a
/// pattern the engine rejects.
pub fn resolve(pattern_or_path: &str, from_file: bool) -> Result<Regex> {
    let source = if from_file {
        let path = Path::new(pattern_or_path);
        if !path.is_file() {
            return Err(Error::MissingFile { path: path.to_path_buf() });
        }
        fs::read_to_string(path).map_err(|e| Error::io(path, e))?
    } else {
        pattern_or_path.to_string()
    };

    Ok(Regex::new(&source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_literal_pattern_compiles() {
        let re = resolve("gu+ards?", false).unwrap();
        assert!(re.is_match("guards"));
    }

    #[test]
    fn test_malformed_pattern_is_invalid_pattern() {
        let err = resolve("gu(ards", false).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_pattern_read_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pattern.re");
        fs::write(&path, "gu(ard|ild)").unwrap();

        let re = resolve(path.to_str().unwrap(), true).unwrap();
        assert!(re.is_match("guild"));
    }

    #[test]
    fn test_missing_pattern_file_is_distinct_from_bad_pattern() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.re");

        let err = resolve(path.to_str().unwrap(), true).unwrap_err();
        assert!(matches!(err, Error::MissingFile { .. }));
    }

    #[test]
    fn test_directory_as_pattern_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = resolve(dir.path().to_str().unwrap(), true).unwrap_err();
        assert!(matches!(err, Error::MissingFile { .. }));
    }

    #[test]
    fn test_malformed_pattern_file_content_is_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pattern.re");
        fs::write(&path, "gu(ards").unwrap();

        let err = resolve(path.to_str().unwrap(), true).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
