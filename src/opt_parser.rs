//! Unix-style minimalistic option parser.
//!
//! Flags are introduced by `-` and are one character long. Switch flags
//! are booleans and may be combined in a single token (`-bs`). A
//! value-taking flag consumes the rest of its token as a comma-separated
//! value list (`-lfoo,bar`). The first token without a leading `-`, or
//! the `--` marker, ends flag parsing; everything from there on (the
//! marker excluded) is a non-option argument.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

const END_OF_FLAGS_MARKER: &str = "--";
const FLAG_ARG_SEPARATOR: char = ',';

/// Declaration of a single flag.
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    pub name: char,
    /// True when the flag consumes the remainder of its token as values.
    pub takes_value: bool,
    /// One-line description, used to build the help text.
    pub help: &'static str,
}

/// Outcome of a parse: switch states, flag values, trailing arguments.
///
/// Every declared switch is present, `false` unless seen. Value-taking
/// flags are present only when they appeared on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    switches: BTreeMap<char, bool>,
    values: BTreeMap<char, Vec<String>>,
    non_options: Vec<String>,
}

impl ParsedArgs {
    /// State of a declared switch flag.
    pub fn switch(&self, name: char) -> bool {
        self.switches.get(&name).copied().unwrap_or(false)
    }

    /// Values of a value-taking flag, if it was given.
    pub fn values(&self, name: char) -> Option<&[String]> {
        self.values.get(&name).map(|v| v.as_slice())
    }

    pub fn non_options(&self) -> &[String] {
        &self.non_options
    }
}

/// Parse `argv` against the declared flags.
///
/// Pure: the same inputs always yield the same result, and no state
/// survives between calls.
pub fn parse(specs: &[FlagSpec], argv: &[String]) -> Result<ParsedArgs> {
    let mut parsed = ParsedArgs::default();
    for spec in specs.iter().filter(|s| !s.takes_value) {
        parsed.switches.insert(spec.name, false);
    }

    let is_switch = |c: char| specs.iter().any(|s| s.name == c && !s.takes_value);
    let takes_value = |c: char| specs.iter().any(|s| s.name == c && s.takes_value);

    for (i, arg) in argv.iter().enumerate() {
        // The first non-option terminates argument parsing, and so does
        // the end-of-flags marker.
        if !arg.starts_with('-') {
            parsed.non_options = argv[i..].to_vec();
            break;
        }
        if arg == END_OF_FLAGS_MARKER {
            parsed.non_options = argv[i + 1..].to_vec();
            break;
        }

        let body = &arg[1..];
        if body.is_empty() {
            // A bare `-` is an empty flag, rejected like an unknown one.
            return Err(Error::UnknownFlag('-'));
        }

        let mut valued: Option<(char, &str)> = None;
        for (pos, c) in body.char_indices() {
            if is_switch(c) {
                parsed.switches.insert(c, true);
            } else if takes_value(c) {
                // The rest of the token belongs to this flag.
                valued = Some((c, &body[pos + c.len_utf8()..]));
                break;
            } else {
                return Err(Error::UnknownFlag(c));
            }
        }

        if let Some((flag, raw)) = valued {
            if raw.is_empty() {
                return Err(Error::FlagNeedsArguments(flag));
            }
            let values = raw.split(FLAG_ARG_SEPARATOR).map(str::to_string).collect();
            parsed.values.insert(flag, values);
        }
    }

    Ok(parsed)
}
