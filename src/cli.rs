//! Command-line surface: the flag table, usage, and help text.
//!
//! The help text is assembled from the flag declarations, so a flag's
//! description lives in exactly one place.

use crate::opt_parser::FlagSpec;

pub const PROGRAM: &str = "sug";

pub const USAGE: &str = "usage: sug [-bhopsF] (REGEXP|FILE) SUBSTITUTE FILES...";

/// The complete flag set, in help-display order.
pub const FLAGS: &[FlagSpec] = &[
    FlagSpec { name: 'b', takes_value: false, help: "back up files before overwriting" },
    FlagSpec { name: 'h', takes_value: false, help: "show this help text" },
    FlagSpec { name: 'o', takes_value: false, help: "substitute only the first occurrence on every line" },
    FlagSpec { name: 'p', takes_value: false, help: "generate a patch from the results, write to stdout" },
    FlagSpec { name: 's', takes_value: false, help: "write changes to stdout" },
    FlagSpec { name: 'F', takes_value: false, help: "read the regexp from a file" },
];

/// Help text assembled from the flag table.
pub fn help_text() -> String {
    let mut out = String::new();
    out.push_str(USAGE);
    out.push_str("\n\nOptions:\n");
    for flag in FLAGS {
        out.push_str(&format!("    -{} {}\n", flag.name, flag.help));
    }
    out.push_str("\nArguments:\n");
    out.push_str("    REGEXP: the expression to apply to input\n");
    out.push_str("    FILE: with -F, a file whose contents are used as the regexp\n");
    out.push_str("    SUBSTITUTE: the replacement for every match\n");
    out.push_str("    FILES: the regular files to operate on, in place\n");
    out
}
