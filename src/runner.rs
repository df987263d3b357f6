//! Run orchestration.
//!
//! Decides, from the parsed command line and the state of standard
//! input, which sources to process and where each result goes, then
//! drives the read/transform/commit cycle one source at a time. Sources
//! are processed strictly in order, stdin first when it is piped; the
//! first fatal error ends the run with later files untouched.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::atomic_writer;
use crate::cli;
use crate::diff_renderer;
use crate::error::{Error, Result};
use crate::opt_parser::{self, ParsedArgs};
use crate::pattern;
use crate::substitute;

/// Label used in diff headers when the source is standard input.
const STDIN_LABEL: &str = "<stdin>";

/// Switch settings that drive processing, lifted out of the parsed
/// options once so the rest of the run reads named fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub backup: bool,
    pub first_only: bool,
    pub to_stdout: bool,
    pub as_patch: bool,
    pub pattern_from_file: bool,
}

impl Options {
    pub fn from_parsed(args: &ParsedArgs) -> Self {
        Options {
            backup: args.switch('b'),
            first_only: args.switch('o'),
            to_stdout: args.switch('s'),
            as_patch: args.switch('p'),
            pattern_from_file: args.switch('F'),
        }
    }
}

/// What one run will process, decided by the invocation mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub pattern_arg: String,
    pub substitute: String,
    pub files: Vec<PathBuf>,
    pub use_stdin: bool,
}

/// Apply the mode table: piped stdin crossed with the positional count.
///
/// With only a pattern given, the substitute is the empty string, which
/// deletes every match. That conflation of "no substitute" with
/// "substitute nothing" is deliberate, inherited behavior.
pub fn plan(non_options: &[String], stdin_piped: bool) -> Result<Plan> {
    match non_options {
        // Delete matches from piped input.
        [pattern] if stdin_piped => Ok(Plan {
            pattern_arg: pattern.clone(),
            substitute: String::new(),
            files: Vec::new(),
            use_stdin: true,
        }),
        // Substitute on piped input only.
        [pattern, substitute] if stdin_piped => Ok(Plan {
            pattern_arg: pattern.clone(),
            substitute: substitute.clone(),
            files: Vec::new(),
            use_stdin: true,
        }),
        // No piped input: the second positional is a file, delete from it.
        [pattern, file] => Ok(Plan {
            pattern_arg: pattern.clone(),
            substitute: String::new(),
            files: vec![PathBuf::from(file)],
            use_stdin: false,
        }),
        // Pattern, substitute, and files; piped input is processed too.
        [pattern, substitute, files @ ..] => Ok(Plan {
            pattern_arg: pattern.clone(),
            substitute: substitute.clone(),
            files: files.iter().map(PathBuf::from).collect(),
            use_stdin: stdin_piped,
        }),
        _ => Err(Error::Usage),
    }
}

/// A fully validated run: pattern compiled, template checked, targets
/// confirmed to exist as regular files.
pub struct Runner {
    opts: Options,
    regex: Regex,
    template: String,
    files: Vec<PathBuf>,
    use_stdin: bool,
}

impl Runner {
    pub fn new(opts: Options, plan: Plan) -> Result<Self> {
        // The pattern source is resolved exactly once, before any target
        // is touched; a missing -F file fails here.
        let regex = pattern::resolve(&plan.pattern_arg, opts.pattern_from_file)?;
        substitute::check_template(&regex, &plan.substitute)?;
        for file in &plan.files {
            if !file.is_file() {
                return Err(Error::MissingFile { path: file.clone() });
            }
        }
        Ok(Runner {
            opts,
            regex,
            template: plan.substitute,
            files: plan.files,
            use_stdin: plan.use_stdin,
        })
    }

    /// Process stdin (when piped) and then every named file, in order.
    pub fn run<R: Read, W: Write>(&self, mut input: R, out: &mut W) -> Result<()> {
        if self.use_stdin {
            let lines = read_stdin_lines(&mut input)?;
            self.process(lines, None, out)?;
        }
        for file in &self.files {
            let lines = read_file_lines(file)?;
            self.process(lines, Some(file), out)?;
        }
        Ok(())
    }

    /// Transform one source completely, then route the result.
    fn process<W: Write>(
        &self,
        original: Vec<String>,
        path: Option<&Path>,
        out: &mut W,
    ) -> Result<()> {
        let mut transformed = Vec::with_capacity(original.len());
        for line in &original {
            transformed.push(substitute::substitute_line(
                &self.regex,
                &self.template,
                self.opts.first_only,
                line,
            )?);
        }

        let label = path.map_or_else(|| STDIN_LABEL.to_string(), |p| p.display().to_string());
        tracing::debug!(source = %label, lines = original.len(), "transformed");

        if self.opts.to_stdout {
            write_lines(out, &transformed)
        } else if self.opts.as_patch {
            let diff = diff_renderer::render(&original, &transformed, &label, &label);
            out.write_all(diff.as_bytes())
                .map_err(|e| Error::io("<stdout>", e))
        } else if let Some(path) = path {
            atomic_writer::commit(path, &transformed, self.opts.backup)
        } else {
            write_lines(out, &transformed)
        }
    }
}

/// Parse `argv`, apply the mode table, and execute the run.
///
/// `stdin_piped` and the input/output streams are injected so the whole
/// orchestrator can be exercised without a terminal, a pipe, or a
/// process boundary. Help short-circuits everything else.
pub fn run<R: Read, W: Write>(
    argv: &[String],
    stdin_piped: bool,
    input: R,
    out: &mut W,
) -> Result<()> {
    let parsed = opt_parser::parse(cli::FLAGS, argv)?;
    if parsed.switch('h') {
        out.write_all(cli::help_text().as_bytes())
            .map_err(|e| Error::io("<stdout>", e))?;
        return Ok(());
    }

    let opts = Options::from_parsed(&parsed);
    let plan = plan(parsed.non_options(), stdin_piped)?;
    Runner::new(opts, plan)?.run(input, out)
}

/// Split a whole text into lines, each keeping its terminator.
fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

fn read_file_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(split_lines(&content))
}

/// Consume piped input in full, once.
fn read_stdin_lines<R: Read>(input: &mut R) -> Result<Vec<String>> {
    let mut content = String::new();
    input
        .read_to_string(&mut content)
        .map_err(|e| Error::io(STDIN_LABEL, e))?;
    Ok(split_lines(&content))
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        out.write_all(line.as_bytes())
            .map_err(|e| Error::io("<stdout>", e))?;
    }
    Ok(())
}
