//! Error taxonomy for sug
//!
//! Every fatal condition is a variant here. Nothing is recovered mid-run;
//! the entry point translates a variant into a diagnostic and an exit
//! code. Cross-device rename failures are not part of this taxonomy: the
//! committer detects and consumes them internally.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An undeclared flag character appeared on the command line.
    #[error("flag `{0}' is not recognised")]
    UnknownFlag(char),

    /// A value-taking flag had nothing after it in its token.
    #[error("flag `{0}' expects argument(s)")]
    FlagNeedsArguments(char),

    /// The positional arguments match no supported invocation mode.
    #[error("malformed invocation")]
    Usage,

    #[error("invalid regexp: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The substitute expression references a capture group the pattern
    /// does not define.
    #[error("invalid backreference `{0}' in substitute expression")]
    InvalidSubstitution(String),

    /// A required file does not exist or is not a regular file.
    #[error("cannot stat file `{}'", .path.display())]
    MissingFile { path: PathBuf },

    #[error("{}: `{}'", .source, .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::UnknownFlag(_) | Error::FlagNeedsArguments(_) | Error::Usage => 4,
            Error::InvalidPattern(_) | Error::InvalidSubstitution(_) => 2,
            Error::MissingFile { .. } => 3,
            Error::Io { .. } => 1,
        }
    }

    /// True for errors reported through the usage path.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::UnknownFlag(_) | Error::FlagNeedsArguments(_) | Error::Usage
        )
    }
}
