//! Error and result types returned from the library functions.

use std::{error::Error as ErrorTrait, fmt::Display, io, process::ExitStatus};

use crate::constants::BuildConstant;

/// The main result type which is passed by the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main error type which is passed by the library inside the custom
/// [`Result`] type.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The PHP installation did not supply one of the build constants.
    ///
    /// This is fatal: the snippet cannot be generated without every
    /// constant.
    MissingBuildConstant(BuildConstant),
    /// A build constant was supplied but could not be interpreted.
    InvalidBuildConstant {
        /// The constant which was being read.
        constant: BuildConstant,
        /// The raw value supplied by PHP.
        value: String,
    },
    /// The PHP module API version is older than the minimum supported.
    UnsupportedApiVersion(i32),
    /// No PHP binary could be located.
    PhpNotFound,
    /// A command run while probing PHP exited unsuccessfully.
    Command {
        /// The command line which was run.
        command: String,
        /// The exit status of the command.
        status: ExitStatus,
        /// Anything the command printed to stderr.
        stderr: String,
    },
    /// A command run while probing PHP could not be spawned.
    Io(io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingBuildConstant(constant) => write!(
                f,
                "The PHP installation did not supply the build constant `{constant}`."
            ),
            Error::InvalidBuildConstant { constant, value } => {
                write!(f, "Invalid value for build constant `{constant}`: {value:?}")
            }
            Error::UnsupportedApiVersion(version) => write!(
                f,
                "The current version of PHP is not supported. Current PHP API version: {version}, requires at least {}",
                crate::probe::MIN_PHP_API_VER
            ),
            Error::PhpNotFound => write!(
                f,
                "Could not find PHP path. Please ensure `php` is in your PATH or the `PHP` environment variable is set."
            ),
            Error::Command {
                command,
                status,
                stderr,
            } => write!(f, "Failed to run `{command}` ({status}): {}", stderr.trim()),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl ErrorTrait for Error {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
