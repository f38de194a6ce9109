use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    constants::BuildConstants,
    error::{Error, Result},
};

use super::{PhpInfo, Probe};

/// Prints the constants `php -i` does not report, in the same
/// `key => value` shape.
const PROBE_SCRIPT: &str = "echo 'PHP_INT_SIZE => ', PHP_INT_SIZE, PHP_EOL; \
    if (defined('PHP_FLOAT_DIG')) { echo 'PHP_FLOAT_DIG => ', PHP_FLOAT_DIG, PHP_EOL; }";

/// Probes a PHP command line binary.
#[derive(Debug, Clone)]
pub struct PhpBinary {
    path: PathBuf,
}

impl PhpBinary {
    /// Uses the PHP binary at the given path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Locates PHP, preferring the `PHP` environment variable over the
    /// `php` found in `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PhpNotFound`] if neither is available.
    pub fn find() -> Result<Self> {
        if let Some(env) = std::env::var_os("PHP") {
            return Ok(Self::new(env));
        }

        find_executable("php")
            .map(Self::new)
            .ok_or(Error::PhpNotFound)
    }

    /// Path of the PHP binary.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `php -i` followed by the probe script and collects both outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if either command cannot be run or fails.
    pub fn info(&self) -> Result<PhpInfo> {
        let mut info = PhpInfo::new(self.exec(&["-i"])?);
        info.extend(&self.exec(&["-r", PROBE_SCRIPT])?);
        Ok(info)
    }

    /// Executes PHP with the given arguments, returning stdout.
    fn exec(&self, args: &[&str]) -> Result<String> {
        log::debug!("Running `{}` with {:?}", self.path.display(), args);
        let out = Command::new(&self.path).args(args).output()?;
        if !out.status.success() {
            return Err(Error::Command {
                command: format!("{} {}", self.path.display(), args.join(" ")),
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

impl Probe for PhpBinary {
    fn probe(&self) -> Result<BuildConstants> {
        log::info!("Reading build constants from `{}`", self.path.display());
        self.info()?.build_constants()
    }
}

fn find_executable(name: &str) -> Option<PathBuf> {
    cfg_if::cfg_if! {
        if #[cfg(windows)] {
            const WHICH: &str = "where";
        } else {
            const WHICH: &str = "which";
        }
    }

    let cmd = Command::new(WHICH).arg(name).output().ok()?;
    if !cmd.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&cmd.stdout);
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary() {
        let php = PhpBinary::new("/nonexistent/rustycfg/php");
        assert_eq!(php.path(), Path::new("/nonexistent/rustycfg/php"));
        assert!(matches!(php.probe(), Err(Error::Io(_))));
    }

    #[test]
    fn test_probe_script_shape() {
        assert!(PROBE_SCRIPT.contains("'PHP_INT_SIZE => '"));
        assert!(PROBE_SCRIPT.contains("'PHP_FLOAT_DIG => '"));
        assert!(!PROBE_SCRIPT.contains('\n'));
    }
}
