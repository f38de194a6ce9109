use std::{env, ffi::OsString, path::PathBuf, process::Command};

use anyhow::{bail, Context, Result};

/// Runs `php-config` with one argument, returning the stdout.
fn php_config(arg: &str) -> Result<String> {
    let php_config = env::var_os("PHP_CONFIG").unwrap_or_else(|| OsString::from("php-config"));
    let cmd = Command::new(&php_config)
        .arg(arg)
        .output()
        .context("Failed to run `php-config`")?;
    let stdout = String::from_utf8_lossy(&cmd.stdout);
    if !cmd.status.success() {
        let stderr = String::from_utf8_lossy(&cmd.stderr);
        bail!("Failed to run `php-config`: {} {}", stdout, stderr);
    }
    Ok(stdout.to_string())
}

fn get_includes() -> Result<Vec<PathBuf>> {
    Ok(php_config("--includes")?
        .split_whitespace()
        .map(|s| s.trim_start_matches("-I"))
        .map(PathBuf::from)
        .collect())
}

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=src/wrapper.h");
    println!("cargo:rerun-if-changed=src/wrapper.c");
    println!("cargo:rerun-if-env-changed=PHP_CONFIG");

    // The shim is only needed to read constants straight from the headers.
    if env::var_os("CARGO_FEATURE_HEADERS").is_none() {
        return Ok(());
    }

    let includes = get_includes()?;
    cc::Build::new()
        .file("src/wrapper.c")
        .includes(&includes)
        .try_compile("wrapper")
        .context("Failed to compile rustycfg C interface")?;

    Ok(())
}
