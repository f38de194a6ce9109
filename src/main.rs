//! Command line entry point which prints the config snippet of a PHP installation.

use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use rustycfg::{
    probe::{host_constants, PhpBinary},
    write_config_snippet, BuildConstants,
};
use simple_logger::SimpleLogger;

#[derive(Parser)]
#[clap(
    about = "Dumps the Zend build constants of a PHP installation as Rust source.",
    version = env!("CARGO_PKG_VERSION")
)]
struct Args {
    /// Path to the PHP binary to probe. Defaults to the `PHP` environment
    /// variable, then to `php` in your PATH.
    #[clap(long)]
    php: Option<PathBuf>,
    /// Read the constants from the Zend headers rustycfg was compiled
    /// against. Requires the `headers` feature.
    #[clap(long, conflicts_with = "php")]
    headers: bool,
    /// Path to write the snippet to. Defaults to stdout.
    #[clap(short, long)]
    out: Option<PathBuf>,
    /// Increases logging verbosity. May be repeated.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn constants(&self) -> Result<&'static BuildConstants> {
        if self.headers {
            return header_constants();
        }

        let php = match &self.php {
            Some(path) => PhpBinary::new(path),
            None => PhpBinary::find()?,
        };
        host_constants(&php)
            .with_context(|| format!("Failed to probe `{}`", php.path().display()))
    }

    fn handle(self) -> Result<()> {
        let constants = self.constants()?;

        if let Some(out) = &self.out {
            let file = File::create(out)
                .with_context(|| format!("Failed to create `{}`", out.display()))?;
            write_config_snippet(constants, BufWriter::new(file))
                .with_context(|| "Failed to write config snippet to file")?;
            log::info!("Wrote config snippet to `{}`", out.display());
        } else {
            write_config_snippet(constants, io::stdout().lock())
                .with_context(|| "Failed to write config snippet to stdout")?;
        }

        Ok(())
    }
}

#[cfg(feature = "headers")]
fn header_constants() -> Result<&'static BuildConstants> {
    host_constants(rustycfg::probe::Headers)
        .with_context(|| "Failed to read constants from Zend headers")
}

#[cfg(not(feature = "headers"))]
fn header_constants() -> Result<&'static BuildConstants> {
    anyhow::bail!("rustycfg was built without the `headers` feature.")
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new().with_level(args.level()).env().init()?;
    args.handle()
}
