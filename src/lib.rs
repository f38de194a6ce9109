//! Dumps the build constants of a PHP installation as Rust source.
//!
//! The generated snippet declares `ZEND_MODULE_API_NO`,
//! `ZEND_MODULE_BUILD_ID`, `ZEND_ZTS`, `ZEND_DEBUG` and
//! `ZEND_CALL_FRAME_SLOT`, along with the `zend_long`, `zend_ulong` and
//! `zend_double` type aliases sized for that installation.
//!
//! ```no_run
//! use rustycfg::{generate_config_snippet, probe::{host_constants, PhpBinary}};
//!
//! # fn main() -> rustycfg::error::Result<()> {
//! let constants = host_constants(PhpBinary::find()?)?;
//! print!("{}", generate_config_snippet(constants));
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]

pub mod constants;
pub mod error;
pub mod probe;
pub mod snippet;

pub use constants::{BuildConstant, BuildConstants, BuildConstantsBuilder};
pub use error::{Error, Result};
pub use snippet::{generate_config_snippet, write_config_snippet, ConfigSnippet};
