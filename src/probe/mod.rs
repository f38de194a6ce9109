//! Discovers the build constants of a PHP installation.
//!
//! A [`Probe`] reads the values the Zend headers define at compile time from
//! a PHP installation, once at startup. The resulting [`BuildConstants`] are
//! passed to the snippet generator explicitly.

#[cfg(feature = "headers")]
mod headers;
mod info;
mod php;

#[cfg(feature = "headers")]
pub use headers::Headers;
pub use info::PhpInfo;
pub use php::PhpBinary;

use once_cell::sync::OnceCell;

use crate::{
    constants::BuildConstants,
    error::{Error, Result},
};

/// Oldest supported module API number (PHP 7.2, the first with
/// `PHP_FLOAT_DIG`).
pub const MIN_PHP_API_VER: i32 = 20170718;

/// Module API number of PHP 8.0, which added a word to `zend_execute_data`.
pub const PHP_80_API_VER: i32 = 20200930;

/// Size of a `zval` in bytes, on both 32 and 64 bit platforms.
const ZVAL_SIZE: u32 = 16;

/// A source of build constants.
pub trait Probe {
    /// Reads every build constant from the PHP installation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBuildConstant`] if the installation does not
    /// supply one of the constants, or another [`Error`] if the installation
    /// could not be queried.
    fn probe(&self) -> Result<BuildConstants>;
}

impl<P: Probe + ?Sized> Probe for &P {
    fn probe(&self) -> Result<BuildConstants> {
        (**self).probe()
    }
}

static HOST: OnceCell<BuildConstants> = OnceCell::new();

/// Returns the build constants of the host PHP installation, running `probe`
/// the first time this is called in the process.
///
/// Later calls return the cached record and do not run their probe. A failed
/// probe is not cached.
///
/// # Errors
///
/// Returns the error of the probe if it fails.
pub fn host_constants<P: Probe>(probe: P) -> Result<&'static BuildConstants> {
    HOST.get_or_try_init(|| {
        log::debug!("Probing PHP build constants");
        probe.probe()
    })
}

/// Ensures the module API version is one this crate understands.
pub(crate) fn check_php_version(version: i32) -> Result<()> {
    if version < MIN_PHP_API_VER {
        return Err(Error::UnsupportedApiVersion(version));
    }
    Ok(())
}

/// Computes `ZEND_CALL_FRAME_SLOT` for a PHP build.
///
/// `zend_execute_data` holds one `zval` and seven pointer sized words,
/// eight from PHP 8.0 onwards. Both sizes are rounded to the 8 byte
/// allocator alignment before dividing.
pub fn call_frame_slot(module_api_no: i32, pointer_size: u32) -> i32 {
    let words = if module_api_no >= PHP_80_API_VER { 8 } else { 7 };
    let execute_data = aligned(words * pointer_size + ZVAL_SIZE);
    let zval = aligned(ZVAL_SIZE);
    // Bounded by the word counts above, always fits.
    ((execute_data + zval - 1) / zval) as i32
}

fn aligned(size: u32) -> u32 {
    (size + 7) & !7
}
