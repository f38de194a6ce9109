use std::str::FromStr;

use crate::{
    constants::{BuildConstant, BuildConstants},
    error::{Error, Result},
};

use super::{call_frame_slot, check_php_version};

/// The `key => value` text printed by `php -i`.
///
/// The probe script run by [`PhpBinary`](super::PhpBinary) prints its
/// values in the same shape, so both outputs can be read from one
/// [`PhpInfo`].
#[derive(Debug, Clone, Default)]
pub struct PhpInfo(String);

impl PhpInfo {
    /// Wraps the output of `php -i`.
    pub fn new<T: Into<String>>(output: T) -> Self {
        Self(output.into())
    }

    /// Appends more `key => value` lines.
    pub fn extend(&mut self, output: &str) {
        if !self.0.is_empty() && !self.0.ends_with('\n') {
            self.0.push('\n');
        }
        self.0.push_str(output);
    }

    /// The module API number, from the `PHP Extension` key.
    pub fn module_api_no(&self) -> Result<i32> {
        self.parse("PHP Extension", BuildConstant::ModuleApiNo)
    }

    /// The module build id, e.g. `API20200930,NTS`.
    pub fn build_id(&self) -> Result<&str> {
        self.require("PHP Extension Build", BuildConstant::BuildId)
    }

    /// Whether PHP was built with thread safety.
    pub fn thread_safety(&self) -> Result<bool> {
        Ok(self.require("Thread Safety", BuildConstant::ThreadSafe)? == "enabled")
    }

    /// Whether PHP is a debug build.
    pub fn debug(&self) -> Result<bool> {
        Ok(self.require("Debug Build", BuildConstant::DebugBuild)? == "yes")
    }

    /// Size of `zend_long` in bytes.
    pub fn int_size(&self) -> Result<u32> {
        let size: u32 = self.parse("PHP_INT_SIZE", BuildConstant::LongBits)?;
        match size {
            4 | 8 => Ok(size),
            _ => Err(Error::InvalidBuildConstant {
                constant: BuildConstant::LongBits,
                value: size.to_string(),
            }),
        }
    }

    /// Width of `double` in bits, derived from its decimal precision.
    pub fn double_bits(&self) -> Result<u32> {
        let dig: u32 = self.parse("PHP_FLOAT_DIG", BuildConstant::DoubleBits)?;
        match dig {
            15 => Ok(64),
            6 => Ok(32),
            _ => Err(Error::InvalidBuildConstant {
                constant: BuildConstant::DoubleBits,
                value: dig.to_string(),
            }),
        }
    }

    /// Collects every build constant.
    ///
    /// # Errors
    ///
    /// Fails if a key is missing or malformed, or if the PHP version is too
    /// old for the call frame slot to be derived.
    pub fn build_constants(&self) -> Result<BuildConstants> {
        let module_api_no = self.module_api_no()?;
        check_php_version(module_api_no)?;

        // Read in snippet order so the first missing constant is reported.
        let builder = BuildConstants::builder()
            .module_api_no(module_api_no)
            .build_id(self.build_id()?)
            .thread_safe(self.thread_safety()?)
            .debug_build(self.debug()?);
        let int_size = self.int_size()?;

        builder
            .call_frame_slot_size(call_frame_slot(module_api_no, int_size))
            .long_bits(int_size * 8)
            .ulong_bits(int_size * 8)
            .double_bits(self.double_bits()?)
            .build()
    }

    /// Returns the value of the first line starting with `<key> => `.
    pub fn get_key(&self, key: &str) -> Option<&str> {
        let prefix = format!("{key} => ");
        self.0
            .lines()
            .find_map(|line| line.strip_prefix(&prefix))
            .map(str::trim)
    }

    fn require(&self, key: &str, constant: BuildConstant) -> Result<&str> {
        self.get_key(key)
            .ok_or(Error::MissingBuildConstant(constant))
    }

    fn parse<T: FromStr>(&self, key: &str, constant: BuildConstant) -> Result<T> {
        let value = self.require(key, constant)?;
        value.parse().map_err(|_| Error::InvalidBuildConstant {
            constant,
            value: value.to_string(),
        })
    }
}
