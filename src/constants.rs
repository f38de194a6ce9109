//! The build constants of a PHP engine, and a builder which guarantees that
//! every one of them was supplied.

use std::fmt::Display;

use crate::error::{Error, Result};

/// Names one of the constants carried by [`BuildConstants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildConstant {
    /// `ZEND_MODULE_API_NO`.
    ModuleApiNo,
    /// `ZEND_MODULE_BUILD_ID`.
    BuildId,
    /// Whether `ZTS` was defined.
    ThreadSafe,
    /// `ZEND_DEBUG`.
    DebugBuild,
    /// `ZEND_CALL_FRAME_SLOT`.
    CallFrameSlot,
    /// Width of `zend_long`.
    LongBits,
    /// Width of `zend_ulong`.
    UlongBits,
    /// Width of `double`.
    DoubleBits,
}

impl BuildConstant {
    /// Every constant, in the order they appear in the generated snippet.
    pub const ALL: [BuildConstant; 8] = [
        Self::ModuleApiNo,
        Self::BuildId,
        Self::ThreadSafe,
        Self::DebugBuild,
        Self::CallFrameSlot,
        Self::LongBits,
        Self::UlongBits,
        Self::DoubleBits,
    ];

    /// The name the constant is emitted under.
    pub fn name(self) -> &'static str {
        match self {
            Self::ModuleApiNo => "ZEND_MODULE_API_NO",
            Self::BuildId => "ZEND_MODULE_BUILD_ID",
            Self::ThreadSafe => "ZEND_ZTS",
            Self::DebugBuild => "ZEND_DEBUG",
            Self::CallFrameSlot => "ZEND_CALL_FRAME_SLOT",
            Self::LongBits => "zend_long",
            Self::UlongBits => "zend_ulong",
            Self::DoubleBits => "zend_double",
        }
    }
}

impl Display for BuildConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Build configuration of a PHP engine.
///
/// A record is produced by a [`Probe`](crate::probe::Probe) or by
/// [`BuildConstantsBuilder::build`], and is never mutated afterwards. The
/// snippet generated from it is a pure function of these eight fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildConstants {
    /// The module API number, e.g. `20200930` for PHP 8.0.
    pub module_api_no: i32,
    /// Opaque build identifier, e.g. `API20200930,NTS`.
    pub build_id: String,
    /// Whether the engine was built with thread safety (ZTS).
    pub thread_safe: bool,
    /// Whether the engine was built with debug assertions.
    pub debug_build: bool,
    /// Number of `zval` slots occupied by one call frame header.
    pub call_frame_slot_size: i32,
    /// Bit width of `zend_long`.
    pub long_bits: u32,
    /// Bit width of `zend_ulong`.
    pub ulong_bits: u32,
    /// Bit width of `double`.
    pub double_bits: u32,
}

impl BuildConstants {
    /// Creates a new builder with every constant unset.
    pub fn builder() -> BuildConstantsBuilder {
        BuildConstantsBuilder::default()
    }
}

/// Builder for [`BuildConstants`].
///
/// Probes fill the builder as they discover values. Building fails with
/// [`Error::MissingBuildConstant`] unless every constant has been set, so a
/// partially probed engine can never reach the snippet generator.
#[derive(Debug, Clone, Default)]
pub struct BuildConstantsBuilder {
    module_api_no: Option<i32>,
    build_id: Option<String>,
    thread_safe: Option<bool>,
    debug_build: Option<bool>,
    call_frame_slot_size: Option<i32>,
    long_bits: Option<u32>,
    ulong_bits: Option<u32>,
    double_bits: Option<u32>,
}

impl BuildConstantsBuilder {
    /// Sets the module API number.
    pub fn module_api_no(mut self, value: i32) -> Self {
        self.module_api_no = Some(value);
        self
    }

    /// Sets the build identifier.
    pub fn build_id<T: Into<String>>(mut self, value: T) -> Self {
        self.build_id = Some(value.into());
        self
    }

    /// Sets the thread safety flag.
    pub fn thread_safe(mut self, value: bool) -> Self {
        self.thread_safe = Some(value);
        self
    }

    /// Sets the debug flag.
    pub fn debug_build(mut self, value: bool) -> Self {
        self.debug_build = Some(value);
        self
    }

    /// Sets the call frame slot size.
    pub fn call_frame_slot_size(mut self, value: i32) -> Self {
        self.call_frame_slot_size = Some(value);
        self
    }

    /// Sets the width of `zend_long`.
    pub fn long_bits(mut self, value: u32) -> Self {
        self.long_bits = Some(value);
        self
    }

    /// Sets the width of `zend_ulong`.
    pub fn ulong_bits(mut self, value: u32) -> Self {
        self.ulong_bits = Some(value);
        self
    }

    /// Sets the width of `double`.
    pub fn double_bits(mut self, value: u32) -> Self {
        self.double_bits = Some(value);
        self
    }

    /// Builds the record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBuildConstant`] carrying the first constant
    /// (in snippet order) which was never set.
    pub fn build(self) -> Result<BuildConstants> {
        Ok(BuildConstants {
            module_api_no: require(self.module_api_no, BuildConstant::ModuleApiNo)?,
            build_id: require(self.build_id, BuildConstant::BuildId)?,
            thread_safe: require(self.thread_safe, BuildConstant::ThreadSafe)?,
            debug_build: require(self.debug_build, BuildConstant::DebugBuild)?,
            call_frame_slot_size: require(
                self.call_frame_slot_size,
                BuildConstant::CallFrameSlot,
            )?,
            long_bits: require(self.long_bits, BuildConstant::LongBits)?,
            ulong_bits: require(self.ulong_bits, BuildConstant::UlongBits)?,
            double_bits: require(self.double_bits, BuildConstant::DoubleBits)?,
        })
    }
}

fn require<T>(value: Option<T>, constant: BuildConstant) -> Result<T> {
    value.ok_or(Error::MissingBuildConstant(constant))
}
