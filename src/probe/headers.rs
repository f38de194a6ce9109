use std::ffi::{c_char, c_int, CStr};

use crate::{
    constants::{BuildConstant, BuildConstants},
    error::{Error, Result},
};

use super::Probe;

extern "C" {
    fn rustycfg_module_api_no() -> c_int;
    fn rustycfg_build_id() -> *const c_char;
    fn rustycfg_zts() -> c_int;
    fn rustycfg_debug() -> c_int;
    fn rustycfg_call_frame_slot() -> c_int;
    fn rustycfg_long_bits() -> c_int;
    fn rustycfg_ulong_bits() -> c_int;
    fn rustycfg_double_bits() -> c_int;
}

/// Reads the build constants from the Zend headers this crate was compiled
/// against.
///
/// Only available with the `headers` feature, which compiles a small C shim
/// against the includes reported by `php-config`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headers;

impl Probe for Headers {
    fn probe(&self) -> Result<BuildConstants> {
        log::info!("Reading build constants from compiled Zend headers");

        // SAFETY: The shim functions only return values of preprocessor macros,
        // and the build id points to a static string literal.
        let build_id = unsafe { CStr::from_ptr(rustycfg_build_id()) };
        let build_id = build_id
            .to_str()
            .map_err(|_| Error::InvalidBuildConstant {
                constant: BuildConstant::BuildId,
                value: build_id.to_string_lossy().into_owned(),
            })?;

        let bits = |value: c_int, constant: BuildConstant| {
            u32::try_from(value).map_err(|_| Error::InvalidBuildConstant {
                constant,
                value: value.to_string(),
            })
        };

        // SAFETY: See above.
        let builder = unsafe {
            BuildConstants::builder()
                .module_api_no(rustycfg_module_api_no())
                .thread_safe(rustycfg_zts() != 0)
                .debug_build(rustycfg_debug() != 0)
                .call_frame_slot_size(rustycfg_call_frame_slot())
                .long_bits(bits(rustycfg_long_bits(), BuildConstant::LongBits)?)
                .ulong_bits(bits(rustycfg_ulong_bits(), BuildConstant::UlongBits)?)
                .double_bits(bits(rustycfg_double_bits(), BuildConstant::DoubleBits)?)
        };

        builder.build_id(build_id).build()
    }
}
