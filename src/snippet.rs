//! Renders [`BuildConstants`] as Rust source.
//!
//! The output declares the constants as `pub static` items and the integer
//! and float widths as type aliases, expecting `c_int` and `c_uchar` to be
//! in scope through `use types::*;`. The build id keeps a literal `\0`
//! before its closing quote, as its consumers treat it as a C string.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io,
};

use crate::constants::BuildConstants;

/// Display wrapper which formats a [`BuildConstants`] record as a snippet.
#[derive(Debug, Clone, Copy)]
pub struct ConfigSnippet<'a>(&'a BuildConstants);

impl<'a> ConfigSnippet<'a> {
    /// Wraps the given constants.
    pub fn new(constants: &'a BuildConstants) -> Self {
        Self(constants)
    }
}

impl BuildConstants {
    /// Returns a value which displays as the config snippet for these
    /// constants.
    pub fn snippet(&self) -> ConfigSnippet<'_> {
        ConfigSnippet(self)
    }
}

impl Display for ConfigSnippet<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let c = self.0;
        writeln!(f, "use types::*;")?;
        writeln!(f, "pub static ZEND_MODULE_API_NO: c_int = {};", c.module_api_no)?;
        writeln!(
            f,
            "pub static ZEND_MODULE_BUILD_ID: &'static str = \"{}\\0\";",
            c.build_id
        )?;
        writeln!(f, "pub static ZEND_ZTS: c_uchar = {};", u8::from(c.thread_safe))?;
        writeln!(f, "pub static ZEND_DEBUG: c_uchar = {};", u8::from(c.debug_build))?;
        writeln!(
            f,
            "pub static ZEND_CALL_FRAME_SLOT: c_int = {};",
            c.call_frame_slot_size
        )?;
        fmt_alias(f, "zend_long", 'i', c.long_bits)?;
        fmt_alias(f, "zend_ulong", 'u', c.ulong_bits)?;
        fmt_alias(f, "zend_double", 'f', c.double_bits)?;
        writeln!(f)
    }
}

fn fmt_alias(f: &mut Formatter<'_>, name: &str, prefix: char, bits: u32) -> FmtResult {
    writeln!(f, "/// {name}")?;
    writeln!(f, "#[allow(non_camel_case_types)]")?;
    writeln!(f, "pub type {name} = {prefix}{bits};")
}

/// Generates the config snippet for the given build constants.
///
/// The result depends only on `constants`: equal records always give
/// byte-identical snippets.
///
/// Each type alias is declared `pub` and preceded by
/// `#[allow(non_camel_case_types)]`, so the snippet can be `include!`d
/// without naming lints firing on `zend_long` and friends.
///
/// # Example
///
/// ```
/// use rustycfg::{generate_config_snippet, BuildConstants};
///
/// let constants = BuildConstants::builder()
///     .module_api_no(20200930)
///     .build_id("API20200930,NTS")
///     .thread_safe(false)
///     .debug_build(false)
///     .call_frame_slot_size(5)
///     .long_bits(64)
///     .ulong_bits(64)
///     .double_bits(64)
///     .build()
///     .unwrap();
///
/// let snippet = generate_config_snippet(&constants);
/// assert!(snippet.contains("pub type zend_long = i64;"));
/// ```
pub fn generate_config_snippet(constants: &BuildConstants) -> String {
    constants.snippet().to_string()
}

/// Writes the config snippet for the given build constants to `writer`.
///
/// Useful from build scripts, which can write the snippet into `OUT_DIR`
/// and `include!` it.
///
/// # Errors
///
/// Returns any error produced by the writer.
pub fn write_config_snippet<W: io::Write>(
    constants: &BuildConstants,
    mut writer: W,
) -> io::Result<()> {
    write!(writer, "{}", constants.snippet())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constants() -> BuildConstants {
        BuildConstants {
            module_api_no: 20200930,
            build_id: "abc123".into(),
            thread_safe: false,
            debug_build: true,
            call_frame_slot_size: 5,
            long_bits: 64,
            ulong_bits: 64,
            double_bits: 64,
        }
    }

    #[test]
    fn test_full_output() {
        let expected = concat!(
            "use types::*;\n",
            "pub static ZEND_MODULE_API_NO: c_int = 20200930;\n",
            "pub static ZEND_MODULE_BUILD_ID: &'static str = \"abc123\\0\";\n",
            "pub static ZEND_ZTS: c_uchar = 0;\n",
            "pub static ZEND_DEBUG: c_uchar = 1;\n",
            "pub static ZEND_CALL_FRAME_SLOT: c_int = 5;\n",
            "/// zend_long\n",
            "#[allow(non_camel_case_types)]\n",
            "pub type zend_long = i64;\n",
            "/// zend_ulong\n",
            "#[allow(non_camel_case_types)]\n",
            "pub type zend_ulong = u64;\n",
            "/// zend_double\n",
            "#[allow(non_camel_case_types)]\n",
            "pub type zend_double = f64;\n",
            "\n",
        );
        assert_eq!(generate_config_snippet(&constants()), expected);
    }

    #[test]
    fn test_field_substitution() {
        let snippet = generate_config_snippet(&constants());
        for needle in [
            "ZEND_MODULE_API_NO: c_int = 20200930;",
            "ZEND_MODULE_BUILD_ID: &'static str = \"abc123\\0\";",
            "ZEND_ZTS: c_uchar = 0;",
            "ZEND_DEBUG: c_uchar = 1;",
            "ZEND_CALL_FRAME_SLOT: c_int = 5;",
            "zend_long = i64;",
            "zend_ulong = u64;",
            "zend_double = f64;",
        ] {
            assert!(snippet.contains(needle), "missing `{needle}` in:\n{snippet}");
        }
    }

    #[test]
    fn test_deterministic() {
        let c = constants();
        assert_eq!(generate_config_snippet(&c), generate_config_snippet(&c));
        assert_eq!(generate_config_snippet(&c), generate_config_snippet(&c.clone()));
    }

    #[test]
    fn test_empty_build_id() {
        let c = BuildConstants {
            build_id: String::new(),
            ..constants()
        };
        assert!(generate_config_snippet(&c)
            .contains("ZEND_MODULE_BUILD_ID: &'static str = \"\\0\";\n"));
    }

    #[test]
    fn test_terminator_kept_for_any_build_id() {
        for id in ["API20210902,TS,debug", "x", "ends-with-backslash\\", "0"] {
            let c = BuildConstants {
                build_id: id.into(),
                ..constants()
            };
            let line = format!("= \"{id}\\0\";\n");
            assert!(generate_config_snippet(&c).contains(&line));
        }
    }

    #[test]
    fn test_widths() {
        let narrow = BuildConstants {
            long_bits: 32,
            ulong_bits: 32,
            double_bits: 32,
            ..constants()
        };
        let snippet = generate_config_snippet(&narrow);
        assert!(snippet.contains("pub type zend_long = i32;"));
        assert!(snippet.contains("pub type zend_ulong = u32;"));
        assert!(snippet.contains("pub type zend_double = f32;"));

        let snippet = generate_config_snippet(&constants());
        assert!(snippet.contains("pub type zend_long = i64;"));
        assert!(snippet.contains("pub type zend_ulong = u64;"));
        assert!(snippet.contains("pub type zend_double = f64;"));
    }

    #[test]
    fn test_only_changed_line_differs() {
        let debug = generate_config_snippet(&constants());
        let release = generate_config_snippet(&BuildConstants {
            debug_build: false,
            ..constants()
        });

        let changed: Vec<_> = debug
            .lines()
            .zip(release.lines())
            .filter(|(a, b)| a != b)
            .collect();
        assert_eq!(
            changed,
            [(
                "pub static ZEND_DEBUG: c_uchar = 1;",
                "pub static ZEND_DEBUG: c_uchar = 0;"
            )]
        );
        assert_eq!(debug.len(), release.len());
    }

    #[test]
    fn test_write_matches_generate() {
        let mut buf = Vec::new();
        write_config_snippet(&constants(), &mut buf).expect("should write to vec");
        assert_eq!(
            String::from_utf8(buf).expect("snippet is utf-8"),
            generate_config_snippet(&constants())
        );
    }
}
