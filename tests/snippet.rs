use rustycfg::{
    generate_config_snippet,
    probe::{host_constants, PhpInfo, Probe},
    write_config_snippet, BuildConstant, BuildConstants, Error,
};

/// Serves a captured `php -i` dump instead of running PHP.
struct Captured(&'static str);

impl Probe for Captured {
    fn probe(&self) -> rustycfg::Result<BuildConstants> {
        PhpInfo::new(self.0).build_constants()
    }
}

const PHP_74_ZTS_DEBUG: &str = "PHP Version => 7.4.33
PHP API => 20190902
PHP Extension => 20190902
Zend Extension => 320190902
Zend Extension Build => API320190902,TS,debug
PHP Extension Build => API20190902,TS,debug
Debug Build => yes
Thread Safety => enabled
PHP_INT_SIZE => 8
PHP_FLOAT_DIG => 15
";

#[test]
fn test_probe_to_snippet() {
    let constants = host_constants(Captured(PHP_74_ZTS_DEBUG)).expect("should probe");
    assert_eq!(
        generate_config_snippet(constants),
        "use types::*;
pub static ZEND_MODULE_API_NO: c_int = 20190902;
pub static ZEND_MODULE_BUILD_ID: &'static str = \"API20190902,TS,debug\\0\";
pub static ZEND_ZTS: c_uchar = 1;
pub static ZEND_DEBUG: c_uchar = 1;
pub static ZEND_CALL_FRAME_SLOT: c_int = 5;
/// zend_long
#[allow(non_camel_case_types)]
pub type zend_long = i64;
/// zend_ulong
#[allow(non_camel_case_types)]
pub type zend_ulong = u64;
/// zend_double
#[allow(non_camel_case_types)]
pub type zend_double = f64;

"
    );
}

#[test]
fn test_incomplete_install_never_renders() {
    let err = Captured("PHP Extension => 20230831\nPHP Extension Build => API20230831,NTS\n")
        .probe()
        .expect_err("thread safety is missing");
    assert!(matches!(
        err,
        Error::MissingBuildConstant(BuildConstant::ThreadSafe)
    ));
}

#[test]
fn test_snippet_to_file() {
    let constants = BuildConstants::builder()
        .module_api_no(20240924)
        .build_id("")
        .thread_safe(false)
        .debug_build(false)
        .call_frame_slot_size(5)
        .long_bits(64)
        .ulong_bits(64)
        .double_bits(64)
        .build()
        .expect("all constants given");

    let path = std::env::temp_dir().join(format!("rustycfg-{}.rs", std::process::id()));
    let file = std::fs::File::create(&path).expect("should create temp file");
    write_config_snippet(&constants, file).expect("should write snippet");

    let written = std::fs::read_to_string(&path).expect("should read snippet back");
    let _ = std::fs::remove_file(&path);

    assert_eq!(written, generate_config_snippet(&constants));
    assert!(written.contains("ZEND_MODULE_BUILD_ID: &'static str = \"\\0\";"));
    assert!(written.ends_with("pub type zend_double = f64;\n\n"));
}
