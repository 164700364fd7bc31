//! `fsgate mode` and `fsgate default-acl`.

use crate::common::TestHarness;

#[test]
fn test_mode_format_and_parse() {
    let harness = TestHarness::new();
    assert_eq!(harness.run(&["mode", "format", "750"]).unwrap(), "rwxr-x---");
    assert_eq!(harness.run(&["mode", "format", "1770"]).unwrap(), "rwxrwx--T");
    assert_eq!(
        harness
            .run(&["mode", "parse", "go-w,o+t", "--base", "0777", "--dir"])
            .unwrap(),
        "1755 rwxr-xr-t"
    );
    assert_eq!(
        harness.run(&["mode", "parse", "640"]).unwrap(),
        "640 rw-r-----"
    );
}

#[test]
fn test_default_acl_honours_config() {
    let harness = TestHarness::with_config("umask = 0o027\nsupergroup = \"staff\"");
    assert_eq!(
        harness.run(&["default-acl", "--user", "leo"]).unwrap(),
        "leo:staff rw-r----- (640)"
    );
    assert_eq!(
        harness.run(&["default-acl", "--user", "leo", "--dir"]).unwrap(),
        "leo:staff rwxr-x--- (750)"
    );
}

#[test]
fn test_bad_config_is_reported() {
    let harness = TestHarness::with_config("umask = 0o1000");
    let err = harness
        .run(&["default-acl", "--user", "leo"])
        .unwrap_err();
    assert!(err.to_string().contains("umask"));
}
