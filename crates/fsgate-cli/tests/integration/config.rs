//! `fsgate config`.

use fsgate_core::PermissionConfig;

use crate::common::TestHarness;

#[test]
fn test_init_then_get() {
    let harness = TestHarness::new();
    let path = harness.dir.path().join("nested").join("fsgate.toml");
    let path = path.to_str().unwrap();

    harness.run(&["config", "init", "--file", path]).unwrap();
    let loaded = PermissionConfig::from_file(path).unwrap();
    assert_eq!(loaded.umask, Some(0o022));
    assert_eq!(loaded.fs_owner.as_deref(), Some("fsgate"));

    assert!(harness.run(&["config", "init", "--file", path]).is_err());
    harness
        .run(&["config", "init", "--file", path, "--force"])
        .unwrap();
}

#[test]
fn test_show_and_path() {
    let harness = TestHarness::with_config("fs_owner = \"hdfs\"");
    let shown = harness.run(&["config", "show"]).unwrap();
    assert!(shown.contains("fs_owner = \"hdfs\""));
    assert!(shown.contains("[permissions]"));
    assert_eq!(
        harness.run(&["config", "get", "fs_owner"]).unwrap(),
        "hdfs"
    );
    assert_eq!(
        harness.run(&["config", "path"]).unwrap(),
        harness.config.display().to_string()
    );
}
