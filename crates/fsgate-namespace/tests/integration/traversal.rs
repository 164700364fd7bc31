//! Ancestor and parent stages along multi-level paths.

use fsgate_acl::{AccessRequest, AclPermission, FsNode, Mode};
use fsgate_auth::Identity;
use fsgate_core::PermissionConfig;
use fsgate_namespace::InodeTree;

use crate::common::{TestHarness, acl, checker};

#[test]
fn test_traverse_denied_at_dir1() {
    let mut harness = TestHarness::new();
    harness
        .tree
        .acl_mut("/dir1")
        .unwrap()
        .set_group_permission(AclPermission::Read);

    let iip = harness.tree.resolve("/dir1/dir2").unwrap();
    let err = checker("diana", &["sales"])
        .check(&iip, false, Some(AclPermission::Execute), None, None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Permission denied: user=diana, access=EXECUTE, inode=\"/dir1/dir2\":leo:sales:d:rwxr--r-x"
    );
}

#[test]
fn test_parent_stage_reports_target_path() {
    let mut harness = TestHarness::new();
    harness
        .tree
        .set_mode("/dir1/dir2", Mode::from_bits_truncate(0o700))
        .unwrap();
    let iip = harness.tree.resolve("/dir1/dir2/file2").unwrap();
    let err = checker("diana", &[])
        .check_request(&iip, &AccessRequest::read())
        .unwrap_err();
    assert!(
        err.to_string()
            .contains("inode=\"/dir1/dir2/file2\":leo:sales:d:rwx------")
    );
}

#[test]
fn test_ancestor_with_missing_nodes() {
    let harness = TestHarness::new();
    let iip = harness.tree.resolve("/dir1/x/y/z").unwrap();
    assert_eq!(iip.ancestor_index().unwrap(), 2);
    assert_eq!(iip.ancestor().unwrap().full_path(), "/dir1");

    let diana = checker("diana", &[]);
    assert!(diana.check(&iip, false, Some(AclPermission::Execute), None, None).is_ok());
    assert!(diana.check(&iip, false, Some(AclPermission::Write), None, None).is_err());
    // absent target: the access stage has nothing to check
    assert!(diana.check(&iip, false, None, None, Some(AclPermission::All)).is_ok());
}

#[test]
fn test_owner_of_missing_target_is_denied() {
    let harness = TestHarness::new();
    let iip = harness.tree.resolve("/dir1/missing").unwrap();
    let err = checker("diana", &[]).check(&iip, true, None, None, None).unwrap_err();
    assert!(err.is_access_denied());
    assert!(err.to_string().ends_with("inode=/dir1/missing"));

    let err = harness
        .tree
        .check(&checker("leo", &["sales"]), "/dir1/missing", &AccessRequest::owner())
        .unwrap_err();
    assert!(err.is_access_denied());
}

#[test]
fn test_umask_on_created_directories() {
    let conf = PermissionConfig {
        umask: Some(0o022),
        default_dir_mode: Some(0o777),
        ..Default::default()
    };
    let mut tree = InodeTree::with_defaults(&conf);
    let id = tree.mkdirs("/a/b", &Identity::new("leo"), &conf).unwrap();
    assert_eq!(tree.get(id).unwrap().acl().permission().bits(), 0o755);
}

#[test]
fn test_create_in_unwritable_directory() {
    let mut harness = TestHarness::new();
    let diana = checker("diana", &["sales"]);
    let err = harness
        .tree
        .create_file_as(&diana, "/dir1/dir2/new", acl("diana", "sales", 0o644))
        .unwrap_err();
    assert!(err.is_access_denied());

    harness
        .tree
        .acl_mut("/dir1/dir2")
        .unwrap()
        .set_group_permission(AclPermission::All);
    harness
        .tree
        .create_file_as(&diana, "/dir1/dir2/new", acl("diana", "sales", 0o644))
        .unwrap();
    assert_eq!(harness.tree.list("/dir1/dir2").unwrap().len(), 2);
}
