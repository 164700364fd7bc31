//! Owner, group and other classes on a single file.

use fsgate_acl::{AccessRequest, AclPermission, Mode};

use crate::common::{TestHarness, checker};

fn check_write(harness: &TestHarness, user: &str, groups: &[&str]) -> bool {
    let iip = harness.tree.resolve("/dir1/file1").unwrap();
    checker(user, groups)
        .check(&iip, false, None, None, Some(AclPermission::Write))
        .is_ok()
}

#[test]
fn test_owner_change_moves_write_access() {
    let mut harness = TestHarness::new();
    assert!(check_write(&harness, "leo", &[]));
    assert!(!check_write(&harness, "diana", &[]));

    harness.tree.set_owner("/dir1/file1", "diana").unwrap();

    assert!(check_write(&harness, "diana", &[]));
    assert!(!check_write(&harness, "leo", &[]));
}

#[test]
fn test_group_grant() {
    let mut harness = TestHarness::new();
    assert!(!check_write(&harness, "diana", &["sales"]));

    harness
        .tree
        .acl_mut("/dir1/file1")
        .unwrap()
        .set_group_permission(AclPermission::ReadWrite);

    assert!(check_write(&harness, "diana", &["sales"]));
    assert!(!check_write(&harness, "clark", &["execs"]));
}

#[test]
fn test_group_denial_applies_even_when_other_allows() {
    let mut harness = TestHarness::new();
    harness
        .tree
        .set_mode("/dir1/file1", Mode::from_bits_truncate(0o604))
        .unwrap();
    let iip = harness.tree.resolve("/dir1/file1").unwrap();

    let err = checker("diana", &["sales"])
        .check(&iip, false, None, None, Some(AclPermission::Read))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Permission denied: user=diana, access=READ, inode=\"/dir1/file1\":leo:sales:-:rw----r--"
    );
    assert!(
        checker("bruce", &["devels"])
            .check(&iip, false, None, None, Some(AclPermission::Read))
            .is_ok()
    );
}

#[test]
fn test_owner_without_bits_is_denied() {
    let mut harness = TestHarness::new();
    harness
        .tree
        .set_mode("/dir1/file1", Mode::from_bits_truncate(0o077))
        .unwrap();
    let iip = harness.tree.resolve("/dir1/file1").unwrap();
    let err = checker("leo", &["sales"])
        .check(&iip, false, None, None, Some(AclPermission::Read))
        .unwrap_err();
    assert!(err.to_string().contains("user=leo"));
}

#[test]
fn test_other_class() {
    let harness = TestHarness::new();
    let iip = harness.tree.resolve("/dir1/file1").unwrap();
    let bruce = checker("bruce", &["devels"]);
    assert!(bruce.check_request(&iip, &AccessRequest::read()).is_ok());
    assert!(bruce.check_request(&iip, &AccessRequest::write()).is_err());
}

#[test]
fn test_require_owner() {
    let harness = TestHarness::new();
    let iip = harness.tree.resolve("/dir1/dir2/file2").unwrap();
    assert!(checker("leo", &[]).check(&iip, true, None, None, None).is_ok());

    let err = checker("diana", &["sales"])
        .check(&iip, true, None, None, None)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Permission denied. user=diana is not the owner of inode=file("));
    assert!(message.contains("name=file2"));
}

#[test]
fn test_superuser_bypass() {
    let mut harness = TestHarness::new();
    for path in ["/", "/dir1", "/dir1/dir2", "/dir1/dir2/file2"] {
        harness
            .tree
            .set_mode(path, Mode::from_bits_truncate(0))
            .unwrap();
    }
    let iip = harness.tree.resolve("/dir1/dir2/file2").unwrap();
    let all = Some(AclPermission::All);
    assert!(checker("fsgate", &[]).check(&iip, true, all, all, all).is_ok());
    assert!(checker("clark", &["supergroup"]).check(&iip, true, all, all, all).is_ok());
    assert!(checker("leo", &["sales"]).check(&iip, false, all, None, None).is_err());
}

#[test]
fn test_chmod_and_chown_through_tree() {
    let mut harness = TestHarness::new();
    let leo = checker("leo", &["sales", "devels"]);
    harness
        .tree
        .set_mode_as(&leo, "/dir1/file1", Mode::from_bits_truncate(0o660))
        .unwrap();
    harness
        .tree
        .set_owner_as(&leo, "/dir1/file1", None, Some("devels"))
        .unwrap();

    let diana = checker("diana", &["devels"]);
    let iip = harness.tree.resolve("/dir1/file1").unwrap();
    assert!(diana.check_request(&iip, &AccessRequest::write()).is_ok());
}
