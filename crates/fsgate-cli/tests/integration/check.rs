//! `fsgate check` against a tree fixture.

use crate::common::TestHarness;

#[test]
fn test_owner_reads_and_writes() {
    let harness = TestHarness::new();
    for request in ["read", "write", "owner"] {
        harness
            .check(&["--user", "leo", "--path", "/dir1/file1", "--request", request])
            .unwrap();
    }
}

#[test]
fn test_group_member_writes_through_group_class() {
    let harness = TestHarness::new();
    let out = harness
        .check(&[
            "--user", "diana", "--groups", "sales", "--path", "/dir1/file1", "--request", "write",
        ])
        .unwrap();
    assert!(out.contains("uid=diana, groups=sales"));
}

#[test]
fn test_other_user_cannot_traverse() {
    let harness = TestHarness::new();
    let err = harness
        .check(&["--user", "bob", "--path", "/dir1/file1", "--request", "read"])
        .unwrap_err();
    assert!(err.is_access_denied());
    assert_eq!(
        err.to_string(),
        "Permission denied: user=bob, access=EXECUTE, inode=\"/dir1/file1\":leo:sales:d:rwxr-x---"
    );
}

#[test]
fn test_explicit_stage_flags() {
    let harness = TestHarness::new();
    harness
        .check(&["--user", "bob", "--path", "/tmp", "--access", "all"])
        .unwrap();
    let err = harness
        .check(&["--user", "bob", "--path", "/tmp", "--owner"])
        .unwrap_err();
    assert!(err.is_access_denied());
    assert!(err.to_string().contains("is not the owner"));
}

#[test]
fn test_owner_flag_on_missing_path() {
    let harness = TestHarness::new();
    let err = harness
        .check(&["--user", "bob", "--path", "/tmp/ghost", "--owner"])
        .unwrap_err();
    assert!(err.is_access_denied());
    assert_eq!(
        err.to_string(),
        "Permission denied. user=bob is not the owner of inode=/tmp/ghost"
    );
}

#[test]
fn test_create_below_missing_directories() {
    let harness = TestHarness::new();
    harness
        .check(&["--user", "bob", "--path", "/tmp/a/b/c", "--request", "create"])
        .unwrap();
    let err = harness
        .check(&["--user", "bob", "--path", "/dir1/a/b", "--request", "create"])
        .unwrap_err();
    assert!(err.is_access_denied());
}

#[test]
fn test_superusers_bypass_checks() {
    let harness = TestHarness::with_config("supergroup = \"admins\"");
    harness
        .check(&["--user", "fsgate", "--path", "/dir1/file1", "--request", "write"])
        .unwrap();
    harness
        .check(&[
            "--user", "eve", "--groups", "admins", "--path", "/dir1/file1", "--request", "owner",
        ])
        .unwrap();
    assert!(
        harness
            .check(&[
                "--user", "eve", "--groups", "supergroup", "--path", "/dir1/file1", "--request",
                "read",
            ])
            .unwrap_err()
            .is_access_denied()
    );
}

#[test]
fn test_invalid_path_is_not_a_denial() {
    let harness = TestHarness::new();
    let err = harness
        .check(&["--user", "leo", "--path", "dir1/../x", "--request", "read"])
        .unwrap_err();
    assert!(!err.is_access_denied());
}
