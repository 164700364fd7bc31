//! Common test utilities for fsgate-namespace integration tests.

use fsgate_acl::{Acl, FsPermissionChecker, Mode};
use fsgate_auth::Identity;
use fsgate_namespace::InodeTree;

/// File system owner used by every fixture.
pub const FS_OWNER: &str = "fsgate";

/// Superuser group used by every fixture.
pub const SUPERGROUP: &str = "supergroup";

/// Test harness holding a small namespace:
///
/// ```text
/// /                 fsgate:supergroup  rwxr-xr-x
/// /dir1             leo:sales          rwxr-xr-x
/// /dir1/file1       leo:sales          rw-r--r--
/// /dir1/dir2        leo:sales          rwxr-xr-x
/// /dir1/dir2/file2  leo:sales          rw-r--r--
/// ```
pub struct TestHarness {
    /// The namespace under test
    pub tree: InodeTree,
}

impl TestHarness {
    /// Builds the fixture tree.
    pub fn new() -> Self {
        let mut tree = InodeTree::new(acl(FS_OWNER, SUPERGROUP, 0o755));
        tree.mkdir("/dir1", acl("leo", "sales", 0o755)).unwrap();
        tree.create_file("/dir1/file1", acl("leo", "sales", 0o644))
            .unwrap();
        tree.mkdir("/dir1/dir2", acl("leo", "sales", 0o755)).unwrap();
        tree.create_file("/dir1/dir2/file2", acl("leo", "sales", 0o644))
            .unwrap();
        Self { tree }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// ACL with the given owner, group and mode.
pub fn acl(owner: &str, group: &str, mode: u16) -> Acl {
    Acl::new(owner, group, Mode::from_bits_truncate(mode))
}

/// Checker for `user` in `groups`.
pub fn checker(user: &str, groups: &[&str]) -> FsPermissionChecker {
    let identity = Identity::with_groups(user, groups.iter().copied());
    FsPermissionChecker::new(FS_OWNER, SUPERGROUP, &identity)
}
