//! Absolute path handling.

use crate::error::{NamespaceError, Result};

/// Path separator.
pub const SEPARATOR: char = '/';

/// Splits an absolute path into segments, the root being the empty segment.
///
/// Repeated and trailing separators are ignored; `.` and `..` are rejected.
///
/// ```rust
/// use fsgate_namespace::split_path;
///
/// assert_eq!(split_path("/").unwrap(), vec![""]);
/// assert_eq!(split_path("/dir1/file1").unwrap(), vec!["", "dir1", "file1"]);
/// assert!(split_path("dir1").is_err());
/// ```
pub fn split_path(path: &str) -> Result<Vec<String>> {
    if !path.starts_with(SEPARATOR) {
        return Err(NamespaceError::invalid_path(path, "not absolute"));
    }
    let mut segments = vec![String::new()];
    for name in path.split(SEPARATOR).filter(|s| !s.is_empty()) {
        if name == "." || name == ".." {
            return Err(NamespaceError::invalid_path(path, "relative component"));
        }
        segments.push(name.to_string());
    }
    Ok(segments)
}

/// Joins segments back into a path; `[""]` is `/`.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        SEPARATOR.to_string()
    } else {
        joined
    }
}
