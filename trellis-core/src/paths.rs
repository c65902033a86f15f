//! Forward-slash path segment helpers.
//!
//! Route prefixes and import specifiers are always expressed with `/`
//! separators regardless of the host platform.

use std::path::Path;

/// Whether a path segment contributes nothing to a joined path.
///
/// Empty strings, `"."` and strings made only of slashes are all
/// treated as "no segment".
pub fn is_empty_segment(segment: &str) -> bool {
    let trimmed = segment.trim_matches('/');
    trimmed.is_empty() || trimmed == "."
}

/// Join path segments with `/`, eliding empty segments.
///
/// Each segment may itself contain `/` separators; leading and trailing
/// slashes are trimmed and `.` components dropped.
pub fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .flat_map(|s| s.split(['/', '\\']))
        .filter(|s| !is_empty_segment(s))
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip the final extension from a forward-slash path.
///
/// Only the last path component is inspected, so dots in directory names
/// are preserved.
pub fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(0) | None => path,
        Some(dot) => &path[..file_start + dot],
    }
}

/// Render a relative path with forward slashes.
pub fn to_forward_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
