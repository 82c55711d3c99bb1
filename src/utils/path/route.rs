//! URL-style relative path helpers.
//!
//! Asset paths are stored as `/`-separated strings relative to the
//! application root, so they can be emitted in HTML unchanged.

/// Normalize a configured directory to end with exactly one `/`.
///
/// Both `/` and `\` are trimmed from the end first. An empty input stays
/// empty rather than becoming the filesystem root.
///
/// # Examples
/// ```ignore
/// assert_eq!(with_trailing_slash("assets/css"), "assets/css/");
/// assert_eq!(with_trailing_slash("assets/css//"), "assets/css/");
/// assert_eq!(with_trailing_slash(""), "");
/// ```
pub fn with_trailing_slash(dir: &str) -> String {
    let trimmed = dir.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{trimmed}/")
}

/// Strip leading `/` and `\` from a relative path.
#[inline]
pub fn strip_leading_slash(path: &str) -> &str {
    path.trim_start_matches(['/', '\\'])
}

/// Check if a link is external (has a URL scheme like http:, data:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Parent directory of a `/`-separated relative path (`""` at top level).
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |pos| &path[..pos])
}

/// Join `rel` onto `dir` and collapse `.` and `..` segments.
///
/// `..` never climbs above the root; the result carries a leading `/`.
///
/// # Examples
/// ```ignore
/// assert_eq!(resolve_relative("assets/css/vendor", "../img/a.png"), "/assets/css/img/a.png");
/// ```
pub fn resolve_relative(dir: &str, rel: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in dir.split('/').chain(rel.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    let mut out = String::from("/");
    out.push_str(&segments.join("/"));
    out
}
