//! Alias name rules.

/// Check that an alias has only ASCII alphanumerics, `-` and `.`, and at
/// least one alphanumeric (`"-"` or `".."` alone are rejected).
pub fn is_valid_alias(alias: &str) -> bool {
    let mut has_alnum = false;
    for c in alias.chars() {
        match c {
            c if c.is_ascii_alphanumeric() => has_alnum = true,
            '-' | '.' => {}
            _ => return false,
        }
    }
    has_alnum
}
