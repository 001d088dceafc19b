//! Rewriting URI fragments into canonical patterns.

use crate::config::TrailingSlash;

/// Marker appended so the final slash of a pattern is optional.
pub const OPTIONAL_SLASH: &str = "[/]";

/// Normalizes a group fragment: lower-cased, with one leading and one
/// trailing slash removed.
///
/// ```
/// use switchyard::normalize::normalize_segment;
///
/// assert_eq!(normalize_segment("/API/"), "api");
/// assert_eq!(normalize_segment("v1"), "v1");
/// assert_eq!(normalize_segment("/"), "");
/// ```
pub fn normalize_segment(fragment: &str) -> String {
    let lowered = fragment.to_lowercase();
    let trimmed = lowered.strip_prefix('/').unwrap_or(&lowered);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    trimmed.to_string()
}

/// Composes a route pattern from the current group prefix and a fragment.
///
/// Runs of slashes collapse into one. Unless `trailing` is strict or the
/// result is the bare root, the final slash becomes optional: a trailing
/// `/` is replaced by `[/]`, any other final character except `]` gets
/// `[/]` appended.
///
/// ```
/// use switchyard::normalize::compose;
/// use switchyard::TrailingSlash;
///
/// assert_eq!(compose("/api/", "users", TrailingSlash::Optional), "/api/users[/]");
/// assert_eq!(compose("/api/", "//users/", TrailingSlash::Optional), "/api/users[/]");
/// assert_eq!(compose("/", "/", TrailingSlash::Optional), "/");
/// assert_eq!(compose("/", "posts[/{page}]", TrailingSlash::Optional), "/posts[/{page}]");
/// assert_eq!(compose("/api/", "users/", TrailingSlash::Strict), "/api/users/");
/// ```
pub fn compose(prefix: &str, fragment: &str, trailing: TrailingSlash) -> String {
    let mut pattern = collapse_slashes(prefix, fragment);

    if trailing == TrailingSlash::Optional && pattern.len() > 1 {
        if pattern.ends_with('/') {
            pattern.pop();
            pattern.push_str(OPTIONAL_SLASH);
        } else if !pattern.ends_with(']') {
            pattern.push_str(OPTIONAL_SLASH);
        }
    }

    pattern
}

fn collapse_slashes(prefix: &str, fragment: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + fragment.len() + OPTIONAL_SLASH.len());
    for c in prefix.chars().chain(fragment.chars()) {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}
