//! Shape-based classification of raw command line tokens.
//!
//! Flag detection is purely textual: no registry lookup happens here. A token
//! is flag-shaped when it is at least two characters long and starts with a
//! dash; the exact dash-count grammar is checked by [`is_unsupported_flag`].

/// Check whether `token` is flag-shaped, e.g. `-g` or `--verbose`.
pub(crate) fn is_flag(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('-')
}

/// Check whether `token` is a single-dash, single-character flag such as `-g`.
pub(crate) fn is_short_flag(token: &str) -> bool {
    is_flag(token) && token.len() == 2 && !token.starts_with("--")
}

/// If `token` is an inverted flag such as `--no-color`, return the flag name
/// with the `--no-` prefix removed.
pub(crate) fn inverted_flag_name(token: &str) -> Option<&str> {
    if is_flag(token) {
        token.strip_prefix("--no-")
    } else {
        None
    }
}

/// Check whether a token violates the flag grammar.
///
/// A two-character flag must be exactly `-X`; anything longer must start with
/// `--` but not `---`. Tokens shorter than two characters are never reported
/// as unsupported.
pub(crate) fn is_unsupported_flag(token: &str) -> bool {
    if token.len() == 2 {
        return !token.starts_with('-') || token.starts_with("--");
    }
    if token.len() > 2 {
        return !token.starts_with("--") || token.starts_with("---");
    }
    false
}

/// If `token` declares a variadic argument, e.g. `tags...`, return the name
/// with the `...` suffix removed.
pub(crate) fn variadic_arg_name(token: &str) -> Option<&str> {
    if is_flag(token) {
        None
    } else {
        token.strip_suffix("...")
    }
}

/// Strip the leading dashes from a flag-shaped token.
pub(crate) fn strip_leading_dashes(token: &str) -> &str {
    if let Some(rest) = token.strip_prefix("--") {
        rest
    } else if let Some(rest) = token.strip_prefix('-') {
        rest
    } else {
        token
    }
}

/// Remove every whitespace character from a declared name.
pub(crate) fn remove_whitespace(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}
