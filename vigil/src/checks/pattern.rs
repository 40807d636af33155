use glob::{MatchOptions, Pattern};

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Shell-style wildcard match of the whole `value`. `*` spans any run of characters,
/// separators included. A pattern that fails to parse matches nothing.
pub(crate) fn matches(pattern: &str, value: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    Pattern::new(pattern)
        .map(|compiled| compiled.matches_with(value, OPTIONS))
        .unwrap_or(false)
}
