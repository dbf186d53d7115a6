//! Common utility functions shared across the codebase.

/// Removes every occurrence of the three literal quote characters (`'`,
/// `` ` ``, `"`) anywhere in the text, then trims surrounding whitespace.
///
/// This mirrors how decorator argument values are normalized: quotes are
/// stripped wherever they appear, not just at the boundaries.
///
/// # Examples
///
/// ```
/// use ionlint::utils::strip_quotes;
///
/// assert_eq!(strip_quotes("'detail'"), "detail");
/// assert_eq!(strip_quotes("  `home` "), "home");
/// assert_eq!(strip_quotes("\"a\" + 'b'"), "a + b");
/// assert_eq!(strip_quotes("plain"), "plain");
/// ```
pub fn strip_quotes(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '\'' | '`' | '"'))
        .collect();
    stripped.trim().to_string()
}
