// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use regex::{Regex, RegexBuilder};

/// Translate a shell style glob (`*`, `?`, `[...]`, `\` escapes) into an anchored
/// regex.
///
/// # Errors
///
/// Returns an error if a bracket expression produces an invalid regex.
pub fn glob_to_regex(glob: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    let mut pattern = String::from("^");
    let mut chars = glob.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            '\\' => match chars.next() {
                Some(escaped) => pattern.push_str(&regex::escape(&escaped.to_string())),
                None => pattern.push_str("\\\\"),
            },
            '[' => {
                let mut class = String::from("[");
                if chars.peek() == Some(&'!') {
                    chars.next();
                    class.push('^');
                }
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == ']' && class.len() > 1 {
                        closed = true;
                        break;
                    }
                    if inner == '\\' || inner == '[' {
                        class.push('\\');
                    }
                    class.push(inner);
                }
                if closed {
                    class.push(']');
                    pattern.push_str(&class);
                } else {
                    // Unterminated: match the bracket literally.
                    pattern.push_str(&regex::escape(&class));
                }
            }
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    pattern.push('$');
    RegexBuilder::new(&pattern)
        .case_insensitive(case_insensitive)
        .dot_matches_new_line(true)
        .build()
}

/// Does `text` match `glob` as a whole.
#[must_use]
pub fn glob_matches(glob: &str, text: &str, case_insensitive: bool) -> bool {
    glob_to_regex(glob, case_insensitive).is_ok_and(|regex| regex.is_match(text))
}

/// Does `text` contain a match for `glob` anywhere.
#[must_use]
pub fn glob_contains(glob: &str, text: &str, case_insensitive: bool) -> bool {
    glob_matches(&format!("*{glob}*"), text, case_insensitive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ls*", "ls -la", true)]
    #[test_case("ls*", "cat ls", false)]
    #[test_case("?at", "cat", true)]
    #[test_case("[ch]at", "hat", true)]
    #[test_case("[!ch]at", "hat", false)]
    #[test_case("a.b", "axb", false)]
    #[test_case("\\*", "*", true)]
    fn test_glob_matches(glob: &str, text: &str, expected: bool) {
        assert_eq!(glob_matches(glob, text, false), expected);
    }

    #[test]
    fn test_case_insensitive_and_contains() {
        assert!(glob_matches("LS*", "ls -la", true));
        assert!(!glob_matches("LS*", "ls -la", false));
        assert!(glob_contains("g?t", "git status", false));
    }
}
