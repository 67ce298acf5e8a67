// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// The longest prefix shared by all `words`, `None` if there are no words. With
/// `case_insensitive` chars are compared lowercased, and the prefix is taken from the
/// first word.
#[must_use]
pub fn common_prefix<S: AsRef<str>>(words: &[S], case_insensitive: bool) -> Option<String> {
    let (first, rest) = words.split_first()?;
    let first: Vec<char> = first.as_ref().chars().collect();
    let same = |a: char, b: char| {
        if case_insensitive {
            a.to_lowercase().eq(b.to_lowercase())
        } else {
            a == b
        }
    };
    let len = rest.iter().fold(first.len(), |len, word| {
        word.as_ref()
            .chars()
            .zip(&first[..len])
            .take_while(|(a, b)| same(*a, **b))
            .count()
    });
    Some(first[..len].iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(&["foobar", "foobaz", "foo"], false, Some("foo"))]
    #[test_case(&["Make", "makefile"], true, Some("Make"))]
    #[test_case(&["Make", "makefile"], false, Some(""))]
    #[test_case(&["alone"], false, Some("alone"))]
    #[test_case(&[], false, None)]
    fn test_common_prefix(words: &[&str], case_insensitive: bool, expected: Option<&str>) {
        assert_eq!(
            common_prefix(words, case_insensitive),
            expected.map(ToString::to_string)
        );
    }
}
