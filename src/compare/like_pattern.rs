use crate::compare::error::CompareError;
use regex::bytes::Regex;

const WILDCARD: char = '%';

/// Any run of bytes, newlines included.
const GAP: &str = "(?s-u:.*)";

/// A compiled LIKE pattern.
///
/// `%` matches any run of bytes, including an empty one. The literal segments
/// between wildcards must appear in the value in order and without overlapping;
/// the first segment is anchored at the start unless the pattern begins with `%`,
/// and the last segment is anchored at the end unless the pattern ends with `%`.
///
/// Matching runs over raw bytes, so the value does not have to be valid UTF-8.
#[derive(Debug, Clone)]
pub(crate) struct LikePattern {
    regex: Regex,
}

impl LikePattern {
    /// Compiles a LIKE pattern.
    ///
    /// # Returns
    ///
    /// * `Ok(LikePattern)` - The compiled pattern.
    /// * `Err(CompareError::InvalidPattern)` - If the regex engine rejects the translated pattern.
    pub(crate) fn new(pattern: &str) -> Result<Self, CompareError> {
        let segments = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>();

        let regex = Regex::new(&format!("^{}$", segments.join(GAP)))?;
        Ok(Self { regex })
    }

    pub(crate) fn matches(&self, value: &[u8]) -> bool {
        self.regex.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn like(pattern: &str) -> LikePattern {
        LikePattern::new(pattern).unwrap()
    }

    #[test]
    fn pattern_without_wildcard_requires_exact_match() {
        let pattern = like("brian");

        assert!(pattern.matches(b"brian"));
        assert!(!pattern.matches(b"brianna"));
        assert!(!pattern.matches(b"obrian"));
    }

    #[test]
    fn leading_wildcard_requires_suffix() {
        let pattern = like("%a");

        assert!(pattern.matches(b"ba"));
        assert!(pattern.matches(b"a"));
        assert!(!pattern.matches(b"ab"));
    }

    #[test]
    fn trailing_wildcard_requires_prefix() {
        let pattern = like("a%");

        assert!(pattern.matches(b"abc"));
        assert!(!pattern.matches(b"cab"));
    }

    #[test]
    fn wildcards_on_both_sides_require_containment() {
        let pattern = like("%a%");

        assert!(pattern.matches(b"a"));
        assert!(pattern.matches(b"bab"));
        assert!(pattern.matches(b"dennis and mark"));
        assert!(!pattern.matches(b"brown"));
    }

    #[test]
    fn inner_wildcard_requires_segments_in_order() {
        let pattern = like("a%aa");

        assert!(!pattern.matches(b"abc"));
        assert!(pattern.matches(b"abaa"));
        assert!(pattern.matches(b"aaa"));
    }

    #[test]
    fn segments_do_not_overlap() {
        let pattern = like("a%a");

        assert!(!pattern.matches(b"a"));
        assert!(pattern.matches(b"aa"));
    }

    #[test]
    fn segments_are_matched_in_sequence() {
        let pattern = like("%de%is%");

        assert!(pattern.matches(b"dennis"));
        assert!(!pattern.matches(b"isde"));
    }

    #[test]
    fn lone_wildcard_matches_everything() {
        let pattern = like("%");

        assert!(pattern.matches(b""));
        assert!(pattern.matches(b"anything"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let pattern = like("a.b%");

        assert!(pattern.matches(b"a.bc"));
        assert!(!pattern.matches(b"axbc"));
    }

    #[test]
    fn wildcard_spans_newlines_and_invalid_utf8() {
        let pattern = like("a%z");

        assert!(pattern.matches(b"a\nz"));
        assert!(pattern.matches(&[b'a', 0xff, b'z']));
    }
}
