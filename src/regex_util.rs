use regex::{Regex, RegexBuilder};

/// A metadata pattern compiled in the two forms the library needs: a
/// full-match form for validity tests and a prefix-match form for
/// leading-digits and IDD checks.
///
/// Patterns coming out of the metadata are alternation-heavy
/// (`\d{7}|\d{10}` and the like). The regex engine reports the leftmost
/// match, so testing "does the whole input match" by inspecting the span of
/// `find` silently fails when a shorter alternative wins at position zero.
/// Wrapping the source in explicit anchors sidesteps the problem entirely.
pub struct CachedRegex {
    full: Regex,
    prefix: Regex,
}

impl CachedRegex {
    /// Compiles `pattern` case-insensitively, the flags the metadata regexes
    /// were written against (Unicode case folding is the engine default).
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let full = RegexBuilder::new(&format!("^(?:{})$", pattern))
            .case_insensitive(true)
            .build()?;
        let prefix = RegexBuilder::new(&format!("^(?:{})", pattern))
            .case_insensitive(true)
            .build()?;
        Ok(Self { full, prefix })
    }
}

pub trait RegexFullMatch {
    /// Eq of C fullMatch / java matches()
    fn full_match(&self, s: &str) -> bool;
}

pub trait RegexMatchStart {
    /// Eq of java lookingAt()
    fn match_start(&self, s: &str) -> bool;
}

pub trait RegexConsume {
    /// Eq of C Consume: matches at the start of `s` and returns the rest of
    /// the string after the match.
    fn consume_start<'a>(&self, s: &'a str) -> Option<&'a str>;
}

impl RegexFullMatch for CachedRegex {
    fn full_match(&self, s: &str) -> bool {
        self.full.is_match(s)
    }
}

impl RegexMatchStart for CachedRegex {
    fn match_start(&self, s: &str) -> bool {
        self.prefix.is_match(s)
    }
}

impl RegexConsume for CachedRegex {
    fn consume_start<'a>(&self, s: &'a str) -> Option<&'a str> {
        self.prefix.find(s).map(|matched| &s[matched.end()..])
    }
}

// The plain-regex impls are for the handful of statically built patterns
// (plus-sign runs, digit captures). Those are simple character classes where
// span inspection is exact.

impl RegexFullMatch for Regex {
    fn full_match(&self, s: &str) -> bool {
        if let Some(matched) = self.find(s) {
            return matched.start() == 0 && matched.end() == s.len();
        }
        false
    }
}

impl RegexMatchStart for Regex {
    fn match_start(&self, s: &str) -> bool {
        if let Some(matched) = self.find(s) {
            return matched.start() == 0;
        }
        false
    }
}

impl RegexConsume for Regex {
    fn consume_start<'a>(&self, s: &'a str) -> Option<&'a str> {
        let matched = self.find(s)?;
        if matched.start() != 0 {
            return None;
        }
        Some(&s[matched.end()..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_match_is_not_fooled_by_a_shorter_alternative() {
        let pattern = CachedRegex::new(r"\d{2}|\d{4}").unwrap();
        assert!(pattern.full_match("12"));
        assert!(pattern.full_match("1234"));
        assert!(!pattern.full_match("123"));
        assert!(!pattern.full_match("12345"));
    }

    #[test]
    fn consume_start_returns_the_rest() {
        let pattern = CachedRegex::new("00(?:11)?").unwrap();
        assert_eq!(Some("16502530000"), pattern.consume_start("001116502530000"));
        assert_eq!(None, pattern.consume_start("16502530000"));
    }
}
