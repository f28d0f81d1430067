/*!
 * Shell-style pattern matching
 *
 * Patterns follow `fnmatch` rules: `*` matches any run of characters
 * (path separators included), `?` matches a single character and
 * `[seq]` / `[!seq]` match character classes. Matching is case-sensitive.
 */

use globset::{GlobBuilder, GlobMatcher};

/// A compiled shell-style pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Pattern as written in the source file
    source: String,
    /// Compiled matcher, `None` when the pattern is not valid glob syntax
    matcher: Option<GlobMatcher>,
}

impl Pattern {
    /// Compile a pattern. Invalid syntax falls back to literal comparison.
    pub fn new(source: &str) -> Self {
        let matcher = GlobBuilder::new(&translate(source))
            .literal_separator(false)
            .backslash_escape(false)
            .build()
            .map(|glob| glob.compile_matcher());

        let matcher = match matcher {
            Ok(m) => Some(m),
            Err(e) => {
                log::debug!("Pattern {:?} compared literally: {}", source, e);
                None
            }
        };

        Self {
            source: source.to_string(),
            matcher,
        }
    }

    /// The pattern text as originally given
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match against a single name or path string
    pub fn matches(&self, candidate: &str) -> bool {
        match &self.matcher {
            Some(m) => m.is_match(candidate),
            None => candidate == self.source,
        }
    }

    /// Match against a relative path, then against its basename
    pub fn matches_path(&self, relative_path: &str) -> bool {
        self.matches(relative_path) || self.matches(basename(relative_path))
    }
}

/// One-shot form of [`Pattern::matches_path`]
pub fn matches(name_or_path: &str, pattern: &str) -> bool {
    Pattern::new(pattern).matches_path(name_or_path)
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Rewrite fnmatch syntax into the globset dialect.
///
/// globset gives `**`, `{a,b}` and a leading `[^` special meaning; fnmatch
/// does not.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push('*');
            }
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            '[' => {
                let negated = chars.next_if_eq(&'!').is_some();
                let mut members = String::new();
                let mut closed = false;

                for m in chars.by_ref() {
                    // `]` right after the opening bracket is a member
                    if m == ']' && !members.is_empty() {
                        closed = true;
                        break;
                    }
                    members.push(m);
                }

                if closed {
                    push_class(&mut out, negated, &members);
                } else {
                    // Unterminated; left for globset to reject
                    out.push('[');
                    if negated {
                        out.push('!');
                    }
                    out.push_str(&members);
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Emit a closed class whose first member must not read as negation
fn push_class(out: &mut String, negated: bool, members: &str) {
    let rest = match members.strip_prefix('^') {
        Some(rest) => rest,
        None => {
            out.push('[');
            if negated {
                out.push('!');
            }
            out.push_str(members);
            out.push(']');
            return;
        }
    };

    if rest.is_empty() && !negated {
        out.push('^');
        return;
    }

    out.push('[');
    if negated {
        out.push('!');
    }
    // Keep a trailing `-` last so the caret cannot start a range
    match rest.strip_suffix('-') {
        Some("") => out.push_str("-^"),
        Some(head) => {
            out.push_str(head);
            out.push_str("^-");
        }
        None => {
            out.push_str(rest);
            out.push('^');
        }
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_crosses_separators() {
        assert!(matches("logs/app.log", "*.log"));
        assert!(matches("a/b/c.txt", "a*c.txt"));
    }

    #[test]
    fn test_basename_fallback() {
        assert!(matches("deep/nested/keep.log", "keep.log"));
        assert!(!matches("deep/nested/keep.log", "nested"));
    }

    #[test]
    fn test_question_mark_and_classes() {
        assert!(matches("a1.txt", "a?.txt"));
        assert!(!matches("a12.txt", "a?.txt"));
        assert!(matches("file_b.rs", "file_[abc].rs"));
        assert!(!matches("file_d.rs", "file_[abc].rs"));
        assert!(matches("file_d.rs", "file_[!abc].rs"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!matches("README.MD", "*.md"));
    }

    #[test]
    fn test_double_star_behaves_like_star() {
        assert!(matches("src/deep/mod.rs", "src**.rs"));
    }

    #[test]
    fn test_braces_are_literal() {
        assert!(matches("{a,b}.txt", "{a,b}.txt"));
        assert!(!matches("a.txt", "{a,b}.txt"));
    }

    #[test]
    fn test_leading_caret_in_class_is_literal() {
        assert!(!matches("ab", "a[^x]"));
        assert!(matches("a^", "a[^x]"));
        assert!(matches("ax", "a[^x]"));
        assert!(matches("a^", "a[^]"));
        assert!(!matches("ab", "a[^]"));
        assert!(matches("ab", "a[!^]"));
        assert!(!matches("a^", "a[!^]"));
        assert!(matches("a-", "a[^-]"));
    }

    #[test]
    fn test_class_translation() {
        assert_eq!(translate("a[^x]"), "a[x^]");
        assert_eq!(translate("a[!^x]"), "a[!x^]");
        assert_eq!(translate("a[^]"), "a^");
        assert_eq!(translate("a[^x-]"), "a[x^-]");
        assert_eq!(translate("a[^-]"), "a[-^]");
        assert_eq!(translate("[]x]"), "[]x]");
        assert_eq!(translate("a[bc]*"), "a[bc]*");
    }

    #[test]
    fn test_invalid_pattern_compares_literally() {
        let pattern = Pattern::new("weird[");
        assert!(pattern.matches("weird["));
        assert!(!pattern.matches("weird"));
    }
}
