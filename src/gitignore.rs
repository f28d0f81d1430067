/*!
 * Lightweight `.gitignore` rule store
 *
 * Only the `fnmatch` subset of gitignore is supported: every rule is a
 * shell pattern tested against the relative path and its basename, and
 * a leading `!` turns the rule into a negation.
 */

use std::fs;
use std::path::Path;

use crate::pattern::Pattern;

/// A single rule loaded from a rules file
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    /// Pattern with any leading `!` removed
    pub pattern: Pattern,
    /// Whether the rule re-includes what earlier rules ignored
    pub negated: bool,
}

/// Ordered set of ignore rules; later rules override earlier ones
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// Create an empty store that ignores nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load rules from a file.
    ///
    /// A missing file yields an empty store. Read failures are logged and
    /// also yield an empty store.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::empty();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                log::warn!("Could not load {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Parse rules from file content
    pub fn parse(content: &str) -> Self {
        let rules = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| match line.strip_prefix('!') {
                Some(rest) => IgnoreRule {
                    pattern: Pattern::new(rest),
                    negated: true,
                },
                None => IgnoreRule {
                    pattern: Pattern::new(line),
                    negated: false,
                },
            })
            .collect();

        Self { rules }
    }

    /// Number of loaded rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules were loaded
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check a `/`-separated path relative to the scan root.
    ///
    /// Every rule is consulted in order and the last matching rule decides.
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        if self.rules.is_empty() {
            return false;
        }

        let mut ignored = false;
        for rule in &self.rules {
            if rule.pattern.matches_path(relative_path) {
                ignored = !rule.negated;
            }
        }
        ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_ignores_nothing() {
        let dir = tempdir().unwrap();
        let rules = IgnoreRules::load(&dir.path().join(".gitignore"));
        assert!(rules.is_empty());
        assert!(!rules.is_ignored("anything"));
        assert!(!rules.is_ignored("a/b/c.log"));
    }

    #[test]
    fn test_empty_file_ignores_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        File::create(&path).unwrap();
        let rules = IgnoreRules::load(&path);
        assert!(rules.is_empty());
        assert!(!rules.is_ignored("*"));
    }

    #[test]
    fn test_comments_blanks_and_negation_markers() {
        let rules = IgnoreRules::parse("# comment\n\n   \n*.log\n  !keep.log  \n");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules[1].pattern.as_str(), "keep.log");
        assert!(rules.rules[1].negated);
    }

    #[test]
    fn test_negation_after_match_wins() {
        let rules = IgnoreRules::parse("*.log\n!keep.log\n");
        assert!(rules.is_ignored("app.log"));
        assert!(!rules.is_ignored("keep.log"));
        assert!(!rules.is_ignored("logs/keep.log"));
        assert!(!rules.is_ignored("main.rs"));
    }

    #[test]
    fn test_last_match_wins_not_first() {
        let rules = IgnoreRules::parse("!keep.log\n*.log\n");
        assert!(rules.is_ignored("keep.log"));

        let rules = IgnoreRules::parse("build\n!build/keep\nbuild/keep\n!build/keep\n");
        assert!(rules.is_ignored("build"));
        assert!(!rules.is_ignored("build/keep"));
    }

    #[test]
    fn test_directory_and_nested_path_conflict() {
        let rules = IgnoreRules::parse("build\n!build/keep\n");
        assert!(rules.is_ignored("build"));
        assert!(rules.is_ignored("src/build"));
        assert!(!rules.is_ignored("build/keep"));
        // basename only: the rule "build" does not reach into children
        assert!(!rules.is_ignored("build/other"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "*.tmp").unwrap();
        writeln!(file, "secret/").unwrap();

        let rules = IgnoreRules::load(&path);
        assert_eq!(rules.len(), 2);
        assert!(rules.is_ignored("notes.tmp"));
        // trailing slash patterns never match in the fnmatch subset
        assert!(!rules.is_ignored("secret"));
    }
}
