//! Policy of the generic unified scanner

use std::path::Path;

use crate::config::{ScanConfig, RULES_FILE_NAME};
use crate::gitignore::IgnoreRules;
use crate::pattern::Pattern;
use crate::types::{FileEntry, SkipReason};

use super::{ClassificationPolicy, TreeLayout};

/// Hidden check, ignore rules, name sets, extensions, then size
pub struct UnifiedPolicy {
    config: ScanConfig,
    rules: IgnoreRules,
    file_patterns: Vec<Pattern>,
}

impl UnifiedPolicy {
    pub fn new(config: ScanConfig, rules: IgnoreRules) -> Self {
        let mut sources: Vec<&String> = config.ignore_file_patterns.iter().collect();
        sources.sort();
        let file_patterns = sources.into_iter().map(|p| Pattern::new(p)).collect();

        Self {
            config,
            rules,
            file_patterns,
        }
    }

    /// Build the policy for a project, loading its `.gitignore` when asked
    pub fn for_project(config: ScanConfig, project_dir: &Path, respect_gitignore: bool) -> Self {
        let rules = if respect_gitignore {
            IgnoreRules::load(&project_dir.join(RULES_FILE_NAME))
        } else {
            IgnoreRules::empty()
        };
        Self::new(config, rules)
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn rules(&self) -> &IgnoreRules {
        &self.rules
    }

    fn hidden_or_ruled(&self, entry: &FileEntry) -> Option<SkipReason> {
        if !self.config.include_hidden && entry.name.starts_with('.') {
            return Some(SkipReason::Hidden);
        }
        if self.rules.is_ignored(&entry.relative_str()) {
            return Some(SkipReason::Gitignore);
        }
        None
    }
}

impl ClassificationPolicy for UnifiedPolicy {
    fn dir_skip_reason(&self, entry: &FileEntry) -> Option<SkipReason> {
        if let Some(reason) = self.hidden_or_ruled(entry) {
            return Some(reason);
        }
        if self.config.ignore_dir_names.contains(&entry.name) {
            return Some(SkipReason::IgnoredDir(entry.name.clone()));
        }
        None
    }

    fn file_skip_reason(&self, entry: &FileEntry) -> Option<SkipReason> {
        if let Some(reason) = self.hidden_or_ruled(entry) {
            return Some(reason);
        }

        if let Some(pattern) = self.file_patterns.iter().find(|p| p.matches(&entry.name)) {
            return Some(SkipReason::IgnoredPattern(pattern.as_str().to_string()));
        }

        if !entry.extension.is_empty() && self.config.ignore_extensions.contains(&entry.extension)
        {
            return Some(SkipReason::IgnoredExtension(entry.extension.clone()));
        }

        match entry.size_bytes {
            None => Some(SkipReason::Unreadable),
            Some(size) if size > self.config.max_file_size_bytes => {
                Some(SkipReason::TooLarge(self.config.max_file_size_bytes))
            }
            Some(_) => None,
        }
    }

    fn should_include_content(&self, entry: &FileEntry) -> bool {
        if self.config.literal_include_names.contains(&entry.name) {
            return true;
        }
        if self.config.code_extensions.contains(&entry.extension) {
            return true;
        }
        // No extension: most likely a script or plain text file
        entry.extension.is_empty() && !entry.name.starts_with('.')
    }

    fn layout(&self) -> TreeLayout {
        TreeLayout::Connectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn fixture(files: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            if path.ends_with('/') {
                fs::create_dir_all(&full).unwrap();
                continue;
            }
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
        dir
    }

    fn entry(dir: &TempDir, rel: &str) -> FileEntry {
        FileEntry::from_path(dir.path(), &dir.path().join(rel))
    }

    fn policy(rules: &str) -> UnifiedPolicy {
        UnifiedPolicy::new(ScanConfig::for_project("demo", &[]), IgnoreRules::parse(rules))
    }

    #[test]
    fn test_hidden_checked_before_rules() {
        let dir = fixture(&[(".env.example", "A=1")]);
        let policy = policy("!.env.example\n");
        assert_eq!(
            policy.file_skip_reason(&entry(&dir, ".env.example")),
            Some(SkipReason::Hidden)
        );
    }

    #[test]
    fn test_rules_checked_before_extension() {
        let dir = fixture(&[("logo.png", "x")]);
        let policy = policy("logo.*\n");
        assert_eq!(
            policy.file_skip_reason(&entry(&dir, "logo.png")),
            Some(SkipReason::Gitignore)
        );
    }

    #[test]
    fn test_file_patterns_and_extensions() {
        let dir = fixture(&[("debug.log", "x"), ("lib.SO", "x"), ("main.rs", "fn main() {}")]);
        let policy = policy("");
        assert_eq!(
            policy.file_skip_reason(&entry(&dir, "debug.log")),
            Some(SkipReason::IgnoredPattern("*.log".to_string()))
        );
        assert_eq!(
            policy.file_skip_reason(&entry(&dir, "lib.SO")),
            Some(SkipReason::IgnoredExtension(".so".to_string()))
        );
        assert_eq!(policy.file_skip_reason(&entry(&dir, "main.rs")), None);
    }

    #[test]
    fn test_size_limit_boundary() {
        let dir = fixture(&[("exact.txt", "0123456789"), ("over.txt", "0123456789A")]);
        let mut config = ScanConfig::for_project("demo", &[]);
        config.max_file_size_bytes = 10;
        let policy = UnifiedPolicy::new(config, IgnoreRules::empty());

        assert_eq!(policy.file_skip_reason(&entry(&dir, "exact.txt")), None);
        assert_eq!(
            policy.file_skip_reason(&entry(&dir, "over.txt")),
            Some(SkipReason::TooLarge(10))
        );
    }

    #[test]
    fn test_unstattable_file_is_ignored() {
        let dir = fixture(&[]);
        let policy = policy("");
        assert_eq!(
            policy.file_skip_reason(&entry(&dir, "vanished.rs")),
            Some(SkipReason::Unreadable)
        );
    }

    #[test]
    fn test_dir_decisions() {
        let dir = fixture(&[("node_modules/", ""), (".github/", ""), ("generated/", ""), ("src/", "")]);
        let policy = policy("generated\n");
        assert!(policy.should_ignore_dir(&entry(&dir, "node_modules")));
        assert_eq!(
            policy.dir_skip_reason(&entry(&dir, ".github")),
            Some(SkipReason::Hidden)
        );
        assert_eq!(
            policy.dir_skip_reason(&entry(&dir, "generated")),
            Some(SkipReason::Gitignore)
        );
        assert!(!policy.should_ignore_dir(&entry(&dir, "src")));
    }

    #[test]
    fn test_include_hidden_override() {
        let dir = fixture(&[(".github/", "")]);
        let mut config = ScanConfig::for_project("demo", &[]);
        config.include_hidden = true;
        let policy = UnifiedPolicy::new(config, IgnoreRules::empty());
        assert!(!policy.should_ignore_dir(&entry(&dir, ".github")));
    }

    #[test]
    fn test_content_inclusion() {
        let dir = fixture(&[
            ("Dockerfile", "FROM scratch"),
            ("LICENSE", "MIT"),
            ("app.ts", "x"),
            ("run", "#!/bin/sh"),
            ("data.csv", "a,b"),
            (".prettierrc", "{}"),
        ]);
        let policy = policy("");
        assert!(policy.should_include_content(&entry(&dir, "Dockerfile")));
        assert!(policy.should_include_content(&entry(&dir, "LICENSE")));
        assert!(policy.should_include_content(&entry(&dir, "app.ts")));
        assert!(policy.should_include_content(&entry(&dir, "run")));
        assert!(!policy.should_include_content(&entry(&dir, "data.csv")));
        assert!(!policy.should_include_content(&entry(&dir, ".prettierrc")));
    }
}
