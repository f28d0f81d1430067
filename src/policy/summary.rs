/*!
 * Policy of the web summary scanner
 *
 * Only a handful of root subdirectories are walked deeply. Every other
 * root directory is listed as a collapsed leaf, and content selection is
 * driven by effective extensions (`.config.js` before `.js`).
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::types::{FileEntry, SkipReason};
use crate::utils::{double_extension, extension_lower, is_binary};

use super::{ClassificationPolicy, TreeLayout};

fn to_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Root subdirectories scanned when none are configured
pub fn default_target_subdirs() -> HashSet<String> {
    to_set(&["src", "docs"])
}

/// Base profile for web projects
pub static WEB_PROFILE: Lazy<SummaryPolicy> = Lazy::new(|| SummaryPolicy {
    target_subdirs: default_target_subdirs(),
    code_extensions: to_set(&[
        ".js", ".jsx", ".ts", ".tsx", ".html", ".css", ".scss", ".json", ".md", ".config.js",
        ".yaml", ".yml", ".sh", ".bash", ".mjs", ".puml", ".mermaid",
    ]),
    include_root_files: to_set(&[
        "eslint.config.js",
        "vite.config.js",
        "index.html",
        "package.json",
        "README.md",
        "citation.cff",
        "nest-cli.json",
        "tsconfig.json",
        "tsconfig.build.json",
    ]),
    ignore_root_dirs: to_set(&[
        "node_modules",
        "dist",
        "build",
        ".git",
        ".vscode",
        "__pycache__",
        ".idea",
        "input",
        "output",
    ]),
    ignore_content_files: to_set(&["package-lock.json", ".gitignore"]),
    ignore_content_extensions: to_set(&[
        ".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp", ".ico", ".woff", ".woff2", ".ttf",
        ".otf",
    ]),
    ..SummaryPolicy::default()
});

/// Rules describing how to collect and render a project summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryPolicy {
    /// Root directories walked recursively
    pub target_subdirs: HashSet<String>,
    /// Effective extensions whose content is included
    pub code_extensions: HashSet<String>,
    /// Root files whose content is included by name
    pub include_root_files: HashSet<String>,
    /// Root directories left out of the listing entirely
    pub ignore_root_dirs: HashSet<String>,
    /// File names whose content is never included
    pub ignore_content_files: HashSet<String>,
    /// Effective extensions whose content is never included
    pub ignore_content_extensions: HashSet<String>,
    /// Directory names left out at any depth
    pub ignore_any_dirs: HashSet<String>,
    /// File names left out at any depth
    pub ignore_any_files: HashSet<String>,
    /// Extensions always treated as binary
    pub binary_extensions: HashSet<String>,
    /// Include extension-less files unless they look binary
    pub allow_bare_without_extension: bool,
    /// Use the whole name as effective extension for extension-less files
    pub treat_filename_as_extension: bool,
    /// Content of larger files is replaced by a placeholder
    pub max_file_size: Option<u64>,
}

impl SummaryPolicy {
    /// Copy of this profile scanning `targets` instead
    pub fn with_target_subdirs(&self, targets: HashSet<String>) -> Self {
        Self {
            target_subdirs: targets,
            ..self.clone()
        }
    }

    /// Extension used for matching: double extension first, then single
    pub fn effective_extension(&self, name: &str) -> String {
        let single = extension_lower(name);
        if self.treat_filename_as_extension && single.is_empty() {
            return name.to_string();
        }
        double_extension(name).unwrap_or(single)
    }

    fn is_target(&self, entry: &FileEntry) -> bool {
        entry.is_root_level() && self.target_subdirs.contains(&entry.name)
    }
}

impl ClassificationPolicy for SummaryPolicy {
    fn dir_skip_reason(&self, entry: &FileEntry) -> Option<SkipReason> {
        if self.ignore_any_dirs.contains(&entry.name)
            || (entry.is_root_level() && self.ignore_root_dirs.contains(&entry.name))
        {
            return Some(SkipReason::IgnoredDir(entry.name.clone()));
        }
        None
    }

    fn file_skip_reason(&self, entry: &FileEntry) -> Option<SkipReason> {
        if self.ignore_any_files.contains(&entry.name) {
            return Some(SkipReason::IgnoredPattern(entry.name.clone()));
        }
        None
    }

    fn should_include_content(&self, entry: &FileEntry) -> bool {
        let effective = self.effective_extension(&entry.name);

        if self.ignore_content_files.contains(&entry.name) {
            return false;
        }
        if !effective.is_empty() && self.ignore_content_extensions.contains(&effective) {
            return false;
        }
        if entry.is_root_level() && self.include_root_files.contains(&entry.name) {
            return true;
        }
        if self.code_extensions.contains(&effective) {
            return true;
        }
        if entry.extension.is_empty() && self.allow_bare_without_extension {
            return !is_binary(&entry.absolute_path, &self.binary_extensions);
        }
        false
    }

    /// Nested directories are always walked; at the root only targets are.
    fn should_descend(&self, entry: &FileEntry) -> bool {
        !entry.is_root_level() || self.is_target(entry)
    }

    fn layout(&self) -> TreeLayout {
        TreeLayout::Outline
    }
}
