/*!
 * Directory walking and structure rendering
 *
 * A single traversal produces both the rendered structure lines and the
 * list of files whose content goes into the report, so the listing and
 * the collected files always agree on every ignore decision.
 */

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::policy::{ClassificationPolicy, TreeLayout};
use crate::types::{FileEntry, ScanStats};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";
const OUTLINE_INDENT: &str = "  ";
const COLLAPSED_MARKER: &str = " [...ignored]";

/// Result of walking one project
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Rendered structure lines, without trailing newlines
    pub structure: Vec<String>,
    /// Files selected for content inclusion, sorted by relative path
    pub files: Vec<FileEntry>,
    /// Counters updated during the walk
    pub stats: ScanStats,
}

/// Walks a project directory under a classification policy
pub struct Scanner<'a, P: ClassificationPolicy> {
    /// Scan root
    root: PathBuf,
    /// Profile rules
    policy: &'a P,
}

impl<'a, P: ClassificationPolicy> Scanner<'a, P> {
    /// Create a new scanner
    pub fn new(root: &Path, policy: &'a P) -> Self {
        Self {
            root: root.to_path_buf(),
            policy,
        }
    }

    /// Walk the whole tree.
    ///
    /// Unreadable directories are logged and contribute no children; the
    /// walk itself never fails.
    pub fn scan(&self) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        if self.policy.layout() == TreeLayout::Outline {
            outcome
                .structure
                .push(format!("- {}/ (root)", self.root_name()));
        }

        self.scan_directory(&self.root, "", 1, &mut outcome);

        outcome
            .files
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        outcome
    }

    fn root_name(&self) -> String {
        match self.root.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => fs::canonicalize(&self.root)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
                .unwrap_or_default(),
        }
    }

    /// List the children of `dir`: directories first, then files, by name
    fn read_children(&self, dir: &Path) -> Vec<FileEntry> {
        let mut children = Vec::new();

        for result in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            match result {
                Ok(entry) => children.push(FileEntry::from_path(&self.root, entry.path())),
                Err(e) => log::warn!("Could not read directory {}: {}", dir.display(), e),
            }
        }

        children.sort_by(|a, b| match (a.is_directory, b.is_directory) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });
        children
    }

    /// Recursively scan a directory
    fn scan_directory(&self, dir: &Path, prefix: &str, level: usize, outcome: &mut ScanOutcome) {
        let children = self.read_children(dir);
        let count = children.len();

        for (index, entry) in children.into_iter().enumerate() {
            // Position within the full listing, before any entry is dropped
            let is_last = index + 1 == count;

            if entry.is_directory {
                if let Some(reason) = self.policy.dir_skip_reason(&entry) {
                    log::debug!("Skipping directory {}: {}", entry.relative_str(), reason);
                    continue;
                }

                let descend = self.policy.should_descend(&entry);
                outcome
                    .structure
                    .push(self.render_line(&entry, prefix, level, is_last, !descend));

                if !descend {
                    continue;
                }
                if entry.is_symlink {
                    log::debug!("Not following symlinked directory {}", entry.relative_str());
                    continue;
                }

                let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { PIPE });
                self.scan_directory(&entry.absolute_path, &child_prefix, level + 1, outcome);
            } else {
                if let Some(reason) = self.policy.file_skip_reason(&entry) {
                    log::debug!("Skipping {}: {}", entry.relative_str(), reason);
                    outcome.stats.files_skipped += 1;
                    continue;
                }

                outcome
                    .structure
                    .push(self.render_line(&entry, prefix, level, is_last, false));

                if self.policy.should_include_content(&entry) {
                    outcome.files.push(entry);
                }
            }
        }
    }

    fn render_line(
        &self,
        entry: &FileEntry,
        prefix: &str,
        level: usize,
        is_last: bool,
        collapsed: bool,
    ) -> String {
        let slash = if entry.is_directory { "/" } else { "" };

        match self.policy.layout() {
            TreeLayout::Connectors => {
                let connector = if is_last { LAST_BRANCH } else { BRANCH };
                format!("{}{}{}{}", prefix, connector, entry.name, slash)
            }
            TreeLayout::Outline => {
                let marker = if collapsed { COLLAPSED_MARKER } else { "" };
                format!(
                    "{}- {}{}{}",
                    OUTLINE_INDENT.repeat(level),
                    entry.name,
                    slash,
                    marker
                )
            }
        }
    }
}
