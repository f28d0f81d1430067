/*!
 * Core types and data structures for codescan
 */

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::extension_lower;

/// A filesystem entry as seen by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute (or root-joined) path on disk
    pub absolute_path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// Entry name
    pub name: String,
    /// Lower-cased extension with leading dot, empty when absent
    pub extension: String,
    /// Size in bytes; `None` when the entry could not be stat'ed
    pub size_bytes: Option<u64>,
    /// Whether the entry resolves to a directory
    pub is_directory: bool,
    /// Whether the entry itself is a symbolic link
    pub is_symlink: bool,
    /// Number of components in `relative_path` (1 for root children)
    pub depth: usize,
}

impl FileEntry {
    /// Build an entry for `absolute_path` located under `root`.
    ///
    /// Symlinks are resolved for the size and directory checks.
    pub fn from_path(root: &Path, absolute_path: &Path) -> Self {
        let relative_path = absolute_path
            .strip_prefix(root)
            .unwrap_or(absolute_path)
            .to_path_buf();
        let name = absolute_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let is_symlink = fs::symlink_metadata(absolute_path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        let metadata = fs::metadata(absolute_path).ok();

        Self {
            extension: extension_lower(&name),
            size_bytes: metadata.as_ref().map(|m| m.len()),
            is_directory: metadata.as_ref().map_or(false, |m| m.is_dir()),
            depth: relative_path.components().count(),
            absolute_path: absolute_path.to_path_buf(),
            relative_path,
            name,
            is_symlink,
        }
    }

    /// Relative path with `/` separators, as used by ignore rules
    pub fn relative_str(&self) -> String {
        self.relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether the entry sits directly under the scan root
    pub fn is_root_level(&self) -> bool {
        self.depth == 1
    }
}

/// Counters gathered during one project scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Files whose content was written to the report
    pub files_processed: u64,
    /// Files ignored by classification or replaced by a binary placeholder
    pub files_skipped: u64,
    /// Bytes of decoded content written
    pub total_content_bytes: u64,
    /// Per-file read failures
    pub error_count: u64,
}

impl ScanStats {
    /// Add another scan's counters to this one
    pub fn absorb(&mut self, other: &ScanStats) {
        self.files_processed += other.files_processed;
        self.files_skipped += other.files_skipped;
        self.total_content_bytes += other.total_content_bytes;
        self.error_count += other.error_count;
    }
}

/// Why an entry was ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Name starts with a dot and hidden entries are excluded
    Hidden,
    /// Matched by the project's `.gitignore`
    Gitignore,
    /// Name is in the ignored directory set
    IgnoredDir(String),
    /// Name matched an ignored file pattern
    IgnoredPattern(String),
    /// Extension is in the ignored extension set
    IgnoredExtension(String),
    /// Larger than the configured limit
    TooLarge(u64),
    /// Metadata could not be read
    Unreadable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Hidden => write!(f, "hidden"),
            SkipReason::Gitignore => write!(f, "in .gitignore"),
            SkipReason::IgnoredDir(name) => write!(f, "in ignore list: {}", name),
            SkipReason::IgnoredPattern(p) => write!(f, "matches ignore pattern: {}", p),
            SkipReason::IgnoredExtension(ext) => write!(f, "ignored extension: {}", ext),
            SkipReason::TooLarge(limit) => write!(f, "file too large (>{} bytes)", limit),
            SkipReason::Unreadable => write!(f, "cannot stat file"),
        }
    }
}
