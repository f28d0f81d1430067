/*!
 * Classification policies
 *
 * A policy decides, for every entry the walker reaches, whether it is
 * ignored and whether its content belongs in the report. The walker is
 * shared; profiles differ only in the policy they plug in.
 */

pub mod summary;
pub mod unified;

pub use summary::{SummaryPolicy, WEB_PROFILE};
pub use unified::UnifiedPolicy;

use crate::types::{FileEntry, SkipReason};

/// How the walker renders the structure listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLayout {
    /// `├── ` / `└── ` connectors, no root line
    Connectors,
    /// `- name` outline indented two spaces per level, headed by the root
    Outline,
}

/// Decisions the walker asks of a profile
pub trait ClassificationPolicy {
    /// Reason to drop a directory (and its whole subtree), if any
    fn dir_skip_reason(&self, entry: &FileEntry) -> Option<SkipReason>;

    /// Reason to drop a file from the listing, if any
    fn file_skip_reason(&self, entry: &FileEntry) -> Option<SkipReason>;

    /// Whether a listed file has its content embedded in the report
    fn should_include_content(&self, entry: &FileEntry) -> bool;

    /// Whether a listed directory is recursed into
    fn should_descend(&self, _entry: &FileEntry) -> bool {
        true
    }

    /// Rendering style of the structure listing
    fn layout(&self) -> TreeLayout;

    fn should_ignore_dir(&self, entry: &FileEntry) -> bool {
        self.dir_skip_reason(entry).is_some()
    }

    fn should_ignore_file(&self, entry: &FileEntry) -> bool {
        self.file_skip_reason(entry).is_some()
    }
}
