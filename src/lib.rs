/*!
 * codescan - Flatten project directories into single text reports
 *
 * Each project under an input directory is walked once; the rendered
 * directory structure and the contents of the relevant files are written
 * to one plain-text report per project.
 */

pub mod batch;
pub mod config;
pub mod error;
pub mod gitignore;
pub mod pattern;
pub mod policy;
pub mod project;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, ConfigOverrides, ProfileKind, ScanConfig};
pub use error::{Result, ScanError};
pub use gitignore::IgnoreRules;
pub use pattern::Pattern;
pub use policy::{ClassificationPolicy, SummaryPolicy, UnifiedPolicy, WEB_PROFILE};
pub use report::{BatchReport, ProjectResult, ReportFormat, Reporter};
pub use scanner::{ScanOutcome, Scanner};
pub use types::{FileEntry, ScanStats, SkipReason};
pub use utils::format_file_size;
pub use writer::{ReportStyle, ReportWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
