/*!
 * Reporting functionality for codescan
 *
 * Renders per-project and batch results as console tables with the
 * tabled library.
 */

use std::path::PathBuf;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::ScanStats;
use crate::utils::format_file_size;

/// Outcome of a single project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    /// Report written to the given file
    Written(PathBuf),
    /// Project aborted with the given message
    Failed(String),
}

/// Result of scanning one project
#[derive(Debug, Clone)]
pub struct ProjectResult {
    /// Project directory name
    pub name: String,
    /// Detected project types, primary first
    pub project_types: Vec<String>,
    /// Counters of the run
    pub stats: ScanStats,
    /// Whether the report was written
    pub status: ProjectStatus,
}

impl ProjectResult {
    /// Result for a project that failed before its report was complete
    pub fn failed(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            project_types: Vec::new(),
            stats: ScanStats::default(),
            status: ProjectStatus::Failed(message),
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.status, ProjectStatus::Written(_))
    }
}

/// Results of a whole batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Per-project results in processing order
    pub projects: Vec<ProjectResult>,
}

impl BatchReport {
    /// Number of projects whose report was written
    pub fn succeeded(&self) -> usize {
        self.projects.iter().filter(|p| p.succeeded()).count()
    }

    /// Number of projects attempted
    pub fn total(&self) -> usize {
        self.projects.len()
    }

    /// Counters summed over successful projects
    pub fn totals(&self) -> ScanStats {
        let mut totals = ScanStats::default();
        for project in self.projects.iter().filter(|p| p.succeeded()) {
            totals.absorb(&project.stats);
        }
        totals
    }

    /// A batch succeeds when at least one project did
    pub fn is_success(&self) -> bool {
        self.succeeded() > 0
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for batch results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: u64) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string for a batch
    pub fn generate_report(&self, report: &BatchReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &BatchReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn style(table: &mut Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    // One row per project
    fn create_projects_table(&self, report: &BatchReport) -> String {
        #[derive(Tabled)]
        struct ProjectRow {
            #[tabled(rename = "Project")]
            name: String,

            #[tabled(rename = "Type")]
            project_type: String,

            #[tabled(rename = "Processed")]
            processed: String,

            #[tabled(rename = "Skipped")]
            skipped: String,

            #[tabled(rename = "Size")]
            size: String,

            #[tabled(rename = "Errors")]
            errors: String,

            #[tabled(rename = "Status")]
            status: String,
        }

        let rows: Vec<ProjectRow> = report
            .projects
            .iter()
            .map(|project| ProjectRow {
                name: project.name.clone(),
                project_type: project
                    .project_types
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "-".to_string()),
                processed: self.format_number(project.stats.files_processed),
                skipped: self.format_number(project.stats.files_skipped),
                size: format_file_size(project.stats.total_content_bytes),
                errors: self.format_number(project.stats.error_count),
                status: match &project.status {
                    ProjectStatus::Written(_) => "ok".to_string(),
                    ProjectStatus::Failed(message) => format!("failed: {}", message),
                },
            })
            .collect();

        Self::style(&mut Table::new(rows))
    }

    // Totals over the whole batch
    fn create_summary_table(&self, report: &BatchReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let totals = report.totals();
        let rows = vec![
            SummaryRow {
                key: "Projects processed".to_string(),
                value: format!("{}/{}", report.succeeded(), report.total()),
            },
            SummaryRow {
                key: "Files processed".to_string(),
                value: self.format_number(totals.files_processed),
            },
            SummaryRow {
                key: "Files skipped".to_string(),
                value: self.format_number(totals.files_skipped),
            },
            SummaryRow {
                key: "Total size".to_string(),
                value: format_file_size(totals.total_content_bytes),
            },
            SummaryRow {
                key: "Errors".to_string(),
                value: self.format_number(totals.error_count),
            },
        ];

        Self::style(&mut Table::new(rows))
    }

    fn generate_console_report(&self, report: &BatchReport) -> String {
        let projects_table = self.create_projects_table(report);
        let summary_table = self.create_summary_table(report);

        format!(
            "PROJECTS\n{}\n\nBATCH TOTALS\n{}",
            projects_table, summary_table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(name: &str, processed: u64) -> ProjectResult {
        ProjectResult {
            name: name.to_string(),
            project_types: vec!["rust".to_string()],
            stats: ScanStats {
                files_processed: processed,
                files_skipped: 1,
                total_content_bytes: 2048,
                error_count: 0,
            },
            status: ProjectStatus::Written(PathBuf::from(format!("{}_unified_scan.txt", name))),
        }
    }

    #[test]
    fn test_batch_counts() {
        let report = BatchReport {
            projects: vec![
                written("alpha", 3),
                ProjectResult::failed("beta", "boom".to_string()),
                written("gamma", 2),
            ],
        };

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert!(report.is_success());

        let totals = report.totals();
        assert_eq!(totals.files_processed, 5);
        assert_eq!(totals.files_skipped, 2);
        assert_eq!(totals.total_content_bytes, 4096);
    }

    #[test]
    fn test_empty_or_failed_batch_is_not_success() {
        assert!(!BatchReport::default().is_success());

        let report = BatchReport {
            projects: vec![ProjectResult::failed("beta", "boom".to_string())],
        };
        assert!(!report.is_success());
    }

    #[test]
    fn test_console_report_contents() {
        let report = BatchReport {
            projects: vec![
                written("alpha", 1500),
                ProjectResult::failed("beta", "disk full".to_string()),
            ],
        };
        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report);

        assert!(text.contains("alpha"));
        assert!(text.contains("1.5K"));
        assert!(text.contains("failed: disk full"));
        assert!(text.contains("1/2"));
        assert!(text.contains("2.00 KB"));
    }
}
