/*!
 * Text report writer for codescan
 */

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, ResultExt};
use crate::scanner::ScanOutcome;
use crate::types::{FileEntry, ScanStats};
use crate::utils::{decode_text, format_file_size, is_binary};

const UNIFIED_RULE_WIDTH: usize = 80;
const UNIFIED_END_WIDTH: usize = 40;
const SUMMARY_RULE_WIDTH: usize = 30;
const SUMMARY_END_WIDTH: usize = 15;

/// Report flavour together with the data its header needs
#[derive(Debug, Clone)]
pub enum ReportStyle {
    /// Unified scan report with header block and summary footer
    Unified {
        project_name: String,
        project_type: String,
        project_path: PathBuf,
    },
    /// Web summary report
    Summary {
        /// Sorted target subdirectories
        target_subdirs: Vec<String>,
        /// Sorted names whose content is ignored
        ignored_names: Vec<String>,
        /// Sorted extensions whose content is ignored
        ignored_extensions: Vec<String>,
        /// Content of larger files is replaced by a placeholder
        max_file_size: Option<u64>,
        /// Extensions always treated as binary
        binary_extensions: HashSet<String>,
    },
}

/// Writes the structure and file contents of a scan
pub struct ReportWriter {
    /// Report flavour
    style: ReportStyle,
    /// No extension is binary by name in unified reports
    no_binary_extensions: HashSet<String>,
}

impl ReportWriter {
    /// Create a new report writer
    pub fn new(style: ReportStyle) -> Self {
        Self {
            style,
            no_binary_extensions: HashSet::new(),
        }
    }

    /// Write the report to `path`, returning the final counters
    pub fn write_to_file(&self, path: &Path, outcome: &ScanOutcome) -> Result<ScanStats> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        let stats = self.write(&mut writer, outcome)?;
        writer.flush()?;

        Ok(stats)
    }

    /// Write the report to any sink
    pub fn write<W: Write>(&self, out: &mut W, outcome: &ScanOutcome) -> io::Result<ScanStats> {
        let mut stats = outcome.stats;

        match &self.style {
            ReportStyle::Unified {
                project_name,
                project_type,
                project_path,
            } => {
                let rule = "=".repeat(UNIFIED_RULE_WIDTH);
                writeln!(out, "{}", rule)?;
                writeln!(out, " Project: {}", project_name)?;
                writeln!(out, " Type: {}", project_type)?;
                writeln!(out, " Path: {}", project_path.display())?;
                writeln!(out, " Files to process: {}", outcome.files.len())?;
                writeln!(out, "{}\n", rule)?;

                self.write_section_title(out, &rule, "Project Structure")?;
                self.write_structure(out, &outcome.structure)?;
                self.write_section_title(out, &rule, "File Contents")?;

                for entry in &outcome.files {
                    self.write_unified_file(out, entry, &mut stats)?;
                }

                self.write_summary(out, &rule, &stats)?;
            }
            ReportStyle::Summary {
                target_subdirs,
                ignored_names,
                ignored_extensions,
                ..
            } => {
                let rule = "=".repeat(SUMMARY_RULE_WIDTH);
                writeln!(out, "{}", rule)?;
                writeln!(out, " Project Structure")?;
                writeln!(out, "{}", rule)?;
                writeln!(
                    out,
                    "(Content from subfolders except {} was ignored)",
                    target_subdirs.join(", ")
                )?;
                writeln!(
                    out,
                    "(Content from files like {} and extensions {} ignored)\n",
                    ignored_names.join(", "),
                    ignored_extensions.join(", ")
                )?;

                self.write_structure(out, &outcome.structure)?;
                self.write_section_title(out, &rule, "Relevant File Contents")?;

                for entry in &outcome.files {
                    self.write_summary_file(out, entry, &mut stats)?;
                }
            }
        }

        Ok(stats)
    }

    fn write_section_title<W: Write>(&self, out: &mut W, rule: &str, title: &str) -> io::Result<()> {
        writeln!(out, "{}", rule)?;
        writeln!(out, " {}", title)?;
        writeln!(out, "{}\n", rule)
    }

    fn write_structure<W: Write>(&self, out: &mut W, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        write!(out, "\n\n")
    }

    /// Write one file of a unified report
    fn write_unified_file<W: Write>(
        &self,
        out: &mut W,
        entry: &FileEntry,
        stats: &mut ScanStats,
    ) -> io::Result<()> {
        let rel = entry.relative_str();

        if is_binary(&entry.absolute_path, &self.no_binary_extensions) {
            write!(out, "--- {} (BINARY - SKIPPED) ---\n\n", rel)?;
            stats.files_skipped += 1;
            return Ok(());
        }

        let bytes = match fs::read(&entry.absolute_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Error reading {}: {}", entry.absolute_path.display(), e);
                writeln!(out, "--- {} (ERROR) ---", rel)?;
                write!(out, "Error reading file: {}\n\n", e)?;
                stats.error_count += 1;
                return Ok(());
            }
        };
        if bytes.is_empty() {
            return Ok(());
        }

        let content = decode_text(&bytes);
        write!(out, "--- {} ---\n\n", rel)?;
        out.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writeln!(out)?;
        }
        let bar = "=".repeat(UNIFIED_END_WIDTH);
        write!(out, "\n{} End of {} {}\n\n", bar, rel, bar)?;

        stats.files_processed += 1;
        stats.total_content_bytes += content.len() as u64;
        Ok(())
    }

    /// Write one file of a web summary report
    fn write_summary_file<W: Write>(
        &self,
        out: &mut W,
        entry: &FileEntry,
        stats: &mut ScanStats,
    ) -> io::Result<()> {
        let (max_file_size, binary_extensions) = match &self.style {
            ReportStyle::Summary {
                max_file_size,
                binary_extensions,
                ..
            } => (*max_file_size, binary_extensions),
            ReportStyle::Unified { .. } => (None, &self.no_binary_extensions),
        };
        let rel = entry.relative_str();
        let bar = "=".repeat(SUMMARY_END_WIDTH);

        if let Some(limit) = max_file_size {
            match fs::metadata(&entry.absolute_path) {
                Ok(metadata) if metadata.len() > limit => {
                    write!(
                        out,
                        "--- File: {} --- (CONTENT IGNORED - TOO LARGE)\n\n",
                        rel
                    )?;
                    write!(out, "{} End of {} {}\n\n", bar, rel, bar)?;
                    stats.files_skipped += 1;
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => {
                    write!(out, "--- File: {} ---\n\n", rel)?;
                    writeln!(out, "*** Error checking file size: {} ***", e)?;
                    write!(out, "\n\n{} End of {} (with error) {}\n\n", bar, rel, bar)?;
                    stats.error_count += 1;
                    return Ok(());
                }
            }
        }

        if is_binary(&entry.absolute_path, binary_extensions) {
            write!(out, "--- File: {} ---\n\n", rel)?;
            writeln!(out, "*** BINARY FILE - CONTENT NOT DISPLAYED ***")?;
            write!(out, "\n\n{} End of {} {}\n\n", bar, rel, bar)?;
            stats.files_skipped += 1;
            return Ok(());
        }

        let bytes = match fs::read(&entry.absolute_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Error reading {}: {}", entry.absolute_path.display(), e);
                write!(out, "--- File: {} ---\n\n", rel)?;
                writeln!(out, "*** Error reading file: {} ***", e)?;
                write!(out, "\n\n{} End of {} (with error) {}\n\n", bar, rel, bar)?;
                stats.error_count += 1;
                return Ok(());
            }
        };
        if bytes.is_empty() {
            return Ok(());
        }

        let content = decode_text(&bytes);
        write!(out, "--- File: {} ---\n\n", rel)?;
        out.write_all(content.as_bytes())?;
        write!(out, "\n\n{} End of {} {}\n\n", bar, rel, bar)?;

        stats.files_processed += 1;
        stats.total_content_bytes += content.len() as u64;
        Ok(())
    }

    fn write_summary<W: Write>(&self, out: &mut W, rule: &str, stats: &ScanStats) -> io::Result<()> {
        writeln!(out, "\n{}", rule)?;
        writeln!(out, " Summary")?;
        writeln!(out, "{}", rule)?;
        writeln!(out, "Files processed: {}", stats.files_processed)?;
        writeln!(out, "Files skipped: {}", stats.files_skipped)?;
        writeln!(
            out,
            "Total size: {}",
            format_file_size(stats.total_content_bytes)
        )?;
        writeln!(out, "Errors: {}", stats.error_count)?;
        writeln!(out, "{}", rule)
    }
}
