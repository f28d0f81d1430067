/*!
 * Batch driver
 *
 * Every immediate subdirectory of the input directory is a project. Projects
 * run one after the other; a failing project is logged and the batch moves on.
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigOverrides, ProfileKind, ScanConfig, OVERRIDE_FILE_NAME};
use crate::error::{Result, ResultExt};
use crate::policy::{SummaryPolicy, UnifiedPolicy, WEB_PROFILE};
use crate::project::detect_project_types;
use crate::report::{BatchReport, ProjectResult, ProjectStatus};
use crate::scanner::Scanner;
use crate::utils::format_file_size;
use crate::writer::{ReportStyle, ReportWriter};
use crate::{bail, ensure, error};

/// Report file suffix of the unified profile
pub const UNIFIED_SUFFIX: &str = "_unified_scan.txt";

/// Report file suffix of the web summary profile
pub const SUMMARY_SUFFIX: &str = "_web_summary.txt";

const UNIFIED_RULE_WIDTH: usize = 80;
const SUMMARY_RULE_WIDTH: usize = 60;

fn sorted(set: &HashSet<String>) -> Vec<String> {
    let mut items: Vec<String> = set.iter().cloned().collect();
    items.sort();
    items
}

fn project_name(project_dir: &Path) -> String {
    project_dir
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// List the project directories under `input_dir`, sorted by path.
///
/// A missing input directory is created and reported as an error so the
/// user can fill it before the next run.
pub fn list_projects(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.exists() {
        fs::create_dir_all(input_dir).with_context(|| {
            format!("Failed to create input directory {}", input_dir.display())
        })?;
        bail!(
            Input,
            "Input directory not found, created {}. Add projects to scan and run again",
            input_dir.display()
        );
    }

    let mut projects = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            projects.push(path);
        }
    }
    projects.sort();

    Ok(projects)
}

/// Run the configured profile over every project
pub fn run(config: &Config) -> Result<BatchReport> {
    print_banner(config);

    let projects = list_projects(&config.input_dir)?;

    fs::create_dir_all(&config.output_dir).map_err(|e| {
        error!(
            Writer,
            "Cannot create output directory {}: {}",
            config.output_dir.display(),
            e
        )
    })?;

    ensure!(
        !projects.is_empty(),
        Input,
        "No project directories found in {}",
        config.input_dir.display()
    );

    let summary_policy = match &config.profile {
        ProfileKind::Summary { target_subdirs } => {
            Some(WEB_PROFILE.with_target_subdirs(target_subdirs.clone()))
        }
        ProfileKind::Unified { .. } => None,
    };
    let respect_gitignore = matches!(
        config.profile,
        ProfileKind::Unified {
            respect_gitignore: true
        }
    );

    let mut report = BatchReport::default();
    for project_dir in &projects {
        let name = project_name(project_dir);

        let result = match &summary_policy {
            Some(policy) => scan_summary(project_dir, &config.output_dir, policy),
            None => scan_unified(project_dir, &config.output_dir, respect_gitignore),
        }
        .unwrap_or_else(|e| {
            log::error!("Error scanning project {}: {}", name, e);
            ProjectResult::failed(&name, e.to_string())
        });
        report.projects.push(result);
    }

    print_completion(config, &report);
    Ok(report)
}

/// Scan one project with the unified profile
pub fn scan_unified(
    project_dir: &Path,
    output_dir: &Path,
    respect_gitignore: bool,
) -> Result<ProjectResult> {
    let name = project_name(project_dir);
    let rule = "=".repeat(UNIFIED_RULE_WIDTH);
    println!("\n{}", rule);
    println!("Processing: {}", name);
    println!("{}", rule);

    let project_types = detect_project_types(project_dir);
    println!("Detected types: {}", project_types.join(", "));

    let mut scan_config = ScanConfig::for_project(&name, &project_types);
    let override_path = project_dir.join(OVERRIDE_FILE_NAME);
    if override_path.exists() {
        println!("Found custom config: {}", override_path.display());
        if let Some(overrides) = ConfigOverrides::load(project_dir) {
            scan_config = scan_config.with_overrides(&overrides);
        }
    }
    if !scan_config.target_subdir_names.is_empty() {
        println!(
            "Target subdirectories: {}",
            sorted(&scan_config.target_subdir_names).join(", ")
        );
    }

    let output_file = output_dir.join(format!("{}{}", name, UNIFIED_SUFFIX));
    let style = ReportStyle::Unified {
        project_name: name.clone(),
        project_type: scan_config.project_type.clone(),
        project_path: project_dir.to_path_buf(),
    };

    let policy = UnifiedPolicy::for_project(scan_config, project_dir, respect_gitignore);
    if !policy.rules().is_empty() {
        log::debug!("Loaded {} ignore rules for {}", policy.rules().len(), name);
    }

    println!("Scanning project...");
    let outcome = Scanner::new(project_dir, &policy).scan();
    let stats = ReportWriter::new(style).write_to_file(&output_file, &outcome)?;

    println!("✓ Successfully scanned!");
    println!("  Files processed: {}", stats.files_processed);
    println!("  Files skipped: {}", stats.files_skipped);
    println!("  Total size: {}", format_file_size(stats.total_content_bytes));
    println!("  Errors: {}", stats.error_count);
    println!("  Output: {}", output_file.display());

    Ok(ProjectResult {
        name,
        project_types: project_types.iter().map(|t| t.to_string()).collect(),
        stats,
        status: ProjectStatus::Written(output_file),
    })
}

/// Scan one project with a web summary profile
pub fn scan_summary(
    project_dir: &Path,
    output_dir: &Path,
    policy: &SummaryPolicy,
) -> Result<ProjectResult> {
    let name = project_name(project_dir);
    let output_file = output_dir.join(format!("{}{}", name, SUMMARY_SUFFIX));
    let targets = sorted(&policy.target_subdirs);

    println!("\n[Project: {}]", name);
    println!("Processing: {}", name);
    println!("  Output file: {}", output_file.display());
    println!("  Target subdirectories for deep analysis: {}", targets.join(", "));
    println!(
        "  Extensions with content included: {}",
        sorted(&policy.code_extensions).join(", ")
    );
    println!(
        "  Root files with content included (by name): {}",
        sorted(&policy.include_root_files).join(", ")
    );
    println!(
        "  Files with content ignored (by name): {}",
        sorted(&policy.ignore_content_files).join(", ")
    );
    println!(
        "  Extensions with content ignored: {}",
        sorted(&policy.ignore_content_extensions).join(", ")
    );
    println!(
        "  Directories ignored at root: {}",
        sorted(&policy.ignore_root_dirs).join(", ")
    );

    let outcome = Scanner::new(project_dir, policy).scan();
    let style = ReportStyle::Summary {
        target_subdirs: targets,
        ignored_names: sorted(&policy.ignore_content_files),
        ignored_extensions: sorted(&policy.ignore_content_extensions),
        max_file_size: policy.max_file_size,
        binary_extensions: policy.binary_extensions.clone(),
    };
    let stats = ReportWriter::new(style).write_to_file(&output_file, &outcome)?;

    println!("  ✓ Successfully generated '{}'!", output_file.display());

    Ok(ProjectResult {
        name,
        project_types: vec!["web".to_string()],
        stats,
        status: ProjectStatus::Written(output_file),
    })
}

fn print_banner(config: &Config) {
    match &config.profile {
        ProfileKind::Unified { .. } => {
            let rule = "=".repeat(UNIFIED_RULE_WIDTH);
            println!("{}", rule);
            println!("UNIFIED CODE SCANNER - Robust & Adaptive");
            println!("{}", rule);
            println!("Input directory: {}", config.input_dir.display());
            println!("Output directory: {}", config.output_dir.display());
            println!("{}\n", rule);
        }
        ProfileKind::Summary { target_subdirs } => {
            let rule = "=".repeat(SUMMARY_RULE_WIDTH);
            println!("{}", rule);
            println!("PROJECT SUMMARY GENERATOR - WEB PROJECTS");
            println!("{}", rule);
            println!("Input directory: {}", config.input_dir.display());
            println!("Output directory: {}", config.output_dir.display());
            println!("Target subdirectories: {}", sorted(target_subdirs).join(", "));
            println!("{}\n", rule);
        }
    }
}

fn print_completion(config: &Config, report: &BatchReport) {
    let width = match config.profile {
        ProfileKind::Unified { .. } => UNIFIED_RULE_WIDTH,
        ProfileKind::Summary { .. } => SUMMARY_RULE_WIDTH,
    };
    let rule = "=".repeat(width);

    println!("\n{}", rule);
    println!(
        "COMPLETED! Processed {}/{} projects",
        report.succeeded(),
        report.total()
    );
    println!("Output files in: {}", config.output_dir.display());
    println!("{}", rule);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use tempfile::tempdir;

    fn unified_config(input: &Path, output: &Path) -> Config {
        Config {
            input_dir: input.to_path_buf(),
            output_dir: output.to_path_buf(),
            profile: ProfileKind::Unified {
                respect_gitignore: true,
            },
            verbose: false,
        }
    }

    #[test]
    fn test_missing_input_dir_is_created() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input");

        let err = list_projects(&input).unwrap_err();
        assert!(matches!(err, ScanError::Input(_)));
        assert!(input.is_dir());
    }

    #[test]
    fn test_projects_are_sorted_directories() {
        let dir = tempdir().unwrap();
        for name in ["zeta", "alpha", "Mid"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("stray.txt"), "x").unwrap();

        let names: Vec<String> = list_projects(dir.path())
            .unwrap()
            .iter()
            .map(|p| project_name(p))
            .collect();
        assert_eq!(names, vec!["Mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_no_projects_is_an_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        fs::create_dir(&input).unwrap();

        let err = run(&unified_config(&input, &output)).unwrap_err();
        assert!(matches!(err, ScanError::Input(_)));
        assert!(output.is_dir());
    }

    #[test]
    fn test_unified_run_writes_one_report_per_project() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        fs::create_dir_all(input.join("one/src")).unwrap();
        fs::write(input.join("one/Cargo.toml"), "[package]\n").unwrap();
        fs::write(input.join("one/src/main.rs"), "fn main() {}\n").unwrap();
        fs::create_dir_all(input.join("two")).unwrap();
        fs::write(input.join("two/run.py"), "print(1)\n").unwrap();

        let report = run(&unified_config(&input, &output)).unwrap();
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.projects[0].project_types, vec!["rust"]);

        let one = fs::read_to_string(output.join("one_unified_scan.txt")).unwrap();
        assert!(one.contains(" Type: rust\n"));
        assert!(one.contains("--- src/main.rs ---"));
        assert!(output.join("two_unified_scan.txt").exists());
    }

    #[test]
    fn test_unified_applies_override_file() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("proj");
        let output = dir.path().join("out");
        fs::create_dir_all(&project).unwrap();
        fs::create_dir_all(&output).unwrap();
        fs::write(project.join("schema.proto"), "syntax = \"proto3\";\n").unwrap();
        fs::write(project.join(OVERRIDE_FILE_NAME), r#"{"code_extensions": [".proto"]}"#).unwrap();

        let result = scan_unified(&project, &output, true).unwrap();
        assert_eq!(result.stats.files_processed, 1);

        let text = fs::read_to_string(output.join("proj_unified_scan.txt")).unwrap();
        assert!(text.contains("syntax = \"proto3\";"));
    }

    #[test]
    fn test_summary_run_uses_targets() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        fs::create_dir_all(input.join("site/app")).unwrap();
        fs::create_dir_all(input.join("site/src")).unwrap();
        fs::write(input.join("site/app/main.js"), "app();\n").unwrap();
        fs::write(input.join("site/src/other.js"), "other();\n").unwrap();

        let mut targets = HashSet::new();
        targets.insert("app".to_string());
        let config = Config {
            input_dir: input,
            output_dir: output.clone(),
            profile: ProfileKind::Summary {
                target_subdirs: targets,
            },
            verbose: false,
        };

        let report = run(&config).unwrap();
        assert!(report.is_success());

        let text = fs::read_to_string(output.join("site_web_summary.txt")).unwrap();
        assert!(text.contains("(Content from subfolders except app was ignored)"));
        assert!(text.contains("  - src/ [...ignored]"));
        assert!(text.contains("--- File: app/main.js ---"));
        assert!(!text.contains("other();"));
    }

    #[test]
    fn test_failed_project_does_not_stop_batch() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        fs::create_dir_all(input.join("bad")).unwrap();
        fs::create_dir_all(input.join("good")).unwrap();
        fs::write(input.join("good/main.go"), "package main\n").unwrap();
        // a directory where the report file should go makes the write fail
        fs::create_dir_all(output.join("bad_unified_scan.txt")).unwrap();

        let report = run(&unified_config(&input, &output)).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.succeeded(), 1);
        assert!(matches!(report.projects[0].status, ProjectStatus::Failed(_)));
        assert!(report.is_success());
    }
}
