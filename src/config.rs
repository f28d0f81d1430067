/*!
 * Configuration handling for codescan
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use serde::Deserialize;

use crate::error::{Result, ResultExt};

/// Name of the optional per-project override file
pub const OVERRIDE_FILE_NAME: &str = ".scanner-config.json";

/// Name of the per-project ignore rules file
pub const RULES_FILE_NAME: &str = ".gitignore";

/// Default size cap for unified scans (1 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Command-line arguments for codescan
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codescan",
    version = crate::VERSION,
    about = "Flatten project directories into single text reports",
    long_about = "Walks every project directory under the input directory and writes one text report per project, containing the directory structure followed by the contents of the relevant files."
)]
pub struct Args {
    /// Directory holding one subdirectory per project
    #[clap(short, long, env = "INPUT_DIR", default_value = "./input", global = true)]
    pub input_dir: PathBuf,

    /// Directory receiving the generated reports
    #[clap(short, long, env = "OUTPUT_DIR", default_value = "./output", global = true)]
    pub output_dir: PathBuf,

    /// Log every ignore decision
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,

    /// Scanner profile (defaults to `unified`)
    #[clap(subcommand)]
    pub command: Option<Command>,
}

/// Scanner profiles
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Full recursive scan with project-type detection and ignore rules
    Unified {
        /// Do not load the project's .gitignore
        #[clap(long)]
        no_gitignore: bool,
    },
    /// Web project summary restricted to a few root subdirectories
    Summary {
        /// Root subdirectories to scan deeply (comma-separated)
        #[clap(long, env = "TARGET_SUBDIRS", value_delimiter = ',')]
        target_subdirs: Vec<String>,
    },
}

/// Profile selected for a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileKind {
    /// Generic unified scanner
    Unified {
        /// Whether to load each project's `.gitignore`
        respect_gitignore: bool,
    },
    /// Web summary scanner
    Summary {
        /// Root subdirectories eligible for recursion
        target_subdirs: HashSet<String>,
    },
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding the projects
    pub input_dir: PathBuf,
    /// Directory receiving reports
    pub output_dir: PathBuf,
    /// Profile to run
    pub profile: ProfileKind,
    /// Verbose diagnostics
    pub verbose: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let profile = match args.command {
            None => ProfileKind::Unified {
                respect_gitignore: true,
            },
            Some(Command::Unified { no_gitignore }) => ProfileKind::Unified {
                respect_gitignore: !no_gitignore,
            },
            Some(Command::Summary { target_subdirs }) => {
                // An empty TARGET_SUBDIRS arrives as a single empty value
                let targets: HashSet<String> = target_subdirs
                    .into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                ProfileKind::Summary {
                    target_subdirs: if targets.is_empty() {
                        crate::policy::summary::default_target_subdirs()
                    } else {
                        targets
                    },
                }
            }
        };

        Self {
            input_dir: args.input_dir,
            output_dir: args.output_dir,
            profile,
            verbose: args.verbose,
        }
    }
}

fn to_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".kt", ".kts", ".rs", ".go", ".c", ".cpp",
    ".h", ".hpp", ".cs", ".rb", ".php", ".swift", ".dart", ".html", ".css", ".scss", ".sass",
    ".md", ".json", ".yaml", ".yml", ".xml", ".toml", ".sh", ".bash",
];

const CONFIG_FILES: &[&str] = &[
    "package.json",
    "tsconfig.json",
    "webpack.config.js",
    "vite.config.js",
    "next.config.js",
    ".eslintrc.js",
    "requirements.txt",
    "setup.py",
    "pyproject.toml",
    "Pipfile",
    "pom.xml",
    "build.gradle",
    "settings.gradle",
    "Cargo.toml",
    "go.mod",
    "composer.json",
    "Gemfile",
    "pubspec.yaml",
    "Dockerfile",
    "docker-compose.yml",
    "README.md",
    "LICENSE",
    ".gitignore",
];

const IGNORE_DIRS: &[&str] = &[
    // Version control & editors
    ".git", ".svn", ".hg", ".vscode", ".idea", ".DS_Store",
    // Dependencies & virtualenvs
    "node_modules", "venv", "env", ".env", "virtualenv", ".tox",
    // Build output
    "dist", "build", "target", "out", "bin", "obj", ".next", ".nuxt",
    // Caches
    "__pycache__", "coverage", "htmlcov", ".pytest_cache", ".mypy_cache", ".cache",
    ".parcel-cache", ".gradle", ".mvn", "Pods", "DerivedData", ".dart_tool", ".pub-cache",
];

const IGNORE_FILES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    "*.log",
    "*.pid",
    "*.seed",
    "*.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Pipfile.lock",
    "Cargo.lock",
    "go.sum",
    ".env",
    ".env.local",
    ".env.production",
];

const IGNORE_EXTENSIONS: &[&str] = &[
    ".pyc", ".pyo", ".pyd", ".so", ".dll", ".dylib", ".class", ".jar", ".exe", ".bin", ".obj",
    ".o", ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".woff", ".woff2", ".ttf", ".otf",
    ".eot", ".mp3", ".mp4", ".avi", ".mov", ".zip", ".tar", ".gz",
];

/// Immutable configuration for one unified scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Project name
    pub name: String,
    /// Primary detected project type
    pub project_type: String,
    /// Extensions (with leading dot) whose content is included
    pub code_extensions: HashSet<String>,
    /// File names whose content is always included
    pub literal_include_names: HashSet<String>,
    /// Directory names pruned from the walk
    pub ignore_dir_names: HashSet<String>,
    /// Shell patterns matched against file names
    pub ignore_file_patterns: HashSet<String>,
    /// Extensions (with leading dot) of ignored files
    pub ignore_extensions: HashSet<String>,
    /// Root subdirectories of interest for the project type
    pub target_subdir_names: HashSet<String>,
    /// Files strictly larger than this are ignored
    pub max_file_size_bytes: u64,
    /// Whether dot-prefixed entries are scanned
    pub include_hidden: bool,
}

impl ScanConfig {
    /// Default configuration for a project with the given detected types.
    ///
    /// `project_types` is in detection order; the first one is the primary type.
    pub fn for_project(name: &str, project_types: &[&str]) -> Self {
        let mut config = Self {
            name: name.to_string(),
            project_type: project_types.first().copied().unwrap_or("generic").to_string(),
            code_extensions: to_set(CODE_EXTENSIONS),
            literal_include_names: to_set(CONFIG_FILES),
            ignore_dir_names: to_set(IGNORE_DIRS),
            ignore_file_patterns: to_set(IGNORE_FILES),
            ignore_extensions: to_set(IGNORE_EXTENSIONS),
            target_subdir_names: HashSet::new(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            include_hidden: false,
        };

        let has = |t: &str| project_types.contains(&t);

        // Later matches replace the target set of earlier ones.
        if has("python") || has("django") {
            config.target_subdir_names = to_set(&["src", "app", "backend", "back"]);
            config.code_extensions.extend(to_set(&[".pyx", ".pyi"]));
        }
        if has("nodejs") || has("react") || has("vue") {
            config.target_subdir_names = to_set(&["src", "lib", "components", "pages"]);
            config.code_extensions.extend(to_set(&[".mjs", ".cjs", ".vue"]));
        }
        if has("java") || has("spring") {
            config.target_subdir_names =
                to_set(&["src/main/java", "src/main/resources", "src"]);
            config.ignore_dir_names.extend(to_set(&["target", ".gradle", ".mvn"]));
        }
        if has("rust") {
            config.target_subdir_names = to_set(&["src"]);
            config.ignore_dir_names.insert("target".to_string());
        }
        if has("go") {
            config.target_subdir_names = to_set(&["pkg", "cmd", "internal"]);
        }
        if has("flutter") {
            config.target_subdir_names = to_set(&["lib"]);
            config
                .ignore_dir_names
                .extend(to_set(&[".dart_tool", "build", "android", "ios"]));
        }

        config
    }

    /// Merge an override record into a new configuration.
    ///
    /// Set fields are unioned; target subdirectories, the size limit and the
    /// hidden-file flag are replaced.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let mut merged = self.clone();

        if let Some(exts) = &overrides.code_extensions {
            merged.code_extensions.extend(exts.iter().cloned());
        }
        if let Some(dirs) = &overrides.ignore_dirs {
            merged.ignore_dir_names.extend(dirs.iter().cloned());
        }
        if let Some(files) = &overrides.ignore_files {
            merged.ignore_file_patterns.extend(files.iter().cloned());
        }
        if let Some(exts) = &overrides.ignore_extensions {
            merged.ignore_extensions.extend(exts.iter().cloned());
        }
        if let Some(targets) = &overrides.target_subdirs {
            merged.target_subdir_names = targets.iter().cloned().collect();
        }
        if let Some(size) = overrides.max_file_size {
            merged.max_file_size_bytes = size;
        }
        if let Some(hidden) = overrides.include_hidden {
            merged.include_hidden = hidden;
        }

        merged
    }
}

/// Contents of a `.scanner-config.json` override file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub code_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub ignore_dirs: Option<Vec<String>>,
    #[serde(default)]
    pub ignore_files: Option<Vec<String>>,
    #[serde(default)]
    pub ignore_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub target_subdirs: Option<Vec<String>>,
    #[serde(default)]
    pub max_file_size: Option<u64>,
    #[serde(default)]
    pub include_hidden: Option<bool>,
}

impl ConfigOverrides {
    /// Parse an override file
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load the override file of a project, if any.
    ///
    /// Unreadable or malformed files are logged and treated as absent.
    pub fn load(project_dir: &Path) -> Option<Self> {
        let path = project_dir.join(OVERRIDE_FILE_NAME);
        if !path.exists() {
            return None;
        }

        match Self::read(&path) {
            Ok(overrides) => Some(overrides),
            Err(e) => {
                log::warn!("Could not load config file {}: {}", path.display(), e);
                None
            }
        }
    }
}
