/*!
 * Project type detection
 */

use std::path::Path;

/// Ordered table of project types and the marker paths that reveal them
pub const DETECTION_PATTERNS: &[(&str, &[&str])] = &[
    ("nodejs", &["package.json", "node_modules"]),
    (
        "python",
        &["requirements.txt", "setup.py", "pyproject.toml", "Pipfile", "__pycache__"],
    ),
    ("django", &["manage.py", "settings.py", "wsgi.py"]),
    (
        "react",
        &["package.json", "src/App.jsx", "src/App.tsx", "public/index.html"],
    ),
    ("nextjs", &["next.config.js", "next.config.mjs", "pages", "app"]),
    ("vue", &["package.json", "vue.config.js", "src/App.vue"]),
    ("angular", &["package.json", "angular.json", "src/app"]),
    ("java", &["pom.xml", "build.gradle", "gradlew", "src/main/java"]),
    ("maven", &["pom.xml", "mvnw"]),
    ("gradle", &["build.gradle", "settings.gradle", "gradlew"]),
    (
        "spring",
        &["pom.xml", "application.properties", "application.yml"],
    ),
    ("rust", &["Cargo.toml", "Cargo.lock", "src/main.rs"]),
    ("go", &["go.mod", "go.sum", "main.go"]),
    ("dotnet", &[".csproj", ".sln", ".fsproj", ".vbproj"]),
    ("php", &["composer.json", "index.php", "artisan"]),
    ("laravel", &["composer.json", "artisan", "app/Http"]),
    ("ruby", &["Gemfile", "Rakefile", ".rb"]),
    ("rails", &["Gemfile", "Rakefile", "config/application.rb"]),
    ("flutter", &["pubspec.yaml", "lib/main.dart", "android", "ios"]),
    ("docker", &["Dockerfile", "docker-compose.yml"]),
];

/// Type reported when no marker matches
pub const GENERIC_TYPE: &str = "generic";

/// Detect every project type whose markers exist under `project_dir`.
///
/// Types come back in table order; an unrecognised project is `generic`.
pub fn detect_project_types(project_dir: &Path) -> Vec<&'static str> {
    let detected: Vec<&'static str> = DETECTION_PATTERNS
        .iter()
        .filter(|(_, markers)| markers.iter().any(|m| project_dir.join(m).exists()))
        .map(|(project_type, _)| *project_type)
        .collect();

    if detected.is_empty() {
        vec![GENERIC_TYPE]
    } else {
        detected
    }
}
