#![allow(clippy::must_use_candidate)]

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Extension (with leading dot, lowercase) to technology label.
/// Several extensions may share a label.
static TECHNOLOGIES: &[(&str, &str)] = &[
    (".py", "Python"),
    (".js", "JavaScript"),
    (".jsx", "JavaScript (React)"),
    (".ts", "TypeScript"),
    (".tsx", "TypeScript (React)"),
    (".html", "HTML"),
    (".htm", "HTML"),
    (".css", "CSS"),
    (".scss", "SCSS"),
    (".sass", "Sass"),
    (".less", "Less"),
    (".java", "Java"),
    (".c", "C"),
    (".cpp", "C++"),
    (".cc", "C++"),
    (".cxx", "C++"),
    (".h", "C/C++ Header"),
    (".hpp", "C++ Header"),
    (".cs", "C#"),
    (".php", "PHP"),
    (".rb", "Ruby"),
    (".go", "Go"),
    (".rs", "Rust"),
    (".swift", "Swift"),
    (".kt", "Kotlin"),
    (".r", "R"),
    (".sql", "SQL"),
    (".sh", "Shell"),
    (".bash", "Bash"),
    (".zsh", "Zsh"),
    (".yml", "YAML"),
    (".yaml", "YAML"),
    (".json", "JSON"),
    (".xml", "XML"),
    (".md", "Markdown"),
    (".txt", "Text"),
    (".vue", "Vue"),
    (".svelte", "Svelte"),
    (".scala", "Scala"),
    (".pl", "Perl"),
    (".lua", "Lua"),
    (".dart", "Dart"),
];

/// Directory basenames whose whole subtree is never visited.
static EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".pytest_cache",
    "venv",
    "env",
    ".env",
    "dist",
    "build",
    ".next",
    "coverage",
    ".coverage",
    "htmlcov",
    "vendor",
    ".vscode",
    ".idea",
    "target",
    "out",
    "bin",
    "obj",
];

struct TechnologyRegistry {
    by_ext: HashMap<&'static str, &'static str>,
    excluded: HashSet<&'static str>,
}

static REGISTRY: Lazy<TechnologyRegistry> = Lazy::new(|| TechnologyRegistry {
    by_ext: TECHNOLOGIES.iter().copied().collect(),
    excluded: EXCLUDED_DIRS.iter().copied().collect(),
});

/// Looks up the technology label for an extension such as `.py` or `.PY`.
///
/// The leading dot is part of the key; `py` without a dot is not recognized.
pub fn label_for(extension: &str) -> Option<&'static str> {
    REGISTRY
        .by_ext
        .get(extension.to_ascii_lowercase().as_str())
        .copied()
}

/// Resolves a label from the final extension of `path`.
pub fn label_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    if ext.is_empty() {
        return None;
    }
    label_for(&format!(".{ext}"))
}

/// Exact basename membership in the exclusion set (no globbing, no substrings).
pub fn is_excluded_directory(name: &str) -> bool {
    REGISTRY.excluded.contains(name)
}
