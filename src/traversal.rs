use std::path::{Component, Path};

use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, info};

use crate::analyzer::count_lines;
use crate::error::ScanError;
use crate::technologies::{is_excluded_directory, label_for_path};
use crate::types::Tally;

/// Walks `root` and tallies lines per technology.
///
/// # Errors
/// Returns [`ScanError::RootNotFound`] if `root` does not exist. Nothing
/// below the root can fail the scan.
pub fn scan_tree(root: &Path) -> Result<Tally, ScanError> {
    scan_tree_with(root, &mut count_lines)
}

/// Like [`scan_tree`], with the per-file line counter supplied by the caller.
///
/// # Errors
/// Returns [`ScanError::RootNotFound`] if `root` does not exist.
pub fn scan_tree_with<F>(root: &Path, counter: &mut F) -> Result<Tally, ScanError>
where
    F: FnMut(&Path) -> u64,
{
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    info!(root = %root.display(), "scanning");

    let mut tally = Tally::new();
    // Only files below a directory root are enumerated.
    if !root.is_dir() {
        debug!(root = %root.display(), "root is not a directory, nothing to walk");
        return Ok(tally);
    }
    if dir_is_excluded(root) {
        debug!(root = %root.display(), "root lies inside an excluded directory");
        return Ok(tally);
    }

    let mut builder = WalkBuilder::new(root);
    // Plain walk: hidden files count and ignore files are not consulted.
    builder.standard_filters(false);
    builder.follow_links(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));
    builder.filter_entry(keep_entry);

    let mut files = 0usize;
    for dent in builder.build() {
        let dent = match dent {
            Ok(d) => d,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = dent.path();
        // Follows links, so a symlinked file counts and a broken link does not.
        if !path.is_file() {
            continue;
        }
        if path.parent().is_some_and(dir_is_excluded) {
            continue;
        }
        let Some(label) = label_for_path(path) else {
            continue;
        };
        tally.add(label, counter(path));
        files += 1;
    }

    info!(
        files,
        technologies = tally.len(),
        lines = tally.grand_total(),
        "scan complete"
    );
    Ok(tally)
}

/// Prunes excluded directories before the walker descends into them.
fn keep_entry(dent: &DirEntry) -> bool {
    let is_dir = dent.file_type().is_some_and(|ft| ft.is_dir());
    if !is_dir {
        return true;
    }
    let excluded = dent
        .file_name()
        .to_str()
        .is_some_and(is_excluded_directory);
    if excluded {
        debug!(dir = %dent.path().display(), "pruned excluded directory");
    }
    !excluded
}

/// Secondary guard: true when any component of `dir`, ancestors of the
/// scan root included, names an excluded directory.
fn dir_is_excluded(dir: &Path) -> bool {
    dir.components().any(|c| match c {
        Component::Normal(name) => name.to_str().is_some_and(is_excluded_directory),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let err = scan_tree(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
    }

    #[test]
    fn counts_recognized_files_per_technology() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.py", "1\n2\n3\n");
        write(dir.path(), "b.go", "1\n2\n3\n4\n5\n");
        write(dir.path(), "pkg/c.py", "x\n");
        write(dir.path(), "pkg/deep/D.PY", "y\nz\n");
        write(dir.path(), "README", "no extension\n");

        let tally = scan_tree(dir.path()).unwrap();
        assert_eq!(tally.get("Python"), Some(6));
        assert_eq!(tally.get("Go"), Some(5));
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn unrecognized_extensions_are_ignored() {
        let dir = tempdir().unwrap();
        write(dir.path(), "tool.bin", "\0\0\n");
        write(dir.path(), "setup.exe", "MZ\n");
        let tally = scan_tree(dir.path()).unwrap();
        assert!(tally.is_empty());
    }

    #[test]
    fn excluded_directories_are_skipped_at_any_depth() {
        let dir = tempdir().unwrap();
        write(dir.path(), "index.js", "a\n");
        write(dir.path(), "node_modules/lib/index.js", "b\nc\n");
        write(dir.path(), "web/app/node_modules/x.js", "d\n");
        write(dir.path(), "target/debug/build.rs", "e\n");
        write(dir.path(), ".git/hooks/pre-commit.sh", "f\n");
        write(dir.path(), "node_modules_backup/kept.js", "g\n");

        let tally = scan_tree(dir.path()).unwrap();
        assert_eq!(tally.get("JavaScript"), Some(2));
        assert_eq!(tally.get("Rust"), None);
        assert_eq!(tally.get("Shell"), None);
    }

    #[test]
    fn excluded_subtrees_are_never_visited() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/main.rs", "fn main() {}\n");
        write(dir.path(), "vendor/dep/lib.rs", "pub fn f() {}\n");
        write(dir.path(), "src/venv/site.py", "import x\n");

        let mut seen = Vec::new();
        let tally = scan_tree_with(dir.path(), &mut |p: &Path| {
            seen.push(p.to_path_buf());
            1
        })
        .unwrap();
        assert_eq!(seen, vec![dir.path().join("src/main.rs")]);
        assert_eq!(tally.grand_total(), 1);
    }

    #[test]
    fn hidden_files_and_gitignored_files_count() {
        let dir = tempdir().unwrap();
        write(dir.path(), ".gitignore", "ignored.py\n");
        write(dir.path(), "ignored.py", "a\nb\n");
        write(dir.path(), ".config/settings.json", "{}\n");
        let tally = scan_tree(dir.path()).unwrap();
        assert_eq!(tally.get("Python"), Some(2));
        assert_eq!(tally.get("JSON"), Some(1));
    }

    #[test]
    fn total_matches_sum_of_counted_files() {
        let dir = tempdir().unwrap();
        write(dir.path(), "one.rs", "a\nb\n");
        write(dir.path(), "two.md", "# t\n\ntext");
        write(dir.path(), "sub/three.yaml", "k: v\n");
        write(dir.path(), "dist/skip.rs", "x\ny\nz\n");

        let expected: u64 = ["one.rs", "two.md", "sub/three.yaml"]
            .iter()
            .map(|rel| count_lines(&dir.path().join(rel)))
            .sum();
        let tally = scan_tree(dir.path()).unwrap();
        assert_eq!(tally.grand_total(), expected);
        assert_eq!(expected, 6);
    }

    #[test]
    fn empty_file_registers_technology_with_zero_lines() {
        let dir = tempdir().unwrap();
        write(dir.path(), "empty.txt", "");
        let tally = scan_tree(dir.path()).unwrap();
        assert_eq!(tally.get("Text"), Some(0));
    }

    #[test]
    fn failed_reads_contribute_zero_without_aborting() {
        let dir = tempdir().unwrap();
        write(dir.path(), "ok.py", "1\n2\n");
        write(dir.path(), "locked.py", "1\n2\n3\n");
        write(dir.path(), "other.go", "1\n");

        let locked = dir.path().join("locked.py");
        let tally = scan_tree_with(dir.path(), &mut |p: &Path| {
            if p == locked.as_path() { 0 } else { count_lines(p) }
        })
        .unwrap();
        assert_eq!(tally.get("Python"), Some(2));
        assert_eq!(tally.get("Go"), Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn broken_symlink_does_not_abort_scan() {
        let dir = tempdir().unwrap();
        write(dir.path(), "real.rb", "puts 1\n");
        std::os::unix::fs::symlink(dir.path().join("missing.rb"), dir.path().join("dangling.rb"))
            .unwrap();
        let tally = scan_tree(dir.path()).unwrap();
        assert_eq!(tally.get("Ruby"), Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pkg/mod.lua", "a\nb\n");
        std::os::unix::fs::symlink(dir.path().join("pkg"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("pkg/loop")).unwrap();
        let tally = scan_tree(dir.path()).unwrap();
        assert_eq!(tally.get("Lua"), Some(2));
    }

    #[test]
    fn root_named_after_excluded_directory_yields_nothing() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("node_modules");
        write(&root, "pkg/index.js", "a\nb\n");
        let tally = scan_tree(&root).unwrap();
        assert!(tally.is_empty());
    }

    #[test]
    fn root_below_excluded_ancestor_yields_nothing() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("build/app");
        write(&root, "main.kt", "fun main() {}\n");
        let tally = scan_tree(&root).unwrap();
        assert!(tally.is_empty());
    }

    #[test]
    fn file_root_is_not_walked() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.py", "1\n2\n3\n");
        let mut calls = 0;
        let tally = scan_tree_with(&dir.path().join("a.py"), &mut |_: &Path| {
            calls += 1;
            1
        })
        .unwrap();
        assert!(tally.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn guard_checks_every_component() {
        assert!(dir_is_excluded(Path::new("/home/u/obj/src")));
        assert!(dir_is_excluded(Path::new("repo/.git")));
        assert!(!dir_is_excluded(Path::new("/home/u/objects/src")));
        assert!(!dir_is_excluded(Path::new("./src/../lib")));
    }
}
