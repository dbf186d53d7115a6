//! Project file discovery.
//!
//! Finds the `.ts` compilation units under the source root, honoring
//! include directories, ignore patterns, and the test-file exclusion.

use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Result of scanning files.
pub struct ScanResult {
    /// Scannable files in sorted order. Registration of deep links is
    /// order-sensitive, so the processing order must be deterministic.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Ignore patterns split by kind: entries without wildcards are literal
/// directory paths matched by prefix, the rest are glob patterns.
struct IgnoreSet {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    fn build(base_dir: &str, ignores: &[String], ignore_test_files: bool, verbose: bool) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for entry in ignores {
            if !has_wildcard(entry) {
                literal_paths.push(Path::new(base_dir).join(entry));
                continue;
            }
            match Pattern::new(entry) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        warn(&format!("Invalid ignore pattern '{}': {}", entry, e));
                    }
                }
            }
        }

        if ignore_test_files {
            patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    fn excludes(&self, path: &Path) -> bool {
        if self.literal_paths.iter().any(|lit| path.starts_with(lit)) {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ScanResult {
    let ignore_set = IgnoreSet::build(base_dir, ignore_patterns, ignore_test_files, verbose);

    let mut files: Vec<String> = Vec::new();
    let mut skipped_count = 0;

    for dir in scan_roots(base_dir, includes, verbose) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        warn(&format!("Cannot access path: {}", e));
                    }
                    continue;
                }
            };

            let path = entry.path();
            if ignore_set.excludes(path) {
                continue;
            }
            if path.is_file() && is_scannable_file(path) {
                files.push(path.to_string_lossy().into_owned());
            }
        }
    }

    // Overlapping includes may visit a file twice.
    files.sort();
    files.dedup();

    ScanResult {
        files,
        skipped_count,
    }
}

/// Directories to walk: the base dir itself, or each include entry resolved
/// against it. Include globs expand to every matching directory.
fn scan_roots(base_dir: &str, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![PathBuf::from(base_dir)];
    }

    let mut roots = Vec::new();
    for include in includes {
        let joined = Path::new(base_dir).join(include);
        if !has_wildcard(include) {
            if joined.exists() {
                roots.push(joined);
            } else if verbose {
                warn(&format!("Include path does not exist: {}", joined.display()));
            }
            continue;
        }

        match glob(&joined.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|p| p.is_dir())),
            Err(e) => {
                if verbose {
                    warn(&format!("Invalid glob pattern '{}': {}", include, e));
                }
            }
        }
    }
    roots
}

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn is_scannable_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".ts") && !name.ends_with(".d.ts")
}

fn warn(message: &str) {
    eprintln!("{} {}", "warning:".bold().yellow(), message);
}
