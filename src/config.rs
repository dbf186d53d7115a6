//! Configuration loading for `.ionlintrc.json`.
//!
//! The config file is discovered by walking up from the working directory,
//! stopping at the repository root (a directory containing `.git`). A
//! missing file is not an error; defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".ionlintrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &["**/*.spec.ts", "**/*.test.ts", "**/e2e/**"];

/// The decorator marker the deep-link rule looks for.
pub const DEFAULT_DEEP_LINK_DECORATOR: &str = "IonicPage";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Glob patterns (or literal paths) excluded from scanning.
    pub ignores: Vec<String>,
    /// Directories (or globs) to scan; empty means the whole source root.
    pub includes: Vec<String>,
    pub source_root: String,
    pub deep_link_decorator: String,
    pub ignore_test_files: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: Vec::new(),
            source_root: "./src".to_string(),
            deep_link_decorator: DEFAULT_DEEP_LINK_DECORATOR.to_string(),
            ignore_test_files: true,
        }
    }
}

impl Config {
    /// Reject configs that would silently misbehave at scan time: broken
    /// glob patterns and an empty decorator marker.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Include entries without wildcards are literal directory paths and
        // need no pattern check.
        for pattern in self.includes.iter().filter(|p| is_glob(p)) {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }

        if self.deep_link_decorator.trim().is_empty() {
            bail!("'deepLinkDecorator' must not be empty");
        }

        Ok(())
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Pretty-printed default configuration, written by `ionlint init`.
pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&Config::default()).context("Failed to generate default config.")
}

/// Walk up from `start_dir` looking for the config file. Stops at the first
/// directory containing `.git`, or at the filesystem root.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir;
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            return None;
        }
        dir = dir.parent()?;
    }
}

pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        });
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;

    Ok(ConfigLoadResult {
        config,
        from_file: true,
    })
}
