//! Command dispatch: loads configuration, scans the project, and drives an
//! analysis session over the scanned files.

use std::{env, fs, path::Path};

use anyhow::{Context, Result};

use super::args::{Arguments, CheckCommand, Command};
use crate::config::{CONFIG_FILE_NAME, default_config_json, load_config};
use crate::core::AnalysisSession;
use crate::core::file_scanner::scan_files;
use crate::issues::{Issue, Severity};

pub enum CommandOutcome {
    Check(CheckOutcome),
    Init,
}

pub struct CheckOutcome {
    pub issues: Vec<Issue>,
    pub files_checked: usize,
    /// Files whose analysis failed; each also contributed an issue.
    pub failed_count: usize,
    pub config_from_file: bool,
}

impl CheckOutcome {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }
}

pub fn run(Arguments { command }: Arguments) -> Result<CommandOutcome> {
    match command {
        Some(Command::Check(cmd)) => Ok(CommandOutcome::Check(check(cmd)?)),
        Some(Command::Init) => {
            init()?;
            Ok(CommandOutcome::Init)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn check(cmd: CheckCommand) -> Result<CheckOutcome> {
    let cwd = env::current_dir().context("Failed to resolve current directory")?;
    let loaded = load_config(&cwd)?;
    let mut config = loaded.config;

    if let Some(source_root) = &cmd.common.source_root {
        config.source_root = source_root.to_string_lossy().into_owned();
    }
    if let Some(path) = &cmd.path {
        config.source_root = path.to_string_lossy().into_owned();
    }
    if let Some(decorator) = &cmd.common.decorator {
        config.deep_link_decorator = decorator.clone();
    }
    config.validate()?;

    let scan = scan_files(
        &config.source_root,
        &config.includes,
        &config.ignores,
        config.ignore_test_files,
        cmd.common.verbose,
    );

    let mut session = AnalysisSession::new(&config);
    let mut issues = Vec::new();
    let mut failed_count = 0;

    // Registration order is part of the rule semantics, so files are
    // processed one at a time in scan order.
    for file in &scan.files {
        match session.analyze_file(file) {
            Ok(file_issues) => issues.extend(file_issues),
            Err(err) => {
                failed_count += 1;
                issues.push(Issue::analysis_error(file, &format!("{:#}", err)));
            }
        }
    }

    issues.sort();
    Ok(CheckOutcome {
        issues,
        files_checked: scan.files.len(),
        failed_count,
        config_from_file: loaded.from_file,
    })
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
