//! Report formatting and printing.
//!
//! Issues are displayed in cargo-style format: severity and message, a
//! clickable `path:line:col` location, the source line with a caret, and a
//! closing summary.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::run::{CheckOutcome, CommandOutcome};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(outcome: &CommandOutcome, verbose: bool) {
    match outcome {
        CommandOutcome::Check(check) => print_check(check, verbose),
        CommandOutcome::Init => print_init(),
    }
}

fn print_check(outcome: &CheckOutcome, verbose: bool) {
    let mut stdout = io::stdout().lock();

    if verbose {
        let source = if outcome.config_from_file {
            format!("configuration from {}", CONFIG_FILE_NAME)
        } else {
            "default configuration".to_string()
        };
        let _ = writeln!(stdout, "Using {}", source.dimmed());
    }

    report_to(&outcome.issues, &mut stdout);

    if outcome.issues.is_empty() {
        print_success_to(outcome.files_checked, &mut stdout);
    }

    if outcome.failed_count > 0 && !verbose {
        let _ = writeln!(
            io::stderr().lock(),
            "{} {} file(s) could not be analyzed (use {} for details)",
            "warning:".bold().yellow(),
            outcome.failed_count,
            "-v".cyan()
        );
    }
}

fn print_init() {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
}

/// Print issues to a custom writer. Issues are assumed sorted by position.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    // Line number width for gutter alignment.
    let max_line_width = issues
        .iter()
        .map(|i| i.line.to_string().len())
        .max()
        .unwrap_or(1);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files_checked: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} - no issues found",
            files_checked,
            if files_checked == 1 { "file" } else { "files" }
        )
        .green()
    );
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message,
        issue.rule.to_string().dimmed().cyan()
    );

    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        issue.file_path,
        issue.line,
        issue.col
    );

    if let Some(source_line) = &issue.source_line {
        let caret_char = match issue.severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            issue.line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret aligned by display width so CJK text doesn't misplace it.
        let prefix: String = source_line
            .chars()
            .take(issue.col.saturating_sub(1))
            .collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.severity == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "\n{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::Rule;

    fn strip_ansi(s: &str) -> String {
        // Simple ANSI escape code stripper for testing
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // Skip until 'm'
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn sample_issue(severity: Severity) -> Issue {
        Issue {
            file_path: "./src/pages/home.ts".to_string(),
            line: 3,
            col: 1,
            start: 42,
            length: 80,
            message: "Deeplink with name 'Home' was existed at ./src/pages/start.ts. Try another instead.".to_string(),
            severity,
            rule: Rule::DeepLinkConfig,
            source_line: Some("@IonicPage({ name: 'Home' })".to_string()),
        }
    }

    #[test]
    fn test_report_empty() {
        let mut output = Vec::new();
        report_to(&[], &mut output);
        assert!(output.is_empty());
    }

    #[test]
    fn test_report_issue_layout() {
        let mut output = Vec::new();
        report_to(&[sample_issue(Severity::Error)], &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(stripped.contains("error:"));
        assert!(stripped.contains("Deeplink with name 'Home'"));
        assert!(stripped.contains("deeplink-config"));
        assert!(stripped.contains("./src/pages/home.ts:3:1"));
        assert!(stripped.contains("@IonicPage({ name: 'Home' })"));
        assert!(stripped.contains("^"));
    }

    #[test]
    fn test_report_summary_counts() {
        let mut output = Vec::new();
        report_to(
            &[sample_issue(Severity::Error), sample_issue(Severity::Warning)],
            &mut output,
        );
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(stripped.contains("2 problems"));
        assert!(stripped.contains("1 error"));
        assert!(stripped.contains("1 warning"));
    }

    #[test]
    fn test_issue_without_source_line() {
        let mut issue = sample_issue(Severity::Error);
        issue.source_line = None;

        let mut output = Vec::new();
        report_to(&[issue], &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(stripped.contains("./src/pages/home.ts:3:1"));
        assert!(!stripped.contains("^"));
    }

    #[test]
    fn test_print_success() {
        let mut output = Vec::new();
        print_success_to(12, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(stripped.contains("Checked 12 files - no issues found"));
    }

    #[test]
    fn test_print_success_singular() {
        let mut output = Vec::new();
        print_success_to(1, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(stripped.contains("Checked 1 file - no issues found"));
    }

    #[test]
    fn test_caret_alignment_with_wide_chars() {
        let mut issue = sample_issue(Severity::Warning);
        issue.col = 8;
        issue.source_line = Some("const x = \"你好World\";".to_string());

        let mut output = Vec::new();
        report_to(&[issue], &mut output);
        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("你好World"));
        assert!(output_str.contains("^"));
    }
}
