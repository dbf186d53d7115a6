//! One analysis session: the rule set and its accumulated cross-file state.

use std::fs;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::core::parse_ts_source;
use crate::issues::Issue;
use crate::rules::{Analyzer, default_analyzers};

/// Owns the rule instances for one run. Cross-file state (deep-link
/// registries, class-name maps) lives inside the rules, so two sessions
/// never observe each other.
pub struct AnalysisSession {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl AnalysisSession {
    pub fn new(config: &Config) -> Self {
        Self {
            analyzers: default_analyzers(config),
        }
    }

    /// Analyze one unit of already-loaded source text.
    ///
    /// Issues from all rules are merged and sorted by position. An error
    /// from any rule aborts the unit.
    pub fn analyze_source(&mut self, path: &str, code: String) -> Result<Vec<Issue>> {
        let unit = parse_ts_source(code, path)?;

        let mut issues = Vec::new();
        for analyzer in &mut self.analyzers {
            issues.extend(analyzer.analyze(&unit)?);
        }
        issues.sort();
        Ok(issues)
    }

    /// Read and analyze a file on disk.
    pub fn analyze_file(&mut self, path: &str) -> Result<Vec<Issue>> {
        let code =
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
        self.analyze_source(path, code)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::issues::Rule;

    use super::*;

    #[test]
    fn test_issues_sorted_by_position() {
        let mut session = AnalysisSession::new(&Config::default());
        let issues = session
            .analyze_source(
                "home.ts",
                "import { NgZone } from '@angular/core/src/zone';\n@Component({ selector: 'x' })\nclass HomePage {}\n"
                    .to_string(),
            )
            .unwrap();
        assert!(issues.len() >= 3);
        for pair in issues.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_state_carries_across_units() {
        let mut session = AnalysisSession::new(&Config::default());
        assert!(
            session
                .analyze_source(
                    "a.ts",
                    "@IonicPage({ name: 'Home' })\nexport class A {}\n".to_string()
                )
                .unwrap()
                .is_empty()
        );

        let issues = session
            .analyze_source(
                "b.ts",
                "@IonicPage({ name: 'Home' })\nexport class B {}\n".to_string(),
            )
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, Rule::DeepLinkConfig);
    }

    #[test]
    fn test_sessions_are_independent() {
        let code = "@IonicPage({ name: 'Home' })\nexport class A {}\n";

        let mut first = AnalysisSession::new(&Config::default());
        assert!(
            first
                .analyze_source("a.ts", code.to_string())
                .unwrap()
                .is_empty()
        );

        let mut second = AnalysisSession::new(&Config::default());
        assert!(
            second
                .analyze_source("b.ts", code.to_string())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_parse_error_propagates() {
        let mut session = AnalysisSession::new(&Config::default());
        assert!(
            session
                .analyze_source("broken.ts", "class {{{".to_string())
                .is_err()
        );
    }

    #[test]
    fn test_missing_file_errors_with_path() {
        let mut session = AnalysisSession::new(&Config::default());
        let err = session.analyze_file("does/not/exist.ts").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.ts"));
    }
}
