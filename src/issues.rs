use std::{cmp::Ordering, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    DeepLinkConfig,
    NoDuplicateClassName,
    NoDuplicateDeclaration,
    ProperlyImports,
    PreserveWhitespace,
    ViewEncapsulation,
    AnalysisError,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::DeepLinkConfig => write!(f, "deeplink-config"),
            Rule::NoDuplicateClassName => write!(f, "no-duplicate-class-name"),
            Rule::NoDuplicateDeclaration => write!(f, "no-duplicate-declaration"),
            Rule::ProperlyImports => write!(f, "properly-imports"),
            Rule::PreserveWhitespace => write!(f, "preserve-whitespace"),
            Rule::ViewEncapsulation => write!(f, "view-encapsulation"),
            Rule::AnalysisError => write!(f, "analysis-error"),
        }
    }
}

/// One reported finding, anchored at a span inside a single compilation unit.
///
/// `start` and `length` are byte offsets relative to the start of the unit's
/// source text; `line`/`col` are the 1-based position of `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub start: usize,
    pub length: usize,
    pub message: String,
    pub severity: Severity,
    pub rule: Rule,
    pub source_line: Option<String>,
}

impl Issue {
    /// A file whose analysis failed outright (parse or extraction failure).
    pub fn analysis_error(file_path: &str, error: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
            line: 1,
            col: 1,
            start: 0,
            length: 0,
            message: format!("Failed to analyze: {}", error),
            severity: Severity::Error,
            rule: Rule::AnalysisError,
            source_line: None,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        // Sort by file_path, line, col, then message. Message comparison keeps
        // output deterministic when several issues share one anchor (e.g. a
        // name and a segment conflict on the same class).
        self.file_path
            .cmp(&other.file_path)
            .then_with(|| self.line.cmp(&other.line))
            .then_with(|| self.col.cmp(&other.col))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
