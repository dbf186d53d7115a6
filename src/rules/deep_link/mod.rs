//! The deep-link configuration rule.
//!
//! Extracts `@IonicPage`-style route declarations from page classes and
//! enforces project-wide uniqueness of route names and URL segments.
//! Conflicts are reported against the later declaration, naming the file
//! that already owns the value.

mod extract;
mod literal;
mod registry;

pub use extract::{
    DEFAULT_HISTORY_ATTRIBUTE, DEFAULT_PRIORITY, DeepLinkExtractor, ExtractedDeepLink,
    NAME_ATTRIBUTE, PRIORITY_ATTRIBUTE, SEGMENT_ATTRIBUTE, default_segment,
};
pub use literal::{AnnotationProperty, PropertyValue, resolve_string, resolve_string_list};
pub use registry::{Conflict, DeepLinkDeclaration, DeepLinkRegistry, RegisterOutcome};

use anyhow::Result;
use swc_common::Span;

use crate::core::SourceUnit;
use crate::issues::{Issue, Rule, Severity};
use crate::rules::Analyzer;
use crate::rules::helpers::issue_at;

pub struct DeepLinkRule {
    decorator_name: String,
    registry: DeepLinkRegistry,
}

impl DeepLinkRule {
    pub fn new(decorator_name: &str) -> Self {
        Self {
            decorator_name: decorator_name.to_string(),
            registry: DeepLinkRegistry::default(),
        }
    }

    /// The session's registry, for inspection by downstream tooling.
    pub fn registry(&self) -> &DeepLinkRegistry {
        &self.registry
    }
}

impl Analyzer for DeepLinkRule {
    fn analyze(&mut self, unit: &SourceUnit) -> Result<Vec<Issue>> {
        let extracted = DeepLinkExtractor::new(unit, &self.decorator_name).extract()?;

        let mut issues = Vec::new();
        for item in extracted {
            let outcome = self.registry.register(item.declaration);
            for conflict in &outcome.conflicts {
                issues.push(conflict_issue(unit, conflict, item.class_span));
            }
        }
        Ok(issues)
    }
}

fn conflict_issue(unit: &SourceUnit, conflict: &Conflict, class_span: Span) -> Issue {
    let message = match conflict {
        Conflict::Name {
            name,
            existing_file,
        } => format!(
            "Deeplink with name '{}' was existed at {}. Try another instead.",
            name, existing_file
        ),
        Conflict::Segment {
            segment,
            existing_file,
        } => format!(
            "Deeplink with segment '{}' was existed at {}. Try another instead.",
            segment, existing_file
        ),
    };
    issue_at(
        unit,
        class_span,
        message,
        Severity::Error,
        Rule::DeepLinkConfig,
    )
}
