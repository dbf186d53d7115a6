//! Warns when a component leaves `preserveWhitespaces` unset.

use anyhow::Result;
use swc_common::Spanned;
use swc_ecma_ast::ClassDecl;
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::SourceUnit;
use crate::issues::{Issue, Rule, Severity};
use crate::rules::Analyzer;
use crate::rules::helpers::{decorator_call, has_object_key, issue_at, object_arg};

const COMPONENT_DECORATOR: &str = "Component";
const PRESERVE_WHITESPACES_KEY: &str = "preserveWhitespaces";

pub struct PreserveWhitespace;

impl Analyzer for PreserveWhitespace {
    fn analyze(&mut self, unit: &SourceUnit) -> Result<Vec<Issue>> {
        let mut visitor = ComponentVisitor {
            unit,
            issues: Vec::new(),
        };
        unit.module.visit_with(&mut visitor);
        Ok(visitor.issues)
    }
}

struct ComponentVisitor<'a> {
    unit: &'a SourceUnit,
    issues: Vec<Issue>,
}

impl Visit for ComponentVisitor<'_> {
    fn visit_class_decl(&mut self, node: &ClassDecl) {
        for decorator in &node.class.decorators {
            let Some((name, call)) = decorator_call(decorator) else {
                continue;
            };
            if name != COMPONENT_DECORATOR {
                continue;
            }
            let Some(object) = object_arg(call) else {
                continue;
            };
            if has_object_key(object, PRESERVE_WHITESPACES_KEY) {
                continue;
            }
            // Anchor on the last property so the fix location is obvious.
            let anchor = object
                .props
                .last()
                .map(|prop| prop.span())
                .unwrap_or(object.span);
            self.issues.push(issue_at(
                self.unit,
                anchor,
                "Angular Component should define preserveWhitespaces as false".to_string(),
                Severity::Warning,
                Rule::PreserveWhitespace,
            ));
        }
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::parse_ts_source;

    use super::*;

    fn analyze(path: &str, code: &str) -> Vec<Issue> {
        let unit = parse_ts_source(code.to_string(), path).unwrap();
        PreserveWhitespace.analyze(&unit).unwrap()
    }

    #[test]
    fn test_missing_preserve_whitespaces_warns() {
        let issues = analyze(
            "home.ts",
            "@Component({ selector: 'page-home' })\nclass HomePage {}\n",
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Angular Component should define preserveWhitespaces as false"
        );
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].rule, Rule::PreserveWhitespace);
    }

    #[test]
    fn test_defined_preserve_whitespaces_is_clean() {
        let issues = analyze(
            "home.ts",
            "@Component({ selector: 'page-home', preserveWhitespaces: false })\nclass HomePage {}\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_empty_component_object_warns() {
        let issues = analyze("home.ts", "@Component({})\nclass HomePage {}\n");
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_component_without_object_skipped() {
        let issues = analyze("home.ts", "@Component()\nclass HomePage {}\n");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_non_component_decorator_skipped() {
        let issues = analyze("home.ts", "@Injectable({})\nclass HomeService {}\n");
        assert!(issues.is_empty());
    }
}
