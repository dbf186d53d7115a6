//! Detects decorated classes whose name is already taken by another file.

use std::collections::HashMap;

use anyhow::Result;
use swc_ecma_ast::ClassDecl;
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::SourceUnit;
use crate::issues::{Issue, Rule, Severity};
use crate::rules::Analyzer;
use crate::rules::helpers::issue_at;

/// Session-wide map of decorated class names to the files declaring them.
#[derive(Default)]
pub struct NoDuplicateClassName {
    class_files: HashMap<String, Vec<String>>,
}

impl Analyzer for NoDuplicateClassName {
    fn analyze(&mut self, unit: &SourceUnit) -> Result<Vec<Issue>> {
        let mut visitor = ClassNameVisitor {
            rule: self,
            unit,
            issues: Vec::new(),
        };
        unit.module.visit_with(&mut visitor);
        Ok(visitor.issues)
    }
}

struct ClassNameVisitor<'a> {
    rule: &'a mut NoDuplicateClassName,
    unit: &'a SourceUnit,
    issues: Vec<Issue>,
}

impl Visit for ClassNameVisitor<'_> {
    fn visit_class_decl(&mut self, node: &ClassDecl) {
        if !node.class.decorators.is_empty() {
            let class_name = node.ident.sym.to_string();
            match self.rule.class_files.get(&class_name) {
                Some(files) => {
                    if !files.iter().any(|f| *f == self.unit.path) {
                        self.issues.push(issue_at(
                            self.unit,
                            node.ident.span,
                            format!(
                                "A class with name '{}' was existed. Try another instead.",
                                class_name
                            ),
                            Severity::Error,
                            Rule::NoDuplicateClassName,
                        ));
                    }
                }
                None => {
                    self.rule
                        .class_files
                        .entry(class_name)
                        .or_default()
                        .push(self.unit.path.clone());
                }
            }
        }
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::parse_ts_source;

    use super::*;

    fn analyze(rule: &mut NoDuplicateClassName, path: &str, code: &str) -> Vec<Issue> {
        let unit = parse_ts_source(code.to_string(), path).unwrap();
        rule.analyze(&unit).unwrap()
    }

    #[test]
    fn test_duplicate_class_name_across_files() {
        let mut rule = NoDuplicateClassName::default();
        let code = "@Component({ selector: 'page-home' })\nclass HomePage {}\n";

        assert!(analyze(&mut rule, "a.ts", code).is_empty());

        let issues = analyze(&mut rule, "b.ts", code);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "A class with name 'HomePage' was existed. Try another instead."
        );
        assert_eq!(issues[0].rule, Rule::NoDuplicateClassName);
    }

    #[test]
    fn test_same_file_reanalysis_not_reported() {
        let mut rule = NoDuplicateClassName::default();
        let code = "@Component({})\nclass HomePage {}\n";

        assert!(analyze(&mut rule, "a.ts", code).is_empty());
        assert!(analyze(&mut rule, "a.ts", code).is_empty());
    }

    #[test]
    fn test_undecorated_classes_ignored() {
        let mut rule = NoDuplicateClassName::default();
        let code = "class Helper {}\n";

        assert!(analyze(&mut rule, "a.ts", code).is_empty());
        assert!(analyze(&mut rule, "b.ts", code).is_empty());
    }
}
