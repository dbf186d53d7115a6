//! Warns when a component leaves `encapsulation` unset.

use anyhow::Result;
use swc_common::{Span, Spanned};
use swc_ecma_ast::{ClassDecl, ImportDecl, ImportSpecifier, ModuleExportName};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::SourceUnit;
use crate::issues::{Issue, Rule, Severity};
use crate::rules::Analyzer;
use crate::rules::helpers::{decorator_call, has_object_key, issue_at, object_arg};

const COMPONENT_DECORATOR: &str = "Component";
const ENCAPSULATION_KEY: &str = "encapsulation";
const ANGULAR_CORE: &str = "@angular/core";
const VIEW_ENCAPSULATION: &str = "ViewEncapsulation";

pub struct ViewEncapsulation;

impl Analyzer for ViewEncapsulation {
    fn analyze(&mut self, unit: &SourceUnit) -> Result<Vec<Issue>> {
        let mut visitor = EncapsulationVisitor {
            unit,
            issues: Vec::new(),
            angular_core_imports: Vec::new(),
        };
        unit.module.visit_with(&mut visitor);

        // When a component needs fixing, the fix also needs the enum in
        // scope. Point at the @angular/core import that lacks it.
        let mut issues = visitor.issues;
        if !issues.is_empty() {
            for import in visitor.angular_core_imports {
                if !import.binds_view_encapsulation {
                    issues.push(issue_at(
                        unit,
                        import.span,
                        format!(
                            "{} should be import in '{}'.",
                            VIEW_ENCAPSULATION, ANGULAR_CORE
                        ),
                        Severity::Warning,
                        Rule::ViewEncapsulation,
                    ));
                }
            }
        }
        Ok(issues)
    }
}

struct AngularCoreImport {
    span: Span,
    binds_view_encapsulation: bool,
}

struct EncapsulationVisitor<'a> {
    unit: &'a SourceUnit,
    issues: Vec<Issue>,
    angular_core_imports: Vec<AngularCoreImport>,
}

impl Visit for EncapsulationVisitor<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        let Some(import_path) = node.src.value.as_str() else {
            return;
        };
        if !import_path.contains(ANGULAR_CORE) {
            return;
        }
        let binds = node.specifiers.iter().any(|specifier| match specifier {
            ImportSpecifier::Named(spec) => match &spec.imported {
                Some(ModuleExportName::Ident(imported)) => imported.sym == VIEW_ENCAPSULATION,
                Some(ModuleExportName::Str(_)) => false,
                None => spec.local.sym == VIEW_ENCAPSULATION,
            },
            _ => false,
        });
        self.angular_core_imports.push(AngularCoreImport {
            span: node.span,
            binds_view_encapsulation: binds,
        });
    }

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
            if has_object_key(object, ENCAPSULATION_KEY) {
                continue;
            }
            let anchor = object
                .props
                .last()
                .map(|prop| prop.span())
                .unwrap_or(object.span);
            self.issues.push(issue_at(
                self.unit,
                anchor,
                "Angular Component should define encapsulation as None".to_string(),
                Severity::Warning,
                Rule::ViewEncapsulation,
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
        ViewEncapsulation.analyze(&unit).unwrap()
    }

    #[test]
    fn test_missing_encapsulation_warns() {
        let issues = analyze(
            "home.ts",
            "@Component({ selector: 'page-home' })\nclass HomePage {}\n",
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Angular Component should define encapsulation as None"
        );
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_defined_encapsulation_is_clean() {
        let issues = analyze(
            "home.ts",
            "@Component({ selector: 'page-home', encapsulation: ViewEncapsulation.None })\nclass HomePage {}\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_missing_import_also_flagged() {
        let issues = analyze(
            "home.ts",
            "import { Component } from '@angular/core';\n@Component({ selector: 'page-home' })\nclass HomePage {}\n",
        );
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[1].message,
            "ViewEncapsulation should be import in '@angular/core'."
        );
        assert_eq!(issues[1].line, 1);
    }

    #[test]
    fn test_import_with_binding_not_flagged() {
        let issues = analyze(
            "home.ts",
            "import { Component, ViewEncapsulation } from '@angular/core';\n@Component({ selector: 'page-home' })\nclass HomePage {}\n",
        );
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_clean_component_does_not_flag_imports() {
        let issues = analyze(
            "home.ts",
            "import { Component } from '@angular/core';\n@Component({ encapsulation: ViewEncapsulation.None })\nclass HomePage {}\n",
        );
        assert!(issues.is_empty());
    }
}
