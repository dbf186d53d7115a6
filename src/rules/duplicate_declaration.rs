//! Detects components declared by more than one NgModule.

use std::collections::HashMap;

use anyhow::Result;
use swc_ecma_ast::{CallExpr, ClassDecl, Expr, Prop, PropOrSpread};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::SourceUnit;
use crate::issues::{Issue, Rule, Severity};
use crate::rules::Analyzer;
use crate::rules::helpers::{decorator_call, issue_at, object_arg, prop_key_text};

const COMPONENT_DECORATOR: &str = "Component";
const NG_MODULE_DECORATOR: &str = "NgModule";

/// Session-wide map of component class names to the modules declaring them.
///
/// `@Component` classes with a selector seed an entry; `@NgModule`
/// declarations fill it in. A component listed by two modules is a wiring
/// error that Angular only reports at runtime.
#[derive(Default)]
pub struct NoDuplicateDeclaration {
    component_modules: HashMap<String, Vec<String>>,
}

impl Analyzer for NoDuplicateDeclaration {
    fn analyze(&mut self, unit: &SourceUnit) -> Result<Vec<Issue>> {
        let mut visitor = DeclarationVisitor {
            rule: self,
            unit,
            issues: Vec::new(),
        };
        unit.module.visit_with(&mut visitor);
        Ok(visitor.issues)
    }
}

struct DeclarationVisitor<'a> {
    rule: &'a mut NoDuplicateDeclaration,
    unit: &'a SourceUnit,
    issues: Vec<Issue>,
}

impl DeclarationVisitor<'_> {
    fn record_component(&mut self, node: &ClassDecl, call: &CallExpr) {
        let Some(object) = object_arg(call) else {
            return;
        };
        let has_selector = object.props.iter().any(|prop| {
            matches!(prop, PropOrSpread::Prop(p)
                if matches!(&**p, Prop::KeyValue(kv)
                    if prop_key_text(&kv.key).as_deref() == Some("selector")))
        });
        if has_selector {
            let class_name = node.ident.sym.to_string();
            self.rule.component_modules.entry(class_name).or_default();
        }
    }

    fn check_module(&mut self, node: &ClassDecl, call: &CallExpr) {
        let Some(object) = object_arg(call) else {
            return;
        };
        let module_name = node.ident.sym.to_string();

        // A re-analyzed module must not count against itself.
        for modules in self.rule.component_modules.values_mut() {
            modules.retain(|m| *m != module_name);
        }

        for prop in &object.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let Prop::KeyValue(kv) = &**prop else {
                continue;
            };
            if prop_key_text(&kv.key).as_deref() != Some("declarations") {
                continue;
            }
            let Expr::Array(array) = &*kv.value else {
                continue;
            };

            for element in array.elems.iter().flatten() {
                let Expr::Ident(ident) = &*element.expr else {
                    continue;
                };
                let component = ident.sym.to_string();
                let modules = self
                    .rule
                    .component_modules
                    .entry(component.clone())
                    .or_default();
                if !modules.contains(&module_name) {
                    modules.push(module_name.clone());
                }
                if modules.len() > 1 {
                    let joined = modules.join(",");
                    self.issues.push(issue_at(
                        self.unit,
                        node.ident.span,
                        format!(
                            "A component with name '{}' was multiple declaration in '{}'",
                            component, joined
                        ),
                        Severity::Error,
                        Rule::NoDuplicateDeclaration,
                    ));
                }
            }
        }
    }
}

impl Visit for DeclarationVisitor<'_> {
    fn visit_class_decl(&mut self, node: &ClassDecl) {
        for decorator in &node.class.decorators {
            let Some((name, call)) = decorator_call(decorator) else {
                continue;
            };
            match name {
                COMPONENT_DECORATOR => self.record_component(node, call),
                NG_MODULE_DECORATOR => self.check_module(node, call),
                _ => {}
            }
        }
        node.visit_children_with(self);
    }
}
