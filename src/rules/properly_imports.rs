//! Flags imports that reach into framework-internal module paths.

use anyhow::Result;
use swc_ecma_ast::{ImportDecl, ImportSpecifier, ModuleExportName};
use swc_ecma_visit::Visit;

use crate::core::SourceUnit;
use crate::issues::{Issue, Rule, Severity};
use crate::rules::Analyzer;
use crate::rules::helpers::issue_at;

/// Deep import prefixes that are internal API. The proper import is the
/// prefix without its trailing slash.
const BLACKLIST: &[&str] = &[
    "@angular/core/",
    "@angular/forms/",
    "@angular/platform-browser/",
    "@angular/common/http/",
    "@ngx-translate/core/",
    "@ngx-translate/http-loader/",
    "@angular/platform-browser-dynamic/",
];

/// Deep paths that are public API despite matching the blacklist.
const WHITELIST: &[&str] = &["@angular/core/testing"];

pub struct ProperlyImports;

impl Analyzer for ProperlyImports {
    fn analyze(&mut self, unit: &SourceUnit) -> Result<Vec<Issue>> {
        let mut visitor = ImportVisitor {
            unit,
            issues: Vec::new(),
        };
        use swc_ecma_visit::VisitWith;
        unit.module.visit_with(&mut visitor);
        Ok(visitor.issues)
    }
}

struct ImportVisitor<'a> {
    unit: &'a SourceUnit,
    issues: Vec<Issue>,
}

impl ImportVisitor<'_> {
    fn report(&mut self, node: &ImportDecl, import_path: &str, proper: &str) {
        let quoted = node
            .src
            .raw
            .as_ref()
            .map(|raw| raw.to_string())
            .unwrap_or_else(|| format!("'{}'", import_path));
        self.issues.push(issue_at(
            self.unit,
            node.span,
            format!(
                "{} maybe internal API. Try import {} from '{}' instead.",
                quoted,
                import_clause_text(node),
                proper
            ),
            Severity::Error,
            Rule::ProperlyImports,
        ));
    }
}

impl Visit for ImportVisitor<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        let Some(import_path) = node.src.value.as_str() else {
            return;
        };
        let import_path = import_path.to_string();

        if import_path.contains("ionic-angular/") {
            self.report(node, &import_path, "ionic-angular");
            return;
        }

        for blacklisted in BLACKLIST {
            if import_path.contains(blacklisted) {
                let whitelisted = WHITELIST
                    .iter()
                    .any(|wl| !import_path.replacen(wl, "", 1).contains('/'));
                if whitelisted {
                    continue;
                }
                let proper = &blacklisted[..blacklisted.len() - 1];
                self.report(node, &import_path, proper);
                break;
            }
        }
    }
}

/// Reconstructed import clause text for the suggestion, e.g.
/// `{ NavController, NavParams }` or `Default, { Named }`.
fn import_clause_text(node: &ImportDecl) -> String {
    let mut default_import = None;
    let mut named = Vec::new();

    for specifier in &node.specifiers {
        match specifier {
            ImportSpecifier::Default(spec) => default_import = Some(spec.local.sym.to_string()),
            ImportSpecifier::Namespace(spec) => return format!("* as {}", spec.local.sym),
            ImportSpecifier::Named(spec) => {
                let local = spec.local.sym.to_string();
                match &spec.imported {
                    Some(ModuleExportName::Ident(imported)) if imported.sym != spec.local.sym => {
                        named.push(format!("{} as {}", imported.sym, local));
                    }
                    _ => named.push(local),
                }
            }
        }
    }

    match (default_import, named.is_empty()) {
        (Some(default), true) => default,
        (Some(default), false) => format!("{}, {{ {} }}", default, named.join(", ")),
        (None, false) => format!("{{ {} }}", named.join(", ")),
        (None, true) => "{ ... }".to_string(),
    }
}
