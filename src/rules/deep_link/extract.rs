//! Extraction of deep-link declarations from one compilation unit.

use std::path::Path;

use anyhow::Result;
use swc_common::{Span, Spanned};
use swc_ecma_ast::{ClassDecl, Expr, Lit, ObjectLit, Prop, PropOrSpread};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::SourceUnit;
use crate::rules::helpers::{class_anchor_span, decorator_call, prop_key_text};

use super::literal::{AnnotationProperty, PropertyValue, resolve_string, resolve_string_list};
use super::registry::DeepLinkDeclaration;

pub const NAME_ATTRIBUTE: &str = "name";
pub const SEGMENT_ATTRIBUTE: &str = "segment";
pub const PRIORITY_ATTRIBUTE: &str = "priority";
pub const DEFAULT_HISTORY_ATTRIBUTE: &str = "defaultHistory";

pub const DEFAULT_PRIORITY: &str = "low";

/// A declaration plus the span of its owning class, for anchoring
/// diagnostics.
#[derive(Debug)]
pub struct ExtractedDeepLink {
    pub declaration: DeepLinkDeclaration,
    pub class_span: Span,
}

/// Default URL segment for a unit: its file base name with one trailing
/// extension removed (`pages/home.page.ts` → `home.page`).
pub fn default_segment(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Visitor collecting deep-link declarations from class decorators.
///
/// Extraction is fail-fast per unit: the first error while reading a
/// decorator's source text aborts the whole unit, and no declarations are
/// emitted for it.
pub struct DeepLinkExtractor<'a> {
    unit: &'a SourceUnit,
    decorator_name: &'a str,
    extracted: Vec<ExtractedDeepLink>,
    error: Option<anyhow::Error>,
}

impl<'a> DeepLinkExtractor<'a> {
    pub fn new(unit: &'a SourceUnit, decorator_name: &'a str) -> Self {
        Self {
            unit,
            decorator_name,
            extracted: Vec::new(),
            error: None,
        }
    }

    pub fn extract(mut self) -> Result<Vec<ExtractedDeepLink>> {
        let unit = self.unit;
        unit.module.visit_with(&mut self);
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.extracted),
        }
    }

    fn extract_class(&mut self, node: &ClassDecl) -> Result<()> {
        let class_name = node.ident.sym.to_string();

        for decorator in &node.class.decorators {
            let Some((name, call)) = decorator_call(decorator) else {
                continue;
            };
            if name != self.decorator_name {
                continue;
            }

            // No argument, or a non-object argument, means all defaults.
            let properties = match call.args.first().map(|arg| &*arg.expr) {
                Some(Expr::Object(object)) => self.collect_properties(object)?,
                _ => Vec::new(),
            };

            let segment_default = default_segment(&self.unit.path);
            let declaration = DeepLinkDeclaration {
                name: resolve_string(&properties, NAME_ATTRIBUTE, &class_name),
                segment: resolve_string(&properties, SEGMENT_ATTRIBUTE, &segment_default),
                priority: resolve_string(&properties, PRIORITY_ATTRIBUTE, DEFAULT_PRIORITY),
                default_history: resolve_string_list(
                    &properties,
                    DEFAULT_HISTORY_ATTRIBUTE,
                    Vec::new(),
                ),
                class_name: class_name.clone(),
                file_name: self.unit.path.clone(),
                raw_text: self.unit.snippet(call.span)?,
            };

            self.extracted.push(ExtractedDeepLink {
                declaration,
                class_span: class_anchor_span(node),
            });
        }

        Ok(())
    }

    fn collect_properties(&self, object: &ObjectLit) -> Result<Vec<AnnotationProperty>> {
        let mut properties = Vec::new();

        for prop in &object.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let Prop::KeyValue(kv) = &**prop else {
                continue;
            };
            let Some(key) = prop_key_text(&kv.key) else {
                continue;
            };
            properties.push(AnnotationProperty {
                key,
                value: self.property_value(&kv.value)?,
            });
        }

        Ok(properties)
    }

    fn property_value(&self, expr: &Expr) -> Result<PropertyValue> {
        match expr {
            Expr::Array(array) => {
                let mut elements = Vec::new();
                for element in array.elems.iter().flatten() {
                    elements.push(self.unit.snippet(element.expr.span())?);
                }
                Ok(PropertyValue::Array {
                    text: self.unit.snippet(array.span)?,
                    elements,
                })
            }
            Expr::Lit(Lit::Str(_)) | Expr::Tpl(_) => Ok(PropertyValue::Str {
                text: self.unit.snippet(expr.span())?,
            }),
            other => Ok(PropertyValue::Other {
                text: self.unit.snippet(other.span())?,
            }),
        }
    }
}

impl Visit for DeepLinkExtractor<'_> {
    fn visit_class_decl(&mut self, node: &ClassDecl) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.extract_class(node) {
            self.error = Some(err);
            return;
        }
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::parse_ts_source;

    use super::*;

    fn extract(path: &str, code: &str) -> Vec<ExtractedDeepLink> {
        let unit = parse_ts_source(code.to_string(), path).unwrap();
        DeepLinkExtractor::new(&unit, "IonicPage")
            .extract()
            .unwrap()
    }

    #[test]
    fn test_no_arguments_yields_all_defaults() {
        let extracted = extract("home.ts", "@IonicPage()\nexport class Home {}\n");
        assert_eq!(extracted.len(), 1);

        let decl = &extracted[0].declaration;
        assert_eq!(decl.name, "Home");
        assert_eq!(decl.segment, "home");
        assert_eq!(decl.priority, "low");
        assert_eq!(decl.default_history, Vec::<String>::new());
        assert_eq!(decl.class_name, "Home");
        assert_eq!(decl.file_name, "home.ts");
        assert_eq!(decl.raw_text, "IonicPage()");
    }

    #[test]
    fn test_explicit_attributes() {
        let extracted = extract(
            "detail.ts",
            "@IonicPage({ name: 'Detail', segment: 'detail/:id', priority: 'high' })\nclass DetailPage {}\n",
        );
        let decl = &extracted[0].declaration;
        assert_eq!(decl.name, "Detail");
        assert_eq!(decl.segment, "detail/:id");
        assert_eq!(decl.priority, "high");
        assert_eq!(decl.class_name, "DetailPage");
    }

    #[test]
    fn test_default_history_order_and_quotes() {
        let extracted = extract(
            "about.ts",
            "@IonicPage({ defaultHistory: ['a', \"b\", `c`] })\nclass About {}\n",
        );
        assert_eq!(
            extracted[0].declaration.default_history,
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let extracted = extract(
            "dup.ts",
            "@IonicPage({ segment: 'x', segment: 'y' })\nclass Dup {}\n",
        );
        assert_eq!(extracted[0].declaration.segment, "y");
    }

    #[test]
    fn test_default_segment_strips_one_extension() {
        assert_eq!(default_segment("src/pages/home.page.ts"), "home.page");
        assert_eq!(default_segment("home.ts"), "home");
        assert_eq!(default_segment("noext"), "noext");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let extracted = extract(
            "home.ts",
            "@IonicPage({ name: 'Home', bogus: 'value' })\nclass HomePage {}\n",
        );
        assert_eq!(extracted[0].declaration.name, "Home");
    }

    #[test]
    fn test_other_decorators_skipped() {
        let extracted = extract(
            "home.ts",
            "@Component({ selector: 'page-home' })\nclass HomePage {}\n",
        );
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_bare_decorator_skipped() {
        let extracted = extract("home.ts", "@IonicPage\nclass HomePage {}\n");
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_exported_class_extracted() {
        let extracted = extract(
            "home.ts",
            "@IonicPage({ name: 'Home' })\nexport class HomePage {}\n",
        );
        assert_eq!(extracted.len(), 1);
    }

    #[test]
    fn test_raw_text_is_verbatim_call_source() {
        let extracted = extract(
            "home.ts",
            "@IonicPage({ name: 'Home',  segment: 'home' })\nclass HomePage {}\n",
        );
        assert_eq!(
            extracted[0].declaration.raw_text,
            "IonicPage({ name: 'Home',  segment: 'home' })"
        );
    }

    #[test]
    fn test_multiple_classes_in_one_unit() {
        let extracted = extract(
            "pages.ts",
            "@IonicPage({ name: 'A' })\nclass PageA {}\n@IonicPage({ name: 'B' })\nclass PageB {}\n",
        );
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].declaration.name, "A");
        assert_eq!(extracted[1].declaration.name, "B");
    }
}
