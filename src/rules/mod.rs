//! The individual lint rules.
//!
//! Every rule is a per-compilation-unit analyzer. Rules that enforce
//! project-wide constraints (deep-link uniqueness, duplicate class names,
//! duplicate module declarations) keep their own state between calls; one
//! rule instance lives for a whole analysis session.

pub mod deep_link;
pub mod duplicate_class_name;
pub mod duplicate_declaration;
pub mod helpers;
pub mod preserve_whitespace;
pub mod properly_imports;
pub mod view_encapsulation;

use anyhow::Result;

use crate::config::Config;
use crate::core::SourceUnit;
use crate::issues::Issue;

/// A per-unit analyzer.
///
/// `analyze` is called once per compilation unit, in the session's
/// file-processing order. A returned error means this unit's analysis
/// stopped at the failure point; no issues from it are reported.
pub trait Analyzer {
    fn analyze(&mut self, unit: &SourceUnit) -> Result<Vec<Issue>>;
}

/// All rules, in their fixed execution order.
pub fn default_analyzers(config: &Config) -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(deep_link::DeepLinkRule::new(&config.deep_link_decorator)),
        Box::new(duplicate_class_name::NoDuplicateClassName::default()),
        Box::new(duplicate_declaration::NoDuplicateDeclaration::default()),
        Box::new(properly_imports::ProperlyImports),
        Box::new(preserve_whitespace::PreserveWhitespace),
        Box::new(view_encapsulation::ViewEncapsulation),
    ]
}
