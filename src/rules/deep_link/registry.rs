//! Project-wide uniqueness index for deep-link names and segments.

use std::collections::HashMap;

/// One resolved deep-link declaration.
///
/// Immutable after construction; owned by the registry once accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkDeclaration {
    pub name: String,
    pub segment: String,
    pub priority: String,
    pub default_history: Vec<String>,
    pub class_name: String,
    /// Path of the compilation unit declaring this deep link.
    pub file_name: String,
    /// Verbatim source of the decorator's call expression.
    pub raw_text: String,
}

/// A rejected registration, citing the file that already owns the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    Name { name: String, existing_file: String },
    Segment { segment: String, existing_file: String },
}

/// Result of one `register` call. Up to two conflicts can be raised for a
/// single declaration (one per axis).
#[derive(Debug, Default)]
pub struct RegisterOutcome {
    pub conflicts: Vec<Conflict>,
}

impl RegisterOutcome {
    pub fn accepted(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Session-wide registry of accepted declarations.
///
/// Both indices keep insertion order within each key, which is the
/// file-processing order chosen by the session. The registry is never reset
/// between compilation units; that cross-file state is the whole point.
#[derive(Debug, Default)]
pub struct DeepLinkRegistry {
    name_index: HashMap<String, Vec<DeepLinkDeclaration>>,
    segment_index: HashMap<String, Vec<String>>,
}

impl DeepLinkRegistry {
    /// Register a declaration, checking both uniqueness axes.
    ///
    /// A name or segment already owned by a *different* file is a conflict;
    /// re-registration from the same file is accepted. Both checks always
    /// run, and the declaration is inserted into both indices only when
    /// neither raised a conflict. Accepted same-file re-registrations are
    /// appended without deduplication.
    pub fn register(&mut self, declaration: DeepLinkDeclaration) -> RegisterOutcome {
        let mut conflicts = Vec::new();

        if let Some(entries) = self.name_index.get(&declaration.name)
            && let Some(first) = entries.first()
            && !entries.iter().any(|e| e.file_name == declaration.file_name)
        {
            conflicts.push(Conflict::Name {
                name: declaration.name.clone(),
                existing_file: first.file_name.clone(),
            });
        }

        if let Some(files) = self.segment_index.get(&declaration.segment)
            && let Some(first) = files.first()
            && !files.iter().any(|f| *f == declaration.file_name)
        {
            conflicts.push(Conflict::Segment {
                segment: declaration.segment.clone(),
                existing_file: first.clone(),
            });
        }

        if conflicts.is_empty() {
            self.segment_index
                .entry(declaration.segment.clone())
                .or_default()
                .push(declaration.file_name.clone());
            self.name_index
                .entry(declaration.name.clone())
                .or_default()
                .push(declaration);
        }

        RegisterOutcome { conflicts }
    }

    /// Accepted declarations registered under `name`, in insertion order.
    pub fn name_entries(&self, name: &str) -> &[DeepLinkDeclaration] {
        self.name_index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Files registered under `segment`, in insertion order.
    pub fn segment_files(&self, segment: &str) -> &[String] {
        self.segment_index
            .get(segment)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
