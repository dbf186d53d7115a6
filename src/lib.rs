//! Ionlint - lint rules for Ionic Angular projects
//!
//! Ionlint is a CLI tool and library for checking Ionic Angular projects. It
//! extracts `@IonicPage` deep-link configuration from page classes and
//! enforces project-wide uniqueness of route names and URL segments, plus a
//! handful of module-wiring and import hygiene checks.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, source units, and the analysis session
//! - `issues`: Issue type definitions
//! - `rules`: The individual lint rules
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
