//! Parsing, source units, file scanning, and the analysis session.

pub mod file_scanner;
pub mod parser;
pub mod session;

pub use parser::{SourceUnit, parse_ts_source};
pub use session::AnalysisSession;
