use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{
    BytePos, FileName, Globals, SourceFile, SourceMap, SourceMapper, Span, sync::Lrc,
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// One parsed compilation unit plus everything needed to map AST spans back
/// to source text and positions.
pub struct SourceUnit {
    pub path: String,
    pub module: Module,
    source_map: Arc<SourceMap>,
    source_file: Lrc<SourceFile>,
}

impl std::fmt::Debug for SourceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceUnit").field("path", &self.path).finish_non_exhaustive()
    }
}

impl SourceUnit {
    /// Verbatim source substring covered by `span`.
    ///
    /// Fails when the span does not map cleanly into the unit's source (an
    /// unexpected node shape); callers treat that as a hard stop for this
    /// unit's analysis.
    pub fn snippet(&self, span: Span) -> Result<String> {
        self.source_map
            .span_to_snippet(span)
            .map_err(|e| anyhow!("failed to read source for span in {}: {:?}", self.path, e))
    }

    /// 1-based line and column of a position.
    pub fn position(&self, pos: BytePos) -> (usize, usize) {
        let loc = self.source_map.lookup_char_pos(pos);
        (loc.line, loc.col_display + 1)
    }

    /// The full text of a 1-based source line, for issue context.
    pub fn source_line(&self, line: usize) -> Option<String> {
        self.source_file.get_line(line - 1).map(|cow| cow.to_string())
    }

    /// Byte offset of `span` relative to the start of the unit, plus its width.
    pub fn offset(&self, span: Span) -> (usize, usize) {
        let start = (span.lo - self.source_file.start_pos).0 as usize;
        let length = (span.hi - span.lo).0 as usize;
        (start, length)
    }
}

/// Parse TypeScript source code into an AST with decorator support enabled.
///
/// Each unit gets its own SourceMap so span offsets are relative to the file
/// start.
pub fn parse_ts_source(code: String, file_path: &str) -> Result<SourceUnit> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map: Arc<SourceMap> = Default::default();
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(SourceUnit {
            path: file_path.to_string(),
            module,
            source_map,
            source_file,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decorated_class() {
        let unit = parse_ts_source(
            "@IonicPage({ name: 'Home' })\nexport class HomePage {}\n".to_string(),
            "home.ts",
        )
        .unwrap();
        assert_eq!(unit.path, "home.ts");
        assert_eq!(unit.module.body.len(), 1);
    }

    #[test]
    fn test_parse_error_reports_path() {
        let err = parse_ts_source("class {".to_string(), "broken.ts").unwrap_err();
        assert!(err.to_string().contains("broken.ts"));
    }

    #[test]
    fn test_snippet_and_offset() {
        let code = "const x = 1;\n".to_string();
        let unit = parse_ts_source(code, "x.ts").unwrap();
        let span = swc_common::Spanned::span(&unit.module.body[0]);
        assert_eq!(unit.snippet(span).unwrap(), "const x = 1;");
        assert_eq!(unit.offset(span), (0, 12));
        assert_eq!(unit.position(span.lo), (1, 1));
    }
}
