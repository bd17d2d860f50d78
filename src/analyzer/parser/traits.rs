use indexmap::IndexMap;

use crate::analyzer::value::AttrValue;
use crate::types::{Result, SphinxMeError};

/// Top-level bindings of a module, in definition order
pub type Bindings = IndexMap<String, AttrValue>;

pub struct ParseResult {
    pub bindings: Bindings,
}

/// Target of a `from <module> import ...` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    /// Number of leading dots (0 for an absolute import)
    pub level: usize,
    /// Dotted module path after the dots, if any
    pub module: Option<String>,
}

impl ImportRef {
    pub fn absolute(module: impl Into<String>) -> Self {
        Self {
            level: 0,
            module: Some(module.into()),
        }
    }

    pub fn relative(level: usize, module: Option<&str>) -> Self {
        Self {
            level,
            module: module.map(String::from),
        }
    }

    /// Dotted path segments after the leading dots
    pub fn segments(&self) -> Vec<&str> {
        self.module
            .as_deref()
            .map(|m| m.split('.').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }
}

/// Supplies the bindings of modules referenced by `from ... import`
pub trait ImportResolver {
    fn resolve(&self, import: &ImportRef) -> Option<Bindings>;
}

/// Resolver for sources evaluated in isolation
pub struct NoImports;

impl ImportResolver for NoImports {
    fn resolve(&self, _import: &ImportRef) -> Option<Bindings> {
        None
    }
}

pub trait Parser: Send + Sync {
    fn parse(&self, path: &str, content: &str, imports: &dyn ImportResolver)
    -> Result<ParseResult>;
}

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
pub fn get_node_text<'a>(node: tree_sitter::Node, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}-{}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            node.end_position().row + 1,
            node.end_position().column,
            e
        );
        ""
    })
}

/// Create a tree-sitter parser for the given language.
pub fn create_ts_parser<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| SphinxMeError::Parse {
            message: format!("Failed to set {} language: {}", lang_name, e),
            path: String::new(),
        })?;
    Ok(parser)
}
