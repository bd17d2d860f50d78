//! Source Parser Module
//!
//! Tree-sitter based evaluation of Python sources into module bindings.
//!
//! ```rust,ignore
//! use sphinx_me::analyzer::parser::{NoImports, Parser, PythonParser};
//!
//! let parser = PythonParser::new()?;
//! let result = parser.parse("pkg/__init__.py", content, &NoImports)?;
//! ```

pub mod python;
pub mod traits;

pub use python::{PythonParser, parse_string_literal};
pub use traits::{
    Bindings, ImportRef, ImportResolver, NoImports, ParseResult, Parser, create_ts_parser,
    get_node_text,
};
