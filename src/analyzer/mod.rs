//! Code Analyzer Module
//!
//! Static stand-in for Python's import machinery:
//! - Source evaluation of top-level bindings (tree-sitter)
//! - Module and package lookup under an explicit project root

pub mod loader;
pub mod parser;
pub mod value;

pub use loader::{
    Attributes, ImportError, LoadedModule, ModuleKind, ModuleLoader, StaticModuleLoader,
};
pub use parser::{Bindings, PythonParser};
pub use value::{AttrValue, SeqKind};
