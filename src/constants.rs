//! Global Constants
//!
//! File names, namespace keys, and prompt texts shared across modules.

/// Binary name invoked by generated configuration files
pub const BIN_NAME: &str = "sphinx-me";

/// Project scan constants
pub mod scan {
    /// Name of the authors record (matched case-insensitively)
    pub const AUTHORS_FILE: &str = "AUTHORS";

    /// Characters stripped from both ends of each AUTHORS line
    pub const AUTHOR_STRIP_CHARS: &[char] = &['*', '-', ' ', '\n', '\r', '\t'];

    /// Entries never loaded as modules
    pub const DEFAULT_IGNORE: &[&str] = &["setup.py"];

    /// Python source extension
    pub const PY_EXTENSION: &str = "py";

    /// Package marker file
    pub const PACKAGE_INIT: &str = "__init__.py";

    /// Maximum depth when following `from .x import y` inside packages
    pub const MAX_IMPORT_DEPTH: usize = 4;
}

/// Version lookup constants
pub mod version {
    /// Attribute names searched for a version, before their uppercase forms
    pub const BASE_NAMES: &[&str] = &["__version__", "get_version", "version"];

    /// Module attribute holding the author
    pub const AUTHOR_ATTRIBUTE: &str = "__author__";
}

/// Configuration namespace keys
pub mod namespace {
    pub const VERSION: &str = "version";
    pub const RELEASE: &str = "release";
    pub const PROJECT: &str = "project";
    pub const MASTER_DOC: &str = "master_doc";
    pub const COPYRIGHT: &str = "copyright";

    /// Root document name written to `master_doc`
    pub const MASTER_DOC_VALUE: &str = "index";
}

/// Interactive prompt texts
pub mod prompts {
    pub const VERSION: &str = "No version number found, please enter one: ";
    pub const AUTHOR: &str = "No author found, please enter one: ";
}

/// Installer constants
pub mod install {
    /// Default documentation directory name
    pub const DEFAULT_DOCS_DIR: &str = "docs";

    /// Sphinx configuration entry point
    pub const CONF_FILE: &str = "conf.py";

    /// Root document
    pub const INDEX_FILE: &str = "index.rst";

    /// README candidates, in discovery order
    pub const README_CANDIDATES: &[&str] = &["README.rst", "README.txt", "README", "README.md"];
}
