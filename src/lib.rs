//! sphinx-me - Sphinx Documentation Bootstrapper
//!
//! Scaffolds a Sphinx `docs/` directory for a Python project and keeps its
//! metadata (name, version, author, copyright) in sync with the sources.
//! Versions are read by statically evaluating the project's modules, so no
//! project code is ever executed.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sphinx_me::metadata::{ConfigNamespace, Deny, MetadataResolver, setup_conf};
//!
//! let resolver = MetadataResolver::new(Default::default())?;
//! let mut namespace = ConfigNamespace::new();
//! setup_conf(&mut namespace, Path::new("docs/conf.py"), &resolver, &Deny)?;
//! println!("{}", namespace.to_json()?);
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: tree-sitter based static module loader
//! - [`metadata`]: version extraction, project scan, fallbacks
//! - [`installer`]: `conf.py` and `index.rst` scaffolding
//! - [`config`]: layered configuration

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod installer;
pub mod metadata;
pub mod types;

// Configuration
pub use config::{Config, ConfigLoader, ScanOrder};

// Error Types
pub use types::error::{MissingValue, Result, ResultExt, SphinxMeError};

// Analyzer
pub use analyzer::{AttrValue, Attributes, LoadedModule, ModuleLoader, StaticModuleLoader};

// Metadata
pub use metadata::{
    ConfigNamespace, Deny, Fallback, Interactive, MetadataResolver, Preset, ProjectContext,
    ProjectMetadata, VersionExtractor, extract_version, setup_conf,
};

// Installer
pub use installer::{InstallOptions, InstallReport, Installer};
