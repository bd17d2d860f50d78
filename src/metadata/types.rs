//! Metadata Types

use std::path::PathBuf;

/// Where a resolved value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// First meaningful line of an AUTHORS file
    AuthorsFile(PathBuf),
    /// Attribute of a top-level module or package
    Module(String),
    /// Supplied by the fallback strategy
    Fallback,
}

impl std::fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthorsFile(path) => write!(f, "{}", path.display()),
            Self::Module(name) => write!(f, "module {}", name),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A value found during the project scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sourced {
    pub value: String,
    pub source: MetadataSource,
}

impl Sourced {
    pub fn new(value: impl Into<String>, source: MetadataSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }
}

/// Result of scanning a project root, before fallbacks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub version: Option<Sourced>,
    pub author: Option<Sourced>,
}

/// Fully resolved project metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub root: PathBuf,
    pub project: String,
    pub version: Sourced,
    pub author: Sourced,
}

impl ProjectMetadata {
    /// `"<year>, <author>"`
    pub fn copyright(&self, year: i32) -> String {
        format!("{}, {}", year, self.author.value)
    }
}
