//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/sphinx-me/) and project level configuration.

use serde::{Deserialize, Serialize};

use crate::constants::install::DEFAULT_DOCS_DIR;
use crate::constants::scan::DEFAULT_IGNORE;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Documentation scaffold settings
    pub docs: DocsConfig,

    /// Project scan settings
    pub scan: ScanConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            docs: DocsConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `SphinxMeError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        validate_docs_dir(&self.docs.dir)?;

        if let Some(bad) = self.scan.ignore.iter().find(|n| n.contains(['/', '\\'])) {
            return Err(crate::types::SphinxMeError::Config(format!(
                "scan.ignore entries are file names, got {}",
                bad
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Docs Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocsConfig {
    /// Documentation directory, relative to the project root
    pub dir: String,

    /// README to include, overriding discovery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_DOCS_DIR.to_string(),
            readme: None,
        }
    }
}

/// A docs directory must be exactly one directory below the project root,
/// since `conf.py` locates the root as the parent of its own directory.
pub fn validate_docs_dir(dir: &str) -> crate::types::Result<()> {
    let mut parts = std::path::Path::new(dir)
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir));
    if !matches!(
        (parts.next(), parts.next()),
        (Some(std::path::Component::Normal(_)), None)
    ) {
        return Err(crate::types::SphinxMeError::Config(format!(
            "docs.dir must be a single directory directly under the project root, got {:?}",
            dir
        )));
    }
    Ok(())
}

// =============================================================================
// Scan Configuration
// =============================================================================

/// Order in which project root entries are visited. Later matches win, so
/// the order decides which module supplies the version when several do.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanOrder {
    /// Whatever order the filesystem enumerates entries in
    #[default]
    Filesystem,
    /// Byte-wise file name order
    Sorted,
}

impl std::fmt::Display for ScanOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanOrder::Filesystem => write!(f, "filesystem"),
            ScanOrder::Sorted => write!(f, "sorted"),
        }
    }
}

impl std::str::FromStr for ScanOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "filesystem" => Ok(ScanOrder::Filesystem),
            "sorted" => Ok(ScanOrder::Sorted),
            _ => Err(format!(
                "Unknown scan order: {}. Valid values: filesystem, sorted",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Entry visiting order
    pub order: ScanOrder,

    /// Entry names never loaded as modules
    pub ignore: Vec<String>,

    /// Write an AUTHORS file when the author came from a fallback
    pub write_authors: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            order: ScanOrder::default(),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            write_authors: true,
        }
    }
}
