//! Project Context

use std::path::{Component, Path, PathBuf};

use crate::types::{Result, SphinxMeError};

/// The project being documented: the directory one level above the docs
/// directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
    name: String,
}

impl ProjectContext {
    /// Context for a configuration entry point at `<root>/<docs>/conf.py`
    pub fn from_conf_file(conf_file: &Path) -> Result<Self> {
        let absolute = std::path::absolute(conf_file)?;
        let docs_dir = absolute
            .parent()
            .ok_or_else(|| SphinxMeError::InvalidConfPath(conf_file.to_path_buf()))?;
        Ok(Self::from_root(&docs_dir.join("..")))
    }

    /// Context for an explicit project root. The path is made absolute
    /// lexically, so it does not need to exist.
    pub fn from_root(root: &Path) -> Self {
        let absolute = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let root = normalize_path(&absolute);
        let name = project_name(&root);
        Self { root, name }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Final path segment, ignoring trailing separators. Empty for a
/// filesystem root.
pub fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Resolve `.` and `..` components without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
