//! Module Loader
//!
//! Locates a top-level module or package under an explicit project root
//! and exposes its attributes. The root is always passed in; nothing is
//! added to any process-wide search path.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

use super::parser::{Bindings, ImportRef, ImportResolver, Parser, PythonParser};
use super::value::AttrValue;
use crate::constants::scan::{MAX_IMPORT_DEPTH, PACKAGE_INIT, PY_EXTENSION};
use crate::types::{ModuleName, Result, SphinxMeError};

// =============================================================================
// Attributes
// =============================================================================

/// Anything that exposes named attributes
pub trait Attributes {
    fn attr(&self, name: &str) -> Option<&AttrValue>;
}

impl Attributes for Bindings {
    fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// A single `<name>.py` file
    Module,
    /// A directory with `__init__.py`
    Package,
    /// A directory without `__init__.py`
    Namespace,
}

#[derive(Debug, Clone)]
pub struct LoadedModule {
    pub name: ModuleName,
    pub kind: ModuleKind,
    pub path: PathBuf,
    pub attributes: Bindings,
}

impl Attributes for LoadedModule {
    fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }
}

// =============================================================================
// Import Errors
// =============================================================================

/// Reasons a module could not be loaded. The scan treats all of them as
/// "skip this entry".
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid module name: {0:?}")]
    InvalidName(String),

    #[error("No module named {0}")]
    NotFound(String),

    #[error("Failed to load {name}: {source}")]
    Source {
        name: String,
        #[source]
        source: SphinxMeError,
    },
}

// =============================================================================
// Loader
// =============================================================================

/// Loads modules by bare name from a project root
pub trait ModuleLoader {
    fn load(&self, root: &Path, name: &ModuleName) -> std::result::Result<LoadedModule, ImportError>;
}

/// Loader that evaluates Python sources statically
pub struct StaticModuleLoader {
    parser: PythonParser,
    max_depth: usize,
}

impl StaticModuleLoader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: PythonParser::new()?,
            max_depth: MAX_IMPORT_DEPTH,
        })
    }

    /// Evaluate one source file. `package` is the directory of the package
    /// the file belongs to, used for relative imports.
    fn evaluate_file(
        &self,
        root: &Path,
        file: &Path,
        package: Option<&Path>,
        depth: usize,
    ) -> Result<Bindings> {
        let bytes = fs::read(file)?;
        let content = String::from_utf8_lossy(&bytes);

        let imports = SourceImports {
            loader: self,
            root,
            package,
            depth,
        };

        let result = self
            .parser
            .parse(&file.to_string_lossy(), &content, &imports)?;
        Ok(result.bindings)
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn load(&self, root: &Path, name: &ModuleName) -> std::result::Result<LoadedModule, ImportError> {
        if !name.is_importable() {
            return Err(ImportError::InvalidName(name.to_string()));
        }

        let dir = root.join(name.as_str());
        let file = root.join(format!("{}.{}", name, PY_EXTENSION));

        let (kind, path) = if dir.is_dir() {
            let init = dir.join(PACKAGE_INIT);
            if init.is_file() {
                (ModuleKind::Package, init)
            } else {
                (ModuleKind::Namespace, dir)
            }
        } else if file.is_file() {
            (ModuleKind::Module, file)
        } else {
            return Err(ImportError::NotFound(name.to_string()));
        };

        let attributes = match kind {
            ModuleKind::Namespace => Bindings::new(),
            ModuleKind::Package => self
                .evaluate_file(root, &path, path.parent(), 0)
                .map_err(|source| ImportError::Source {
                    name: name.to_string(),
                    source,
                })?,
            ModuleKind::Module => {
                self.evaluate_file(root, &path, None, 0)
                    .map_err(|source| ImportError::Source {
                        name: name.to_string(),
                        source,
                    })?
            }
        };

        debug!(
            module = %name,
            kind = ?kind,
            attributes = attributes.len(),
            "Loaded module"
        );

        Ok(LoadedModule {
            name: name.clone(),
            kind,
            path,
            attributes,
        })
    }
}

// =============================================================================
// Import Resolution
// =============================================================================

struct SourceImports<'a> {
    loader: &'a StaticModuleLoader,
    root: &'a Path,
    package: Option<&'a Path>,
    depth: usize,
}

impl SourceImports<'_> {
    /// Directory the import's dotted path is resolved from
    fn base_dir(&self, import: &ImportRef) -> Option<PathBuf> {
        if import.level == 0 {
            return Some(self.root.to_path_buf());
        }

        let mut base = self.package?.to_path_buf();
        for _ in 1..import.level {
            base = base.parent()?.to_path_buf();
        }
        base.starts_with(self.root).then_some(base)
    }

    /// Source file and package directory for an import target
    fn locate(&self, import: &ImportRef) -> Option<(PathBuf, PathBuf)> {
        let mut target = self.base_dir(import)?;
        for segment in import.segments() {
            target.push(segment);
        }

        let init = target.join(PACKAGE_INIT);
        if init.is_file() {
            return Some((init, target));
        }

        let file = target.with_extension(PY_EXTENSION);
        if !import.segments().is_empty() && file.is_file() {
            let package = file.parent()?.to_path_buf();
            return Some((file, package));
        }

        None
    }
}

impl ImportResolver for SourceImports<'_> {
    fn resolve(&self, import: &ImportRef) -> Option<Bindings> {
        if self.depth >= self.loader.max_depth {
            trace!(?import, "Import depth exceeded");
            return None;
        }

        let (file, package) = self.locate(import)?;
        // Top-level modules do not belong to a package
        let package = (package != self.root).then_some(package);

        self.loader
            .evaluate_file(self.root, &file, package.as_deref(), self.depth + 1)
            .inspect_err(|e| debug!("Import of {:?} failed: {}", import, e))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn load(root: &Path, name: &str) -> std::result::Result<LoadedModule, ImportError> {
        StaticModuleLoader::new()
            .unwrap()
            .load(root, &ModuleName::new(name))
    }

    #[test]
    fn test_load_module_file() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tool.py", "__version__ = '1.2.3'\n");

        let module = load(temp.path(), "tool").unwrap();
        assert_eq!(module.kind, ModuleKind::Module);
        assert_eq!(module.attr("__version__"), Some(&AttrValue::str("1.2.3")));
    }

    #[test]
    fn test_load_package() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pkg/__init__.py", "VERSION = (0, 3)\n");

        let module = load(temp.path(), "pkg").unwrap();
        assert_eq!(module.kind, ModuleKind::Package);
        assert!(module.attr("VERSION").is_some());
    }

    #[test]
    fn test_package_preferred_over_module() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pkg/__init__.py", "version = 'dir'\n");
        write(temp.path(), "pkg.py", "version = 'file'\n");

        let module = load(temp.path(), "pkg").unwrap();
        assert_eq!(module.attr("version"), Some(&AttrValue::str("dir")));
    }

    #[test]
    fn test_namespace_package() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();

        let module = load(temp.path(), "docs").unwrap();
        assert_eq!(module.kind, ModuleKind::Namespace);
        assert!(module.attributes.is_empty());
    }

    #[test]
    fn test_relative_import_followed() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "pkg/__init__.py",
            "from ._version import __version__, get_version as gv\n",
        );
        write(
            temp.path(),
            "pkg/_version.py",
            "__version__ = '2.5'\ndef get_version():\n    return __version__\n",
        );

        let module = load(temp.path(), "pkg").unwrap();
        assert_eq!(module.attr("__version__"), Some(&AttrValue::str("2.5")));
        assert_eq!(module.attr("gv").unwrap().call(), AttrValue::str("2.5"));
    }

    #[test]
    fn test_absolute_import_from_own_package() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "pkg/__init__.py",
            "from pkg.meta import VERSION\n",
        );
        write(temp.path(), "pkg/meta/__init__.py", "VERSION = (1, 0)\n");

        let module = load(temp.path(), "pkg").unwrap();
        assert_eq!(
            module.attr("VERSION"),
            Some(&AttrValue::tuple(vec![AttrValue::Int(1), AttrValue::Int(0)]))
        );
    }

    #[test]
    fn test_unresolvable_import_is_opaque() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tool.py", "from somewhere import __version__\n");

        let module = load(temp.path(), "tool").unwrap();
        assert_eq!(module.attr("__version__"), Some(&AttrValue::Opaque));
    }

    #[test]
    fn test_import_cycle_terminates() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pkg/__init__.py", "from .a import x\n");
        write(temp.path(), "pkg/a.py", "from .b import x\n");
        write(temp.path(), "pkg/b.py", "from .a import x\n");

        let module = load(temp.path(), "pkg").unwrap();
        assert_eq!(module.attr("x"), Some(&AttrValue::Opaque));
    }

    #[test]
    fn test_load_failures() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "broken.py", "def (:\n");

        assert!(matches!(
            load(temp.path(), "missing"),
            Err(ImportError::NotFound(_))
        ));
        assert!(matches!(
            load(temp.path(), ".git"),
            Err(ImportError::InvalidName(_))
        ));
        assert!(matches!(
            load(temp.path(), "broken"),
            Err(ImportError::Source { .. })
        ));
    }
}
