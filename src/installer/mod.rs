//! Documentation Installer
//!
//! Creates the docs directory of a project with a `conf.py` entry point
//! and an `index.rst` that transcludes the README.

pub mod templates;

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::{DocsConfig, validate_docs_dir};
use crate::constants::install::{CONF_FILE, INDEX_FILE, README_CANDIDATES};
use crate::metadata::project::project_name;
use crate::types::{Result, ResultExt, SphinxMeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadmeFormat {
    Rst,
    Markdown,
}

impl ReadmeFormat {
    fn from_file_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".md") || lower.ends_with(".markdown") {
            Self::Markdown
        } else {
            Self::Rst
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readme {
    /// Path relative to the project root
    pub file_name: String,
    pub format: ReadmeFormat,
}

#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Single directory name under the project root
    pub docs_dir: String,
    /// README override relative to the project root
    pub readme: Option<String>,
    /// Overwrite existing scaffold files
    pub force: bool,
}

impl InstallOptions {
    pub fn from_config(config: &DocsConfig, force: bool) -> Self {
        Self {
            docs_dir: config.dir.clone(),
            readme: config.readme.clone(),
            force,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub docs_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub readme: Option<Readme>,
}

pub struct Installer {
    root: PathBuf,
    options: InstallOptions,
}

impl Installer {
    pub fn new(root: impl Into<PathBuf>, options: InstallOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(&self.options.docs_dir)
    }

    /// README to transclude: the configured one, else the first candidate
    /// present in the project root
    pub fn find_readme(&self) -> Result<Option<Readme>> {
        if let Some(name) = &self.options.readme {
            if !self.root.join(name).is_file() {
                return Err(SphinxMeError::Config(format!(
                    "Configured README not found: {}",
                    name
                )));
            }
            return Ok(Some(Readme {
                file_name: name.clone(),
                format: ReadmeFormat::from_file_name(name),
            }));
        }

        Ok(README_CANDIDATES
            .iter()
            .find(|name| self.root.join(name).is_file())
            .map(|name| Readme {
                file_name: name.to_string(),
                format: ReadmeFormat::from_file_name(name),
            }))
    }

    pub fn install(&self) -> Result<InstallReport> {
        validate_docs_dir(&self.options.docs_dir)?;

        let docs_dir = self.docs_dir();
        let conf_path = docs_dir.join(CONF_FILE);
        let index_path = docs_dir.join(INDEX_FILE);

        if !self.options.force && (conf_path.exists() || index_path.exists()) {
            return Err(SphinxMeError::AlreadyInstalled(docs_dir));
        }

        let readme = self.find_readme()?;
        match &readme {
            Some(r) => info!("Including {} in the index", r.file_name),
            None => warn!("No README found in {}", self.root.display()),
        }

        let include_path = readme
            .as_ref()
            .map(|r| format!("../{}", r.file_name.replace('\\', "/")))
            .unwrap_or_default();

        let name = project_name(&self.root);

        fs::create_dir_all(&docs_dir)
            .with_context_fn(|| format!("Failed to create {}", docs_dir.display()))?;
        fs::write(&conf_path, templates::conf_py(readme.as_ref()))
            .with_context_fn(|| format!("Failed to write {}", conf_path.display()))?;
        fs::write(
            &index_path,
            templates::index_rst(&name, readme.as_ref(), &include_path),
        )
        .with_context_fn(|| format!("Failed to write {}", index_path.display()))?;

        info!("Installed documentation scaffold in {}", docs_dir.display());

        Ok(InstallReport {
            docs_dir,
            written: vec![conf_path, index_path],
            readme,
        })
    }
}
