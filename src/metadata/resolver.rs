//! Metadata Resolver
//!
//! Scans a project root for an AUTHORS file and importable modules, then
//! fills the gaps through a [`Fallback`].

use std::fs;
use std::path::Path;

use chrono::Datelike;
use tracing::{debug, info, warn};

use super::authors::{is_authors_file, read_authors_file, write_authors_file};
use super::fallback::Fallback;
use super::namespace::ConfigNamespace;
use super::project::ProjectContext;
use super::types::{MetadataSource, ProjectMetadata, ScanOutcome, Sourced};
use super::version::VersionExtractor;
use crate::analyzer::{AttrValue, Attributes, ModuleLoader, StaticModuleLoader};
use crate::config::{ScanConfig, ScanOrder};
use crate::constants::scan::PY_EXTENSION;
use crate::constants::version::AUTHOR_ATTRIBUTE;
use crate::types::{MissingValue, ModuleName, Result, ResultExt};

/// Scan behaviour
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub order: ScanOrder,
    pub ignore: Vec<String>,
    pub write_authors: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

impl From<&ScanConfig> for ResolverOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            order: config.order,
            ignore: config.ignore.clone(),
            write_authors: config.write_authors,
        }
    }
}

pub struct MetadataResolver<L: ModuleLoader = StaticModuleLoader> {
    loader: L,
    extractor: VersionExtractor,
    options: ResolverOptions,
}

impl MetadataResolver<StaticModuleLoader> {
    pub fn new(options: ResolverOptions) -> Result<Self> {
        Ok(Self::with_loader(StaticModuleLoader::new()?, options))
    }
}

impl<L: ModuleLoader> MetadataResolver<L> {
    pub fn with_loader(loader: L, options: ResolverOptions) -> Self {
        Self {
            loader,
            extractor: VersionExtractor::default(),
            options,
        }
    }

    /// Visit every root entry; later finds replace earlier ones
    pub fn scan(&self, project: &ProjectContext) -> Result<ScanOutcome> {
        let root = project.root();
        let mut names = Vec::new();
        for entry in fs::read_dir(root)
            .with_context_fn(|| format!("Failed to read project root {}", root.display()))?
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => debug!("Skipping non UTF-8 entry {:?}", name),
            }
        }

        if self.options.order == ScanOrder::Sorted {
            names.sort();
        }

        let mut outcome = ScanOutcome::default();

        for name in names {
            let path = root.join(&name);

            if is_authors_file(&name) {
                if !path.is_file() {
                    continue;
                }
                match read_authors_file(&path) {
                    Ok(Some(author)) => {
                        debug!(author = %author, "Author from {}", path.display());
                        outcome.author = Some(Sourced::new(author, MetadataSource::AuthorsFile(path)));
                    }
                    Ok(None) => debug!("{} has no author line", path.display()),
                    Err(e) => warn!("Skipping unreadable authors file: {}", e),
                }
                continue;
            }

            if self.options.ignore.contains(&name) {
                continue;
            }

            let module_name = if path.is_dir() {
                ModuleName::new(name.as_str())
            } else if path.extension().is_some_and(|e| e == PY_EXTENSION) {
                match path.file_stem() {
                    Some(stem) => ModuleName::new(stem.to_string_lossy()),
                    None => continue,
                }
            } else {
                continue;
            };

            let module = match self.loader.load(root, &module_name) {
                Ok(module) => module,
                Err(e) => {
                    debug!("Skipping {}: {}", name, e);
                    continue;
                }
            };

            let Some(version) = self.extractor.extract(&module) else {
                continue;
            };
            debug!(module = %module_name, version = %version, "Version found");
            outcome.version = Some(Sourced::new(
                version,
                MetadataSource::Module(module_name.to_string()),
            ));

            // An existing `__author__` replaces any earlier author; `None`
            // clears it so the fallback is asked
            match module.attr(AUTHOR_ATTRIBUTE) {
                Some(AttrValue::Null) => outcome.author = None,
                Some(value) => {
                    if let Some(author) = value.to_text() {
                        outcome.author = Some(Sourced::new(
                            author,
                            MetadataSource::Module(module_name.into_inner()),
                        ));
                    }
                }
                None => {}
            }
        }

        Ok(outcome)
    }

    /// Scan, then ask the fallback for whatever is still missing
    pub fn resolve(
        &self,
        project: &ProjectContext,
        fallback: &dyn Fallback,
    ) -> Result<ProjectMetadata> {
        let outcome = self.scan(project)?;

        let version = match outcome.version {
            Some(version) => version,
            None => Sourced::new(
                fallback.supply(MissingValue::Version)?,
                MetadataSource::Fallback,
            ),
        };

        let author = match outcome.author {
            Some(author) => author,
            None => {
                let author = fallback.supply(MissingValue::Author)?;
                if self.options.write_authors {
                    let path = write_authors_file(project.root(), &author)?;
                    info!("Wrote {}", path.display());
                }
                Sourced::new(author, MetadataSource::Fallback)
            }
        };

        info!(
            project = project.name(),
            version = %version.value,
            author = %author.value,
            "Resolved project metadata"
        );

        Ok(ProjectMetadata {
            root: project.root().to_path_buf(),
            project: project.name().to_string(),
            version,
            author,
        })
    }
}

/// Populate `namespace` for the configuration entry point at `conf_file`
pub fn setup_conf<L: ModuleLoader>(
    namespace: &mut ConfigNamespace,
    conf_file: &Path,
    resolver: &MetadataResolver<L>,
    fallback: &dyn Fallback,
) -> Result<ProjectMetadata> {
    let project = ProjectContext::from_conf_file(conf_file)?;
    debug!("Project root: {}", project.root().display());

    let metadata = resolver.resolve(&project, fallback)?;
    namespace.apply(&metadata, chrono::Local::now().year());
    Ok(metadata)
}
