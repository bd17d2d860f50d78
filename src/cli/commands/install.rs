//! Install Command
//!
//! Scaffold a Sphinx documentation directory for the project.
//!
//! Usage:
//!   sphinx-me [install] [--path DIR] [--docs-dir NAME] [--force]

use std::path::PathBuf;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::installer::{InstallOptions, InstallReport, Installer};
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct InstallArgs {
    /// Project root, defaults to the working directory
    pub path: Option<PathBuf>,
    /// Docs directory override
    pub docs_dir: Option<String>,
    pub force: bool,
}

pub fn run(args: InstallArgs, output: &Output) -> Result<InstallReport> {
    let root = match args.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let mut config = ConfigLoader::load(&root)?;
    if let Some(docs_dir) = args.docs_dir {
        config.docs.dir = docs_dir;
        config.validate()?;
    }

    let installer = Installer::new(&root, InstallOptions::from_config(&config.docs, args.force));
    let report = installer.install()?;

    output.success(&format!(
        "Installed Sphinx docs in {}",
        report.docs_dir.display()
    ));
    for file in &report.written {
        output.path("Wrote", file);
    }
    if let Some(readme) = &report.readme {
        output.info(&format!("Index includes {}", readme.file_name));
    }

    Ok(report)
}
