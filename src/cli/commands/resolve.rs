//! Resolve Command
//!
//! Print the managed configuration keys for a `conf.py`. This is what the
//! generated `conf.py` runs on every Sphinx build.
//!
//! Usage:
//!   sphinx-me resolve --conf docs/conf.py [--format json|python|text]
//!     [--no-input] [--default-version V] [--default-author A]

use std::path::PathBuf;

use clap::ValueEnum;
use tracing::debug;

use crate::config::ConfigLoader;
use crate::metadata::{
    ConfigNamespace, Deny, Fallback, Interactive, MetadataResolver, Preset, ProjectContext,
    ResolverOptions, setup_conf,
};
use crate::types::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ResolveFormat {
    #[default]
    Json,
    Python,
    Text,
}

#[derive(Debug, Clone)]
pub struct ResolveArgs {
    pub conf: PathBuf,
    pub format: ResolveFormat,
    pub no_input: bool,
    pub default_version: Option<String>,
    pub default_author: Option<String>,
}

/// Presets first, then the terminal unless input is disabled
pub fn build_fallback(args: &ResolveArgs) -> Box<dyn Fallback> {
    let preset = Preset::new(args.default_version.clone(), args.default_author.clone());
    if args.no_input {
        Box::new(preset.or_else(Deny))
    } else {
        Box::new(preset.or_else(Interactive))
    }
}

pub fn render(namespace: &ConfigNamespace, format: ResolveFormat) -> Result<String> {
    match format {
        ResolveFormat::Json => namespace.to_json(),
        ResolveFormat::Python => Ok(namespace.to_python()),
        ResolveFormat::Text => Ok(namespace.to_text()),
    }
}

/// Resolve the namespace without printing it
pub fn resolve(args: &ResolveArgs) -> Result<ConfigNamespace> {
    let project = ProjectContext::from_conf_file(&args.conf)?;
    let config = ConfigLoader::load(project.root())?;
    debug!(order = %config.scan.order, "Scanning {}", project.root().display());

    let resolver = MetadataResolver::new(ResolverOptions::from(&config.scan))?;
    let fallback = build_fallback(args);

    let mut namespace = ConfigNamespace::new();
    setup_conf(&mut namespace, &args.conf, &resolver, fallback.as_ref())?;
    Ok(namespace)
}

pub fn run(args: ResolveArgs) -> Result<()> {
    let namespace = resolve(&args)?;
    println!("{}", render(&namespace, args.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::{InstallOptions, Installer};
    use crate::types::{MissingValue, SphinxMeError};
    use std::fs;
    use tempfile::TempDir;

    fn args(conf: PathBuf) -> ResolveArgs {
        ResolveArgs {
            conf,
            format: ResolveFormat::Json,
            no_input: true,
            default_version: None,
            default_author: None,
        }
    }

    #[test]
    fn test_resolve_from_sources() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("demo");
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::create_dir_all(root.join("demo")).unwrap();
        fs::write(
            root.join("demo/__init__.py"),
            "__version__ = (1, 4)\n__author__ = 'Ada'\n",
        )
        .unwrap();

        let namespace = resolve(&args(root.join("docs/conf.py"))).unwrap();
        assert_eq!(namespace.get_str("project"), Some("demo"));
        assert_eq!(namespace.get_str("version"), Some("1.4"));
        assert_eq!(namespace.get_str("release"), Some("1.4"));
        assert_eq!(namespace.get_str("master_doc"), Some("index"));
        assert!(namespace.get_str("copyright").unwrap().ends_with(", Ada"));
    }

    #[test]
    fn test_installed_conf_resolves_project_root() {
        for docs_dir in ["docs", "./docs", "docs/", "documentation"] {
            let temp = TempDir::new().unwrap();
            let root = temp.path().join("demo");
            fs::create_dir_all(root.join("demo")).unwrap();
            fs::write(root.join("demo/__init__.py"), "__version__ = '1.0'\n").unwrap();
            fs::write(root.join("AUTHORS"), "Ada\n").unwrap();

            let report = Installer::new(
                &root,
                InstallOptions {
                    docs_dir: docs_dir.to_string(),
                    readme: None,
                    force: false,
                },
            )
            .install()
            .unwrap();

            let namespace = resolve(&args(report.written[0].clone())).unwrap();
            assert_eq!(namespace.get_str("project"), Some("demo"), "{}", docs_dir);
            assert_eq!(namespace.get_str("version"), Some("1.0"), "{}", docs_dir);
        }
    }

    #[test]
    fn test_resolve_with_presets() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("bare");
        fs::create_dir_all(root.join("docs")).unwrap();

        let mut args = args(root.join("docs/conf.py"));
        args.default_version = Some("0.1".to_string());
        args.default_author = Some("Grace".to_string());

        let namespace = resolve(&args).unwrap();
        assert_eq!(namespace.get_str("version"), Some("0.1"));
        assert_eq!(fs::read_to_string(root.join("AUTHORS")).unwrap(), "Grace");
    }

    #[test]
    fn test_resolve_no_input_fails() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();

        let err = resolve(&args(temp.path().join("docs/conf.py"))).unwrap_err();
        assert!(matches!(
            err,
            SphinxMeError::MissingMetadata(MissingValue::Version)
        ));
    }

    #[test]
    fn test_render_formats() {
        let mut namespace = ConfigNamespace::new();
        namespace.insert("version", "1.0");

        assert!(render(&namespace, ResolveFormat::Json).unwrap().contains("\"version\""));
        assert_eq!(
            render(&namespace, ResolveFormat::Python).unwrap().trim_end(),
            "version = '1.0'"
        );
    }
}
