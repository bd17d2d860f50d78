//! Config Command
//!
//! Manage sphinx-me configuration.
//!
//! Usage:
//!   sphinx-me config show [-f toml|json]
//!   sphinx-me config path
//!   sphinx-me config init [-g] [--force]

use std::path::Path;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the effective configuration merged from all sources
pub fn show(root: &Path, format: &str) -> Result<()> {
    println!("{}", ConfigLoader::render_config(root, format == "json")?);
    Ok(())
}

/// Show configuration paths
pub fn path(root: &Path) -> Result<()> {
    ConfigLoader::show_path(root);
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool, output: &Output) -> Result<()> {
    let config_path = ConfigLoader::init_global(force)?;
    output.success("Initialized global configuration");
    output.path("Config", &config_path);
    Ok(())
}

/// Initialize project configuration
pub fn init_project(root: &Path, force: bool, output: &Output) -> Result<()> {
    let config_path = ConfigLoader::init_project(root, force)?;
    output.success("Initialized project configuration");
    output.path("Config", &config_path);
    Ok(())
}
