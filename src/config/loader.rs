//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/sphinx-me/config.toml)
//! 3. `[tool.sphinx-me]` in the project's pyproject.toml
//! 4. Project config (<root>/.sphinx-me.toml)
//! 5. Environment variables (SPHINX_ME_* prefix, `__` separates sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{Result, SphinxMeError};

/// Project config file name
pub const PROJECT_CONFIG_FILE: &str = ".sphinx-me.toml";

/// pyproject.toml table holding project settings
const PYPROJECT_TABLE: &str = "tool.sphinx-me";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → pyproject → project → env vars
    pub fn load(project_root: &Path) -> Result<Config> {
        let config: Config = Self::figment(project_root)
            .extract()
            .map_err(|e| SphinxMeError::Config(format!("Configuration error: {}", e)))?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge pyproject table
        let pyproject = project_root.join("pyproject.toml");
        if pyproject.exists() {
            debug!("Loading [{}] from: {}", PYPROJECT_TABLE, pyproject.display());
            figment = figment.merge(Figment::from(Toml::file(&pyproject)).focus(PYPROJECT_TABLE));
        }

        // Merge project config
        let project_path = Self::project_config_path(project_root);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // Merge environment variables (e.g., SPHINX_ME_SCAN__ORDER -> scan.order)
        figment.merge(Env::prefixed("SPHINX_ME_").split("__").lowercase(true))
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/sphinx-me/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("sphinx-me"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path(project_root: &Path) {
        println!("Configuration paths:");
        println!();

        // Global config
        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:    {} {}", exists, global.display());
        } else {
            println!("  Global:    (not available)");
        }

        let pyproject = project_root.join("pyproject.toml");
        let exists = if pyproject.exists() { "✓" } else { "✗" };
        println!(
            "  Pyproject: {} {} [{}]",
            exists,
            pyproject.display(),
            PYPROJECT_TABLE
        );

        // Project config
        let project = Self::project_config_path(project_root);
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project:   {} {}", exists, project.display());
    }

    /// Render the effective configuration
    pub fn render_config(project_root: &Path, as_json: bool) -> Result<String> {
        let config = Self::load(project_root)?;

        if as_json {
            Ok(serde_json::to_string_pretty(&config)?)
        } else {
            toml::to_string_pretty(&config).map_err(|e| SphinxMeError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            SphinxMeError::Config("Cannot determine global config directory".to_string())
        })?;

        fs::create_dir_all(&global_dir)?;

        let config_path = global_dir.join("config.toml");
        Self::write_default(&config_path, force)?;
        Ok(config_path)
    }

    /// Initialize project configuration
    pub fn init_project(project_root: &Path, force: bool) -> Result<PathBuf> {
        let config_path = Self::project_config_path(project_root);
        Self::write_default(&config_path, force)?;
        Ok(config_path)
    }

    fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(());
        }
        fs::write(path, Self::default_config())?;
        info!("Created config: {}", path.display());
        Ok(())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default config content (TOML)
    fn default_config() -> String {
        r#"# sphinx-me configuration

version = "1.0"

# Documentation scaffold
[docs]
dir = "docs"
# readme = "README.rst"

# Project metadata scan
[scan]
# "filesystem" keeps enumeration order; "sorted" makes the last-wins
# choice between modules deterministic
order = "filesystem"
ignore = ["setup.py"]
write_authors = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanOrder;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&ConfigLoader::default_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "[scan]\norder = \"sorted\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.scan.order, ScanOrder::Sorted);
    }

    #[test]
    fn test_load_pyproject_table() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("pyproject.toml"),
            "[project]\nname = \"demo\"\n\n[tool.sphinx-me.docs]\ndir = \"doc\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.docs.dir, "doc");
    }

    #[test]
    fn test_project_file_overrides_pyproject() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("pyproject.toml"),
            "[tool.sphinx-me.docs]\ndir = \"doc\"\n",
        )
        .unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "[docs]\ndir = \"manual\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.docs.dir, "manual");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "[docs]\ndir = \"../elsewhere\"\n",
        )
        .unwrap();

        assert!(matches!(
            ConfigLoader::load(temp.path()),
            Err(SphinxMeError::Config(_))
        ));
    }

    #[test]
    fn test_init_project() {
        let temp = TempDir::new().unwrap();
        let path = ConfigLoader::init_project(temp.path(), false).unwrap();
        assert!(path.exists());

        fs::write(&path, "# custom\n").unwrap();
        ConfigLoader::init_project(temp.path(), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# custom\n");

        ConfigLoader::init_project(temp.path(), true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[scan]"));
    }
}
