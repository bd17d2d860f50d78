//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/sphinx-me/config.toml)
//! 3. `[tool.sphinx-me]` in pyproject.toml
//! 4. Project config (.sphinx-me.toml)
//! 5. Environment variables (SPHINX_ME_*)
//! 6. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::{ConfigLoader, PROJECT_CONFIG_FILE};
pub use types::*;
