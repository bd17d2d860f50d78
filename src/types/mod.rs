pub mod error;

pub use error::{MissingValue, Result, ResultExt, SphinxMeError};

// =============================================================================
// Domain Newtypes
// =============================================================================

use std::fmt;

/// Type-safe wrapper for Python module names
///
/// A bare, top-level name such as `mypackage`; never a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Check the name could be imported as a top-level module
    pub fn is_importable(&self) -> bool {
        !self.0.is_empty() && !self.0.contains('.')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod newtype_tests {
    use super::*;

    #[test]
    fn test_module_name_importable() {
        assert!(ModuleName::new("mypackage").is_importable());
        assert!(ModuleName::new("my-package").is_importable());
        assert!(!ModuleName::new("").is_importable());
        assert!(!ModuleName::new(".git").is_importable());
        assert!(!ModuleName::new("foo.bar").is_importable());
    }

    #[test]
    fn test_module_name_display() {
        let name = ModuleName::from("pkg");
        assert_eq!(format!("{}", name), "pkg");
        assert_eq!(name.into_inner(), "pkg");
    }
}
