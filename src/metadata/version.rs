//! Version Extraction
//!
//! Looks a version up through a fixed, ordered list of attribute accessors.
//! The first accessor whose attribute exists decides the result, even when
//! its value turns out to be unusable.

use crate::analyzer::{AttrValue, Attributes};
use crate::constants::version::BASE_NAMES;

/// A named attribute that may hold a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionAccessor {
    name: String,
}

impl VersionAccessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read<'a, A: Attributes + ?Sized>(&self, module: &'a A) -> Option<&'a AttrValue> {
        module.attr(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct VersionExtractor {
    accessors: Vec<VersionAccessor>,
}

impl Default for VersionExtractor {
    /// `__version__`, `get_version`, `version`, then their uppercase forms
    fn default() -> Self {
        let lower = BASE_NAMES.iter().map(|n| n.to_string());
        let upper = BASE_NAMES.iter().map(|n| n.to_uppercase());
        Self {
            accessors: lower.chain(upper).map(VersionAccessor::new).collect(),
        }
    }
}

impl VersionExtractor {
    pub fn accessors(&self) -> &[VersionAccessor] {
        &self.accessors
    }

    /// Find the version of a module, if it declares one
    pub fn extract<A: Attributes + ?Sized>(&self, module: &A) -> Option<String> {
        let (accessor, value) = self
            .accessors
            .iter()
            .find_map(|a| a.read(module).map(|v| (a, v)))?;

        let version = normalize_version(value);
        tracing::trace!(
            attribute = accessor.name(),
            version = ?version,
            "Version attribute found"
        );
        version
    }
}

/// Call the value if callable, then join sequence components with `.`.
/// A sequence with a component that has no textual form falls back to the
/// textual form of the whole value.
pub fn normalize_version(value: &AttrValue) -> Option<String> {
    let value = value.call();

    let text = match &value {
        AttrValue::Null => None,
        AttrValue::Seq { items, .. } => items
            .iter()
            .map(AttrValue::to_text)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join("."))
            .or_else(|| value.to_text()),
        other => other.to_text(),
    };

    text.filter(|t| !t.is_empty())
}

/// Find the version of a module with the default accessor order
pub fn extract_version<A: Attributes + ?Sized>(module: &A) -> Option<String> {
    VersionExtractor::default().extract(module)
}
