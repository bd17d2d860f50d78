//! Configuration Namespace
//!
//! The documentation generator's global configuration, as an ordered map.
//! The resolver owns five keys and overwrites them on every run.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::types::ProjectMetadata;
use crate::analyzer::value::quote_str;
use crate::constants::namespace::{COPYRIGHT, MASTER_DOC, MASTER_DOC_VALUE, PROJECT, RELEASE, VERSION};
use crate::types::Result;

/// Keys written by [`ConfigNamespace::apply`], in output order
pub const MANAGED_KEYS: &[&str] = &[VERSION, RELEASE, PROJECT, MASTER_DOC, COPYRIGHT];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigNamespace(IndexMap<String, Value>);

impl ConfigNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of a key, if it holds one
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Write the managed keys, replacing whatever they held
    pub fn apply(&mut self, metadata: &ProjectMetadata, year: i32) {
        self.insert(VERSION, metadata.version.value.as_str());
        self.insert(RELEASE, metadata.version.value.as_str());
        self.insert(PROJECT, metadata.project.as_str());
        self.insert(MASTER_DOC, MASTER_DOC_VALUE);
        self.insert(COPYRIGHT, metadata.copyright(year));
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Python assignment statements, one per key
    pub fn to_python(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{} = {}\n", key, python_literal(value)))
            .collect()
    }

    /// `key: value` lines for humans
    pub fn to_text(&self) -> String {
        let width = self.0.keys().map(String::len).max().unwrap_or(0);
        self.0
            .iter()
            .map(|(key, value)| {
                let shown = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                format!("{:width$}  {}\n", key, shown, width = width)
            })
            .collect()
    }
}

fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_str(s),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(python_literal).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", quote_str(k), python_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::types::{MetadataSource, Sourced};
    use std::path::PathBuf;

    fn metadata(version: &str, author: &str) -> ProjectMetadata {
        ProjectMetadata {
            root: PathBuf::from("/work/demo"),
            project: "demo".to_string(),
            version: Sourced::new(version, MetadataSource::Module("demo".into())),
            author: Sourced::new(author, MetadataSource::Fallback),
        }
    }

    #[test]
    fn test_apply_writes_managed_keys() {
        let mut ns = ConfigNamespace::new();
        ns.apply(&metadata("1.2.3", "Jane Doe"), 2024);

        assert_eq!(ns.len(), MANAGED_KEYS.len());
        assert_eq!(ns.get_str("version"), Some("1.2.3"));
        assert_eq!(ns.get_str("release"), ns.get_str("version"));
        assert_eq!(ns.get_str("project"), Some("demo"));
        assert_eq!(ns.get_str("master_doc"), Some("index"));
        assert_eq!(ns.get_str("copyright"), Some("2024, Jane Doe"));
    }

    #[test]
    fn test_apply_overwrites_previous_values() {
        let mut ns = ConfigNamespace::new();
        ns.insert("version", "0.0.1");
        ns.insert("master_doc", "contents");
        ns.insert("html_theme", "alabaster");

        ns.apply(&metadata("1.0", "A"), 2020);
        ns.apply(&metadata("2.0", "B"), 2021);

        assert_eq!(ns.get_str("version"), Some("2.0"));
        assert_eq!(ns.get_str("release"), Some("2.0"));
        assert_eq!(ns.get_str("master_doc"), Some("index"));
        assert_eq!(ns.get_str("copyright"), Some("2021, B"));
        assert_eq!(ns.get_str("html_theme"), Some("alabaster"));
    }

    #[test]
    fn test_to_python() {
        let mut ns = ConfigNamespace::new();
        ns.apply(&metadata("1.0", "O'Brien"), 2024);
        let py = ns.to_python();

        assert!(py.contains("version = '1.0'\n"));
        assert!(py.contains("copyright = \"2024, O'Brien\"\n"));
        assert!(py.starts_with("version"));
    }

    #[test]
    fn test_to_json() {
        let mut ns = ConfigNamespace::new();
        ns.apply(&metadata("1.0", "A"), 2024);
        let parsed: serde_json::Value = serde_json::from_str(&ns.to_json().unwrap()).unwrap();
        assert_eq!(parsed["release"], "1.0");
        assert_eq!(parsed["master_doc"], "index");
    }

    #[test]
    fn test_python_literal() {
        assert_eq!(python_literal(&serde_json::json!(null)), "None");
        assert_eq!(python_literal(&serde_json::json!([1, "a"])), "[1, 'a']");
        assert_eq!(python_literal(&serde_json::json!(true)), "True");
    }
}
