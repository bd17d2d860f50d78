//! Scaffold file templates

use super::{Readme, ReadmeFormat};
use crate::constants::BIN_NAME;

/// Sphinx `conf.py` that pulls project metadata from `sphinx-me resolve`
pub fn conf_py(readme: Option<&Readme>) -> String {
    let extensions = match readme.map(|r| r.format) {
        Some(ReadmeFormat::Markdown) => "\nextensions = [\"myst_parser\"]\n",
        _ => "",
    };

    format!(
        r#"# Configuration file for the Sphinx documentation builder, generated by
# {bin}. Project metadata (project, version, release, copyright and
# master_doc) is resolved from the project's sources on every build.

import json
import subprocess

globals().update(json.loads(subprocess.check_output(
    ["{bin}", "resolve", "--conf", __file__, "--format", "json"],
)))
{extensions}"#,
        bin = BIN_NAME,
        extensions = extensions,
    )
}

/// Root document transcluding the README, or a bare title without one
pub fn index_rst(project: &str, readme: Option<&Readme>, include_path: &str) -> String {
    match readme {
        Some(Readme {
            format: ReadmeFormat::Rst,
            ..
        }) => format!(".. include:: {}\n", include_path),
        Some(Readme {
            format: ReadmeFormat::Markdown,
            ..
        }) => format!(
            ".. include:: {}\n   :parser: myst_parser.sphinx_\n",
            include_path
        ),
        None => {
            let title = if project.is_empty() { "Documentation" } else { project };
            format!(
                "{}\n{}\n\n.. toctree::\n   :maxdepth: 2\n",
                title,
                "=".repeat(title.chars().count())
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readme(name: &str, format: ReadmeFormat) -> Readme {
        Readme {
            file_name: name.to_string(),
            format,
        }
    }

    #[test]
    fn test_conf_py_delegates_to_resolver() {
        let conf = conf_py(None);
        assert!(conf.contains("\"sphinx-me\", \"resolve\", \"--conf\", __file__"));
        assert!(conf.contains("globals().update("));
        assert!(!conf.contains("extensions"));
    }

    #[test]
    fn test_conf_py_markdown_extension() {
        let conf = conf_py(Some(&readme("README.md", ReadmeFormat::Markdown)));
        assert!(conf.contains("extensions = [\"myst_parser\"]"));
    }

    #[test]
    fn test_index_includes_readme() {
        let index = index_rst("demo", Some(&readme("README.rst", ReadmeFormat::Rst)), "../README.rst");
        assert_eq!(index, ".. include:: ../README.rst\n");

        let index = index_rst("demo", Some(&readme("README.md", ReadmeFormat::Markdown)), "../README.md");
        assert!(index.contains(":parser: myst_parser.sphinx_"));
    }

    #[test]
    fn test_index_without_readme() {
        assert_eq!(
            index_rst("demo", None, ""),
            "demo\n====\n\n.. toctree::\n   :maxdepth: 2\n"
        );
    }
}
