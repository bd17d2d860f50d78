//! AUTHORS File Handling

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::scan::{AUTHORS_FILE, AUTHOR_STRIP_CHARS};
use crate::types::{Result, ResultExt};

/// Check whether a directory entry name is the authors record
pub fn is_authors_file(name: &str) -> bool {
    name.to_uppercase() == AUTHORS_FILE
}

/// Strip list decoration and whitespace from one line
pub fn clean_author_line(line: &str) -> &str {
    line.trim_matches(AUTHOR_STRIP_CHARS)
}

/// First non-empty line after decoration is stripped
pub fn first_author(content: &str) -> Option<String> {
    content
        .lines()
        .map(clean_author_line)
        .find(|line| !line.is_empty())
        .map(String::from)
}

pub fn read_authors_file(path: &Path) -> Result<Option<String>> {
    let bytes = fs::read(path)
        .with_context_fn(|| format!("Failed to read {}", path.display()))?;
    Ok(first_author(&String::from_utf8_lossy(&bytes)))
}

/// Write the authors record containing exactly `author`
pub fn write_authors_file(root: &Path, author: &str) -> Result<PathBuf> {
    let path = root.join(AUTHORS_FILE);
    fs::write(&path, author)
        .with_context_fn(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_authors_file() {
        assert!(is_authors_file("AUTHORS"));
        assert!(is_authors_file("authors"));
        assert!(is_authors_file("Authors"));
        assert!(!is_authors_file("AUTHORS.txt"));
        assert!(!is_authors_file("CONTRIBUTORS"));
    }

    #[test]
    fn test_decorated_line() {
        assert_eq!(first_author("*** Jane Doe\n").as_deref(), Some("Jane Doe"));
        assert_eq!(first_author("  - John Smith -\r\n").as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_skips_blank_and_decoration_only_lines() {
        let content = "\n-----\n\t\n* Ada Lovelace\n* Alan Turing\n";
        assert_eq!(first_author(content).as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_inner_decoration_kept() {
        assert_eq!(
            first_author("* Mary-Jane Watson *").as_deref(),
            Some("Mary-Jane Watson")
        );
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(first_author(""), None);
        assert_eq!(first_author("***\n---\n"), None);
    }

    #[test]
    fn test_read_and_write_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = write_authors_file(temp.path(), "John Smith").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "John Smith");
        assert_eq!(
            read_authors_file(&path).unwrap().as_deref(),
            Some("John Smith")
        );
    }

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(read_authors_file(&temp.path().join("AUTHORS")).is_err());
    }

    proptest! {
        #[test]
        fn prop_cleaned_line_has_no_edge_decoration(line in "[*\\- \t]{0,4}[A-Za-z .*-]{0,20}[*\\- \t]{0,4}") {
            let cleaned = clean_author_line(&line);
            prop_assert!(!cleaned.starts_with(AUTHOR_STRIP_CHARS));
            prop_assert!(!cleaned.ends_with(AUTHOR_STRIP_CHARS));
            prop_assert!(line.contains(cleaned));
        }
    }
}
