use std::path::Path;

use console::style;

/// Styled status lines for interactive commands. Machine-readable command
/// output bypasses this and goes straight to stdout.
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Indented `label: path` line under a status message
    pub fn path(&self, label: &str, path: &Path) {
        if !self.quiet {
            println!("  {:<8} {}", format!("{}:", label), style(path.display()).dim());
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
