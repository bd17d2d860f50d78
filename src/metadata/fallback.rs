//! Fallback Strategies
//!
//! Supply metadata the project scan could not find. The resolver never
//! reads from a terminal itself; callers pick the strategy.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;
use tracing::debug;

use crate::types::{MissingValue, Result, SphinxMeError};

pub trait Fallback {
    fn supply(&self, missing: MissingValue) -> Result<String>;
}

/// Ask the operator. Blocks until a line is entered.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interactive;

impl Fallback for Interactive {
    fn supply(&self, missing: MissingValue) -> Result<String> {
        let prompt = missing.prompt();

        if io::stdin().is_terminal() {
            // dialoguer renders its own ": " suffix
            let value: String = Input::new()
                .with_prompt(prompt.trim_end().trim_end_matches(':'))
                .interact_text()?;
            return Ok(value);
        }

        debug!("stdin is not a terminal, reading {} as a plain line", missing);
        read_line_prompt(missing, &mut io::stdin().lock(), &mut io::stderr())
    }
}

/// Write the prompt for `missing`, then read one line without its line
/// ending. End of input means the value is missing.
fn read_line_prompt(
    missing: MissingValue,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<String> {
    write!(output, "{}", missing.prompt())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(SphinxMeError::MissingMetadata(missing));
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Refuse to supply anything
#[derive(Debug, Default, Clone, Copy)]
pub struct Deny;

impl Fallback for Deny {
    fn supply(&self, missing: MissingValue) -> Result<String> {
        Err(SphinxMeError::MissingMetadata(missing))
    }
}

/// Preset values, deferring to another strategy for anything not preset
pub struct Preset {
    version: Option<String>,
    author: Option<String>,
    next: Box<dyn Fallback>,
}

impl Preset {
    pub fn new(version: Option<String>, author: Option<String>) -> Self {
        Self {
            version,
            author,
            next: Box::new(Deny),
        }
    }

    pub fn or_else(mut self, next: impl Fallback + 'static) -> Self {
        self.next = Box::new(next);
        self
    }
}

impl Fallback for Preset {
    fn supply(&self, missing: MissingValue) -> Result<String> {
        let preset = match missing {
            MissingValue::Version => &self.version,
            MissingValue::Author => &self.author,
        };
        match preset {
            Some(value) => Ok(value.clone()),
            None => self.next.supply(missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;

    /// Records what it was asked for
    struct Recording {
        asked: RefCell<Vec<MissingValue>>,
    }

    impl Fallback for Recording {
        fn supply(&self, missing: MissingValue) -> Result<String> {
            self.asked.borrow_mut().push(missing);
            Ok(format!("recorded {}", missing))
        }
    }

    #[test]
    fn test_deny() {
        let err = Deny.supply(MissingValue::Version).unwrap_err();
        assert!(err.is_missing_metadata());
    }

    #[test]
    fn test_preset_values() {
        let preset = Preset::new(Some("1.0".into()), Some("Jane".into()));
        assert_eq!(preset.supply(MissingValue::Version).unwrap(), "1.0");
        assert_eq!(preset.supply(MissingValue::Author).unwrap(), "Jane");
    }

    #[test]
    fn test_preset_without_value_denies() {
        let preset = Preset::new(Some("1.0".into()), None);
        assert!(preset.supply(MissingValue::Author).is_err());
    }

    #[test]
    fn test_preset_defers_to_next() {
        let preset = Preset::new(None, Some("Jane".into())).or_else(Recording {
            asked: RefCell::new(Vec::new()),
        });
        assert_eq!(
            preset.supply(MissingValue::Version).unwrap(),
            "recorded version"
        );
        assert_eq!(preset.supply(MissingValue::Author).unwrap(), "Jane");
    }

    #[test]
    fn test_line_prompt_reads_value() {
        let mut input = Cursor::new("John Smith\n");
        let mut output = Vec::new();

        let value = read_line_prompt(MissingValue::Author, &mut input, &mut output).unwrap();
        assert_eq!(value, "John Smith");
        assert_eq!(output, b"No author found, please enter one: ");
    }

    #[test]
    fn test_line_prompt_strips_crlf() {
        let mut input = Cursor::new("1.2.3\r\nignored\n");
        let mut output = Vec::new();

        let value = read_line_prompt(MissingValue::Version, &mut input, &mut output).unwrap();
        assert_eq!(value, "1.2.3");
        assert_eq!(output, b"No version number found, please enter one: ");
    }

    #[test]
    fn test_line_prompt_eof_is_missing() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let err = read_line_prompt(MissingValue::Version, &mut input, &mut output).unwrap_err();
        assert!(matches!(
            err,
            SphinxMeError::MissingMetadata(MissingValue::Version)
        ));
    }
}
