//! Shell command grammar.
//!
//! Commands form a closed set; the parser maps one input line to one
//! variant or rejects it. Byte amounts in `add`/`free` go through
//! [`parse_size_expression`] so the pool only ever sees raw byte counts.

// ============================================================================
// Imports
// ============================================================================

use crate::error::{Error, Result};
use crate::shell::size::parse_size_expression;

// ============================================================================
// Command
// ============================================================================

/// One parsed shell command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the shell (`quit`, `exit`).
    Quit,
    /// Print the command summary (`help`, `?`).
    Help,
    /// Print connection count and total claimed bytes (`status`).
    Status,
    /// Close every session (`clear`).
    Clear,
    /// Grow the total claim by the given byte count (`add <size>`).
    Add(u64),
    /// Release at least the given byte count, oldest first (`free <size>`).
    Free(u64),
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for blank lines. Command words are
    /// case-insensitive; `add` and `free` take a size expression, the rest
    /// take nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCommand`] for an unrecognized line
    /// - [`Error::BadSizeExpression`] for a malformed `add`/`free` amount
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "quit" | "exit" if rest.is_empty() => Self::Quit,
            "help" | "?" if rest.is_empty() => Self::Help,
            "status" if rest.is_empty() => Self::Status,
            "clear" if rest.is_empty() => Self::Clear,
            "add" => Self::Add(parse_size_expression(rest)?),
            "free" => Self::Free(parse_size_expression(rest)?),
            _ => return Err(Error::unknown_command(line)),
        };

        Ok(Some(command))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_parse_to_nothing() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t ").unwrap(), None);
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(Command::parse("quit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("help").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("?").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("status").unwrap(), Some(Command::Status));
        assert_eq!(Command::parse("clear").unwrap(), Some(Command::Clear));
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(Command::parse("QUIT").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("Status").unwrap(), Some(Command::Status));
        assert_eq!(Command::parse("ADD 1K").unwrap(), Some(Command::Add(1024)));
    }

    #[test]
    fn test_add_and_free_take_size_expressions() {
        assert_eq!(
            Command::parse("add 64K").unwrap(),
            Some(Command::Add(64 << 10))
        );
        assert_eq!(
            Command::parse("free 2G").unwrap(),
            Some(Command::Free(2u64 << 30))
        );
        assert_eq!(
            Command::parse("add  10MB ").unwrap(),
            Some(Command::Add(10 << 20))
        );
    }

    #[test]
    fn test_add_without_amount_is_rejected() {
        let err = Command::parse("add").expect_err("missing amount");
        assert!(matches!(err, Error::BadSizeExpression { .. }));
    }

    #[test]
    fn test_unknown_commands_are_rejected() {
        for line in ["nuke", "addx 1K", "status now", "quit 2"] {
            let err = Command::parse(line).expect_err(line);
            assert!(matches!(err, Error::UnknownCommand { .. }));
        }
    }

    #[test]
    fn test_bad_amounts_are_rejected() {
        let err = Command::parse("add 12T").expect_err("bad unit");
        assert!(matches!(err, Error::BadSizeExpression { .. }));
    }
}
