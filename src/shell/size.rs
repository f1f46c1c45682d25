//! Human-readable size-expression parsing.
//!
//! Grammar: digits, optional case-insensitive `K`/`M`/`G` suffix for binary
//! multiples (2^10, 2^20, 2^30), optional trailing `B`, surrounding
//! whitespace tolerated. `"64K"`, `"10mb"`, and `" 37858 "` are all valid.

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

// ============================================================================
// Grammar
// ============================================================================

/// Size-expression pattern: digits, optional binary-unit suffix, optional `B`.
static SIZE_EXPR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(\d+)([KMG])?B?\s*$").unwrap());

// ============================================================================
// Parsing
// ============================================================================

/// Parses a size expression into a byte count.
///
/// # Errors
///
/// Returns [`Error::BadSizeExpression`] for input outside the grammar, and
/// for values that overflow `u64` once the suffix multiplier is applied.
pub fn parse_size_expression(input: &str) -> Result<u64> {
    let caps = SIZE_EXPR
        .captures(input)
        .ok_or_else(|| Error::bad_size_expression(input))?;

    let value: u64 = caps[1]
        .parse()
        .map_err(|_| Error::bad_size_expression(input))?;

    let shift = match caps.get(2).map(|m| m.as_str()) {
        None => 0,
        Some(unit) if unit.eq_ignore_ascii_case("K") => 10,
        Some(unit) if unit.eq_ignore_ascii_case("M") => 20,
        Some(_) => 30,
    };

    value
        .checked_mul(1u64 << shift)
        .ok_or_else(|| Error::bad_size_expression(input))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_plain_number() {
        assert_eq!(parse_size_expression("37858").unwrap(), 37_858);
        assert_eq!(parse_size_expression("0").unwrap(), 0);
    }

    #[test]
    fn test_binary_suffixes() {
        assert_eq!(parse_size_expression("64K").unwrap(), 64 << 10);
        assert_eq!(parse_size_expression("64k").unwrap(), 64 << 10);
        assert_eq!(parse_size_expression("10M").unwrap(), 10 << 20);
        assert_eq!(parse_size_expression("2G").unwrap(), 2u64 << 30);
    }

    #[test]
    fn test_trailing_b_and_whitespace() {
        assert_eq!(parse_size_expression("10MB").unwrap(), 10 << 20);
        assert_eq!(parse_size_expression("512b").unwrap(), 512);
        assert_eq!(parse_size_expression("  2gb  ").unwrap(), 2u64 << 30);
    }

    #[test]
    fn test_rejects_malformed_input() {
        for input in ["", "  ", "12T", "k", "-5", "1 0", "2 K", "1.5M", "B"] {
            let err = parse_size_expression(input).expect_err(input);
            assert!(err.is_validation(), "{input:?} must be a validation error");
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(parse_size_expression("18446744073709551616").is_err());
        assert!(parse_size_expression("17179869184G").is_err());
    }

    proptest! {
        #[test]
        fn parses_any_plain_number(n in any::<u64>()) {
            prop_assert_eq!(parse_size_expression(&n.to_string()).unwrap(), n);
        }

        #[test]
        fn suffix_shifts_match_unit(
            n in 0u64..1_000_000,
            unit in "[kKmMgG]",
            b in "[bB]?",
            pad in "[ \t]{0,3}",
        ) {
            let shift = match unit.to_ascii_uppercase().as_str() {
                "K" => 10,
                "M" => 20,
                _ => 30,
            };
            let expr = format!("{pad}{n}{unit}{b}{pad}");
            prop_assert_eq!(parse_size_expression(&expr).unwrap(), n << shift);
        }

        #[test]
        fn letters_without_digits_never_parse(s in "[a-zA-Z]{1,12}") {
            prop_assert!(parse_size_expression(&s).is_err());
        }
    }
}
