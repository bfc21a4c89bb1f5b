//! Text and number normalization for statement cells.
//!
//! Labels are compared trimmed and lower-cased. Values have their thousands
//! separators removed before conversion; amounts are stated in millions and
//! scaled to units, per-share figures are kept as single-precision decimals.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Multiplier applied to amounts stated in millions.
pub const MILLIONS: i64 = 1_000_000;

/// Why a value cell could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Text is not a base-10 integer
    #[error("not an integer: {0}")]
    Integer(#[from] ParseIntError),

    /// Text is not a decimal number
    #[error("not a decimal number: {0}")]
    Decimal(#[from] ParseFloatError),

    /// Decimal parsed to infinity or NaN
    #[error("not a finite number")]
    NotFinite,

    /// Scaling to units overflowed
    #[error("{0} million does not fit in a 64-bit amount")]
    Overflow(i64),
}

/// Normalize a label cell for matching: trimmed and lower-cased.
pub fn normalize_label(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Trim a value cell and drop its thousands separators.
pub fn strip_separators(text: &str) -> String {
    text.trim().replace(',', "")
}

/// Parse an amount stated in millions and scale it to units.
///
/// # Example
/// ```
/// # use tally_extract::normalize::parse_millions;
/// assert_eq!(parse_millions(" 1,234 "), Ok(1_234_000_000));
/// assert!(parse_millions("N/A").is_err());
/// ```
pub fn parse_millions(text: &str) -> Result<i64, ValueError> {
    let millions: i64 = strip_separators(text).parse()?;
    millions
        .checked_mul(MILLIONS)
        .ok_or(ValueError::Overflow(millions))
}

/// Parse a per-share figure at single precision.
///
/// # Example
/// ```
/// # use tally_extract::normalize::parse_per_share;
/// assert_eq!(parse_per_share("2.35"), Ok(2.35_f32));
/// ```
pub fn parse_per_share(text: &str) -> Result<f32, ValueError> {
    let value: f32 = strip_separators(text).parse()?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValueError::NotFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("  Total Net Sales ", "total net sales")]
    #[case("Diluted\u{a0}", "diluted")]
    #[case("", "")]
    fn test_normalize_label(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_label(raw), expected);
    }

    #[rstest]
    #[case("1,234", 1_234_000_000)]
    #[case("383,285", 383_285_000_000)]
    #[case(" 567 ", 567_000_000)]
    #[case("-12", -12_000_000)]
    #[case("0", 0)]
    fn test_parse_millions(#[case] text: &str, #[case] expected: i64) {
        assert_eq!(parse_millions(text), Ok(expected));
    }

    #[rstest]
    #[case("N/A")]
    #[case("")]
    #[case("$")]
    #[case("(1,234)")]
    #[case("12.5")]
    #[case("—")]
    fn test_parse_millions_rejects(#[case] text: &str) {
        assert!(matches!(parse_millions(text), Err(ValueError::Integer(_))));
    }

    #[test]
    fn test_parse_millions_overflow() {
        assert_eq!(
            parse_millions("9,223,372,036,855"),
            Err(ValueError::Overflow(9_223_372_036_855))
        );
    }

    #[rstest]
    #[case("2.35", 2.35)]
    #[case(" 6.16 ", 6.16)]
    #[case("1,002.5", 1002.5)]
    #[case("-0.42", -0.42)]
    fn test_parse_per_share(#[case] text: &str, #[case] expected: f32) {
        assert_relative_eq!(parse_per_share(text).unwrap(), expected);
    }

    #[test]
    fn test_parse_per_share_rejects() {
        assert!(matches!(parse_per_share("N/A"), Err(ValueError::Decimal(_))));
        assert_eq!(parse_per_share("inf"), Err(ValueError::NotFinite));
        assert_eq!(parse_per_share("NaN"), Err(ValueError::NotFinite));
    }
}
