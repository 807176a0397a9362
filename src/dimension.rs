use std::fmt;

use thiserror::Error;

use crate::Dimension;
use crate::parse_util;

pub const MIN_DIMENSION: Dimension = 1;
pub const MAX_DIMENSION: Dimension = 256;

/// Width (`x`) and height (`y`) of a field, in cells. Both are always in `1..=256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    x: Dimension,
    y: Dimension,
}

impl Dimensions {
    /// Validate a pair of already-numeric dimensions.
    pub fn new(x: i64, y: i64) -> Result<Self, DimensionError> {
        Ok(Dimensions {
            x: check_range(x)?,
            y: check_range(y)?,
        })
    }

    /// Pair up two values that already went through [`check_range`] or [`parse_dimension`].
    pub(crate) fn from_checked(x: Dimension, y: Dimension) -> Self {
        Dimensions { x, y }
    }

    pub fn x(&self) -> Dimension {
        self.x
    }

    pub fn y(&self) -> Dimension {
        self.y
    }

    pub fn cell_count(&self) -> usize {
        self.x as usize * self.y as usize
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// An invalid side length. Both variants mean the same thing to the user: the input is not
/// usable as a dimension.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("\"{input}\" is not a whole number")]
    NotANumber { input: String },

    #[error("{value} is outside of 1..=256")]
    OutOfRange { value: i64 },
}

/// Parse a side length the way a browser reads an integer out of a form field.
///
/// Leading whitespace is skipped, then an optional sign, an optional `0x` prefix and the
/// leading run of digits. Whatever follows the digits is ignored, so `"3.7"` reads as `3` and
/// `"12px"` as `12`.
pub fn parse_dimension(input: &str) -> Result<Dimension, DimensionError> {
    let Some(value) = parse_leading_int(trim_form_ws(input).as_bytes()) else {
        return Err(DimensionError::NotANumber {
            input: input.to_string(),
        });
    };

    check_range(value)
}

pub fn check_range(value: i64) -> Result<Dimension, DimensionError> {
    if value < MIN_DIMENSION as i64 || value > MAX_DIMENSION as i64 {
        return Err(DimensionError::OutOfRange { value });
    }

    Ok(value as Dimension)
}

/// Strip leading whitespace, counting the byte order mark as whitespace like a browser does.
fn trim_form_ws(input: &str) -> &str {
    input.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

fn parse_leading_int(bytes: &[u8]) -> Option<i64> {
    let (negative, bytes) = parse_util::take_sign(bytes);

    let (hex, bytes) = parse_util::take_hex_prefix(bytes);
    let radix = if hex { 16 } else { 10 };

    let (Some(digits), _) = parse_util::take_while_fn(|b| (b as char).is_digit(radix), bytes)
    else {
        return None;
    };

    let n = parse_util::digits_value(digits, radix);

    Some(if negative { -n } else { n })
}

#[cfg(test)]
mod test {
    use super::DimensionError;
    use super::Dimensions;
    use super::parse_dimension;

    use proptest::prelude::*;

    #[test]
    fn accepts_plain_integers() {
        assert_eq!(parse_dimension("1"), Ok(1));
        assert_eq!(parse_dimension("256"), Ok(256));
        assert_eq!(parse_dimension("  42"), Ok(42));
        assert_eq!(parse_dimension("+8"), Ok(8));
    }

    #[test]
    fn skips_unicode_whitespace() {
        assert_eq!(parse_dimension("\u{00A0}12"), Ok(12));
        assert_eq!(parse_dimension("\u{FEFF}7"), Ok(7));
        assert_eq!(parse_dimension("\u{2003}\u{000B}\t9"), Ok(9));
        assert!(matches!(
            parse_dimension("\u{00A0}"),
            Err(DimensionError::NotANumber { .. })
        ));
    }

    #[test]
    fn truncates_after_digits() {
        assert_eq!(parse_dimension("3.7"), Ok(3));
        assert_eq!(parse_dimension("12px"), Ok(12));
        assert_eq!(parse_dimension("16 "), Ok(16));
    }

    #[test]
    fn reads_hex_prefix() {
        assert_eq!(parse_dimension("0x10"), Ok(16));
        assert_eq!(parse_dimension("0XfF"), Ok(255));
        assert!(matches!(parse_dimension("0x"), Err(DimensionError::NotANumber { .. })));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            parse_dimension("0"),
            Err(DimensionError::OutOfRange { value: 0 })
        );
        assert_eq!(
            parse_dimension("257"),
            Err(DimensionError::OutOfRange { value: 257 })
        );
        assert_eq!(
            parse_dimension("-5"),
            Err(DimensionError::OutOfRange { value: -5 })
        );
        assert_eq!(
            parse_dimension("-0"),
            Err(DimensionError::OutOfRange { value: 0 })
        );
    }

    #[test]
    fn rejects_non_numbers() {
        for input in ["abc", "", "   ", "-", ".5", "x12"] {
            assert_eq!(
                parse_dimension(input),
                Err(DimensionError::NotANumber {
                    input: input.to_string()
                }),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn huge_numbers_are_out_of_range() {
        let res = parse_dimension("123456789012345678901234567890");

        assert_eq!(res, Err(DimensionError::OutOfRange { value: i64::MAX }));
    }

    #[test]
    fn dimensions_check_both_axes() {
        let dims = Dimensions::new(3, 2).unwrap();
        assert_eq!((dims.x(), dims.y()), (3, 2));
        assert!(Dimensions::new(3, 0).is_err());
        assert!(Dimensions::new(300, 2).is_err());
    }

    proptest! {
        #[test]
        fn range_rule_holds_for_integers(n in -1000i64..1000) {
            let res = parse_dimension(&n.to_string());

            prop_assert_eq!(res.is_ok(), (1..=256).contains(&n));
        }

        #[test]
        fn fractions_truncate(n in 1u16..=256, frac in 0u16..1000) {
            let res = parse_dimension(&format!("{n}.{frac}"));

            prop_assert_eq!(res, Ok(n));
        }
    }
}
