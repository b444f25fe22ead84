//! A module for converting values to and from their digits in bases 2 through 36.
//!
//! Digits 0-9 are written as `'0'..='9'` and digits 10-35 as `'a'..='z'`.
//! Parsing accepts letters in either case. Negative values carry a leading
//! `'-'` that is handled separately from the digits: the magnitude is
//! accumulated first and the sign is applied at the end.

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// A base that is known to be within `MIN_BASE..=MAX_BASE`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Base(u32);

impl Base {
    /// Validate a base.
    ///
    /// # Errors
    /// Returns `InvalidBase` if the base is outside `2..=36`.
    pub fn new(radix: u32) -> Result<Self> {
        if (MIN_BASE..=MAX_BASE).contains(&radix) {
            Ok(Self(radix))
        } else {
            Err(Error::InvalidBase(radix))
        }
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Base {
    type Error = Error;

    fn try_from(radix: u32) -> Result<Self> {
        Self::new(radix)
    }
}

impl From<Base> for u32 {
    fn from(base: Base) -> Self {
        base.0
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Get the character for a single digit value.
///
/// # Errors
/// Returns `InvalidDigitValue` if the digit is 36 or more.
pub fn digit_to_char(digit: u32) -> Result<char> {
    char::from_digit(digit, MAX_BASE).ok_or(Error::InvalidDigitValue(digit))
}

/// Get the digit value of a character in a base. Letters are case-insensitive.
/// Letters are only valid in the half-open range `'a'..('a' + base - 10)`.
///
/// # Errors
/// Returns `InvalidBase` for a bad base, or `InvalidDigitCharacter` if the
/// character is not a digit in this base.
pub fn char_to_digit(character: char, base: u32) -> Result<u32> {
    let base = Base::new(base)?;
    character
        .to_digit(base.get())
        .ok_or(Error::InvalidDigitCharacter {
            character,
            base: base.get(),
        })
}

/// Get the digits of the magnitude of a value, most significant first.
/// Zero has a single digit.
#[must_use]
pub fn to_digits(value: i64, base: Base) -> Vec<u32> {
    let radix = u64::from(base.get());
    let mut n = value.unsigned_abs();
    let mut digits = Vec::new();
    loop {
        // remainder is always below 36
        #[allow(clippy::cast_possible_truncation)]
        digits.push((n % radix) as u32);
        n /= radix;
        if n == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

/// Write a value in a base, with a leading `'-'` if it is negative.
///
/// # Errors
/// Returns `InvalidBase` if the base is outside `2..=36`.
pub fn format(value: i64, base: u32) -> Result<String> {
    let base = Base::new(base)?;
    let mut out = String::new();
    if value < 0 {
        out.push('-');
    }
    for digit in to_digits(value, base) {
        out.push(digit_to_char(digit)?);
    }
    Ok(out)
}

/// Read a value written in a base. A single leading `'-'` negates the result.
///
/// # Errors
/// Returns `InvalidBase` for a bad base, `EmptyInput` if there are no digits,
/// `InvalidDigitCharacter` at the first character that is not a digit in this
/// base, and `ValueOutOfRange` if the value does not fit in an `i64`.
pub fn parse(input: &str, base: u32) -> Result<i64> {
    let base = Base::new(base)?;
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    if digits.is_empty() {
        return Err(Error::EmptyInput);
    }

    // accumulate the magnitude, the sign is applied once at the end
    let radix = u64::from(base.get());
    let mut magnitude: u64 = 0;
    for character in digits.chars() {
        let digit = char_to_digit(character, base.get())
            .inspect_err(|e| debug!("Rejected {input:?}: {e}"))?;
        magnitude = magnitude
            .checked_mul(radix)
            .and_then(|m| m.checked_add(u64::from(digit)))
            .ok_or(Error::ValueOutOfRange)?;
    }

    let signed = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(signed).map_err(|_| Error::ValueOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_base_bounds() {
        assert!(matches!(Base::new(1), Err(Error::InvalidBase(1))));
        assert!(matches!(Base::new(37), Err(Error::InvalidBase(37))));
        assert_eq!(Base::new(2).unwrap().get(), 2);
        assert_eq!(Base::new(36).unwrap().get(), 36);
    }

    #[test_log::test]
    fn test_digit_to_char() {
        assert_eq!(digit_to_char(0).unwrap(), '0');
        assert_eq!(digit_to_char(9).unwrap(), '9');
        assert_eq!(digit_to_char(10).unwrap(), 'a');
        assert_eq!(digit_to_char(35).unwrap(), 'z');
        assert!(matches!(
            digit_to_char(36),
            Err(Error::InvalidDigitValue(36))
        ));
    }

    #[test_log::test]
    fn test_char_to_digit() {
        assert_eq!(char_to_digit('7', 8).unwrap(), 7);
        assert!(char_to_digit('8', 8).is_err());
        assert_eq!(char_to_digit('f', 16).unwrap(), 15);
        assert_eq!(char_to_digit('F', 16).unwrap(), 15);
        assert_eq!(char_to_digit('Z', 36).unwrap(), 35);
        assert!(char_to_digit('a', 10).is_err());
        assert!(char_to_digit('-', 10).is_err());
        assert!(matches!(char_to_digit('0', 40), Err(Error::InvalidBase(40))));
    }

    #[test_log::test]
    fn test_char_to_digit_letter_bound() {
        // one past the last letter of each alphabet is rejected
        for base in 11..=MAX_BASE {
            let last = char::from_digit(base - 1, base).unwrap();
            assert_eq!(char_to_digit(last, base).unwrap(), base - 1);
            if base < MAX_BASE {
                let past = char::from(b'a' + u8::try_from(base - 10).unwrap());
                assert!(
                    matches!(
                        char_to_digit(past, base),
                        Err(Error::InvalidDigitCharacter { .. })
                    ),
                    "{past} accepted in base {base}"
                );
            }
        }
        assert!(char_to_digit('g', 16).is_err());
    }

    #[test_log::test]
    fn test_to_digits() {
        let ten = Base::new(10).unwrap();
        assert_eq!(to_digits(0, ten), vec![0]);
        assert_eq!(to_digits(153, ten), vec![1, 5, 3]);
        assert_eq!(to_digits(-153, ten), vec![1, 5, 3]);
        assert_eq!(to_digits(5, Base::new(2).unwrap()), vec![1, 0, 1]);
        assert_eq!(to_digits(71, Base::new(36).unwrap()), vec![1, 35]);
    }

    #[test_log::test]
    fn test_format() {
        assert_eq!(format(0, 10).unwrap(), "0");
        assert_eq!(format(153, 10).unwrap(), "153");
        assert_eq!(format(255, 16).unwrap(), "ff");
        assert_eq!(format(5, 2).unwrap(), "101");
        assert_eq!(format(-255, 16).unwrap(), "-ff");
        assert_eq!(format(i64::MAX, 16).unwrap(), "7fffffffffffffff");
        assert_eq!(format(i64::MIN, 16).unwrap(), "-8000000000000000");
        assert!(matches!(format(1, 0), Err(Error::InvalidBase(0))));
    }

    #[test_log::test]
    fn test_parse() {
        assert_eq!(parse("0", 10).unwrap(), 0);
        assert_eq!(parse("153", 10).unwrap(), 153);
        assert_eq!(parse("ff", 16).unwrap(), 255);
        assert_eq!(parse("FF", 16).unwrap(), 255);
        assert_eq!(parse("-ff", 16).unwrap(), -255);
        assert_eq!(parse("-8000000000000000", 16).unwrap(), i64::MIN);
        assert_eq!(parse("7fffffffffffffff", 16).unwrap(), i64::MAX);
    }

    #[test_log::test]
    fn test_parse_errors() {
        assert!(matches!(parse("", 10), Err(Error::EmptyInput)));
        assert!(matches!(parse("-", 10), Err(Error::EmptyInput)));
        assert!(matches!(
            parse("12a", 10),
            Err(Error::InvalidDigitCharacter {
                character: 'a',
                base: 10
            })
        ));
        assert!(matches!(
            parse("1-2", 10),
            Err(Error::InvalidDigitCharacter { character: '-', .. })
        ));
        assert!(matches!(
            parse("8000000000000000", 16),
            Err(Error::ValueOutOfRange)
        ));
        assert!(matches!(
            parse("-8000000000000001", 16),
            Err(Error::ValueOutOfRange)
        ));
        assert!(matches!(
            parse("zzzzzzzzzzzzzzzz", 36),
            Err(Error::ValueOutOfRange)
        ));
        assert!(matches!(parse("1", 37), Err(Error::InvalidBase(37))));
    }

    #[test_log::test]
    fn test_round_trip_all_bases() {
        for base in MIN_BASE..=MAX_BASE {
            for value in 0..=100_000 {
                let text = format(value, base).unwrap();
                assert_eq!(parse(&text, base).unwrap(), value, "{text} in base {base}");
            }
        }
    }

    #[test_log::test]
    fn test_base_serde() {
        let base: Base = serde_json::from_str("16").unwrap();
        assert_eq!(base.get(), 16);
        assert!(serde_json::from_str::<Base>("40").is_err());
        assert_eq!(serde_json::to_string(&base).unwrap(), "16");
    }
}
