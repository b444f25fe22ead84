//! The narcissism check.
//!
//! A value with L digits in base b is narcissistic if the sum of each digit
//! raised to L is the value itself. The sum is accumulated with checked
//! arithmetic: once it leaves the `u64` range it is larger than any `i64`, so
//! the value cannot be narcissistic.

use crate::base_codec::{self, Base};
use crate::error::{Error, Result};

/// Sum each digit of the value raised to the digit count.
/// Returns `None` if the sum does not fit in a `u64`.
///
/// # Errors
/// Returns `InvalidDigitValue` if a digit is not below the base.
pub fn digit_power_sum(value: i64, base: Base) -> Result<Option<u64>> {
    let digits = base_codec::to_digits(value, base);
    // at most 64 digits in base 2
    #[allow(clippy::cast_possible_truncation)]
    let exponent = digits.len() as u32;

    let mut sum: u64 = 0;
    for digit in digits {
        if digit >= base.get() {
            return Err(Error::InvalidDigitValue(digit));
        }
        let Some(power) = u64::from(digit).checked_pow(exponent) else {
            return Ok(None);
        };
        let Some(next) = sum.checked_add(power) else {
            return Ok(None);
        };
        sum = next;
    }
    Ok(Some(sum))
}

/// Check a value in an already validated base.
/// Negative values are never narcissistic since the digit power sum is not negative.
///
/// # Errors
/// Returns an error if the digits of the value could not be evaluated.
pub fn is_narcissistic_in(value: i64, base: Base) -> Result<bool> {
    // 🔥🔥🔥 HOT LOOP 🔥🔥🔥
    Ok(digit_power_sum(value, base)?.is_some_and(|sum| i64::try_from(sum) == Ok(value)))
}

/// Determine if a value is narcissistic in a base.
/// `Ok(false)` means the value was evaluated and is not narcissistic, an error
/// means it could not be evaluated at all.
///
/// # Errors
/// Returns `InvalidBase` if the base is outside `2..=36`.
pub fn is_narcissistic(value: i64, base: u32) -> Result<bool> {
    is_narcissistic_in(value, Base::new(base)?)
}
