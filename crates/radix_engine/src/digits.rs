//! Decimal digit helpers shared by both radix variants.

pub const RADIX: u64 = 10;

/// Decimal digit of `number` at power-of-ten position `exp`.
///
/// Positions past the number's length, including ones where `10^exp` no longer
/// fits in a `u64`, yield 0.
pub fn digit_at(number: u64, exp: u32) -> u8 {
    match RADIX.checked_pow(exp) {
        Some(place) => ((number / place) % RADIX) as u8,
        None => 0,
    }
}

/// Number of decimal digits needed to print `number`; `0` has length 1.
pub fn decimal_len(number: u64) -> u32 {
    number.checked_ilog10().map_or(1, |log| log + 1)
}

/// Decimal length of the largest element, or 0 for an empty slice.
pub fn max_digit_length(numbers: &[u64]) -> u32 {
    numbers.iter().copied().max().map_or(0, decimal_len)
}
