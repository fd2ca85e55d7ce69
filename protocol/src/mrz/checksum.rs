//! # ICAO 9303 Check Digits
//!
//! Each protected MRZ field is followed by one check digit:
//!
//! ```text
//! value('<') = 0, value('0'..='9') = digit, value('A'..='Z') = ordinal + 10
//! check      = Σ value(c_i) · [7, 3, 1][i mod 3]   (mod 10)
//! ```
//!
//! These functions are pure and know nothing about field positions, which
//! keeps them testable on their own.

use crate::config::{CHECK_DIGIT_MODULUS, CHECK_DIGIT_WEIGHTS, LETTER_VALUE_OFFSET, MRZ_FILLER};

use super::error::{MrzError, MrzField};

/// Weight applied to the character at `index`.
pub fn weight(index: usize) -> u32 {
    CHECK_DIGIT_WEIGHTS[index % CHECK_DIGIT_WEIGHTS.len()]
}

/// Numeric value of an MRZ character, or `None` outside `A-Z`, `0-9`, `<`.
pub fn char_value(c: char) -> Option<u32> {
    match c {
        MRZ_FILLER => Some(0),
        '0'..='9' => c.to_digit(10),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + LETTER_VALUE_OFFSET),
        _ => None,
    }
}

/// Compute the check digit of `data`.
///
/// Returns `None` if `data` contains a character the MRZ alphabet does not
/// define. The empty string has check digit 0.
pub fn check_digit(data: &str) -> Option<u8> {
    let mut sum = 0u32;
    for (i, c) in data.chars().enumerate() {
        sum += char_value(c)? * weight(i);
    }
    Some((sum % CHECK_DIGIT_MODULUS) as u8)
}

/// Validate `data` against the check digit declared next to it.
pub fn verify(field: MrzField, data: &str, expected: u8) -> Result<(), MrzError> {
    let computed = check_digit(data).ok_or_else(|| MrzError::MalformedField {
        field,
        value: data.to_string(),
        reason: "contains characters outside A-Z, 0-9 and '<'",
    })?;

    if computed != expected {
        return Err(MrzError::ChecksumMismatch {
            field,
            data: data.to_string(),
            computed,
            expected,
        });
    }

    Ok(())
}
