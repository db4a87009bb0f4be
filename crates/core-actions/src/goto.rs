//! Goto offset validation.
//!
//! Accepted syntax follows C `strtoll` with base auto-detection: optional
//! leading whitespace, optional sign, then `0x`/`0X` hex, a leading `0` for
//! octal, or decimal. Nothing may follow the digits. The result must address
//! an existing byte, so the end-of-file boundary is not a valid target.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOffsetError {
    #[error("Invalid offset!")]
    Empty,
    #[error("Invalid offset!")]
    Malformed,
    #[error("Invalid offset!")]
    Negative,
    #[error("Invalid offset!")]
    Overflow,
    #[error("Invalid offset! {offset:#x} is past the end ({size:#x})")]
    OutOfRange { offset: u64, size: u64 },
}

pub fn validate_offset(text: &str, size: u64) -> Result<u64, InvalidOffsetError> {
    let s = text.trim_start();
    if s.is_empty() {
        return Err(InvalidOffsetError::Empty);
    }
    let (negative, s) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
    {
        (16, hex)
    } else if s.len() > 1 && s.starts_with('0') {
        (8, &s[1..])
    } else {
        (10, s)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(InvalidOffsetError::Malformed);
    }
    let magnitude = i64::from_str_radix(digits, radix).map_err(|_| InvalidOffsetError::Overflow)?;
    if negative && magnitude != 0 {
        return Err(InvalidOffsetError::Negative);
    }
    let offset = magnitude as u64;
    if offset >= size {
        return Err(InvalidOffsetError::OutOfRange { offset, size });
    }
    Ok(offset)
}
