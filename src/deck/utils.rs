//! Low-level byte reading utilities

use std::borrow::Cow;
use std::sync::LazyLock;
use regex::Regex;

/// Failure modes of [`read_varint`], positioned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// Input ended before a byte with the high bit clear.
    Truncated,
    /// More significant bits than a `u32` can hold.
    Overflow,
}

/// Read one unsigned LEB128-style integer starting at `offset`.
///
/// Each byte contributes its low 7 bits, least significant group first.
/// A set high bit means another byte follows.
///
/// Returns the value and the offset just past its last byte. The loop is
/// bounded by the remaining input, so it always terminates.
pub fn read_varint(data: &[u8], offset: usize) -> Result<(u32, usize), VarintError> {
    let mut value: u32 = 0;
    let mut shift: u32 = 0;
    let mut pos = offset;

    while let Some(&byte) = data.get(pos) {
        pos += 1;
        let bits = u32::from(byte & 0x7F);

        if shift < 32 {
            if shift > 0 && bits >> (32 - shift) != 0 {
                return Err(VarintError::Overflow);
            }
            value |= bits << shift;
        } else if bits != 0 {
            return Err(VarintError::Overflow);
        }

        if byte & 0x80 == 0 {
            return Ok((value, pos));
        }
        shift = shift.saturating_add(7);
    }

    Err(VarintError::Truncated)
}

static DECK_CODE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^AAE[A-Z]*=*").expect("deck code prefix pattern is valid")
});

/// Strip the common `AAE…` lead-in and surrounding whitespace from a deck code.
///
/// Only used for log output. Decoding always runs on the untouched input.
pub fn strip_code_prefix(code: &str) -> Cow<'_, str> {
    match DECK_CODE_PREFIX.replace(code, "") {
        Cow::Borrowed(rest) => Cow::Borrowed(rest.trim()),
        Cow::Owned(rest) => Cow::Owned(rest.trim().to_owned()),
    }
}
