//! Two's-complement decoding of raw register values.

/// Preconditions violated by [`to_signed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Width must lie in `1..=32`.
    InvalidWidth(u32),
    /// The value has bits set above the requested width.
    ValueOutOfRange,
}

/// Interprets the low `width_bits` of `value` as a two's-complement integer.
///
/// When bit `width_bits - 1` is set the result is `value - 2^width_bits`,
/// otherwise `value` is returned unchanged.
///
/// ```rust
/// use mag3110::to_signed;
///
/// assert_eq!(to_signed(0x8000, 16), Ok(-32768));
/// assert_eq!(to_signed(0x7F, 8), Ok(127));
/// ```
pub fn to_signed(value: u32, width_bits: u32) -> Result<i32, DecodeError> {
    if width_bits == 0 || width_bits > 32 {
        return Err(DecodeError::InvalidWidth(width_bits));
    }
    if width_bits < 32 && value >> width_bits != 0 {
        return Err(DecodeError::ValueOutOfRange);
    }

    let value = i64::from(value);
    let signed = if value & (1 << (width_bits - 1)) != 0 {
        value - (1 << width_bits)
    } else {
        value
    };

    // Range is [-2^(w-1), 2^(w-1)) with w <= 32.
    Ok(signed as i32)
}
