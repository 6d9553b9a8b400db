use core::fmt;

/// An error from an operation on a [FixedWidthInteger](crate::FixedWidthInteger).
/// Operations returning an error never leave a partial mutation behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FwError {
    /// A bitwidth of zero was given
    InvalidWidth,
    /// The value cannot be represented by the signed or unsigned integer of
    /// the requested bitwidth
    Overflow,
    /// A bit index or range bound lies outside of `-width..width` (or
    /// `-width..=width` for range bounds)
    IndexOutOfBounds,
    /// A range was given a step of zero
    ZeroStep,
    /// A range read selected no bits, which would produce an integer with a
    /// bitwidth of zero
    EmptyRange,
    /// The divisor of a division or modulo was zero
    DivisionByZero,
    /// A bit string contained a character other than `0` or `1`
    InvalidChar,
    /// A string did not have the `FixedWidthInteger(value, width, signed)`
    /// form
    Malformed,
}

impl fmt::Display for FwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FwError {}
