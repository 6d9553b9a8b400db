use core::num::NonZeroUsize;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::{
    BitRange,
    FwError::{self, *},
};

/// Returns `2^w`
pub(crate) fn modulus(w: NonZeroUsize) -> BigInt {
    BigInt::one() << w.get()
}

/// An integer with a runtime controlled bitwidth and signedness.
///
/// The value always lies in `min_value(w, signed)..=max_value(w, signed)`.
/// All mutating functions validate their result and leave `self` unchanged
/// when returning an error.
///
/// ```
/// use fwint::{FixedWidthInteger, FwError};
///
/// let mut x = FixedWidthInteger::new(5, 16, false).unwrap();
/// x.set_bit(0, true).unwrap();
/// assert_eq!(x, 32773);
/// // signedness can only be changed if the value stays representable
/// assert_eq!(x.set_signed(true), Err(FwError::Overflow));
/// x.clear_bit(0).unwrap();
/// x.set_signed(true).unwrap();
/// // narrowing is checked for lost bits
/// x.set_width(4).unwrap();
/// assert_eq!(x.bit_string(), "0101");
/// assert_eq!(x.set_width(2), Err(FwError::Overflow));
/// ```
#[derive(Clone)]
pub struct FixedWidthInteger {
    pub(crate) value: BigInt,
    pub(crate) w: NonZeroUsize,
    pub(crate) signed: bool,
}

/// # Construction and configuration
impl FixedWidthInteger {
    /// Creates an integer with value `value`, bitwidth `w`, and signedness
    /// `signed`.
    ///
    /// # Errors
    ///
    /// `InvalidWidth` if `w == 0`, `Overflow` if `value` is not representable
    pub fn new<I: Into<BigInt>>(value: I, w: usize, signed: bool) -> Result<Self, FwError> {
        let w = NonZeroUsize::new(w).ok_or(InvalidWidth)?;
        Self::from_parts(value.into(), w, signed)
    }

    /// Zero-value construction with bitwidth `w`
    pub fn zero(w: NonZeroUsize, signed: bool) -> Self {
        Self {
            value: BigInt::zero(),
            w,
            signed,
        }
    }

    pub(crate) fn from_parts(value: BigInt, w: NonZeroUsize, signed: bool) -> Result<Self, FwError> {
        if !Self::fits(&value, w, signed) {
            return Err(Overflow)
        }
        Ok(Self { value, w, signed })
    }

    /// Interprets the unsigned `pattern` as a two's complement integer if
    /// `signed`. `pattern` must be less than `2^w`.
    pub(crate) fn from_pattern(pattern: BigInt, w: NonZeroUsize, signed: bool) -> Self {
        debug_assert!(!pattern.is_negative() && (pattern < modulus(w)));
        let value = if signed && (pattern > Self::max_value(w, true)) {
            pattern - modulus(w)
        } else {
            pattern
        };
        Self { value, w, signed }
    }

    /// The smallest value representable with bitwidth `w` and signedness
    /// `signed`. For signed integers this is `-2^(w-1)`.
    pub fn min_value(w: NonZeroUsize, signed: bool) -> BigInt {
        if signed {
            -(BigInt::one() << (w.get() - 1))
        } else {
            BigInt::zero()
        }
    }

    /// The largest value representable with bitwidth `w` and signedness
    /// `signed`
    pub fn max_value(w: NonZeroUsize, signed: bool) -> BigInt {
        if signed {
            (BigInt::one() << (w.get() - 1)) - BigInt::one()
        } else {
            modulus(w) - BigInt::one()
        }
    }

    /// If `value` is representable with bitwidth `w` and signedness `signed`
    pub fn fits(value: &BigInt, w: NonZeroUsize, signed: bool) -> bool {
        (*value >= Self::min_value(w, signed)) && (*value <= Self::max_value(w, signed))
    }

    /// Returns the represented value
    #[must_use]
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// Assigns `value` to `self` without changing the configuration.
    ///
    /// # Errors
    ///
    /// `Overflow` if `value` is not representable
    pub fn set_value<I: Into<BigInt>>(&mut self, value: I) -> Result<(), FwError> {
        let value = value.into();
        if !Self::fits(&value, self.w, self.signed) {
            return Err(Overflow)
        }
        self.value = value;
        Ok(())
    }

    /// Returns the bitwidth as a `usize`
    #[must_use]
    pub fn width(&self) -> usize {
        self.w.get()
    }

    /// Returns the bitwidth as a `NonZeroUsize`
    #[must_use]
    pub fn nzbw(&self) -> NonZeroUsize {
        self.w
    }

    /// Same as [FixedWidthInteger::width]
    #[must_use]
    pub fn len(&self) -> usize {
        self.w.get()
    }

    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Changes the bitwidth to `w`. The raw bit pattern at the old bitwidth
    /// is read as an unsigned number, which becomes the new value if it is
    /// representable at the new bitwidth. This means that widening never
    /// fails but turns negative values into their unsigned pattern, and
    /// narrowing fails if it would drop a set bit.
    ///
    /// # Errors
    ///
    /// `InvalidWidth` if `w == 0`, `Overflow` if the pattern does not fit
    pub fn set_width(&mut self, w: usize) -> Result<(), FwError> {
        let w = NonZeroUsize::new(w).ok_or(InvalidWidth)?;
        let pattern = self.to_pattern();
        if pattern > Self::max_value(w, self.signed) {
            return Err(Overflow)
        }
        self.value = pattern;
        self.w = w;
        Ok(())
    }

    /// Changes the signedness, keeping the value.
    ///
    /// # Errors
    ///
    /// `Overflow` if the value is not representable with the new signedness
    pub fn set_signed(&mut self, signed: bool) -> Result<(), FwError> {
        if !Self::fits(&self.value, self.w, signed) {
            return Err(Overflow)
        }
        self.signed = signed;
        Ok(())
    }

    /// Returns the raw bit pattern of `self` read as an unsigned number
    #[must_use]
    pub fn to_pattern(&self) -> BigInt {
        if self.value.is_negative() {
            &self.value + modulus(self.w)
        } else {
            self.value.clone()
        }
    }
}

/// Returns raw bit `i` (least significant first) of a nonnegative `pattern`
fn pattern_bit(pattern: &BigInt, i: usize) -> bool {
    !((pattern >> i) & BigInt::one()).is_zero()
}

/// Returns `pattern` with raw bit `i` assigned to `bit`
fn pattern_assign(pattern: BigInt, i: usize, bit: bool) -> BigInt {
    if pattern_bit(&pattern, i) == bit {
        pattern
    } else {
        pattern ^ (BigInt::one() << i)
    }
}

/// # Bit access
///
/// Indexes are most significant bit first, index `i` refers to raw bit
/// `width - 1 - i`. Negative indexes have the bitwidth added to them once.
impl FixedWidthInteger {
    /// Translates a public index into a raw least significant first index
    fn raw_index(&self, i: isize) -> Result<usize, FwError> {
        let w = self.width();
        let i = if i < 0 {
            w.checked_sub(i.unsigned_abs()).ok_or(IndexOutOfBounds)?
        } else {
            i as usize
        };
        if i >= w {
            return Err(IndexOutOfBounds)
        }
        Ok(w - 1 - i)
    }

    /// Returns bit `i`
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `i` is not in `-width..width`
    pub fn get_bit(&self, i: isize) -> Result<bool, FwError> {
        let raw = self.raw_index(i)?;
        Ok(pattern_bit(&self.to_pattern(), raw))
    }

    /// Assigns `bit` to bit `i`. The value is recomputed from the raw
    /// pattern, so setting the most significant bit of a signed integer
    /// makes it negative.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `i` is not in `-width..width`
    pub fn set_bit(&mut self, i: isize, bit: bool) -> Result<(), FwError> {
        let raw = self.raw_index(i)?;
        let pattern = pattern_assign(self.to_pattern(), raw, bit);
        *self = Self::from_pattern(pattern, self.w, self.signed);
        Ok(())
    }

    /// Clears bit `i`, same as `self.set_bit(i, false)`
    pub fn clear_bit(&mut self, i: isize) -> Result<(), FwError> {
        self.set_bit(i, false)
    }

    /// Returns the bits selected by `range` as a new signed integer, with the
    /// first selected bit as its most significant bit. A reversing step
    /// reverses the bits.
    ///
    /// ```
    /// use fwint::{BitRange, FixedWidthInteger};
    ///
    /// let x = FixedWidthInteger::new(0b1011_0010, 8, false).unwrap();
    /// let y = x.get_range(2..6).unwrap();
    /// assert_eq!(y.bit_string(), "1100");
    /// assert!(y.is_signed());
    /// assert_eq!(y, -4);
    /// let z = x.get_range(BitRange::new(Some(5), Some(1), Some(-1))).unwrap();
    /// assert_eq!(z.bit_string(), "0011");
    /// ```
    ///
    /// # Errors
    ///
    /// `EmptyRange` if no bits are selected, otherwise see [BitRange::resolve]
    pub fn get_range<R: Into<BitRange>>(&self, range: R) -> Result<Self, FwError> {
        let range = range.into().resolve(self.w)?;
        let pattern = self.to_pattern();
        let mut raw_bits = range.iter().map(|i| pattern_bit(&pattern, self.width() - 1 - i));
        let first = raw_bits.next().ok_or(EmptyRange)?;
        let mut res = Self::from_pattern(BigInt::from(first as u8), NonZeroUsize::MIN, true);
        for bit in raw_bits {
            res.append(bit);
        }
        Ok(res)
    }

    /// Assigns `bit` to every bit selected by `range`. Nothing happens if no
    /// bits are selected.
    ///
    /// # Errors
    ///
    /// See [BitRange::resolve]
    pub fn set_range<R: Into<BitRange>>(&mut self, range: R, bit: bool) -> Result<(), FwError> {
        let range = range.into().resolve(self.w)?;
        let mut pattern = self.to_pattern();
        for i in range.iter() {
            pattern = pattern_assign(pattern, self.width() - 1 - i, bit);
        }
        *self = Self::from_pattern(pattern, self.w, self.signed);
        Ok(())
    }

    /// Adds a new least significant bit, shifting the existing bits up
    pub fn append(&mut self, bit: bool) {
        let pattern = (self.to_pattern() << 1usize) | BigInt::from(bit as u8);
        let w = self.w.saturating_add(1);
        *self = Self::from_pattern(pattern, w, self.signed);
    }

    /// Adds a new most significant bit, the existing bits keep their
    /// positions
    pub fn prepend(&mut self, bit: bool) {
        let pattern = pattern_assign(self.to_pattern(), self.width(), bit);
        let w = self.w.saturating_add(1);
        *self = Self::from_pattern(pattern, w, self.signed);
    }
}
