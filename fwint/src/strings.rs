use alloc::{format, string::String};
use core::{fmt, num::NonZeroUsize, str::FromStr};

use num_bigint::BigInt;

use crate::{
    FixedWidthInteger,
    FwError::{self, *},
};

/// # String conversion
impl FixedWidthInteger {
    /// Returns the raw bits of `self` as `'0'` and `'1'` characters, most
    /// significant bit first. The length is always the bitwidth.
    ///
    /// ```
    /// use fwint::FixedWidthInteger;
    ///
    /// let x = FixedWidthInteger::new(-3, 6, true).unwrap();
    /// assert_eq!(x.bit_string(), "111101");
    /// ```
    #[must_use]
    pub fn bit_string(&self) -> String {
        let digits = self.to_pattern().to_str_radix(2);
        let mut s = String::with_capacity(self.width());
        for _ in digits.len()..self.width() {
            s.push('0');
        }
        s.push_str(&digits);
        s
    }

    /// Creates an integer with the raw bits of `bits`, which are given most
    /// significant bit first. The bitwidth is the number of characters. This
    /// is the inverse of [FixedWidthInteger::bit_string].
    ///
    /// # Errors
    ///
    /// `InvalidWidth` if `bits` is empty, `InvalidChar` if it contains a
    /// character other than `0` or `1`
    pub fn from_bit_string(bits: &str, signed: bool) -> Result<Self, FwError> {
        let w = NonZeroUsize::new(bits.len()).ok_or(InvalidWidth)?;
        if !bits.bytes().all(|b| (b == b'0') || (b == b'1')) {
            return Err(InvalidChar)
        }
        let pattern = BigInt::parse_bytes(bits.as_bytes(), 2).ok_or(InvalidChar)?;
        Ok(Self::from_pattern(pattern, w, signed))
    }

    /// Returns the `Debug` representation, `FixedWidthInteger(value, width,
    /// signed)`, which can be parsed back with `FromStr`
    #[must_use]
    pub fn debug_string(&self) -> String {
        format!("{self:?}")
    }
}

/// Writes the value in decimal
impl fmt::Display for FixedWidthInteger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl fmt::Debug for FixedWidthInteger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "FixedWidthInteger({}, {}, {})",
            self.value, self.w, self.signed
        )
    }
}

/// Writes the [FixedWidthInteger::bit_string]
impl fmt::Binary for FixedWidthInteger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad_integral(true, "0b", &self.bit_string())
    }
}

/// Parses the `Debug` representation
impl FromStr for FixedWidthInteger {
    type Err = FwError;

    /// ```
    /// use fwint::FixedWidthInteger;
    ///
    /// let x: FixedWidthInteger = "FixedWidthInteger(-7, 12, true)".parse().unwrap();
    /// assert_eq!(x, -7);
    /// assert_eq!(x.width(), 12);
    /// assert_eq!(x.debug_string().parse::<FixedWidthInteger>().unwrap(), x);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let args = s
            .trim()
            .strip_prefix("FixedWidthInteger(")
            .and_then(|s| s.strip_suffix(')'))
            .ok_or(Malformed)?;
        let mut args = args.split(',').map(str::trim);
        let (Some(value), Some(w), Some(signed), None) =
            (args.next(), args.next(), args.next(), args.next())
        else {
            return Err(Malformed)
        };
        let value = BigInt::from_str(value).map_err(|_| Malformed)?;
        let w = w.parse::<usize>().map_err(|_| Malformed)?;
        let signed = signed.parse::<bool>().map_err(|_| Malformed)?;
        FixedWidthInteger::new(value, w, signed)
    }
}
