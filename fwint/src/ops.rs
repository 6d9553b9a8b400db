use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub},
};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{
    FixedWidthInteger,
    FwError::{self, *},
};

/// # Arithmetic
///
/// Every operation computes the exact result on the underlying values and
/// constructs a new `FixedWidthInteger` with the bitwidth and signedness of
/// `self`. Results are never wrapped: if the result is not representable,
/// `Overflow` is returned. The right hand side can be any primitive integer, a
/// `BigInt`, or a `&FixedWidthInteger`, in which case its value is used.
impl FixedWidthInteger {
    fn rewrap(&self, value: BigInt) -> Result<Self, FwError> {
        Self::from_parts(value, self.w, self.signed)
    }

    /// `self + rhs`
    pub fn checked_add<I: Into<BigInt>>(&self, rhs: I) -> Result<Self, FwError> {
        self.rewrap(&self.value + rhs.into())
    }

    /// `self - rhs`
    pub fn checked_sub<I: Into<BigInt>>(&self, rhs: I) -> Result<Self, FwError> {
        self.rewrap(&self.value - rhs.into())
    }

    /// `self * rhs`
    pub fn checked_mul<I: Into<BigInt>>(&self, rhs: I) -> Result<Self, FwError> {
        self.rewrap(&self.value * rhs.into())
    }

    /// Division rounding toward negative infinity
    ///
    /// # Errors
    ///
    /// `DivisionByZero` if `rhs` is zero, `Overflow` for the single case of
    /// the signed minimum divided by `-1`
    pub fn checked_floor_div<I: Into<BigInt>>(&self, rhs: I) -> Result<Self, FwError> {
        let rhs = rhs.into();
        if rhs.is_zero() {
            return Err(DivisionByZero)
        }
        self.rewrap(self.value.div_floor(&rhs))
    }

    /// Exact division truncated toward zero
    ///
    /// # Errors
    ///
    /// `DivisionByZero` if `rhs` is zero, `Overflow` for the single case of
    /// the signed minimum divided by `-1`
    pub fn checked_true_div<I: Into<BigInt>>(&self, rhs: I) -> Result<Self, FwError> {
        let rhs = rhs.into();
        if rhs.is_zero() {
            return Err(DivisionByZero)
        }
        self.rewrap(&self.value / rhs)
    }

    /// The modulo that pairs with [FixedWidthInteger::checked_floor_div], the
    /// result takes the sign of `rhs`
    ///
    /// # Errors
    ///
    /// `DivisionByZero` if `rhs` is zero, and `Overflow` if a negative `rhs`
    /// produces a negative result for an unsigned `self`
    pub fn checked_mod<I: Into<BigInt>>(&self, rhs: I) -> Result<Self, FwError> {
        let rhs = rhs.into();
        if rhs.is_zero() {
            return Err(DivisionByZero)
        }
        self.rewrap(self.value.mod_floor(&rhs))
    }

    /// `self` raised to the power `exp`. `0^0` is 1.
    pub fn checked_pow(&self, exp: u32) -> Result<Self, FwError> {
        // `|x| >= 2` implies `|x|^exp >= 2^exp`, so large exponents are known to
        // overflow without computing them
        if (usize::try_from(exp).map_or(true, |exp| exp >= self.width()))
            && (self.value.abs() > BigInt::one())
        {
            return Err(Overflow)
        }
        self.rewrap(self.value.pow(exp))
    }

    /// `self * 2^s`
    pub fn checked_shl(&self, s: usize) -> Result<Self, FwError> {
        if self.value.is_zero() {
            return Ok(self.clone())
        }
        if s >= self.width() {
            return Err(Overflow)
        }
        self.rewrap(&self.value << s)
    }

    /// Arithmetic right shift by `s`, rounding toward negative infinity. This
    /// cannot overflow.
    pub fn checked_shr(&self, s: usize) -> Result<Self, FwError> {
        self.rewrap(&self.value >> s)
    }

    /// Bitwise and, with both sides in infinite two's complement
    pub fn checked_and<I: Into<BigInt>>(&self, rhs: I) -> Result<Self, FwError> {
        self.rewrap(&self.value & rhs.into())
    }

    /// Bitwise or, with both sides in infinite two's complement
    pub fn checked_or<I: Into<BigInt>>(&self, rhs: I) -> Result<Self, FwError> {
        self.rewrap(&self.value | rhs.into())
    }

    /// Bitwise xor, with both sides in infinite two's complement
    pub fn checked_xor<I: Into<BigInt>>(&self, rhs: I) -> Result<Self, FwError> {
        self.rewrap(&self.value ^ rhs.into())
    }

    /// `-self` with the same signedness. For unsigned integers only zero can
    /// be negated; change the signedness first for anything else.
    pub fn checked_neg(&self) -> Result<Self, FwError> {
        self.rewrap(-&self.value)
    }

    /// `|self|`, which overflows for the signed minimum
    pub fn checked_abs(&self) -> Result<Self, FwError> {
        self.rewrap(self.value.abs())
    }

    /// `-self - 1`. The value is complemented as an infinite two's complement
    /// number, so this overflows for every unsigned integer.
    pub fn checked_not(&self) -> Result<Self, FwError> {
        self.rewrap(!&self.value)
    }

    /// If the value is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// If the value is nonzero
    #[must_use]
    pub fn to_bool(&self) -> bool {
        !self.value.is_zero()
    }
}

macro_rules! impl_binop {
    ($($op:ident $fn:ident $checked:ident);*;) => {
        $(
            impl<I: Into<BigInt>> $op<I> for &FixedWidthInteger {
                type Output = Result<FixedWidthInteger, FwError>;

                fn $fn(self, rhs: I) -> Self::Output {
                    self.$checked(rhs)
                }
            }

            impl<I: Into<BigInt>> $op<I> for FixedWidthInteger {
                type Output = Result<FixedWidthInteger, FwError>;

                fn $fn(self, rhs: I) -> Self::Output {
                    self.$checked(rhs)
                }
            }
        )*
    };
}

// `Div` and `Rem` are the flooring pair
impl_binop!(
    Add add checked_add;
    Sub sub checked_sub;
    Mul mul checked_mul;
    Div div checked_floor_div;
    Rem rem checked_mod;
    BitAnd bitand checked_and;
    BitOr bitor checked_or;
    BitXor bitxor checked_xor;
);

macro_rules! impl_shift {
    ($($op:ident $fn:ident $checked:ident);*;) => {
        $(
            impl $op<usize> for &FixedWidthInteger {
                type Output = Result<FixedWidthInteger, FwError>;

                fn $fn(self, s: usize) -> Self::Output {
                    self.$checked(s)
                }
            }

            impl $op<usize> for FixedWidthInteger {
                type Output = Result<FixedWidthInteger, FwError>;

                fn $fn(self, s: usize) -> Self::Output {
                    self.$checked(s)
                }
            }
        )*
    };
}

impl_shift!(
    Shl shl checked_shl;
    Shr shr checked_shr;
);

macro_rules! impl_unop {
    ($($op:ident $fn:ident $checked:ident);*;) => {
        $(
            impl $op for &FixedWidthInteger {
                type Output = Result<FixedWidthInteger, FwError>;

                fn $fn(self) -> Self::Output {
                    self.$checked()
                }
            }

            impl $op for FixedWidthInteger {
                type Output = Result<FixedWidthInteger, FwError>;

                fn $fn(self) -> Self::Output {
                    self.$checked()
                }
            }
        )*
    };
}

impl_unop!(
    Neg neg checked_neg;
    Not not checked_not;
);

macro_rules! impl_reflected {
    (@floor $t:ty, $($op:ident $fn:ident $floor:ident),*) => {
        $(
            /// Floors `self op rhs` with the bitwidth and signedness of `rhs`
            impl $op<&FixedWidthInteger> for $t {
                type Output = Result<FixedWidthInteger, FwError>;

                fn $fn(self, rhs: &FixedWidthInteger) -> Self::Output {
                    if rhs.value.is_zero() {
                        return Err(DivisionByZero)
                    }
                    rhs.rewrap(BigInt::from(self).$floor(&rhs.value))
                }
            }
        )*
    };
    (@ops $t:ty, $($op:ident $fn:ident $tok:tt),*) => {
        $(
            /// Computes `self op rhs` with the bitwidth and signedness of `rhs`
            impl $op<&FixedWidthInteger> for $t {
                type Output = Result<FixedWidthInteger, FwError>;

                fn $fn(self, rhs: &FixedWidthInteger) -> Self::Output {
                    rhs.rewrap(BigInt::from(self) $tok &rhs.value)
                }
            }
        )*
    };
    ($($t:ty),*) => {
        $(
            impl_reflected!(@ops $t,
                Add add +, Sub sub -, Mul mul *, BitAnd bitand &, BitOr bitor |, BitXor bitxor ^
            );
            impl_reflected!(@floor $t, Div div div_floor, Rem rem mod_floor);
        )*
    };
}

impl_reflected!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, BigInt);

/// Compares the values only, integers with different configurations can be
/// equal
impl PartialEq for FixedWidthInteger {
    fn eq(&self, rhs: &Self) -> bool {
        self.value == rhs.value
    }
}

impl Eq for FixedWidthInteger {}

impl PartialOrd for FixedWidthInteger {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Ord for FixedWidthInteger {
    fn cmp(&self, rhs: &Self) -> Ordering {
        self.value.cmp(&rhs.value)
    }
}

impl Hash for FixedWidthInteger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialEq<BigInt> for FixedWidthInteger {
    fn eq(&self, rhs: &BigInt) -> bool {
        self.value == *rhs
    }
}

impl PartialOrd<BigInt> for FixedWidthInteger {
    fn partial_cmp(&self, rhs: &BigInt) -> Option<Ordering> {
        Some(self.value.cmp(rhs))
    }
}

macro_rules! impl_cmp {
    ($($t:ty)*) => {
        $(
            impl PartialEq<$t> for FixedWidthInteger {
                fn eq(&self, rhs: &$t) -> bool {
                    self.value == BigInt::from(*rhs)
                }
            }

            impl PartialOrd<$t> for FixedWidthInteger {
                fn partial_cmp(&self, rhs: &$t) -> Option<Ordering> {
                    Some(self.value.cmp(&BigInt::from(*rhs)))
                }
            }

            impl PartialEq<FixedWidthInteger> for $t {
                fn eq(&self, rhs: &FixedWidthInteger) -> bool {
                    BigInt::from(*self) == rhs.value
                }
            }

            impl PartialOrd<FixedWidthInteger> for $t {
                fn partial_cmp(&self, rhs: &FixedWidthInteger) -> Option<Ordering> {
                    Some(BigInt::from(*self).cmp(&rhs.value))
                }
            }
        )*
    };
}

impl_cmp!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl From<FixedWidthInteger> for BigInt {
    fn from(x: FixedWidthInteger) -> Self {
        x.value
    }
}

impl From<&FixedWidthInteger> for BigInt {
    fn from(x: &FixedWidthInteger) -> Self {
        x.value.clone()
    }
}

impl ToPrimitive for FixedWidthInteger {
    fn to_i64(&self) -> Option<i64> {
        self.value.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    fn to_i128(&self) -> Option<i128> {
        self.value.to_i128()
    }

    fn to_u128(&self) -> Option<u128> {
        self.value.to_u128()
    }

    fn to_f64(&self) -> Option<f64> {
        self.value.to_f64()
    }
}
