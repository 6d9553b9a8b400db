//! Compares `FixedWidthInteger` against a reference model on `i128` for
//! bitwidths up to 64

use std::num::NonZeroUsize;

use fwint::{BigInt, FixedWidthInteger, FwError};
use num_traits::ToPrimitive;
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};

const N: u32 = if cfg!(miri) {
    32
} else if cfg!(debug_assertions) {
    10_000
} else {
    200_000
};

fn fits(x: i128, w: usize, signed: bool) -> bool {
    let (min, max) = if signed {
        (-(1i128 << (w - 1)), (1i128 << (w - 1)) - 1)
    } else {
        (0, (1i128 << w) - 1)
    };
    (x >= min) && (x <= max)
}

fn floor_div(x: i128, y: i128) -> i128 {
    let q = x / y;
    if ((x % y) != 0) && ((x < 0) != (y < 0)) {
        q - 1
    } else {
        q
    }
}

/// Checks `res` against the reference result `expected`, where `None` means
/// that the reference overflowed
fn check(
    op: &str,
    res: Result<FixedWidthInteger, FwError>,
    expected: Option<i128>,
    w: usize,
    signed: bool,
) {
    match expected {
        Some(e) if fits(e, w, signed) => {
            let res = res.unwrap_or_else(|e| panic!("{op}: unexpected {e}"));
            assert_eq!(res.to_i128(), Some(e), "{op}");
            assert_eq!(res.width(), w, "{op}");
            assert_eq!(res.is_signed(), signed, "{op}");
        }
        _ => assert_eq!(res, Err(FwError::Overflow), "{op}: expected overflow"),
    }
}

struct Fuzzer {
    rng: Xoshiro128StarStar,
}

impl Fuzzer {
    fn index(&mut self, n: usize) -> usize {
        (self.rng.next_u32() as usize) % n
    }

    fn bit(&mut self) -> bool {
        (self.rng.next_u32() & 1) != 0
    }

    /// A random integer of random configuration, biased towards small values
    /// and the edges of the range
    fn fwi(&mut self) -> FixedWidthInteger {
        let w = NonZeroUsize::new(1 + self.index(64)).unwrap();
        let signed = self.bit();
        match self.index(4) {
            0 => FixedWidthInteger::new(FixedWidthInteger::min_value(w, signed), w.get(), signed)
                .unwrap(),
            1 => FixedWidthInteger::new(FixedWidthInteger::max_value(w, signed), w.get(), signed)
                .unwrap(),
            2 => {
                let small = (self.index(7) as i64) - 3;
                FixedWidthInteger::new(small, w.get(), signed)
                    .unwrap_or_else(|_| FixedWidthInteger::zero(w, signed))
            }
            _ => FixedWidthInteger::rand_using(&mut self.rng, w, signed).unwrap(),
        }
    }
}

fn value(x: &FixedWidthInteger) -> i128 {
    x.to_i128().unwrap()
}

#[test]
fn fuzz_arithmetic() {
    let mut fuzz = Fuzzer {
        rng: Xoshiro128StarStar::seed_from_u64(0),
    };
    for _ in 0..N {
        let x = fuzz.fwi();
        let y = value(&fuzz.fwi());
        let (w, signed) = (x.width(), x.is_signed());
        let a = value(&x);
        assert!(fits(a, w, signed));

        check("add", x.checked_add(y), a.checked_add(y), w, signed);
        check("sub", x.checked_sub(y), a.checked_sub(y), w, signed);
        check("mul", x.checked_mul(y), a.checked_mul(y), w, signed);
        check("rsub", y - &x, y.checked_sub(a), w, signed);
        if a == 0 {
            assert_eq!(y / &x, Err(FwError::DivisionByZero));
            assert_eq!(y % &x, Err(FwError::DivisionByZero));
        } else {
            let q = floor_div(y, a);
            check("rfloor_div", y / &x, Some(q), w, signed);
            check("rmod", y % &x, Some(y - (q * a)), w, signed);
        }
        if y == 0 {
            assert_eq!(x.checked_floor_div(y), Err(FwError::DivisionByZero));
            assert_eq!(x.checked_true_div(y), Err(FwError::DivisionByZero));
            assert_eq!(x.checked_mod(y), Err(FwError::DivisionByZero));
        } else {
            let q = floor_div(a, y);
            check("floor_div", x.checked_floor_div(y), Some(q), w, signed);
            check("true_div", x.checked_true_div(y), Some(a / y), w, signed);
            check("mod", x.checked_mod(y), Some(a - (q * y)), w, signed);
        }
        check("and", x.checked_and(y), Some(a & y), w, signed);
        check("or", x.checked_or(y), Some(a | y), w, signed);
        check("xor", x.checked_xor(y), Some(a ^ y), w, signed);
        check("neg", x.checked_neg(), Some(-a), w, signed);
        check("abs", x.checked_abs(), Some(a.abs()), w, signed);
        check("not", x.checked_not(), Some(!a), w, signed);

        let s = fuzz.index(80);
        let shl = if a == 0 {
            Some(0)
        } else if s >= w {
            None
        } else {
            a.checked_mul(1i128 << s)
        };
        check("shl", x.checked_shl(s), shl, w, signed);
        check("shr", x.checked_shr(s), Some(a >> s), w, signed);

        let e = fuzz.index(10) as u32;
        check("pow", x.checked_pow(e), a.checked_pow(e), w, signed);

        // comparisons only look at values
        assert_eq!(x < BigInt::from(y), a < y);
        assert_eq!(x == BigInt::from(y), a == y);
    }
}

#[test]
fn fuzz_bits() {
    let mut fuzz = Fuzzer {
        rng: Xoshiro128StarStar::seed_from_u64(1),
    };
    for _ in 0..N {
        let x = fuzz.fwi();
        let (w, signed) = (x.width(), x.is_signed());
        let a = value(&x);
        let pattern = if a < 0 { a + (1i128 << w) } else { a };

        let s = x.bit_string();
        assert_eq!(s.len(), w);
        assert_eq!(i128::from_str_radix(&s, 2).unwrap(), pattern);
        assert_eq!(FixedWidthInteger::from_bit_string(&s, signed).unwrap(), x);
        assert_eq!(x.debug_string().parse::<FixedWidthInteger>().unwrap(), x);

        // single bits
        let i = fuzz.index(w);
        let bit = ((pattern >> (w - 1 - i)) & 1) != 0;
        assert_eq!(x.get_bit(i as isize), Ok(bit));
        assert_eq!(x.get_bit((i as isize) - (w as isize)), Ok(bit));
        let mut y = x.clone();
        y.set_bit(i as isize, !bit).unwrap();
        assert!(fits(value(&y), w, signed));
        assert_eq!(y.bit_string().chars().nth(i), Some(if bit { '0' } else { '1' }));
        y.set_bit(i as isize, bit).unwrap();
        assert_eq!(y, x);

        // contiguous ranges match substrings of the bit string
        let start = fuzz.index(w);
        let stop = start + 1 + fuzz.index(w - start);
        let r = x.get_range((start as isize)..(stop as isize)).unwrap();
        assert_eq!(r.bit_string(), s[start..stop]);
        assert!(r.is_signed());
        let reversed: String = s.chars().rev().collect();
        let r = x.get_range(fwint::BitRange::full().step(-1)).unwrap();
        assert_eq!(r.bit_string(), reversed);

        // bitwidth changes reinterpret the pattern
        let w1 = 1 + fuzz.index(64);
        let mut y = x.clone();
        if fits(pattern, w1, signed) {
            y.set_width(w1).unwrap();
            assert_eq!(value(&y), pattern);
            assert_eq!(y.width(), w1);
        } else {
            assert_eq!(y.set_width(w1), Err(FwError::Overflow));
            assert_eq!(y, x);
            assert_eq!(y.width(), w);
        }

        let mut y = x.clone();
        if fits(a, w, !signed) {
            y.set_signed(!signed).unwrap();
            assert_eq!(y, x);
        } else {
            assert_eq!(y.set_signed(!signed), Err(FwError::Overflow));
            assert_eq!(y.is_signed(), signed);
        }

        let mut y = x.clone();
        let b = fuzz.bit();
        y.append(b);
        assert_eq!(y.width(), w + 1);
        assert_eq!(y.bit_string(), format!("{s}{}", b as u8));
        let mut y = x.clone();
        y.prepend(b);
        assert_eq!(y.width(), w + 1);
        assert_eq!(y.bit_string(), format!("{}{s}", b as u8));
    }
}
