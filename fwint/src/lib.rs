//! Fixed width two's complement integers
//!
//! [FixedWidthInteger] is an integer of a runtime chosen bitwidth that is
//! either signed or unsigned. Its value is always kept inside the range of its
//! configuration, which is checked on every mutation. Arithmetic never wraps:
//! results that do not fit return [FwError::Overflow]. Writes to individual
//! bits do wrap, and reinterpret the raw bit pattern in two's complement when
//! the integer is signed.
//!
//! Bits are addressed most significant bit first. Index 0 is the MSB, index
//! `width - 1` is the LSB, and negative indices count from the end like
//! Python sequences. Ranges of bits use [BitRange], which follows Python slice
//! semantics including steps and reversal.
//!
//! ```
//! use fwint::FixedWidthInteger;
//!
//! let mut x = FixedWidthInteger::new(5, 16, true).unwrap();
//! assert_eq!(x.bit_string(), "0000000000000101");
//! // setting the most significant bit makes the signed value negative
//! x.set_bit(0, true).unwrap();
//! assert_eq!(x, -32763);
//! x.set_bit(-1, false).unwrap();
//! assert_eq!(x, -32764);
//! // the low three bits, as a new signed 3 bit integer
//! let y = x.get_range(-3..).unwrap();
//! assert_eq!(y.bit_string(), "100");
//! assert_eq!(y, -4);
//! // arithmetic constructs new integers of the same configuration
//! assert_eq!((&x + 10).unwrap(), -32754);
//! assert!((&x - 10).is_err());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
// not const and tends to be longer
#![allow(clippy::manual_range_contains)]
// there is always at least one bit
#![allow(clippy::len_without_is_empty)]

extern crate alloc;

mod error;
mod fwi;
mod ops;
#[cfg(feature = "rand_support")]
mod rand;
mod range;
#[cfg(feature = "serde_support")]
mod serde;
mod strings;

pub use error::FwError;
pub use fwi::FixedWidthInteger;
pub use num_bigint::BigInt;
pub use range::{BitRange, ResolvedRange};

pub mod prelude {
    pub use crate::{BigInt, BitRange, FixedWidthInteger, FwError};
}
