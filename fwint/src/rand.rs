use alloc::vec;
use core::num::NonZeroUsize;

use num_bigint::{BigInt, Sign};

use crate::FixedWidthInteger;

/// `rand_support` functions
impl FixedWidthInteger {
    // this is also tested by `testcrate/tests/rand.rs`

    /// Creates a random integer with bitwidth `w` and signedness `signed`
    /// using a `rand_core::RngCore` random number generator. Every raw bit
    /// pattern is equally likely, so signed integers are negative half of the
    /// time.
    ///
    /// ```
    /// // Example using the `rand_xoshiro` crate.
    /// use core::num::NonZeroUsize;
    ///
    /// use fwint::FixedWidthInteger;
    /// use rand_xoshiro::{rand_core::SeedableRng, Xoshiro128StarStar};
    ///
    /// let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    /// let w = NonZeroUsize::new(100).unwrap();
    /// let x = FixedWidthInteger::rand_using(&mut rng, w, false).unwrap();
    /// assert_eq!(x.width(), 100);
    /// assert!(x >= 0);
    /// let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    /// let y = FixedWidthInteger::rand_using(&mut rng, w, false).unwrap();
    /// assert_eq!(x, y);
    /// ```
    pub fn rand_using<R>(
        rng: &mut R,
        w: NonZeroUsize,
        signed: bool,
    ) -> Result<Self, rand_core::Error>
    where
        R: rand_core::RngCore,
    {
        let mut x = Self::zero(w, signed);
        x.rand_assign_using(rng)?;
        Ok(x)
    }

    /// Randomly-assigns `self` using a `rand_core::RngCore` random number
    /// generator, keeping the bitwidth and signedness. This works by calling
    /// `RngCore::try_fill_bytes` on a byte buffer holding the raw bits and
    /// clearing the unused bits. `self` is unchanged if an error is returned.
    pub fn rand_assign_using<R>(&mut self, rng: &mut R) -> Result<(), rand_core::Error>
    where
        R: rand_core::RngCore,
    {
        let w = self.width();
        let mut bytes = vec![0u8; (w + 7) / 8];
        rng.try_fill_bytes(&mut bytes)?;
        let unused = (bytes.len() * 8) - w;
        if let Some(last) = bytes.last_mut() {
            *last &= u8::MAX >> unused;
        }
        let pattern = BigInt::from_bytes_le(Sign::Plus, &bytes);
        *self = Self::from_pattern(pattern, self.w, self.signed);
        Ok(())
    }
}
