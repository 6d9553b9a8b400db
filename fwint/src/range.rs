use core::{
    num::NonZeroUsize,
    ops::{Range, RangeFrom, RangeFull, RangeTo},
};

use crate::FwError::{self, *};

/// A Python style slice over the bit indices of a
/// [FixedWidthInteger](crate::FixedWidthInteger), used by `get_range` and
/// `set_range`.
///
/// Indices are most significant bit first. `None` bounds take the defaults of
/// the step direction, negative bounds have the bitwidth added once, and a
/// negative step traverses the bits in reverse. Explicit bounds must lie in
/// `-width..=width`, except that a forward traversal cannot start at
/// `width`. The `From` impls for Rust ranges keep their half open
/// meaning, e.g. `2..5` selects indices 2, 3, and 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BitRange {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl BitRange {
    pub const fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// The range over all bits, equivalent to `..`
    pub const fn full() -> Self {
        Self::new(None, None, None)
    }

    /// Returns `self` with the step replaced by `step`
    ///
    /// ```
    /// use fwint::{BitRange, FixedWidthInteger};
    ///
    /// let x = FixedWidthInteger::new(0b0011, 4, false).unwrap();
    /// // reversing all bits
    /// let y = x.get_range(BitRange::full().step(-1)).unwrap();
    /// assert_eq!(y.bit_string(), "1100");
    /// ```
    #[must_use]
    pub const fn step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Normalizes `self` against the bitwidth `w`. This is shared by all
    /// reading and writing range operations.
    ///
    /// # Errors
    ///
    /// `ZeroStep` if the step is zero, `IndexOutOfBounds` if an explicit
    /// bound is outside of `-w..=w` or if an explicit `start` is `w` with a
    /// positive step
    pub fn resolve(&self, w: NonZeroUsize) -> Result<ResolvedRange, FwError> {
        let len = isize::try_from(w.get()).map_err(|_| IndexOutOfBounds)?;
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(ZeroStep)
        }
        // the clamping bounds, a negative step can stop one before the first bit
        let (lower, upper) = if step < 0 {
            (-1, len - 1)
        } else {
            (0, len)
        };
        let normalize = |bound: isize| -> Result<isize, FwError> {
            if (bound < -len) || (bound > len) {
                return Err(IndexOutOfBounds)
            }
            let bound = if bound < 0 { bound + len } else { bound };
            Ok(bound.clamp(lower, upper))
        };
        let start = match self.start {
            // a forward traversal must start at a bit, a reverse one may be clamped
            Some(start) if (step > 0) && (start >= len) => return Err(IndexOutOfBounds),
            Some(start) => normalize(start)?,
            None => {
                if step < 0 {
                    upper
                } else {
                    lower
                }
            }
        };
        let stop = match self.stop {
            Some(stop) => normalize(stop)?,
            None => {
                if step < 0 {
                    lower
                } else {
                    upper
                }
            }
        };
        Ok(ResolvedRange { start, stop, step })
    }
}

impl From<Range<isize>> for BitRange {
    fn from(r: Range<isize>) -> Self {
        Self::new(Some(r.start), Some(r.end), None)
    }
}

impl From<RangeFrom<isize>> for BitRange {
    fn from(r: RangeFrom<isize>) -> Self {
        Self::new(Some(r.start), None, None)
    }
}

impl From<RangeTo<isize>> for BitRange {
    fn from(r: RangeTo<isize>) -> Self {
        Self::new(None, Some(r.end), None)
    }
}

impl From<RangeFull> for BitRange {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

/// A [BitRange] normalized against a bitwidth. Every index it yields is a
/// valid most significant bit first index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedRange {
    start: isize,
    stop: isize,
    step: isize,
}

impl ResolvedRange {
    pub fn start(&self) -> isize {
        self.start
    }

    pub fn stop(&self) -> isize {
        self.stop
    }

    pub fn step(&self) -> isize {
        self.step
    }

    /// The number of selected indices
    pub fn len(&self) -> usize {
        // the bounds lie in `-1..=width`, so this cannot overflow
        let span = if self.step > 0 {
            self.stop - self.start
        } else {
            self.start - self.stop
        };
        if span <= 0 {
            0
        } else {
            (span.unsigned_abs() - 1) / self.step.unsigned_abs() + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the selected indices in traversal order
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let ResolvedRange { start, step, .. } = *self;
        let stride = step.unsigned_abs();
        // `start` is a valid index whenever anything is selected, and every
        // offset is bounded by the bitwidth
        (0..self.len()).map(move |k| {
            let start = start.unsigned_abs();
            if step > 0 {
                start + (k * stride)
            } else {
                start - (k * stride)
            }
        })
    }
}

#[cfg(test)]
fn indices(r: BitRange, w: usize) -> Result<alloc::vec::Vec<usize>, FwError> {
    Ok(r.resolve(NonZeroUsize::new(w).unwrap())?.iter().collect())
}

#[test]
fn python_slice_normalization() {
    use alloc::vec;
    assert_eq!(indices((2..5).into(), 8), Ok(vec![2, 3, 4]));
    assert_eq!(indices((6..8).into(), 8), Ok(vec![6, 7]));
    assert_eq!(indices((-3..).into(), 8), Ok(vec![5, 6, 7]));
    assert_eq!(indices((..-6).into(), 8), Ok(vec![0, 1]));
    assert_eq!(indices((..).into(), 3), Ok(vec![0, 1, 2]));
    assert_eq!(indices(BitRange::full().step(-1), 3), Ok(vec![2, 1, 0]));
    assert_eq!(indices(BitRange::full().step(2), 5), Ok(vec![0, 2, 4]));
    assert_eq!(
        indices(BitRange::new(Some(6), Some(2), Some(-2)), 8),
        Ok(vec![6, 4])
    );
    // `start` past the end is clamped for reverse traversal
    assert_eq!(
        indices(BitRange::new(Some(8), None, Some(-3)), 8),
        Ok(vec![7, 4, 1])
    );
    assert_eq!(indices((5..2).into(), 8), Ok(vec![]));
    assert_eq!(indices((-8..-7).into(), 8), Ok(vec![0]));
}

#[test]
fn range_errors() {
    assert_eq!(indices(BitRange::full().step(0), 8), Err(ZeroStep));
    assert_eq!(indices((9..).into(), 8), Err(IndexOutOfBounds));
    assert_eq!(indices((..9).into(), 8), Err(IndexOutOfBounds));
    assert_eq!(indices((-9..0).into(), 8), Err(IndexOutOfBounds));
    // forward traversals cannot start past the last bit
    assert_eq!(indices((8..).into(), 8), Err(IndexOutOfBounds));
    assert_eq!(indices((8..8).into(), 8), Err(IndexOutOfBounds));
    assert_eq!(
        indices(BitRange::new(Some(8), None, Some(3)), 8),
        Err(IndexOutOfBounds)
    );
    // but the stop bound and reverse starts may be one past
    assert_eq!(indices((7..8).into(), 8), Ok(alloc::vec![7]));
    assert_eq!(
        indices(BitRange::new(Some(8), Some(6), Some(-1)), 8),
        Ok(alloc::vec![7])
    );
}

#[test]
fn extreme_steps() {
    use alloc::vec;
    assert_eq!(indices(BitRange::full().step(isize::MIN), 8), Ok(vec![7]));
    assert_eq!(
        indices(BitRange::new(Some(7), Some(0), Some(isize::MIN)), 8),
        Ok(vec![7])
    );
    assert_eq!(indices(BitRange::full().step(isize::MAX), 8), Ok(vec![0]));
    assert_eq!(
        indices(BitRange::new(Some(-8), None, Some(isize::MAX)), 8),
        Ok(vec![0])
    );
    let w = NonZeroUsize::new(8).unwrap();
    for step in [isize::MIN, isize::MIN + 1, isize::MAX] {
        let r = BitRange::full().step(step).resolve(w).unwrap();
        assert_eq!(r.len(), 1);
        assert!(!r.is_empty());
    }
}

#[test]
fn resolved_len() {
    let w = NonZeroUsize::new(10).unwrap();
    for start in -10..=10 {
        for stop in -10..=10 {
            for step in [-4, -3, -1, 1, 2, 5] {
                let Ok(r) = BitRange::new(Some(start), Some(stop), Some(step)).resolve(w) else {
                    assert!((step > 0) && (start == 10));
                    continue
                };
                // naive traversal of the normalized bounds
                let mut expected = alloc::vec::Vec::new();
                let mut i = r.start();
                while ((step > 0) && (i < r.stop())) || ((step < 0) && (i > r.stop())) {
                    expected.push(i as usize);
                    i += step;
                }
                assert_eq!(r.len(), expected.len());
                assert!(r.iter().eq(expected.into_iter()));
                assert!(r.iter().all(|i| i < 10));
            }
        }
    }
}
