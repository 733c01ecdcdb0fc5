// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Range Leaves
//!
//! `IntRange` denotes a closed interval of machine integers; `CharRange`
//! denotes a closed interval of character ordinals, converting between
//! characters and ordinals only at the membership/sampling/enumeration
//! boundary. Both delegate every algebraic operation to the exact
//! interval arithmetic in `cantor-core`.
//!
//! Bounds with `lb > ub` are transiently representable; `validate`
//! reports them. This mirrors the record contract of the surrounding
//! system, where invalid field states surface at validation time rather
//! than at construction.

use crate::error::SetError;
use cantor_core::{math::interval::ClosedInterval, value::Value};
use smallvec::SmallVec;

/// The inclusive ordinal bounds of the printable-ASCII universe.
pub const PRINTABLE_ASCII: (u32, u32) = (0x20, 0x7E);

/// A closed interval `[lb, ub]` of machine integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    interval: ClosedInterval<i64>,
}

impl IntRange {
    /// Creates a new `IntRange`; `lb > ub` is reported by `validate`,
    /// not rejected here.
    #[inline]
    pub fn new(lb: i64, ub: i64) -> Self {
        Self {
            interval: ClosedInterval::new(lb, ub),
        }
    }

    /// The default universe of an integer range: the full machine
    /// integer range.
    #[inline]
    pub fn universe() -> Self {
        Self::new(i64::MIN, i64::MAX)
    }

    /// Returns the inclusive lower bound.
    #[inline]
    pub fn lb(&self) -> i64 {
        self.interval.lb()
    }

    /// Returns the inclusive upper bound.
    #[inline]
    pub fn ub(&self) -> i64 {
        self.interval.ub()
    }

    /// The underlying interval.
    #[inline]
    pub fn interval(&self) -> ClosedInterval<i64> {
        self.interval
    }

    /// Checks the `lb <= ub` invariant.
    pub fn validate(&self) -> Result<(), SetError> {
        if self.interval.is_valid() {
            Ok(())
        } else {
            Err(SetError::InvalidBounds {
                lb: self.lb(),
                ub: self.ub(),
            })
        }
    }

    /// The exact number of integers denoted.
    #[inline]
    pub fn count(&self) -> u128 {
        self.interval.count()
    }

    /// Returns `true` if `value` lies within the range.
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.interval.contains_point(value)
    }

    /// Returns `true` if the two ranges share at least one integer.
    #[inline]
    pub fn overlaps(&self, other: IntRange) -> bool {
        self.interval.overlaps(other.interval)
    }

    /// Unions this range with `others`, merging whatever overlaps; the
    /// unmerged operands come back as the remainder.
    pub fn union(&self, others: &[IntRange]) -> (IntRange, Vec<IntRange>) {
        let operands: Vec<ClosedInterval<i64>> = others.iter().map(|r| r.interval).collect();
        let (merged, rest) = self.interval.union_many(&operands);
        (
            IntRange { interval: merged },
            rest.into_iter().map(|interval| IntRange { interval }).collect(),
        )
    }

    /// Intersects this range with `others`; `None` means no shared
    /// integer remains.
    pub fn intersection(&self, others: &[IntRange]) -> Option<IntRange> {
        let operands: Vec<ClosedInterval<i64>> = others.iter().map(|r| r.interval).collect();
        self.interval
            .intersect_many(&operands)
            .map(|interval| IntRange { interval })
    }

    /// The set difference `self - other`: zero, one, or two pieces.
    pub fn difference(&self, other: IntRange) -> SmallVec<[IntRange; 2]> {
        self.interval
            .difference(other.interval)
            .into_iter()
            .map(|interval| IntRange { interval })
            .collect()
    }

    /// The complement of `self` within `universe`.
    pub fn complement(&self, universe: IntRange) -> SmallVec<[IntRange; 2]> {
        self.interval
            .complement(universe.interval)
            .into_iter()
            .map(|interval| IntRange { interval })
            .collect()
    }

    /// Ascending iteration over the denoted integers as values.
    pub fn points(&self) -> impl Iterator<Item = Value> {
        self.interval.iter().map(Value::Int)
    }
}

impl std::fmt::Display for IntRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.interval)
    }
}

/// A closed interval of character ordinals.
///
/// Bounds are stored as ordinals; characters convert to ordinals at
/// construction and back to characters only when values cross the
/// membership/sampling/enumeration boundary. Ordinals that do not map
/// to valid characters (the surrogate gap) are skipped at that
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharRange {
    interval: ClosedInterval<u32>,
}

impl CharRange {
    /// Creates a new `CharRange` from inclusive character bounds.
    #[inline]
    pub fn new(lb: char, ub: char) -> Self {
        Self::from_ordinals(lb as u32, ub as u32)
    }

    /// Creates a new `CharRange` from inclusive ordinal bounds.
    #[inline]
    pub fn from_ordinals(lb: u32, ub: u32) -> Self {
        Self {
            interval: ClosedInterval::new(lb, ub),
        }
    }

    /// The default universe of a character range: printable ASCII.
    #[inline]
    pub fn universe() -> Self {
        Self::from_ordinals(PRINTABLE_ASCII.0, PRINTABLE_ASCII.1)
    }

    /// The underlying ordinal interval.
    #[inline]
    pub fn interval(&self) -> ClosedInterval<u32> {
        self.interval
    }

    /// Checks the `lb <= ub` invariant.
    pub fn validate(&self) -> Result<(), SetError> {
        if self.interval.is_valid() {
            Ok(())
        } else {
            Err(SetError::InvalidBounds {
                lb: self.interval.lb() as i64,
                ub: self.interval.ub() as i64,
            })
        }
    }

    /// The number of ordinals denoted.
    #[inline]
    pub fn count(&self) -> u128 {
        self.interval.count()
    }

    /// Returns `true` if the ordinal of `value` lies within the range.
    #[inline]
    pub fn contains(&self, value: char) -> bool {
        self.interval.contains_point(value as u32)
    }

    /// Returns `true` if the two ranges share at least one ordinal.
    #[inline]
    pub fn overlaps(&self, other: CharRange) -> bool {
        self.interval.overlaps(other.interval)
    }

    /// Ascending iteration over the denoted characters as values.
    pub fn chars(&self) -> impl Iterator<Item = Value> {
        self.interval.iter().filter_map(char::from_u32).map(Value::Char)
    }
}

impl std::fmt::Display for CharRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (
            char::from_u32(self.interval.lb()),
            char::from_u32(self.interval.ub()),
        ) {
            (Some(lb), Some(ub)) => write!(f, "[{:?}, {:?}]", lb, ub),
            _ => write!(f, "[#{}, #{}]", self.interval.lb(), self.interval.ub()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_range_validate() {
        assert!(IntRange::new(1, 4).validate().is_ok());
        assert_eq!(
            IntRange::new(4, 1).validate(),
            Err(SetError::InvalidBounds { lb: 4, ub: 1 })
        );
    }

    #[test]
    fn test_int_range_union_with_remainder() {
        let (merged, rest) = IntRange::new(1, 3).union(&[
            IntRange::new(5, 7),
            IntRange::new(2, 4),
        ]);
        assert_eq!(merged, IntRange::new(1, 4));
        assert_eq!(rest, vec![IntRange::new(5, 7)]);
    }

    #[test]
    fn test_int_range_difference_split() {
        let pieces = IntRange::new(1, 4).difference(IntRange::new(2, 3));
        assert_eq!(
            pieces.as_slice(),
            &[IntRange::new(1, 1), IntRange::new(4, 4)]
        );
        assert!(IntRange::new(2, 3)
            .difference(IntRange::new(1, 4))
            .is_empty());
    }

    #[test]
    fn test_int_range_complement_against_universe() {
        let pieces = IntRange::new(0, 10).complement(IntRange::universe());
        assert_eq!(
            pieces.as_slice(),
            &[
                IntRange::new(i64::MIN, -1),
                IntRange::new(11, i64::MAX),
            ]
        );
    }

    #[test]
    fn test_char_range_boundary_conversion() {
        let r = CharRange::new('a', 'd');
        assert!(r.contains('a'));
        assert!(r.contains('d'));
        assert!(!r.contains('e'));
        let chars: Vec<Value> = r.chars().collect();
        assert_eq!(
            chars,
            vec![
                Value::Char('a'),
                Value::Char('b'),
                Value::Char('c'),
                Value::Char('d')
            ]
        );
    }

    #[test]
    fn test_char_range_universe_is_printable_ascii() {
        let u = CharRange::universe();
        assert!(u.contains(' '));
        assert!(u.contains('~'));
        assert!(!u.contains('\n'));
        assert_eq!(u.count(), 95);
    }
}
