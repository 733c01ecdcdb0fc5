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

use num_traits::PrimInt;
use smallvec::SmallVec;
use std::{
    cmp::{max, min},
    iter::FusedIterator,
};

/// A closed interval `[lb, ub]` over the integers, inclusive on both ends.
///
/// This struct represents a contiguous set of integers and supports the
/// exact set-theoretic operations the symbolic-set layer is built on:
/// overlap tests, pairwise merging, union with remainder, disjoint
/// covers, intersection, difference (with the two-piece split), and
/// complement against a universe.
///
/// # Invariants
///
/// An interval with `lb > ub` is *transiently representable*: construction
/// never panics, `is_valid` reports the violation, and every algebraic
/// operation treats an invalid interval as denoting no integers. Callers
/// that want eager rejection should check `is_valid` at their own
/// boundary.
///
/// Two intervals **overlap** only if they share at least one integer:
/// `[1, 4]` and `[5, 6]` touch but do not overlap, and merging keeps them
/// separate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClosedInterval<T>
where
    T: PrimInt,
{
    lb: T,
    ub: T,
}

impl<T> ClosedInterval<T>
where
    T: PrimInt,
{
    /// Creates a new `ClosedInterval` with the given inclusive bounds.
    ///
    /// Never panics; a `lb > ub` interval is stored as-is and reported
    /// by [`ClosedInterval::is_valid`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cantor_core::math::interval::ClosedInterval;
    ///
    /// let iv = ClosedInterval::new(1, 4);
    /// assert!(iv.is_valid());
    /// assert_eq!(iv.count(), 4);
    ///
    /// let bad = ClosedInterval::new(4, 1);
    /// assert!(!bad.is_valid());
    /// assert_eq!(bad.count(), 0);
    /// ```
    #[inline]
    pub fn new(lb: T, ub: T) -> Self {
        Self { lb, ub }
    }

    /// Returns the inclusive lower bound.
    #[inline]
    pub fn lb(&self) -> T {
        self.lb
    }

    /// Returns the inclusive upper bound.
    #[inline]
    pub fn ub(&self) -> T {
        self.ub
    }

    /// Returns `true` if `lb <= ub`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lb <= self.ub
    }

    /// Returns the exact number of integers contained in the interval.
    ///
    /// Computed in widened `i128` arithmetic so that the full machine
    /// integer range (e.g. `[i64::MIN, i64::MAX]`) has an exact count.
    /// An invalid interval counts zero integers.
    #[inline]
    pub fn count(&self) -> u128 {
        if !self.is_valid() {
            return 0;
        }
        let lb = self.lb.to_i128().unwrap_or(i128::MIN);
        let ub = self.ub.to_i128().unwrap_or(i128::MAX);
        (ub - lb + 1) as u128
    }

    /// Returns `true` if `value` lies within `[lb, ub]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cantor_core::math::interval::ClosedInterval;
    ///
    /// let iv = ClosedInterval::new(1, 4);
    /// assert!(iv.contains_point(1));
    /// assert!(iv.contains_point(4));
    /// assert!(!iv.contains_point(5));
    /// ```
    #[inline]
    pub fn contains_point(&self, value: T) -> bool {
        self.lb <= value && value <= self.ub
    }

    /// Returns `true` if this interval and `other` share at least one
    /// integer.
    ///
    /// Touching at an endpoint counts; mere adjacency does not:
    ///
    /// ```rust
    /// # use cantor_core::math::interval::ClosedInterval;
    ///
    /// let a = ClosedInterval::new(1, 4);
    /// assert!(a.overlaps(ClosedInterval::new(4, 6)));
    /// assert!(!a.overlaps(ClosedInterval::new(5, 6)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: Self) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        self.lb <= other.ub && other.lb <= self.ub
    }

    /// Returns `true` if every integer of `other` lies within `self`.
    #[inline]
    pub fn is_superset(&self, other: Self) -> bool {
        if !other.is_valid() {
            return true;
        }
        self.is_valid() && self.lb <= other.lb && other.ub <= self.ub
    }

    /// Merges two *overlapping* intervals into their union.
    ///
    /// Returns `None` when the intervals do not overlap: non-overlapping
    /// operands must remain separate, which is what distinguishes this
    /// from blindly taking the global min/max of the bounds. The four
    /// overlap arrangements are handled case by case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cantor_core::math::interval::ClosedInterval;
    ///
    /// let a = ClosedInterval::new(1, 5);
    /// assert_eq!(a.merge(ClosedInterval::new(4, 8)), Some(ClosedInterval::new(1, 8)));
    /// assert_eq!(a.merge(ClosedInterval::new(7, 9)), None);
    /// ```
    pub fn merge(&self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        if self.lb <= other.lb && other.ub <= self.ub {
            // self contains other entirely
            Some(*self)
        } else if other.lb <= self.lb && self.ub <= other.ub {
            // other contains self entirely
            Some(other)
        } else if self.lb <= other.lb {
            // self starts first, other carries the tail
            Some(Self::new(self.lb, other.ub))
        } else {
            // other starts first, self carries the tail
            Some(Self::new(other.lb, self.ub))
        }
    }

    /// Unions this interval with `others`, merging whatever overlaps.
    ///
    /// Uses a deferred-reduce strategy: repeatedly scan the remaining
    /// operands, absorbing into the accumulator any that overlap it,
    /// until a full pass absorbs nothing further. Operands that never
    /// came to overlap the accumulator are returned as the remainder,
    /// in their original relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cantor_core::math::interval::ClosedInterval;
    ///
    /// let (merged, rest) = ClosedInterval::new(1, 3)
    ///     .union_many(&[ClosedInterval::new(5, 7), ClosedInterval::new(2, 4)]);
    /// assert_eq!(merged, ClosedInterval::new(1, 4));
    /// assert_eq!(rest.as_slice(), &[ClosedInterval::new(5, 7)]);
    /// ```
    pub fn union_many(&self, others: &[Self]) -> (Self, SmallVec<[Self; 4]>) {
        let mut acc = *self;
        let mut pending: SmallVec<[Self; 4]> = others.iter().copied().collect();
        loop {
            let mut absorbed = false;
            let mut rest: SmallVec<[Self; 4]> = SmallVec::new();
            for iv in pending.drain(..) {
                match acc.merge(iv) {
                    Some(m) => {
                        acc = m;
                        absorbed = true;
                    }
                    None => rest.push(iv),
                }
            }
            pending = rest;
            if !absorbed {
                break;
            }
        }
        (acc, pending)
    }

    /// Reduces a list of intervals to a minimal disjoint cover.
    ///
    /// Invalid intervals contribute nothing. The result contains
    /// pairwise non-overlapping intervals whose union is the union of
    /// the inputs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cantor_core::math::interval::ClosedInterval;
    ///
    /// let cover = ClosedInterval::disjoint_cover(&[
    ///     ClosedInterval::new(1, 3),
    ///     ClosedInterval::new(6, 9),
    ///     ClosedInterval::new(5, 7),
    /// ]);
    /// assert_eq!(cover, vec![ClosedInterval::new(1, 3), ClosedInterval::new(5, 9)]);
    /// ```
    pub fn disjoint_cover(intervals: &[Self]) -> Vec<Self> {
        let mut rest: Vec<Self> = intervals.iter().copied().filter(Self::is_valid_ref).collect();
        let mut cover = Vec::new();
        while !rest.is_empty() {
            let first = rest.remove(0);
            let (merged, remainder) = first.union_many(&rest);
            cover.push(merged);
            rest = remainder.into_vec();
        }
        cover
    }

    #[inline]
    fn is_valid_ref(iv: &Self) -> bool {
        iv.is_valid()
    }

    /// Intersects two intervals.
    ///
    /// Returns `None` when they do not overlap; otherwise the result is
    /// `[max(lb), min(ub)]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cantor_core::math::interval::ClosedInterval;
    ///
    /// let a = ClosedInterval::new(1, 6);
    /// assert_eq!(a.intersect(ClosedInterval::new(4, 9)), Some(ClosedInterval::new(4, 6)));
    /// assert_eq!(a.intersect(ClosedInterval::new(7, 9)), None);
    /// ```
    #[inline]
    pub fn intersect(&self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self::new(max(self.lb, other.lb), min(self.ub, other.ub)))
    }

    /// Intersects this interval with every interval in `others`.
    ///
    /// Pairwise reduction with absorption: as soon as one step yields no
    /// overlap the whole intersection is `None`.
    pub fn intersect_many(&self, others: &[Self]) -> Option<Self> {
        let mut acc = *self;
        for iv in others {
            acc = acc.intersect(*iv)?;
        }
        Some(acc)
    }

    /// Calculates the set difference `self - other`.
    ///
    /// # Returns
    ///
    /// A small vector containing:
    /// * 0 intervals: `other` fully covers `self`.
    /// * 1 interval: `other` is disjoint from `self` (returned
    ///   unchanged) or clips one side of it.
    /// * 2 intervals: `other` is strictly inside `self`, splitting it
    ///   into `[lb, other.lb - 1]` and `[other.ub + 1, ub]`.
    ///
    /// Callers must handle the split case; the union remainder logic in
    /// the set-operator layer depends on it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cantor_core::math::interval::ClosedInterval;
    ///
    /// let a = ClosedInterval::new(1, 4);
    /// let split = a.difference(ClosedInterval::new(2, 3));
    /// assert_eq!(split.as_slice(), &[ClosedInterval::new(1, 1), ClosedInterval::new(4, 4)]);
    ///
    /// assert!(ClosedInterval::new(2, 3).difference(ClosedInterval::new(1, 4)).is_empty());
    /// ```
    pub fn difference(&self, other: Self) -> SmallVec<[Self; 2]> {
        if !self.is_valid() {
            return SmallVec::new();
        }
        if !self.overlaps(other) {
            return smallvec::smallvec![*self];
        }
        let mut pieces = SmallVec::new();
        if self.lb < other.lb {
            pieces.push(Self::new(self.lb, other.lb - T::one()));
        }
        if other.ub < self.ub {
            pieces.push(Self::new(other.ub + T::one(), self.ub));
        }
        pieces
    }

    /// Calculates the complement of `self` within `universe`, defined as
    /// `universe.difference(self)`.
    #[inline]
    pub fn complement(&self, universe: Self) -> SmallVec<[Self; 2]> {
        universe.difference(*self)
    }

    /// Creates an ascending iterator over the integers in the interval.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cantor_core::math::interval::ClosedInterval;
    ///
    /// let points: Vec<_> = ClosedInterval::new(1, 4).iter().collect();
    /// assert_eq!(points, vec![1, 2, 3, 4]);
    /// ```
    #[inline]
    pub fn iter(&self) -> ClosedIntervalIter<T> {
        ClosedIntervalIter {
            current: self.lb,
            ub: self.ub,
            exhausted: !self.is_valid(),
        }
    }
}

/// An iterator over the integer points of a `ClosedInterval`.
///
/// Handles the inclusive upper bound without overflowing at
/// `T::max_value()`.
#[derive(Debug, Clone)]
pub struct ClosedIntervalIter<T>
where
    T: PrimInt,
{
    current: T,
    ub: T,
    exhausted: bool,
}

impl<T> Iterator for ClosedIntervalIter<T>
where
    T: PrimInt,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let value = self.current;
        if self.current == self.ub {
            self.exhausted = true;
        } else {
            self.current = self.current + T::one();
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let remaining = ClosedInterval::new(self.current, self.ub).count();
        if remaining <= usize::MAX as u128 {
            (remaining as usize, Some(remaining as usize))
        } else {
            (usize::MAX, None)
        }
    }
}

impl<T> FusedIterator for ClosedIntervalIter<T> where T: PrimInt {}

impl<T> IntoIterator for ClosedInterval<T>
where
    T: PrimInt,
{
    type Item = T;
    type IntoIter = ClosedIntervalIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> std::fmt::Debug for ClosedInterval<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosedInterval")
            .field("lb", &self.lb)
            .field("ub", &self.ub)
            .finish()
    }
}

impl<T> std::fmt::Display for ClosedInterval<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lb, self.ub)
    }
}
