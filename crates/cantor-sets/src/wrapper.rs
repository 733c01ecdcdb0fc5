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

//! # Explicit Finite Sets
//!
//! `SetWrapper` wraps one concrete finite set of values. Its algebra is
//! deliberately closed over wrappers: combining a wrapper with a range,
//! type, or operator node is the burden of the operator layer, and the
//! signatures here make the misuse unrepresentable.

use cantor_core::value::Value;
use rustc_hash::FxHashSet;

/// An explicit finite set of values.
///
/// Invariant: `len()` is exactly the number of distinct wrapped values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetWrapper {
    values: FxHashSet<Value>,
}

impl SetWrapper {
    /// Creates an empty wrapper.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of wrapped values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the wrapper holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if `value` is a member.
    #[inline]
    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(value)
    }

    /// Read access to the wrapped values.
    #[inline]
    pub fn values(&self) -> &FxHashSet<Value> {
        &self.values
    }

    /// Iterates over the wrapped values in no particular order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Unions this wrapper with the given wrappers.
    pub fn union(&self, others: &[&SetWrapper]) -> SetWrapper {
        let mut values = self.values.clone();
        for other in others {
            values.extend(other.values.iter().cloned());
        }
        SetWrapper { values }
    }

    /// Intersects this wrapper with the given wrappers.
    pub fn intersection(&self, others: &[&SetWrapper]) -> SetWrapper {
        let values = self
            .values
            .iter()
            .filter(|v| others.iter().all(|o| o.contains(v)))
            .cloned()
            .collect();
        SetWrapper { values }
    }

    /// Returns the values of this wrapper absent from `other`.
    pub fn difference(&self, other: &SetWrapper) -> SetWrapper {
        let values = self
            .values
            .iter()
            .filter(|v| !other.contains(v))
            .cloned()
            .collect();
        SetWrapper { values }
    }

    /// Returns `true` if the two wrappers share at least one value.
    pub fn overlaps(&self, other: &SetWrapper) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.values.iter().any(|v| large.contains(v))
    }

    /// Returns `true` if every value of `other` is a member of `self`.
    pub fn is_superset(&self, other: &SetWrapper) -> bool {
        other.values.iter().all(|v| self.contains(v))
    }
}

impl FromIterator<Value> for SetWrapper {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        SetWrapper {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<FxHashSet<Value>> for SetWrapper {
    fn from(values: FxHashSet<Value>) -> Self {
        SetWrapper { values }
    }
}

impl From<Vec<Value>> for SetWrapper {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}
