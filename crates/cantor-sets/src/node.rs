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

//! # The Symbolic Set Tree
//!
//! `SetNode` is the sum type over every symbolic set representation:
//! the leaves (`Empty`, explicit wrappers, integer and character
//! ranges, type-denoted and class-denoted sets) and the operator nodes
//! that combine them. Operator arity is fixed at construction:
//! `Difference` and `Complement` by their constructor signatures,
//! `Union`/`Intersection` (at least two children) and `Product` (at
//! least one) by eager assertion, since a malformed tree is a
//! programmer error rather than a runtime condition.
//!
//! Nodes are never mutated after construction and are value-compared,
//! so trees may be shared freely as read-only data.

use crate::{
    error::SetError,
    range::{CharRange, IntRange},
    types::{ClassHierarchy, ClassWrapper, TypeDomain, TypeWrapper},
    wrapper::SetWrapper,
};
use cantor_core::value::Value;
use std::sync::Arc;

/// A lazy stream of set elements.
pub type ValueIter<'a> = Box<dyn Iterator<Item = Value> + 'a>;

/// The exact cardinality of a symbolic set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// An exact finite count.
    Finite(u128),
    /// A conceptually infinite set (type-denoted, or a union
    /// containing one).
    Infinite,
}

impl Cardinality {
    /// Returns `true` for a finite cardinality.
    #[inline]
    pub fn is_finite(&self) -> bool {
        matches!(self, Cardinality::Finite(_))
    }

    /// The finite count, if any.
    #[inline]
    pub fn finite(&self) -> Option<u128> {
        match self {
            Cardinality::Finite(n) => Some(*n),
            Cardinality::Infinite => None,
        }
    }

    /// Multiplies two cardinalities; products beyond `u128` saturate to
    /// `Infinite`.
    pub fn product(self, other: Cardinality) -> Cardinality {
        match (self, other) {
            (Cardinality::Finite(a), Cardinality::Finite(b)) => a
                .checked_mul(b)
                .map(Cardinality::Finite)
                .unwrap_or(Cardinality::Infinite),
            _ => Cardinality::Infinite,
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cardinality::Finite(n) => write!(f, "{}", n),
            Cardinality::Infinite => write!(f, "inf"),
        }
    }
}

/// A node in the symbolic-set expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SetNode {
    /// The canonical empty set: absorbed by union, annihilating under
    /// intersection.
    Empty,
    /// An explicit finite set.
    Wrapper(SetWrapper),
    /// A closed interval of machine integers.
    IntRange(IntRange),
    /// A closed interval of character ordinals.
    CharRange(CharRange),
    /// The implicit infinite set of a type's instances.
    Type(TypeWrapper),
    /// A class and its transitive subclasses.
    Class(ClassWrapper),
    /// Set union over at least two children.
    Union(Vec<SetNode>),
    /// Set intersection over at least two children.
    Intersection(Vec<SetNode>),
    /// Set difference, exactly two operands.
    Difference(Box<SetNode>, Box<SetNode>),
    /// Set complement of exactly one operand, relative to a universe
    /// resolved at evaluation time.
    Complement(Box<SetNode>),
    /// Named Cartesian product over at least one child; elements are
    /// tuples with one component per child, in order.
    Product(Vec<SetNode>),
}

impl SetNode {
    /// The canonical empty set.
    #[inline]
    pub fn empty() -> Self {
        SetNode::Empty
    }

    /// Wraps an explicit collection of values.
    pub fn wrapper<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        SetNode::Wrapper(values.into_iter().map(Into::into).collect())
    }

    /// A closed integer range `[lb, ub]`.
    #[inline]
    pub fn int_range(lb: i64, ub: i64) -> Self {
        SetNode::IntRange(IntRange::new(lb, ub))
    }

    /// A closed character range `[lb, ub]`.
    #[inline]
    pub fn char_range(lb: char, ub: char) -> Self {
        SetNode::CharRange(CharRange::new(lb, ub))
    }

    /// The set of all instances of the given type strategy.
    #[inline]
    pub fn type_of(domain: Arc<dyn TypeDomain>) -> Self {
        SetNode::Type(TypeWrapper::new(domain))
    }

    /// The set of `class` and its transitive subclasses.
    pub fn class_of(hierarchy: &ClassHierarchy, class: &str) -> Result<Self, SetError> {
        Ok(SetNode::Class(ClassWrapper::new(hierarchy, class)?))
    }

    /// Union over the given children.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two children are supplied.
    pub fn union(children: Vec<SetNode>) -> Self {
        assert!(
            children.len() >= 2,
            "Union requires at least two children, got {}",
            children.len()
        );
        SetNode::Union(children)
    }

    /// Intersection over the given children.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two children are supplied.
    pub fn intersection(children: Vec<SetNode>) -> Self {
        assert!(
            children.len() >= 2,
            "Intersection requires at least two children, got {}",
            children.len()
        );
        SetNode::Intersection(children)
    }

    /// The set difference `a - b`.
    #[inline]
    pub fn difference(a: SetNode, b: SetNode) -> Self {
        SetNode::Difference(Box::new(a), Box::new(b))
    }

    /// The complement of `a`, relative to a universe resolved at
    /// evaluation time.
    #[inline]
    pub fn complement(a: SetNode) -> Self {
        SetNode::Complement(Box::new(a))
    }

    /// Cartesian product over the given children.
    ///
    /// # Panics
    ///
    /// Panics if no children are supplied.
    pub fn product(children: Vec<SetNode>) -> Self {
        assert!(
            !children.is_empty(),
            "Product requires at least one child"
        );
        SetNode::Product(children)
    }

    /// Returns `true` if `value` is a member of the denoted set.
    pub fn contains(&self, value: &Value) -> bool {
        match self {
            SetNode::Empty => false,
            SetNode::Wrapper(w) => w.contains(value),
            SetNode::IntRange(r) => value.as_int().is_some_and(|i| r.contains(i)),
            SetNode::CharRange(r) => value.as_char().is_some_and(|c| r.contains(c)),
            SetNode::Type(t) => t.query(value),
            SetNode::Class(c) => c.contains(value),
            SetNode::Union(children) => children.iter().any(|c| c.contains(value)),
            SetNode::Intersection(children) => children.iter().all(|c| c.contains(value)),
            SetNode::Difference(a, b) => a.contains(value) && !b.contains(value),
            SetNode::Complement(a) => !a.contains(value),
            SetNode::Product(children) => match value {
                Value::Tuple(items) if items.len() == children.len() => items
                    .iter()
                    .zip(children.iter())
                    .all(|(item, child)| child.contains(item)),
                _ => false,
            },
        }
    }

    /// The exact cardinality of the denoted set.
    ///
    /// Leaves and products have closed forms; the remaining composite
    /// shapes are materialized under default caps, so a composite
    /// reported as `Finite(n)` with `n` at the default enumeration cap
    /// may in truth be larger.
    pub fn size(&self) -> Result<Cardinality, SetError> {
        match self {
            SetNode::Empty => Ok(Cardinality::Finite(0)),
            SetNode::Wrapper(w) => Ok(Cardinality::Finite(w.len() as u128)),
            SetNode::IntRange(r) => Ok(Cardinality::Finite(r.count())),
            SetNode::CharRange(r) => Ok(Cardinality::Finite(r.count())),
            SetNode::Type(_) => Ok(Cardinality::Infinite),
            SetNode::Class(c) => Ok(Cardinality::Finite(c.members().len() as u128)),
            SetNode::Union(children) => {
                for child in children {
                    if matches!(child.size()?, Cardinality::Infinite) {
                        return Ok(Cardinality::Infinite);
                    }
                }
                let set = self.to_set(&crate::args::EvalArgs::default())?;
                Ok(Cardinality::Finite(set.len() as u128))
            }
            SetNode::Product(children) => {
                let mut acc = Cardinality::Finite(1);
                for child in children {
                    acc = acc.product(child.size()?);
                }
                Ok(acc)
            }
            SetNode::Intersection(_) | SetNode::Difference(_, _) | SetNode::Complement(_) => {
                let set = self.to_set(&crate::args::EvalArgs::default())?;
                Ok(Cardinality::Finite(set.len() as u128))
            }
        }
    }

    /// Lower and upper cardinality bounds; currently always exact.
    pub fn size_limits(&self) -> Result<(Cardinality, Cardinality), SetError> {
        let size = self.size()?;
        Ok((size, size))
    }

    /// Recursively checks structural validity (range bounds).
    pub fn validate(&self) -> Result<(), SetError> {
        match self {
            SetNode::Empty
            | SetNode::Wrapper(_)
            | SetNode::Type(_)
            | SetNode::Class(_) => Ok(()),
            SetNode::IntRange(r) => r.validate(),
            SetNode::CharRange(r) => r.validate(),
            SetNode::Union(children)
            | SetNode::Intersection(children)
            | SetNode::Product(children) => {
                children.iter().try_for_each(SetNode::validate)
            }
            SetNode::Difference(a, b) => {
                a.validate()?;
                b.validate()
            }
            SetNode::Complement(a) => a.validate(),
        }
    }

    /// The universe a complement of this node falls back to when no
    /// explicit universe is supplied: the full machine-integer range
    /// for integer ranges, printable ASCII for character ranges, and
    /// nothing for every other shape.
    pub fn default_universe(&self) -> Option<SetNode> {
        match self {
            SetNode::IntRange(_) => Some(SetNode::IntRange(IntRange::universe())),
            SetNode::CharRange(_) => Some(SetNode::CharRange(CharRange::universe())),
            _ => None,
        }
    }

    /// Structurally decidable emptiness. Conservative: filtering
    /// operators (`Intersection`, `Difference`, `Complement`) and
    /// type-denoted sets are never reported empty.
    pub fn is_known_empty(&self) -> bool {
        match self {
            SetNode::Empty => true,
            SetNode::Wrapper(w) => w.is_empty(),
            SetNode::IntRange(r) => r.validate().is_err(),
            SetNode::CharRange(r) => r.validate().is_err(),
            SetNode::Type(_) => false,
            SetNode::Class(c) => c.members().is_empty(),
            SetNode::Union(children) => children.iter().all(SetNode::is_known_empty),
            SetNode::Product(children) => children.iter().any(SetNode::is_known_empty),
            SetNode::Intersection(_) | SetNode::Difference(_, _) | SetNode::Complement(_) => false,
        }
    }

    /// Returns `true` if the two sets share at least one element.
    ///
    /// Exact for empty, range/range, and wrapper-vs-anything
    /// combinations; other shapes fall back to a bounded enumeration
    /// probe under default caps.
    pub fn overlaps(&self, other: &SetNode) -> bool {
        match (self, other) {
            (SetNode::Empty, _) | (_, SetNode::Empty) => false,
            (SetNode::IntRange(a), SetNode::IntRange(b)) => a.overlaps(*b),
            (SetNode::CharRange(a), SetNode::CharRange(b)) => a.overlaps(*b),
            (SetNode::IntRange(_), SetNode::CharRange(_))
            | (SetNode::CharRange(_), SetNode::IntRange(_)) => false,
            (SetNode::Wrapper(w), _) => w.iter().any(|v| other.contains(v)),
            (_, SetNode::Wrapper(w)) => w.iter().any(|v| self.contains(v)),
            _ => self.probe_overlap(other),
        }
    }

    fn probe_overlap(&self, other: &SetNode) -> bool {
        let args = crate::args::EvalArgs::default().lazified();
        match self.enumerate(&args) {
            Ok(mut iter) => iter.any(|v| other.contains(&v)),
            Err(_) => false,
        }
    }

    /// Returns `true` if every element of `other` is an element of
    /// `self`.
    ///
    /// Exact for empty, range/range, and wrapper combinations; other
    /// shapes fall back to a bounded enumeration probe of `other`
    /// under default caps.
    pub fn is_superset(&self, other: &SetNode) -> bool {
        match (self, other) {
            (_, SetNode::Empty) => true,
            (SetNode::Empty, _) => other.is_known_empty(),
            (SetNode::IntRange(a), SetNode::IntRange(b)) => {
                a.interval().is_superset(b.interval())
            }
            (SetNode::CharRange(a), SetNode::CharRange(b)) => {
                a.interval().is_superset(b.interval())
            }
            (_, SetNode::Wrapper(w)) => w.iter().all(|v| self.contains(v)),
            _ => {
                let args = crate::args::EvalArgs::default().lazified();
                match other.enumerate(&args) {
                    Ok(mut iter) => iter.all(|v| self.contains(&v)),
                    Err(_) => false,
                }
            }
        }
    }
}

impl From<SetWrapper> for SetNode {
    fn from(wrapper: SetWrapper) -> Self {
        SetNode::Wrapper(wrapper)
    }
}

impl From<IntRange> for SetNode {
    fn from(range: IntRange) -> Self {
        SetNode::IntRange(range)
    }
}

impl From<CharRange> for SetNode {
    fn from(range: CharRange) -> Self {
        SetNode::CharRange(range)
    }
}

impl From<Value> for SetNode {
    fn from(value: Value) -> Self {
        SetNode::wrapper([value])
    }
}

impl From<Vec<Value>> for SetNode {
    fn from(values: Vec<Value>) -> Self {
        SetNode::wrapper(values)
    }
}

impl From<Vec<i64>> for SetNode {
    fn from(values: Vec<i64>) -> Self {
        SetNode::wrapper(values)
    }
}

impl From<Arc<dyn TypeDomain>> for SetNode {
    fn from(domain: Arc<dyn TypeDomain>) -> Self {
        SetNode::type_of(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntegerType;

    #[test]
    fn test_contains_leaves() {
        assert!(!SetNode::empty().contains(&Value::Int(1)));
        assert!(SetNode::wrapper([1i64, 2]).contains(&Value::Int(2)));
        assert!(SetNode::int_range(1, 4).contains(&Value::Int(4)));
        assert!(!SetNode::int_range(1, 4).contains(&Value::Char('a')));
        assert!(SetNode::char_range('a', 'd').contains(&Value::Char('b')));
        assert!(SetNode::type_of(Arc::new(IntegerType)).contains(&Value::Int(-3)));
    }

    #[test]
    fn test_contains_operators() {
        let u = SetNode::union(vec![SetNode::int_range(1, 3), SetNode::wrapper([9i64])]);
        assert!(u.contains(&Value::Int(2)));
        assert!(u.contains(&Value::Int(9)));
        assert!(!u.contains(&Value::Int(5)));

        let i = SetNode::intersection(vec![SetNode::int_range(1, 5), SetNode::int_range(4, 9)]);
        assert!(i.contains(&Value::Int(4)));
        assert!(!i.contains(&Value::Int(2)));

        let d = SetNode::difference(SetNode::int_range(1, 4), SetNode::int_range(2, 3));
        assert!(d.contains(&Value::Int(1)));
        assert!(!d.contains(&Value::Int(2)));

        let c = SetNode::complement(SetNode::int_range(1, 4));
        assert!(c.contains(&Value::Int(9)));
        assert!(!c.contains(&Value::Int(2)));
    }

    #[test]
    fn test_contains_product() {
        let p = SetNode::product(vec![SetNode::int_range(1, 2), SetNode::char_range('a', 'b')]);
        assert!(p.contains(&Value::Tuple(vec![Value::Int(1), Value::Char('b')])));
        assert!(!p.contains(&Value::Tuple(vec![Value::Int(1)])));
        assert!(!p.contains(&Value::Int(1)));
    }

    #[test]
    fn test_size() {
        assert_eq!(SetNode::empty().size().unwrap(), Cardinality::Finite(0));
        assert_eq!(
            SetNode::wrapper([1i64, 2, 3]).size().unwrap(),
            Cardinality::Finite(3)
        );
        assert_eq!(
            SetNode::int_range(1, 10).size().unwrap(),
            Cardinality::Finite(10)
        );
        assert_eq!(
            SetNode::type_of(Arc::new(IntegerType)).size().unwrap(),
            Cardinality::Infinite
        );
        assert_eq!(
            SetNode::product(vec![SetNode::int_range(1, 3), SetNode::int_range(1, 4)])
                .size()
                .unwrap(),
            Cardinality::Finite(12)
        );
        assert_eq!(
            SetNode::union(vec![
                SetNode::int_range(1, 3),
                SetNode::type_of(Arc::new(IntegerType))
            ])
            .size()
            .unwrap(),
            Cardinality::Infinite
        );
    }

    #[test]
    fn test_size_limits_exact() {
        let node = SetNode::int_range(1, 5);
        assert_eq!(
            node.size_limits().unwrap(),
            (Cardinality::Finite(5), Cardinality::Finite(5))
        );
    }

    #[test]
    fn test_validate_recurses() {
        let ok = SetNode::union(vec![SetNode::int_range(1, 3), SetNode::wrapper([9i64])]);
        assert!(ok.validate().is_ok());

        let bad = SetNode::union(vec![SetNode::int_range(3, 1), SetNode::wrapper([9i64])]);
        assert_eq!(
            bad.validate(),
            Err(SetError::InvalidBounds { lb: 3, ub: 1 })
        );
    }

    #[test]
    #[should_panic(expected = "Union requires at least two children")]
    fn test_union_arity_panics() {
        SetNode::union(vec![SetNode::empty()]);
    }

    #[test]
    fn test_empty_overlaps_and_superset() {
        let empty = SetNode::empty();
        assert!(!empty.overlaps(&SetNode::int_range(1, 3)));
        assert!(!SetNode::int_range(1, 3).overlaps(&empty));
        assert!(empty.is_superset(&SetNode::empty()));
        assert!(empty.is_superset(&SetNode::wrapper(Vec::<Value>::new())));
        assert!(!empty.is_superset(&SetNode::int_range(1, 1)));
    }

    #[test]
    fn test_range_overlaps_shares_integer() {
        assert!(SetNode::int_range(1, 4).overlaps(&SetNode::int_range(4, 6)));
        assert!(!SetNode::int_range(1, 4).overlaps(&SetNode::int_range(5, 6)));
    }

    #[test]
    fn test_is_known_empty() {
        assert!(SetNode::empty().is_known_empty());
        assert!(SetNode::wrapper(Vec::<Value>::new()).is_known_empty());
        assert!(SetNode::int_range(4, 1).is_known_empty());
        assert!(SetNode::union(vec![SetNode::empty(), SetNode::empty()]).is_known_empty());
        assert!(!SetNode::union(vec![SetNode::empty(), SetNode::int_range(1, 1)]).is_known_empty());
        assert!(
            SetNode::product(vec![SetNode::int_range(1, 3), SetNode::empty()]).is_known_empty()
        );
    }

    #[test]
    fn test_default_universe() {
        assert_eq!(
            SetNode::int_range(1, 3).default_universe(),
            Some(SetNode::IntRange(IntRange::universe()))
        );
        assert!(SetNode::wrapper([1i64]).default_universe().is_none());
    }

    #[test]
    fn test_value_equality_of_trees() {
        let a = SetNode::union(vec![SetNode::int_range(1, 3), SetNode::wrapper([7i64])]);
        let b = SetNode::union(vec![SetNode::int_range(1, 3), SetNode::wrapper([7i64])]);
        assert_eq!(a, b);
    }
}
