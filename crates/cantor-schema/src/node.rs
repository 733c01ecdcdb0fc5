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

//! # Grammar Nodes
//!
//! `Sequence` is the only node denoting ordered composition; its set is
//! the Cartesian product of its children's sets. `Or` denotes a union
//! of alternatives, and `Repeat` a union of fixed-length products over
//! a bounded count range. Every constructor computes the node's set
//! representation inline, so construction is the whole lifecycle.
//!
//! Enumeration and sampling drive the compiled set and then flatten the
//! nested tuple results into flat sequences: a repetition inside a
//! sequence contributes its elements in place, not a nested tuple.

use crate::coerce::SchemaArg;
use cantor_sets::{args::EvalArgs, error::SetError, node::SetNode};
use cantor_core::value::Value;
use rand::RngCore;
use rustc_hash::FxHashSet;

/// The span added to `lb` when a repetition is built without an
/// explicit upper bound.
pub const REPEAT_DEFAULT_SPAN: usize = 5;

/// A node of the sequence grammar.
///
/// Each variant owns the set representation compiled for it at
/// construction time; the `set` field is derived state and never
/// independently mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A leaf denoting the elements of one set.
    Set {
        /// The denoted set.
        set: SetNode,
    },
    /// A choice among alternatives.
    Or {
        /// The alternatives, in declaration order.
        children: Vec<SchemaNode>,
        /// The compiled union of the alternatives' sets.
        set: SetNode,
    },
    /// A bounded repetition of one child.
    Repeat {
        /// The repeated child.
        child: Box<SchemaNode>,
        /// Inclusive minimum repetition count.
        lb: usize,
        /// Inclusive maximum repetition count.
        ub: usize,
        /// Whether longer repetitions enumerate first.
        greedy: bool,
        /// The compiled union of fixed-length products.
        set: SetNode,
    },
    /// Ordered composition of children.
    Sequence {
        /// The positional children, in order.
        children: Vec<SchemaNode>,
        /// The compiled Cartesian product of the children's sets.
        set: SetNode,
    },
}

impl SchemaNode {
    /// A leaf grammar node over the given set.
    #[inline]
    pub fn set(set: SetNode) -> Self {
        SchemaNode::Set { set }
    }

    /// A choice among the given alternatives.
    ///
    /// A bare value-list argument denotes a nested sequence of those
    /// values. With a single alternative the compiled set degenerates
    /// to that alternative's set; with none, to the empty set.
    pub fn or(args: Vec<SchemaArg>) -> Self {
        let children: Vec<SchemaNode> =
            args.into_iter().map(SchemaArg::wrap_alternative).collect();
        let set = match children.len() {
            0 => SetNode::empty(),
            1 => children[0].compiled_set().clone(),
            _ => SetNode::union(
                children.iter().map(|c| c.compiled_set().clone()).collect(),
            ),
        };
        SchemaNode::Or { children, set }
    }

    /// Ordered composition of the given children.
    pub fn sequence(args: Vec<SchemaArg>) -> Self {
        let children: Vec<SchemaNode> = args.into_iter().map(SchemaArg::wrap).collect();
        let set = SetNode::product(
            children.iter().map(|c| c.compiled_set().clone()).collect(),
        );
        SchemaNode::Sequence { children, set }
    }

    /// A repetition of `arg` between `lb` and `ub` times inclusive,
    /// enumerating longer repetitions first.
    ///
    /// # Panics
    ///
    /// Panics if `lb > ub`; an unbounded repetition is not
    /// representable.
    #[inline]
    pub fn repeat(arg: SchemaArg, lb: usize, ub: usize) -> Self {
        Self::repeat_with(arg, lb, ub, true)
    }

    /// A repetition with an explicit greediness flag; non-greedy
    /// repetitions enumerate shorter alternatives first.
    ///
    /// # Panics
    ///
    /// Panics if `lb > ub`.
    pub fn repeat_with(arg: SchemaArg, lb: usize, ub: usize, greedy: bool) -> Self {
        assert!(
            lb <= ub,
            "Repeat requires lb <= ub, got lb {} and ub {}",
            lb,
            ub
        );
        let child = Box::new(arg.wrap());
        let counts: Vec<usize> = if greedy {
            (lb..=ub).rev().collect()
        } else {
            (lb..=ub).collect()
        };
        let alternatives: Vec<SetNode> = counts
            .into_iter()
            .map(|k| repetition_set(child.compiled_set(), k))
            .collect();
        let set = if alternatives.len() == 1 {
            alternatives.into_iter().next().unwrap_or(SetNode::Empty)
        } else {
            SetNode::union(alternatives)
        };
        SchemaNode::Repeat {
            child,
            lb,
            ub,
            greedy,
            set,
        }
    }

    /// A repetition with the default upper bound `lb + 5`.
    #[inline]
    pub fn repeat_from(arg: SchemaArg, lb: usize) -> Self {
        Self::repeat(arg, lb, lb + REPEAT_DEFAULT_SPAN)
    }

    /// Zero or one occurrence of `arg`.
    #[inline]
    pub fn optional(arg: SchemaArg) -> Self {
        Self::repeat(arg, 0, 1)
    }

    /// One to `ub` occurrences of `arg`; the cap must be explicit for
    /// enumeration to stay bounded.
    #[inline]
    pub fn one_or_more(arg: SchemaArg, ub: usize) -> Self {
        Self::repeat(arg, 1, ub)
    }

    /// Zero to `ub` occurrences of `arg`; the cap must be explicit for
    /// enumeration to stay bounded.
    #[inline]
    pub fn zero_or_more(arg: SchemaArg, ub: usize) -> Self {
        Self::repeat(arg, 0, ub)
    }

    /// The compiled set representation of this node.
    pub fn compiled_set(&self) -> &SetNode {
        match self {
            SchemaNode::Set { set }
            | SchemaNode::Or { set, .. }
            | SchemaNode::Repeat { set, .. }
            | SchemaNode::Sequence { set, .. } => set,
        }
    }

    /// Enumerates at most `args.max_enumerate` distinct flattened
    /// sequences.
    pub fn enumerate(&self, args: &EvalArgs) -> Result<Vec<Vec<Value>>, SetError> {
        let mut seen: FxHashSet<Vec<Value>> = FxHashSet::default();
        let mut sequences = Vec::new();
        for value in self.compiled_set().enumerate(args)? {
            let flat = flatten(value);
            if seen.insert(flat.clone()) {
                sequences.push(flat);
            }
        }
        Ok(sequences)
    }

    /// Returns one flattened sequence, sampling lazily so that large
    /// or type-denoted alternatives are never materialized.
    pub fn get_one(
        &self,
        rng: &mut dyn RngCore,
        args: &EvalArgs,
    ) -> Result<Vec<Value>, SetError> {
        let value = self.compiled_set().get_one(rng, args)?;
        Ok(flatten(value))
    }
}

/// The set of `k`-fold repetitions of `set`: the singleton empty tuple
/// for `k == 0`, the set itself for `k == 1`, and the `k`-fold product
/// otherwise.
fn repetition_set(set: &SetNode, k: usize) -> SetNode {
    match k {
        0 => SetNode::wrapper([Value::unit()]),
        1 => set.clone(),
        _ => SetNode::product(vec![set.clone(); k]),
    }
}

/// Recursively flattens nested tuples into a flat sequence; a scalar
/// contributes itself.
fn flatten(value: Value) -> Vec<Value> {
    match value {
        Value::Tuple(items) => items.into_iter().flat_map(flatten).collect(),
        scalar => vec![scalar],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cantor_sets::types::IntegerType;
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::Arc;

    fn sequences(node: &SchemaNode) -> FxHashSet<Vec<Value>> {
        node.enumerate(&EvalArgs::default())
            .unwrap()
            .into_iter()
            .collect()
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&i| Value::Int(i)).collect()
    }

    #[test]
    fn test_sequence_repeat_round_trip() {
        let node = SchemaNode::sequence(vec![
            SchemaArg::from(1i64),
            SchemaArg::from(SchemaNode::repeat(SchemaArg::from(2i64), 0, 3)),
        ]);
        let expected: FxHashSet<Vec<Value>> = [
            ints(&[1]),
            ints(&[1, 2]),
            ints(&[1, 2, 2]),
            ints(&[1, 2, 2, 2]),
        ]
        .into_iter()
        .collect();
        assert_eq!(sequences(&node), expected);
    }

    #[test]
    fn test_or_enumerates_alternatives() {
        let node = SchemaNode::or(vec![
            SchemaArg::from(1i64),
            SchemaArg::from('x'),
        ]);
        let expected: FxHashSet<Vec<Value>> =
            [vec![Value::Int(1)], vec![Value::Char('x')]].into_iter().collect();
        assert_eq!(sequences(&node), expected);
    }

    #[test]
    fn test_or_wraps_bare_list_as_nested_sequence() {
        let node = SchemaNode::or(vec![
            SchemaArg::from(vec![1i64, 2]),
            SchemaArg::from(9i64),
        ]);
        let expected: FxHashSet<Vec<Value>> =
            [ints(&[1, 2]), ints(&[9])].into_iter().collect();
        assert_eq!(sequences(&node), expected);
    }

    #[test]
    fn test_optional() {
        let node = SchemaNode::sequence(vec![
            SchemaArg::from(7i64),
            SchemaArg::from(SchemaNode::optional(SchemaArg::from(8i64))),
        ]);
        let expected: FxHashSet<Vec<Value>> =
            [ints(&[7]), ints(&[7, 8])].into_iter().collect();
        assert_eq!(sequences(&node), expected);
    }

    #[test]
    fn test_repeat_default_upper_bound() {
        let node = SchemaNode::repeat_from(SchemaArg::from(1i64), 0);
        match &node {
            SchemaNode::Repeat { lb, ub, .. } => {
                assert_eq!(*lb, 0);
                assert_eq!(*ub, 5);
            }
            other => panic!("expected Repeat, got {:?}", other),
        }
        assert_eq!(sequences(&node).len(), 6);
    }

    #[test]
    fn test_repeat_single_count_degenerates() {
        let node = SchemaNode::repeat(SchemaArg::from(vec![1i64, 2]), 1, 1);
        assert_eq!(node.compiled_set(), &SetNode::wrapper([1i64, 2]));
    }

    #[test]
    #[should_panic(expected = "Repeat requires lb <= ub")]
    fn test_repeat_rejects_inverted_bounds() {
        SchemaNode::repeat(SchemaArg::from(1i64), 3, 1);
    }

    #[test]
    fn test_nested_sequences_flatten() {
        let inner = SchemaNode::sequence(vec![SchemaArg::from(2i64), SchemaArg::from(3i64)]);
        let node = SchemaNode::sequence(vec![
            SchemaArg::from(1i64),
            SchemaArg::from(inner),
        ]);
        let expected: FxHashSet<Vec<Value>> = [ints(&[1, 2, 3])].into_iter().collect();
        assert_eq!(sequences(&node), expected);
    }

    #[test]
    fn test_mixed_set_and_scalar_children() {
        let node = SchemaNode::sequence(vec![
            SchemaArg::from(SetNode::wrapper([1i64, 2])),
            SchemaArg::from(9i64),
        ]);
        let expected: FxHashSet<Vec<Value>> =
            [ints(&[1, 9]), ints(&[2, 9])].into_iter().collect();
        assert_eq!(sequences(&node), expected);
    }

    #[test]
    fn test_get_one_yields_member_sequence() {
        use rand_chacha::ChaCha8Rng;

        let node = SchemaNode::sequence(vec![
            SchemaArg::from(1i64),
            SchemaArg::from(SchemaNode::repeat(SchemaArg::from(2i64), 0, 3)),
        ]);
        let all = sequences(&node);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..32 {
            let one = node.get_one(&mut rng, &EvalArgs::default()).unwrap();
            assert!(all.contains(&one), "{:?} not in {:?}", one, all);
        }
    }

    #[test]
    fn test_get_one_with_type_denoted_child() {
        let node = SchemaNode::sequence(vec![
            SchemaArg::from(Arc::new(IntegerType) as Arc<dyn cantor_sets::TypeDomain>),
            SchemaArg::from(0i64),
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        let one = node.get_one(&mut rng, &EvalArgs::default()).unwrap();
        assert_eq!(one.len(), 2);
        assert!(matches!(one[0], Value::Int(_)));
        assert_eq!(one[1], Value::Int(0));
    }
}
