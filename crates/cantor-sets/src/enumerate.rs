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

//! Enumeration and materialization for symbolic sets.
//!
//! `enumerate` yields a bounded lazy stream of elements; `to_set`
//! materializes a bounded concrete set. Union materialization merges
//! its range children through the exact disjoint-cover algorithm rather
//! than point-by-point insertion, and intersection/difference keep the
//! symbolic range fast paths of the interval layer. Caps are enforced
//! unconditionally: a type-denoted child generates forever if allowed
//! to.

use crate::{
    args::EvalArgs,
    error::SetError,
    node::{SetNode, ValueIter},
    range::IntRange,
    wrapper::SetWrapper,
};
use cantor_core::{
    math::interval::ClosedInterval,
    utils::iter::{CartesianProduct, RoundRobin},
    value::Value,
};
use rand::{rngs::StdRng, SeedableRng};
use rustc_hash::FxHashSet;

impl SetNode {
    /// Lazily enumerates at most `args.max_enumerate` elements.
    ///
    /// `Union` interleaves its children fairly and deduplicates across
    /// them. Type-denoted sets enumerate by repeated generation: the
    /// stream is non-deterministic (seedable through `args.seed`) and
    /// may repeat values. Order is only guaranteed for pure range
    /// leaves.
    pub fn enumerate(&self, args: &EvalArgs) -> Result<ValueIter<'_>, SetError> {
        let cap = args.max_enumerate;
        match self {
            SetNode::Empty => Ok(Box::new(std::iter::empty())),
            SetNode::Wrapper(w) => Ok(Box::new(w.iter().cloned().take(cap))),
            SetNode::IntRange(r) => Ok(Box::new(r.points().take(cap))),
            SetNode::CharRange(r) => Ok(Box::new(r.chars().take(cap))),
            SetNode::Class(c) => Ok(Box::new(c.members().iter().cloned().take(cap))),
            SetNode::Type(t) => {
                let t = t.clone();
                let mut rng = seeded_rng(args);
                let n = args.effective_type_cap();
                Ok(Box::new(
                    std::iter::from_fn(move || Some(t.generate(&mut rng))).take(n),
                ))
            }
            SetNode::Union(children) => {
                let mut iters = Vec::with_capacity(children.len());
                for child in children {
                    iters.push(child.enumerate(args)?);
                }
                let mut seen: FxHashSet<Value> = FxHashSet::default();
                Ok(Box::new(
                    RoundRobin::new(iters)
                        .filter(move |v| seen.insert(v.clone()))
                        .take(cap),
                ))
            }
            SetNode::Intersection(children) => {
                if args.lazy {
                    // Draw from one arbitrarily chosen child and filter
                    // against the rest.
                    let base = &children[0];
                    let rest = &children[1..];
                    Ok(Box::new(
                        base.enumerate(args)?
                            .filter(move |v| rest.iter().all(|c| c.contains(v)))
                            .take(cap),
                    ))
                } else {
                    Ok(Box::new(self.to_set(args)?.into_iter().take(cap)))
                }
            }
            SetNode::Difference(a, b) => Ok(Box::new(
                a.enumerate(args)?
                    .filter(move |v| !b.contains(v))
                    .take(cap),
            )),
            SetNode::Complement(a) => {
                let universe = resolve_universe(a, args)?;
                let points = owned_points(&universe, args)?;
                Ok(Box::new(
                    points.filter(move |v| !a.contains(v)).take(cap),
                ))
            }
            SetNode::Product(children) => {
                let mut pools = Vec::with_capacity(children.len());
                for child in children {
                    pools.push(child.enumerate(args)?.collect::<Vec<Value>>());
                }
                Ok(Box::new(
                    CartesianProduct::new(pools).map(Value::Tuple).take(cap),
                ))
            }
        }
    }

    /// Enumerates with `lazy` forced on: composite children are never
    /// materialized into concrete sets. This is the only enumeration
    /// mode backtracking search is permitted to use.
    pub fn lazy_enumerate(&self, args: &EvalArgs) -> Result<ValueIter<'_>, SetError> {
        self.enumerate(&args.lazified())
    }

    /// Materializes the set, bounded by `args.max_enumerate` elements.
    pub fn to_set(&self, args: &EvalArgs) -> Result<FxHashSet<Value>, SetError> {
        let cap = args.max_enumerate;
        match self {
            SetNode::Union(children) => {
                let mut out = FxHashSet::default();
                let mut int_ivs: Vec<ClosedInterval<i64>> = Vec::new();
                let mut char_ivs: Vec<ClosedInterval<u32>> = Vec::new();
                for child in children {
                    match child {
                        SetNode::Empty => {}
                        SetNode::IntRange(r) => int_ivs.push(r.interval()),
                        SetNode::CharRange(r) => char_ivs.push(r.interval()),
                        SetNode::Wrapper(w) => extend_capped(&mut out, w.iter().cloned(), cap),
                        other => {
                            let set = other.to_set(args)?;
                            extend_capped(&mut out, set, cap);
                        }
                    }
                }
                for iv in ClosedInterval::disjoint_cover(&int_ivs) {
                    extend_capped(&mut out, iv.iter().map(Value::Int), cap);
                }
                for iv in ClosedInterval::disjoint_cover(&char_ivs) {
                    extend_capped(
                        &mut out,
                        iv.iter().filter_map(char::from_u32).map(Value::Char),
                        cap,
                    );
                }
                Ok(out)
            }
            SetNode::Intersection(children) => intersection_to_set(children, args),
            SetNode::Difference(a, b) => match (a.as_ref(), b.as_ref()) {
                (SetNode::IntRange(ra), SetNode::IntRange(rb)) => {
                    let mut out = FxHashSet::default();
                    for piece in ra.difference(*rb) {
                        extend_capped(&mut out, piece.points(), cap);
                    }
                    Ok(out)
                }
                (SetNode::CharRange(ra), SetNode::CharRange(rb)) => {
                    let mut out = FxHashSet::default();
                    for piece in ra.interval().difference(rb.interval()) {
                        extend_capped(
                            &mut out,
                            piece.iter().filter_map(char::from_u32).map(Value::Char),
                            cap,
                        );
                    }
                    Ok(out)
                }
                _ => {
                    let base = a.to_set(args)?;
                    Ok(base
                        .into_iter()
                        .filter(|v| !b.contains(v))
                        .take(cap)
                        .collect())
                }
            },
            SetNode::Complement(a) => {
                let universe = resolve_universe(a, args)?;
                let points = owned_points(&universe, args)?;
                Ok(points.filter(|v| !a.contains(v)).take(cap).collect())
            }
            _ => Ok(self.enumerate(args)?.collect()),
        }
    }
}

/// Resolves the universe a complement evaluates against: the explicit
/// `args.universe` when present, the operand's default universe
/// otherwise.
pub(crate) fn resolve_universe(operand: &SetNode, args: &EvalArgs) -> Result<SetNode, SetError> {
    if let Some(universe) = &args.universe {
        return Ok(universe.clone());
    }
    operand.default_universe().ok_or(SetError::MissingUniverse)
}

/// Produces an owning element stream for `node`, detached from any
/// borrow of it. Range and wrapper shapes stream without
/// materialization; other shapes fall back to a bounded `to_set`.
fn owned_points(node: &SetNode, args: &EvalArgs) -> Result<ValueIter<'static>, SetError> {
    match node {
        SetNode::Empty => Ok(Box::new(std::iter::empty())),
        SetNode::IntRange(r) => {
            let r = *r;
            Ok(Box::new(r.points()))
        }
        SetNode::CharRange(r) => {
            let r = *r;
            Ok(Box::new(r.chars()))
        }
        SetNode::Wrapper(w) => Ok(Box::new(w.values().clone().into_iter())),
        SetNode::Class(c) => Ok(Box::new(c.members().to_vec().into_iter())),
        other => Ok(Box::new(other.to_set(args)?.into_iter())),
    }
}

fn extend_capped(
    out: &mut FxHashSet<Value>,
    values: impl IntoIterator<Item = Value>,
    cap: usize,
) {
    for value in values {
        if out.len() >= cap {
            break;
        }
        out.insert(value);
    }
}

fn intersection_to_set(
    children: &[SetNode],
    args: &EvalArgs,
) -> Result<FxHashSet<Value>, SetError> {
    let cap = args.max_enumerate;
    let mut int_ranges: Vec<IntRange> = Vec::new();
    let mut char_ivs: Vec<ClosedInterval<u32>> = Vec::new();
    let mut wrappers: Vec<&SetWrapper> = Vec::new();
    let mut rest: Vec<&SetNode> = Vec::new();
    for child in children {
        match child {
            SetNode::Empty => return Ok(FxHashSet::default()),
            SetNode::IntRange(r) => int_ranges.push(*r),
            SetNode::CharRange(r) => char_ivs.push(r.interval()),
            SetNode::Wrapper(w) => wrappers.push(w),
            other => rest.push(other),
        }
    }

    // Integer and character families share no elements.
    if !int_ranges.is_empty() && !char_ivs.is_empty() {
        return Ok(FxHashSet::default());
    }

    let int_iv = if int_ranges.is_empty() {
        None
    } else {
        match int_ranges[0].intersection(&int_ranges[1..]) {
            Some(iv) => Some(iv),
            None => return Ok(FxHashSet::default()),
        }
    };
    let char_iv = if char_ivs.is_empty() {
        None
    } else {
        match char_ivs[0].intersect_many(&char_ivs[1..]) {
            Some(iv) => Some(iv),
            None => return Ok(FxHashSet::default()),
        }
    };

    let accepts = |value: &Value| -> bool {
        if let Some(iv) = &int_iv {
            match value.as_int() {
                Some(i) if iv.contains(i) => {}
                _ => return false,
            }
        }
        if let Some(iv) = &char_iv {
            match value.as_char() {
                Some(c) if iv.contains_point(c as u32) => {}
                _ => return false,
            }
        }
        rest.iter().all(|c| c.contains(value))
    };

    if !wrappers.is_empty() {
        let base = wrappers[0].intersection(&wrappers[1..]);
        return Ok(base
            .iter()
            .filter(|v| accepts(v))
            .cloned()
            .take(cap)
            .collect());
    }
    if let Some(iv) = int_iv {
        return Ok(iv.points().filter(|v| rest.iter().all(|c| c.contains(v))).take(cap).collect());
    }
    if let Some(iv) = char_iv {
        return Ok(iv
            .iter()
            .filter_map(char::from_u32)
            .map(Value::Char)
            .filter(|v| rest.iter().all(|c| c.contains(v)))
            .take(cap)
            .collect());
    }

    // Only composite or type-denoted children remain: materialize one
    // of them (preferring a non-generative base) and filter through
    // the others.
    let base_index = rest
        .iter()
        .position(|c| !matches!(c, SetNode::Type(_)))
        .unwrap_or(0);
    let base = rest[base_index].to_set(args)?;
    Ok(base
        .into_iter()
        .filter(|v| {
            rest.iter()
                .enumerate()
                .all(|(i, c)| i == base_index || c.contains(v))
        })
        .take(cap)
        .collect())
}

fn seeded_rng(args: &EvalArgs) -> StdRng {
    match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntegerType;
    use std::sync::Arc;

    fn collect(node: &SetNode, args: &EvalArgs) -> Vec<Value> {
        node.enumerate(args).unwrap().collect()
    }

    fn ints(values: &[i64]) -> FxHashSet<Value> {
        values.iter().map(|&i| Value::Int(i)).collect()
    }

    #[test]
    fn test_enumerate_leaves() {
        let args = EvalArgs::default();
        assert!(collect(&SetNode::empty(), &args).is_empty());
        assert_eq!(
            collect(&SetNode::int_range(1, 3), &args),
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
        assert_eq!(
            collect(&SetNode::char_range('x', 'z'), &args),
            vec![Value::Char('x'), Value::Char('y'), Value::Char('z')]
        );
    }

    #[test]
    fn test_enumeration_cap_holds_everywhere() {
        let args = EvalArgs::default().with_max_enumerate(4);
        let nodes = vec![
            SetNode::int_range(1, 100),
            SetNode::wrapper((0i64..50).collect::<Vec<_>>()),
            SetNode::union(vec![SetNode::int_range(1, 40), SetNode::int_range(50, 90)]),
            SetNode::intersection(vec![SetNode::int_range(1, 80), SetNode::int_range(0, 70)]),
            SetNode::difference(SetNode::int_range(1, 100), SetNode::int_range(2, 3)),
            SetNode::complement(SetNode::int_range(1, 10)),
            SetNode::product(vec![SetNode::int_range(1, 10), SetNode::int_range(1, 10)]),
            SetNode::type_of(Arc::new(IntegerType)),
        ];
        for node in &nodes {
            assert!(collect(node, &args).len() <= 4);
        }
    }

    #[test]
    fn test_union_enumerate_dedups() {
        let args = EvalArgs::default();
        let u = SetNode::union(vec![SetNode::int_range(1, 3), SetNode::int_range(2, 4)]);
        let values = collect(&u, &args);
        let distinct: FxHashSet<Value> = values.iter().cloned().collect();
        assert_eq!(values.len(), distinct.len());
        assert_eq!(distinct, ints(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_type_enumerate_respects_type_cap() {
        let args = EvalArgs::default().with_seed(11);
        let t = SetNode::type_of(Arc::new(IntegerType));
        assert_eq!(collect(&t, &args).len(), 50);

        let args = args.with_max_enumerate(5);
        assert_eq!(collect(&t, &args).len(), 5);
    }

    #[test]
    fn test_union_to_set_partitions_and_merges() {
        let args = EvalArgs::default();
        let u = SetNode::union(vec![
            SetNode::int_range(1, 3),
            SetNode::int_range(5, 7),
            SetNode::int_range(6, 9),
            SetNode::empty(),
            SetNode::wrapper([10i64, 11]),
            SetNode::wrapper([13i64]),
        ]);
        assert_eq!(
            u.to_set(&args).unwrap(),
            ints(&[1, 2, 3, 5, 6, 7, 8, 9, 10, 11, 13])
        );
    }

    #[test]
    fn test_union_to_set_is_order_independent() {
        let args = EvalArgs::default();
        let a = SetNode::union(vec![
            SetNode::wrapper([13i64]),
            SetNode::int_range(6, 9),
            SetNode::wrapper([10i64, 11]),
            SetNode::int_range(1, 3),
            SetNode::empty(),
            SetNode::int_range(5, 7),
        ]);
        assert_eq!(
            a.to_set(&args).unwrap(),
            ints(&[1, 2, 3, 5, 6, 7, 8, 9, 10, 11, 13])
        );
    }

    #[test]
    fn test_intersection_to_set_range_fast_path() {
        let args = EvalArgs::default();
        let i = SetNode::intersection(vec![
            SetNode::int_range(1, 6),
            SetNode::int_range(4, 9),
            SetNode::int_range(0, 5),
        ]);
        assert_eq!(i.to_set(&args).unwrap(), ints(&[4, 5]));
    }

    #[test]
    fn test_intersection_to_set_mixed() {
        let args = EvalArgs::default();
        let i = SetNode::intersection(vec![
            SetNode::wrapper([1i64, 4, 9, 12]),
            SetNode::int_range(2, 10),
        ]);
        assert_eq!(i.to_set(&args).unwrap(), ints(&[4, 9]));
    }

    #[test]
    fn test_intersection_of_disjoint_families_is_empty() {
        let args = EvalArgs::default();
        let i = SetNode::intersection(vec![
            SetNode::int_range(1, 9),
            SetNode::char_range('a', 'z'),
        ]);
        assert!(i.to_set(&args).unwrap().is_empty());
    }

    #[test]
    fn test_difference_to_set_range_split() {
        let args = EvalArgs::default();
        let d = SetNode::difference(SetNode::int_range(1, 4), SetNode::int_range(2, 3));
        assert_eq!(d.to_set(&args).unwrap(), ints(&[1, 4]));

        let gone = SetNode::difference(SetNode::int_range(2, 3), SetNode::int_range(1, 4));
        assert!(gone.to_set(&args).unwrap().is_empty());
    }

    #[test]
    fn test_difference_to_set_heterogeneous() {
        let args = EvalArgs::default();
        let d = SetNode::difference(
            SetNode::wrapper([1i64, 2, 3, 4]),
            SetNode::int_range(2, 3),
        );
        assert_eq!(d.to_set(&args).unwrap(), ints(&[1, 4]));
    }

    #[test]
    fn test_complement_uses_default_universe() {
        let args = EvalArgs::default();
        let c = SetNode::complement(SetNode::char_range(' ', 'y'));
        let set = c.to_set(&args).unwrap();
        assert_eq!(
            set,
            [Value::Char('z'), Value::Char('{'), Value::Char('|'), Value::Char('}'), Value::Char('~')]
                .into_iter()
                .collect::<FxHashSet<_>>()
        );
    }

    #[test]
    fn test_complement_without_universe_errors() {
        let args = EvalArgs::default();
        let c = SetNode::complement(SetNode::wrapper([1i64]));
        assert_eq!(c.to_set(&args).unwrap_err(), SetError::MissingUniverse);
    }

    #[test]
    fn test_complement_with_explicit_universe() {
        let args = EvalArgs::default().with_universe(SetNode::int_range(0, 9));
        let c = SetNode::complement(SetNode::wrapper([2i64, 4]));
        assert_eq!(
            c.to_set(&args).unwrap(),
            ints(&[0, 1, 3, 5, 6, 7, 8, 9])
        );
    }

    #[test]
    fn test_product_enumerate() {
        let args = EvalArgs::default();
        let p = SetNode::product(vec![SetNode::int_range(1, 2), SetNode::char_range('a', 'b')]);
        let rows: FxHashSet<Value> = collect(&p, &args).into_iter().collect();
        let expected: FxHashSet<Value> = [
            Value::Tuple(vec![Value::Int(1), Value::Char('a')]),
            Value::Tuple(vec![Value::Int(1), Value::Char('b')]),
            Value::Tuple(vec![Value::Int(2), Value::Char('a')]),
            Value::Tuple(vec![Value::Int(2), Value::Char('b')]),
        ]
        .into_iter()
        .collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_lazy_enumerate_filters_through_children() {
        let args = EvalArgs::default();
        let i = SetNode::intersection(vec![
            SetNode::int_range(1, 20),
            SetNode::difference(SetNode::int_range(0, 30), SetNode::int_range(5, 25)),
        ]);
        let values: FxHashSet<Value> = i.lazy_enumerate(&args).unwrap().collect();
        assert_eq!(values, ints(&[1, 2, 3, 4]));
    }
}
