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

//! Sampling for symbolic sets.
//!
//! Union sampling chooses uniformly among non-empty *alternatives* and
//! then samples within the chosen one. Elements of small alternatives
//! are therefore over-represented relative to the flattened element
//! space; that alternative-level policy is part of the contract and
//! callers may only rely on membership, never on distribution.
//!
//! In lazy mode the filtering operators (`Intersection`, `Difference`,
//! `Complement`) rejection-sample from a source child and test the
//! draw against the full operator, bounded by `args.max_attempts`;
//! exhausting the bound raises [`SetError::SampleExhausted`].

use crate::{
    args::EvalArgs,
    enumerate::resolve_universe,
    error::SetError,
    node::SetNode,
};
use cantor_core::value::Value;
use rand::{seq::SliceRandom, Rng, RngCore};
use rustc_hash::FxHashSet;

impl SetNode {
    /// Returns one element of the denoted set.
    ///
    /// In eager mode, composite filtering operators materialize their
    /// bounded `to_set` and choose from it; in lazy mode they
    /// rejection-sample. Either way the result always satisfies
    /// [`SetNode::contains`].
    pub fn sample(&self, rng: &mut dyn RngCore, args: &EvalArgs) -> Result<Value, SetError> {
        match self {
            SetNode::Empty => Err(SetError::EmptySample),
            SetNode::Wrapper(w) => {
                if w.is_empty() {
                    return Err(SetError::EmptySample);
                }
                let index = rng.gen_range(0..w.len());
                w.iter().nth(index).cloned().ok_or(SetError::EmptySample)
            }
            SetNode::IntRange(r) => {
                r.validate().map_err(|_| SetError::EmptySample)?;
                Ok(Value::Int(rng.gen_range(r.lb()..=r.ub())))
            }
            SetNode::CharRange(r) => {
                r.validate().map_err(|_| SetError::EmptySample)?;
                let (lb, ub) = (r.interval().lb(), r.interval().ub());
                for _ in 0..args.max_attempts.max(1) {
                    if let Some(c) = char::from_u32(rng.gen_range(lb..=ub)) {
                        return Ok(Value::Char(c));
                    }
                }
                Err(SetError::SampleExhausted {
                    attempts: args.max_attempts,
                })
            }
            SetNode::Type(t) => Ok(t.generate(rng)),
            SetNode::Class(c) => c
                .members()
                .choose(rng)
                .cloned()
                .ok_or(SetError::EmptySample),
            SetNode::Union(children) => {
                let alive: Vec<&SetNode> =
                    children.iter().filter(|c| !c.is_known_empty()).collect();
                match alive.choose(rng) {
                    Some(child) => child.sample(rng, args),
                    None => Err(SetError::EmptySample),
                }
            }
            SetNode::Intersection(children) => {
                if args.lazy {
                    let base = &children[0];
                    let rest = &children[1..];
                    for _ in 0..args.max_attempts {
                        let candidate = base.sample(rng, args)?;
                        if rest.iter().all(|c| c.contains(&candidate)) {
                            return Ok(candidate);
                        }
                    }
                    Err(SetError::SampleExhausted {
                        attempts: args.max_attempts,
                    })
                } else {
                    choose_from_set(self.to_set(args)?, rng)
                }
            }
            SetNode::Difference(a, b) => {
                if args.lazy {
                    for _ in 0..args.max_attempts {
                        let candidate = a.sample(rng, args)?;
                        if !b.contains(&candidate) {
                            return Ok(candidate);
                        }
                    }
                    Err(SetError::SampleExhausted {
                        attempts: args.max_attempts,
                    })
                } else {
                    choose_from_set(self.to_set(args)?, rng)
                }
            }
            SetNode::Complement(a) => {
                let universe = resolve_universe(a, args)?;
                if args.lazy {
                    for _ in 0..args.max_attempts {
                        let candidate = universe.sample(rng, args)?;
                        if !a.contains(&candidate) {
                            return Ok(candidate);
                        }
                    }
                    Err(SetError::SampleExhausted {
                        attempts: args.max_attempts,
                    })
                } else {
                    choose_from_set(self.to_set(args)?, rng)
                }
            }
            SetNode::Product(children) => {
                let components = children
                    .iter()
                    .map(|child| child.sample(rng, args))
                    .collect::<Result<Vec<Value>, SetError>>()?;
                Ok(Value::Tuple(components))
            }
        }
    }

    /// Returns one element without forcing composite children into
    /// concrete sets; equivalent to sampling with `lazy` forced on.
    pub fn lazy_sample(&self, rng: &mut dyn RngCore, args: &EvalArgs) -> Result<Value, SetError> {
        self.sample(rng, &args.lazified())
    }

    /// Alias for [`SetNode::lazy_sample`]: the one-element entry point
    /// safe on infinite and large composite sets.
    #[inline]
    pub fn get_one(&self, rng: &mut dyn RngCore, args: &EvalArgs) -> Result<Value, SetError> {
        self.lazy_sample(rng, args)
    }
}

fn choose_from_set(set: FxHashSet<Value>, rng: &mut dyn RngCore) -> Result<Value, SetError> {
    if set.is_empty() {
        return Err(SetError::EmptySample);
    }
    let index = rng.gen_range(0..set.len());
    set.into_iter().nth(index).ok_or(SetError::EmptySample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IntegerType, PrintableAsciiType};
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::Arc;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_sample_membership_invariant() {
        let args = EvalArgs::default();
        let mut rng = rng();
        let nodes = vec![
            SetNode::wrapper([1i64, 5, 9]),
            SetNode::int_range(-3, 3),
            SetNode::char_range('a', 'f'),
            SetNode::union(vec![SetNode::int_range(1, 2), SetNode::wrapper([40i64])]),
            SetNode::intersection(vec![SetNode::int_range(1, 9), SetNode::int_range(5, 20)]),
            SetNode::difference(SetNode::int_range(1, 9), SetNode::int_range(3, 5)),
            SetNode::product(vec![SetNode::int_range(1, 3), SetNode::char_range('x', 'z')]),
        ];
        for node in &nodes {
            for _ in 0..64 {
                let value = node.sample(&mut rng, &args).unwrap();
                assert!(node.contains(&value), "{:?} not in {:?}", value, node);
            }
        }
    }

    #[test]
    fn test_lazy_sample_membership_invariant() {
        use rand_chacha::ChaCha8Rng;

        let args = EvalArgs::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let node = SetNode::difference(SetNode::int_range(1, 100), SetNode::int_range(2, 99));
        for _ in 0..32 {
            let value = node.lazy_sample(&mut rng, &args).unwrap();
            assert!(node.contains(&value));
        }
    }

    #[test]
    fn test_sample_empty_errors() {
        let args = EvalArgs::default();
        let mut rng = rng();
        assert_eq!(
            SetNode::empty().sample(&mut rng, &args),
            Err(SetError::EmptySample)
        );
        assert_eq!(
            SetNode::wrapper(Vec::<Value>::new()).sample(&mut rng, &args),
            Err(SetError::EmptySample)
        );
    }

    #[test]
    fn test_union_skips_empty_alternatives() {
        let args = EvalArgs::default();
        let mut rng = rng();
        let u = SetNode::union(vec![SetNode::empty(), SetNode::wrapper([7i64])]);
        for _ in 0..16 {
            assert_eq!(u.sample(&mut rng, &args).unwrap(), Value::Int(7));
        }
    }

    #[test]
    fn test_union_alternative_level_choice() {
        // Both alternatives must be reachable, regardless of their
        // relative cardinalities.
        let args = EvalArgs::default();
        let mut rng = rng();
        let u = SetNode::union(vec![
            SetNode::int_range(1, 1000),
            SetNode::wrapper([-5i64]),
        ]);
        let mut saw_singleton = false;
        let mut saw_range = false;
        for _ in 0..128 {
            match u.sample(&mut rng, &args).unwrap() {
                Value::Int(-5) => saw_singleton = true,
                Value::Int(_) => saw_range = true,
                other => panic!("unexpected sample {:?}", other),
            }
        }
        assert!(saw_singleton && saw_range);
    }

    #[test]
    fn test_lazy_intersection_exhaustion() {
        let args = EvalArgs::default().with_max_attempts(20);
        let mut rng = rng();
        let disjoint = SetNode::intersection(vec![
            SetNode::int_range(1, 10),
            SetNode::int_range(100, 200),
        ]);
        assert_eq!(
            disjoint.lazy_sample(&mut rng, &args),
            Err(SetError::SampleExhausted { attempts: 20 })
        );
    }

    #[test]
    fn test_eager_intersection_of_disjoint_is_empty_sample() {
        let args = EvalArgs::default();
        let mut rng = rng();
        let disjoint = SetNode::intersection(vec![
            SetNode::int_range(1, 10),
            SetNode::int_range(100, 200),
        ]);
        assert_eq!(
            disjoint.sample(&mut rng, &args),
            Err(SetError::EmptySample)
        );
    }

    #[test]
    fn test_complement_sampling() {
        let args = EvalArgs::default();
        let mut rng = rng();
        let c = SetNode::complement(SetNode::char_range('a', 'z'));
        for _ in 0..32 {
            let value = c.get_one(&mut rng, &args).unwrap();
            assert!(c.contains(&value));
            // Drawn from the printable-ASCII default universe.
            match value {
                Value::Char(ch) => assert!((' '..='~').contains(&ch) && !ch.is_ascii_lowercase()),
                other => panic!("unexpected sample {:?}", other),
            }
        }
    }

    #[test]
    fn test_get_one_on_infinite_sets() {
        let args = EvalArgs::default();
        let mut rng = rng();
        let t = SetNode::type_of(Arc::new(IntegerType));
        assert!(matches!(t.get_one(&mut rng, &args).unwrap(), Value::Int(_)));

        let ascii = SetNode::type_of(Arc::new(PrintableAsciiType));
        assert!(matches!(
            ascii.get_one(&mut rng, &args).unwrap(),
            Value::Char(_)
        ));
    }
}
