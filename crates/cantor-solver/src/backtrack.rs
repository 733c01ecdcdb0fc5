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

//! # Backtracking Solver
//!
//! A depth-first search engine over an explicit frame stack. Each
//! frame owns the binding accumulated so far, the set of assigned
//! variables, its own narrowed domain copy, one variable chosen
//! uniformly at random among the unassigned, and the candidate values
//! drawn for it through lazy enumeration, the only enumeration mode
//! search is permitted to use, since domains may be conceptually
//! infinite.
//!
//! Narrowed domains are threaded down explicitly from frame to frame.
//! Abandoning a frame simply drops its copy, so there is no shared
//! state to restore on backtracking or on early termination.
//!
//! Forward checking, enabled by default, prunes one constraint hop
//! ahead: at frame creation, every constraint with exactly one
//! still-unassigned argument has the violating subset of that
//! variable's domain removed (via an explicit difference node) from
//! the frame-local copy. This bounds wasted exploration for
//! single-hop dependencies only; it is not arc consistency, and it
//! never changes the solution set.
//!
//! The random variable order is semantic: callers must not rely on any
//! particular assignment or yield order.

use crate::{stats::SearchStatistics, Solver};
use cantor_model::{Binding, Domain, Problem};
use cantor_sets::{EvalArgs, SetError, SetNode};
use cantor_core::value::Value;
use fixedbitset::FixedBitSet;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// The backtracking solver with optional forward checking.
#[derive(Debug, Clone)]
pub struct BacktrackSolver {
    forward_checking: bool,
    args: EvalArgs,
    seed: Option<u64>,
}

impl Default for BacktrackSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BacktrackSolver {
    /// Creates a solver with forward checking enabled and default
    /// evaluation arguments.
    #[inline]
    pub fn new() -> Self {
        Self {
            forward_checking: true,
            args: EvalArgs::default(),
            seed: None,
        }
    }

    /// Enables or disables forward checking. Either setting yields the
    /// same solution set; only the amount of explored search differs.
    #[inline]
    pub fn with_forward_checking(mut self, forward_checking: bool) -> Self {
        self.forward_checking = forward_checking;
        self
    }

    /// Overrides the evaluation arguments used for candidate draws.
    #[inline]
    pub fn with_args(mut self, args: EvalArgs) -> Self {
        self.args = args;
        self
    }

    /// Seeds the random variable choice, making the search order
    /// reproducible.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Lazily yields every satisfying binding of `problem`.
    pub fn solutions<'a>(&self, problem: &'a Problem) -> Result<BacktrackIter<'a>, SetError> {
        self.solutions_with(problem, Binding::new())
    }

    /// Lazily yields every satisfying completion of the partial
    /// binding `theory`. A theory that already binds every variable is
    /// yielded back as-is.
    pub fn solutions_with<'a>(
        &self,
        problem: &'a Problem,
        theory: Binding,
    ) -> Result<BacktrackIter<'a>, SetError> {
        let vars: Vec<String> = problem.domain().names().map(str::to_string).collect();
        let mut assigned = FixedBitSet::with_capacity(vars.len());
        for (index, var) in vars.iter().enumerate() {
            if theory.contains_key(var) {
                assigned.insert(index);
            }
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut iter = BacktrackIter {
            problem,
            vars,
            forward_checking: self.forward_checking,
            args: self.args.lazified(),
            rng,
            stack: Vec::new(),
            terminal: None,
            failure: None,
            stats: SearchStatistics::default(),
        };

        if iter.assigned_count(&assigned) == iter.vars.len() {
            iter.terminal = Some(theory);
        } else {
            let frame = iter.make_frame(theory, assigned, problem.domain().clone())?;
            iter.stack.push(frame);
        }
        Ok(iter)
    }
}

impl Solver for BacktrackSolver {
    fn solutions<'a>(
        &self,
        problem: &'a Problem,
    ) -> Result<Box<dyn Iterator<Item = Binding> + 'a>, SetError> {
        Ok(Box::new(BacktrackSolver::solutions(self, problem)?))
    }
}

struct Frame {
    binding: Binding,
    assigned: FixedBitSet,
    domain: Domain,
    var: usize,
    candidates: std::vec::IntoIter<Value>,
}

/// The lazy solution stream of a [`BacktrackSolver`] run.
pub struct BacktrackIter<'a> {
    problem: &'a Problem,
    vars: Vec<String>,
    forward_checking: bool,
    args: EvalArgs,
    rng: StdRng,
    stack: Vec<Frame>,
    terminal: Option<Binding>,
    failure: Option<SetError>,
    stats: SearchStatistics,
}

impl<'a> BacktrackIter<'a> {
    /// Counters accumulated so far.
    #[inline]
    pub fn stats(&self) -> &SearchStatistics {
        &self.stats
    }

    /// The evaluation error that aborted the search, if any. An
    /// aborted iterator stops yielding; well-formed domains never
    /// abort.
    #[inline]
    pub fn failure(&self) -> Option<&SetError> {
        self.failure.as_ref()
    }

    fn assigned_count(&self, assigned: &FixedBitSet) -> usize {
        assigned.count_ones(..)
    }

    /// Builds the frame exploring one more variable under `binding`,
    /// deriving its narrowed domain from the parent's copy.
    fn make_frame(
        &mut self,
        binding: Binding,
        assigned: FixedBitSet,
        mut domain: Domain,
    ) -> Result<Frame, SetError> {
        if self.forward_checking {
            self.forward_check(&mut domain, &binding)?;
        }

        let unassigned: Vec<usize> = (0..self.vars.len())
            .filter(|&index| !assigned.contains(index))
            .collect();
        let var = match unassigned.choose(&mut self.rng) {
            Some(&index) => index,
            None => 0,
        };

        let candidates: Vec<Value> = match domain.get(&self.vars[var]) {
            Some(node) => node.lazy_enumerate(&self.args)?.collect(),
            None => Vec::new(),
        };

        Ok(Frame {
            binding,
            assigned,
            domain,
            var,
            candidates: candidates.into_iter(),
        })
    }

    /// One-hop pruning: for every constraint with exactly one
    /// still-unassigned argument, remove the values of that variable's
    /// domain that would violate the constraint once assigned.
    fn forward_check(&mut self, domain: &mut Domain, binding: &Binding) -> Result<(), SetError> {
        for constraint in self.problem.constraints() {
            let mut unbound = constraint
                .args()
                .iter()
                .filter(|arg| !binding.contains_key(*arg));
            let var = match (unbound.next(), unbound.next()) {
                (Some(var), None) => var.clone(),
                _ => continue,
            };

            let node = match domain.get(&var) {
                Some(node) => node.clone(),
                None => continue,
            };
            let mut violating: Vec<Value> = Vec::new();
            for value in node.lazy_enumerate(&self.args)? {
                let mut probe = binding.clone();
                probe.insert(var.clone(), value.clone());
                if !constraint.check(&probe) {
                    violating.push(value);
                }
            }
            if !violating.is_empty() {
                self.stats.forward_check_prunings += violating.len() as u64;
                domain.insert(
                    var,
                    SetNode::difference(node, SetNode::wrapper(violating)),
                );
            }
        }
        Ok(())
    }
}

impl<'a> Iterator for BacktrackIter<'a> {
    type Item = Binding;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(theory) = self.terminal.take() {
            self.stats.solutions += 1;
            return Some(theory);
        }
        loop {
            let frame = self.stack.last_mut()?;
            match frame.candidates.next() {
                None => {
                    self.stack.pop();
                    self.stats.backtracks += 1;
                }
                Some(value) => {
                    let var = frame.var;
                    let mut binding = frame.binding.clone();
                    let mut assigned = frame.assigned.clone();
                    let parent_domain = frame.domain.clone();
                    binding.insert(self.vars[var].clone(), value);
                    assigned.insert(var);

                    self.stats.nodes_explored += 1;
                    if !self.problem.check_involving(&self.vars[var], &binding) {
                        continue;
                    }
                    if self.assigned_count(&assigned) == self.vars.len() {
                        self.stats.solutions += 1;
                        return Some(binding);
                    }
                    match self.make_frame(binding, assigned, parent_domain) {
                        Ok(child) => self.stack.push(child),
                        Err(error) => {
                            self.failure = Some(error);
                            self.stack.clear();
                            return None;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cantor_model::{AllDifferentConstraint, Constraint, PredicateConstraint};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn lt(a: &'static str, b: &'static str) -> Arc<dyn Constraint> {
        Arc::new(PredicateConstraint::new("lt", vec![a, b], |values| {
            values[0] < values[1]
        }))
    }

    fn solution_set(iter: BacktrackIter<'_>) -> BTreeSet<Binding> {
        iter.collect()
    }

    fn expected_lt() -> BTreeSet<Binding> {
        [(1, 2), (1, 3), (2, 3)]
            .into_iter()
            .map(|(a, b)| {
                let mut binding = Binding::new();
                binding.insert("a".to_string(), Value::Int(a));
                binding.insert("b".to_string(), Value::Int(b));
                binding
            })
            .collect()
    }

    fn lt_problem() -> Problem {
        let mut domain = Domain::new();
        domain.insert("a", vec![1i64, 2, 3]);
        domain.insert("b", vec![2i64, 3]);
        Problem::new(&domain, vec![lt("a", "b")]).unwrap()
    }

    #[test]
    fn test_sound_and_complete() {
        let problem = lt_problem();
        for seed in 0..8 {
            let solver = BacktrackSolver::new().with_seed(seed);
            assert_eq!(
                solution_set(solver.solutions(&problem).unwrap()),
                expected_lt()
            );
        }
    }

    #[test]
    fn test_unsatisfiable_is_exhausted_not_an_error() {
        let mut domain = Domain::new();
        domain.insert("a", vec![3i64, 4]);
        domain.insert("b", vec![1i64, 2]);
        let problem = Problem::new(&domain, vec![lt("a", "b")]).unwrap();

        let mut iter = BacktrackSolver::new()
            .with_seed(1)
            .solutions(&problem)
            .unwrap();
        assert!(iter.next().is_none());
        assert!(iter.failure().is_none());
    }

    #[test]
    fn test_forward_checking_preserves_solution_set() {
        let problem = lt_problem();
        for seed in 0..8 {
            let with_fc = BacktrackSolver::new()
                .with_seed(seed)
                .with_forward_checking(true);
            let without_fc = BacktrackSolver::new()
                .with_seed(seed)
                .with_forward_checking(false);
            assert_eq!(
                solution_set(with_fc.solutions(&problem).unwrap()),
                solution_set(without_fc.solutions(&problem).unwrap())
            );
        }
    }

    #[test]
    fn test_forward_checking_prunes() {
        let mut domain = Domain::new();
        domain.insert("a", vec![1i64, 2, 3, 4, 5]);
        domain.insert("b", vec![1i64, 2, 3, 4, 5]);
        let problem = Problem::new(&domain, vec![lt("a", "b")]).unwrap();

        let mut iter = BacktrackSolver::new()
            .with_seed(3)
            .solutions(&problem)
            .unwrap();
        let count = iter.by_ref().count();
        assert_eq!(count, 10);
        assert!(iter.stats().forward_check_prunings > 0);
        assert_eq!(iter.stats().solutions, 10);
    }

    #[test]
    fn test_matches_simple_solver() {
        let mut domain = Domain::new();
        domain.insert("a", SetNode::int_range(1, 4));
        domain.insert("b", SetNode::int_range(1, 4));
        domain.insert("c", SetNode::int_range(1, 4));
        let problem = Problem::new(
            &domain,
            vec![
                Arc::new(AllDifferentConstraint::new(vec!["a", "b", "c"])) as Arc<dyn Constraint>,
                lt("a", "b"),
            ],
        )
        .unwrap();

        let brute: BTreeSet<Binding> = crate::SimpleSolver::new()
            .solutions(&problem)
            .unwrap()
            .collect();
        let backtracked = solution_set(
            BacktrackSolver::new()
                .with_seed(9)
                .solutions(&problem)
                .unwrap(),
        );
        assert_eq!(brute, backtracked);
        assert!(!brute.is_empty());
    }

    #[test]
    fn test_theory_seeding() {
        let problem = lt_problem();
        let mut theory = Binding::new();
        theory.insert("a".to_string(), Value::Int(2));

        let solutions = solution_set(
            BacktrackSolver::new()
                .with_seed(0)
                .solutions_with(&problem, theory)
                .unwrap(),
        );
        let expected: BTreeSet<Binding> = [(2, 3)]
            .into_iter()
            .map(|(a, b)| {
                let mut binding = Binding::new();
                binding.insert("a".to_string(), Value::Int(a));
                binding.insert("b".to_string(), Value::Int(b));
                binding
            })
            .collect();
        assert_eq!(solutions, expected);
    }

    #[test]
    fn test_fully_bound_theory_is_yielded_as_is() {
        let problem = lt_problem();
        let mut theory = Binding::new();
        theory.insert("a".to_string(), Value::Int(3));
        theory.insert("b".to_string(), Value::Int(2));

        let solutions: Vec<Binding> = BacktrackSolver::new()
            .solutions_with(&problem, theory.clone())
            .unwrap()
            .collect();
        assert_eq!(solutions, vec![theory]);
    }

    #[test]
    fn test_single_variable_problem() {
        let mut domain = Domain::new();
        domain.insert("a", vec![1i64, 2, 3]);
        let problem = Problem::new(&domain, Vec::new()).unwrap();

        let solutions = solution_set(
            BacktrackSolver::new()
                .with_seed(5)
                .solutions(&problem)
                .unwrap(),
        );
        assert_eq!(solutions.len(), 3);
    }

    #[test]
    fn test_separate_runs_are_independent() {
        let problem = lt_problem();
        let solver = BacktrackSolver::new().with_seed(2);
        let first = solution_set(solver.solutions(&problem).unwrap());
        let second = solution_set(solver.solutions(&problem).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_difference_narrowed_domains_stay_consistent() {
        // Chained constraints force repeated narrowing through
        // difference nodes layered on difference nodes.
        let mut domain = Domain::new();
        domain.insert("a", SetNode::int_range(1, 6));
        domain.insert("b", SetNode::int_range(1, 6));
        domain.insert("c", SetNode::int_range(1, 6));
        let problem =
            Problem::new(&domain, vec![lt("a", "b"), lt("b", "c")]).unwrap();

        for seed in 0..4 {
            let solutions = solution_set(
                BacktrackSolver::new()
                    .with_seed(seed)
                    .solutions(&problem)
                    .unwrap(),
            );
            // C(6, 3) strictly increasing triples.
            assert_eq!(solutions.len(), 20);
            for binding in &solutions {
                let a = binding["a"].as_int().unwrap();
                let b = binding["b"].as_int().unwrap();
                let c = binding["c"].as_int().unwrap();
                assert!(a < b && b < c);
            }
        }
    }
}
