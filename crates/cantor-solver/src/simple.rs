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

//! # Brute-Force Solver
//!
//! Forms the full Cartesian product of the domains in sorted variable
//! order, enumerates every full tuple, and keeps the tuples every
//! constraint accepts. Simple and exact on small finite domains;
//! unsafe on large or infinite ones, where the enumeration cap of the
//! evaluation arguments silently truncates the searched space.

use crate::Solver;
use cantor_model::{Binding, Problem};
use cantor_sets::{EvalArgs, SetError, SetNode};
use cantor_core::value::Value;

/// The brute-force Cartesian-enumeration solver.
#[derive(Debug, Clone, Default)]
pub struct SimpleSolver {
    args: EvalArgs,
}

impl SimpleSolver {
    /// Creates a solver with default evaluation arguments.
    #[inline]
    pub fn new() -> Self {
        Self {
            args: EvalArgs::default(),
        }
    }

    /// Overrides the evaluation arguments (e.g. a larger enumeration
    /// cap for a bigger, still finite, search space).
    #[inline]
    pub fn with_args(mut self, args: EvalArgs) -> Self {
        self.args = args;
        self
    }

    /// Lazily yields every satisfying full binding of `problem`.
    pub fn solutions<'a>(
        &self,
        problem: &'a Problem,
    ) -> Result<impl Iterator<Item = Binding> + 'a, SetError> {
        let vars: Vec<String> = problem.domain().names().map(str::to_string).collect();
        let rows: Vec<Value> = if vars.is_empty() {
            vec![Value::unit()]
        } else {
            let sets: Vec<SetNode> = problem.domain().iter().map(|(_, set)| set.clone()).collect();
            SetNode::product(sets).enumerate(&self.args)?.collect()
        };

        Ok(rows.into_iter().filter_map(move |row| {
            let components = match row {
                Value::Tuple(components) => components,
                single => vec![single],
            };
            let binding: Binding = vars
                .iter()
                .cloned()
                .zip(components)
                .collect();
            problem.check(&binding).then_some(binding)
        }))
    }
}

impl Solver for SimpleSolver {
    fn solutions<'a>(
        &self,
        problem: &'a Problem,
    ) -> Result<Box<dyn Iterator<Item = Binding> + 'a>, SetError> {
        Ok(Box::new(SimpleSolver::solutions(self, problem)?))
    }
}
