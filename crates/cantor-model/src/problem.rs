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

//! # Problems
//!
//! A `Problem` binds a domain to a constraint list. Construction is
//! fail-fast: referential integrity is validated against the caller's
//! domain before anything else, then the problem takes a private
//! domain copy and runs every constraint's `preprocess` hook against
//! it in list order, and finally derives the variable-to-constraint
//! index solvers use for targeted checking.

use crate::{
    constraint::{Binding, Constraint},
    domain::Domain,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// The error type for problem construction and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    /// A constraint references a variable absent from the domain.
    UnknownVariable {
        /// The undeclared variable name.
        variable: String,
        /// The index of the offending constraint in the constraint
        /// list.
        constraint: usize,
    },
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable {
                variable,
                constraint,
            } => write!(
                f,
                "Constraint {} references variable '{}' which is not declared in the domain",
                constraint, variable
            ),
        }
    }
}

impl std::error::Error for ProblemError {}

/// A validated constraint-satisfaction problem.
///
/// Immutable after construction; solvers that narrow domains work on
/// their own copies.
#[derive(Debug)]
pub struct Problem {
    domain: Domain,
    constraints: Vec<Arc<dyn Constraint>>,
    var_constraints: FxHashMap<String, Vec<usize>>,
}

impl Problem {
    /// Builds a problem over a private copy of `domain`.
    ///
    /// Fails with [`ProblemError::UnknownVariable`] if any constraint
    /// references an undeclared variable. Each constraint's
    /// `preprocess` hook runs exactly once, in list order, against the
    /// private copy.
    pub fn new(
        domain: &Domain,
        constraints: Vec<Arc<dyn Constraint>>,
    ) -> Result<Self, ProblemError> {
        validate_references(domain, &constraints)?;

        let mut owned = domain.clone();
        for constraint in &constraints {
            constraint.preprocess(&mut owned);
        }

        let mut var_constraints: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (index, constraint) in constraints.iter().enumerate() {
            for arg in constraint.args() {
                let entries = var_constraints.entry(arg.clone()).or_default();
                if !entries.contains(&index) {
                    entries.push(index);
                }
            }
        }

        Ok(Self {
            domain: owned,
            constraints,
            var_constraints,
        })
    }

    /// The problem's (preprocessed) domain.
    #[inline]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The constraint list.
    #[inline]
    pub fn constraints(&self) -> &[Arc<dyn Constraint>] {
        &self.constraints
    }

    /// Indices of the constraints mentioning `var`.
    pub fn constraints_on(&self, var: &str) -> &[usize] {
        self.var_constraints
            .get(var)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Re-checks referential integrity.
    pub fn validate(&self) -> Result<(), ProblemError> {
        validate_references(&self.domain, &self.constraints)
    }

    /// Returns `true` iff every constraint whose arguments are fully
    /// covered by `binding` accepts it; partially bound constraints
    /// are vacuously satisfied.
    pub fn check(&self, binding: &Binding) -> bool {
        self.constraints
            .iter()
            .filter(|c| c.is_fully_bound(binding))
            .all(|c| c.check(binding))
    }

    /// Like [`Problem::check`], restricted to the constraints that
    /// mention `var`. Used by search after assigning `var`, when every
    /// other constraint was already checked on an earlier binding.
    pub fn check_involving(&self, var: &str, binding: &Binding) -> bool {
        self.constraints_on(var)
            .iter()
            .map(|&index| &self.constraints[index])
            .filter(|c| c.is_fully_bound(binding))
            .all(|c| c.check(binding))
    }
}

fn validate_references(
    domain: &Domain,
    constraints: &[Arc<dyn Constraint>],
) -> Result<(), ProblemError> {
    for (index, constraint) in constraints.iter().enumerate() {
        for arg in constraint.args() {
            if !domain.contains_var(arg) {
                return Err(ProblemError::UnknownVariable {
                    variable: arg.clone(),
                    constraint: index,
                });
            }
        }
    }
    Ok(())
}
