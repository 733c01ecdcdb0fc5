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

//! # Constraints
//!
//! A constraint is a finite-arity predicate over named variables. The
//! `check` contract receives a binding that fully covers the
//! constraint's arguments; partially bound constraints are vacuously
//! satisfied by the problem layer and never reach `check`.
//!
//! The optional `preprocess` hook runs exactly once per problem
//! construction, against the problem's private domain copy, and may
//! narrow domains up front; the equality constraint uses it to pin its
//! variable to a singleton before any search begins.

use crate::domain::Domain;
use cantor_core::value::Value;
use cantor_sets::SetNode;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

/// An assignment of values to variable names.
pub type Binding = BTreeMap<String, Value>;

/// A finite-arity predicate over named variables.
pub trait Constraint: std::fmt::Debug {
    /// The ordered variable names this constraint ranges over.
    fn args(&self) -> &[String];

    /// Evaluates the predicate against a binding covering every
    /// argument.
    fn check(&self, binding: &Binding) -> bool;

    /// One-time domain-narrowing hook, run at problem construction in
    /// constraint-list order. The default does nothing.
    fn preprocess(&self, _domain: &mut Domain) {}

    /// Returns `true` if every argument is present in `binding`.
    fn is_fully_bound(&self, binding: &Binding) -> bool {
        self.args().iter().all(|arg| binding.contains_key(arg))
    }
}

/// Pins one variable to one value; preprocessing narrows the
/// variable's domain to that singleton.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualsConstraint {
    args: Vec<String>,
    value: Value,
}

impl EqualsConstraint {
    /// Creates the constraint `var == value`.
    pub fn new(var: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            args: vec![var.into()],
            value: value.into(),
        }
    }

    /// The pinned value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Constraint for EqualsConstraint {
    fn args(&self) -> &[String] {
        &self.args
    }

    fn check(&self, binding: &Binding) -> bool {
        binding.get(&self.args[0]) == Some(&self.value)
    }

    fn preprocess(&self, domain: &mut Domain) {
        if domain.contains_var(&self.args[0]) {
            domain.insert(self.args[0].clone(), SetNode::wrapper([self.value.clone()]));
        }
    }
}

/// A constraint defined by an arbitrary predicate over the argument
/// values, received in declaration order.
pub struct PredicateConstraint {
    name: &'static str,
    args: Vec<String>,
    predicate: Box<dyn Fn(&[Value]) -> bool + Send + Sync>,
}

impl PredicateConstraint {
    /// Creates a named predicate constraint over `args`.
    pub fn new<F>(name: &'static str, args: Vec<impl Into<String>>, predicate: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            args: args.into_iter().map(Into::into).collect(),
            predicate: Box::new(predicate),
        }
    }
}

impl std::fmt::Debug for PredicateConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateConstraint")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish()
    }
}

impl Constraint for PredicateConstraint {
    fn args(&self) -> &[String] {
        &self.args
    }

    fn check(&self, binding: &Binding) -> bool {
        let mut values = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            match binding.get(arg) {
                Some(value) => values.push(value.clone()),
                None => return false,
            }
        }
        (self.predicate)(&values)
    }
}

/// Requires all argument variables to take pairwise distinct values.
#[derive(Debug, Clone, PartialEq)]
pub struct AllDifferentConstraint {
    args: Vec<String>,
}

impl AllDifferentConstraint {
    /// Creates the constraint over the given variables.
    pub fn new(args: Vec<impl Into<String>>) -> Self {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Constraint for AllDifferentConstraint {
    fn args(&self) -> &[String] {
        &self.args
    }

    fn check(&self, binding: &Binding) -> bool {
        let mut seen: FxHashSet<&Value> = FxHashSet::default();
        for arg in &self.args {
            match binding.get(arg) {
                Some(value) => {
                    if !seen.insert(value) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }
}
