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

//! # Variable Domains
//!
//! A `Domain` maps variable names to the symbolic set of their
//! candidate values. Insertion coerces through `Into<SetNode>`, so
//! call sites may assign bare value lists, single values, or type
//! strategies directly. Variables iterate in sorted name order, which
//! downstream solvers rely on for reproducible variable lists.

use cantor_sets::SetNode;
use std::collections::BTreeMap;

/// A mapping from variable name to candidate-value set.
///
/// `clone()` is the mutation-isolating copy: the variable map is
/// duplicated while the set nodes themselves are shared immutable
/// values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain {
    vars: BTreeMap<String, SetNode>,
}

impl Domain {
    /// Creates an empty domain.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `var` the candidate set `value`, coercing bare values
    /// through `Into<SetNode>`. An existing assignment is replaced.
    pub fn insert(&mut self, var: impl Into<String>, value: impl Into<SetNode>) {
        self.vars.insert(var.into(), value.into());
    }

    /// The candidate set of `var`, if declared.
    #[inline]
    pub fn get(&self, var: &str) -> Option<&SetNode> {
        self.vars.get(var)
    }

    /// Returns `true` if `var` is declared.
    #[inline]
    pub fn contains_var(&self, var: &str) -> bool {
        self.vars.contains_key(var)
    }

    /// The number of declared variables.
    #[inline]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variables are declared.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Iterates `(name, set)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SetNode)> {
        self.vars.iter().map(|(name, set)| (name.as_str(), set))
    }
}
