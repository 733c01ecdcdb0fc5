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

//! # Cantor Model
//!
//! **The constraint-problem model for the Cantor solver stack.**
//!
//! This crate defines the data structures a solver consumes: a
//! [`Domain`](domain::Domain) mapping variable names to symbolic sets,
//! the [`Constraint`](constraint::Constraint) trait for finite-arity
//! predicates over named variables, and the validated
//! [`Problem`](problem::Problem) that binds the two together.
//!
//! ## Design Philosophy
//!
//! 1. **Fail-Fast**: a `Problem` validates referential integrity at
//!    construction; a constraint over an undeclared variable is
//!    rejected before any search begins.
//! 2. **Isolation**: a `Problem` owns a private copy of its domain, so
//!    constraint preprocessing never mutates caller state, and solvers
//!    thread their own narrowed copies instead of mutating shared
//!    state.
//! 3. **Immutability after construction**: domains, constraints, and
//!    problems are read-only from a solver's perspective.

pub mod constraint;
pub mod domain;
pub mod problem;

pub use constraint::{
    AllDifferentConstraint, Binding, Constraint, EqualsConstraint, PredicateConstraint,
};
pub use domain::Domain;
pub use problem::{Problem, ProblemError};
