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

//! # Cantor Solver
//!
//! Constraint solvers over symbolic-set domains. A solver is a pure
//! generator over satisfying bindings: it holds no state across
//! separate `solutions` calls, and an unsatisfiable problem simply
//! yields nothing. Malformed problems never reach a solver; they are
//! rejected at `Problem` construction.
//!
//! Two strategies are provided:
//!
//! - [`SimpleSolver`](simple::SimpleSolver): brute-force Cartesian
//!   enumeration plus constraint filtering. Intended only for small,
//!   fully enumerable domains.
//! - [`BacktrackSolver`](backtrack::BacktrackSolver): depth-first
//!   search over one variable at a time, choosing the next variable
//!   uniformly at random, drawing candidates exclusively through lazy
//!   enumeration, and optionally pruning one constraint hop ahead via
//!   forward checking.

pub mod backtrack;
pub mod simple;
pub mod stats;

use cantor_model::{Binding, Problem};
use cantor_sets::SetError;

pub use backtrack::BacktrackSolver;
pub use simple::SimpleSolver;
pub use stats::SearchStatistics;

/// A pluggable solving strategy.
pub trait Solver {
    /// Lazily yields every satisfying binding of `problem`.
    fn solutions<'a>(
        &self,
        problem: &'a Problem,
    ) -> Result<Box<dyn Iterator<Item = Binding> + 'a>, SetError>;
}
