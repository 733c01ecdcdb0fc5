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

//! # Cantor Core
//!
//! Foundational primitives for the Cantor symbolic-set ecosystem. This
//! crate consolidates the reusable building blocks that underpin the
//! higher-level set, schema, and solver crates.
//!
//! ## Modules
//!
//! - `math`: Closed integer interval `[lb, ub]` primitives with exact
//!   set operations (merge/union-with-remainder/disjoint cover/
//!   intersection/difference/complement), cardinality counting that is
//!   safe over the full machine-integer range, and ascending point
//!   iteration.
//! - `value`: The closed, hashable element universe (`Value`) that
//!   symbolic sets range over, including the tuple carrier used for
//!   Cartesian products.
//! - `utils`: Iterator adapters (`RoundRobin`, `CartesianProduct`) used
//!   by composite-set enumeration.
//!
//! ## Purpose
//!
//! These primitives keep the set-operator and solver crates free of
//! ad-hoc arithmetic and iterator plumbing, so the exact edge-case
//! policies of the interval algebra live in exactly one place.

pub mod math;
pub mod utils;
pub mod value;
