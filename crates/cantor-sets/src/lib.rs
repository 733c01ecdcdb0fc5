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

//! # Cantor Sets
//!
//! Symbolic set representations: explicit finite sets, exact integer
//! and character ranges, type-denoted infinite sets, class-denoted
//! sets, and the operator nodes (`Union`, `Intersection`, `Difference`,
//! `Complement`, `Product`) that combine them.
//!
//! ## Architecture
//!
//! The central type is the [`SetNode`](node::SetNode) sum type. Leaves
//! carry their own data; operator nodes carry only children. Nodes are
//! immutable after construction and value-compared, so whole trees can
//! be shared read-only across threads.
//!
//! The evaluation surface is split by concern:
//!
//! - `node`: construction, membership, cardinality, validation, and the
//!   structural queries (`overlaps`, `is_superset`, universes).
//! - `enumerate`: bounded lazy enumeration and materialization
//!   (`to_set`), including the exact range fast paths.
//! - `sample`: single-element sampling, including the bounded rejection
//!   loops for the filtering operators.
//!
//! Every evaluation entry point takes an [`EvalArgs`](args::EvalArgs)
//! record whose caps (`max_enumerate`, `type_enumerate`,
//! `max_attempts`) are hard limits, never hints: type-denoted and
//! complement-shaped sets can otherwise loop forever.

pub mod args;
pub mod error;
pub mod node;
pub mod range;
pub mod types;
pub mod wrapper;

mod enumerate;
mod sample;

pub use args::EvalArgs;
pub use error::SetError;
pub use node::{Cardinality, SetNode, ValueIter};
pub use types::{ClassHierarchy, TypeDomain};
pub use wrapper::SetWrapper;
