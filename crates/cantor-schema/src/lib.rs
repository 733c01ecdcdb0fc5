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

//! # Cantor Schema
//!
//! A grammar of structured sequences compiled onto the symbolic set
//! algebra. `Sequence` denotes ordered composition (a Cartesian
//! product), `Or` a union of alternatives, and `Repeat` a bounded union
//! of fixed-length products. Each grammar node compiles its set
//! representation inline at construction, so a built node is immutable
//! and ready to enumerate or sample.
//!
//! The grammar layer is a pure client of `cantor-sets`: it builds
//! `Union`/`Product`/`Wrapper` trees and re-linearizes the nested tuple
//! results back into flat sequences at its API boundary.
//!
//! Heterogeneous construction arguments (bare scalars, value lists,
//! type strategies, set nodes, nested grammar nodes) are admitted
//! through the explicit [`SchemaArg`](coerce::SchemaArg) coercion.

pub mod coerce;
pub mod node;

pub use coerce::SchemaArg;
pub use node::SchemaNode;
