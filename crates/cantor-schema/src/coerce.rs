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

//! # Schema Argument Coercion
//!
//! Grammar constructors accept heterogeneous arguments: bare scalars,
//! lists of values, type strategies, already-built set nodes, and
//! nested grammar nodes. `SchemaArg` tags each admissible shape, and
//! [`SchemaArg::wrap`] performs the uniform coercion into a grammar
//! node before children are attached. `Or` applies one extra rule of
//! its own: a bare value *list* argument denotes a nested sequence of
//! those values, not a set of alternatives.

use crate::node::SchemaNode;
use cantor_core::value::Value;
use cantor_sets::{SetNode, TypeDomain};
use std::sync::Arc;

/// One heterogeneous constructor argument of the grammar layer.
#[derive(Clone)]
pub enum SchemaArg {
    /// An already-built grammar node, attached as-is.
    Schema(SchemaNode),
    /// An already-built set node, wrapped as a leaf grammar node.
    Node(SetNode),
    /// A type strategy, denoting the set of that type's instances.
    Type(Arc<dyn TypeDomain>),
    /// A bare list of values.
    Items(Vec<Value>),
    /// A single bare value, denoting a singleton set.
    Scalar(Value),
}

impl SchemaArg {
    /// The uniform coercion into a grammar node: types become
    /// type-denoted set leaves, lists become explicit finite sets,
    /// scalars become singletons.
    pub fn wrap(self) -> SchemaNode {
        match self {
            SchemaArg::Schema(node) => node,
            SchemaArg::Node(set) => SchemaNode::set(set),
            SchemaArg::Type(domain) => SchemaNode::set(SetNode::type_of(domain)),
            SchemaArg::Items(values) => SchemaNode::set(SetNode::wrapper(values)),
            SchemaArg::Scalar(value) => SchemaNode::set(SetNode::wrapper([value])),
        }
    }

    /// The alternative-position coercion used by `Or`: a bare list
    /// denotes a nested sequence of its values; everything else wraps
    /// exactly as [`SchemaArg::wrap`] does.
    pub fn wrap_alternative(self) -> SchemaNode {
        match self {
            SchemaArg::Items(values) => {
                SchemaNode::sequence(values.into_iter().map(SchemaArg::Scalar).collect())
            }
            other => other.wrap(),
        }
    }
}

impl std::fmt::Debug for SchemaArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaArg::Schema(node) => f.debug_tuple("Schema").field(node).finish(),
            SchemaArg::Node(set) => f.debug_tuple("Node").field(set).finish(),
            SchemaArg::Type(domain) => f.debug_tuple("Type").field(&domain.name()).finish(),
            SchemaArg::Items(values) => f.debug_tuple("Items").field(values).finish(),
            SchemaArg::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
        }
    }
}

impl From<SchemaNode> for SchemaArg {
    fn from(node: SchemaNode) -> Self {
        SchemaArg::Schema(node)
    }
}

impl From<SetNode> for SchemaArg {
    fn from(set: SetNode) -> Self {
        SchemaArg::Node(set)
    }
}

impl From<Arc<dyn TypeDomain>> for SchemaArg {
    fn from(domain: Arc<dyn TypeDomain>) -> Self {
        SchemaArg::Type(domain)
    }
}

impl From<Value> for SchemaArg {
    fn from(value: Value) -> Self {
        SchemaArg::Scalar(value)
    }
}

impl From<i64> for SchemaArg {
    fn from(value: i64) -> Self {
        SchemaArg::Scalar(Value::Int(value))
    }
}

impl From<char> for SchemaArg {
    fn from(value: char) -> Self {
        SchemaArg::Scalar(Value::Char(value))
    }
}

impl From<&str> for SchemaArg {
    fn from(value: &str) -> Self {
        SchemaArg::Scalar(Value::from(value))
    }
}

impl From<Vec<Value>> for SchemaArg {
    fn from(values: Vec<Value>) -> Self {
        SchemaArg::Items(values)
    }
}

impl From<Vec<i64>> for SchemaArg {
    fn from(values: Vec<i64>) -> Self {
        SchemaArg::Items(values.into_iter().map(Value::Int).collect())
    }
}
