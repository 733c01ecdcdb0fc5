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

//! # Type-Denoted and Class-Denoted Sets
//!
//! `TypeWrapper` denotes the conceptually infinite set of all values
//! satisfying a type. The type itself is a strategy object supplied at
//! construction, a capability bundle of `query`/`coerce`/`generate`
//! functions, so there is no ambient registry to consult.
//!
//! `ClassWrapper` denotes the finite set of a class together with all
//! of its transitive subclasses, precomputed at construction from an
//! explicit `ClassHierarchy`.

use crate::error::SetError;
use cantor_core::value::Value;
use rand::{Rng, RngCore};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// A capability bundle describing one type of values.
///
/// Implementations are supplied to [`TypeWrapper::new`] by the caller;
/// the set layer never looks a type up from global state.
pub trait TypeDomain: Send + Sync {
    /// The name of the type, used for display and value comparison of
    /// type-denoted sets.
    fn name(&self) -> &str;

    /// Returns `true` if `value` is an instance of the type.
    fn query(&self, value: &Value) -> bool;

    /// Attempts to convert `value` into an instance of the type.
    fn coerce(&self, value: &Value) -> Option<Value>;

    /// Produces one arbitrary instance of the type.
    ///
    /// Generation is not required to be deterministic or free of
    /// repetition; enumeration of a type-denoted set inherits both
    /// caveats.
    fn generate(&self, rng: &mut dyn RngCore) -> Value;
}

/// The set of all instances of a type. Conceptually infinite.
#[derive(Clone)]
pub struct TypeWrapper {
    domain: Arc<dyn TypeDomain>,
}

impl TypeWrapper {
    /// Wraps the given type strategy.
    #[inline]
    pub fn new(domain: Arc<dyn TypeDomain>) -> Self {
        Self { domain }
    }

    /// The name of the wrapped type.
    #[inline]
    pub fn name(&self) -> &str {
        self.domain.name()
    }

    /// Membership test via the type's `query` capability.
    #[inline]
    pub fn query(&self, value: &Value) -> bool {
        self.domain.query(value)
    }

    /// Coercion via the type's `coerce` capability.
    #[inline]
    pub fn coerce(&self, value: &Value) -> Option<Value> {
        self.domain.coerce(value)
    }

    /// Generates one arbitrary instance.
    #[inline]
    pub fn generate(&self, rng: &mut dyn RngCore) -> Value {
        self.domain.generate(rng)
    }
}

impl std::fmt::Debug for TypeWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeWrapper")
            .field("name", &self.name())
            .finish()
    }
}

impl PartialEq for TypeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for TypeWrapper {}

/// The type of machine integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerType;

impl TypeDomain for IntegerType {
    fn name(&self) -> &str {
        "integer"
    }

    fn query(&self, value: &Value) -> bool {
        matches!(value, Value::Int(_))
    }

    fn coerce(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Int(_) => Some(value.clone()),
            Value::Char(c) => Some(Value::Int(*c as i64)),
            Value::Str(s) => s.parse::<i64>().ok().map(Value::Int),
            Value::Tuple(_) => None,
        }
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        Value::Int(rng.gen())
    }
}

/// The type of printable-ASCII characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintableAsciiType;

impl TypeDomain for PrintableAsciiType {
    fn name(&self) -> &str {
        "printable-ascii"
    }

    fn query(&self, value: &Value) -> bool {
        matches!(value, Value::Char(c) if (' '..='~').contains(c))
    }

    fn coerce(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Char(_) if self.query(value) => Some(value.clone()),
            Value::Int(i) => char::from_u32(u32::try_from(*i).ok()?)
                .filter(|c| (' '..='~').contains(c))
                .map(Value::Char),
            _ => None,
        }
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let ordinal = rng.gen_range(0x20u32..=0x7Eu32);
        // Every ordinal in the printable range is a valid char.
        Value::Char(char::from_u32(ordinal).unwrap_or(' '))
    }
}

/// An explicit class graph: class name to direct subclass names.
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    subclasses: FxHashMap<String, Vec<String>>,
}

impl ClassHierarchy {
    /// Creates an empty hierarchy.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class with no subclasses (idempotent).
    pub fn add_class(&mut self, name: impl Into<String>) {
        self.subclasses.entry(name.into()).or_default();
    }

    /// Registers `child` as a direct subclass of `parent`, registering
    /// both classes if necessary.
    pub fn add_subclass(&mut self, parent: impl Into<String>, child: impl Into<String>) {
        let child = child.into();
        self.subclasses.entry(child.clone()).or_default();
        self.subclasses.entry(parent.into()).or_default().push(child);
    }

    /// Returns `true` if `name` is a registered class.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.subclasses.contains_key(name)
    }

    /// The class itself followed by all transitive subclasses, in
    /// depth-first discovery order without repetition.
    pub fn descendants(&self, name: &str) -> Option<Vec<String>> {
        if !self.contains(name) {
            return None;
        }
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut order = Vec::new();
        let mut stack = vec![name];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            order.push(current.to_string());
            if let Some(children) = self.subclasses.get(current) {
                for child in children.iter().rev() {
                    stack.push(child.as_str());
                }
            }
        }
        Some(order)
    }
}

/// The finite set of a class and its transitive subclasses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassWrapper {
    class: String,
    members: Vec<Value>,
}

impl ClassWrapper {
    /// Builds the wrapper for `class`, precomputing `[class] + all
    /// transitive subclasses` from the hierarchy.
    pub fn new(hierarchy: &ClassHierarchy, class: &str) -> Result<Self, SetError> {
        let members = hierarchy
            .descendants(class)
            .ok_or_else(|| SetError::UnknownClass {
                name: class.to_string(),
            })?
            .into_iter()
            .map(Value::Str)
            .collect();
        Ok(Self {
            class: class.to_string(),
            members,
        })
    }

    /// The wrapped class name.
    #[inline]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The precomputed member list.
    #[inline]
    pub fn members(&self) -> &[Value] {
        &self.members
    }

    /// Returns `true` if `value` names the class or one of its
    /// transitive subclasses.
    #[inline]
    pub fn contains(&self, value: &Value) -> bool {
        self.members.contains(value)
    }
}
