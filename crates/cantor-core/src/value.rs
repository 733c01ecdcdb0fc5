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

//! # Element Values
//!
//! The closed, hashable universe that symbolic sets range over. Every
//! concrete set, enumeration buffer, sample result, and solver binding
//! holds `Value`s, so the whole stack shares one equality, hashing, and
//! ordering story without trait gymnastics.
//!
//! `Value::Tuple` is the carrier for Cartesian-product elements; the
//! empty tuple is the zero-repetition element of the schema layer.
//! `Value::Str` doubles as the representation of class handles in
//! class-denoted sets.

/// A single element of a symbolic set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    /// A machine integer.
    Int(i64),
    /// A single character.
    Char(char),
    /// A string, also used for class handles.
    Str(String),
    /// An ordered tuple, the Cartesian-product carrier.
    Tuple(Vec<Value>),
}

impl Value {
    /// The empty tuple, i.e. the element denoting zero repetitions.
    #[inline]
    pub fn unit() -> Self {
        Value::Tuple(Vec::new())
    }

    /// Returns `true` if this value is a tuple.
    #[inline]
    pub fn is_tuple(&self) -> bool {
        matches!(self, Value::Tuple(_))
    }

    /// Returns the contained integer, if any.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the contained character, if any.
    #[inline]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<char> for Value {
    #[inline]
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Value::Tuple(value)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(3), Value::Int(3));
        assert_eq!(Value::from('x'), Value::Char('x'));
        assert_eq!(Value::from("abc"), Value::Str("abc".to_string()));
        assert_eq!(
            Value::from(vec![Value::Int(1), Value::Int(2)]),
            Value::Tuple(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_unit() {
        assert_eq!(Value::unit(), Value::Tuple(Vec::new()));
        assert!(Value::unit().is_tuple());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Char('a').as_int(), None);
        assert_eq!(Value::Char('a').as_char(), Some('a'));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Value::Int(-4)), "-4");
        assert_eq!(
            format!("{}", Value::Tuple(vec![Value::Int(1), Value::Char('z')])),
            "(1, 'z')"
        );
    }

    #[test]
    fn test_ordering_within_variant() {
        assert!(Value::Int(1) < Value::Int(2));
        assert!(Value::Char('a') < Value::Char('b'));
    }
}
