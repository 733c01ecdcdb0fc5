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

/// The error type for set construction, validation, and evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    /// A range was validated with `lb > ub`.
    InvalidBounds {
        /// The offending lower bound.
        lb: i64,
        /// The offending upper bound.
        ub: i64,
    },
    /// A complement was evaluated without an explicit universe, over a
    /// node that defines no default universe.
    MissingUniverse,
    /// A lazy rejection-sampling loop exceeded its attempt bound
    /// without producing an accepted value.
    SampleExhausted {
        /// The number of attempts that were made.
        attempts: usize,
    },
    /// A sample was requested from a set that contains no elements.
    EmptySample,
    /// A class-denoted set referenced a class absent from its
    /// hierarchy.
    UnknownClass {
        /// The unresolved class name.
        name: String,
    },
}

impl std::fmt::Display for SetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBounds { lb, ub } => {
                write!(f, "Invalid range bounds: lb {} exceeds ub {}", lb, ub)
            }
            Self::MissingUniverse => {
                write!(f, "Complement evaluation requires a universe, but none was supplied and the operand defines no default")
            }
            Self::SampleExhausted { attempts } => {
                write!(f, "Unable to sample an accepted value within {} attempts", attempts)
            }
            Self::EmptySample => write!(f, "Cannot sample from an empty set"),
            Self::UnknownClass { name } => {
                write!(f, "Class '{}' is not registered in the hierarchy", name)
            }
        }
    }
}

impl std::error::Error for SetError {}
