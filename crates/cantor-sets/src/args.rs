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

//! # Evaluation Arguments
//!
//! The configuration record threaded through enumeration, sampling, and
//! materialization. All caps are hard limits: type-denoted sets
//! generate values forever, and the rejection-sampling loops of the
//! filtering operators would otherwise never terminate on unsatisfiable
//! inputs.

use crate::node::SetNode;

/// Default cap on the number of distinct values an enumeration yields.
pub const DEFAULT_MAX_ENUMERATE: usize = 1000;

/// Default cap specific to type-denoted enumeration.
pub const DEFAULT_TYPE_ENUMERATE: usize = 50;

/// Default bound on rejection-sampling attempts.
pub const DEFAULT_MAX_ATTEMPTS: usize = 500;

/// Evaluation arguments for enumeration, sampling, and materialization.
///
/// Constructed via [`EvalArgs::default`] and refined with the `with_*`
/// builders:
///
/// ```rust
/// # use cantor_sets::args::EvalArgs;
///
/// let args = EvalArgs::default().with_max_enumerate(10).with_lazy(true);
/// assert_eq!(args.max_enumerate, 10);
/// assert!(args.lazy);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EvalArgs {
    /// Hard cap on distinct values yielded by any enumeration.
    pub max_enumerate: usize,
    /// Hard cap on values drawn from a type-denoted set; the effective
    /// cap there is `min(max_enumerate, type_enumerate)`.
    pub type_enumerate: usize,
    /// Evaluate through per-child enumeration and sampling only, never
    /// materializing composite children into concrete sets.
    pub lazy: bool,
    /// Bound on lazy rejection-sampling loops before they fail with
    /// [`SetError::SampleExhausted`](crate::error::SetError).
    pub max_attempts: usize,
    /// Explicit universe for complement evaluation. When absent, the
    /// complemented node's own default universe is consulted.
    pub universe: Option<SetNode>,
    /// Seed for type-denoted generation, making otherwise
    /// non-deterministic enumeration reproducible in tests.
    pub seed: Option<u64>,
}

impl Default for EvalArgs {
    fn default() -> Self {
        Self {
            max_enumerate: DEFAULT_MAX_ENUMERATE,
            type_enumerate: DEFAULT_TYPE_ENUMERATE,
            lazy: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            universe: None,
            seed: None,
        }
    }
}

impl EvalArgs {
    /// Sets the enumeration cap.
    #[inline]
    pub fn with_max_enumerate(mut self, max_enumerate: usize) -> Self {
        self.max_enumerate = max_enumerate;
        self
    }

    /// Sets the type-denoted enumeration cap.
    #[inline]
    pub fn with_type_enumerate(mut self, type_enumerate: usize) -> Self {
        self.type_enumerate = type_enumerate;
        self
    }

    /// Sets the lazy-evaluation flag.
    #[inline]
    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Sets the rejection-sampling bound.
    #[inline]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets an explicit complement universe.
    #[inline]
    pub fn with_universe(mut self, universe: SetNode) -> Self {
        self.universe = Some(universe);
        self
    }

    /// Sets the generation seed.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a copy of these arguments with `lazy` forced on.
    #[inline]
    pub fn lazified(&self) -> Self {
        let mut args = self.clone();
        args.lazy = true;
        args
    }

    /// The effective cap for type-denoted enumeration.
    #[inline]
    pub fn effective_type_cap(&self) -> usize {
        self.max_enumerate.min(self.type_enumerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = EvalArgs::default();
        assert_eq!(args.max_enumerate, 1000);
        assert_eq!(args.type_enumerate, 50);
        assert_eq!(args.max_attempts, 500);
        assert!(!args.lazy);
        assert!(args.universe.is_none());
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_lazified_preserves_caps() {
        let args = EvalArgs::default().with_max_enumerate(7).lazified();
        assert!(args.lazy);
        assert_eq!(args.max_enumerate, 7);
    }

    #[test]
    fn test_effective_type_cap() {
        let args = EvalArgs::default().with_max_enumerate(20);
        assert_eq!(args.effective_type_cap(), 20);
        let args = args.with_type_enumerate(5);
        assert_eq!(args.effective_type_cap(), 5);
    }
}
