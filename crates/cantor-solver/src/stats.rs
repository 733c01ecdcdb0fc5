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

/// Counters collected during a backtracking search.
///
/// Read through
/// [`BacktrackIter::stats`](crate::backtrack::BacktrackIter::stats);
/// counters accumulate as the iterator is driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Candidate assignments explored.
    pub nodes_explored: u64,
    /// Frames abandoned after exhausting their candidates.
    pub backtracks: u64,
    /// Domain values removed by forward checking.
    pub forward_check_prunings: u64,
    /// Solutions yielded so far.
    pub solutions: u64,
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nodes: {}, backtracks: {}, pruned: {}, solutions: {}",
            self.nodes_explored, self.backtracks, self.forward_check_prunings, self.solutions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let stats = SearchStatistics {
            nodes_explored: 10,
            backtracks: 3,
            forward_check_prunings: 2,
            solutions: 1,
        };
        assert_eq!(
            format!("{}", stats),
            "nodes: 10, backtracks: 3, pruned: 2, solutions: 1"
        );
    }
}
