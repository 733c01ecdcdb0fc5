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

//! # Enumeration Iterator Adapters
//!
//! Small, dependency-free iterator adapters used by composite-set
//! enumeration. `RoundRobin` interleaves a collection of child
//! iterators fairly, so no single large child starves the others before
//! an enumeration cap is reached. `CartesianProduct` walks the product
//! of materialized pools in odometer order.

use std::iter::FusedIterator;

/// Interleaves a collection of iterators, yielding one element from
/// each live iterator in turn.
///
/// Exhausted children are dropped from the rotation; the adapter ends
/// once every child is exhausted.
///
/// # Examples
///
/// ```rust
/// # use cantor_core::utils::iter::RoundRobin;
///
/// let rr = RoundRobin::new(vec![vec![1, 2].into_iter(), vec![10].into_iter()]);
/// assert_eq!(rr.collect::<Vec<_>>(), vec![1, 10, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct RoundRobin<I> {
    iters: Vec<Option<I>>,
    next: usize,
    live: usize,
}

impl<I> RoundRobin<I> {
    /// Creates a new `RoundRobin` over the given iterators.
    pub fn new(iters: Vec<I>) -> Self {
        let live = iters.len();
        Self {
            iters: iters.into_iter().map(Some).collect(),
            next: 0,
            live,
        }
    }
}

impl<I: Iterator> Iterator for RoundRobin<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while self.live > 0 {
            let index = self.next;
            self.next = (self.next + 1) % self.iters.len();
            if let Some(iter) = self.iters[index].as_mut() {
                match iter.next() {
                    Some(item) => return Some(item),
                    None => {
                        self.iters[index] = None;
                        self.live -= 1;
                    }
                }
            }
        }
        None
    }
}

impl<I: Iterator> FusedIterator for RoundRobin<I> {}

/// Walks the Cartesian product of materialized pools in odometer order:
/// the last pool varies fastest.
///
/// A product over zero pools yields exactly one empty row; a product
/// with any empty pool yields nothing.
///
/// # Examples
///
/// ```rust
/// # use cantor_core::utils::iter::CartesianProduct;
///
/// let rows: Vec<Vec<i32>> = CartesianProduct::new(vec![vec![1, 2], vec![7, 8]]).collect();
/// assert_eq!(rows, vec![vec![1, 7], vec![1, 8], vec![2, 7], vec![2, 8]]);
/// ```
#[derive(Debug, Clone)]
pub struct CartesianProduct<T> {
    pools: Vec<Vec<T>>,
    indices: Vec<usize>,
    done: bool,
}

impl<T> CartesianProduct<T> {
    /// Creates a new `CartesianProduct` over the given pools.
    pub fn new(pools: Vec<Vec<T>>) -> Self {
        let done = pools.iter().any(|pool| pool.is_empty());
        let indices = vec![0; pools.len()];
        Self {
            pools,
            indices,
            done,
        }
    }
}

impl<T: Clone> Iterator for CartesianProduct<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let row: Vec<T> = self
            .indices
            .iter()
            .zip(self.pools.iter())
            .map(|(&index, pool)| pool[index].clone())
            .collect();

        // Advance the odometer, rolling over from the last position.
        let mut position = self.pools.len();
        loop {
            if position == 0 {
                self.done = true;
                break;
            }
            position -= 1;
            self.indices[position] += 1;
            if self.indices[position] < self.pools[position].len() {
                break;
            }
            self.indices[position] = 0;
        }
        Some(row)
    }
}

impl<T: Clone> FusedIterator for CartesianProduct<T> {}
