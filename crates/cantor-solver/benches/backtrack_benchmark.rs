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

use cantor_model::{AllDifferentConstraint, Constraint, Domain, PredicateConstraint, Problem};
use cantor_sets::SetNode;
use cantor_solver::BacktrackSolver;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn ordering_problem(num_vars: usize, domain_size: i64) -> Problem {
    let names: Vec<String> = (0..num_vars).map(|i| format!("v{}", i)).collect();
    let mut domain = Domain::new();
    for name in &names {
        domain.insert(name.clone(), SetNode::int_range(1, domain_size));
    }

    let mut constraints: Vec<Arc<dyn Constraint>> = vec![Arc::new(AllDifferentConstraint::new(
        names.clone(),
    ))];
    for pair in names.windows(2) {
        let (a, b) = (pair[0].clone(), pair[1].clone());
        constraints.push(Arc::new(PredicateConstraint::new(
            "lt",
            vec![a, b],
            |values| values[0] < values[1],
        )));
    }
    Problem::new(&domain, constraints).expect("benchmark problem must be well-formed")
}

fn bench_backtrack(c: &mut Criterion) {
    let problem = ordering_problem(5, 9);

    c.bench_function("backtrack_with_forward_checking", |b| {
        b.iter(|| {
            let count = BacktrackSolver::new()
                .with_seed(7)
                .solutions(black_box(&problem))
                .expect("well-formed problem")
                .count();
            black_box(count)
        })
    });

    c.bench_function("backtrack_without_forward_checking", |b| {
        b.iter(|| {
            let count = BacktrackSolver::new()
                .with_seed(7)
                .with_forward_checking(false)
                .solutions(black_box(&problem))
                .expect("well-formed problem")
                .count();
            black_box(count)
        })
    });
}

criterion_group!(benches, bench_backtrack);
criterion_main!(benches);
