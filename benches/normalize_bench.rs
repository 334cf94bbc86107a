//! Normalization benchmarks.
//!
//! Mirrors the ancestor's `benches/rust/benchmark.rs` shape (a `criterion`
//! group per concern, constants for the fixtures, `black_box` around the
//! call under measurement) applied to `normalize` instead of `parse`/`diff`.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use asymptote_algebra::{normalize, BinaryOp, ComplexityExpression, Variable, VariableRole};

fn linear_plus_log(n: &Variable) -> ComplexityExpression {
    ComplexityExpression::add(
        Arc::new(ComplexityExpression::linear(1.0, n.clone())),
        Arc::new(ComplexityExpression::log(1.0, n.clone(), 2.0)),
    )
}

fn nested_sum_of_products(n: &Variable, m: &Variable) -> ComplexityExpression {
    let n_log_n = ComplexityExpression::binary(
        Arc::new(ComplexityExpression::var(n.clone())),
        BinaryOp::Mul,
        Arc::new(ComplexityExpression::log(1.0, n.clone(), 2.0)),
    );
    let m_squared = ComplexityExpression::power(Arc::new(ComplexityExpression::var(m.clone())), 2.0);
    let left = ComplexityExpression::add(Arc::new(n_log_n.clone()), Arc::new(n_log_n));
    ComplexityExpression::add(Arc::new(left), Arc::new(m_squared))
}

fn deeply_nested_max_chain(n: &Variable, depth: u32) -> ComplexityExpression {
    let mut expr = ComplexityExpression::var(n.clone());
    for degree in 1..=depth {
        let power = ComplexityExpression::power(Arc::new(ComplexityExpression::var(n.clone())), f64::from(degree));
        expr = ComplexityExpression::max_of(Arc::new(expr), Arc::new(power));
    }
    expr
}

fn bench_normalize_simple(c: &mut Criterion) {
    let n = Variable::new("n", VariableRole::InputSize);
    let mut group = c.benchmark_group("normalize_simple");

    group.bench_function("linear_plus_log", |b| {
        let expr = linear_plus_log(&n);
        b.iter(|| normalize(black_box(&expr)));
    });

    group.finish();
}

fn bench_normalize_nested(c: &mut Criterion) {
    let n = Variable::new("n", VariableRole::InputSize);
    let m = Variable::new("m", VariableRole::SecondarySize);
    let mut group = c.benchmark_group("normalize_nested");

    group.bench_function("sum_of_products", |b| {
        let expr = nested_sum_of_products(&n, &m);
        b.iter(|| normalize(black_box(&expr)));
    });

    group.bench_function("dominance_chain_depth_16", |b| {
        let expr = deeply_nested_max_chain(&n, 16);
        b.iter(|| normalize(black_box(&expr)));
    });

    group.finish();
}

fn bench_normalize_idempotence(c: &mut Criterion) {
    let n = Variable::new("n", VariableRole::InputSize);
    let mut group = c.benchmark_group("normalize_idempotence");

    group.bench_function("already_normal_form", |b| {
        let expr = normalize(&linear_plus_log(&n));
        b.iter(|| normalize(black_box(&expr)));
    });

    group.finish();
}

criterion_group!(benches, bench_normalize_simple, bench_normalize_nested, bench_normalize_idempotence);
criterion_main!(benches);
