use criterion::{criterion_group, criterion_main, Criterion};
use pullq::prelude::*;

fn make_rows(n: i64) -> Enumerable {
    let rows = (0..n)
        .map(|i| {
            Value::map([
                ("id".to_string(), Value::Int(i)),
                ("bucket".to_string(), Value::Int(i % 7)),
                ("score".to_string(), Value::Float((i % 100) as f64 / 3.0)),
            ])
        })
        .collect();
    Enumerable::from_vec(rows)
}

fn bench_filter_select_sum(c: &mut Criterion) {
    let rows = make_rows(4096);
    let pipeline = rows
        .filter("x => x.bucket < 4")
        .expect("filter")
        .select("x => x.score")
        .expect("select");
    c.bench_function("filter_select_sum_4096", |b| {
        b.iter(|| pipeline.sum());
    });
}

fn bench_order_by(c: &mut Criterion) {
    let rows = make_rows(2048);
    let sorted = rows
        .order_by("|x| x.score")
        .expect("order_by")
        .then_by("|x| x.id")
        .expect("then_by")
        .to_enumerable();
    c.bench_function("order_by_then_by_2048", |b| {
        b.iter(|| sorted.materialize().len());
    });
}

fn bench_group_by(c: &mut Criterion) {
    let rows = make_rows(2048);
    let grouped = rows.group_by("|x| x.bucket").expect("group_by");
    c.bench_function("group_by_2048", |b| {
        b.iter(|| grouped.materialize().len());
    });
}

fn bench_lambda_compile(c: &mut Criterion) {
    c.bench_function("lambda_compile", |b| {
        b.iter(|| Callable::compile("x, i => x.score * 2 + i").expect("compile"));
    });
}

criterion_group!(
    benches,
    bench_filter_select_sum,
    bench_order_by,
    bench_group_by,
    bench_lambda_compile
);
criterion_main!(benches);
