use criterion::{black_box, criterion_group, criterion_main, Criterion};

use qeval_core::QuestionStore;

fn filled_store(n: i32) -> QuestionStore {
    let mut store = QuestionStore::new();
    for i in 0..n {
        store.add_question(i % 10 + 1, i % 3 + 1);
    }
    store
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_question");

    group.bench_function("1000", |b| b.iter(|| filled_store(black_box(1000))));

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for n in [100, 10_000] {
        let store = filled_store(n);

        group.bench_function(format!("total_marks/{n}"), |b| {
            b.iter(|| black_box(&store).total_marks())
        });

        group.bench_function(format!("average_difficulty/{n}"), |b| {
            b.iter(|| black_box(&store).average_difficulty())
        });

        group.bench_function(format!("top_question_marks/{n}"), |b| {
            b.iter(|| black_box(&store).top_question_marks())
        });

        group.bench_function(format!("stats/{n}"), |b| {
            b.iter(|| black_box(&store).stats())
        });
    }

    group.finish();
}

fn bench_undo(c: &mut Criterion) {
    c.bench_function("undo_all/1000", |b| {
        b.iter_batched(
            || filled_store(1000),
            |mut store| while store.undo_last_question().is_some() {},
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_add, bench_queries, bench_undo);
criterion_main!(benches);
