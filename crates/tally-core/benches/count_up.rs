//! Benchmarks for the count-up frame loop.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tally_core::{format_with_suffix, CountUp, Easing, Locale};

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_up");

    for easing in Easing::ALL {
        group.bench_function(easing.name(), |b| {
            b.iter(|| {
                let mut engine = CountUp::new(black_box(1_250_000), 2000, easing);
                engine.start(0);
                let mut last = 0;
                engine.run((0..=126).map(|i| i * 16), |v| last = v);
                black_box(last)
            });
        });
    }

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    c.bench_function("format_with_suffix", |b| {
        b.iter(|| format_with_suffix(black_box(9_876_543), "+", Locale::EnUs));
    });
}

criterion_group!(benches, bench_full_run, bench_format);
criterion_main!(benches);
