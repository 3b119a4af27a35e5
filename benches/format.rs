use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use fp2dec::{Buffer64, NumberKind, Precision, convert};

fn bench_shortest(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest");
    let cases: &[(&str, f64)] = &[
        ("half", 0.5),
        ("tenth", 0.1),
        ("pi", 3.141592653589793),
        ("max", f64::MAX),
        ("subnormal", 5e-324),
    ];
    for &(name, v) in cases {
        group.bench_function(name, |b| {
            let mut buf = Buffer64::new(NumberKind::Float);
            b.iter(|| {
                convert(black_box(v), Precision::Shortest, &mut buf);
                black_box(buf.count)
            });
        });
    }
    group.finish();
}

fn bench_counted(c: &mut Criterion) {
    let mut group = c.benchmark_group("counted");
    let v = 3.141592653589793f64;
    for &n in &[3usize, 12, 17] {
        group.bench_function(format!("significant_{n}"), |b| {
            let mut buf = Buffer64::new(NumberKind::Float);
            b.iter(|| {
                convert(black_box(v), Precision::Significant(n), &mut buf);
                black_box(buf.count)
            });
        });
    }
    group.bench_function("fractional_6", |b| {
        let mut buf = Buffer64::new(NumberKind::Float);
        b.iter(|| {
            convert(black_box(1234.5678f64), Precision::Fractional(6), &mut buf);
            black_box(buf.count)
        });
    });
    group.finish();
}

fn bench_exact_path(c: &mut Criterion) {
    // the half-ulp tie forces the big-integer fallback
    let mut group = c.benchmark_group("dragon");
    group.bench_function("tie_at_zero_places", |b| {
        let mut buf = Buffer64::new(NumberKind::Float);
        b.iter(|| {
            convert(black_box(2.5f64), Precision::Fractional(0), &mut buf);
            black_box(buf.count)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_shortest, bench_counted, bench_exact_path);
criterion_main!(benches);
