//! Benchmarks for bytepool.
//!
//! Run with:
//!     cargo bench

use std::hint::black_box;
use std::thread;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};

use bytepool::{Buffer, FloatFormat, FloatWidth, Pool, TimeLayout};
use chrono::{TimeZone, Utc};

fn format_line(buf: &mut Buffer, i: u64) {
    buf.append_str("request.time:");
    buf.append_float(i as f64 * 0.125, FloatFormat::Decimal, Some(3), FloatWidth::F64);
    buf.append_str("|ms|#id:");
    buf.append_uint(i);
    buf.append_str(",ok:");
    buf.append_bool(i % 2 == 0);
}

fn bench_get_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("lend");
    group.throughput(Throughput::Elements(1));

    let pool = Pool::new(256);
    group.bench_function("pool_get_put", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let mut buf = pool.get();
            format_line(&mut buf, i);
            black_box(buf.len());
            pool.put(buf);
            i += 1;
        });
    });

    group.bench_function("fresh_buffer", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let mut buf = Buffer::with_capacity(256);
            format_line(&mut buf, i);
            black_box(buf.len());
            i += 1;
        });
    });

    group.bench_function("lease", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let mut buf = pool.lease();
            format_line(&mut buf, i);
            black_box(buf.len());
            i += 1;
        });
    });

    group.finish();
}

fn bench_appends(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    let mut buf = Buffer::with_capacity(4096);

    group.bench_function("int", |b| {
        b.iter(|| {
            buf.reset();
            buf.append_int(black_box(-1_234_567_890));
        });
    });

    for (name, format) in [
        ("float_decimal", FloatFormat::Decimal),
        ("float_exponent", FloatFormat::Exponent),
        ("float_general", FloatFormat::General),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                buf.reset();
                buf.append_float(black_box(6.02214076e23), format, None, FloatWidth::F64);
            });
        });
    }

    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    group.bench_function("time_rfc3339", |b| {
        b.iter(|| {
            buf.reset();
            buf.append_time(black_box(&t), &TimeLayout::RFC3339);
        });
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    group.sample_size(20);

    for threads in [2, 4, 8] {
        group.bench_function(format!("{}_threads", threads), |b| {
            let pool = Pool::new(256);
            b.iter(|| {
                thread::scope(|s| {
                    for _ in 0..threads {
                        s.spawn(|| {
                            for i in 0..1000u64 {
                                let mut buf = pool.get();
                                format_line(&mut buf, i);
                                black_box(buf.len());
                                pool.put(buf);
                            }
                        });
                    }
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_put, bench_appends, bench_contended);
criterion_main!(benches);
