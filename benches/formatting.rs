use chrono::Local;
use criterion::{Criterion, criterion_group, criterion_main};
use linelog::fmt::{FormatTemplate, FormatValues, format_timestamp};
use std::hint::black_box;

fn bench_format_template_parse(c: &mut Criterion) {
    c.bench_function("FormatTemplate::parse", |b| {
        b.iter(|| {
            FormatTemplate::parse(black_box(
                "{prefix}[{timestamp}] {logtype}: {message}{postfix}",
            ))
        });
    });
}

fn bench_format_template_render(c: &mut Criterion) {
    let template = FormatTemplate::default();
    let values = FormatValues::new()
        .timestamp("2025-01-15 | 14:30:00.123456")
        .logtype("info")
        .message("Application started successfully");

    c.bench_function("FormatTemplate::render", |b| {
        b.iter(|| template.render(black_box(&values)));
    });
}

fn bench_format_timestamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_timestamp");
    let now = Local::now();

    group.bench_function("default", |b| {
        b.iter(|| format_timestamp(black_box("%Y-%m-%d | %H:%M:%S.%f"), &now));
    });
    group.bench_function("unknown_tokens", |b| {
        b.iter(|| format_timestamp(black_box("%Y %Q %K %H"), &now));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_format_template_parse,
    bench_format_template_render,
    bench_format_timestamp,
);
criterion_main!(benches);
