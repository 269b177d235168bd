use criterion::{Criterion, criterion_group, criterion_main};
use linelog::{Level, Logger, NoPrompt};
use std::hint::black_box;
use tempfile::TempDir;

fn bench_logger_write(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let logger = Logger::builder()
        .directory(tmp.path())
        .filename("bench.log")
        .prompt(NoPrompt)
        .build()
        .expect("failed to provision logger");

    c.bench_function("Logger::log", |b| {
        b.iter(|| logger.log(Level::Info, black_box("benchmark log message")));
    });
}

fn bench_logger_disabled(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let logger = Logger::builder()
        .directory(tmp.path())
        .prompt(NoPrompt)
        .build_paused()
        .expect("failed to configure logger");

    c.bench_function("Logger::log (paused)", |b| {
        b.iter(|| logger.log(Level::Info, black_box("dropped")));
    });
}

criterion_group!(benches, bench_logger_write, bench_logger_disabled);
criterion_main!(benches);
