use std::io::{prelude::*, BufReader};
use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonl_index::{File, Indexable, ReadByLine};
use rand::distributions::Uniform;
use rand::Rng;
use tempfile::NamedTempFile;

fn jsonl_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..10_000 {
        writeln!(
            file,
            "{{\"id\":{},\"ios\":[{{\"input\":\"{}\",\"output\":\"{}\"}}],\"category\":\"c{}\"}}",
            i,
            i * 2,
            i * 3,
            i % 13
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

fn index_bench(c: &mut Criterion) {
    let tmp = jsonl_file();

    c.bench_function("build index", |b| {
        b.iter(|| File::open(black_box(tmp.path())).unwrap());
    });
}

fn random_lines_bench(c: &mut Criterion) {
    let tmp = jsonl_file();

    c.bench_function("read random lines", |b| {
        b.iter_custom(|iters| {
            let mut file = File::open(tmp.path()).unwrap();

            let lines: Vec<_> = rand::thread_rng()
                .sample_iter(Uniform::new(0, file.total_lines()))
                .take(file.total_lines())
                .collect();

            let start = Instant::now();

            for _i in 0..iters {
                for line in &lines {
                    file.read_line(black_box(*line)).unwrap();
                }
            }

            start.elapsed()
        });
    });
}

fn sequencial_bench(c: &mut Criterion) {
    let tmp = jsonl_file();

    c.bench_function("read sequential", |b| {
        b.iter_custom(|iters| {
            let mut file = File::open(tmp.path()).unwrap();

            let start = Instant::now();

            let mut buff = Vec::new();
            for _i in 0..iters {
                for line in 0..file.total_lines() {
                    buff.clear();
                    file.read_line_raw(black_box(line), &mut buff).unwrap();
                }
            }

            start.elapsed()
        });
    });
}

fn sequencial_bench_std(c: &mut Criterion) {
    let tmp = jsonl_file();

    c.bench_function("read sequential std implementation", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _i in 0..iters {
                let reader = BufReader::new(std::fs::File::open(tmp.path()).unwrap());
                for line in reader.lines() {
                    black_box(line.unwrap());
                }
            }

            start.elapsed()
        });
    });
}

criterion_group!(
    benches,
    index_bench,
    random_lines_bench,
    sequencial_bench,
    sequencial_bench_std
);
criterion_main!(benches);
