//! Sequential vs. worker-pool domain counting on generated customer files.
//!
//! Run with `cargo bench --bench domain_counts`. The sequential path is the
//! baseline; the parallel numbers only justify a default change if they beat
//! it on both sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::io::{BufWriter, Write};
use tempfile::NamedTempFile;

use domaincount::CustomerImporter;

const DOMAINS: [&str; 8] = [
    "example.com",
    "gmail.com",
    "yahoo.co.uk",
    "proton.me",
    "mail.ru",
    "outlook.com",
    "acme-corp.io",
    "uni.edu",
];

/// Roughly one row in fifty carries an invalid address.
fn generate_customers(rows: usize) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    let mut out = BufWriter::new(file.as_file());

    writeln!(out, "first_name,last_name,email,gender,ip_address").expect("write header");
    for i in 0..rows {
        let written = if i % 50 == 0 {
            writeln!(out, "First{i},Last{i},not-an-email,Female,10.0.{}.{}", i % 256, i % 200)
        } else {
            let domain = DOMAINS[(i * 7 + i / 3) % DOMAINS.len()];
            writeln!(
                out,
                "First{i},Last{i},user{i}@{domain},Male,10.0.{}.{}",
                i % 256,
                i % 200
            )
        };
        written.expect("write row");
    }
    out.flush().expect("flush csv");
    drop(out);
    file
}

fn bench_counting(c: &mut Criterion) {
    let workers = std::cmp::min(num_cpus::get(), 8).max(2);

    for (label, rows, samples) in [("small", 1_000, 100), ("large", 1_000_000, 10)] {
        let file = generate_customers(rows);
        let importer = CustomerImporter::new(file.path(), "email").expect("valid importer");

        let mut group = c.benchmark_group(format!("domain_counts_{label}"));
        group.sample_size(samples);
        group.throughput(Throughput::Elements(rows as u64));

        group.bench_function(BenchmarkId::new("sequential", rows), |b| {
            b.iter(|| black_box(importer.analyze().expect("sequential run")))
        });
        group.bench_function(BenchmarkId::new(format!("parallel_{workers}"), rows), |b| {
            b.iter(|| black_box(importer.analyze_parallel(workers).expect("parallel run")))
        });

        group.finish();
    }
}

criterion_group!(benches, bench_counting);
criterion_main!(benches);
