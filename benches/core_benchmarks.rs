use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use cmsbench::report::parse_reports;
use cmsbench::results::ResultDocument;

fn sample_report(seed: usize) -> String {
    let mut out = format!(
        "All requests done.\n\nSummary:\n  Total:\t{}.5279 secs\n  Slowest:\t0.4137 secs\n  Fastest:\t0.0225 secs\n  Average:\t0.1235 secs\n  Requests/sec:\t378.8461\n  Total data:\t2194000 bytes\n  Size/request:\t10970 bytes\n\nStatus code distribution:\n  [200]\t200 responses\n\nResponse time histogram:\n",
        seed % 10
    );
    for i in 0..11 {
        out.push_str(&format!("  0.{:03} [{}]\t|\u{25a0}\u{25a0}\u{25a0}\n", 22 + i * 39, i * 7));
    }
    out.push_str("\nLatency distribution:\n");
    for p in [10, 25, 50, 75, 90, 95, 99] {
        out.push_str(&format!("  {p}% in 0.{:04} secs\n", 300 + p * 40));
    }
    out.push('\n');
    out
}

fn bench_parse(c: &mut Criterion) {
    let single = sample_report(0);
    let many: String = (0..100).map(sample_report).collect();

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(single.len() as u64));
    group.bench_function("single_report", |b| {
        b.iter(|| parse_reports(black_box(&single)).unwrap())
    });
    group.throughput(Throughput::Bytes(many.len() as u64));
    group.bench_function("100_concatenated_reports", |b| {
        b.iter(|| parse_reports(black_box(&many)).unwrap())
    });
    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let many: String = (0..100).map(sample_report).collect();
    let reports = parse_reports(&many).unwrap();

    c.bench_function("result_document_to_json", |b| {
        b.iter(|| {
            let mut doc = ResultDocument::new("bench-host");
            doc.add_reports("Load Post", reports.clone());
            doc.to_json(false).unwrap()
        })
    });
}

criterion_group!(benches, bench_parse, bench_document);
criterion_main!(benches);
