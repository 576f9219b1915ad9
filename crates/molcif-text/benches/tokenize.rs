use criterion::{black_box, criterion_group, criterion_main, Criterion};
use molcif_text::Tokenizer;
use std::sync::Arc;

fn synthetic_loop(rows: usize) -> Arc<str> {
    let mut out = String::from("loop_\n_atom_site.id\n_atom_site.Cartn_x\n");
    for i in 0..rows {
        out.push_str(&format!("{i} {}.{:03}\n", i % 500, i % 1000));
    }
    Arc::from(out.as_str())
}

fn bench_read_lines(c: &mut Criterion) {
    let data = synthetic_loop(100_000);
    let line_count = data.lines().count();
    c.bench_function("read_lines_100k", |b| {
        b.iter(|| {
            let mut t = Tokenizer::new(data.clone());
            black_box(t.read_lines(line_count))
        })
    });
}

fn bench_value_scan(c: &mut Criterion) {
    let data = synthetic_loop(100_000);
    c.bench_function("eat_value_scan_100k", |b| {
        b.iter(|| {
            let mut t = Tokenizer::new(data.clone());
            let mut count = 0usize;
            loop {
                t.skip_whitespace();
                if t.at_end() {
                    break;
                }
                t.mark_start();
                t.eat_value();
                count += 1;
            }
            black_box(count)
        })
    });
}

criterion_group!(benches, bench_read_lines, bench_value_scan);
criterion_main!(benches);
