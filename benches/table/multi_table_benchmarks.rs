use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use multitable::{bytes_equality, bytes_hash, HashTableBuilder};

const BUCKET_COUNTS: [usize; 3] = [16, 256, 4096];

fn text_keys(n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|i| format!("pkg-{i}").into_bytes()).collect()
}

fn bench_insert(c: &mut Criterion) {
    let keys = text_keys(10_000);
    let mut group = c.benchmark_group("multi_table_insert");

    for &buckets in &BUCKET_COUNTS {
        group.bench_with_input(BenchmarkId::new("string", buckets), &buckets, |b, &buckets| {
            b.iter(|| {
                let mut table = HashTableBuilder::new()
                    .with_bucket_count(buckets)
                    .build()
                    .unwrap();
                for (i, key) in keys.iter().enumerate() {
                    table.insert(key, i).unwrap();
                }
                black_box(table.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("copied_u64", buckets), &buckets, |b, &buckets| {
            b.iter(|| {
                let mut table = HashTableBuilder::new()
                    .with_bucket_count(buckets)
                    .with_key_size(8)
                    .with_hash_fn(bytes_hash)
                    .with_equality_fn(bytes_equality)
                    .with_owned_values(true)
                    .build()
                    .unwrap();
                for i in 0..10_000u64 {
                    table.insert_copied(&i.to_le_bytes(), i).unwrap();
                }
                black_box(table.len())
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let keys = text_keys(10_000);
    let mut group = c.benchmark_group("multi_table_lookup");

    for &buckets in &BUCKET_COUNTS {
        let mut table = HashTableBuilder::new()
            .with_bucket_count(buckets)
            .build()
            .unwrap();
        for (i, key) in keys.iter().enumerate() {
            table.insert(key, i).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("hit", buckets), &table, |b, table| {
            b.iter(|| {
                for key in &keys {
                    black_box(table.lookup(key));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("miss", buckets), &table, |b, table| {
            b.iter(|| black_box(table.contains(b"not-a-package")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup);
criterion_main!(benches);
