use criterion::{Criterion, criterion_group, criterion_main};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use tempfile::TempDir;
use veranda_store::{DocumentStore, Mutation};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BenchDoc {
    entries: Vec<String>,
}

// ============================================================================
// Benchmark: Snapshot Reads
// ============================================================================

fn bench_snapshot_reads(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let temp = TempDir::new().unwrap();

    let store = rt.block_on(async {
        let store = DocumentStore::<BenchDoc>::builder()
            .path(temp.path().join("bench.json"))
            .open()
            .await
            .unwrap();
        store
            .update(|doc| {
                doc.entries = (0..512).map(|i| format!("entry-{i}")).collect();
                Ok(Mutation::Commit(()))
            })
            .await
            .unwrap();
        store
    });

    c.bench_function("snapshot_read", |b| {
        b.iter(|| black_box(store.snapshot().entries.len()));
    });
}

// ============================================================================
// Benchmark: Serialized Commits
// ============================================================================

fn bench_serialized_commits(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let temp = TempDir::new().unwrap();

    let store = rt.block_on(async {
        DocumentStore::<BenchDoc>::builder()
            .path(temp.path().join("bench.json"))
            .open()
            .await
            .unwrap()
    });

    let mut group = c.benchmark_group("commits");
    group.sample_size(20);
    group.bench_function("append_commit", |b| {
        b.to_async(&rt).iter(|| {
            let store = store.clone();
            async move {
                store
                    .update(|doc| {
                        doc.entries.push("appended".to_owned());
                        Ok(Mutation::Commit(()))
                    })
                    .await
                    .unwrap();
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_snapshot_reads, bench_serialized_commits);
criterion_main!(benches);
