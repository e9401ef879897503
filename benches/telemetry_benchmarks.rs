use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rigwatch::{
    DiskUsage, FastBatch, GpuStatus, ModelProcess, Reading, SlowBatch, Snapshot, SystemLoad,
    ThermalStatus, TierSampler, TieredCache,
};

/// A sampler that returns fixed batches instantly, so benchmarks measure
/// the cache and serialization paths rather than external tools.
struct FixtureSampler;

#[async_trait]
impl TierSampler for FixtureSampler {
    async fn sample_fast(&self) -> FastBatch {
        fixture_fast()
    }

    async fn sample_slow(&self) -> SlowBatch {
        fixture_slow()
    }
}

fn fixture_fast() -> FastBatch {
    FastBatch {
        nvidia: Reading::Value(GpuStatus {
            fan: "45%".to_string(),
            temp: "72°C".to_string(),
            power: "130.5W".to_string(),
            mem: "8192 MiB".to_string(),
            util: "87%".to_string(),
        }),
        sys: Reading::Value(SystemLoad {
            mem_total: "31Gi".to_string(),
            mem_used: "4.2Gi".to_string(),
            load: "0.52".to_string(),
        }),
        temps: Reading::Value(ThermalStatus::default()),
    }
}

fn fixture_slow() -> SlowBatch {
    SlowBatch {
        disk: DiskUsage {
            storage: "nvme0n1p2".to_string(),
            size: "916G".to_string(),
            used: "412G".to_string(),
            avail: "458G".to_string(),
            percent: "48%".to_string(),
            mount: "/".to_string(),
        },
        ollama: vec![ModelProcess {
            name: "llama3:latest".to_string(),
            id: "365c0bd3c000".to_string(),
            size: "6.7 GB".to_string(),
            processor: "100% GPU".to_string(),
            until: "4 minutes from now".to_string(),
        }],
    }
}

fn warm_cache(rt: &tokio::runtime::Runtime) -> Arc<TieredCache> {
    let cache = Arc::new(TieredCache::new(
        FixtureSampler,
        Duration::from_secs(3600),
        Duration::from_secs(3600),
    ));
    rt.block_on(cache.snapshot());
    cache
}

/// Benchmark serving a snapshot from warm cache tiers
fn bench_cache_hit(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("Should create tokio runtime");
    let cache = warm_cache(&rt);

    c.bench_function("cache_hit_snapshot", |b| {
        b.to_async(&rt).iter(|| {
            let cache = cache.clone();
            async move { cache.snapshot().await }
        })
    });
}

/// Benchmark concurrent requests against one warm cache
fn bench_concurrent_cache_hits(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("Should create tokio runtime");
    let cache = warm_cache(&rt);

    for concurrency in [1, 2, 4, 8].iter() {
        c.bench_with_input(
            BenchmarkId::new("concurrent_cache_hits", concurrency),
            concurrency,
            |b, &concurrency| {
                b.to_async(&rt).iter(|| {
                    let cache = cache.clone();
                    async move {
                        let requests = (0..concurrency).map(|_| {
                            let cache = cache.clone();
                            async move { cache.snapshot().await }
                        });
                        futures_util::future::join_all(requests).await
                    }
                })
            },
        );
    }
}

/// Benchmark the pure batch merge
fn bench_snapshot_merge(c: &mut Criterion) {
    let fast = fixture_fast();
    let slow = fixture_slow();

    c.bench_function("snapshot_merge", |b| {
        b.iter(|| Snapshot::merge(&fast, &slow, "Sun, Jan 25, 2026 10:56:42 AM".to_string()))
    });
}

/// Benchmark JSON serialization of snapshots
fn bench_json_serialization(c: &mut Criterion) {
    let snapshot = Snapshot::merge(
        &fixture_fast(),
        &fixture_slow(),
        "Sun, Jan 25, 2026 10:56:42 AM".to_string(),
    );

    c.bench_function("json_serialization", |b| {
        b.iter(|| serde_json::to_string(&snapshot).expect("Should serialize"))
    });

    c.bench_function("json_pretty_serialization", |b| {
        b.iter(|| serde_json::to_string_pretty(&snapshot).expect("Should serialize pretty"))
    });
}

/// Benchmark JSON deserialization through the untagged reading shapes
fn bench_json_deserialization(c: &mut Criterion) {
    let snapshot = Snapshot::merge(
        &fixture_fast(),
        &fixture_slow(),
        "Sun, Jan 25, 2026 10:56:42 AM".to_string(),
    );
    let json_string = serde_json::to_string(&snapshot).expect("Should serialize");

    c.bench_function("json_deserialization", |b| {
        b.iter(|| serde_json::from_str::<Snapshot>(&json_string).expect("Should deserialize"))
    });
}

/// Benchmark snapshot data structure cloning
fn bench_snapshot_clone(c: &mut Criterion) {
    let snapshot = Snapshot::merge(
        &fixture_fast(),
        &fixture_slow(),
        "Sun, Jan 25, 2026 10:56:42 AM".to_string(),
    );

    c.bench_function("snapshot_clone", |b| b.iter(|| snapshot.clone()));
}

criterion_group!(
    benches,
    bench_cache_hit,
    bench_concurrent_cache_hits,
    bench_snapshot_merge,
    bench_json_serialization,
    bench_json_deserialization,
    bench_snapshot_clone
);

criterion_main!(benches);
