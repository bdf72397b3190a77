use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use flakeid::{
    BasicFlakeGenerator, FlakeGenerator, FlakeId, HostId, LockFlakeGenerator, SystemClock,
    TimeSource,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 8192;

fn host() -> HostId {
    HostId::new(1).expect("valid host id")
}

/// Benchmarks the hot path on a single thread.
fn bench_generator<G>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: FlakeGenerator,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id());
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks one generator shared by every core.
fn bench_generator_contended<G>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) where
    G: FlakeGenerator + Send + Sync,
{
    let threads = num_cpus::get();
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let mut elapsed = core::time::Duration::ZERO;
            for _ in 0..iters {
                let generator = generator_factory();
                let barrier = Arc::new(Barrier::new(threads + 1));
                let start = scope(|s| {
                    for _ in 0..threads {
                        let barrier = Arc::clone(&barrier);
                        let generator = &generator;
                        s.spawn(move || {
                            barrier.wait();
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.next_id());
                            }
                        });
                    }
                    barrier.wait();
                    Instant::now()
                });
                elapsed += start.elapsed();
            }
            elapsed
        });
    });

    group.finish();
}

fn bench_encodings(c: &mut Criterion) {
    let id = FlakeId::from_components(312_345_678_901, 513, 4242);
    let mut group = c.benchmark_group("encoding");
    group.bench_function("hex", |b| b.iter(|| black_box(id).to_hex()));
    group.bench_function("le_bytes", |b| b.iter(|| black_box(id).to_le_bytes()));
    group.finish();
}

fn benchmarks(c: &mut Criterion) {
    bench_generator(c, "basic/fixed", || {
        BasicFlakeGenerator::with_host_id(host(), FixedMockTime { millis: 1 })
    });
    bench_generator(c, "lock/fixed", || {
        LockFlakeGenerator::with_host_id(host(), FixedMockTime { millis: 1 })
    });
    bench_generator(c, "lock/system", || {
        LockFlakeGenerator::with_host_id(host(), SystemClock::default())
    });
    bench_generator_contended(c, "lock/system/contended", || {
        LockFlakeGenerator::with_host_id(host(), SystemClock::default())
    });
    bench_encodings(c);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
