use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use fitalloc::{FitAllocator, FitPolicy};

const CAPACITY: usize = 64 * 1024;
const ALLOCATION_SIZE: usize = 56;

//  Round-Trip.
//
//  This benchmark repeatedly allocates and deallocates a single block, per policy.
//
//  With a single free block, first-fit and best-fit examine the same candidate; this
//  measures the lower-bound of allocator latency, lock included.
fn round_trip(c: &mut Criterion) {
    fn bencher(name: &'static str, c: &mut Criterion, policy: FitPolicy) {
        let allocator = FitAllocator::new(CAPACITY, policy);

        c.bench_function(name, |b| b.iter(|| {
            let pointer = allocator.allocate(black_box(ALLOCATION_SIZE)).unwrap();

            unsafe { allocator.deallocate(pointer) };
        }));
    }

    bencher("Round-trip - first-fit", c, FitPolicy::FirstFit);

    bencher("Round-trip - best-fit", c, FitPolicy::BestFit);
}

//  Fragmented Allocation.
//
//  This benchmark allocates out of a fragmented arena, per policy.
//
//  The free list holds dozens of entries, so the placement scan dominates; this is
//  where first-fit and best-fit parts ways.
fn fragmented_allocation(c: &mut Criterion) {
    fn bencher(name: &'static str, c: &mut Criterion, policy: FitPolicy) {
        let allocator = fragmented_allocator(policy);

        c.bench_function(name, |b| b.iter(|| {
            let pointer = allocator.allocate(black_box(ALLOCATION_SIZE)).unwrap();

            unsafe { allocator.deallocate(pointer) };
        }));
    }

    bencher("Fragmented allocation - first-fit", c, FitPolicy::FirstFit);

    bencher("Fragmented allocation - best-fit", c, FitPolicy::BestFit);
}

//  Compaction.
//
//  This benchmark measures a full compaction of a fragmented arena; the setup is
//  re-created for every run, as compaction destroys the fragmentation it feeds on.
fn compaction(c: &mut Criterion) {
    c.bench_function("Compaction - fragmented", |b| b.iter_batched_ref(
        || fragmented_allocator(FitPolicy::FirstFit),
        |allocator| black_box(allocator.compact()),
        BatchSize::SmallInput
    ));
}

criterion_group!(
    benches,
    round_trip,
    fragmented_allocation,
    compaction
);

criterion_main!(benches);

//
//  Implementation Details
//

//  Creates an allocator with a checkerboard of live blocks and free holes.
//
//  128 blocks are allocated back-to-back, and every other one is freed, leaving 64
//  live blocks and 64 isolated holes.
fn fragmented_allocator(policy: FitPolicy) -> FitAllocator {
    let allocator = FitAllocator::new(CAPACITY, policy);

    let pointers: Vec<_> = (0..128)
        .map(|_| allocator.allocate(ALLOCATION_SIZE).unwrap())
        .collect();

    for pointer in pointers.iter().skip(1).step_by(2) {
        unsafe { allocator.deallocate(*pointer) };
    }

    allocator
}
