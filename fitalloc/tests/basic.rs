use std::mem;
use std::ptr::NonNull;

use fitalloc::{FitAllocator, FitPolicy};

const HEADER: usize = mem::size_of::<usize>();

fn write_value(pointer: NonNull<u8>, value: i32) {
    unsafe { (pointer.as_ptr() as *mut i32).write_unaligned(value) };
}

fn read_value(pointer: NonNull<u8>) -> i32 {
    unsafe { (pointer.as_ptr() as *const i32).read_unaligned() }
}

fn offset_from(base: NonNull<u8>, pointer: NonNull<u8>) -> usize {
    pointer.as_ptr() as usize - base.as_ptr() as usize
}

#[test]
fn capacity_is_rounded_up() {
    let allocator = FitAllocator::new(100, FitPolicy::FirstFit);

    assert_eq!(128, allocator.capacity());
    assert_eq!(128, allocator.available_memory());
}

#[test]
fn exhaustion_is_a_no_op() {
    let allocator = FitAllocator::new(100, FitPolicy::FirstFit);

    let _anchor = allocator.allocate(4).unwrap();
    let snapshot = allocator.statistics();

    assert!(allocator.allocate(1000).is_none());
    assert!(allocator.allocate(usize::MAX).is_none());

    assert_eq!(snapshot, allocator.statistics());
}

#[test]
fn allocate_free_allocate_is_deterministic() {
    let allocator = FitAllocator::new(256, FitPolicy::FirstFit);

    let first = allocator.allocate(40).unwrap();

    unsafe { allocator.deallocate(first) };

    let second = allocator.allocate(40).unwrap();

    assert_eq!(first, second);
}

#[test]
fn best_fit_and_first_fit_diverge() {
    //  Identical fragmentation, divergent placement: a 64-byte hole at offset 32, and
    //  a 128-byte tail at offset 128, the tail first in free-list order.
    fn fragment(allocator: &FitAllocator) -> NonNull<u8> {
        let base = allocator.allocate(24).unwrap();
        let hole = allocator.allocate(56).unwrap();
        let _fence = allocator.allocate(24).unwrap();

        unsafe { allocator.deallocate(hole) };

        //  The first payload sits one header past the buffer start.
        unsafe { NonNull::new_unchecked(base.as_ptr().sub(HEADER)) }
    }

    let first_fit = FitAllocator::new(256, FitPolicy::FirstFit);
    let base = fragment(&first_fit);
    let placed = first_fit.allocate(20).unwrap();

    assert_eq!(128 + HEADER, offset_from(base, placed));

    let best_fit = FitAllocator::new(256, FitPolicy::BestFit);
    let base = fragment(&best_fit);
    let placed = best_fit.allocate(20).unwrap();

    assert_eq!(32 + HEADER, offset_from(base, placed));
}

#[test]
fn ten_integers_odd_frees_then_compaction() {
    //  End-to-end scenario: fill the arena with small integers, free every other one,
    //  inspect the fragmented statistics, compact, and check both the relocation report
    //  and the surviving values.
    let allocator = FitAllocator::new(100, FitPolicy::FirstFit);

    assert_eq!(128, allocator.capacity());

    let size = mem::size_of::<i32>();
    let block = size + HEADER;

    let mut pointers = Vec::new();

    for value in 0..10 {
        let pointer = allocator.allocate(size).unwrap();
        write_value(pointer, value);
        pointers.push(pointer);
    }

    let base = unsafe { NonNull::new_unchecked(pointers[0].as_ptr().sub(HEADER)) };

    //  10 blocks of 12 bytes, and a split-off 8-byte remainder.
    assert_eq!(8, allocator.available_memory());

    for (index, &pointer) in pointers.iter().enumerate() {
        assert_eq!(index * block + HEADER, offset_from(base, pointer));
    }

    for &pointer in pointers.iter().skip(1).step_by(2) {
        unsafe { allocator.deallocate(pointer) };
    }

    //  The last freed block merges with the trailing remainder; the other holes are
    //  fenced by live blocks.
    let statistics = allocator.statistics();

    assert_eq!(60, statistics.allocated_size);
    assert_eq!(5, statistics.allocated_chunks);
    assert_eq!(68, statistics.free_size);
    assert_eq!(5, statistics.free_chunks);
    assert_eq!(20, statistics.largest_free_chunk);
    assert_eq!(12, statistics.smallest_free_chunk);

    let report = allocator.compact();

    //  The first survivor already sits at the front; the other four slide down.
    assert_eq!(4, report.relocated());
    assert_eq!(None, report.relocated_address(pointers[0]));

    let survivors: Vec<_> = pointers.iter()
        .step_by(2)
        .map(|&pointer| report.relocated_address(pointer).unwrap_or(pointer))
        .collect();

    for (position, &pointer) in survivors.iter().enumerate() {
        assert_eq!(position * block + HEADER, offset_from(base, pointer));
        assert_eq!(2 * position as i32, read_value(pointer));
    }

    let statistics = allocator.statistics();

    assert_eq!(60, statistics.allocated_size);
    assert_eq!(5, statistics.allocated_chunks);
    assert_eq!(68, statistics.free_size);
    assert_eq!(1, statistics.free_chunks);
    assert_eq!(68, statistics.largest_free_chunk);
    assert_eq!(68, statistics.smallest_free_chunk);

    //  The consolidated tail can now serve a request no fragment could.
    let large = allocator.allocate(60 - HEADER).unwrap();

    assert_eq!(5 * block + HEADER, offset_from(base, large));
}

#[test]
fn compaction_of_untouched_allocations_reports_nothing() {
    let allocator = FitAllocator::new(256, FitPolicy::BestFit);

    let first = allocator.allocate(16).unwrap();
    let second = allocator.allocate(16).unwrap();

    write_value(first, 7);
    write_value(second, 11);

    let report = allocator.compact();

    assert!(report.is_empty());
    assert_eq!(7, read_value(first));
    assert_eq!(11, read_value(second));
}
