//! Allocator

use core::ptr::NonNull;

use std::sync::{Mutex, MutexGuard};

use fitalloc_core::{Arena, CompactionReport, FitPolicy, Statistics};

use crate::{FitConfiguration, FitPlatform};

/// Fixed-capacity fit allocator.
///
/// A thread-safe wrapper over a single arena: every operation takes the arena lock for
/// its whole duration, so each call observes and leaves a consistent arena.
pub struct FitAllocator {
    arena: Mutex<Arena<FitConfiguration, FitPlatform>>,
}

impl FitAllocator {
    /// Creates an allocator over a fresh buffer of at least `capacity` bytes.
    ///
    /// The capacity is rounded up to a 64 bytes boundary, and the buffer is
    /// zero-filled. `capacity` must be positive.
    ///
    /// #   Panics
    ///
    /// If the operating system cannot provide the backing buffer.
    pub fn new(capacity: usize, policy: FitPolicy) -> Self {
        let arena = Arena::new(capacity, policy, FitPlatform::new());

        FitAllocator { arena: Mutex::new(arena) }
    }

    /// Returns the capacity of the allocator, after rounding.
    pub fn capacity(&self) -> usize { self.lock().capacity() }

    /// Returns the placement policy of the allocator.
    pub fn policy(&self) -> FitPolicy { self.lock().policy() }

    /// Allocates `size` bytes of memory.
    ///
    /// Returns None, without any side effect, if no free block is large enough; the
    /// allocator never grows its buffer.
    pub fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        self.lock().allocate(size)
    }

    /// Deallocates the memory located at `pointer`.
    ///
    /// #   Safety
    ///
    /// -   Assumes `pointer` has been returned by a prior call to `allocate` on this
    ///     allocator.
    /// -   Assumes `pointer` has not been deallocated, nor invalidated by a compaction,
    ///     since its allocation.
    /// -   Assumes the memory pointed by `pointer` is no longer in use.
    pub unsafe fn deallocate(&self, pointer: NonNull<u8>) {
        self.lock().deallocate(pointer);
    }

    /// Slides all live allocations to the front of the buffer, consolidating the free
    /// space into a single block.
    ///
    /// Pointers to relocated allocations are invalidated; the returned report maps each
    /// relocated pointer to its new address, and callers must rewrite their pointers
    /// before the next use.
    pub fn compact(&self) -> CompactionReport {
        self.lock().compact()
    }

    /// Returns the sum of the sizes of the free blocks.
    pub fn available_memory(&self) -> usize { self.lock().available_memory() }

    /// Returns a snapshot of the allocator occupancy.
    pub fn statistics(&self) -> Statistics { self.lock().statistics() }

    fn lock(&self) -> MutexGuard<'_, Arena<FitConfiguration, FitPlatform>> {
        //  The arena only panics in debug on contract violations, before mutating any
        //  state, so a poisoned arena is still consistent.
        self.arena.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

//  Safety:
//  -   The arena exclusively owns its buffer, and all access to it goes through the
//      Mutex.
unsafe impl Send for FitAllocator {}

//  Safety:
//  -   The arena exclusively owns its buffer, and all access to it goes through the
//      Mutex.
unsafe impl Sync for FitAllocator {}
