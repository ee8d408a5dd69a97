//! Arena.
//!
//! An Arena owns one contiguous backing buffer and serves sub-allocations from it:
//!
//! -   The buffer is acquired from the `Platform` at construction, and released exactly
//!     once when the arena is dropped.
//! -   At all times, the free and allocated blocks partition the buffer: no gaps, no
//!     overlaps.
//!
//! The arena performs no synchronization of its own; embedding crates are expected to
//! wrap it in their lock of choice.

use core::{alloc::Layout, marker, ptr::NonNull};

use crate::internals::store::ArenaStore;
use crate::utils;

use super::{CompactionReport, Configuration, FitPolicy, Platform, Properties, Statistics};

/// Arena.
pub struct Arena<C, P>
    where
        C: Configuration,
        P: Platform,
{
    store: ArenaStore,
    buffer: NonNull<u8>,
    layout: Layout,
    platform: P,
    _configuration: marker::PhantomData<*const C>,
}

impl<C, P> Arena<C, P>
    where
        C: Configuration,
        P: Platform,
{
    /// Creates an arena of at least `capacity` bytes, served with `policy`.
    ///
    /// The capacity is rounded up to `C::ARENA_ALIGNMENT`, and the buffer is
    /// zero-filled. `capacity` must be positive.
    ///
    /// #   Panics
    ///
    /// If the platform cannot provide the backing buffer; no partial arena is ever
    /// exposed to callers.
    pub fn new(capacity: usize, policy: FitPolicy, platform: P) -> Self {
        debug_assert!(capacity > 0, "Arena capacity must be positive");

        let layout = Properties::<C>::buffer_layout(capacity);

        //  Safety:
        //  -   `layout.size()` is a multiple of `layout.align()`.
        //  -   `layout.align()` is non-zero, and is a power of 2.
        let buffer = unsafe { platform.allocate(layout) };

        let buffer = match buffer {
            Some(buffer) => buffer,
            None => panic!("Failed to acquire {} bytes for the arena", layout.size()),
        };

        debug_assert!(utils::is_sufficiently_aligned_for(buffer, C::ARENA_ALIGNMENT));

        //  Safety:
        //  -   `buffer` is valid for `layout.size()` bytes, and exclusively owned.
        //  -   `layout.size()` covers at least one header, the capacity being positive
        //      and rounded up to the alignment boundary.
        let store = unsafe { ArenaStore::new(buffer, layout.size(), policy) };

        let _configuration = marker::PhantomData;

        Arena { store, buffer, layout, platform, _configuration }
    }

    /// Returns the capacity of the arena, after rounding.
    pub fn capacity(&self) -> usize { self.store.capacity() }

    /// Returns the placement policy of the arena.
    pub fn policy(&self) -> FitPolicy { self.store.policy() }

    /// Allocates `size` bytes, returning the payload address.
    ///
    /// Returns None, without any side effect, if no free block is large enough; the
    /// arena never grows.
    pub fn allocate(&mut self, size: usize) -> Option<NonNull<u8>> {
        self.store.allocate(size)
    }

    /// Deallocates the block whose payload is `pointer`.
    ///
    /// Address-adjacent free blocks are merged before the call returns.
    ///
    /// #   Safety
    ///
    /// -   Assumes `pointer` has been returned by a prior call to `allocate` on this
    ///     arena.
    /// -   Assumes `pointer` has not been deallocated, nor invalidated by a compaction,
    ///     since.
    pub unsafe fn deallocate(&mut self, pointer: NonNull<u8>) {
        self.store.deallocate(pointer);
    }

    /// Slides all live blocks to the front of the buffer, in allocated-list order,
    /// consolidating the free space into a single trailing block.
    ///
    /// Pointers to relocated blocks are invalidated; the returned report is the only
    /// way to learn their new addresses.
    pub fn compact(&mut self) -> CompactionReport {
        self.store.compact()
    }

    /// Returns the sum of the sizes of the free blocks.
    pub fn available_memory(&self) -> usize { self.store.available_memory() }

    /// Returns a snapshot of the arena occupancy.
    pub fn statistics(&self) -> Statistics { self.store.statistics() }
}

impl<C, P> Drop for Arena<C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn drop(&mut self) {
        //  Safety:
        //  -   `buffer` was allocated by `platform` with `layout` as argument.
        //  -   The store only references memory inside the buffer, none of which is
        //      used past this point.
        unsafe { self.platform.deallocate(self.buffer, self.layout) };
    }
}
