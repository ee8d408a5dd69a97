//! Arena store.
//!
//! The store is the bookkeeping heart of the arena: which regions of the buffer are
//! free, which are live, and every algorithm over them. Its central invariant is that
//! the blocks of the two lists partition the buffer: no gaps, no overlaps.
//!
//! The store does not own the buffer; the embedding `Arena` acquires and releases it.

use core::{ptr, ptr::NonNull};

use crate::api::{CompactionReport, FitPolicy, Statistics};

use super::block::{Block, BlockHeader};
use super::block_list::BlockList;

pub(crate) struct ArenaStore {
    buffer: NonNull<u8>,
    capacity: usize,
    policy: FitPolicy,
    free: BlockList,
    allocated: BlockList,
}

impl ArenaStore {
    /// Creates a store over `buffer`, zero-filling it and covering it with a single
    /// free block.
    ///
    /// #   Safety
    ///
    /// -   Assumes `buffer` is valid for `capacity` bytes, and exclusively owned, for
    ///     the lifetime of the store.
    /// -   Assumes `capacity` covers at least one header.
    pub(crate) unsafe fn new(buffer: NonNull<u8>, capacity: usize, policy: FitPolicy) -> Self {
        debug_assert!(capacity >= BlockHeader::SIZE);

        ptr::write_bytes(buffer.as_ptr(), 0, capacity);

        let initial = Block::initialize(buffer, capacity);

        let mut free = BlockList::default();
        free.push(initial);

        ArenaStore { buffer, capacity, policy, free, allocated: BlockList::default() }
    }

    pub(crate) fn capacity(&self) -> usize { self.capacity }

    pub(crate) fn policy(&self) -> FitPolicy { self.policy }

    pub(crate) fn allocate(&mut self, size: usize) -> Option<NonNull<u8>> {
        debug_assert!(size > 0, "Allocation size must be positive");

        //  An unrepresentable total size cannot be satisfied by any free block.
        let total_size = size.checked_add(BlockHeader::SIZE)?;

        let index = match self.policy {
            FitPolicy::FirstFit => self.find_first_fit(total_size),
            FitPolicy::BestFit => self.find_best_fit(total_size),
        }?;

        let block = self.free.get(index);

        //  Safety:
        //  -   Listed blocks are live.
        let block_size = unsafe { block.size() };

        if block_size - total_size >= BlockHeader::SIZE {
            //  Split: the front becomes the allocation, the remainder replaces the
            //  original free block in place, preserving its list position.

            //  Safety:
            //  -   `total_size` plus a header fits within the block, hence within the
            //      buffer.
            let remainder = unsafe {
                let at = NonNull::new_unchecked(block.address().as_ptr().add(total_size));
                Block::initialize(at, block_size - total_size)
            };

            self.free.replace(index, remainder);

            //  Safety:
            //  -   The block is live, and exclusively managed by this store.
            unsafe { block.set_size(total_size) };
        } else {
            //  The remainder could not host a header of its own: hand out the whole
            //  block, its recorded size unchanged. The slack is internal fragmentation,
            //  returned intact on deallocation.
            self.free.remove(index);
        }

        self.allocated.push(block);

        //  Safety:
        //  -   The block is live, its payload lying within the buffer.
        Some(unsafe { block.payload() })
    }

    /// Returns the block to the free list and merges adjacent free blocks.
    ///
    /// #   Safety
    ///
    /// -   Assumes `pointer` was returned by `allocate` on this store, and neither
    ///     deallocated nor relocated since.
    pub(crate) unsafe fn deallocate(&mut self, pointer: NonNull<u8>) {
        let block = Block::from_payload(pointer);

        debug_assert!(self.owns(block), "Pointer does not belong to this arena");

        let removed = self.allocated.remove_block(block);
        debug_assert!(removed, "Pointer does not match a live block");

        self.free.push(block);

        self.coalesce();
    }

    pub(crate) fn compact(&mut self) -> CompactionReport {
        //  All fragmentation disappears at once; a single trailing free block is
        //  rebuilt after the slide.
        self.free.clear();

        let mut report = CompactionReport::default();
        let mut cursor = 0;

        for index in 0..self.allocated.len() {
            let block = self.allocated.get(index);

            //  Safety:
            //  -   Listed blocks are live.
            let size = unsafe { block.size() };

            //  Safety:
            //  -   `cursor` never exceeds the capacity, the live blocks partitioning
            //      the buffer.
            let target = unsafe { NonNull::new_unchecked(self.buffer.as_ptr().add(cursor)) };

            if block.address() != target {
                //  Safety:
                //  -   The block is live; its payload address is pure arithmetic.
                let old_payload = unsafe { block.payload() };

                //  Source and destination may overlap; `ptr::copy` behaves as if going
                //  through a temporary buffer.
                //
                //  Safety:
                //  -   Both regions lie within the buffer, the target trailing the
                //      source.
                unsafe { ptr::copy(block.address().as_ptr(), target.as_ptr(), size) };

                //  Safety:
                //  -   The target region is exclusively owned; the header is rewritten
                //      with its size unchanged.
                let relocated = unsafe { Block::initialize(target, size) };

                //  Safety:
                //  -   The relocated block is live.
                report.push(old_payload, unsafe { relocated.payload() });

                self.allocated.replace(index, relocated);
            }

            cursor += size;
        }

        if cursor < self.capacity {
            //  The remainder is the sum of the former free blocks, each at least one
            //  header, hence large enough to be a block of its own.
            //
            //  Safety:
            //  -   `[cursor, capacity)` is not covered by any live block.
            let remainder = unsafe {
                let at = NonNull::new_unchecked(self.buffer.as_ptr().add(cursor));
                Block::initialize(at, self.capacity - cursor)
            };

            self.free.push(remainder);
        }

        report
    }

    pub(crate) fn available_memory(&self) -> usize {
        //  Safety:
        //  -   Listed blocks are live.
        self.free.iter().map(|block| unsafe { block.size() }).sum()
    }

    pub(crate) fn statistics(&self) -> Statistics {
        let mut statistics = Statistics {
            smallest_free_chunk: self.capacity,
            ..Statistics::default()
        };

        for block in self.allocated.iter() {
            //  Safety:
            //  -   Listed blocks are live.
            statistics.allocated_size += unsafe { block.size() };
            statistics.allocated_chunks += 1;
        }

        for block in self.free.iter() {
            //  Safety:
            //  -   Listed blocks are live.
            let size = unsafe { block.size() };

            statistics.free_size += size;
            statistics.free_chunks += 1;

            if size > statistics.largest_free_chunk {
                statistics.largest_free_chunk = size;
            }

            if size < statistics.smallest_free_chunk {
                statistics.smallest_free_chunk = size;
            }
        }

        statistics
    }

    //
    //  Implementation
    //

    fn find_first_fit(&self, total_size: usize) -> Option<usize> {
        //  Safety:
        //  -   Listed blocks are live.
        self.free.iter().position(|block| unsafe { block.size() } >= total_size)
    }

    fn find_best_fit(&self, total_size: usize) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;

        for (index, block) in self.free.iter().enumerate() {
            //  Safety:
            //  -   Listed blocks are live.
            let size = unsafe { block.size() };

            if size < total_size {
                continue;
            }

            //  Strict comparison: the first adequate block encountered wins ties.
            if best.map_or(true, |(_, smallest)| size < smallest) {
                best = Some((index, size));
            }
        }

        best.map(|(index, _)| index)
    }

    //  Merges address-adjacent free blocks until a full pass performs no merge.
    //
    //  Merging is confluent: no merge order can prevent a later adjacent merge, so the
    //  fixed point is uniquely determined by the free set.
    fn coalesce(&mut self) {
        while self.merge_adjacent_pair() {}
    }

    //  Merges one adjacent pair, if any; the caller restarts the scan after each merge.
    fn merge_adjacent_pair(&mut self) -> bool {
        for left_index in 0..self.free.len() {
            let left = self.free.get(left_index);

            for right_index in 0..self.free.len() {
                if left_index == right_index {
                    continue;
                }

                let right = self.free.get(right_index);

                //  Safety:
                //  -   Listed blocks are live.
                if unsafe { left.is_adjacent_to(&right) } {
                    //  Safety:
                    //  -   Both blocks are live, their union contiguous within the
                    //      buffer.
                    unsafe { left.set_size(left.size() + right.size()) };

                    self.free.remove(right_index);

                    return true;
                }
            }
        }

        false
    }

    fn owns(&self, block: Block) -> bool {
        let address = block.address().as_ptr() as usize;
        let buffer = self.buffer.as_ptr() as usize;

        address >= buffer && address < buffer + self.capacity
    }
}
