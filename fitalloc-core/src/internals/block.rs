//! Block header.
//!
//! Every block of the arena, free or allocated, stores its total size (header included)
//! at its starting address; the payload handed to the caller begins immediately after
//! the header.
//!
//! Block starting addresses land on arbitrary byte offsets, as allocation sizes are not
//! rounded: every header access is an unaligned access.

use core::{mem, ptr, ptr::NonNull};

/// The size header stored at the first bytes of every block.
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct BlockHeader {
    size: usize,
}

impl BlockHeader {
    /// The number of bytes of the header.
    pub(crate) const SIZE: usize = mem::size_of::<BlockHeader>();
}

/// Handle to a block of the arena.
///
/// A plain address: reading or writing through it requires the block to be live, hence
/// the unsafe accessors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Block(NonNull<BlockHeader>);

impl Block {
    /// In-place constructs a block of `size` bytes at `at`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that access to the memory location is exclusive.
    /// -   Assumes that at least `size` bytes are available at `at`.
    pub(crate) unsafe fn initialize(at: NonNull<u8>, size: usize) -> Block {
        debug_assert!(size >= BlockHeader::SIZE);

        let header = at.cast::<BlockHeader>();

        ptr::write_unaligned(header.as_ptr(), BlockHeader { size });

        Block(header)
    }

    /// Recovers the block from the payload address handed to the caller.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `payload` was returned by `payload` on a live block.
    pub(crate) unsafe fn from_payload(payload: NonNull<u8>) -> Block {
        //  Safety:
        //  -   The header precedes the payload, hence the result is within the buffer.
        let header = NonNull::new_unchecked(payload.as_ptr().sub(BlockHeader::SIZE));

        Block(header.cast())
    }

    /// Returns the starting address of the block.
    pub(crate) fn address(&self) -> NonNull<u8> { self.0.cast() }

    /// Returns the payload address, immediately after the header.
    ///
    /// #   Safety
    ///
    /// -   Assumes the block is live, its payload lying within the buffer.
    pub(crate) unsafe fn payload(&self) -> NonNull<u8> {
        NonNull::new_unchecked(self.address().as_ptr().add(BlockHeader::SIZE))
    }

    /// Returns the total size of the block, header included.
    ///
    /// #   Safety
    ///
    /// -   Assumes the block is live.
    pub(crate) unsafe fn size(&self) -> usize {
        ptr::read_unaligned(self.0.as_ptr()).size
    }

    /// Rewrites the size of the block.
    ///
    /// #   Safety
    ///
    /// -   Assumes the block is live, and access to it exclusive.
    pub(crate) unsafe fn set_size(&self, size: usize) {
        debug_assert!(size >= BlockHeader::SIZE);

        ptr::write_unaligned(self.0.as_ptr(), BlockHeader { size });
    }

    /// Returns the first address past the block.
    ///
    /// #   Safety
    ///
    /// -   Assumes the block is live.
    pub(crate) unsafe fn end(&self) -> *mut u8 {
        self.address().as_ptr().add(self.size())
    }

    /// Returns whether `next` starts exactly where this block ends.
    ///
    /// #   Safety
    ///
    /// -   Assumes both blocks are live.
    pub(crate) unsafe fn is_adjacent_to(&self, next: &Block) -> bool {
        self.end() == next.address().as_ptr()
    }
}
