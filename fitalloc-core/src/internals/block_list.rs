//! Unordered lists of blocks.
//!
//! The free and allocated lists are address vectors rather than linked nodes threaded
//! through the buffer. Order carries no meaning of its own; it only surfaces as the
//! search order of first-fit and the relocation order of compaction:
//!
//! -   Deallocated and freshly allocated blocks are appended at the tail.
//! -   A split replaces the original free block in place, preserving its position.

use alloc::vec::Vec;

use super::block::Block;

/// List of blocks, in insertion order.
#[derive(Default)]
pub(crate) struct BlockList(Vec<Block>);

impl BlockList {
    /// Returns the number of blocks.
    pub(crate) fn len(&self) -> usize { self.0.len() }

    /// Returns whether the list is empty.
    pub(crate) fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Appends a block at the tail.
    pub(crate) fn push(&mut self, block: Block) { self.0.push(block); }

    /// Returns the block at `index`.
    pub(crate) fn get(&self, index: usize) -> Block { self.0[index] }

    /// Replaces the block at `index`, preserving its position.
    pub(crate) fn replace(&mut self, index: usize, block: Block) { self.0[index] = block; }

    /// Removes the block at `index`, preserving the order of the remainder.
    pub(crate) fn remove(&mut self, index: usize) -> Block { self.0.remove(index) }

    /// Removes the first block equal to `block`; returns whether one was found.
    pub(crate) fn remove_block(&mut self, block: Block) -> bool {
        if let Some(index) = self.0.iter().position(|&candidate| candidate == block) {
            self.0.remove(index);
            true
        } else {
            false
        }
    }

    /// Empties the list.
    pub(crate) fn clear(&mut self) { self.0.clear(); }

    /// Returns an iterator over the blocks, in list order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = Block> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {

use alloc::vec;

use core::ptr::NonNull;

use super::*;

#[repr(align(64))]
struct AlignedBuffer([u8; 128]);

impl AlignedBuffer {
    fn new() -> Self { Self([0; 128]) }

    fn block(&mut self, offset: usize, size: usize) -> Block {
        unsafe { Block::initialize(NonNull::from(&mut self.0[offset]), size) }
    }
}

#[test]
fn push_preserves_order() {
    let mut buffer = AlignedBuffer::new();
    let (first, second) = (buffer.block(0, 24), buffer.block(24, 40));

    let mut list = BlockList::default();
    assert!(list.is_empty());

    list.push(first);
    list.push(second);

    assert_eq!(2, list.len());
    assert_eq!(vec!(first, second), list.iter().collect::<Vec<_>>());
}

#[test]
fn replace_keeps_position() {
    let mut buffer = AlignedBuffer::new();
    let (first, second, third) = (buffer.block(0, 24), buffer.block(24, 40), buffer.block(64, 16));

    let mut list = BlockList::default();
    list.push(first);
    list.push(second);

    list.replace(0, third);

    assert_eq!(vec!(third, second), list.iter().collect::<Vec<_>>());
}

#[test]
fn remove_block_matches_exactly() {
    let mut buffer = AlignedBuffer::new();
    let (first, second, absent) = (buffer.block(0, 24), buffer.block(24, 40), buffer.block(64, 16));

    let mut list = BlockList::default();
    list.push(first);
    list.push(second);

    assert!(!list.remove_block(absent));
    assert!(list.remove_block(first));
    assert!(!list.remove_block(first));

    assert_eq!(vec!(second), list.iter().collect::<Vec<_>>());
}

}
