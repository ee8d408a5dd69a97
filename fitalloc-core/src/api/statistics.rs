//! Occupancy statistics.

/// Snapshot of the arena occupancy.
///
/// Sizes are total block sizes, headers included; `allocated_size + free_size` equals
/// the arena capacity at all times.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Total size of the allocated blocks.
    pub allocated_size: usize,
    /// Number of allocated blocks.
    pub allocated_chunks: usize,
    /// Total size of the free blocks.
    pub free_size: usize,
    /// Number of free blocks.
    pub free_chunks: usize,
    /// Size of the largest free block; 0 when the free list is empty.
    pub largest_free_chunk: usize,
    /// Size of the smallest free block; the full capacity when the free list is empty.
    pub smallest_free_chunk: usize,
}
