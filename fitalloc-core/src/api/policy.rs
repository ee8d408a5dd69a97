//! Placement policies.

/// Policy used to pick a free block when serving an allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FitPolicy {
    /// Picks the first block of the free list, in list order, that is large enough.
    FirstFit,
    /// Picks the smallest block of the free list that is large enough; the first block
    /// encountered wins ties.
    BestFit,
}
