//! The configuration of fitalloc-core.
//!
//! The arena offers a single fixed alignment boundary: requested capacities are rounded
//! up to it, and the backing buffer must be aligned on it. There is no per-allocation
//! alignment guarantee; blocks land wherever splitting puts them.

use core::alloc::Layout;

use crate::utils::PowerOf2;

/// Configuration
///
/// The Configuration instance pins down the arena-wide constants.
pub trait Configuration {
    /// The alignment boundary of the arena.
    ///
    /// Requested capacities are rounded up to a multiple of this boundary, and the
    /// backing buffer is required to be aligned on it.
    const ARENA_ALIGNMENT: PowerOf2;
}

/// Properties
///
/// Properties of a given Configuration.
///
/// Work-around for the inability to implement static methods directly on a trait.
pub struct Properties<C>(C);

impl<C> Properties<C>
    where
        C: Configuration
{
    /// Returns the capacity actually managed for a requested capacity.
    ///
    /// #   Panics
    ///
    /// If the rounded capacity overflows the address space.
    pub fn effective_capacity(capacity: usize) -> usize {
        let align = C::ARENA_ALIGNMENT.value();

        assert!(capacity <= isize::MAX as usize - (align - 1),
            "Arena capacity overflows the address space: {}", capacity);

        C::ARENA_ALIGNMENT.round_up(capacity)
    }

    /// Returns the layout of the backing buffer for a requested capacity.
    pub fn buffer_layout(capacity: usize) -> Layout {
        let size = Self::effective_capacity(capacity);
        let align = C::ARENA_ALIGNMENT.value();

        //  Safety:
        //  -   `align` is non-zero and a power of 2.
        //  -   `size` does not overflow `isize::MAX` when rounded up to `align`, as per
        //      the check in `effective_capacity`.
        unsafe { Layout::from_size_align_unchecked(size, align) }
    }
}

#[cfg(test)]
mod tests {

use super::*;

struct TestConfiguration;

impl Configuration for TestConfiguration {
    const ARENA_ALIGNMENT: PowerOf2 = unsafe { PowerOf2::new_unchecked(64) };
}

#[test]
fn effective_capacity_rounds_up() {
    assert_eq!(64, Properties::<TestConfiguration>::effective_capacity(1));
    assert_eq!(128, Properties::<TestConfiguration>::effective_capacity(100));
    assert_eq!(128, Properties::<TestConfiguration>::effective_capacity(128));
}

#[test]
fn buffer_layout_matches_alignment() {
    let layout = Properties::<TestConfiguration>::buffer_layout(100);

    assert_eq!(128, layout.size());
    assert_eq!(64, layout.align());
}

}
