//! Platform
//!
//! The Platform trait is used to acquire the backing buffer of an arena. By abstracting
//! the underlying platform, it becomes possible to port the arena to a different OS, or
//! to back it by a pre-existing region of memory in tests.

use core::{
    alloc::Layout,
    ptr::NonNull,
};

/// Abstraction of platform specific buffer acquisition and release.
pub trait Platform {
    /// Acquires a fresh buffer as per the specified layout.
    ///
    /// Returns None if the request cannot be satisfied.
    ///
    /// #   Safety
    ///
    /// The caller may assume that if the returned pointer is not None then:
    /// -   The number of usable bytes is greater than or equal to `layout.size()`.
    /// -   The pointer is at least aligned to `layout.align()`.
    ///
    /// `allocate` assumes that:
    /// -   `layout.size()` is a multiple of `layout.align()`.
    /// -   `layout.align()` is non-zero, and is a power of 2.
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Releases the supplied buffer.
    ///
    /// #   Safety
    ///
    /// The caller should no longer reference the memory after calling this function.
    ///
    /// `deallocate` assumes that:
    /// -   `pointer` was allocated by this instance of `Platform`, with `layout` as
    ///     argument.
    /// -   `pointer` is the value returned by `Platform`, and not an interior pointer.
    unsafe fn deallocate(&self, pointer: NonNull<u8>, layout: Layout);
}
