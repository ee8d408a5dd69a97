#![deny(missing_docs)]

//! A fixed-capacity arena allocator library.
//!
//! The type `FitAllocator` serves allocations out of a single buffer of memory acquired
//! up-front: it never grows, and hands back None rather than touching the system
//! allocator when the buffer is exhausted.
//!
//! Fragmented arenas can be compacted on demand; see `FitAllocator::compact` for the
//! pointer-invalidation contract this entails.

mod allocator;
mod platform;

pub use allocator::FitAllocator;

pub use fitalloc_core::{CompactionReport, FitPolicy, Statistics};

use platform::{FitConfiguration, FitPlatform};
