#![no_std]

#![deny(missing_docs)]

//! Building blocks for a fixed-arena fit allocator.
//!
//! fitalloc-core contains the complete arena data structure and its algorithms: block
//! headers, free and allocated lists, first-fit and best-fit placement, coalescing, and
//! compaction. It is independent of the OS:
//! -   The backing buffer is acquired through the `Platform` trait.
//! -   Synchronization is left to the embedding crate; the `Arena` itself takes
//!     `&mut self` for every mutating operation.

extern crate alloc;

mod api;
mod internals;
mod utils;

pub use api::*;
