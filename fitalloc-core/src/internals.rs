//! The internals of fitalloc-core.

pub(crate) mod block;
pub(crate) mod block_list;
pub(crate) mod store;
