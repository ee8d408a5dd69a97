#![deny(missing_docs)]

//! Test companion library of fitalloc.

mod lockstep;

pub use lockstep::{Lockstep, LockstepBuilder};
