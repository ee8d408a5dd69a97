//! The API of fitalloc-core.

mod arena;
mod configuration;
mod platform;
mod policy;
mod report;
mod statistics;

pub use arena::Arena;
pub use configuration::{Configuration, Properties};
pub use platform::Platform;
pub use policy::FitPolicy;
pub use report::CompactionReport;
pub use statistics::Statistics;

pub use crate::utils::PowerOf2;
