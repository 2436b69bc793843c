//! Quilt Core
//!
//! Shared building blocks for the Quilt grid widget: the geometry kernel consumed by
//! placement/compaction, grid-node helpers, unit parsing and the ambient pieces
//! (configuration, logging, profiling, collections).

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod logging;
pub mod math;
pub mod profiling;
pub mod units;
