//! Optimized allocation and collection types for Quilt.
//!
//! This module provides:
//! - Re-exports of optimized hash collections using AHash
//! - SparseSet storage with generational handles

pub mod sparse_set;

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
