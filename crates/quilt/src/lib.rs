//! Quilt - pointer-interaction coordination for grid-layout widgets
//!
//! Quilt provides the pieces a grid widget needs between raw pointer events and its
//! placement engine:
//!
//! - **Geometry**: intersection, touch-adjacency, overlap area and placement ordering
//! - **Grid nodes**: position copy/compare, constraint sanitizing, rotation checks
//! - **Drag & drop**: drag session, nested drop zones, per-element behavior facade
//!
//! # Quick Start
//!
//! ```rust
//! use quilt::prelude::*;
//!
//! let a = GridRect::new(0, 0, 2, 2);
//! let b = GridRect::new(2, 0, 2, 2);
//! assert!(!intersects(a, b));
//! assert!(touches(a, b));
//!
//! let mut dd = DdManager::new();
//! let zone = dd.tree_mut().create_element("div");
//! assert!(dd.setup_droppable(zone, DroppableOptions::new().accept(".grid-stack-item")));
//! ```
//!
//! # Features
//!
//! - `dd` (default) - drag & drop coordination (`quilt-dd`)
//! - `profiling` (default) - puffin scopes on hot paths

pub use quilt_core as core;
pub use quilt_core::{config, geometry, grid, logging, math, profiling, units};

#[cfg(feature = "dd")]
pub use quilt_dd as dd;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ClassNames, Config, TouchSupport};
    pub use crate::geometry::{
        GridRect, Placement, SortDirection, area, intersects, order_for_placement,
        overlap_area, sort_for_placement, touches,
    };
    pub use crate::grid::GridNode;
    pub use crate::math::Vec2;

    #[cfg(feature = "dd")]
    pub use quilt_dd::prelude::*;
}
