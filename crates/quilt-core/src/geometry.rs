//! Geometry kernel over integer grid rectangles.
//!
//! These are the primitives a placement/compaction engine builds on. Every function is
//! pure and total for well-formed rectangles (`w > 0`, `h > 0`).

use crate::profiling::profile_function;
use std::cmp::Ordering;

/// Sentinel used by [`order_for_placement`] for nodes without a coordinate.
pub const UNPLACED: i32 = 10_000;

/// Axis-aligned rectangle in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl GridRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

/// `true` iff the open interiors overlap. Rectangles sharing only an edge or a corner
/// do not intersect.
pub fn intersects(a: GridRect, b: GridRect) -> bool {
    !(a.y >= b.bottom() || a.bottom() <= b.y || a.right() <= b.x || a.x >= b.right())
}

/// `true` iff `a` intersects `b` grown by half a cell on every side, i.e. the two share
/// an edge or a corner (or overlap).
pub fn touches(a: GridRect, b: GridRect) -> bool {
    // Work in half-cells so the inflated rectangle stays integral.
    let (ax, ay) = (a.x as i64 * 2, a.y as i64 * 2);
    let (aw, ah) = (a.w as i64 * 2, a.h as i64 * 2);
    let (bx, by) = (b.x as i64 * 2 - 1, b.y as i64 * 2 - 1);
    let (bw, bh) = (b.w as i64 * 2 + 2, b.h as i64 * 2 + 2);
    !(ay >= by + bh || ay + ah <= by || ax + aw <= bx || ax >= bx + bw)
}

/// Area of the intersection of `a` and `b`, `0` when they are disjoint.
pub fn overlap_area(a: GridRect, b: GridRect) -> i32 {
    let x0 = a.x.max(b.x);
    let x1 = a.right().min(b.right());
    if x1 <= x0 {
        return 0;
    }
    let y0 = a.y.max(b.y);
    let y1 = a.bottom().min(b.bottom());
    if y1 <= y0 {
        return 0;
    }
    (x1 - x0) * (y1 - y0)
}

pub fn area(a: GridRect) -> i32 {
    a.w * a.h
}

/// Anything that can be ordered for placement by its (possibly unknown) cell position.
pub trait Placement {
    fn placement_x(&self) -> Option<i32>;
    fn placement_y(&self) -> Option<i32>;
}

impl Placement for GridRect {
    fn placement_x(&self) -> Option<i32> {
        Some(self.x)
    }

    fn placement_y(&self) -> Option<i32> {
        Some(self.y)
    }
}

impl<T: Placement + ?Sized> Placement for &T {
    fn placement_x(&self) -> Option<i32> {
        (**self).placement_x()
    }

    fn placement_y(&self) -> Option<i32> {
        (**self).placement_y()
    }
}

/// Row-major ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Top-left first.
    #[default]
    Ascending,
    /// Bottom-right first.
    Descending,
}

impl SortDirection {
    /// `-1` maps to [`SortDirection::Descending`], anything else to ascending.
    pub fn from_sign(dir: i32) -> Self {
        if dir < 0 {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

fn placement_cmp<T: Placement>(a: &T, b: &T, dir: SortDirection) -> Ordering {
    let key = |n: &T| {
        (
            n.placement_y().unwrap_or(UNPLACED),
            n.placement_x().unwrap_or(UNPLACED),
        )
    };
    let ordering = key(a).cmp(&key(b));
    match dir {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable in-place sort by `(y, x)`. Equal keys keep their relative order.
pub fn sort_for_placement<T: Placement>(nodes: &mut [T], dir: SortDirection) {
    profile_function!();
    nodes.sort_by(|a, b| placement_cmp(a, b, dir));
}

/// Returning variant of [`sort_for_placement`].
pub fn order_for_placement<T: Placement>(mut nodes: Vec<T>, dir: SortDirection) -> Vec<T> {
    sort_for_placement(&mut nodes, dir);
    nodes
}
