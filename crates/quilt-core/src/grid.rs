//! Grid node description and the small helpers the placement engine uses on it.

use crate::geometry::{GridRect, Placement};

/// Position, size and constraints of one grid item.
///
/// Coordinates are optional because a node may still be waiting for auto-placement.
/// A min/max constraint of `Some(0)` is treated like an unset one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridNode {
    pub id: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
    pub min_w: Option<i32>,
    pub min_h: Option<i32>,
    pub max_w: Option<i32>,
    pub max_h: Option<i32>,
    pub locked: bool,
    pub no_resize: bool,
    pub no_move: bool,
    pub auto_position: bool,
}

impl GridNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// A node placed at `(x, y)` with no explicit size.
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_rect(mut self, rect: GridRect) -> Self {
        self.x = Some(rect.x);
        self.y = Some(rect.y);
        self.w = Some(rect.w);
        self.h = Some(rect.h);
        self
    }

    pub fn with_min(mut self, min_w: i32, min_h: i32) -> Self {
        self.min_w = Some(min_w);
        self.min_h = Some(min_h);
        self
    }

    pub fn with_max(mut self, max_w: i32, max_h: i32) -> Self {
        self.max_w = Some(max_w);
        self.max_h = Some(max_h);
        self
    }

    /// Width, defaulting to a single cell.
    pub fn width(&self) -> i32 {
        set(self.w).unwrap_or(1)
    }

    /// Height, defaulting to a single cell.
    pub fn height(&self) -> i32 {
        set(self.h).unwrap_or(1)
    }

    /// The occupied rectangle, once both coordinates are known.
    pub fn rect(&self) -> Option<GridRect> {
        Some(GridRect::new(self.x?, self.y?, self.width(), self.height()))
    }
}

impl Placement for GridNode {
    fn placement_x(&self) -> Option<i32> {
        self.x
    }

    fn placement_y(&self) -> Option<i32> {
        self.y
    }
}

/// Treat `Some(0)` as "not set", the way constraints are stored.
fn set(v: Option<i32>) -> Option<i32> {
    v.filter(|v| *v != 0)
}

/// Copy every known coordinate/size of `src` onto `dst`; with `min_max`, also the set
/// constraints.
pub fn copy_pos<'a>(dst: &'a mut GridNode, src: &GridNode, min_max: bool) -> &'a mut GridNode {
    if src.x.is_some() {
        dst.x = src.x;
    }
    if src.y.is_some() {
        dst.y = src.y;
    }
    if src.w.is_some() {
        dst.w = src.w;
    }
    if src.h.is_some() {
        dst.h = src.h;
    }
    if min_max {
        if let Some(v) = set(src.min_w) {
            dst.min_w = Some(v);
        }
        if let Some(v) = set(src.min_h) {
            dst.min_h = Some(v);
        }
        if let Some(v) = set(src.max_w) {
            dst.max_w = Some(v);
        }
        if let Some(v) = set(src.max_h) {
            dst.max_h = Some(v);
        }
    }
    dst
}

/// Same cell and size, where a missing size counts as one cell.
pub fn same_pos(a: &GridNode, b: &GridNode) -> bool {
    a.x == b.x && a.y == b.y && a.width() == b.width() && a.height() == b.height()
}

/// Drop constraints that are unset in all but name.
pub fn sanitize_min_max(node: &mut GridNode) {
    node.min_w = set(node.min_w);
    node.min_h = set(node.min_h);
    node.max_w = set(node.max_w);
    node.max_h = set(node.max_h);
}

/// Whether swapping `w`/`h` is allowed for `node`.
///
/// `grid_disable_resize` is the owning grid's global resize switch.
pub fn can_be_rotated(node: &GridNode, grid_disable_resize: bool) -> bool {
    let fixed_w = set(node.min_w).is_some() && set(node.min_w) == node.max_w;
    let fixed_h = set(node.min_h).is_some() && set(node.min_h) == node.max_h;
    !(node.w == node.h
        || node.locked
        || node.no_resize
        || grid_disable_resize
        || fixed_w
        || fixed_h)
}

/// First node with the given id. An empty id never matches.
pub fn find<'a>(nodes: &'a [GridNode], id: &str) -> Option<&'a GridNode> {
    if id.is_empty() {
        return None;
    }
    nodes.iter().find(|n| n.id.as_deref() == Some(id))
}
