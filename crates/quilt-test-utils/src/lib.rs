//! Test utilities for Quilt crates.
//!
//! - [`CallLog`] records callback invocations in order, shareable across closures
//! - [`NestedZones`] builds the classic `A ⊃ B ⊃ C` drop-zone layout plus a draggable item

use parking_lot::Mutex;
use quilt_core::math::Vec2;
use quilt_dd::{
    DdEvent, DdManager, DraggableOptions, DropUi, DroppableOptions, LayoutRect, NodeId,
};
use std::sync::Arc;

/// Ordered record of calls, cloned into every callback under test.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Return and clear the recorded entries.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Number of entries equal to `entry`.
    pub fn count(&self, entry: &str) -> usize {
        self.entries.lock().iter().filter(|e| *e == entry).count()
    }

    /// A droppable callback recording `"{label}.{event type}"`.
    pub fn drop_callback(&self, label: &str) -> impl Fn(&DdEvent, &DropUi) + 'static {
        let log = self.clone();
        let label = label.to_string();
        move |ev, _| log.record(format!("{}.{}", label, ev.type_name()))
    }

    /// An event handler recording `"{label}:{event type}"`.
    pub fn handler(&self, label: &str) -> impl Fn(&DdEvent) + 'static {
        let log = self.clone();
        let label = label.to_string();
        move |ev| log.record(format!("{}:{}", label, ev.type_name()))
    }
}

/// Three nested drop zones and one draggable item outside them.
///
/// ```text
/// A (0,0 300x300)
/// └── B (50,50 200x200)
///     └── C (100,100 50x50)
/// item (400,0 20x20)
/// ```
pub struct NestedZones {
    pub dd: DdManager,
    pub a: NodeId,
    pub b: NodeId,
    pub c: NodeId,
    pub item: NodeId,
    pub log: CallLog,
}

impl NestedZones {
    pub const INSIDE_A: Vec2 = Vec2::new(10.0, 10.0);
    pub const INSIDE_B: Vec2 = Vec2::new(60.0, 60.0);
    pub const INSIDE_C: Vec2 = Vec2::new(120.0, 120.0);
    pub const OUTSIDE: Vec2 = Vec2::new(350.0, 350.0);
    pub const ITEM: Vec2 = Vec2::new(405.0, 5.0);

    /// Build the layout with recording droppables on every zone.
    pub fn new() -> Self {
        Self::with_manager(DdManager::new())
    }

    pub fn with_manager(mut dd: DdManager) -> Self {
        let log = CallLog::new();
        let tree = dd.tree_mut();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        let c = tree.create_element("div");
        let item = tree.create_element("div");
        tree.append_child(a, b);
        tree.append_child(b, c);
        tree.add_class(item, "grid-stack-item");
        tree.set_bounds(a, Some(LayoutRect::new(0.0, 0.0, 300.0, 300.0)));
        tree.set_bounds(b, Some(LayoutRect::new(50.0, 50.0, 200.0, 200.0)));
        tree.set_bounds(c, Some(LayoutRect::new(100.0, 100.0, 50.0, 50.0)));
        tree.set_bounds(item, Some(LayoutRect::new(400.0, 0.0, 20.0, 20.0)));

        for (node, label) in [(a, "A"), (b, "B"), (c, "C")] {
            dd.setup_droppable(
                node,
                DroppableOptions::new()
                    .over(log.drop_callback(label))
                    .out(log.drop_callback(label))
                    .drop(log.drop_callback(label)),
            );
        }
        dd.setup_draggable(item, DraggableOptions::new());

        Self {
            dd,
            a,
            b,
            c,
            item,
            log,
        }
    }

    /// Zones currently carrying the over class.
    pub fn over_zones(&self) -> Vec<NodeId> {
        let over = &self.dd.config().classes.droppable_over;
        [self.a, self.b, self.c]
            .into_iter()
            .filter(|n| self.dd.tree().has_class(*n, over))
            .collect()
    }
}

impl Default for NestedZones {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_log_shared_between_clones() {
        let log = CallLog::new();
        let other = log.clone();
        other.record("a");
        log.record("b");
        assert_eq!(log.entries(), ["a", "b"]);
        assert_eq!(other.count("a"), 1);
        assert_eq!(log.take(), ["a", "b"]);
        assert!(other.is_empty());
    }

    #[test]
    fn test_nested_zones_layout() {
        let zones = NestedZones::new();
        let tree = zones.dd.tree();
        assert_eq!(tree.ancestors(zones.c).collect::<Vec<_>>(), [zones.b, zones.a]);
        assert!(zones.dd.is_droppable(zones.a));
        assert!(zones.dd.is_draggable(zones.item));
        assert_eq!(tree.hit_test(NestedZones::INSIDE_C, None), Some(zones.c));
        assert!(zones.over_zones().is_empty());
    }
}
