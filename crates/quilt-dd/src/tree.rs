//! Headless element tree standing in for the DOM.
//!
//! Elements carry the pieces drag & drop coordination looks at: tag, id, class list,
//! attributes, parent/children links, absolute bounds for hit testing, the attached
//! native listeners and a handle back to the element's behavior facade.

use crate::listeners::Listeners;
use crate::selector::Selector;
use indexmap::{IndexMap, IndexSet};
use quilt_core::alloc::sparse_set::IndexSlot;
use quilt_core::math::Vec2;
use quilt_core::profiling::profile_function;

/// Node identifier in the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Absolute bounds of an element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// An element in the tree.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: IndexSet<String>,
    attributes: IndexMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    bounds: Option<LayoutRect>,
    listeners: Listeners,
    dd_element: Option<IndexSlot>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: IndexSet::new(),
            attributes: IndexMap::new(),
            parent: None,
            children: Vec::new(),
            bounds: None,
            listeners: Listeners::NONE,
            dd_element: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.iter().map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn bounds(&self) -> Option<LayoutRect> {
        self.bounds
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// Handle of the behavior facade attached to this element, if any.
    pub fn dd_element(&self) -> Option<IndexSlot> {
        self.dd_element
    }
}

/// Element tree.
#[derive(Debug, Default)]
pub struct ElementTree {
    nodes: IndexMap<NodeId, Element>,
    next_id: usize,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element and return its NodeId.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let node_id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(node_id, Element::new(tag));
        node_id
    }

    pub fn get(&self, node_id: NodeId) -> Option<&Element> {
        self.nodes.get(&node_id)
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Elements without a parent, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, el)| el.parent.is_none())
            .map(|(id, _)| *id)
    }

    pub fn set_element_id(&mut self, node_id: NodeId, id: impl Into<String>) {
        if let Some(el) = self.nodes.get_mut(&node_id) {
            el.id = Some(id.into());
        }
    }

    /// Add a class. Returns true if it was not present.
    pub fn add_class(&mut self, node_id: NodeId, class: &str) -> bool {
        self.nodes
            .get_mut(&node_id)
            .is_some_and(|el| el.classes.insert(class.to_string()))
    }

    /// Remove a class. Returns true if it was present.
    pub fn remove_class(&mut self, node_id: NodeId, class: &str) -> bool {
        self.nodes
            .get_mut(&node_id)
            .is_some_and(|el| el.classes.shift_remove(class))
    }

    pub fn has_class(&self, node_id: NodeId, class: &str) -> bool {
        self.get(node_id).is_some_and(|el| el.has_class(class))
    }

    pub fn set_attribute(&mut self, node_id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.nodes.get_mut(&node_id) {
            el.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attribute(&mut self, node_id: NodeId, name: &str) -> Option<String> {
        self.nodes
            .get_mut(&node_id)
            .and_then(|el| el.attributes.shift_remove(name))
    }

    pub fn set_bounds(&mut self, node_id: NodeId, bounds: Option<LayoutRect>) {
        if let Some(el) = self.nodes.get_mut(&node_id) {
            el.bounds = bounds;
        }
    }

    pub fn attach_listeners(&mut self, node_id: NodeId, listeners: Listeners) {
        if let Some(el) = self.nodes.get_mut(&node_id) {
            el.listeners |= listeners;
        }
    }

    pub fn detach_listeners(&mut self, node_id: NodeId, listeners: Listeners) {
        if let Some(el) = self.nodes.get_mut(&node_id) {
            el.listeners.remove(listeners);
        }
    }

    pub(crate) fn set_dd_element(&mut self, node_id: NodeId, slot: Option<IndexSlot>) {
        if let Some(el) = self.nodes.get_mut(&node_id) {
            el.dd_element = slot;
        }
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    ///
    /// Returns false (and changes nothing) if either node is missing or if the move
    /// would make an element its own ancestor.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if parent == child || self.is_ancestor(child, parent) {
            tracing::warn!("refusing to append {:?} under its own descendant {:?}", child, parent);
            return false;
        }
        self.detach(child);
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(parent);
        }
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(child);
        }
        true
    }

    /// Detach `node` from its parent, keeping its subtree intact.
    pub fn detach(&mut self, node_id: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node_id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|c| *c != node_id);
        }
    }

    /// The subtree rooted at `node`, parents before children.
    pub fn descendants_and_self(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node_id];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.nodes.get(&id) {
                out.push(id);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// Remove `node` and its subtree. Returns the removed ids, parents first.
    pub fn remove(&mut self, node_id: NodeId) -> Vec<NodeId> {
        self.detach(node_id);
        let removed = self.descendants_and_self(node_id);
        for id in &removed {
            self.nodes.shift_remove(id);
        }
        removed
    }

    /// Ancestors of `node`, nearest first. Does not include `node` itself.
    pub fn ancestors(&self, node_id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(node_id).and_then(Element::parent),
        }
    }

    /// `true` if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Path from the root down to `node`, inclusive.
    pub fn path_from_root(&self, node_id: NodeId) -> Vec<NodeId> {
        if !self.contains(node_id) {
            return Vec::new();
        }
        let mut path: Vec<NodeId> = self.ancestors(node_id).collect();
        path.reverse();
        path.push(node_id);
        path
    }

    /// `true` if `node` matches `selector`.
    pub fn matches(&self, node_id: NodeId, selector: &Selector) -> bool {
        self.get(node_id).is_some_and(|el| selector.matches(el))
    }

    /// Deepest element whose bounds contain `point`. Later siblings are on top.
    ///
    /// Elements without bounds are transparent: they are never hit themselves but their
    /// children are still tested. The subtree rooted at `skip` is ignored, which lets the
    /// element under a drag look through the dragged element.
    pub fn hit_test(&self, point: Vec2, skip: Option<NodeId>) -> Option<NodeId> {
        profile_function!();
        let roots: Vec<NodeId> = self.roots().collect();
        roots
            .into_iter()
            .rev()
            .find_map(|root| self.hit_test_node(root, point, skip))
    }

    fn hit_test_node(&self, node_id: NodeId, point: Vec2, skip: Option<NodeId>) -> Option<NodeId> {
        if Some(node_id) == skip {
            return None;
        }
        let el = self.get(node_id)?;
        if let Some(bounds) = el.bounds
            && !bounds.contains(point)
        {
            return None;
        }

        // Check children first (front to back)
        for &child_id in el.children.iter().rev() {
            if let Some(hit) = self.hit_test_node(child_id, point, skip) {
                return Some(hit);
            }
        }

        el.bounds.map(|_| node_id)
    }
}

/// Iterator over the ancestors of an element, nearest first.
pub struct Ancestors<'a> {
    tree: &'a ElementTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).and_then(Element::parent);
        Some(current)
    }
}
