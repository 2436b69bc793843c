//! Drag & drop manager.
//!
//! Owns the element tree, the facade arena and the drag session, and routes native pointer
//! events into the behaviors. The enter/leave protocol between drop zones lives here because
//! it has to reach from one zone to another (forcing the previous zone out, re-entering the
//! nearest enclosing zone).

use crate::draggable::DraggableOptions;
use crate::droppable::{DdDroppable, DroppableOptions};
use crate::element::{DdElement, ElementMut};
use crate::event::{DdEvent, NativeEventKind, PointerEvent};
use crate::resizable::ResizableOptions;
use crate::session::DragSession;
use crate::tree::{ElementTree, NodeId};
use quilt_core::alloc::sparse_set::{IndexSlot, SparseSet};
use quilt_core::config::Config;
use quilt_core::math::Vec2;
use quilt_core::profiling::{profile_function, profile_scope};
use std::rc::Rc;

fn facade<'a>(
    tree: &ElementTree,
    elements: &'a SparseSet<DdElement>,
    node: NodeId,
) -> Option<&'a DdElement> {
    elements.get(tree.get(node)?.dd_element()?)
}

fn droppable<'a>(
    tree: &ElementTree,
    elements: &'a SparseSet<DdElement>,
    node: NodeId,
) -> Option<&'a DdDroppable> {
    facade(tree, elements, node)?.droppable.as_ref()
}

/// Drag & drop manager.
#[derive(Debug)]
pub struct DdManager {
    tree: ElementTree,
    elements: SparseSet<DdElement>,
    session: DragSession,
    config: Rc<Config>,
    hovered: Option<NodeId>,
}

impl Default for DdManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DdManager {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            tree: ElementTree::new(),
            elements: SparseSet::new(),
            session: DragSession::new(),
            config: Rc::new(config),
            hovered: None,
        }
    }

    /// Use `session` instead of a private one, e.g. to share it between managers.
    pub fn with_session(mut self, session: DragSession) -> Self {
        self.session = session;
        self
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Element currently under the pointer, as last seen by [`DdManager::pointer_moved`].
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    fn slot(&self, node: NodeId) -> Option<IndexSlot> {
        self.tree
            .get(node)?
            .dd_element()
            .filter(|slot| self.elements.contains(*slot))
    }

    /// The facade of `node`, created on first use. `None` if `node` is not in the tree.
    pub fn init(&mut self, node: NodeId) -> Option<ElementMut<'_>> {
        let slot = match self.slot(node) {
            Some(slot) => slot,
            None => {
                if !self.tree.contains(node) {
                    return None;
                }
                let slot = self.elements.push(DdElement::new(node));
                self.tree.set_dd_element(node, Some(slot));
                slot
            }
        };
        let element = self.elements.get_mut(slot)?;
        Some(ElementMut {
            element,
            tree: &mut self.tree,
            session: &self.session,
            config: &self.config,
        })
    }

    pub fn element(&self, node: NodeId) -> Option<&DdElement> {
        facade(&self.tree, &self.elements, node)
    }

    pub fn is_draggable(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(DdElement::is_draggable)
    }

    pub fn is_droppable(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(DdElement::is_droppable)
    }

    pub fn is_resizable(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(DdElement::is_resizable)
    }

    /// Destroy every behavior of `node` and free its facade.
    pub fn release(&mut self, node: NodeId) {
        let Some(slot) = self.slot(node) else {
            return;
        };
        if let Some(mut element) = self.elements.remove(slot) {
            element.clean_all(&mut self.tree);
        }
        self.tree.set_dd_element(node, None);
        if self.session.dragged_element() == Some(node) {
            if let Some(target) = self.session.clear_active_drop_target() {
                self.tree.remove_class(target, &self.config.classes.droppable_over);
            }
            self.session.end_drag();
        }
        tracing::debug!("released {:?}", node);
    }

    /// Release and remove `node` together with its subtree.
    pub fn remove_element(&mut self, node: NodeId) {
        for id in self.tree.descendants_and_self(node) {
            self.release(id);
        }
        let removed = self.tree.remove(node);
        if self.hovered.is_some_and(|h| removed.contains(&h)) {
            self.hovered = None;
        }
    }

    pub fn setup_draggable(&mut self, node: NodeId, opts: DraggableOptions) -> bool {
        self.init(node).map(|mut el| el.setup_draggable(opts).el()).is_some()
    }

    pub fn clean_draggable(&mut self, node: NodeId) {
        if let Some(mut el) = self.existing(node) {
            el.clean_draggable();
        }
    }

    pub fn setup_droppable(&mut self, node: NodeId, opts: DroppableOptions) -> bool {
        self.init(node).map(|mut el| el.setup_droppable(opts).el()).is_some()
    }

    pub fn clean_droppable(&mut self, node: NodeId) {
        if let Some(mut el) = self.existing(node) {
            el.clean_droppable();
        }
    }

    pub fn setup_resizable(&mut self, node: NodeId, opts: ResizableOptions) -> bool {
        self.init(node).map(|mut el| el.setup_resizable(opts).el()).is_some()
    }

    pub fn clean_resizable(&mut self, node: NodeId) {
        if let Some(mut el) = self.existing(node) {
            el.clean_resizable();
        }
    }

    /// Register `handler` for `name` on `node`. Returns `false` if no behavior owns `name`.
    pub fn on(&mut self, node: NodeId, name: &str, handler: impl Fn(&DdEvent) + 'static) -> bool {
        let Some(slot) = self.slot(node) else {
            tracing::trace!("{:?}: no facade, '{}' dropped", node, name);
            return false;
        };
        self.elements
            .get_mut(slot)
            .is_some_and(|el| el.on(name, handler))
    }

    pub fn off(&mut self, node: NodeId, name: &str) -> bool {
        let Some(slot) = self.slot(node) else {
            return false;
        };
        self.elements.get_mut(slot).is_some_and(|el| el.off(name))
    }

    /// Facade of `node` without creating one.
    fn existing(&mut self, node: NodeId) -> Option<ElementMut<'_>> {
        self.slot(node)?;
        self.init(node)
    }

    pub fn set_droppable_enabled(&mut self, node: NodeId, enabled: bool) {
        let Some(slot) = self.slot(node) else {
            return;
        };
        if let Some(d) = self.elements.get_mut(slot).and_then(|el| el.droppable.as_mut()) {
            if enabled {
                d.enable(&mut self.tree);
            } else {
                d.disable(&mut self.tree, false);
            }
        }
    }

    pub fn set_draggable_enabled(&mut self, node: NodeId, enabled: bool) {
        let Some(slot) = self.slot(node) else {
            return;
        };
        if let Some(d) = self.elements.get_mut(slot).and_then(|el| el.draggable.as_mut()) {
            if enabled {
                d.enable(&mut self.tree);
            } else {
                d.disable(&mut self.tree, false);
            }
        }
    }

    pub fn set_resizable_enabled(&mut self, node: NodeId, enabled: bool) {
        let Some(slot) = self.slot(node) else {
            return;
        };
        if let Some(r) = self.elements.get_mut(slot).and_then(|el| el.resizable.as_mut()) {
            if enabled {
                r.enable(&mut self.tree);
            } else {
                r.disable(&mut self.tree, false);
            }
        }
    }

    /// Deliver one native enter/leave event to `node`.
    ///
    /// Nothing happens unless the element has the matching listener attached. Pointer
    /// events produced by a mouse are ignored since the mouse events cover them.
    pub fn dispatch(&mut self, node: NodeId, kind: NativeEventKind, e: &mut PointerEvent) {
        profile_function!();
        let Some(el) = self.tree.get(node) else {
            return;
        };
        if !el.listeners().contains(kind.listener()) {
            return;
        }
        if kind.is_pointer() && e.pointer_type == crate::event::PointerType::Mouse {
            tracing::trace!("{:?}: {:?} from a mouse ignored", node, kind);
            return;
        }
        e.reset_flags();
        e.target = Some(node);
        if kind.is_enter() {
            self.droppable_enter(node, e);
        } else {
            self.droppable_leave(node, e, false);
        }
    }

    /// Simulate the native leave/enter events of the pointer moving from `from` to `to`.
    ///
    /// Leave events go from `from` up to (not including) the common ancestor, child first;
    /// enter events then go from below the common ancestor down to `to`, parent first.
    pub fn pointer_moved_between(
        &mut self,
        from: Option<NodeId>,
        to: Option<NodeId>,
        e: &mut PointerEvent,
    ) {
        profile_function!();
        if from == to {
            return;
        }
        let from_path = from.map(|n| self.tree.path_from_root(n)).unwrap_or_default();
        let to_path = to.map(|n| self.tree.path_from_root(n)).unwrap_or_default();
        let common = from_path
            .iter()
            .zip(&to_path)
            .take_while(|(a, b)| a == b)
            .count();

        let leave = NativeEventKind::for_device(e.pointer_type, false);
        for &node in from_path[common..].iter().rev() {
            self.dispatch(node, leave, e);
        }
        let enter = NativeEventKind::for_device(e.pointer_type, true);
        for &node in &to_path[common..] {
            self.dispatch(node, enter, e);
        }
    }

    /// Track the pointer at `position`: hit test, emit leave/enter for a changed hover
    /// target and move the current drag.
    ///
    /// The dragged element is excluded from hit testing so the zones under it are found.
    /// `client` and `screen` are shifted by the same delta as `page`.
    pub fn pointer_moved(&mut self, position: Vec2, e: &mut PointerEvent) {
        profile_function!();
        let delta = position - e.page;
        e.page = position;
        e.client += delta;
        e.screen += delta;
        let hit = self.tree.hit_test(position, self.session.dragged_element());
        if hit != self.hovered {
            let previous = std::mem::replace(&mut self.hovered, hit);
            self.pointer_moved_between(previous, hit, e);
        }
        self.drag_move(e);
    }

    /// Press on `target`: start dragging the nearest draggable (the target itself or an
    /// ancestor) whose handle accepts the press.
    pub fn pointer_down(&mut self, target: NodeId, e: &mut PointerEvent) -> bool {
        if self.session.pointer_event_consumed() {
            tracing::trace!("{:?}: pointer down already handled", target);
            return false;
        }
        let candidate = std::iter::once(target)
            .chain(self.tree.ancestors(target))
            .find(|n| {
                facade(&self.tree, &self.elements, *n)
                    .and_then(DdElement::draggable)
                    .is_some_and(|d| !d.is_disabled())
            });
        let Some(node) = candidate else {
            return false;
        };
        let handle_ok = facade(&self.tree, &self.elements, node)
            .and_then(DdElement::draggable)
            .is_some_and(|d| d.accepts_handle(&self.tree, target));
        if !handle_ok || !self.drag_start(node, e) {
            return false;
        }
        self.session.set_pointer_event_consumed(true);
        true
    }

    /// Release: finish the current drag, if any.
    pub fn pointer_up(&mut self, e: &mut PointerEvent) -> Option<NodeId> {
        let dropped_on = self.drag_stop(e);
        self.session.take_pointer_event_consumed();
        dropped_on
    }

    /// Start dragging `node`. Requires an enabled draggable and an unpaused session.
    pub fn drag_start(&mut self, node: NodeId, e: &PointerEvent) -> bool {
        let Some(slot) = self.slot(node) else {
            return false;
        };
        if self.session.is_dragging() {
            tracing::trace!("{:?}: drag start ignored, already dragging", node);
            return false;
        }
        self.elements
            .get_mut(slot)
            .and_then(|el| el.draggable.as_mut())
            .is_some_and(|d| d.drag_start(&mut self.tree, e))
    }

    /// Move the current drag. Ignored while paused.
    pub fn drag_move(&mut self, e: &PointerEvent) {
        let Some(node) = self.session.dragged_element() else {
            return;
        };
        let Some(slot) = self.slot(node) else {
            return;
        };
        if let Some(d) = self.elements.get_mut(slot).and_then(|el| el.draggable.as_mut()) {
            d.drag_move(e);
        }
    }

    /// Stop the current drag: drop on the active target, clear it, then finish the drag.
    /// Returns the node dropped on.
    pub fn drag_stop(&mut self, e: &mut PointerEvent) -> Option<NodeId> {
        profile_scope!("drag_stop");
        let dragged = self.session.dragged_element()?;
        let target = self.session.active_drop_target();
        let dropped_on = target.filter(|t| self.drop_on(*t, e));
        if let Some(t) = self.session.clear_active_drop_target() {
            self.tree.remove_class(t, &self.config.classes.droppable_over);
        }

        let finished = self
            .slot(dragged)
            .and_then(|slot| self.elements.get_mut(slot))
            .and_then(|el| el.draggable.as_mut())
            .map(|d| d.drag_finish(&mut self.tree, e))
            .is_some();
        if !finished {
            self.session.end_drag();
        }
        dropped_on
    }

    /// Deliver a drop to `node`'s droppable. A node without an enabled droppable, or no
    /// drag in progress, makes this a no-op. Returns `true` if the drop was delivered.
    pub fn drop_on(&mut self, node: NodeId, e: &mut PointerEvent) -> bool {
        let Some(dragged) = self.session.dragged() else {
            return false;
        };
        let Some(d) = droppable(&self.tree, &self.elements, node).filter(|d| !d.is_disabled())
        else {
            tracing::trace!("{:?}: drop ignored, no droppable", node);
            return false;
        };
        e.prevent_default();
        d.drop_here(e, &dragged);
        true
    }

    /// Native enter on `node`'s droppable.
    pub(crate) fn droppable_enter(&mut self, node: NodeId, e: &mut PointerEvent) {
        let Some(dragged) =
            droppable(&self.tree, &self.elements, node).and_then(|d| d.accepted_drag(&self.tree))
        else {
            return;
        };
        e.prevent_default();
        e.stop_propagation();

        if let Some(previous) = self.session.active_drop_target()
            && previous != node
        {
            self.droppable_leave(previous, e, true);
        }
        self.session.set_active_drop_target(node);

        if let Some(d) = droppable(&self.tree, &self.elements, node) {
            d.over(&mut self.tree, e, &dragged);
        }
    }

    /// Native leave on `node`'s droppable. With `called_by_enter`, no enclosing zone is
    /// re-entered.
    pub(crate) fn droppable_leave(
        &mut self,
        node: NodeId,
        e: &mut PointerEvent,
        called_by_enter: bool,
    ) {
        let Some(dragged) = self.session.dragged() else {
            return;
        };
        if self.session.active_drop_target() != Some(node) {
            return;
        }
        e.prevent_default();
        e.stop_propagation();

        if let Some(d) = droppable(&self.tree, &self.elements, node) {
            d.out(&mut self.tree, e, &dragged);
        }

        if !self.session.clear_active_drop_target_if(node) || called_by_enter {
            return;
        }
        // Leaving a nested zone does not produce an enter on the zone still under the
        // pointer, so hand the drag back to the nearest enclosing one.
        let parent = self
            .tree
            .ancestors(node)
            .find(|a| droppable(&self.tree, &self.elements, *a).is_some());
        if let Some(parent) = parent {
            tracing::trace!("{:?}: re-entering enclosing zone {:?}", node, parent);
            self.droppable_enter(parent, e);
        }
    }

    /// Start resizing `node`.
    pub fn resize_start(&mut self, node: NodeId, e: &PointerEvent) -> bool {
        let Some(slot) = self.slot(node) else {
            return false;
        };
        let tree = &self.tree;
        self.elements
            .get_mut(slot)
            .and_then(|el| el.resizable.as_mut())
            .is_some_and(|r| r.resize_start(tree, e))
    }

    pub fn resize(&mut self, node: NodeId, e: &PointerEvent) {
        let Some(slot) = self.slot(node) else {
            return;
        };
        if let Some(r) = self.elements.get_mut(slot).and_then(|el| el.resizable.as_mut()) {
            r.resize(e);
        }
    }

    pub fn resize_stop(&mut self, node: NodeId, e: &PointerEvent) {
        let Some(slot) = self.slot(node) else {
            return;
        };
        if let Some(r) = self.elements.get_mut(slot).and_then(|el| el.resizable.as_mut()) {
            r.resize_stop(e);
        }
    }
}
