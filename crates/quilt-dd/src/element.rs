//! Per-element facade multiplexing the draggable, droppable and resizable behaviors.

use crate::draggable::{DdDraggable, DraggableOptions};
use crate::droppable::{DdDroppable, DroppableOptions};
use crate::event::DdEvent;
use crate::resizable::{DdResizable, ResizableOptions};
use crate::session::DragSession;
use crate::tree::{ElementTree, NodeId};
use quilt_core::config::Config;
use std::rc::Rc;

pub const DRAG_EVENTS: [&str; 3] = ["drag", "dragstart", "dragstop"];
pub const DROP_EVENTS: [&str; 3] = ["drop", "dropover", "dropout"];
pub const RESIZE_EVENTS: [&str; 3] = ["resizestart", "resize", "resizestop"];

/// Behavior owning an event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorKind {
    Draggable,
    Droppable,
    Resizable,
}

impl BehaviorKind {
    /// The behavior that handles events called `name`, if any.
    pub fn for_event(name: &str) -> Option<Self> {
        if DRAG_EVENTS.contains(&name) {
            Some(BehaviorKind::Draggable)
        } else if DROP_EVENTS.contains(&name) {
            Some(BehaviorKind::Droppable)
        } else if RESIZE_EVENTS.contains(&name) {
            Some(BehaviorKind::Resizable)
        } else {
            None
        }
    }
}

/// Behaviors attached to one element. Each is created at most once and merged afterwards.
#[derive(Debug)]
pub struct DdElement {
    el: NodeId,
    pub(crate) draggable: Option<DdDraggable>,
    pub(crate) droppable: Option<DdDroppable>,
    pub(crate) resizable: Option<DdResizable>,
}

impl DdElement {
    pub fn new(el: NodeId) -> Self {
        Self {
            el,
            draggable: None,
            droppable: None,
            resizable: None,
        }
    }

    pub fn el(&self) -> NodeId {
        self.el
    }

    pub fn draggable(&self) -> Option<&DdDraggable> {
        self.draggable.as_ref()
    }

    pub fn droppable(&self) -> Option<&DdDroppable> {
        self.droppable.as_ref()
    }

    pub fn resizable(&self) -> Option<&DdResizable> {
        self.resizable.as_ref()
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable.is_some()
    }

    pub fn is_droppable(&self) -> bool {
        self.droppable.is_some()
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable.is_some()
    }

    /// `true` if no behavior is attached.
    pub fn is_empty(&self) -> bool {
        !(self.is_draggable() || self.is_droppable() || self.is_resizable())
    }

    /// Register `handler` on the behavior owning `name`. Returns `false` (and drops the
    /// handler) when that behavior is absent or the name is unknown.
    pub fn on(&mut self, name: &str, handler: impl Fn(&DdEvent) + 'static) -> bool {
        let routed = match BehaviorKind::for_event(name) {
            Some(BehaviorKind::Draggable) => self.draggable.as_mut().map(|d| d.on(name, handler)),
            Some(BehaviorKind::Droppable) => self.droppable.as_mut().map(|d| d.on(name, handler)),
            Some(BehaviorKind::Resizable) => self.resizable.as_mut().map(|r| r.on(name, handler)),
            None => None,
        };
        if routed.is_none() {
            tracing::trace!("{:?}: no behavior handles '{}', dropped", self.el, name);
        }
        routed.is_some()
    }

    /// Remove the handler for `name` from the behavior owning it.
    pub fn off(&mut self, name: &str) -> bool {
        let routed = match BehaviorKind::for_event(name) {
            Some(BehaviorKind::Draggable) => self.draggable.as_mut().map(|d| d.off(name)),
            Some(BehaviorKind::Droppable) => self.droppable.as_mut().map(|d| d.off(name)),
            Some(BehaviorKind::Resizable) => self.resizable.as_mut().map(|r| r.off(name)),
            None => None,
        };
        if routed.is_none() {
            tracing::trace!("{:?}: no behavior handles '{}', off ignored", self.el, name);
        }
        routed.is_some()
    }

    pub fn setup_draggable(
        &mut self,
        tree: &mut ElementTree,
        opts: DraggableOptions,
        session: &DragSession,
        config: &Rc<Config>,
    ) {
        match self.draggable.as_mut() {
            Some(d) => d.update_option(opts),
            None => {
                tracing::debug!("{:?}: setup draggable", self.el);
                self.draggable = Some(DdDraggable::new(
                    tree,
                    self.el,
                    opts,
                    session.clone(),
                    config.clone(),
                ));
            }
        }
    }

    pub fn clean_draggable(&mut self, tree: &mut ElementTree) {
        if let Some(mut d) = self.draggable.take() {
            tracing::debug!("{:?}: clean draggable", self.el);
            d.destroy(tree);
        }
    }

    pub fn setup_droppable(
        &mut self,
        tree: &mut ElementTree,
        opts: DroppableOptions,
        session: &DragSession,
        config: &Rc<Config>,
    ) {
        match self.droppable.as_mut() {
            Some(d) => d.update_option(opts),
            None => {
                tracing::debug!("{:?}: setup droppable", self.el);
                self.droppable = Some(DdDroppable::new(
                    tree,
                    self.el,
                    opts,
                    session.clone(),
                    config.clone(),
                ));
            }
        }
    }

    pub fn clean_droppable(&mut self, tree: &mut ElementTree) {
        if let Some(mut d) = self.droppable.take() {
            tracing::debug!("{:?}: clean droppable", self.el);
            d.destroy(tree);
        }
    }

    pub fn setup_resizable(
        &mut self,
        tree: &mut ElementTree,
        opts: ResizableOptions,
        config: &Rc<Config>,
    ) {
        match self.resizable.as_mut() {
            Some(r) => r.update_option(opts),
            None => {
                tracing::debug!("{:?}: setup resizable", self.el);
                self.resizable = Some(DdResizable::new(tree, self.el, opts, config.clone()));
            }
        }
    }

    pub fn clean_resizable(&mut self, tree: &mut ElementTree) {
        if let Some(mut r) = self.resizable.take() {
            tracing::debug!("{:?}: clean resizable", self.el);
            r.destroy(tree);
        }
    }

    /// Destroy every attached behavior.
    pub fn clean_all(&mut self, tree: &mut ElementTree) {
        self.clean_draggable(tree);
        self.clean_droppable(tree);
        self.clean_resizable(tree);
    }
}

/// Chainable access to one element's facade, borrowed from the manager.
pub struct ElementMut<'a> {
    pub(crate) element: &'a mut DdElement,
    pub(crate) tree: &'a mut ElementTree,
    pub(crate) session: &'a DragSession,
    pub(crate) config: &'a Rc<Config>,
}

impl ElementMut<'_> {
    pub fn el(&self) -> NodeId {
        self.element.el
    }

    pub fn element(&self) -> &DdElement {
        self.element
    }

    pub fn on(&mut self, name: &str, handler: impl Fn(&DdEvent) + 'static) -> &mut Self {
        self.element.on(name, handler);
        self
    }

    pub fn off(&mut self, name: &str) -> &mut Self {
        self.element.off(name);
        self
    }

    pub fn setup_draggable(&mut self, opts: DraggableOptions) -> &mut Self {
        self.element
            .setup_draggable(self.tree, opts, self.session, self.config);
        self
    }

    pub fn clean_draggable(&mut self) -> &mut Self {
        self.element.clean_draggable(self.tree);
        self
    }

    pub fn setup_droppable(&mut self, opts: DroppableOptions) -> &mut Self {
        self.element
            .setup_droppable(self.tree, opts, self.session, self.config);
        self
    }

    pub fn clean_droppable(&mut self) -> &mut Self {
        self.element.clean_droppable(self.tree);
        self
    }

    pub fn setup_resizable(&mut self, opts: ResizableOptions) -> &mut Self {
        self.element.setup_resizable(self.tree, opts, self.config);
        self
    }

    pub fn clean_resizable(&mut self) -> &mut Self {
        self.element.clean_resizable(self.tree);
        self
    }

    pub fn is_draggable(&self) -> bool {
        self.element.is_draggable()
    }

    pub fn is_droppable(&self) -> bool {
        self.element.is_droppable()
    }

    pub fn is_resizable(&self) -> bool {
        self.element.is_resizable()
    }
}
