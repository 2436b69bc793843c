//! Minimal draggable behavior.
//!
//! Tracks one drag at a time: publishes the dragged element to the [`DragSession`] on start,
//! keeps its [`DragUi`] current while moving and withdraws it on stop.

use crate::base::{Activation, DdBase};
use crate::event::{DdEvent, DdEventType, DragUi, PointerEvent};
use crate::selector::ClassOrSelector;
use crate::session::DragSession;
use crate::tree::{ElementTree, NodeId};
use quilt_core::config::Config;
use quilt_core::math::Vec2;
use std::fmt;
use std::rc::Rc;

/// Callback invoked with the standardized event and the dragged item's position info.
pub type DragCallback = Rc<dyn Fn(&DdEvent, &DragUi)>;

/// Options of a draggable. `None` fields are left untouched by [`DdDraggable::update_option`].
#[derive(Clone, Default)]
pub struct DraggableOptions {
    /// Class or selector of the sub-element that starts a drag. Anywhere when unset.
    pub handle: Option<String>,
    /// Selector of the element a drag helper is appended to. Recorded for the host.
    pub append_to: Option<String>,
    pub scroll: Option<bool>,
    pub start: Option<DragCallback>,
    pub drag: Option<DragCallback>,
    pub stop: Option<DragCallback>,
}

impl DraggableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn append_to(mut self, append_to: impl Into<String>) -> Self {
        self.append_to = Some(append_to.into());
        self
    }

    pub fn scroll(mut self, scroll: bool) -> Self {
        self.scroll = Some(scroll);
        self
    }

    pub fn start(mut self, f: impl Fn(&DdEvent, &DragUi) + 'static) -> Self {
        self.start = Some(Rc::new(f));
        self
    }

    pub fn drag(mut self, f: impl Fn(&DdEvent, &DragUi) + 'static) -> Self {
        self.drag = Some(Rc::new(f));
        self
    }

    pub fn stop(mut self, f: impl Fn(&DdEvent, &DragUi) + 'static) -> Self {
        self.stop = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for DraggableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableOptions")
            .field("handle", &self.handle)
            .field("append_to", &self.append_to)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    start_page: Vec2,
    start_offset: Vec2,
    size: Vec2,
}

/// Draggable behavior attached to one element.
pub struct DdDraggable {
    el: NodeId,
    option: DraggableOptions,
    handle: Option<ClassOrSelector>,
    base: DdBase<DdEvent>,
    session: DragSession,
    config: Rc<Config>,
    dragging: Option<DragState>,
}

impl fmt::Debug for DdDraggable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DdDraggable")
            .field("el", &self.el)
            .field("option", &self.option)
            .field("base", &self.base)
            .field("dragging", &self.dragging)
            .finish()
    }
}

impl DdDraggable {
    /// Create the behavior for `el` and enable it.
    pub fn new(
        tree: &mut ElementTree,
        el: NodeId,
        option: DraggableOptions,
        session: DragSession,
        config: Rc<Config>,
    ) -> Self {
        let mut draggable = Self {
            el,
            handle: option.handle.as_deref().map(ClassOrSelector::new),
            option,
            base: DdBase::new(),
            session,
            config,
            dragging: None,
        };
        draggable.enable(tree);
        draggable
    }

    pub fn el(&self) -> NodeId {
        self.el
    }

    pub fn option(&self) -> &DraggableOptions {
        &self.option
    }

    pub fn on(&mut self, event: &str, handler: impl Fn(&DdEvent) + 'static) {
        self.base.on(event, handler);
    }

    pub fn off(&mut self, event: &str) {
        self.base.off(event);
    }

    pub fn activation(&self) -> Activation {
        self.base.activation()
    }

    pub fn is_disabled(&self) -> bool {
        self.base.is_disabled()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn enable(&mut self, tree: &mut ElementTree) {
        if !self.base.enable() {
            return;
        }
        tree.add_class(self.el, &self.config.classes.draggable);
        tree.remove_class(self.el, &self.config.classes.draggable_disabled);
    }

    pub fn disable(&mut self, tree: &mut ElementTree, for_destroy: bool) {
        if !self.base.disable() {
            return;
        }
        tree.remove_class(self.el, &self.config.classes.draggable);
        if !for_destroy {
            tree.add_class(self.el, &self.config.classes.draggable_disabled);
        }
    }

    pub fn destroy(&mut self, tree: &mut ElementTree) {
        if self.dragging.take().is_some() {
            tree.remove_class(self.el, &self.config.classes.draggable_dragging);
            if self.session.dragged_element() == Some(self.el) {
                if let Some(target) = self.session.clear_active_drop_target() {
                    tree.remove_class(target, &self.config.classes.droppable_over);
                }
                self.session.end_drag();
            }
        }
        self.disable(tree, true);
        tree.remove_class(self.el, &self.config.classes.draggable);
        tree.remove_class(self.el, &self.config.classes.draggable_disabled);
        self.base.destroy();
    }

    /// Merge `opts` into the current options. A drag in progress is kept.
    pub fn update_option(&mut self, opts: DraggableOptions) {
        if let Some(handle) = opts.handle {
            self.handle = Some(ClassOrSelector::new(handle.as_str()));
            self.option.handle = Some(handle);
        }
        if opts.append_to.is_some() {
            self.option.append_to = opts.append_to;
        }
        if opts.scroll.is_some() {
            self.option.scroll = opts.scroll;
        }
        if opts.start.is_some() {
            self.option.start = opts.start;
        }
        if opts.drag.is_some() {
            self.option.drag = opts.drag;
        }
        if opts.stop.is_some() {
            self.option.stop = opts.stop;
        }
    }

    /// `true` if a press on `target` may start a drag of this element.
    pub fn accepts_handle(&self, tree: &ElementTree, target: NodeId) -> bool {
        let Some(handle) = &self.handle else {
            return true;
        };
        std::iter::once(target)
            .chain(tree.ancestors(target))
            .take_while(|n| *n != self.el)
            .chain(std::iter::once(self.el))
            .filter_map(|n| tree.get(n))
            .any(|el| handle.matches(el))
    }

    fn ui(&self, state: &DragState, page: Vec2) -> DragUi {
        let position = page - state.start_page;
        DragUi {
            position,
            offset: state.start_offset + position,
            size: state.size,
        }
    }

    fn notify(&self, e: &PointerEvent, event_type: DdEventType, ui: &DragUi) {
        let ev = DdEvent::init(e, event_type, Some(self.el));
        let callback = match event_type {
            DdEventType::DragStart => self.option.start.clone(),
            DdEventType::Drag => self.option.drag.clone(),
            DdEventType::DragStop => self.option.stop.clone(),
            _ => None,
        };
        if let Some(callback) = callback {
            callback(&ev, ui);
        }
        self.base.trigger_event(event_type.as_str(), &ev);
    }

    /// Start dragging. Refused while disabled, paused or already dragging.
    pub fn drag_start(&mut self, tree: &mut ElementTree, e: &PointerEvent) -> bool {
        if self.base.is_disabled() || self.session.is_paused() || self.dragging.is_some() {
            return false;
        }
        let bounds = tree.get(self.el).and_then(|el| el.bounds()).unwrap_or_default();
        let state = DragState {
            start_page: e.page,
            start_offset: bounds.position(),
            size: bounds.size(),
        };
        let ui = self.ui(&state, e.page);
        self.dragging = Some(state);
        self.session.begin_drag(self.el, ui);
        tree.add_class(self.el, &self.config.classes.draggable_dragging);
        tracing::debug!("draggable {:?}: drag start", self.el);
        self.notify(e, DdEventType::DragStart, &ui);
        true
    }

    /// Follow the pointer. Ignored when not dragging or while the session is paused.
    pub fn drag_move(&mut self, e: &PointerEvent) {
        let Some(state) = self.dragging else {
            return;
        };
        if self.session.is_paused() {
            tracing::trace!("draggable {:?}: move ignored while paused", self.el);
            return;
        }
        let ui = self.ui(&state, e.page);
        self.session.update_drag_ui(ui);
        self.notify(e, DdEventType::Drag, &ui);
    }

    /// Finish the drag. Any drop has already been delivered by the caller.
    pub(crate) fn drag_finish(&mut self, tree: &mut ElementTree, e: &PointerEvent) {
        let Some(state) = self.dragging.take() else {
            return;
        };
        let ui = self.ui(&state, e.page);
        if self.session.dragged_element() == Some(self.el) {
            self.session.end_drag();
        }
        tree.remove_class(self.el, &self.config.classes.draggable_dragging);
        tracing::debug!("draggable {:?}: drag stop", self.el);
        self.notify(e, DdEventType::DragStop, &ui);
    }
}
