//! Shared drag session state.
//!
//! One session is created per manager and handed to every behavior. It records the element
//! being dragged and the drop zone currently owning the drag. The handle is cheap to clone;
//! internal borrows are short and never held across a user callback, so callbacks may read
//! the session freely.

use crate::event::DragUi;
use crate::tree::NodeId;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The element being dragged and its current position info.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSource {
    pub el: NodeId,
    ui: DragUi,
}

impl DragSource {
    pub fn new(el: NodeId, ui: DragUi) -> Self {
        Self { el, ui }
    }

    pub fn ui(&self) -> DragUi {
        self.ui
    }
}

/// Whether drag movement is currently paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPause {
    #[default]
    Off,
    On,
    /// Paused for the given number of milliseconds. Expiry is up to the host.
    For(u32),
}

impl DragPause {
    pub fn is_paused(&self) -> bool {
        !matches!(self, DragPause::Off)
    }
}

#[derive(Debug, Default)]
struct SessionState {
    dragged: Option<DragSource>,
    active_drop_target: Option<NodeId>,
    pointer_event_consumed: bool,
    drag_paused: DragPause,
}

/// Handle to the drag session.
#[derive(Clone, Default)]
pub struct DragSession(Rc<RefCell<SessionState>>);

impl fmt::Debug for DragSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.borrow();
        f.debug_struct("DragSession")
            .field("dragged", &state.dragged)
            .field("active_drop_target", &state.active_drop_target)
            .field("pointer_event_consumed", &state.pointer_event_consumed)
            .field("drag_paused", &state.drag_paused)
            .finish()
    }
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if both handles refer to the same session.
    pub fn same_session(&self, other: &DragSession) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_dragging(&self) -> bool {
        self.0.borrow().dragged.is_some()
    }

    pub fn dragged(&self) -> Option<DragSource> {
        self.0.borrow().dragged
    }

    pub fn dragged_element(&self) -> Option<NodeId> {
        self.0.borrow().dragged.map(|d| d.el)
    }

    pub fn dragged_ui(&self) -> Option<DragUi> {
        self.0.borrow().dragged.map(|d| d.ui)
    }

    pub fn begin_drag(&self, el: NodeId, ui: DragUi) {
        tracing::trace!("drag session: begin {:?}", el);
        self.0.borrow_mut().dragged = Some(DragSource::new(el, ui));
    }

    /// Update the dragged source's position info. No-op when nothing is dragged.
    pub fn update_drag_ui(&self, ui: DragUi) {
        if let Some(dragged) = self.0.borrow_mut().dragged.as_mut() {
            dragged.ui = ui;
        }
    }

    /// Clear the dragged source, returning it.
    pub fn end_drag(&self) -> Option<DragSource> {
        let dragged = self.0.borrow_mut().dragged.take();
        tracing::trace!("drag session: end {:?}", dragged.map(|d| d.el));
        dragged
    }

    pub fn active_drop_target(&self) -> Option<NodeId> {
        self.0.borrow().active_drop_target
    }

    pub(crate) fn set_active_drop_target(&self, el: NodeId) {
        tracing::trace!("drag session: active drop target {:?}", el);
        self.0.borrow_mut().active_drop_target = Some(el);
    }

    /// Clear the active drop target if it is `el`. Returns `true` if it was.
    pub(crate) fn clear_active_drop_target_if(&self, el: NodeId) -> bool {
        let mut state = self.0.borrow_mut();
        if state.active_drop_target == Some(el) {
            state.active_drop_target = None;
            tracing::trace!("drag session: cleared drop target {:?}", el);
            true
        } else {
            false
        }
    }

    pub(crate) fn clear_active_drop_target(&self) -> Option<NodeId> {
        self.0.borrow_mut().active_drop_target.take()
    }

    pub fn pointer_event_consumed(&self) -> bool {
        self.0.borrow().pointer_event_consumed
    }

    pub fn set_pointer_event_consumed(&self, consumed: bool) {
        self.0.borrow_mut().pointer_event_consumed = consumed;
    }

    /// Read and reset the consumed flag.
    pub fn take_pointer_event_consumed(&self) -> bool {
        std::mem::take(&mut self.0.borrow_mut().pointer_event_consumed)
    }

    pub fn drag_paused(&self) -> DragPause {
        self.0.borrow().drag_paused
    }

    pub fn pause(&self, pause: DragPause) {
        self.0.borrow_mut().drag_paused = pause;
    }

    pub fn resume(&self) {
        self.0.borrow_mut().drag_paused = DragPause::Off;
    }

    pub fn is_paused(&self) -> bool {
        self.0.borrow().drag_paused.is_paused()
    }

    /// Forget everything: no drag, no target, not paused.
    pub fn reset(&self) {
        tracing::trace!("drag session: reset");
        *self.0.borrow_mut() = SessionState::default();
    }
}
