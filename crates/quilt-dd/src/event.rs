//! Native pointer events and the standardized drag & drop event payload.

use crate::listeners::Listeners;
use crate::tree::NodeId;
use bitflags::bitflags;
use quilt_core::math::Vec2;

/// Native enter/leave notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEventKind {
    MouseEnter,
    MouseLeave,
    PointerEnter,
    PointerLeave,
}

impl NativeEventKind {
    /// The listener flag an element needs for this event to be delivered.
    pub fn listener(&self) -> Listeners {
        match self {
            NativeEventKind::MouseEnter => Listeners::MOUSE_ENTER,
            NativeEventKind::MouseLeave => Listeners::MOUSE_LEAVE,
            NativeEventKind::PointerEnter => Listeners::POINTER_ENTER,
            NativeEventKind::PointerLeave => Listeners::POINTER_LEAVE,
        }
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, NativeEventKind::MouseEnter | NativeEventKind::PointerEnter)
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, NativeEventKind::PointerEnter | NativeEventKind::PointerLeave)
    }

    /// The enter or leave kind a device delivers: mice produce mouse events, everything
    /// else produces pointer events.
    pub fn for_device(pointer_type: PointerType, enter: bool) -> Self {
        match (pointer_type, enter) {
            (PointerType::Mouse, true) => NativeEventKind::MouseEnter,
            (PointerType::Mouse, false) => NativeEventKind::MouseLeave,
            (_, true) => NativeEventKind::PointerEnter,
            (_, false) => NativeEventKind::PointerLeave,
        }
    }
}

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const ALT   = 0b0001;
        const CTRL  = 0b0010;
        const META  = 0b0100;
        const SHIFT = 0b1000;
    }
}

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerType {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// A native pointer event as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Element the event was delivered to, if known.
    pub target: Option<NodeId>,
    pub pointer_type: PointerType,
    pub page: Vec2,
    pub client: Vec2,
    pub screen: Vec2,
    pub modifiers: Modifiers,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    /// An event at `at`, using the same position for page, client and screen coordinates.
    pub fn new(at: Vec2) -> Self {
        Self {
            target: None,
            pointer_type: PointerType::Mouse,
            page: at,
            client: at,
            screen: at,
            modifiers: Modifiers::empty(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_screen(mut self, screen: Vec2) -> Self {
        self.screen = screen;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Clear the per-delivery flags before the event is handed to the next element.
    pub(crate) fn reset_flags(&mut self) {
        self.default_prevented = false;
        self.propagation_stopped = false;
    }
}

impl Default for PointerEvent {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

/// Types of the standardized drag & drop events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DdEventType {
    DragStart,
    Drag,
    DragStop,
    DropOver,
    DropOut,
    Drop,
    ResizeStart,
    Resize,
    ResizeStop,
}

impl DdEventType {
    /// Event name as used for `on`/`off` registration.
    pub fn as_str(&self) -> &'static str {
        match self {
            DdEventType::DragStart => "dragstart",
            DdEventType::Drag => "drag",
            DdEventType::DragStop => "dragstop",
            DdEventType::DropOver => "dropover",
            DdEventType::DropOut => "dropout",
            DdEventType::Drop => "drop",
            DdEventType::ResizeStart => "resizestart",
            DdEventType::Resize => "resize",
            DdEventType::ResizeStop => "resizestop",
        }
    }
}

impl std::fmt::Display for DdEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standardized event payload handed to callbacks and registered listeners.
///
/// Built from the originating pointer event: modifiers and coordinates are copied, the
/// button fields are fixed to a primary-button drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DdEvent {
    pub event_type: DdEventType,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
    pub page: Vec2,
    pub client: Vec2,
    pub screen: Vec2,
    pub button: i16,
    pub which: u16,
    pub buttons: u16,
    pub bubbles: bool,
    pub cancelable: bool,
    pub target: Option<NodeId>,
}

impl DdEvent {
    /// Build a payload of `event_type` from `e`. `target` overrides the event's own target.
    pub fn init(e: &PointerEvent, event_type: DdEventType, target: Option<NodeId>) -> Self {
        Self {
            event_type,
            alt_key: e.modifiers.contains(Modifiers::ALT),
            ctrl_key: e.modifiers.contains(Modifiers::CTRL),
            meta_key: e.modifiers.contains(Modifiers::META),
            shift_key: e.modifiers.contains(Modifiers::SHIFT),
            page: e.page,
            client: e.client,
            screen: e.screen,
            button: 0,
            which: 0,
            buttons: 1,
            bubbles: true,
            cancelable: true,
            target: target.or(e.target),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.event_type.as_str()
    }
}

/// Position information of the dragged item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragUi {
    /// Pointer position relative to the drag start.
    pub position: Vec2,
    /// Absolute position of the dragged element.
    pub offset: Vec2,
    pub size: Vec2,
}

/// Drop-zone view of a drag: the dragged element plus its current [`DragUi`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropUi {
    pub draggable: NodeId,
    pub position: Vec2,
    pub offset: Vec2,
    pub size: Vec2,
}

impl DropUi {
    pub fn new(draggable: NodeId, ui: DragUi) -> Self {
        Self {
            draggable,
            position: ui.position,
            offset: ui.offset,
            size: ui.size,
        }
    }
}
