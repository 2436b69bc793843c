//! Quilt DD - drag & drop coordination for the Quilt grid widget
//!
//! This crate tracks which element is being dragged and which drop zone currently owns the
//! drag, and routes native enter/leave/drop notifications to the right zone:
//! - Shared [`DragSession`] injected into every behavior
//! - Droppable behavior with nested-zone handling
//! - Minimal draggable and resizable behaviors
//! - One [`DdElement`] facade per element, created lazily by the [`DdManager`]
//! - Headless [`ElementTree`] with hit testing and selector matching
//!
//! ## Quick Start
//!
//! ```rust
//! use quilt_dd::prelude::*;
//!
//! let mut dd = DdManager::new();
//! let zone = dd.tree_mut().create_element("div");
//! let item = dd.tree_mut().create_element("div");
//! dd.tree_mut().add_class(item, "grid-stack-item");
//! dd.tree_mut().set_bounds(zone, Some(LayoutRect::new(0.0, 0.0, 400.0, 300.0)));
//! dd.tree_mut().set_bounds(item, Some(LayoutRect::new(10.0, 10.0, 50.0, 50.0)));
//!
//! dd.setup_droppable(zone, DroppableOptions::new().accept(".grid-stack-item"));
//! dd.setup_draggable(item, DraggableOptions::new());
//!
//! let mut e = PointerEvent::new(Vec2::new(20.0, 20.0));
//! dd.pointer_down(item, &mut e);
//! dd.pointer_moved(Vec2::new(100.0, 100.0), &mut e);
//! assert_eq!(dd.session().active_drop_target(), Some(zone));
//! assert_eq!(dd.pointer_up(&mut e), Some(zone));
//! ```

pub mod base;
pub mod draggable;
pub mod droppable;
pub mod element;
pub mod event;
pub mod listeners;
pub mod manager;
pub mod resizable;
pub mod selector;
pub mod session;
pub mod tree;

pub use base::{Activation, DdBase};
pub use draggable::{DdDraggable, DraggableOptions};
pub use droppable::{Accept, DdDroppable, DroppableOptions};
pub use element::{DdElement, ElementMut};
pub use event::{
    DdEvent, DdEventType, DragUi, DropUi, Modifiers, NativeEventKind, PointerEvent, PointerType,
};
pub use listeners::Listeners;
pub use manager::DdManager;
pub use resizable::{DdResizable, ResizableOptions, ResizeUi};
pub use selector::{Selector, SelectorError, SelectorResult};
pub use session::{DragPause, DragSession, DragSource};
pub use tree::{Element, ElementTree, LayoutRect, NodeId};

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        Accept, DdEvent, DdManager, DragSession, DraggableOptions, DropUi, DroppableOptions,
        ElementTree, LayoutRect, NativeEventKind, NodeId, PointerEvent, ResizableOptions,
    };
    pub use quilt_core::math::Vec2;
}
