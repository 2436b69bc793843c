//! Minimal resizable behavior. Resizing never touches the drag session.

use crate::base::{Activation, DdBase};
use crate::event::{DdEvent, DdEventType, PointerEvent};
use crate::tree::{ElementTree, NodeId};
use quilt_core::config::Config;
use quilt_core::math::Vec2;
use std::fmt;
use std::rc::Rc;

/// Size information of the element being resized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeUi {
    pub position: Vec2,
    pub size: Vec2,
}

pub type ResizeCallback = Rc<dyn Fn(&DdEvent, &ResizeUi)>;

#[derive(Clone, Default)]
pub struct ResizableOptions {
    /// Comma-separated handle directions, e.g. `"se"` or `"e, s, se"`.
    pub handles: Option<String>,
    pub start: Option<ResizeCallback>,
    pub resize: Option<ResizeCallback>,
    pub stop: Option<ResizeCallback>,
}

impl ResizableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handles(mut self, handles: impl Into<String>) -> Self {
        self.handles = Some(handles.into());
        self
    }

    pub fn start(mut self, f: impl Fn(&DdEvent, &ResizeUi) + 'static) -> Self {
        self.start = Some(Rc::new(f));
        self
    }

    pub fn resize(mut self, f: impl Fn(&DdEvent, &ResizeUi) + 'static) -> Self {
        self.resize = Some(Rc::new(f));
        self
    }

    pub fn stop(mut self, f: impl Fn(&DdEvent, &ResizeUi) + 'static) -> Self {
        self.stop = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for ResizableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizableOptions")
            .field("handles", &self.handles)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
struct ResizeState {
    start_page: Vec2,
    position: Vec2,
    size: Vec2,
}

pub struct DdResizable {
    el: NodeId,
    option: ResizableOptions,
    base: DdBase<DdEvent>,
    config: Rc<Config>,
    resizing: Option<ResizeState>,
}

impl fmt::Debug for DdResizable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DdResizable")
            .field("el", &self.el)
            .field("option", &self.option)
            .field("resizing", &self.resizing)
            .finish()
    }
}

impl DdResizable {
    pub const DEFAULT_HANDLES: &'static str = "se";

    pub fn new(
        tree: &mut ElementTree,
        el: NodeId,
        mut option: ResizableOptions,
        config: Rc<Config>,
    ) -> Self {
        option
            .handles
            .get_or_insert_with(|| Self::DEFAULT_HANDLES.to_string());
        let mut resizable = Self {
            el,
            option,
            base: DdBase::new(),
            config,
            resizing: None,
        };
        resizable.enable(tree);
        resizable
    }

    pub fn el(&self) -> NodeId {
        self.el
    }

    pub fn option(&self) -> &ResizableOptions {
        &self.option
    }

    /// Handle directions, trimmed.
    pub fn handles(&self) -> impl Iterator<Item = &str> + '_ {
        self.option
            .handles
            .as_deref()
            .unwrap_or(Self::DEFAULT_HANDLES)
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
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

    pub fn is_resizing(&self) -> bool {
        self.resizing.is_some()
    }

    pub fn enable(&mut self, tree: &mut ElementTree) {
        if !self.base.enable() {
            return;
        }
        tree.add_class(self.el, &self.config.classes.resizable);
        tree.remove_class(self.el, &self.config.classes.resizable_disabled);
    }

    pub fn disable(&mut self, tree: &mut ElementTree, for_destroy: bool) {
        if !self.base.disable() {
            return;
        }
        tree.remove_class(self.el, &self.config.classes.resizable);
        if !for_destroy {
            tree.add_class(self.el, &self.config.classes.resizable_disabled);
        }
    }

    pub fn destroy(&mut self, tree: &mut ElementTree) {
        self.resizing = None;
        self.disable(tree, true);
        tree.remove_class(self.el, &self.config.classes.resizable);
        tree.remove_class(self.el, &self.config.classes.resizable_disabled);
        self.base.destroy();
    }

    pub fn update_option(&mut self, opts: ResizableOptions) {
        if opts.handles.is_some() {
            self.option.handles = opts.handles;
        }
        if opts.start.is_some() {
            self.option.start = opts.start;
        }
        if opts.resize.is_some() {
            self.option.resize = opts.resize;
        }
        if opts.stop.is_some() {
            self.option.stop = opts.stop;
        }
    }

    fn ui(state: &ResizeState, page: Vec2) -> ResizeUi {
        ResizeUi {
            position: state.position,
            size: (state.size + (page - state.start_page)).max(Vec2::ZERO),
        }
    }

    fn notify(&self, e: &PointerEvent, event_type: DdEventType, ui: &ResizeUi) {
        let ev = DdEvent::init(e, event_type, Some(self.el));
        let callback = match event_type {
            DdEventType::ResizeStart => self.option.start.clone(),
            DdEventType::Resize => self.option.resize.clone(),
            DdEventType::ResizeStop => self.option.stop.clone(),
            _ => None,
        };
        if let Some(callback) = callback {
            callback(&ev, ui);
        }
        self.base.trigger_event(event_type.as_str(), &ev);
    }

    pub fn resize_start(&mut self, tree: &ElementTree, e: &PointerEvent) -> bool {
        if self.base.is_disabled() || self.resizing.is_some() {
            return false;
        }
        let bounds = tree.get(self.el).and_then(|el| el.bounds()).unwrap_or_default();
        let state = ResizeState {
            start_page: e.page,
            position: bounds.position(),
            size: bounds.size(),
        };
        self.resizing = Some(state);
        tracing::debug!("resizable {:?}: resize start", self.el);
        self.notify(e, DdEventType::ResizeStart, &Self::ui(&state, e.page));
        true
    }

    pub fn resize(&mut self, e: &PointerEvent) {
        let Some(state) = self.resizing else {
            return;
        };
        self.notify(e, DdEventType::Resize, &Self::ui(&state, e.page));
    }

    pub fn resize_stop(&mut self, e: &PointerEvent) {
        let Some(state) = self.resizing.take() else {
            return;
        };
        tracing::debug!("resizable {:?}: resize stop", self.el);
        self.notify(e, DdEventType::ResizeStop, &Self::ui(&state, e.page));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::LayoutRect;
    use std::cell::RefCell;

    #[test]
    fn test_default_handles_and_merge() {
        let mut tree = ElementTree::new();
        let el = tree.create_element("div");
        let mut r = DdResizable::new(&mut tree, el, ResizableOptions::new(), Rc::new(Config::default()));
        assert_eq!(r.handles().collect::<Vec<_>>(), ["se"]);
        assert!(tree.has_class(el, "ui-resizable"));

        r.update_option(ResizableOptions::new().handles("e, s,se"));
        assert_eq!(r.handles().collect::<Vec<_>>(), ["e", "s", "se"]);
    }

    #[test]
    fn test_resize_events() {
        let mut tree = ElementTree::new();
        let el = tree.create_element("div");
        tree.set_bounds(el, Some(LayoutRect::new(0.0, 0.0, 100.0, 80.0)));
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let s = sizes.clone();
        let names = Rc::new(RefCell::new(Vec::new()));
        let mut r = DdResizable::new(
            &mut tree,
            el,
            ResizableOptions::new().resize(move |_, ui| s.borrow_mut().push(ui.size)),
            Rc::new(Config::default()),
        );
        for name in ["resizestart", "resize", "resizestop"] {
            let n = names.clone();
            r.on(name, move |ev| n.borrow_mut().push(ev.type_name()));
        }

        r.resize(&PointerEvent::default());
        assert!(r.resize_start(&tree, &PointerEvent::new(Vec2::new(100.0, 80.0))));
        r.resize(&PointerEvent::new(Vec2::new(120.0, 70.0)));
        r.resize_stop(&PointerEvent::new(Vec2::new(120.0, 70.0)));

        assert_eq!(*sizes.borrow(), vec![Vec2::new(120.0, 70.0)]);
        assert_eq!(*names.borrow(), vec!["resizestart", "resize", "resizestop"]);
        assert!(!r.is_resizing());
    }
}
