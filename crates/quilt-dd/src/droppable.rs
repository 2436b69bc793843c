//! Drop-zone behavior.
//!
//! A droppable reacts to native enter/leave events while something is dragged. The
//! cross-zone parts of the protocol (forcing the previous zone out, re-entering the parent
//! zone) need the whole facade arena and live on [`crate::manager::DdManager`]; this module
//! holds the per-zone state and the pieces that only touch one zone.

use crate::base::{Activation, DdBase};
use crate::event::{DdEvent, DdEventType, DropUi, PointerEvent};
use crate::listeners::Listeners;
use crate::selector::ClassOrSelector;
use crate::session::{DragSession, DragSource};
use crate::tree::{Element, ElementTree, NodeId};
use quilt_core::config::Config;
use std::fmt;
use std::rc::Rc;

/// Callback invoked with the standardized event and the drop-zone view of the drag.
pub type DropCallback = Rc<dyn Fn(&DdEvent, &DropUi)>;

/// Which dragged elements a droppable accepts.
#[derive(Clone)]
pub enum Accept {
    /// A class name, or a selector the dragged element must match.
    Selector(String),
    Predicate(Rc<dyn Fn(&Element) -> bool>),
}

impl Accept {
    pub fn predicate(f: impl Fn(&Element) -> bool + 'static) -> Self {
        Accept::Predicate(Rc::new(f))
    }
}

impl From<&str> for Accept {
    fn from(value: &str) -> Self {
        Accept::Selector(value.to_string())
    }
}

impl From<String> for Accept {
    fn from(value: String) -> Self {
        Accept::Selector(value)
    }
}

impl fmt::Debug for Accept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accept::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
            Accept::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Options of a droppable. `None` fields are left untouched by [`DdDroppable::update_option`].
#[derive(Clone, Default)]
pub struct DroppableOptions {
    pub accept: Option<Accept>,
    pub over: Option<DropCallback>,
    pub out: Option<DropCallback>,
    pub drop: Option<DropCallback>,
}

impl DroppableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(mut self, accept: impl Into<Accept>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn over(mut self, f: impl Fn(&DdEvent, &DropUi) + 'static) -> Self {
        self.over = Some(Rc::new(f));
        self
    }

    pub fn out(mut self, f: impl Fn(&DdEvent, &DropUi) + 'static) -> Self {
        self.out = Some(Rc::new(f));
        self
    }

    pub fn drop(mut self, f: impl Fn(&DdEvent, &DropUi) + 'static) -> Self {
        self.drop = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for DroppableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DroppableOptions")
            .field("accept", &self.accept)
            .field("over", &self.over.is_some())
            .field("out", &self.out.is_some())
            .field("drop", &self.drop.is_some())
            .finish()
    }
}

enum AcceptRule {
    Selector(ClassOrSelector),
    Predicate(Rc<dyn Fn(&Element) -> bool>),
}

impl AcceptRule {
    fn from_option(accept: &Accept) -> Self {
        match accept {
            Accept::Selector(s) => AcceptRule::Selector(ClassOrSelector::new(s.as_str())),
            Accept::Predicate(p) => AcceptRule::Predicate(p.clone()),
        }
    }

    fn accepts(&self, el: &Element) -> bool {
        match self {
            AcceptRule::Selector(rule) => rule.matches(el),
            AcceptRule::Predicate(p) => p(el),
        }
    }
}

/// Drop-zone behavior attached to one element.
pub struct DdDroppable {
    el: NodeId,
    option: DroppableOptions,
    accept: Option<AcceptRule>,
    base: DdBase<DdEvent>,
    session: DragSession,
    config: Rc<Config>,
}

impl fmt::Debug for DdDroppable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DdDroppable")
            .field("el", &self.el)
            .field("option", &self.option)
            .field("base", &self.base)
            .finish()
    }
}

impl DdDroppable {
    /// Create the behavior for `el` and enable it.
    pub fn new(
        tree: &mut ElementTree,
        el: NodeId,
        option: DroppableOptions,
        session: DragSession,
        config: Rc<Config>,
    ) -> Self {
        let mut droppable = Self {
            el,
            option,
            accept: None,
            base: DdBase::new(),
            session,
            config,
        };
        droppable.setup_accept();
        droppable.enable(tree);
        droppable
    }

    pub fn el(&self) -> NodeId {
        self.el
    }

    pub fn option(&self) -> &DroppableOptions {
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

    fn listeners(&self) -> Listeners {
        if self.config.touch.is_on() {
            Listeners::MOUSE | Listeners::POINTER
        } else {
            Listeners::MOUSE
        }
    }

    pub fn enable(&mut self, tree: &mut ElementTree) {
        if !self.base.enable() {
            return;
        }
        let classes = &self.config.classes;
        tree.add_class(self.el, &classes.droppable);
        tree.remove_class(self.el, &classes.droppable_disabled);
        tree.attach_listeners(self.el, self.listeners());
    }

    /// Disable the zone. With `for_destroy` the disabled class is not added.
    ///
    /// If this zone currently owns the drag it stops owning it.
    pub fn disable(&mut self, tree: &mut ElementTree, for_destroy: bool) {
        if !self.base.disable() {
            return;
        }
        let classes = &self.config.classes;
        tree.remove_class(self.el, &classes.droppable);
        if !for_destroy {
            tree.add_class(self.el, &classes.droppable_disabled);
        }
        tree.detach_listeners(self.el, self.listeners());
        if self.session.clear_active_drop_target_if(self.el) {
            tree.remove_class(self.el, &classes.droppable_over);
        }
    }

    pub fn destroy(&mut self, tree: &mut ElementTree) {
        self.disable(tree, true);
        let classes = &self.config.classes;
        tree.remove_class(self.el, &classes.droppable);
        tree.remove_class(self.el, &classes.droppable_disabled);
        self.base.destroy();
    }

    /// Merge `opts` into the current options and re-derive the accept rule.
    pub fn update_option(&mut self, opts: DroppableOptions) {
        if opts.accept.is_some() {
            self.option.accept = opts.accept;
        }
        if opts.over.is_some() {
            self.option.over = opts.over;
        }
        if opts.out.is_some() {
            self.option.out = opts.out;
        }
        if opts.drop.is_some() {
            self.option.drop = opts.drop;
        }
        self.setup_accept();
    }

    fn setup_accept(&mut self) {
        self.accept = self.option.accept.as_ref().map(AcceptRule::from_option);
    }

    /// `true` if the dragged element `el` may be dropped here.
    pub fn can_drop(&self, tree: &ElementTree, el: NodeId) -> bool {
        let Some(element) = tree.get(el) else {
            return false;
        };
        self.accept.as_ref().is_none_or(|rule| rule.accepts(element))
    }

    /// The current drag, if this zone is enabled and accepts it.
    pub(crate) fn accepted_drag(&self, tree: &ElementTree) -> Option<DragSource> {
        if self.base.is_disabled() {
            return None;
        }
        let dragged = self.session.dragged()?;
        self.can_drop(tree, dragged.el).then_some(dragged)
    }

    pub fn ui(&self, dragged: &DragSource) -> DropUi {
        DropUi::new(dragged.el, dragged.ui())
    }

    fn notify(&self, e: &PointerEvent, event_type: DdEventType, dragged: &DragSource) {
        let ev = DdEvent::init(e, event_type, Some(self.el));
        let callback = match event_type {
            DdEventType::DropOver => self.option.over.clone(),
            DdEventType::DropOut => self.option.out.clone(),
            DdEventType::Drop => self.option.drop.clone(),
            _ => None,
        };
        if let Some(callback) = callback {
            callback(&ev, &self.ui(dragged));
        }
        self.base.trigger_event(event_type.as_str(), &ev);
    }

    pub(crate) fn over(&self, tree: &mut ElementTree, e: &PointerEvent, dragged: &DragSource) {
        tracing::trace!("droppable {:?}: over", self.el);
        self.notify(e, DdEventType::DropOver, dragged);
        tree.add_class(self.el, &self.config.classes.droppable_over);
    }

    pub(crate) fn out(&self, tree: &mut ElementTree, e: &PointerEvent, dragged: &DragSource) {
        tracing::trace!("droppable {:?}: out", self.el);
        self.notify(e, DdEventType::DropOut, dragged);
        tree.remove_class(self.el, &self.config.classes.droppable_over);
    }

    pub(crate) fn drop_here(&self, e: &PointerEvent, dragged: &DragSource) {
        tracing::trace!("droppable {:?}: drop", self.el);
        self.notify(e, DdEventType::Drop, dragged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DragUi;
    use std::cell::RefCell;

    fn setup(touch: bool) -> (ElementTree, NodeId, NodeId, DragSession, Rc<Config>) {
        let mut tree = ElementTree::new();
        let zone = tree.create_element("div");
        let item = tree.create_element("div");
        tree.add_class(item, "grid-stack-item");
        let config = if touch {
            Config::default().touch(quilt_core::config::TouchSupport::On)
        } else {
            Config::default()
        };
        (tree, zone, item, DragSession::new(), Rc::new(config))
    }

    #[test]
    fn test_new_enables() {
        let (mut tree, zone, _, session, config) = setup(true);
        let d = DdDroppable::new(&mut tree, zone, DroppableOptions::new(), session, config);
        let el = tree.get(zone).unwrap();
        assert!(el.has_class("ui-droppable"));
        assert_eq!(el.listeners(), Listeners::all());
        assert_eq!(d.activation(), Activation::Enabled);
    }

    #[test]
    fn test_enable_disable_idempotent() {
        let (mut tree, zone, _, session, config) = setup(false);
        let mut d = DdDroppable::new(&mut tree, zone, DroppableOptions::new(), session, config);

        d.disable(&mut tree, false);
        d.disable(&mut tree, false);
        let el = tree.get(zone).unwrap();
        assert_eq!(el.classes().collect::<Vec<_>>(), ["ui-droppable-disabled"]);
        assert_eq!(el.listeners(), Listeners::NONE);

        d.enable(&mut tree);
        d.enable(&mut tree);
        let el = tree.get(zone).unwrap();
        assert_eq!(el.classes().collect::<Vec<_>>(), ["ui-droppable"]);
        assert_eq!(el.listeners(), Listeners::MOUSE);
    }

    #[test]
    fn test_destroy_removes_structural_classes() {
        let (mut tree, zone, _, session, config) = setup(false);
        let mut d = DdDroppable::new(&mut tree, zone, DroppableOptions::new(), session, config);
        d.destroy(&mut tree);
        d.destroy(&mut tree);
        assert_eq!(tree.get(zone).unwrap().classes().count(), 0);
    }

    #[test]
    fn test_accept_class_selector_and_predicate() {
        let (mut tree, zone, item, session, config) = setup(false);
        let mut d = DdDroppable::new(
            &mut tree,
            zone,
            DroppableOptions::new().accept("grid-stack-item"),
            session,
            config,
        );
        assert!(d.can_drop(&tree, item));

        d.update_option(DroppableOptions::new().accept("div.other"));
        assert!(!d.can_drop(&tree, item));

        d.update_option(DroppableOptions::new().accept(Accept::predicate(|el| el.tag() == "div")));
        assert!(d.can_drop(&tree, item));

        d.update_option(DroppableOptions::new());
        assert!(d.can_drop(&tree, item), "accept survives a merge without it");
    }

    #[test]
    fn test_disable_clears_active_target() {
        let (mut tree, zone, item, session, config) = setup(false);
        let mut d =
            DdDroppable::new(&mut tree, zone, DroppableOptions::new(), session.clone(), config);
        session.begin_drag(item, DragUi::default());
        session.set_active_drop_target(zone);
        tree.add_class(zone, "ui-droppable-over");

        d.disable(&mut tree, false);
        assert_eq!(session.active_drop_target(), None);
        assert!(!tree.has_class(zone, "ui-droppable-over"));
    }

    #[test]
    fn test_callback_before_registered_listener() {
        let (mut tree, zone, item, session, config) = setup(false);
        let order = Rc::new(RefCell::new(Vec::new()));
        let o = order.clone();
        let mut d = DdDroppable::new(
            &mut tree,
            zone,
            DroppableOptions::new().over(move |ev, ui| {
                o.borrow_mut().push(format!("option:{}:{:?}", ev.type_name(), ui.draggable));
            }),
            session.clone(),
            config,
        );
        let o = order.clone();
        d.on("dropover", move |ev| o.borrow_mut().push(format!("event:{}", ev.type_name())));

        session.begin_drag(item, DragUi::default());
        let dragged = d.accepted_drag(&tree).unwrap();
        d.over(&mut tree, &PointerEvent::default(), &dragged);

        assert_eq!(
            *order.borrow(),
            vec![format!("option:dropover:{:?}", item), "event:dropover".to_string()]
        );
        assert!(tree.has_class(zone, "ui-droppable-over"));
    }
}
