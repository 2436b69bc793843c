//! Node facade routing, behavior lifecycle and drag/resize flows through the manager.

use quilt_core::config::{Config, TouchSupport};
use quilt_core::math::Vec2;
use quilt_dd::{
    DdManager, DraggableOptions, DragPause, DragSession, DroppableOptions, LayoutRect,
    Listeners, NativeEventKind, PointerEvent, PointerType, ResizableOptions,
};
use quilt_test_utils::{CallLog, NestedZones};

#[test]
fn test_on_routes_by_event_name() {
    let mut dd = DdManager::new();
    let node = dd.tree_mut().create_element("div");
    let log = CallLog::new();

    assert!(!dd.on(node, "dropover", log.handler("early")));

    dd.setup_droppable(node, DroppableOptions::new());
    assert!(dd.on(node, "dropover", log.handler("zone")));
    assert!(!dd.on(node, "dragstart", log.handler("zone")));
    assert!(!dd.on(node, "resize", log.handler("zone")));
    assert!(!dd.on(node, "mystery", log.handler("zone")));

    dd.setup_draggable(node, DraggableOptions::new());
    assert!(dd.on(node, "dragstart", log.handler("item")));

    dd.setup_resizable(node, ResizableOptions::new());
    assert!(dd.on(node, "resize", log.handler("item")));
    assert!(dd.off(node, "resize"));
}

#[test]
fn test_registered_handlers_fire_once_per_name() {
    let mut zones = NestedZones::new();
    let a = zones.a;
    let handlers = CallLog::new();
    zones.dd.on(a, "dropover", handlers.handler("first"));
    zones.dd.on(a, "dropover", handlers.handler("second"));

    let mut e = PointerEvent::new(NestedZones::ITEM);
    let item = zones.item;
    zones.dd.pointer_down(item, &mut e);
    zones.dd.pointer_moved(NestedZones::INSIDE_A, &mut e);

    assert_eq!(handlers.entries(), ["second:dropover"]);

    zones.dd.off(a, "dropover");
    zones.dd.pointer_moved(NestedZones::OUTSIDE, &mut e);
    zones.dd.pointer_moved(NestedZones::INSIDE_A, &mut e);
    assert_eq!(handlers.len(), 1);
    assert_eq!(zones.log.count("A.dropover"), 2);
}

#[test]
fn test_setup_twice_merges_options() {
    let mut zones = NestedZones::new();
    let a = zones.a;
    zones
        .dd
        .setup_droppable(a, DroppableOptions::new().accept(".grid-stack-item"));

    let mut e = PointerEvent::new(NestedZones::ITEM);
    let item = zones.item;
    zones.dd.pointer_down(item, &mut e);
    zones.dd.pointer_moved(NestedZones::INSIDE_A, &mut e);

    // The `over` callback from the first setup survives the merge.
    assert_eq!(zones.log.entries(), ["A.dropover"]);
}

#[test]
fn test_enable_disable_idempotent_through_manager() {
    let mut dd = DdManager::with_config(Config::default().touch(TouchSupport::On));
    let node = dd.tree_mut().create_element("div");
    dd.setup_droppable(node, DroppableOptions::new());

    for _ in 0..2 {
        dd.set_droppable_enabled(node, false);
    }
    let el = dd.tree().get(node).unwrap();
    assert_eq!(el.classes().collect::<Vec<_>>(), ["ui-droppable-disabled"]);
    assert_eq!(el.listeners(), Listeners::NONE);

    for _ in 0..2 {
        dd.set_droppable_enabled(node, true);
    }
    let el = dd.tree().get(node).unwrap();
    assert_eq!(el.classes().collect::<Vec<_>>(), ["ui-droppable"]);
    assert_eq!(el.listeners(), Listeners::MOUSE | Listeners::POINTER);
}

#[test]
fn test_touch_pointer_events_drive_the_same_protocol() {
    let zones = NestedZones::with_manager(DdManager::with_config(
        Config::default().touch(TouchSupport::On),
    ));
    let NestedZones {
        mut dd, b, c, item, log, ..
    } = zones;

    let mut e = PointerEvent::new(NestedZones::ITEM).with_pointer_type(PointerType::Touch);
    dd.pointer_down(item, &mut e);
    dd.pointer_moved(NestedZones::INSIDE_C, &mut e);
    assert_eq!(dd.session().active_drop_target(), Some(c));

    log.clear();
    dd.pointer_moved(NestedZones::INSIDE_B, &mut e);
    assert_eq!(log.entries(), ["C.dropout", "B.dropover"]);
    assert_eq!(dd.session().active_drop_target(), Some(b));
}

#[test]
fn test_touch_events_need_touch_support() {
    let mut zones = NestedZones::new();
    let c = zones.c;
    let mut e = PointerEvent::new(NestedZones::ITEM).with_pointer_type(PointerType::Pen);
    let item = zones.item;
    zones.dd.pointer_down(item, &mut e);

    zones.dd.dispatch(c, NativeEventKind::PointerEnter, &mut e);
    assert_eq!(zones.dd.session().active_drop_target(), None);
}

#[test]
fn test_drag_callbacks_and_events_in_order() {
    let mut dd = DdManager::new();
    let zone = dd.tree_mut().create_element("div");
    let item = dd.tree_mut().create_element("div");
    dd.tree_mut()
        .set_bounds(zone, Some(LayoutRect::new(0.0, 0.0, 100.0, 100.0)));
    dd.tree_mut()
        .set_bounds(item, Some(LayoutRect::new(200.0, 0.0, 10.0, 10.0)));

    let log = CallLog::new();
    let (start, stop) = (log.clone(), log.clone());
    dd.setup_draggable(
        item,
        DraggableOptions::new()
            .start(move |ev, _| start.record(format!("option.{}", ev.type_name())))
            .stop(move |ev, _| stop.record(format!("option.{}", ev.type_name()))),
    );
    dd.on(item, "dragstart", log.handler("item"));
    dd.on(item, "dragstop", log.handler("item"));
    dd.setup_droppable(zone, DroppableOptions::new().drop(log.drop_callback("zone")));

    let mut e = PointerEvent::new(Vec2::new(205.0, 5.0));
    assert!(dd.pointer_down(item, &mut e));
    assert!(dd.tree().has_class(item, "ui-draggable-dragging"));
    dd.pointer_moved(Vec2::new(50.0, 50.0), &mut e);
    dd.pointer_up(&mut e);

    assert_eq!(
        log.entries(),
        [
            "option.dragstart",
            "item:dragstart",
            "zone.drop",
            "option.dragstop",
            "item:dragstop"
        ]
    );
    assert!(!dd.tree().has_class(item, "ui-draggable-dragging"));
}

#[test]
fn test_pointer_down_respects_handle_and_consumed_flag() {
    let mut dd = DdManager::new();
    let item = dd.tree_mut().create_element("div");
    let grip = dd.tree_mut().create_element("span");
    let body = dd.tree_mut().create_element("p");
    dd.tree_mut().append_child(item, grip);
    dd.tree_mut().append_child(item, body);
    dd.tree_mut().add_class(grip, "grip");
    dd.setup_draggable(item, DraggableOptions::new().handle(".grip"));

    let mut e = PointerEvent::default();
    assert!(!dd.pointer_down(body, &mut e));
    assert!(dd.pointer_down(grip, &mut e));
    assert_eq!(dd.session().dragged_element(), Some(item));
    assert!(dd.session().pointer_event_consumed());

    dd.pointer_up(&mut e);
    dd.session().set_pointer_event_consumed(true);
    assert!(!dd.pointer_down(grip, &mut e));
}

#[test]
fn test_paused_drag_does_not_start_or_move() {
    let mut zones = NestedZones::new();
    let item = zones.item;
    let drags = CallLog::new();

    zones.dd.session().pause(DragPause::On);
    let mut e = PointerEvent::new(NestedZones::ITEM);
    assert!(!zones.dd.pointer_down(item, &mut e));

    zones.dd.session().resume();
    assert!(zones.dd.pointer_down(item, &mut e));
    zones.dd.on(item, "drag", drags.handler("item"));
    zones.dd.pointer_moved(NestedZones::INSIDE_A, &mut e);
    assert_eq!(drags.len(), 1);

    zones.dd.session().pause(DragPause::For(250));
    zones.dd.pointer_moved(NestedZones::INSIDE_B, &mut e);
    assert_eq!(drags.len(), 1);
}

#[test]
fn test_release_dragged_element_ends_drag() {
    let mut zones = NestedZones::new();
    let (b, item) = (zones.b, zones.item);
    let mut e = PointerEvent::new(NestedZones::ITEM);
    zones.dd.pointer_down(item, &mut e);
    zones.dd.pointer_moved(NestedZones::INSIDE_B, &mut e);
    assert_eq!(zones.dd.session().active_drop_target(), Some(b));

    zones.dd.release(item);
    assert!(!zones.dd.session().is_dragging());
    assert_eq!(zones.dd.session().active_drop_target(), None);
    assert!(zones.over_zones().is_empty());
    assert!(zones.dd.element(item).is_none());
    assert!(!zones.dd.tree().has_class(item, "ui-draggable"));
    assert!(!zones.dd.tree().has_class(item, "ui-draggable-dragging"));
    assert_eq!(zones.dd.pointer_up(&mut e), None);

    // A later drag that never moves must not drop on the zone hovered before.
    let other = zones.dd.tree_mut().create_element("div");
    zones.dd.setup_draggable(other, DraggableOptions::new());
    let mut e = PointerEvent::default();
    assert!(zones.dd.pointer_down(other, &mut e));
    assert_eq!(zones.dd.pointer_up(&mut e), None);
    assert_eq!(zones.log.count("B.drop"), 0);
}

#[test]
fn test_removing_or_cleaning_dragged_element_clears_target() {
    let mut zones = NestedZones::new();
    let (c, item) = (zones.c, zones.item);
    let mut e = PointerEvent::new(NestedZones::ITEM);
    zones.dd.pointer_down(item, &mut e);
    zones.dd.pointer_moved(NestedZones::INSIDE_C, &mut e);

    zones.dd.clean_draggable(item);
    assert!(!zones.dd.session().is_dragging());
    assert_eq!(zones.dd.session().active_drop_target(), None);
    assert!(!zones.dd.tree().has_class(c, "ui-droppable-over"));

    let mut zones = NestedZones::new();
    let item = zones.item;
    let mut e = PointerEvent::new(NestedZones::ITEM);
    zones.dd.pointer_down(item, &mut e);
    zones.dd.pointer_moved(NestedZones::INSIDE_A, &mut e);

    zones.dd.remove_element(item);
    assert_eq!(zones.dd.session().active_drop_target(), None);
    assert!(zones.over_zones().is_empty());
    assert_eq!(zones.dd.pointer_up(&mut e), None);
    assert_eq!(zones.log.count("A.drop"), 0);
}

#[test]
fn test_remove_element_releases_subtree() {
    let mut zones = NestedZones::new();
    let (a, b, c) = (zones.a, zones.b, zones.c);
    let mut e = PointerEvent::new(NestedZones::ITEM);
    let item = zones.item;
    zones.dd.pointer_down(item, &mut e);
    zones.dd.pointer_moved(NestedZones::INSIDE_C, &mut e);

    zones.dd.remove_element(b);

    assert!(zones.dd.tree().get(c).is_none());
    assert_eq!(zones.dd.hovered(), None);
    assert_eq!(zones.dd.session().active_drop_target(), None);
    assert!(zones.dd.is_droppable(a));
    assert!(!zones.dd.is_droppable(c));
}

#[test]
fn test_resize_flow() {
    let mut dd = DdManager::new();
    let node = dd.tree_mut().create_element("div");
    dd.tree_mut()
        .set_bounds(node, Some(LayoutRect::new(0.0, 0.0, 40.0, 40.0)));
    let log = CallLog::new();
    let sizes = log.clone();
    dd.setup_resizable(
        node,
        ResizableOptions::new().resize(move |_, ui| sizes.record(format!("{:?}", ui.size))),
    );
    for name in ["resizestart", "resize", "resizestop"] {
        dd.on(node, name, log.handler("r"));
    }

    assert!(dd.resize_start(node, &PointerEvent::new(Vec2::new(40.0, 40.0))));
    dd.resize(node, &PointerEvent::new(Vec2::new(60.0, 50.0)));
    dd.resize_stop(node, &PointerEvent::new(Vec2::new(60.0, 50.0)));

    assert_eq!(
        log.entries(),
        [
            "r:resizestart".to_string(),
            format!("{:?}", Vec2::new(60.0, 50.0)),
            "r:resize".to_string(),
            "r:resizestop".to_string(),
        ]
    );
    assert!(!dd.session().is_dragging());

    dd.set_resizable_enabled(node, false);
    assert!(dd.tree().has_class(node, "ui-resizable-disabled"));
    assert!(!dd.resize_start(node, &PointerEvent::default()));
}

#[test]
fn test_injected_session_is_shared() {
    let session = DragSession::new();
    let dd = DdManager::new().with_session(session.clone());
    assert!(dd.session().same_session(&session));
}
