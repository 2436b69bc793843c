//! Geometry kernel contract tests, as consumed by the placement engine.

use quilt_core::geometry::{
    GridRect, SortDirection, area, intersects, order_for_placement, overlap_area,
    sort_for_placement, touches,
};
use quilt_core::grid::GridNode;

#[test]
fn test_edge_adjacent_rects() {
    let a = GridRect::new(0, 0, 2, 2);
    let b = GridRect::new(2, 0, 2, 2);

    assert!(!intersects(a, b));
    assert!(!intersects(b, a));
    assert!(touches(a, b));
    assert!(touches(b, a));
}

#[test]
fn test_overlap_area_examples() {
    let a = GridRect::new(0, 0, 3, 3);
    let b = GridRect::new(1, 1, 3, 3);
    assert_eq!(overlap_area(a, b), 4);
    assert_eq!(overlap_area(b, a), 4);

    let far = GridRect::new(10, 10, 2, 2);
    assert_eq!(overlap_area(a, far), 0);
}

#[test]
fn test_overlap_never_exceeds_area() {
    let rects = [
        GridRect::new(0, 0, 4, 2),
        GridRect::new(1, 1, 2, 2),
        GridRect::new(3, 0, 1, 5),
        GridRect::new(-2, -2, 3, 3),
    ];
    for a in rects {
        for b in rects {
            let overlap = overlap_area(a, b);
            assert!(overlap >= 0);
            assert!(overlap <= area(a).min(area(b)));
            assert_eq!(overlap > 0, intersects(a, b));
        }
    }
}

#[test]
fn test_row_major_ascending_order() {
    let nodes = vec![GridNode::at(1, 0), GridNode::at(0, 0), GridNode::at(0, 1)];

    let sorted = order_for_placement(nodes, SortDirection::Ascending);

    assert_eq!(
        sorted,
        vec![GridNode::at(0, 0), GridNode::at(1, 0), GridNode::at(0, 1)]
    );
}

#[test]
fn test_unplaced_nodes_sort_last() {
    let nodes = vec![
        GridNode::new().with_id("unplaced"),
        GridNode::at(5, 3).with_id("placed"),
    ];

    let sorted = order_for_placement(nodes, SortDirection::Ascending);

    assert_eq!(sorted[0].id.as_deref(), Some("placed"));
    assert_eq!(sorted[1].id.as_deref(), Some("unplaced"));
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let mut nodes = vec![
        GridNode::at(0, 0).with_id("first"),
        GridNode::at(2, 2).with_id("x"),
        GridNode::at(0, 0).with_id("second"),
        GridNode::at(0, 0).with_id("third"),
    ];

    sort_for_placement(&mut nodes, SortDirection::Ascending);
    let ids: Vec<_> = nodes.iter().filter_map(|n| n.id.as_deref()).collect();
    assert_eq!(ids, ["first", "second", "third", "x"]);

    sort_for_placement(&mut nodes, SortDirection::Descending);
    let ids: Vec<_> = nodes.iter().filter_map(|n| n.id.as_deref()).collect();
    assert_eq!(ids, ["x", "first", "second", "third"]);
}

#[test]
fn test_sort_borrowed_nodes() {
    let nodes = [GridNode::at(3, 1), GridNode::at(0, 4)];
    let refs: Vec<&GridNode> = nodes.iter().collect();

    let sorted = order_for_placement(refs, SortDirection::from_sign(1));

    assert_eq!(sorted[0].x, Some(3));
}
