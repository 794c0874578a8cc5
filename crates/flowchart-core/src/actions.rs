//! Transition functions.
//!
//! One function per interaction event. Each takes the event payload and the
//! current chart and returns the next chart; the input is never mutated.
//! Events naming a missing node, link or port produce an unchanged chart, as
//! do events carrying non-finite coordinates.

use crate::chart::{Chart, Node, Selection};
use crate::drop::DropPayload;
use crate::ids::{IdGenerator, NodeId, PortId};
use crate::selection::forget_missing;
use kurbo::{Point, Size};

pub use crate::links::{link_cancel, link_complete, link_move, link_start};
pub use crate::selection::{canvas_click, link_click, link_mouse_enter, link_mouse_leave, node_click};

/// Move a node to a new top-left position.
pub fn drag_node(node_id: &NodeId, position: Point, chart: &Chart) -> Chart {
    if !position.is_finite() {
        log::debug!("drag_node: ignoring non-finite position {:?}", position);
        return chart.clone();
    }
    let mut next = chart.clone();
    match next.nodes.get_mut(node_id) {
        Some(node) => node.position = position,
        None => log::debug!("drag_node: unknown node {}", node_id),
    }
    next
}

/// Pan the canvas.
pub fn drag_canvas(position: Point, chart: &Chart) -> Chart {
    if !position.is_finite() {
        log::debug!("drag_canvas: ignoring non-finite offset {:?}", position);
        return chart.clone();
    }
    let mut next = chart.clone();
    next.offset = position;
    next
}

/// Delete the selected element.
///
/// Deleting a node also removes every link attached to it. The selection is
/// always cleared afterwards.
pub fn delete_key(chart: &Chart) -> Chart {
    let mut next = chart.clone();
    match &chart.selected {
        Selection::Node { id } => {
            for link_id in chart.links_touching(id) {
                next.links.remove(&link_id);
            }
            next.nodes.remove(id);
        }
        Selection::Link { id } => {
            next.links.remove(id);
        }
        Selection::None => {}
    }
    next.selected = Selection::None;
    forget_missing(&mut next);
    next
}

/// Record a node's measured size.
pub fn node_size_change(node_id: &NodeId, size: Size, chart: &Chart) -> Chart {
    if !size.is_finite() {
        log::debug!("node_size_change: ignoring non-finite size {:?}", size);
        return chart.clone();
    }
    let mut next = chart.clone();
    match next.nodes.get_mut(node_id) {
        Some(node) => node.size = Some(size),
        None => log::debug!("node_size_change: unknown node {}", node_id),
    }
    next
}

/// Record a port's measured canvas position.
pub fn port_position_change(node_id: &NodeId, port_id: &PortId, position: Point, chart: &Chart) -> Chart {
    if !position.is_finite() {
        log::debug!("port_position_change: ignoring non-finite position {:?}", position);
        return chart.clone();
    }
    let mut next = chart.clone();
    match next
        .nodes
        .get_mut(node_id)
        .and_then(|node| node.ports.get_mut(port_id))
    {
        Some(port) => port.position = Some(position),
        None => log::debug!("port_position_change: unknown port {}/{}", node_id, port_id),
    }
    next
}

/// Create a node from a drop.
pub fn canvas_drop(payload: &DropPayload, position: Point, ids: &mut dyn IdGenerator, chart: &Chart) -> Chart {
    if !position.is_finite() {
        log::debug!("canvas_drop: ignoring non-finite position {:?}", position);
        return chart.clone();
    }
    let id = ids.next_node_id(chart);
    debug_assert!(!chart.nodes.contains_key(&id), "generated node id {id} already exists");

    let mut next = chart.clone();
    next.insert_node(Node {
        id,
        position,
        size: None,
        kind: payload.kind.clone(),
        ports: payload.ports.clone(),
        properties: payload.properties.clone(),
    });
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Link, Port, PortRef};
    use crate::ids::{LinkId, SequentialGenerator};

    fn chart() -> Chart {
        let mut chart = Chart::new();
        chart.insert_node(Node::new("A", "t", Point::ZERO).with_port(Port::new("p1", "out")));
        chart.insert_node(
            Node::new("B", "t", Point::new(100.0, 0.0))
                .with_port(Port::new("p2", "in"))
                .with_port(Port::new("p3", "out")),
        );
        chart.insert_node(Node::new("C", "t", Point::new(200.0, 0.0)).with_port(Port::new("p4", "in")));
        chart.insert_link(Link::connected("AB", PortRef::new("A", "p1"), PortRef::new("B", "p2")));
        chart.insert_link(Link::connected("BC", PortRef::new("B", "p3"), PortRef::new("C", "p4")));
        chart.insert_link(Link::draft("A-draft", PortRef::new("A", "p1")));
        chart
    }

    #[test]
    fn test_drag_node_changes_only_that_node() {
        let before = chart();
        let after = drag_node(&NodeId::from("A"), Point::new(5.0, 6.0), &before);

        assert_eq!(after.nodes[&NodeId::from("A")].position, Point::new(5.0, 6.0));
        let mut expected = before.clone();
        expected.nodes.get_mut(&NodeId::from("A")).unwrap().position = Point::new(5.0, 6.0);
        assert_eq!(after, expected);
    }

    #[test]
    fn test_drag_missing_node_is_noop() {
        let before = chart();
        assert_eq!(drag_node(&NodeId::from("Z"), Point::new(5.0, 6.0), &before), before);
    }

    #[test]
    fn test_non_finite_coordinates_are_ignored() {
        let chart = chart();
        let nan = Point::new(f64::NAN, 0.0);
        assert_eq!(drag_node(&NodeId::from("A"), nan, &chart), chart);
        assert_eq!(drag_canvas(Point::new(0.0, f64::INFINITY), &chart), chart);
        assert_eq!(node_size_change(&NodeId::from("A"), Size::new(f64::NAN, 1.0), &chart), chart);
        assert_eq!(port_position_change(&NodeId::from("A"), &PortId::from("p1"), nan, &chart), chart);

        let mut ids = SequentialGenerator::new("n");
        assert_eq!(canvas_drop(&DropPayload::new("t"), nan, &mut ids, &chart), chart);
    }

    #[test]
    fn test_drag_canvas() {
        let after = drag_canvas(Point::new(-20.0, 15.0), &chart());
        assert_eq!(after.offset, Point::new(-20.0, 15.0));
    }

    #[test]
    fn test_delete_node_cascades() {
        let mut before = chart();
        before.selected = Selection::node("A");
        let after = delete_key(&before);

        assert!(after.node(&NodeId::from("A")).is_none());
        assert!(after.link(&LinkId::from("AB")).is_none());
        assert!(after.link(&LinkId::from("A-draft")).is_none());
        assert_eq!(after.link(&LinkId::from("BC")), before.link(&LinkId::from("BC")));
        assert!(after.selected.is_none());
    }

    #[test]
    fn test_delete_node_clears_hover_on_removed_link() {
        let mut before = chart();
        before.selected = Selection::node("C");
        before.hovered = Selection::link("BC");
        let after = delete_key(&before);
        assert!(after.hovered.is_none());

        before.hovered = Selection::link("AB");
        let after = delete_key(&before);
        assert_eq!(after.hovered, Selection::link("AB"));
    }

    #[test]
    fn test_delete_link() {
        let mut before = chart();
        before.selected = Selection::link("AB");
        let after = delete_key(&before);

        assert!(after.link(&LinkId::from("AB")).is_none());
        assert_eq!(after.nodes, before.nodes);
        assert_eq!(after.links.len(), 2);
        assert!(after.selected.is_none());
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let before = chart();
        assert_eq!(delete_key(&before), before);
    }

    #[test]
    fn test_node_size_change() {
        let after = node_size_change(&NodeId::from("B"), Size::new(120.0, 60.0), &chart());
        assert_eq!(after.nodes[&NodeId::from("B")].size, Some(Size::new(120.0, 60.0)));
        let before = chart();
        assert_eq!(node_size_change(&NodeId::from("Z"), Size::new(1.0, 1.0), &before), before);
    }

    #[test]
    fn test_port_position_change() {
        let after = port_position_change(&NodeId::from("B"), &PortId::from("p2"), Point::new(150.0, 10.0), &chart());
        let port = after.port(&PortRef::new("B", "p2")).unwrap();
        assert_eq!(port.position, Some(Point::new(150.0, 10.0)));

        let before = chart();
        let unchanged = port_position_change(&NodeId::from("B"), &PortId::from("p9"), Point::ZERO, &before);
        assert_eq!(unchanged, before);
    }

    #[test]
    fn test_canvas_drop_adds_one_fresh_node() {
        let mut before = chart();
        before.selected = Selection::node("B");
        let payload = DropPayload::new("input-output").with_port(Port::new("port1", "input"));
        let mut ids = SequentialGenerator::default();

        let after = canvas_drop(&payload, Point::new(40.0, 50.0), &mut ids, &before);

        assert_eq!(after.nodes.len(), before.nodes.len() + 1);
        let new_ids: Vec<_> = after.nodes.keys().filter(|id| !before.nodes.contains_key(*id)).collect();
        assert_eq!(new_ids.len(), 1);
        let node = &after.nodes[new_ids[0]];
        assert_eq!(node.position, Point::new(40.0, 50.0));
        assert_eq!(node.kind, "input-output");
        assert!(node.port(&PortId::from("port1")).is_some());
        assert_eq!(after.links, before.links);
        assert_eq!(after.selected, before.selected);
        for (id, node) in &before.nodes {
            assert_eq!(after.nodes.get(id), Some(node));
        }
    }

    #[test]
    fn test_repeated_drops_get_distinct_ids() {
        let payload = DropPayload::new("t");
        let mut ids = SequentialGenerator::default();
        let once = canvas_drop(&payload, Point::ZERO, &mut ids, &Chart::new());
        let twice = canvas_drop(&payload, Point::ZERO, &mut ids, &once);
        assert_eq!(twice.nodes.len(), 2);
    }
}
