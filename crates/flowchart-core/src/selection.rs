//! Selection and hover registers.
//!
//! `selected` and `hovered` are independent single slots. Writes compare
//! before mutating, so setting the same target twice is a no-op.

use crate::chart::{Chart, Selection};
use crate::ids::{LinkId, NodeId};

/// Write `target` into a register. Returns true if the register changed.
fn write_register(register: &mut Selection, target: Selection) -> bool {
    if *register == target {
        return false;
    }
    *register = target;
    true
}

/// Hover a link. Only connected links can be hovered.
pub fn link_mouse_enter(link_id: &LinkId, chart: &Chart) -> Chart {
    let mut next = chart.clone();
    match chart.link(link_id) {
        Some(link) if link.is_connected() => {
            write_register(&mut next.hovered, Selection::link(link_id.clone()));
        }
        Some(_) => {}
        None => log::debug!("link_mouse_enter: unknown link {}", link_id),
    }
    next
}

/// Stop hovering a link.
///
/// Only clears the register when it currently points at this link, so a
/// late leave from one link cannot wipe the hover of another.
pub fn link_mouse_leave(link_id: &LinkId, chart: &Chart) -> Chart {
    let mut next = chart.clone();
    match chart.link(link_id) {
        Some(link) if link.is_connected() => {
            if chart.hovered == Selection::link(link_id.clone()) {
                write_register(&mut next.hovered, Selection::None);
            }
        }
        Some(_) => {}
        None => log::debug!("link_mouse_leave: unknown link {}", link_id),
    }
    next
}

/// Select a link.
pub fn link_click(link_id: &LinkId, chart: &Chart) -> Chart {
    let mut next = chart.clone();
    if chart.links.contains_key(link_id) {
        write_register(&mut next.selected, Selection::link(link_id.clone()));
    } else {
        log::debug!("link_click: unknown link {}", link_id);
    }
    next
}

/// Select a node.
pub fn node_click(node_id: &NodeId, chart: &Chart) -> Chart {
    let mut next = chart.clone();
    if chart.nodes.contains_key(node_id) {
        write_register(&mut next.selected, Selection::node(node_id.clone()));
    } else {
        log::debug!("node_click: unknown node {}", node_id);
    }
    next
}

/// Clear the selection.
pub fn canvas_click(chart: &Chart) -> Chart {
    let mut next = chart.clone();
    write_register(&mut next.selected, Selection::None);
    next
}

/// Drop any register that points at a removed element.
pub(crate) fn forget_missing(chart: &mut Chart) {
    if !chart.resolves(&chart.selected) {
        chart.selected = Selection::None;
    }
    if !chart.resolves(&chart.hovered) {
        chart.hovered = Selection::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Link, Node, Port, PortRef};
    use kurbo::Point;

    fn chart() -> Chart {
        let mut chart = Chart::new();
        chart.insert_node(Node::new("A", "t", Point::ZERO).with_port(Port::new("p1", "out")));
        chart.insert_node(Node::new("B", "t", Point::ZERO).with_port(Port::new("p2", "in")));
        chart.insert_link(Link::connected("L1", PortRef::new("A", "p1"), PortRef::new("B", "p2")));
        chart.insert_link(Link::draft("D1", PortRef::new("A", "p1")));
        chart
    }

    #[test]
    fn test_node_click_is_idempotent() {
        let chart = chart();
        let once = node_click(&NodeId::from("A"), &chart);
        let twice = node_click(&NodeId::from("A"), &once);
        assert_eq!(once, twice);
        assert_eq!(once.selected, Selection::node("A"));
    }

    #[test]
    fn test_click_replaces_selection() {
        let chart = chart();
        let chart = node_click(&NodeId::from("A"), &chart);
        let chart = link_click(&LinkId::from("L1"), &chart);
        assert_eq!(chart.selected, Selection::link("L1"));
        let chart = node_click(&NodeId::from("B"), &chart);
        assert_eq!(chart.selected, Selection::node("B"));
    }

    #[test]
    fn test_click_on_missing_element_is_noop() {
        let chart = node_click(&NodeId::from("A"), &chart());
        assert_eq!(node_click(&NodeId::from("ghost"), &chart), chart);
        assert_eq!(link_click(&LinkId::from("ghost"), &chart), chart);
    }

    #[test]
    fn test_canvas_click_clears_selection() {
        let chart = node_click(&NodeId::from("A"), &chart());
        let cleared = canvas_click(&chart);
        assert!(cleared.selected.is_none());
        assert_eq!(canvas_click(&cleared), cleared);
    }

    #[test]
    fn test_hover_only_connected_links() {
        let chart = chart();
        let hovered = link_mouse_enter(&LinkId::from("L1"), &chart);
        assert_eq!(hovered.hovered, Selection::link("L1"));

        let draft = link_mouse_enter(&LinkId::from("D1"), &chart);
        assert!(draft.hovered.is_none());
    }

    #[test]
    fn test_hover_is_independent_of_selection() {
        let chart = node_click(&NodeId::from("A"), &chart());
        let chart = link_mouse_enter(&LinkId::from("L1"), &chart);
        assert_eq!(chart.selected, Selection::node("A"));
        assert_eq!(chart.hovered, Selection::link("L1"));

        let chart = link_mouse_leave(&LinkId::from("L1"), &chart);
        assert!(chart.hovered.is_none());
        assert_eq!(chart.selected, Selection::node("A"));
    }

    #[test]
    fn test_leave_from_other_link_keeps_hover() {
        let mut chart = chart();
        chart.insert_link(Link::connected("L2", PortRef::new("B", "p2"), PortRef::new("A", "p1")));
        let chart = link_mouse_enter(&LinkId::from("L1"), &chart);
        let chart = link_mouse_leave(&LinkId::from("L2"), &chart);
        assert_eq!(chart.hovered, Selection::link("L1"));
    }

    #[test]
    fn test_leave_on_draft_or_missing_link_is_noop() {
        let chart = link_mouse_enter(&LinkId::from("L1"), &chart());
        assert_eq!(link_mouse_leave(&LinkId::from("D1"), &chart), chart);
        assert_eq!(link_mouse_leave(&LinkId::from("ghost"), &chart), chart);
        assert_eq!(chart.hovered, Selection::link("L1"));
    }

    #[test]
    fn test_link_click_is_idempotent() {
        let once = link_click(&LinkId::from("L1"), &chart());
        let twice = link_click(&LinkId::from("L1"), &once);
        assert_eq!(once, twice);
        assert_eq!(twice.selected, Selection::link("L1"));
    }

    #[test]
    fn test_transitions_do_not_touch_input() {
        let before = chart();
        let copy = before.clone();
        let _ = node_click(&NodeId::from("A"), &before);
        let _ = link_mouse_enter(&LinkId::from("L1"), &before);
        assert_eq!(before, copy);
    }
}
