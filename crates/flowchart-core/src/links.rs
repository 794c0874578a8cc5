//! Link lifecycle: draft, connected, removed.
//!
//! A link is created as a draft by [`link_start`], follows the pointer via
//! [`link_move`], and is either resolved to a port by [`link_complete`] or
//! discarded by [`link_cancel`]. A connected link never returns to draft;
//! it can only be deleted.

use crate::chart::{Chart, Link, LinkEnd, PortRef};
use crate::ids::{LinkId, NodeId, PortId};
use crate::selection::forget_missing;
use kurbo::Point;

/// Begin drawing a link from a port.
///
/// No-op when the id is already taken or the origin port does not exist.
pub fn link_start(link_id: &LinkId, from_node_id: &NodeId, from_port_id: &PortId, chart: &Chart) -> Chart {
    let from = PortRef::new(from_node_id.clone(), from_port_id.clone());
    if chart.links.contains_key(link_id) {
        log::debug!("link_start: link {} already exists", link_id);
        return chart.clone();
    }
    if !chart.has_port(&from) {
        log::debug!("link_start: unknown origin {}/{}", from_node_id, from_port_id);
        return chart.clone();
    }

    let mut next = chart.clone();
    next.insert_link(Link::draft(link_id.clone(), from));
    next
}

/// Track the pointer while a link is being drawn.
pub fn link_move(link_id: &LinkId, to_position: Point, chart: &Chart) -> Chart {
    if !to_position.is_finite() {
        log::debug!("link_move: ignoring non-finite position {:?}", to_position);
        return chart.clone();
    }
    let mut next = chart.clone();
    match next.links.get_mut(link_id) {
        Some(Link {
            to: LinkEnd::Draft { position },
            ..
        }) => *position = Some(to_position),
        Some(_) => log::debug!("link_move: link {} is already connected", link_id),
        None => log::debug!("link_move: unknown link {}", link_id),
    }
    next
}

/// Attach a draft link to a target port.
///
/// The link stays a draft when the target equals the origin, when the
/// target port does not exist, or when the reported origin disagrees with
/// the one recorded at [`link_start`].
pub fn link_complete(
    link_id: &LinkId,
    from_node_id: &NodeId,
    from_port_id: &PortId,
    to_node_id: &NodeId,
    to_port_id: &PortId,
    chart: &Chart,
) -> Chart {
    let Some(link) = chart.link(link_id) else {
        log::debug!("link_complete: unknown link {}", link_id);
        return chart.clone();
    };
    if link.is_connected() {
        log::debug!("link_complete: link {} is already connected", link_id);
        return chart.clone();
    }

    let from = PortRef::new(from_node_id.clone(), from_port_id.clone());
    let to = PortRef::new(to_node_id.clone(), to_port_id.clone());
    if link.from != from {
        log::debug!("link_complete: origin mismatch for link {}", link_id);
        return chart.clone();
    }
    if to == from {
        log::debug!("link_complete: link {} would connect a port to itself", link_id);
        return chart.clone();
    }
    if !chart.has_port(&to) {
        log::debug!("link_complete: unknown target {}/{}", to_node_id, to_port_id);
        return chart.clone();
    }

    let mut next = chart.clone();
    if let Some(link) = next.links.get_mut(link_id) {
        link.to = LinkEnd::Connected {
            node_id: to.node_id,
            port_id: to.port_id,
        };
    }
    next
}

/// Abandon a link, removing it entirely.
pub fn link_cancel(link_id: &LinkId, chart: &Chart) -> Chart {
    if !chart.links.contains_key(link_id) {
        log::debug!("link_cancel: unknown link {}", link_id);
        return chart.clone();
    }
    let mut next = chart.clone();
    next.links.remove(link_id);
    forget_missing(&mut next);
    next
}
