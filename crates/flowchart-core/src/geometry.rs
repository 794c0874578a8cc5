//! Read-side helpers for renderers.

use crate::chart::{Chart, LinkEnd, Selection};
use crate::ids::LinkId;
use kurbo::{Line, Point};

/// Start and end points of a link on the canvas.
///
/// The start is the origin port's measured position. The end is the target
/// port's position once connected; while drafting it is the last pointer
/// position, or the start itself before the pointer has moved. Returns
/// `None` while a required port position is still unmeasured.
pub fn link_endpoints(chart: &Chart, link_id: &LinkId) -> Option<(Point, Point)> {
    let link = chart.link(link_id)?;
    let start = chart.port(&link.from)?.position?;
    let end = match &link.to {
        LinkEnd::Draft { position } => position.unwrap_or(start),
        LinkEnd::Connected { .. } => {
            let to = link.to.port_ref()?;
            chart.port(&to)?.position?
        }
    };
    Some((start, end))
}

/// The straight segment a renderer draws for a link.
pub fn link_line(chart: &Chart, link_id: &LinkId) -> Option<Line> {
    link_endpoints(chart, link_id).map(|(start, end)| Line::new(start, end))
}

/// Highlight flags for one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    pub selected: bool,
    pub hovered: bool,
}

/// Whether `target` should be drawn selected and/or hovered.
pub fn highlight(chart: &Chart, target: &Selection) -> Highlight {
    Highlight {
        selected: chart.is_selected(target),
        hovered: chart.is_hovered(target),
    }
}
