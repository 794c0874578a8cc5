//! Chart data model.
//!
//! A [`Chart`] is the whole diagram state for one editor session: nodes with
//! their ports, links between ports, the canvas pan offset, and the selection
//! and hover registers. Every type here is plain data; state changes happen
//! through the transition functions in [`crate::actions`].

use crate::error::ChartResult;
use crate::ids::{LinkId, NodeId, PortId};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque key-value payload carried by nodes, ports and links.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// A connection point on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    /// Unique within the owning node.
    pub id: PortId,
    /// Semantic kind, opaque to the core.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Absolute canvas position, once the front end has measured it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl Port {
    /// Create an unmeasured port.
    pub fn new(id: impl Into<PortId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            position: None,
            properties: Properties::new(),
        }
    }
}

/// A placed diagram element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    /// Top-left anchor in canvas space.
    #[serde(default)]
    pub position: Point,
    /// Rendered size, unknown until first measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Semantic kind, opaque to the core.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub ports: HashMap<PortId, Port>,
    #[serde(default)]
    pub properties: Properties,
}

impl Node {
    /// Create a node without ports.
    pub fn new(id: impl Into<NodeId>, kind: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            size: None,
            kind: kind.into(),
            ports: HashMap::new(),
            properties: Properties::new(),
        }
    }

    /// Add a port (builder style).
    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.insert(port.id.clone(), port);
        self
    }

    /// Get a port by ID.
    pub fn port(&self, id: &PortId) -> Option<&Port> {
        self.ports.get(id)
    }
}

/// The fixed origin of a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortRef {
    pub node_id: NodeId,
    pub port_id: PortId,
}

impl PortRef {
    pub fn new(node_id: impl Into<NodeId>, port_id: impl Into<PortId>) -> Self {
        Self {
            node_id: node_id.into(),
            port_id: port_id.into(),
        }
    }
}

/// The far end of a link: either following the pointer or attached to a port.
///
/// Written with a `state` tag. Untagged input is accepted as well: `{}` or
/// `{position}` is a draft, `{nodeId, portId}` is connected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase", try_from = "RawLinkEnd")]
pub enum LinkEnd {
    /// Being drawn. `position` is the last reported pointer location.
    Draft {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Point>,
    },
    /// Resolved to a port.
    #[serde(rename_all = "camelCase")]
    Connected { node_id: NodeId, port_id: PortId },
}

impl LinkEnd {
    /// The port this end is attached to, if connected.
    pub fn port_ref(&self) -> Option<PortRef> {
        match self {
            LinkEnd::Connected { node_id, port_id } => Some(PortRef::new(node_id.clone(), port_id.clone())),
            LinkEnd::Draft { .. } => None,
        }
    }

    /// Whether this end is attached to `node_id`.
    pub fn touches(&self, node_id: &NodeId) -> bool {
        matches!(self, LinkEnd::Connected { node_id: n, .. } if n == node_id)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLinkEnd {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    position: Option<Point>,
    #[serde(default)]
    node_id: Option<NodeId>,
    #[serde(default)]
    port_id: Option<PortId>,
}

impl TryFrom<RawLinkEnd> for LinkEnd {
    type Error = String;

    fn try_from(raw: RawLinkEnd) -> Result<Self, Self::Error> {
        let state = raw.state.as_deref();
        match (state, raw.node_id, raw.port_id) {
            (None | Some("connected"), Some(node_id), Some(port_id)) => {
                Ok(LinkEnd::Connected { node_id, port_id })
            }
            (None | Some("draft"), None, None) => Ok(LinkEnd::Draft { position: raw.position }),
            (Some("draft"), _, _) => Err("draft link end must not name a node or port".to_string()),
            (Some("connected"), _, _) => Err("connected link end needs nodeId and portId".to_string()),
            (None, _, _) => Err("link end names only one of nodeId and portId".to_string()),
            (Some(other), _, _) => Err(format!("unknown link end state `{other}`")),
        }
    }
}

/// Lifecycle state of an existing link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Draft,
    Connected,
}

/// A connection between two ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: LinkId,
    pub from: PortRef,
    pub to: LinkEnd,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl Link {
    /// Create a draft link with no pointer position yet.
    pub fn draft(id: impl Into<LinkId>, from: PortRef) -> Self {
        Self {
            id: id.into(),
            from,
            to: LinkEnd::Draft { position: None },
            properties: Properties::new(),
        }
    }

    /// Create a link that is already connected.
    pub fn connected(id: impl Into<LinkId>, from: PortRef, to: PortRef) -> Self {
        Self {
            id: id.into(),
            from,
            to: LinkEnd::Connected {
                node_id: to.node_id,
                port_id: to.port_id,
            },
            properties: Properties::new(),
        }
    }

    pub fn state(&self) -> LinkState {
        match self.to {
            LinkEnd::Draft { .. } => LinkState::Draft,
            LinkEnd::Connected { .. } => LinkState::Connected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == LinkState::Connected
    }

    /// Whether either end of the link is attached to `node_id`.
    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.from.node_id == node_id || self.to.touches(node_id)
    }
}

/// A single-slot pointer to a node or link.
///
/// An empty object reads as [`Selection::None`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", try_from = "RawSelection")]
pub enum Selection {
    #[default]
    None,
    Node { id: NodeId },
    Link { id: LinkId },
}

impl Selection {
    pub fn node(id: impl Into<NodeId>) -> Self {
        Selection::Node { id: id.into() }
    }

    pub fn link(id: impl Into<LinkId>) -> Self {
        Selection::Link { id: id.into() }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

#[derive(Deserialize)]
struct RawSelection {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

impl TryFrom<RawSelection> for Selection {
    type Error = String;

    fn try_from(raw: RawSelection) -> Result<Self, Self::Error> {
        match (raw.kind.as_deref(), raw.id) {
            (None | Some("none"), _) => Ok(Selection::None),
            (Some("node"), Some(id)) => Ok(Selection::node(id)),
            (Some("link"), Some(id)) => Ok(Selection::link(id)),
            (Some(kind @ ("node" | "link")), None) => Err(format!("{kind} selection needs an id")),
            (Some(other), _) => Err(format!("unknown selection type `{other}`")),
        }
    }
}

/// The complete diagram state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    /// Canvas pan position.
    #[serde(default)]
    pub offset: Point,
    #[serde(default)]
    pub nodes: HashMap<NodeId, Node>,
    #[serde(default)]
    pub links: HashMap<LinkId, Link>,
    #[serde(default)]
    pub selected: Selection,
    #[serde(default)]
    pub hovered: Selection,
}

impl Chart {
    /// Create an empty chart at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node keyed by its own id.
    pub fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Insert a link keyed by its own id.
    pub fn insert_link(&mut self, link: Link) {
        self.links.insert(link.id.clone(), link);
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    /// Look up a port through its owning node.
    pub fn port(&self, port: &PortRef) -> Option<&Port> {
        self.nodes.get(&port.node_id)?.ports.get(&port.port_id)
    }

    /// Whether the node and port named by `port` both exist.
    pub fn has_port(&self, port: &PortRef) -> bool {
        self.port(port).is_some()
    }

    /// IDs of links with either end on `node_id`.
    pub fn links_touching(&self, node_id: &NodeId) -> Vec<LinkId> {
        self.links
            .values()
            .filter(|link| link.touches(node_id))
            .map(|link| link.id.clone())
            .collect()
    }

    /// Whether `target` is the current selection.
    pub fn is_selected(&self, target: &Selection) -> bool {
        !target.is_none() && &self.selected == target
    }

    /// Whether `target` is currently hovered.
    pub fn is_hovered(&self, target: &Selection) -> bool {
        !target.is_none() && &self.hovered == target
    }

    /// Whether a selection register points at something that exists.
    pub fn resolves(&self, target: &Selection) -> bool {
        match target {
            Selection::None => true,
            Selection::Node { id } => self.nodes.contains_key(id),
            Selection::Link { id } => self.links.contains_key(id),
        }
    }

    /// Serialize the chart to JSON.
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a chart from JSON.
    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
