//! Drop payload decoding.
//!
//! The drop surface hands over a transport string (JSON stored under the
//! configured transfer key). It is decoded and validated here before the
//! core ever sees it.

use crate::chart::{Port, Properties};
use crate::error::{ChartError, ChartResult};
use crate::ids::PortId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fields of a node about to be created by a drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub ports: HashMap<PortId, Port>,
    #[serde(default)]
    pub properties: Properties,
}

impl DropPayload {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
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

    /// Decode and validate a transport string.
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let payload: Self = serde_json::from_str(json)?;
        payload.validate()?;
        Ok(payload)
    }

    /// Check that the payload can become a node.
    pub fn validate(&self) -> ChartResult<()> {
        if self.kind.trim().is_empty() {
            return Err(ChartError::InvalidDropPayload("empty node type".to_string()));
        }
        for (key, port) in &self.ports {
            if key != &port.id {
                return Err(ChartError::PortKeyMismatch {
                    key: key.to_string(),
                    id: port.id.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Convert a pointer location on screen into canvas space.
///
/// `pan` is the chart's offset and `viewport_origin` the canvas element's
/// on-screen top-left, as reported by the viewport observer.
pub fn drop_position(client: Point, pan: Point, viewport_origin: Point) -> Point {
    Point::new(
        client.x - pan.x - viewport_origin.x,
        client.y - pan.y - viewport_origin.y,
    )
}
