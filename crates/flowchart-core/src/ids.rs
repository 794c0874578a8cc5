//! Identifiers and the node id generator.

use crate::chart::Chart;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from any string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a node, unique within a chart.
    NodeId
);
string_id!(
    /// Identifier of a port, unique within its owning node.
    PortId
);
string_id!(
    /// Identifier of a link, chosen by the front end when drafting starts.
    LinkId
);

/// Source of fresh node identifiers.
///
/// Generators are the only authority for new node ids. Returning an id that
/// already exists in `chart` is a contract violation.
pub trait IdGenerator {
    /// Produce an id not present in `chart.nodes`.
    fn next_node_id(&mut self, chart: &Chart) -> NodeId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_node_id(&mut self, chart: &Chart) -> NodeId {
        loop {
            let id = NodeId::new(Uuid::new_v4().to_string());
            if !chart.nodes.contains_key(&id) {
                return id;
            }
        }
    }
}

/// Deterministic `prefix-N` ids, skipping any already taken.
#[derive(Debug, Clone)]
pub struct SequentialGenerator {
    prefix: String,
    counter: u64,
}

impl SequentialGenerator {
    /// Create a generator producing `prefix-1`, `prefix-2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl Default for SequentialGenerator {
    fn default() -> Self {
        Self::new("node")
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_node_id(&mut self, chart: &Chart) -> NodeId {
        loop {
            self.counter += 1;
            let id = NodeId::new(format!("{}-{}", self.prefix, self.counter));
            if !chart.nodes.contains_key(&id) {
                return id;
            }
        }
    }
}
