//! Flowchart Core Library
//!
//! Chart state model and transition logic for an interactive node-link
//! diagram editor. Front ends raise [`ChartEvent`]s; a [`Dispatcher`] turns
//! each one into a new [`Chart`] held by the [`ChartStore`].

pub mod actions;
pub mod chart;
pub mod config;
pub mod dispatch;
pub mod drop;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod links;
pub mod selection;
pub mod store;

pub use chart::{Chart, Link, LinkEnd, LinkState, Node, Port, PortRef, Properties, Selection};
pub use config::EditorConfig;
pub use dispatch::{ChartEvent, Dispatcher};
pub use drop::{drop_position, DropPayload};
pub use error::{ChartError, ChartResult};
pub use ids::{IdGenerator, LinkId, NodeId, PortId, SequentialGenerator, UuidGenerator};
pub use store::ChartStore;
