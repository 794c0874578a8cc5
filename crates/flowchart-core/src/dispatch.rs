//! Dispatch surface.
//!
//! Front ends describe every interaction as a [`ChartEvent`] and hand it to
//! a [`Dispatcher`], which runs the matching transition against its store.
//! Events are applied one at a time; `&mut self` serialises all writes.

use crate::actions;
use crate::chart::Chart;
use crate::config::EditorConfig;
use crate::drop::{drop_position, DropPayload};
use crate::error::{ChartError, ChartResult};
use crate::ids::{IdGenerator, LinkId, NodeId, PortId, UuidGenerator};
use crate::store::ChartStore;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An interaction event raised by a front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ChartEvent {
    DragNode { node_id: NodeId, position: Point },
    DragCanvas { position: Point },
    LinkStart { link_id: LinkId, from_node_id: NodeId, from_port_id: PortId },
    LinkMove { link_id: LinkId, to_position: Point },
    LinkComplete {
        link_id: LinkId,
        from_node_id: NodeId,
        from_port_id: PortId,
        to_node_id: NodeId,
        to_port_id: PortId,
    },
    LinkCancel { link_id: LinkId },
    LinkMouseEnter { link_id: LinkId },
    LinkMouseLeave { link_id: LinkId },
    LinkClick { link_id: LinkId },
    NodeClick { node_id: NodeId },
    CanvasClick,
    DeleteKey,
    NodeSizeChange { node_id: NodeId, size: Size },
    PortPositionChange { node_id: NodeId, port_id: PortId, position: Point },
    /// A decoded drop; `position` is already in canvas space.
    CanvasDrop { payload: DropPayload, position: Point },
}

impl ChartEvent {
    /// Map a key press on the focused canvas to an event.
    pub fn from_key(key: &str, config: &EditorConfig) -> Option<Self> {
        config.is_delete_key(key).then_some(ChartEvent::DeleteKey)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ChartEvent::DragNode { .. } => "drag_node",
            ChartEvent::DragCanvas { .. } => "drag_canvas",
            ChartEvent::LinkStart { .. } => "link_start",
            ChartEvent::LinkMove { .. } => "link_move",
            ChartEvent::LinkComplete { .. } => "link_complete",
            ChartEvent::LinkCancel { .. } => "link_cancel",
            ChartEvent::LinkMouseEnter { .. } => "link_mouse_enter",
            ChartEvent::LinkMouseLeave { .. } => "link_mouse_leave",
            ChartEvent::LinkClick { .. } => "link_click",
            ChartEvent::NodeClick { .. } => "node_click",
            ChartEvent::CanvasClick => "canvas_click",
            ChartEvent::DeleteKey => "delete_key",
            ChartEvent::NodeSizeChange { .. } => "node_size_change",
            ChartEvent::PortPositionChange { .. } => "port_position_change",
            ChartEvent::CanvasDrop { .. } => "canvas_drop",
        }
    }
}

/// Compute the chart that follows `event`.
pub fn transition(event: &ChartEvent, ids: &mut dyn IdGenerator, chart: &Chart) -> Chart {
    match event {
        ChartEvent::DragNode { node_id, position } => actions::drag_node(node_id, *position, chart),
        ChartEvent::DragCanvas { position } => actions::drag_canvas(*position, chart),
        ChartEvent::LinkStart {
            link_id,
            from_node_id,
            from_port_id,
        } => actions::link_start(link_id, from_node_id, from_port_id, chart),
        ChartEvent::LinkMove { link_id, to_position } => actions::link_move(link_id, *to_position, chart),
        ChartEvent::LinkComplete {
            link_id,
            from_node_id,
            from_port_id,
            to_node_id,
            to_port_id,
        } => actions::link_complete(link_id, from_node_id, from_port_id, to_node_id, to_port_id, chart),
        ChartEvent::LinkCancel { link_id } => actions::link_cancel(link_id, chart),
        ChartEvent::LinkMouseEnter { link_id } => actions::link_mouse_enter(link_id, chart),
        ChartEvent::LinkMouseLeave { link_id } => actions::link_mouse_leave(link_id, chart),
        ChartEvent::LinkClick { link_id } => actions::link_click(link_id, chart),
        ChartEvent::NodeClick { node_id } => actions::node_click(node_id, chart),
        ChartEvent::CanvasClick => actions::canvas_click(chart),
        ChartEvent::DeleteKey => actions::delete_key(chart),
        ChartEvent::NodeSizeChange { node_id, size } => actions::node_size_change(node_id, *size, chart),
        ChartEvent::PortPositionChange {
            node_id,
            port_id,
            position,
        } => actions::port_position_change(node_id, port_id, *position, chart),
        ChartEvent::CanvasDrop { payload, position } => {
            if let Err(e) = payload.validate() {
                log::warn!("canvas_drop: rejected payload: {}", e);
                return chart.clone();
            }
            actions::canvas_drop(payload, *position, ids, chart)
        }
    }
}

/// Owns the chart store and feeds events into it.
#[derive(Debug)]
pub struct Dispatcher<G: IdGenerator = UuidGenerator> {
    store: ChartStore,
    ids: G,
    config: EditorConfig,
}

impl Dispatcher<UuidGenerator> {
    /// Create a dispatcher generating random node ids.
    pub fn new(chart: Chart) -> Self {
        Self::with_generator(chart, UuidGenerator)
    }
}

impl<G: IdGenerator> Dispatcher<G> {
    /// Create a dispatcher with a specific id generator.
    pub fn with_generator(chart: Chart, ids: G) -> Self {
        Self {
            store: ChartStore::new(chart),
            ids,
            config: EditorConfig::default(),
        }
    }

    /// Replace the editor configuration (builder style).
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &ChartStore {
        &self.store
    }

    /// Current chart.
    pub fn chart(&self) -> &Chart {
        self.store.get()
    }

    /// Apply one event.
    pub fn dispatch(&mut self, event: &ChartEvent) -> &Chart {
        log::trace!("dispatch {}", event.name());
        let ids = &mut self.ids;
        self.store.apply(|chart| transition(event, ids, chart))
    }

    /// Apply events in order.
    pub fn dispatch_all<'a, I>(&mut self, events: I) -> &Chart
    where
        I: IntoIterator<Item = &'a ChartEvent>,
    {
        for event in events {
            self.dispatch(event);
        }
        self.store.get()
    }

    /// Handle a key press on the focused canvas. Unbound keys are ignored.
    pub fn key_down(&mut self, key: &str) -> &Chart {
        match ChartEvent::from_key(key, &self.config) {
            Some(event) => self.dispatch(&event),
            None => self.store.get(),
        }
    }

    /// Handle a raw drop: decode the transport string and place the node
    /// under the pointer.
    pub fn drop_at(&mut self, transport: &str, client: Point, viewport_origin: Point) -> ChartResult<&Chart> {
        let payload = DropPayload::from_json(transport)?;
        let position = drop_position(client, self.store.get().offset, viewport_origin);
        Ok(self.dispatch(&ChartEvent::CanvasDrop { payload, position }))
    }

    /// Handle a drop carrying a whole data-transfer map. The payload is read
    /// from the entry under the configured transfer key.
    pub fn drop_from_transfer(
        &mut self,
        transfer: &HashMap<String, String>,
        client: Point,
        viewport_origin: Point,
    ) -> ChartResult<&Chart> {
        let key = &self.config.drop_transfer_key;
        let Some(transport) = transfer.get(key) else {
            return Err(ChartError::InvalidDropPayload(format!("no data under transfer key {key}")));
        };
        self.drop_at(transport, client, viewport_origin)
    }

    /// Take the final chart out of the dispatcher.
    pub fn into_chart(self) -> Chart {
        self.store.into_inner()
    }
}
