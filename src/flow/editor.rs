//! Editor state: graph, viewport and gesture controller behind one handle.

use std::rc::Rc;

use log::{info, warn};

use super::document::{Flow, FlowConnection, FlowNode, FlowStatus};
use super::error::FlowError;
use super::geometry::Point;
use super::graph::{Edge, GraphModel, NodeId};
use super::interaction::{HitTarget, InteractionController, Key};
use super::properties::{self, ConfigEdit, PropertySheet};
use super::registry::NodeTypeRegistry;
use super::router::{ConnectionRouter, Route};
use super::settings::EditorSettings;
use super::viewport::Viewport;

/// One open flow in the editor.
pub struct FlowEditor {
	settings: EditorSettings,
	graph: GraphModel,
	viewport: Viewport,
	controller: InteractionController,
	router: ConnectionRouter,
	flow_id: String,
	flow_name: String,
	status: FlowStatus,
	/// Canvas size in screen pixels.
	canvas: Point,
}

impl FlowEditor {
	/// Empty editor resolving node types through `registry`.
	pub fn new(registry: Rc<NodeTypeRegistry>, settings: EditorSettings) -> Self {
		let router = ConnectionRouter {
			node_size: settings.node_size,
			hit_tolerance: settings.edge_hit_tolerance,
			arrow_size: settings.arrow_size,
		};
		Self {
			graph: GraphModel::new(registry),
			viewport: Viewport::new(settings.min_zoom, settings.max_zoom),
			controller: InteractionController::new(),
			router,
			settings,
			flow_id: String::new(),
			flow_name: String::new(),
			status: FlowStatus::Draft,
			canvas: Point::new(800.0, 600.0),
		}
	}

	/// Settings the editor was built with.
	pub fn settings(&self) -> &EditorSettings {
		&self.settings
	}

	/// The node/edge model.
	pub fn graph(&self) -> &GraphModel {
		&self.graph
	}

	/// Mutable access to the model, bypassing gesture handling.
	pub fn graph_mut(&mut self) -> &mut GraphModel {
		&mut self.graph
	}

	/// Current pan and zoom.
	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	/// Mutable viewport.
	pub fn viewport_mut(&mut self) -> &mut Viewport {
		&mut self.viewport
	}

	/// Gesture state and selection.
	pub fn controller(&self) -> &InteractionController {
		&self.controller
	}

	/// Edge router configured from the settings.
	pub fn router(&self) -> &ConnectionRouter {
		&self.router
	}

	/// Display name of the loaded flow.
	pub fn name(&self) -> &str {
		&self.flow_name
	}

	/// Lifecycle status of the loaded flow.
	pub fn status(&self) -> FlowStatus {
		self.status
	}

	/// Change the status written by the next [`Self::save`].
	pub fn set_status(&mut self, status: FlowStatus) {
		self.status = status;
	}

	/// Canvas size in screen pixels.
	pub fn canvas_size(&self) -> Point {
		self.canvas
	}

	/// Record a new canvas size; placement centres on it.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.canvas = Point::new(width, height);
	}

	/// Resolve what is under a screen point. Ports win over bodies, bodies
	/// over edges, and later nodes over earlier ones.
	pub fn hit_test(&self, screen: Point) -> HitTarget {
		let world = self.viewport.screen_to_world(screen);
		let size = self.settings.node_size;
		let radius = self.settings.port_hit_radius;

		for node in self.graph.list_nodes().iter().rev() {
			let Some(def) = self.graph.definition(node) else {
				continue;
			};
			if def.category.has_outbound_port()
				&& world.distance(size.outbound_anchor(node.position)) <= radius
			{
				return HitTarget::OutboundPort(node.id.clone());
			}
			if def.category.has_inbound_port()
				&& world.distance(size.inbound_anchor(node.position)) <= radius
			{
				return HitTarget::InboundPort(node.id.clone());
			}
		}

		for node in self.graph.list_nodes().iter().rev() {
			if self.graph.definition(node).is_some() && size.contains(node.position, world) {
				return HitTarget::NodeBody(node.id.clone());
			}
		}

		for (edge, route) in self.routes() {
			if route.hit(world) {
				return HitTarget::Edge {
					from: edge.from.clone(),
					to: edge.to.clone(),
				};
			}
		}

		HitTarget::Canvas
	}

	/// Routes for every drawable edge. Edges with a missing endpoint or an
	/// endpoint of an unregistered type are skipped.
	pub fn routes(&self) -> impl Iterator<Item = (&Edge, Route)> + '_ {
		self.graph.list_edges().iter().filter_map(|edge| {
			let from = self.graph.get_node(&edge.from)?;
			let to = self.graph.get_node(&edge.to)?;
			self.graph.definition(from)?;
			self.graph.definition(to)?;
			Some((edge, self.router.route(from.position, to.position)))
		})
	}

	/// Rubber-band curve from the connection source to the cursor.
	pub fn preview_route(&self) -> Option<Route> {
		let source = self.graph.get_node(self.controller.connection_source()?)?;
		let start = self.settings.node_size.outbound_anchor(source.position);
		Some(self.router.route_points(start, self.controller.cursor()))
	}

	/// Primary button pressed at `screen`.
	pub fn pointer_down(&mut self, screen: Point) {
		let target = self.hit_test(screen);
		self.controller
			.pointer_down(target, screen, &mut self.graph, &self.viewport);
	}

	/// Pointer moved to `screen`.
	pub fn pointer_move(&mut self, screen: Point) {
		self.controller
			.pointer_move(screen, &mut self.graph, &mut self.viewport);
	}

	/// Primary button released.
	pub fn pointer_up(&mut self) {
		self.controller.pointer_up();
	}

	/// Pointer left the canvas.
	pub fn pointer_leave(&mut self) {
		self.controller.pointer_leave();
	}

	/// Wheel notch; negative `delta_y` zooms in.
	pub fn wheel(&mut self, delta_y: f64) {
		self.controller
			.wheel(delta_y, self.settings.zoom_step, &mut self.viewport);
	}

	/// Key pressed, given by its DOM `key` name.
	pub fn key_down(&mut self, key: &str) {
		self.controller.key_down(Key::from_dom(key), &mut self.graph);
	}

	/// Add a node at the default placement for the current view and select it.
	pub fn add_node(&mut self, type_id: &str) -> Result<NodeId, FlowError> {
		let position = self.viewport.default_node_position(
			self.canvas,
			self.settings.node_size.width,
			self.settings.placement_top_margin,
			self.settings.placement_spacing,
			self.graph.list_nodes().len(),
		);
		let id = self.graph.add_node(type_id, position)?;
		self.controller.select(Some(id.clone()));
		Ok(id)
	}

	/// Delete the selected node, if any.
	pub fn delete_selected(&mut self) {
		self.controller.key_down(Key::Delete, &mut self.graph);
	}

	/// Config snapshot of the selected node.
	pub fn properties(&self) -> Option<PropertySheet> {
		properties::read(&self.graph, self.controller.selected())
	}

	/// Write one config field back. `false` if the node is gone.
	pub fn apply_edit(&mut self, edit: ConfigEdit) -> bool {
		properties::write(&mut self.graph, edit)
	}

	/// Replace the graph with `flow`. Unknown types, duplicate node ids and
	/// connections that break a topology rule are dropped.
	pub fn load(&mut self, flow: &Flow) {
		self.graph.clear();
		self.controller.reset();
		self.flow_id = flow.id.clone();
		self.flow_name = flow.name.clone();
		self.status = flow.status;

		for node in &flow.nodes {
			let id = NodeId(node.id.clone());
			match self.graph.insert_node(
				id,
				&node.type_id,
				Point::new(node.x, node.y),
				node.config.clone(),
			) {
				Ok(true) => {}
				Ok(false) => warn!("dropping duplicate node id {}", node.id),
				Err(err) => warn!("dropping node {}: {err}", node.id),
			}
		}

		for conn in &flow.connections {
			let (from, to) = (NodeId(conn.from.clone()), NodeId(conn.to.clone()));
			if let Err(reason) = self.graph.add_edge(&from, &to, conn.label.clone()) {
				warn!("dropping connection {from} -> {to}: {reason}");
			}
		}

		info!(
			"loaded flow {} with {} node(s) and {} connection(s)",
			self.flow_id,
			self.graph.list_nodes().len(),
			self.graph.list_edges().len()
		);
	}

	/// Serialize the current graph.
	pub fn save(&self) -> Flow {
		Flow {
			id: self.flow_id.clone(),
			name: self.flow_name.clone(),
			status: self.status,
			nodes: self
				.graph
				.list_nodes()
				.iter()
				.map(|n| FlowNode {
					id: n.id.0.clone(),
					type_id: n.type_id().to_owned(),
					x: n.position.x,
					y: n.position.y,
					config: n.config.clone(),
				})
				.collect(),
			connections: self
				.graph
				.list_edges()
				.iter()
				.map(|e| FlowConnection {
					from: e.from.0.clone(),
					to: e.to.0.clone(),
					label: e.label.clone(),
				})
				.collect(),
		}
	}
}
