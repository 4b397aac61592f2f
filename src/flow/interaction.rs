//! Pointer and keyboard gesture state machine.

use log::debug;

use super::geometry::Point;
use super::graph::{GraphModel, NodeId};
use super::registry::NodeCategory;
use super::viewport::Viewport;

/// What lies under the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
	/// Empty canvas.
	Canvas,
	/// A node outside its ports.
	NodeBody(NodeId),
	/// The top-centre input port.
	InboundPort(NodeId),
	/// The bottom-centre output port.
	OutboundPort(NodeId),
	/// The hit band of a routed edge.
	Edge {
		/// Source node.
		from: NodeId,
		/// Target node.
		to: NodeId,
	},
}

/// The single active gesture. Only one can exist at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionState {
	/// No gesture in progress.
	#[default]
	Idle,
	/// Dragging the background.
	PanningCanvas {
		/// Screen point where the drag began.
		origin: Point,
		/// Pan offset at that moment.
		pan_start: Point,
	},
	/// Dragging a node.
	DraggingNode {
		/// The node being moved.
		node: NodeId,
		/// World-space offset from the node's origin to the grab point.
		anchor: Point,
	},
	/// First click landed on an outbound port; waiting for the second click
	/// on an inbound port.
	DrawingConnection {
		/// Node whose outbound port was clicked.
		source: NodeId,
	},
}

/// Keys the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
	/// Cancels a connection.
	Escape,
	/// Delete or Backspace.
	Delete,
	/// Anything else.
	Other,
}

impl Key {
	/// Map a DOM `KeyboardEvent.key` value.
	pub fn from_dom(key: &str) -> Self {
		match key {
			"Escape" | "Esc" => Key::Escape,
			"Delete" | "Backspace" => Key::Delete,
			_ => Key::Other,
		}
	}
}

/// Turns pointer and key events into graph and viewport mutations.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	state: InteractionState,
	selected: Option<NodeId>,
	/// Last pointer position in world space.
	cursor: Point,
}

impl InteractionController {
	/// Idle, nothing selected.
	pub fn new() -> Self {
		Self::default()
	}

	/// Active gesture.
	pub fn state(&self) -> &InteractionState {
		&self.state
	}

	/// Selected node, if any.
	pub fn selected(&self) -> Option<&NodeId> {
		self.selected.as_ref()
	}

	/// Last pointer position in world space.
	pub fn cursor(&self) -> Point {
		self.cursor
	}

	/// Source node of the connection being drawn, if any.
	pub fn connection_source(&self) -> Option<&NodeId> {
		match &self.state {
			InteractionState::DrawingConnection { source } => Some(source),
			_ => None,
		}
	}

	/// Replace the selection.
	pub fn select(&mut self, node: Option<NodeId>) {
		self.selected = node;
	}

	fn transition(&mut self, next: InteractionState) {
		if self.state != next {
			debug!("interaction {:?} -> {:?}", self.state, next);
		}
		self.state = next;
	}

	/// Pointer pressed over `target` at screen point `screen`.
	pub fn pointer_down(
		&mut self,
		target: HitTarget,
		screen: Point,
		graph: &mut GraphModel,
		viewport: &Viewport,
	) {
		self.cursor = viewport.screen_to_world(screen);

		if let InteractionState::DrawingConnection { source } = &self.state {
			let source = source.clone();
			match target {
				HitTarget::InboundPort(target) if target != source => {
					let label = branch_label(graph, &source);
					if let Err(reason) = graph.add_edge(&source, &target, label) {
						debug!("connection {source} -> {target} rejected: {reason}");
					}
				}
				_ => debug!("connection from {source} cancelled"),
			}
			self.transition(InteractionState::Idle);
			return;
		}

		match target {
			HitTarget::Canvas => {
				self.selected = None;
				self.transition(InteractionState::PanningCanvas {
					origin: screen,
					pan_start: viewport.pan(),
				});
			}
			HitTarget::NodeBody(id) | HitTarget::InboundPort(id) => {
				let Some(node) = graph.get_node(&id) else {
					self.transition(InteractionState::Idle);
					return;
				};
				let anchor = self.cursor - node.position;
				self.selected = Some(id.clone());
				self.transition(InteractionState::DraggingNode { node: id, anchor });
			}
			HitTarget::OutboundPort(id) => {
				self.transition(InteractionState::DrawingConnection { source: id });
			}
			HitTarget::Edge { from, to } => {
				graph.delete_edge(&from, &to);
				self.transition(InteractionState::Idle);
			}
		}
	}

	/// Pointer moved to `screen`.
	pub fn pointer_move(&mut self, screen: Point, graph: &mut GraphModel, viewport: &mut Viewport) {
		match &self.state {
			InteractionState::PanningCanvas { origin, pan_start } => {
				viewport.set_pan(*pan_start + (screen - *origin));
			}
			InteractionState::DraggingNode { node, anchor } => {
				let position = viewport.screen_to_world(screen) - *anchor;
				if !graph.move_node(node, position) {
					self.transition(InteractionState::Idle);
				}
			}
			InteractionState::Idle | InteractionState::DrawingConnection { .. } => {}
		}
		self.cursor = viewport.screen_to_world(screen);
	}

	/// Pointer released. Ends pan and drag; a connection in progress waits for
	/// its second click.
	pub fn pointer_up(&mut self) {
		match self.state {
			InteractionState::PanningCanvas { .. } | InteractionState::DraggingNode { .. } => {
				self.transition(InteractionState::Idle);
			}
			InteractionState::Idle | InteractionState::DrawingConnection { .. } => {}
		}
	}

	/// Pointer left the canvas. Same as [`Self::pointer_up`].
	pub fn pointer_leave(&mut self) {
		self.pointer_up();
	}

	/// Wheel scrolled by `delta_y` (positive scrolls down, zooming out).
	pub fn wheel(&mut self, delta_y: f64, step: f64, viewport: &mut Viewport) {
		if delta_y > 0.0 {
			viewport.adjust_zoom(-step);
		} else if delta_y < 0.0 {
			viewport.adjust_zoom(step);
		}
	}

	/// Escape cancels a connection; Delete removes the selected node while idle.
	pub fn key_down(&mut self, key: Key, graph: &mut GraphModel) {
		match key {
			Key::Escape => {
				if matches!(self.state, InteractionState::DrawingConnection { .. }) {
					debug!("connection cancelled by escape");
					self.transition(InteractionState::Idle);
				}
			}
			Key::Delete => {
				if self.state != InteractionState::Idle {
					return;
				}
				if let Some(id) = self.selected.take() {
					graph.delete_node(&id);
				}
			}
			Key::Other => {}
		}
	}

	/// Forget references to nodes that are gone, e.g. after loading a flow.
	pub fn reset(&mut self) {
		self.selected = None;
		self.transition(InteractionState::Idle);
	}
}

/// Labels the first two edges out of a condition node "Yes" and "No".
fn branch_label(graph: &GraphModel, source: &NodeId) -> Option<String> {
	let node = graph.get_node(source)?;
	if graph.definition(node)?.category != NodeCategory::Condition {
		return None;
	}
	let taken = |label: &str| {
		graph
			.list_edges()
			.iter()
			.any(|e| &e.from == source && e.label.as_deref() == Some(label))
	};
	["Yes", "No"]
		.into_iter()
		.find(|label| !taken(label))
		.map(str::to_owned)
}
