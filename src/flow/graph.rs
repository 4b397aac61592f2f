//! Authoritative store of nodes and edges.

use std::fmt;
use std::rc::Rc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::error::{EdgeRejection, FlowError};
use super::geometry::Point;
use super::registry::{NodeCategory, NodeTypeDefinition, NodeTypeRegistry};

/// Opaque per-node configuration. Key order is preserved.
pub type NodeConfig = serde_json::Map<String, serde_json::Value>;

/// Identifier of a node, unique within one graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
	/// Borrow the raw id.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		NodeId(s.to_owned())
	}
}

/// A placed workflow step. `type_id` is fixed after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Graph-unique id.
	pub id: NodeId,
	type_id: String,
	/// World position of the top-left corner.
	pub position: Point,
	/// Type-specific settings.
	pub config: NodeConfig,
}

impl Node {
	/// Registry type of this node.
	pub fn type_id(&self) -> &str {
		&self.type_id
	}
}

/// A directed connection between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Source node.
	pub from: NodeId,
	/// Target node.
	pub to: NodeId,
	/// Decorative branch label, e.g. "Yes"/"No" on condition nodes.
	pub label: Option<String>,
}

impl Edge {
	/// Whether this edge touches `id` at either end.
	pub fn touches(&self, id: &NodeId) -> bool {
		&self.from == id || &self.to == id
	}
}

/// Nodes and edges of one flow, with the topology invariants enforced on
/// every mutation:
///
/// - edges only reference nodes present in the graph;
/// - no self-loops and no two edges with the same `(from, to)` pair;
/// - `end` nodes never start an edge, `trigger` nodes never end one;
/// - deleting a node deletes its edges.
///
/// Each mutation either fully applies or leaves the graph untouched.
#[derive(Clone, Debug)]
pub struct GraphModel {
	registry: Rc<NodeTypeRegistry>,
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_id: u64,
}

impl GraphModel {
	/// Empty graph resolving types through `registry`.
	pub fn new(registry: Rc<NodeTypeRegistry>) -> Self {
		Self {
			registry,
			nodes: Vec::new(),
			edges: Vec::new(),
			next_id: 1,
		}
	}

	/// The type registry this graph validates against.
	pub fn registry(&self) -> &NodeTypeRegistry {
		&self.registry
	}

	/// Definition of a node's type, if it still resolves.
	pub fn definition(&self, node: &Node) -> Option<&NodeTypeDefinition> {
		self.registry.lookup(&node.type_id)
	}

	fn category_of(&self, id: &NodeId) -> Option<NodeCategory> {
		self.get_node(id)
			.and_then(|node| self.registry.category(&node.type_id))
	}

	fn fresh_id(&mut self) -> NodeId {
		loop {
			let id = NodeId(format!("node_{}", self.next_id));
			self.next_id += 1;
			if self.get_node(&id).is_none() {
				return id;
			}
		}
	}

	/// Place a node of `type_id` at `position` with an empty config.
	pub fn add_node(&mut self, type_id: &str, position: Point) -> Result<NodeId, FlowError> {
		let id = self.fresh_id();
		self.insert_node(id.clone(), type_id, position, NodeConfig::new())?;
		Ok(id)
	}

	/// Insert a node with a caller-chosen id, as when loading a saved flow.
	/// Returns `false` if the id is taken.
	pub(crate) fn insert_node(
		&mut self,
		id: NodeId,
		type_id: &str,
		position: Point,
		config: NodeConfig,
	) -> Result<bool, FlowError> {
		if self.registry.lookup(type_id).is_none() {
			return Err(FlowError::UnknownNodeType(type_id.to_owned()));
		}
		if self.get_node(&id).is_some() {
			return Ok(false);
		}
		info!("added node {id} ({type_id})");
		self.nodes.push(Node {
			id,
			type_id: type_id.to_owned(),
			position,
			config,
		});
		Ok(true)
	}

	/// Returns `false` if no such node exists.
	pub fn move_node(&mut self, id: &NodeId, position: Point) -> bool {
		match self.nodes.iter_mut().find(|n| &n.id == id) {
			Some(node) => {
				node.position = position;
				true
			}
			None => false,
		}
	}

	/// Remove a node and every edge touching it.
	pub fn delete_node(&mut self, id: &NodeId) -> Option<Node> {
		let idx = self.nodes.iter().position(|n| &n.id == id)?;
		let node = self.nodes.remove(idx);
		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		info!(
			"deleted node {id} and {} incident edge(s)",
			before - self.edges.len()
		);
		Some(node)
	}

	/// Connect `from` to `to` if every topology rule allows it.
	pub fn add_edge(
		&mut self,
		from: &NodeId,
		to: &NodeId,
		label: Option<String>,
	) -> Result<(), EdgeRejection> {
		if from == to {
			return Err(EdgeRejection::SelfLoop);
		}
		let (Some(from_cat), Some(to_cat)) = (self.category_of(from), self.category_of(to)) else {
			return Err(EdgeRejection::UnknownEndpoint);
		};
		if !to_cat.has_inbound_port() {
			return Err(EdgeRejection::TargetHasNoInboundPort);
		}
		if !from_cat.has_outbound_port() {
			return Err(EdgeRejection::SourceHasNoOutboundPort);
		}
		if self.find_edge(from, to).is_some() {
			debug!("ignoring duplicate edge {from} -> {to}");
			return Err(EdgeRejection::DuplicateEdge);
		}
		info!("added edge {from} -> {to}");
		self.edges.push(Edge {
			from: from.clone(),
			to: to.clone(),
			label,
		});
		Ok(())
	}

	/// Returns `false` if there was no such edge.
	pub fn delete_edge(&mut self, from: &NodeId, to: &NodeId) -> bool {
		let before = self.edges.len();
		self.edges.retain(|e| !(&e.from == from && &e.to == to));
		let removed = self.edges.len() != before;
		if removed {
			info!("deleted edge {from} -> {to}");
		}
		removed
	}

	/// Merge `patch` into a node's config; keys in `patch` overwrite.
	pub fn update_node_config(&mut self, id: &NodeId, patch: NodeConfig) -> bool {
		let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) else {
			return false;
		};
		for (key, value) in patch {
			node.config.insert(key, value);
		}
		true
	}

	/// Nodes in insertion order; later nodes draw on top.
	pub fn list_nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn list_edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Look up a node by id.
	pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| &n.id == id)
	}

	/// The edge `from -> to`, if present.
	pub fn find_edge(&self, from: &NodeId, to: &NodeId) -> Option<&Edge> {
		self.edges.iter().find(|e| &e.from == from && &e.to == to)
	}

	/// Drop every node and edge.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph() -> GraphModel {
		GraphModel::new(Rc::new(NodeTypeRegistry::builtin()))
	}

	fn add(g: &mut GraphModel, type_id: &str) -> NodeId {
		g.add_node(type_id, Point::default()).unwrap()
	}

	#[test]
	fn add_node_rejects_unknown_type() {
		let mut g = graph();
		assert!(matches!(
			g.add_node("nope", Point::default()),
			Err(FlowError::UnknownNodeType(t)) if t == "nope"
		));
		assert!(g.list_nodes().is_empty());
	}

	#[test]
	fn ids_are_unique() {
		let mut g = graph();
		let a = add(&mut g, "action_sms");
		let b = add(&mut g, "action_sms");
		assert_ne!(a, b);
	}

	#[test]
	fn fresh_ids_skip_loaded_ids() {
		let mut g = graph();
		g.insert_node("node_1".into(), "action_sms", Point::default(), NodeConfig::new())
			.unwrap();
		let id = add(&mut g, "action_sms");
		assert_eq!(id.as_str(), "node_2");
	}

	#[test]
	fn self_loop_rejected_even_for_unknown_ids() {
		let mut g = graph();
		let ghost = NodeId::from("ghost");
		assert_eq!(g.add_edge(&ghost, &ghost, None), Err(EdgeRejection::SelfLoop));
	}

	#[test]
	fn rejects_unknown_endpoint() {
		let mut g = graph();
		let a = add(&mut g, "action_sms");
		assert_eq!(
			g.add_edge(&a, &NodeId::from("ghost"), None),
			Err(EdgeRejection::UnknownEndpoint)
		);
	}

	#[test]
	fn end_node_has_no_outbound_port() {
		let mut g = graph();
		let end = add(&mut g, "end_flow");
		let sms = add(&mut g, "action_sms");
		assert_eq!(
			g.add_edge(&end, &sms, None),
			Err(EdgeRejection::SourceHasNoOutboundPort)
		);
		assert!(g.list_edges().is_empty());
	}

	#[test]
	fn delete_edge_reports_presence() {
		let mut g = graph();
		let a = add(&mut g, "trigger_message");
		let b = add(&mut g, "action_sms");
		g.add_edge(&a, &b, None).unwrap();
		assert!(!g.delete_edge(&b, &a));
		assert!(g.delete_edge(&a, &b));
		assert!(g.list_edges().is_empty());
	}

	#[test]
	fn config_patch_merges_in_order() {
		let mut g = graph();
		let a = add(&mut g, "action_sms");
		let mut patch = NodeConfig::new();
		patch.insert("message".into(), "hi".into());
		patch.insert("sender".into(), "ACME".into());
		assert!(g.update_node_config(&a, patch));

		let mut patch = NodeConfig::new();
		patch.insert("message".into(), "hello".into());
		assert!(g.update_node_config(&a, patch));

		let config = &g.get_node(&a).unwrap().config;
		let keys: Vec<_> = config.keys().map(String::as_str).collect();
		assert_eq!(keys, ["message", "sender"]);
		assert_eq!(config["message"], "hello");
		assert!(!g.update_node_config(&NodeId::from("ghost"), NodeConfig::new()));
	}

	#[test]
	fn move_node_only_touches_position() {
		let mut g = graph();
		let a = add(&mut g, "timing_delay");
		assert!(g.move_node(&a, Point::new(5.0, 6.0)));
		let node = g.get_node(&a).unwrap();
		assert_eq!(node.position, Point::new(5.0, 6.0));
		assert_eq!(node.type_id(), "timing_delay");
		assert!(!g.move_node(&NodeId::from("ghost"), Point::default()));
	}
}
