//! Bridge between the selected node's config and an external form.
//!
//! The form only ever sees a [`PropertySheet`] snapshot and sends back
//! [`ConfigEdit`]s; writes go through [`GraphModel::update_node_config`].

use serde_json::Value;

use super::graph::{GraphModel, NodeConfig, NodeId};
use super::registry::NodeCategory;

/// Snapshot of one node's config for display.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertySheet {
	/// Node the sheet was read from.
	pub node: NodeId,
	/// Registry label of the node's type.
	pub type_label: String,
	/// Category of the node's type.
	pub category: NodeCategory,
	/// Config fields in stored order.
	pub entries: Vec<(String, Value)>,
}

/// One field change coming back from the form.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigEdit {
	/// Node to update.
	pub node: NodeId,
	/// Config field name.
	pub key: String,
	/// New value; replaces any existing one.
	pub value: Value,
}

impl ConfigEdit {
	/// Set `key` to `value` on `node`.
	pub fn new(node: NodeId, key: impl Into<String>, value: impl Into<Value>) -> Self {
		Self {
			node,
			key: key.into(),
			value: value.into(),
		}
	}
}

/// Build a sheet for `selected`. `None` if nothing is selected, the node is
/// gone, or its type no longer resolves.
pub fn read(graph: &GraphModel, selected: Option<&NodeId>) -> Option<PropertySheet> {
	let node = graph.get_node(selected?)?;
	let def = graph.definition(node)?;
	Some(PropertySheet {
		node: node.id.clone(),
		type_label: def.label.clone(),
		category: def.category,
		entries: node
			.config
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect(),
	})
}

/// Apply one edit. Returns `false` if the node no longer exists.
pub fn write(graph: &mut GraphModel, edit: ConfigEdit) -> bool {
	let mut patch = NodeConfig::new();
	patch.insert(edit.key, edit.value);
	graph.update_node_config(&edit.node, patch)
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::flow::geometry::Point;
	use crate::flow::registry::NodeTypeRegistry;

	#[test]
	fn edits_round_through_the_graph() {
		let mut graph = GraphModel::new(Rc::new(NodeTypeRegistry::builtin()));
		let id = graph.add_node("timing_delay", Point::default()).unwrap();

		assert!(read(&graph, None).is_none());
		assert!(write(&mut graph, ConfigEdit::new(id.clone(), "duration", 5)));
		assert!(write(&mut graph, ConfigEdit::new(id.clone(), "unit", "minutes")));

		let sheet = read(&graph, Some(&id)).unwrap();
		assert_eq!(sheet.type_label, "Delay");
		assert_eq!(sheet.category, NodeCategory::Timing);
		assert_eq!(
			sheet.entries,
			vec![
				("duration".to_string(), Value::from(5)),
				("unit".to_string(), Value::from("minutes")),
			]
		);
		assert_eq!(graph.get_node(&id).unwrap().position, Point::default());
	}

	#[test]
	fn edits_to_missing_nodes_are_ignored() {
		let mut graph = GraphModel::new(Rc::new(NodeTypeRegistry::builtin()));
		assert!(!write(&mut graph, ConfigEdit::new("ghost".into(), "k", "v")));
		assert!(read(&graph, Some(&NodeId::from("ghost"))).is_none());
	}
}
