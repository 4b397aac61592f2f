//! Catalog of node types the editor can place.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Closed taxonomy of node types. The category alone decides which ports a
/// node has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
	/// Entry point of a flow.
	Trigger,
	/// A step that does something.
	Action,
	/// A branching step; branches are edge labels.
	Condition,
	/// A delay or wait.
	Timing,
	/// Terminal node.
	End,
}

impl NodeCategory {
	/// All categories, in palette order.
	pub const ALL: [NodeCategory; 5] = [
		NodeCategory::Trigger,
		NodeCategory::Action,
		NodeCategory::Condition,
		NodeCategory::Timing,
		NodeCategory::End,
	];

	/// Whether nodes of this category accept incoming edges.
	pub fn has_inbound_port(self) -> bool {
		match self {
			NodeCategory::Trigger => false,
			NodeCategory::Action
			| NodeCategory::Condition
			| NodeCategory::Timing
			| NodeCategory::End => true,
		}
	}

	/// Whether nodes of this category may start edges.
	pub fn has_outbound_port(self) -> bool {
		match self {
			NodeCategory::End => false,
			NodeCategory::Trigger
			| NodeCategory::Action
			| NodeCategory::Condition
			| NodeCategory::Timing => true,
		}
	}

	/// Human readable heading used by the palette.
	pub fn label(self) -> &'static str {
		match self {
			NodeCategory::Trigger => "Triggers",
			NodeCategory::Action => "Actions",
			NodeCategory::Condition => "Conditions",
			NodeCategory::Timing => "Timing",
			NodeCategory::End => "End",
		}
	}
}

/// Display metadata for one node type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeTypeDefinition {
	/// Stable id stored in flow documents.
	pub type_id: String,
	/// Decides the node's ports.
	pub category: NodeCategory,
	/// Palette and node title.
	pub label: String,
	/// Tooltip text.
	pub description: String,
	/// Theme colour name, resolved by the renderer.
	pub color_token: String,
}

impl NodeTypeDefinition {
	/// Build a definition from borrowed strings.
	pub fn new(
		type_id: &str,
		category: NodeCategory,
		label: &str,
		description: &str,
		color_token: &str,
	) -> Self {
		Self {
			type_id: type_id.into(),
			category,
			label: label.into(),
			description: description.into(),
			color_token: color_token.into(),
		}
	}
}

/// Read-only lookup from type id to [`NodeTypeDefinition`].
///
/// Built once and shared by reference; there is no way to mutate a registry
/// after construction.
#[derive(Clone, Debug, Default)]
pub struct NodeTypeRegistry {
	definitions: Vec<NodeTypeDefinition>,
	by_id: HashMap<String, usize>,
}

impl NodeTypeRegistry {
	/// Build a registry from a fixed table. Later entries with an already seen
	/// type id are ignored.
	pub fn new(table: impl IntoIterator<Item = NodeTypeDefinition>) -> Self {
		let mut definitions = Vec::new();
		let mut by_id = HashMap::new();
		for def in table {
			if by_id.contains_key(&def.type_id) {
				continue;
			}
			by_id.insert(def.type_id.clone(), definitions.len());
			definitions.push(def);
		}
		Self { definitions, by_id }
	}

	/// The node types shipped with the dashboard.
	pub fn builtin() -> Self {
		use NodeCategory::*;
		Self::new([
			NodeTypeDefinition::new(
				"trigger_message",
				Trigger,
				"Incoming Message",
				"Starts when a contact sends a message",
				"emerald",
			),
			NodeTypeDefinition::new(
				"trigger_keyword",
				Trigger,
				"Keyword Match",
				"Starts when a message contains a keyword",
				"emerald",
			),
			NodeTypeDefinition::new(
				"trigger_form",
				Trigger,
				"Form Submitted",
				"Starts when a registration form is submitted",
				"emerald",
			),
			NodeTypeDefinition::new("action_sms", Action, "Send SMS", "Send a text message", "blue"),
			NodeTypeDefinition::new(
				"action_email",
				Action,
				"Send Email",
				"Send an email to the contact",
				"blue",
			),
			NodeTypeDefinition::new(
				"action_assign_campaign",
				Action,
				"Assign Campaign",
				"Enrol the contact in a campaign",
				"indigo",
			),
			NodeTypeDefinition::new(
				"action_tag_contact",
				Action,
				"Tag Contact",
				"Add a tag to the contact",
				"indigo",
			),
			NodeTypeDefinition::new(
				"action_webhook",
				Action,
				"Call Webhook",
				"POST the contact to an external URL",
				"slate",
			),
			NodeTypeDefinition::new(
				"condition_if",
				Condition,
				"If / Else",
				"Branch on a contact field",
				"amber",
			),
			NodeTypeDefinition::new(
				"condition_split",
				Condition,
				"A/B Split",
				"Split contacts by percentage",
				"amber",
			),
			NodeTypeDefinition::new(
				"timing_delay",
				Timing,
				"Delay",
				"Wait for a fixed duration",
				"violet",
			),
			NodeTypeDefinition::new(
				"timing_wait_until",
				Timing,
				"Wait Until",
				"Wait until a date or time of day",
				"violet",
			),
			NodeTypeDefinition::new("end_flow", End, "End Flow", "Stop the automation", "rose"),
		])
	}

	/// Resolve a type id.
	pub fn lookup(&self, type_id: &str) -> Option<&NodeTypeDefinition> {
		self.by_id.get(type_id).map(|&idx| &self.definitions[idx])
	}

	/// Category of a type id, if it is registered.
	pub fn category(&self, type_id: &str) -> Option<NodeCategory> {
		self.lookup(type_id).map(|def| def.category)
	}

	/// Every definition in table order.
	pub fn definitions(&self) -> &[NodeTypeDefinition] {
		&self.definitions
	}

	/// Definitions of one category, in table order.
	pub fn by_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeTypeDefinition> {
		self.definitions
			.iter()
			.filter(move |def| def.category == category)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn port_cardinality_follows_category() {
		assert!(!NodeCategory::Trigger.has_inbound_port());
		assert!(NodeCategory::Trigger.has_outbound_port());
		assert!(NodeCategory::End.has_inbound_port());
		assert!(!NodeCategory::End.has_outbound_port());
		for cat in [NodeCategory::Action, NodeCategory::Condition, NodeCategory::Timing] {
			assert!(cat.has_inbound_port());
			assert!(cat.has_outbound_port());
		}
	}

	#[test]
	fn builtin_resolves_known_types() {
		let registry = NodeTypeRegistry::builtin();
		assert_eq!(registry.category("trigger_message"), Some(NodeCategory::Trigger));
		assert_eq!(registry.category("action_sms"), Some(NodeCategory::Action));
		assert_eq!(registry.category("condition_if"), Some(NodeCategory::Condition));
		assert_eq!(registry.category("end_flow"), Some(NodeCategory::End));
		assert!(registry.lookup("retired_type").is_none());
	}

	#[test]
	fn first_definition_wins_on_duplicate_ids() {
		let registry = NodeTypeRegistry::new([
			NodeTypeDefinition::new("x", NodeCategory::Action, "First", "", "blue"),
			NodeTypeDefinition::new("x", NodeCategory::End, "Second", "", "rose"),
		]);
		assert_eq!(registry.definitions().len(), 1);
		assert_eq!(registry.lookup("x").map(|d| d.label.as_str()), Some("First"));
	}

	#[test]
	fn every_category_has_a_builtin_type() {
		let registry = NodeTypeRegistry::builtin();
		for cat in NodeCategory::ALL {
			assert!(registry.by_category(cat).next().is_some(), "{cat:?}");
		}
	}

	#[test]
	fn palette_sections_keep_table_order() {
		let registry = NodeTypeRegistry::builtin();
		let triggers: Vec<_> = registry
			.by_category(NodeCategory::Trigger)
			.map(|d| d.type_id.as_str())
			.collect();
		assert_eq!(triggers, ["trigger_message", "trigger_keyword", "trigger_form"]);
		let total: usize = NodeCategory::ALL
			.into_iter()
			.map(|cat| registry.by_category(cat).count())
			.sum();
		assert_eq!(total, registry.definitions().len());
	}
}
