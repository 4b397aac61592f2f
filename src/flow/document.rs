//! Persisted flow format.

use serde::{Deserialize, Serialize};

use super::error::FlowError;
use super::graph::NodeConfig;

/// Lifecycle state of a saved flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
	/// Being edited, not running.
	#[default]
	Draft,
	/// Live.
	Active,
	/// Stopped, may resume.
	Paused,
}

/// A node as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
	/// Node id, unique within the flow.
	pub id: String,
	/// Registry type, stored under `"type"`.
	#[serde(rename = "type")]
	pub type_id: String,
	/// World x of the top-left corner.
	pub x: f64,
	/// World y of the top-left corner.
	pub y: f64,
	/// Opaque settings, kept in key order.
	#[serde(default)]
	pub config: NodeConfig,
}

/// An edge as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowConnection {
	/// Source node id.
	pub from: String,
	/// Target node id.
	pub to: String,
	/// Branch label, omitted when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

/// A saved automation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
	/// Flow id.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Lifecycle status; `draft` when missing.
	#[serde(default)]
	pub status: FlowStatus,
	/// Nodes in creation order.
	#[serde(default)]
	pub nodes: Vec<FlowNode>,
	/// Edges in creation order.
	#[serde(default)]
	pub connections: Vec<FlowConnection>,
}

impl Flow {
	/// An empty draft.
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			..Self::default()
		}
	}

	/// Parse a stored flow.
	pub fn from_json(json: &str) -> Result<Self, FlowError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Indented JSON for export.
	pub fn to_json_pretty(&self) -> Result<String, FlowError> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_saved_shape() {
		let flow = Flow::from_json(
			r#"{
				"id": "f1",
				"name": "Welcome",
				"status": "active",
				"nodes": [
					{"id": "n1", "type": "trigger_message", "x": 400, "y": 60, "config": {"keyword": "JOIN"}},
					{"id": "n2", "type": "action_sms", "x": 400, "y": 180, "config": {}}
				],
				"connections": [{"from": "n1", "to": "n2"}]
			}"#,
		)
		.unwrap();
		assert_eq!(flow.status, FlowStatus::Active);
		assert_eq!(flow.nodes[0].type_id, "trigger_message");
		assert_eq!(flow.nodes[0].config["keyword"], "JOIN");
		assert_eq!(
			flow.connections,
			vec![FlowConnection {
				from: "n1".into(),
				to: "n2".into(),
				label: None,
			}]
		);
	}

	#[test]
	fn label_is_omitted_when_absent() {
		let mut flow = Flow::new("f", "F");
		flow.connections.push(FlowConnection {
			from: "a".into(),
			to: "b".into(),
			label: None,
		});
		let json = flow.to_json_pretty().unwrap();
		assert!(!json.contains("label"));
		assert!(json.contains(r#""status": "draft""#));
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(matches!(Flow::from_json("{"), Err(FlowError::Json(_))));
	}
}
