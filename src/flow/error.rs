//! Error types for the flow editor core.

use thiserror::Error;

/// Why [`GraphModel::add_edge`](super::GraphModel::add_edge) refused an edge.
///
/// These are never shown to the user; the drawing gesture just ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EdgeRejection {
	/// Source and target are the same node.
	#[error("a node cannot connect to itself")]
	SelfLoop,

	/// The same `(from, to)` pair already exists.
	#[error("edge already exists")]
	DuplicateEdge,

	/// The source node's category has no outbound port.
	#[error("source node has no outbound port")]
	SourceHasNoOutboundPort,

	/// The target node's category has no inbound port.
	#[error("target node has no inbound port")]
	TargetHasNoInboundPort,

	/// One of the endpoints is not in the graph.
	#[error("edge references an unknown node")]
	UnknownEndpoint,
}

/// Errors from loading, saving or building flows.
#[derive(Debug, Error)]
pub enum FlowError {
	/// The node type is not in the registry.
	#[error("unknown node type: {0}")]
	UnknownNodeType(String),

	/// The flow document could not be (de)serialized.
	#[error("invalid flow document: {0}")]
	Json(#[from] serde_json::Error),
}
