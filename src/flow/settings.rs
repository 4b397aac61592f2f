//! Tunables for the editor core.

use serde::{Deserialize, Serialize};

use super::geometry::NodeSize;

/// Editor configuration, injected into [`FlowEditor`](super::FlowEditor) at
/// construction.
///
/// Lengths are in world units unless noted otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
	/// Lowest zoom factor. Unusable bounds fall back to `[0.3, 2.0]`.
	pub min_zoom: f64,
	/// Highest zoom factor.
	pub max_zoom: f64,
	/// Zoom change per wheel notch.
	pub zoom_step: f64,
	/// Rendered node box.
	pub node_size: NodeSize,
	/// Click radius around a port anchor.
	pub port_hit_radius: f64,
	/// Half-width of the band around an edge that counts as a click on it.
	pub edge_hit_tolerance: f64,
	/// Arrowhead length.
	pub arrow_size: f64,
	/// Distance from the top of the canvas (screen px) where placement starts.
	pub placement_top_margin: f64,
	/// Vertical step between consecutively placed nodes.
	pub placement_spacing: f64,
}

impl Default for EditorSettings {
	fn default() -> Self {
		Self {
			min_zoom: 0.3,
			max_zoom: 2.0,
			zoom_step: 0.1,
			node_size: NodeSize {
				width: 200.0,
				height: 72.0,
			},
			port_hit_radius: 10.0,
			edge_hit_tolerance: 8.0,
			arrow_size: 8.0,
			placement_top_margin: 60.0,
			placement_spacing: 120.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_falls_back_to_defaults() {
		let settings: EditorSettings = serde_json::from_str(r#"{"max_zoom": 3.0}"#).unwrap();
		assert_eq!(settings.max_zoom, 3.0);
		assert_eq!(settings.min_zoom, 0.3);
		assert_eq!(settings.node_size.width, 200.0);
	}
}
