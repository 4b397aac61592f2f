use leptos::prelude::*;
use serde_json::json;

use crate::components::flow_canvas::FlowEditorCanvas;
use crate::flow::{Flow, FlowConnection, FlowNode, FlowStatus};

fn node(id: &str, type_id: &str, x: f64, y: f64, config: serde_json::Value) -> FlowNode {
	FlowNode {
		id: id.into(),
		type_id: type_id.into(),
		x,
		y,
		config: match config {
			serde_json::Value::Object(map) => map,
			_ => Default::default(),
		},
	}
}

fn connect(from: &str, to: &str, label: Option<&str>) -> FlowConnection {
	FlowConnection {
		from: from.into(),
		to: to.into(),
		label: label.map(Into::into),
	}
}

/// A small welcome automation to start from.
fn sample_flow() -> Flow {
	Flow {
		id: "flow_welcome".into(),
		name: "New Subscriber Welcome".into(),
		status: FlowStatus::Draft,
		nodes: vec![
			node("n1", "trigger_keyword", 400.0, 60.0, json!({ "keyword": "JOIN" })),
			node(
				"n2",
				"action_sms",
				400.0,
				180.0,
				json!({ "message": "Thanks for joining!" }),
			),
			node("n3", "timing_delay", 400.0, 300.0, json!({ "duration": 1, "unit": "days" })),
			node(
				"n4",
				"condition_if",
				400.0,
				420.0,
				json!({ "field": "opened_link", "equals": true }),
			),
			node(
				"n5",
				"action_assign_campaign",
				250.0,
				560.0,
				json!({ "campaign": "Spring Promo" }),
			),
			node(
				"n6",
				"action_email",
				550.0,
				560.0,
				json!({ "subject": "Did you miss this?" }),
			),
			node("n7", "end_flow", 400.0, 700.0, json!({})),
		],
		connections: vec![
			connect("n1", "n2", None),
			connect("n2", "n3", None),
			connect("n3", "n4", None),
			connect("n4", "n5", Some("Yes")),
			connect("n4", "n6", Some("No")),
			connect("n5", "n7", None),
			connect("n6", "n7", None),
		],
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let flow = Signal::derive(sample_flow);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-editor">
				<FlowEditorCanvas flow=flow />
				<div class="editor-hint">
					<p class="subtitle">
						"Drag nodes to move them. Click an output port, then an input port to connect. Click an edge to remove it. Scroll to zoom, drag the background to pan."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use super::*;
	use crate::flow::{EditorSettings, FlowEditor, NodeTypeRegistry};

	#[test]
	fn sample_flow_loads_cleanly() {
		let flow = sample_flow();
		let mut editor =
			FlowEditor::new(Rc::new(NodeTypeRegistry::builtin()), EditorSettings::default());
		editor.load(&flow);
		assert_eq!(editor.graph().list_nodes().len(), flow.nodes.len());
		assert_eq!(editor.graph().list_edges().len(), flow.connections.len());
		assert_eq!(editor.save(), flow);
	}
}
