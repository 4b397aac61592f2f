use leptos::prelude::*;
use serde_json::Value;

use crate::flow::{ConfigEdit, PropertySheet};

/// Numbers, booleans and JSON literals keep their type; anything else is
/// stored as a string.
fn value_from_input(text: &str) -> Value {
	serde_json::from_str(text.trim()).unwrap_or_else(|_| Value::String(text.to_owned()))
}

fn value_to_input(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Config editor for the selected node.
#[component]
pub fn PropertiesPanel(
	sheet: RwSignal<Option<PropertySheet>>,
	edits: RwSignal<Option<ConfigEdit>>,
) -> impl IntoView {
	let new_key = RwSignal::new(String::new());
	let new_value = RwSignal::new(String::new());

	let body = move || {
		let Some(sheet) = sheet.get() else {
			return view! { <p class="properties-empty">"Select a node to edit its settings."</p> }
				.into_any();
		};
		let node = sheet.node.clone();
		let fields = sheet
			.entries
			.into_iter()
			.map(|(key, value)| {
				let (node, field) = (node.clone(), key.clone());
				view! {
					<label class="properties-field">
						<span>{key}</span>
						<input
							type="text"
							prop:value=value_to_input(&value)
							on:change=move |ev| {
								let text = event_target_value(&ev);
								edits.set(Some(ConfigEdit::new(node.clone(), field.clone(), value_from_input(&text))));
							}
						/>
					</label>
				}
			})
			.collect_view();

		let on_add = move |_| {
			let key = new_key.get_untracked();
			if key.trim().is_empty() {
				return;
			}
			let value = value_from_input(&new_value.get_untracked());
			edits.set(Some(ConfigEdit::new(node.clone(), key.trim(), value)));
			new_key.set(String::new());
			new_value.set(String::new());
		};

		view! {
			<h3>{sheet.type_label}</h3>
			<p class="properties-meta">{format!("{:?} · {}", sheet.category, sheet.node)}</p>
			{fields}
			<div class="properties-new">
				<input
					type="text"
					placeholder="field"
					prop:value=move || new_key.get()
					on:input=move |ev| new_key.set(event_target_value(&ev))
				/>
				<input
					type="text"
					placeholder="value"
					prop:value=move || new_value.get()
					on:input=move |ev| new_value.set(event_target_value(&ev))
				/>
				<button on:click=on_add>"Add"</button>
			</div>
		}
		.into_any()
	};

	view! { <aside class="flow-properties">{body}</aside> }
}
