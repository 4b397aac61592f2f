use std::rc::Rc;

use leptos::prelude::*;

use super::render::token_color;
use crate::flow::{NodeCategory, NodeTypeRegistry};

/// Registry types grouped by category. Clicking one asks the canvas to add
/// a node of that type.
#[component]
pub fn NodePalette(
	registry: Rc<NodeTypeRegistry>,
	add_requests: RwSignal<Option<String>>,
) -> impl IntoView {
	let sections = NodeCategory::ALL
		.into_iter()
		.map(|category| {
			let buttons = registry
				.by_category(category)
				.map(|def| {
					let type_id = def.type_id.clone();
					view! {
						<button
							class="palette-item"
							title=def.description.clone()
							style=format!("border-left: 4px solid {};", token_color(&def.color_token))
							on:click=move |_| add_requests.set(Some(type_id.clone()))
						>
							{def.label.clone()}
						</button>
					}
				})
				.collect_view();
			view! {
				<section class="palette-section">
					<h3>{category.label()}</h3>
					{buttons}
				</section>
			}
		})
		.collect_view();

	view! { <aside class="flow-palette">{sections}</aside> }
}
