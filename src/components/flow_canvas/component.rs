use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

use super::palette::NodePalette;
use super::properties::PropertiesPanel;
use super::render;
use crate::flow::{
	ConfigEdit, EditorSettings, Flow, FlowEditor, NodeTypeRegistry, Point, PropertySheet,
};

type SharedEditor = Rc<RefCell<Option<FlowEditor>>>;

/// Pointer position relative to the canvas' top-left corner.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

#[component]
pub fn FlowEditorCanvas(
	#[prop(into)] flow: Signal<Flow>,
	#[prop(optional)] settings: EditorSettings,
) -> impl IntoView {
	let registry = Rc::new(NodeTypeRegistry::builtin());
	let palette_registry = registry.clone();

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let editor: SharedEditor = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let sheet = RwSignal::new(None::<PropertySheet>);
	let edits = RwSignal::new(None::<ConfigEdit>);
	let add_requests = RwSignal::new(None::<String>);
	let zoom = RwSignal::new(1.0_f64);

	let (editor_init, animate_init, resize_cb_init) =
		(editor.clone(), animate.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("canvas 2d context unavailable");
				return;
			}
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut ed = FlowEditor::new(registry.clone(), settings.clone());
		ed.resize(w, h);
		ed.load(&flow.get_untracked());
		zoom.set(ed.viewport().zoom());
		*editor_init.borrow_mut() = Some(ed);

		let (editor_resize, canvas_resize) = (editor_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut ed) = *editor_resize.borrow_mut() {
				ed.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (editor_anim, animate_inner) = (editor_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref ed) = *editor_anim.borrow() {
				render::render(ed, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Reload when the caller swaps the flow; the first run is covered above.
	let editor_reload = editor.clone();
	Effect::new(move |prev: Option<()>| {
		let next = flow.get();
		if prev.is_some() {
			if let Some(ref mut ed) = *editor_reload.borrow_mut() {
				ed.load(&next);
				sheet.set(ed.properties());
			}
		}
	});

	let editor_add = editor.clone();
	Effect::new(move |_| {
		let Some(type_id) = add_requests.get() else {
			return;
		};
		if let Some(ref mut ed) = *editor_add.borrow_mut() {
			if let Err(err) = ed.add_node(&type_id) {
				error!("{err}");
			}
			sheet.set(ed.properties());
		}
	});

	let editor_edit = editor.clone();
	Effect::new(move |_| {
		let Some(edit) = edits.get() else {
			return;
		};
		if let Some(ref mut ed) = *editor_edit.borrow_mut() {
			ed.apply_edit(edit);
			sheet.set(ed.properties());
		}
	});

	let editor_md = editor.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(p) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(canvas) = canvas_ref.get() {
			let _ = canvas.focus();
		}
		if let Some(ref mut ed) = *editor_md.borrow_mut() {
			ed.pointer_down(p);
			sheet.set(ed.properties());
		}
	};

	let editor_mm = editor.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut ed) = *editor_mm.borrow_mut() {
			ed.pointer_move(p);
		}
	};

	let editor_mu = editor.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut ed) = *editor_mu.borrow_mut() {
			ed.pointer_up();
		}
	};

	let editor_ml = editor.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut ed) = *editor_ml.borrow_mut() {
			ed.pointer_leave();
		}
	};

	let editor_wh = editor.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut ed) = *editor_wh.borrow_mut() {
			ed.wheel(ev.delta_y());
			zoom.set(ed.viewport().zoom());
		}
	};

	let editor_kd = editor.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		let key = ev.key();
		if matches!(key.as_str(), "Escape" | "Delete" | "Backspace") {
			ev.prevent_default();
		}
		if let Some(ref mut ed) = *editor_kd.borrow_mut() {
			ed.key_down(&key);
			sheet.set(ed.properties());
		}
	};

	let editor_del = editor.clone();
	let on_delete = move |_: MouseEvent| {
		if let Some(ref mut ed) = *editor_del.borrow_mut() {
			ed.delete_selected();
			sheet.set(ed.properties());
		}
	};

	let editor_export = editor.clone();
	let on_export = move |_: MouseEvent| {
		if let Some(ref ed) = *editor_export.borrow() {
			match ed.save().to_json_pretty() {
				Ok(json) => info!("exported flow:\n{json}"),
				Err(err) => error!("{err}"),
			}
		}
	};

	view! {
		<div class="flow-editor">
			<header class="flow-toolbar">
				<h2>{move || flow.with(|f| f.name.clone())}</h2>
				<span class="flow-status">{move || flow.with(|f| format!("{:?}", f.status))}</span>
				<span class="flow-zoom">{move || format!("{:.0}%", zoom.get() * 100.0)}</span>
				<button on:click=on_delete>"Delete selected"</button>
				<button on:click=on_export>"Export JSON"</button>
			</header>
			<div class="flow-body">
				<NodePalette registry=palette_registry add_requests=add_requests />
				<div class="flow-canvas-host">
					<canvas
						node_ref=canvas_ref
						class="flow-canvas"
						tabindex="0"
						on:mousedown=on_mousedown
						on:mousemove=on_mousemove
						on:mouseup=on_mouseup
						on:mouseleave=on_mouseleave
						on:wheel=on_wheel
						on:keydown=on_keydown
						style="display: block; cursor: grab; outline: none;"
					/>
				</div>
				<PropertiesPanel sheet=sheet edits=edits />
			</div>
		</div>
	}
}
