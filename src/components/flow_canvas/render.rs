use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::flow::{FlowEditor, Route};

const BACKGROUND: &str = "#f8fafc";
const GRID: &str = "rgba(148, 163, 184, 0.35)";
const GRID_STEP: f64 = 40.0;
const EDGE: &str = "#64748b";
const PREVIEW: &str = "#3b82f6";
const PORT_RADIUS: f64 = 6.0;

/// Map a registry colour token to a CSS colour.
pub fn token_color(token: &str) -> &'static str {
	match token {
		"emerald" => "#10b981",
		"blue" => "#3b82f6",
		"indigo" => "#6366f1",
		"amber" => "#f59e0b",
		"violet" => "#8b5cf6",
		"rose" => "#f43f5e",
		"slate" => "#64748b",
		_ => "#94a3b8",
	}
}

pub fn render(editor: &FlowEditor, ctx: &CanvasRenderingContext2d) {
	let size = editor.canvas_size();
	let vp = editor.viewport();
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, size.x, size.y);
	ctx.save();
	let _ = ctx.translate(vp.pan().x, vp.pan().y);
	let _ = ctx.scale(vp.zoom(), vp.zoom());
	draw_grid(editor, ctx);
	draw_edges(editor, ctx);
	draw_preview(editor, ctx);
	draw_nodes(editor, ctx);
	ctx.restore();
}

fn draw_grid(editor: &FlowEditor, ctx: &CanvasRenderingContext2d) {
	let vp = editor.viewport();
	let size = editor.canvas_size();
	let top_left = vp.screen_to_world(Default::default());
	let bottom_right = vp.screen_to_world(size);
	let start_x = (top_left.x / GRID_STEP).floor() * GRID_STEP;
	let start_y = (top_left.y / GRID_STEP).floor() * GRID_STEP;

	ctx.set_fill_style_str(GRID);
	let mut x = start_x;
	while x <= bottom_right.x {
		let mut y = start_y;
		while y <= bottom_right.y {
			ctx.fill_rect(x - 1.0, y - 1.0, 2.0, 2.0);
			y += GRID_STEP;
		}
		x += GRID_STEP;
	}
}

fn stroke_route(route: &Route, ctx: &CanvasRenderingContext2d) {
	let p = &route.path;
	ctx.begin_path();
	ctx.move_to(p.start.x, p.start.y);
	ctx.bezier_curve_to(
		p.control1.x,
		p.control1.y,
		p.control2.x,
		p.control2.y,
		p.end.x,
		p.end.y,
	);
	ctx.stroke();

	let a = &route.arrow;
	ctx.begin_path();
	ctx.move_to(a.tip.x, a.tip.y);
	ctx.line_to(a.left.x, a.left.y);
	ctx.line_to(a.right.x, a.right.y);
	ctx.close_path();
	ctx.fill();
}

fn draw_edges(editor: &FlowEditor, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_width(2.0);
	ctx.set_stroke_style_str(EDGE);
	ctx.set_fill_style_str(EDGE);
	for (edge, route) in editor.routes() {
		stroke_route(&route, ctx);

		let Some(label) = &edge.label else {
			continue;
		};
		let mid = route.midpoint();
		ctx.set_font("600 11px sans-serif");
		let width = ctx
			.measure_text(label)
			.map(|m| m.width())
			.unwrap_or(label.len() as f64 * 6.0);
		ctx.set_fill_style_str("#ffffff");
		ctx.fill_rect(mid.x - width / 2.0 - 4.0, mid.y - 9.0, width + 8.0, 16.0);
		ctx.set_fill_style_str(EDGE);
		let _ = ctx.fill_text(label, mid.x - width / 2.0, mid.y + 3.0);
	}
}

fn draw_preview(editor: &FlowEditor, ctx: &CanvasRenderingContext2d) {
	let Some(route) = editor.preview_route() else {
		return;
	};
	ctx.set_line_width(2.0);
	ctx.set_stroke_style_str(PREVIEW);
	ctx.set_fill_style_str(PREVIEW);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0),
		&JsValue::from_f64(4.0),
	));
	stroke_route(&route, ctx);
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(editor: &FlowEditor, ctx: &CanvasRenderingContext2d) {
	let graph = editor.graph();
	let size = editor.settings().node_size;
	let selected = editor.controller().selected();
	let connecting = editor.controller().connection_source();

	for node in graph.list_nodes() {
		let Some(def) = graph.definition(node) else {
			continue;
		};
		let (x, y) = (node.position.x, node.position.y);
		let color = token_color(&def.color_token);
		let is_selected = selected == Some(&node.id);

		ctx.set_fill_style_str("#ffffff");
		ctx.fill_rect(x, y, size.width, size.height);
		ctx.set_fill_style_str(color);
		ctx.fill_rect(x, y, 6.0, size.height);

		ctx.set_line_width(if is_selected { 3.0 } else { 1.0 });
		ctx.set_stroke_style_str(if is_selected { color } else { "#cbd5e1" });
		ctx.stroke_rect(x, y, size.width, size.height);

		ctx.set_fill_style_str("#0f172a");
		ctx.set_font("600 14px sans-serif");
		let _ = ctx.fill_text(&def.label, x + 18.0, y + 30.0);

		let subtitle = node
			.config
			.values()
			.next()
			.map(|v| match v.as_str() {
				Some(s) => s.to_owned(),
				None => v.to_string(),
			})
			.unwrap_or_else(|| def.description.clone());
		ctx.set_fill_style_str("#64748b");
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text(&subtitle, x + 18.0, y + 52.0);

		if def.category.has_inbound_port() {
			let p = size.inbound_anchor(node.position);
			draw_port(ctx, p.x, p.y, "#ffffff", connecting.is_some());
		}
		if def.category.has_outbound_port() {
			let p = size.outbound_anchor(node.position);
			let fill = if connecting == Some(&node.id) { PREVIEW } else { color };
			draw_port(ctx, p.x, p.y, fill, false);
		}
	}
}

fn draw_port(ctx: &CanvasRenderingContext2d, x: f64, y: f64, fill: &str, highlight: bool) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, PORT_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(fill);
	ctx.fill();
	ctx.set_line_width(if highlight { 2.5 } else { 1.5 });
	ctx.set_stroke_style_str(if highlight { PREVIEW } else { "#475569" });
	ctx.stroke();
}
