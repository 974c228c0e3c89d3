//! Canvas rendering for the subject graph.
//!
//! Draw order:
//! 1. Background and dot grid (dots in world space so they pan and zoom)
//! 2. Edges with flowing dashes and closed arrowheads
//! 3. Subject boxes, highlighted boxes last

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{SceneNode, SceneState};
use super::theme::Theme;

/// Dot grid is skipped below this zoom level; it turns into noise.
const MIN_DOT_ZOOM: f64 = 0.4;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete scene to the canvas.
pub fn render(state: &SceneState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_dots(state, ctx, theme);
	draw_edges(state, ctx, theme);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

fn draw_dots(state: &SceneState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bg = &theme.background;
	if state.transform.k < MIN_DOT_ZOOM || bg.dot_gap <= 0.0 {
		return;
	}
	let (x0, y0) = state.screen_to_graph(0.0, 0.0);
	let (x1, y1) = state.screen_to_graph(state.width, state.height);
	let start_x = (x0 / bg.dot_gap).floor() * bg.dot_gap;
	let start_y = (y0 / bg.dot_gap).floor() * bg.dot_gap;

	ctx.set_fill_style_str(&bg.dot_color.to_css());
	let mut y = start_y;
	while y <= y1 {
		let mut x = start_x;
		while x <= x1 {
			ctx.fill_rect(x - bg.dot_radius, y - bg.dot_radius, bg.dot_radius * 2.0, bg.dot_radius * 2.0);
			x += bg.dot_gap;
		}
		y += bg.dot_gap;
	}
}

fn draw_edges(state: &SceneState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let style = &theme.edge;
	let max_t = smooth_step(state.highlight.max_intensity());
	let dash_offset = -state.flow_time * style.flow_speed;

	for &(src, tgt) in &state.edges {
		let (Some(from), Some(to)) = (state.nodes.get(src), state.nodes.get(tgt)) else {
			continue;
		};
		let (x1, y1) = from.bottom_center();
		let (x2, y2) = to.top_center();
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let edge_t = smooth_step(state.highlight.edge_intensity(src, tgt));
		let (alpha, width) = if edge_t > 0.01 {
			(0.8 + 0.2 * edge_t, style.width * (1.0 + 0.5 * edge_t))
		} else if max_t > 0.01 {
			(0.8 - 0.5 * max_t, style.width)
		} else {
			(0.8, style.width)
		};
		let color = style.color.with_alpha(alpha);

		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(style.dash.0),
			&JsValue::from_f64(style.dash.1),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2 - ux * style.arrow_size, y2 - uy * style.arrow_size);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&color.to_css());
		let (back_x, back_y) = (x2 - ux * style.arrow_size, y2 - uy * style.arrow_size);
		let (px, py) = (-uy * style.arrow_size * 0.5, ux * style.arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(x2, y2);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(state: &SceneState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let dim_alpha = if max_t > 0.01 { 1.0 - 0.5 * max_t } else { 1.0 };

	let (highlighted, plain): (Vec<usize>, Vec<usize>) = (0..state.nodes.len())
		.partition(|&i| state.highlight.node_intensity(i) > 0.001);

	for i in plain {
		draw_node(ctx, &state.nodes[i], theme, dim_alpha, 0.0);
	}
	for i in highlighted {
		let t = smooth_step(state.highlight.node_intensity(i));
		let alpha = dim_alpha + (1.0 - dim_alpha) * t;
		draw_node(ctx, &state.nodes[i], theme, alpha, t);
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &SceneNode,
	theme: &Theme,
	alpha: f64,
	highlight: f64,
) {
	let style = &theme.node;
	ctx.set_global_alpha(alpha);

	rounded_rect(ctx, node.x, node.y, node.width, node.height, style.corner_radius);
	ctx.set_fill_style_str(&style.fill.lighten(0.08 * highlight).to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&style.border.lerp(style.border_highlight, highlight).to_css());
	ctx.set_line_width(style.border_width * (1.0 + highlight));
	ctx.stroke();

	ctx.set_fill_style_str(&style.text.to_css());
	ctx.set_font(style.font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text_with_max_width(
		&node.label,
		node.x + node.width / 2.0,
		node.y + node.height / 2.0,
		node.width - 2.0 * style.corner_radius,
	);

	ctx.set_global_alpha(1.0);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
