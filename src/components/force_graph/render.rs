use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#f8f9fa");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_edge_labels(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let line_width = 2.0 / k;
	let t = ease_out_cubic(state.hover.highlight_t);

	// Undirected network: plain segments, no arrowheads
	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: all edges at base alpha; t=1: highlighted brighten, others dim
		let (alpha, width) = if is_highlighted {
			(0.9, line_width * (1.0 + 0.4 * t))
		} else {
			(0.7 - 0.5 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(149, 165, 166, {alpha})"));
		ctx.set_line_width(width);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		ctx.stroke();
	});
}

fn draw_edge_labels(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let positions = state.positions();
	let t = ease_out_cubic(state.hover.highlight_t);
	let alpha = 0.9 - 0.6 * t;

	ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
	for edge in state.visual_edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&edge.a), positions.get(&edge.b))
		else {
			continue;
		};
		let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
		ctx.set_fill_style_str(&format!("rgba(52, 73, 94, {alpha})"));
		let _ = ctx.fill_text(&edge.label, mx + 4.0 / k, my - 4.0 / k);
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();
		ctx.set_stroke_style_str("#2980b9");
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
		ctx.set_global_alpha(1.0);

		draw_label(ctx, &node.data.user_data.label, x, y, radius, alpha, k);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);

		let radius = if is_hovered {
			NODE_RADIUS * (1.0 + 0.35 * t)
		} else {
			NODE_RADIUS * (1.0 + 0.15 * t)
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.5 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(44, 62, 80, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		draw_label(ctx, &node.data.user_data.label, x, y, radius, 1.0, k);
	});
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	label: &str,
	x: f64,
	y: f64,
	radius: f64,
	alpha: f64,
	k: f64,
) {
	ctx.set_fill_style_str(&format!("rgba(44, 62, 80, {alpha})"));
	ctx.set_font(&format!("bold {}px sans-serif", 12.0 / k.max(0.5)));
	let _ = ctx.fill_text(label, x + radius + 4.0, y + 4.0);
}
