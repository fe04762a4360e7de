//! Canvas rendering for the force graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edge lines and arrows, then edge labels (world space)
//! 3. Non-highlighted nodes, then highlighted nodes on top (world space)
//! 4. Tooltip for the hovered node (screen space)
//!
//! Hidden nodes and every edge touching one are skipped in all passes.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{EdgeInfo, ForceGraphState, NodeInfo};
use super::theme::{Color, Theme};
use super::types::NodeShape;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);
	let layout = node_layout(state);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme, &layout);
	draw_edge_labels(state, ctx, &scale, theme, &layout);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	draw_tooltip(state, ctx, config, theme);
}

/// Position and size multiplier of every node, keyed by simulation index.
type Layout = HashMap<DefaultNodeIdx, (f64, f64, f64)>;

fn node_layout(state: &ForceGraphState) -> Layout {
	let mut layout = HashMap::with_capacity(state.node_count());
	state.graph.visit_nodes(|node| {
		layout.insert(
			node.index(),
			(node.x() as f64, node.y() as f64, node.data.user_data.size),
		);
	});
	layout
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bg = &theme.background;
	let gradient = bg
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &bg.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &bg.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&bg.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Alpha and width multipliers for an edge given the highlight state.
fn edge_emphasis(state: &ForceGraphState, edge: &EdgeInfo) -> (f64, f64, bool) {
	let edge_t = smooth_step(state.highlight.edge_intensity(edge.source, edge.target));
	let max_t = smooth_step(state.highlight.max_intensity());
	if edge_t > 0.01 {
		(0.8 + 0.2 * edge_t, 1.0 + 0.6 * edge_t, true)
	} else if max_t > 0.01 {
		(0.8 - 0.55 * max_t, 1.0 - 0.3 * max_t, false)
	} else {
		(0.8, 1.0, false)
	}
}

fn edge_color(edge: &EdgeInfo, theme: &Theme, highlighted: bool) -> Color {
	match &edge.color {
		Some(c) if highlighted => Color::parse(c.highlight()),
		Some(c) => Color::parse(c.base()),
		None => theme.edge.color,
	}
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	layout: &Layout,
) {
	for edge in state.edges.iter().filter(|e| state.is_edge_visible(e)) {
		let (Some(&(x1, y1, source_size)), Some(&(x2, y2, target_size))) =
			(layout.get(&edge.source), layout.get(&edge.target))
		else {
			continue;
		};
		let (alpha, width_mult, highlighted) = edge_emphasis(state, edge);
		let color = edge_color(edge, theme, highlighted);
		let stroke = color.with_alpha(alpha * color.a).to_css();

		ctx.set_stroke_style_str(&stroke);
		ctx.set_line_width(scale.edge_line_width * width_mult);
		if edge.dashes {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(scale.dash_pattern.0),
				&JsValue::from_f64(scale.dash_pattern.1),
			));
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		if edge.source == edge.target {
			// Self loop above the node.
			let r = scale.node_radius * source_size;
			ctx.begin_path();
			let _ = ctx.arc(x1, y1 - r * 1.6, r * 0.9, 0.0, 2.0 * PI);
			ctx.stroke();
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let target_r = scale.node_radius * target_size;
		let source_r = scale.node_radius * source_size;
		let head = |on: bool| if on { scale.arrow_size } else { 0.0 };

		ctx.begin_path();
		ctx.move_to(
			x1 + ux * (source_r + head(edge.arrows.from)),
			y1 + uy * (source_r + head(edge.arrows.from)),
		);
		ctx.line_to(
			x2 - ux * (target_r + head(edge.arrows.to)),
			y2 - uy * (target_r + head(edge.arrows.to)),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&stroke);
		if edge.arrows.to {
			draw_arrow_head(ctx, x2 - ux * target_r, y2 - uy * target_r, ux, uy, scale.arrow_size);
		}
		if edge.arrows.from {
			draw_arrow_head(ctx, x1 + ux * source_r, y1 + uy * source_r, -ux, -uy, scale.arrow_size);
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Filled triangle with its tip at (`tip_x`, `tip_y`) pointing along (`ux`, `uy`).
fn draw_arrow_head(
	ctx: &CanvasRenderingContext2d,
	tip_x: f64,
	tip_y: f64,
	ux: f64,
	uy: f64,
	size: f64,
) {
	let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_edge_labels(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	layout: &Layout,
) {
	if scale.edge_label_alpha <= 0.01 {
		return;
	}
	ctx.set_font(&scale.edge_label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_line_join("round");
	ctx.set_line_width(3.0 / scale.k);

	for edge in state.edges.iter().filter(|e| state.is_edge_visible(e)) {
		if edge.label.is_empty() {
			continue;
		}
		let (Some(&(x1, y1, _)), Some(&(x2, y2, _))) =
			(layout.get(&edge.source), layout.get(&edge.target))
		else {
			continue;
		};
		let (alpha, _, _) = edge_emphasis(state, edge);
		let (mx, my) = if edge.source == edge.target {
			(x1, y1 - scale.node_radius * 2.6)
		} else {
			((x1 + x2) / 2.0, (y1 + y2) / 2.0)
		};
		let a = scale.edge_label_alpha * (alpha / 0.8).min(1.0);
		ctx.set_stroke_style_str(&theme.edge.label_halo.with_alpha(a).to_css());
		ctx.set_fill_style_str(&theme.edge.label_color.with_alpha(a).to_css());

		let first_y = my - scale.edge_label_line_height * (edge.label.len() as f64 - 1.0) / 2.0;
		for (i, line) in edge.label.iter().enumerate() {
			let y = first_y + scale.edge_label_line_height * i as f64;
			let _ = ctx.stroke_text(line, mx, y);
			let _ = ctx.fill_text(line, mx, y);
		}
	}
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let has_highlight = max_t > 0.01;
	let (dim_alpha, dim_radius) = if has_highlight {
		(1.0 - 0.6 * max_t, 1.0 - 0.1 * max_t)
	} else {
		(1.0, 1.0)
	};

	// Pass 1: non-highlighted nodes
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_visible(idx) || state.highlight.node_intensity(idx) > 0.001 {
			return;
		}
		draw_node(ctx, node, scale, theme, dim_alpha, dim_radius);
	});

	// Pass 2: highlighted/transitioning nodes on top
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let node_t = state.highlight.node_intensity(idx);
		if !state.is_visible(idx) || node_t <= 0.001 {
			return;
		}
		let eased_t = smooth_step(node_t);
		let is_hovered = state.highlight.hovered_node == Some(idx);
		let target_radius = if is_hovered { 1.3 } else { 1.15 };

		let alpha = dim_alpha + (1.0 - dim_alpha) * eased_t;
		let radius_mult = dim_radius + (target_radius - dim_radius) * eased_t;
		draw_node(ctx, node, scale, theme, alpha, radius_mult);

		if is_hovered && eased_t > 0.01 {
			let (x, y) = (node.x() as f64, node.y() as f64);
			let radius = scale.node_radius * radius_mult * node.data.user_data.size;
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(
				&theme
					.node
					.label_color
					.with_alpha(0.6 * eased_t)
					.to_css(),
			);
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}
	});
}

/// Traces the outline of a node shape as the current path.
fn trace_shape(ctx: &CanvasRenderingContext2d, shape: NodeShape, x: f64, y: f64, r: f64) {
	ctx.begin_path();
	match shape {
		NodeShape::Box => {
			let (w, h, c) = (r * 2.2, r * 1.5, r * 0.3);
			let (left, top) = (x - w / 2.0, y - h / 2.0);
			ctx.move_to(left + c, top);
			let _ = ctx.arc_to(left + w, top, left + w, top + h, c);
			let _ = ctx.arc_to(left + w, top + h, left, top + h, c);
			let _ = ctx.arc_to(left, top + h, left, top, c);
			let _ = ctx.arc_to(left, top, left + w, top, c);
			ctx.close_path();
		}
		NodeShape::Ellipse => {
			let _ = ctx.ellipse(x, y, r * 1.35, r * 0.85, 0.0, 0.0, 2.0 * PI);
		}
		NodeShape::Diamond => {
			let d = r * 1.25;
			ctx.move_to(x, y - d);
			ctx.line_to(x + d, y);
			ctx.line_to(x, y + d);
			ctx.line_to(x - d, y);
			ctx.close_path();
		}
		NodeShape::Dot | NodeShape::Unknown => {
			let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		}
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) {
	let info = &node.data.user_data;
	let (x, y) = (node.x() as f64, node.y() as f64);
	let radius = scale.node_radius * radius_mult * info.size;
	let base_color = Color::parse(&info.color);

	ctx.set_global_alpha(alpha);

	if theme.node.shadow.a > 0.0 {
		ctx.set_shadow_color(&theme.node.shadow.to_css());
		ctx.set_shadow_blur(5.0);
		ctx.set_shadow_offset_x(2.0);
		ctx.set_shadow_offset_y(2.0);
	}

	trace_shape(ctx, info.shape, x, y, radius);
	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius * 1.4)
				.ok()
		})
		.flatten();
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base_color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base_color.to_css());
			let _ = gradient.add_color_stop(1.0, &base_color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&base_color.to_css()),
	}
	ctx.fill();

	ctx.set_shadow_color("rgba(0, 0, 0, 0)");
	ctx.set_shadow_blur(0.0);

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&base_color.darken(theme.node.border_darken).to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	if !info.label.is_empty() && alpha > 0.3 {
		ctx.set_fill_style_str(&theme.node.label_color.to_css());
		ctx.set_font(&scale.label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		let top = y + radius * 1.3 + 2.0 / scale.k;
		for (i, line) in info.label.iter().enumerate() {
			let _ = ctx.fill_text(line, x, top + scale.label_line_height * i as f64);
		}
	}

	ctx.set_global_alpha(1.0);
}

/// Tooltip box for the hovered node's title, in screen space.
fn draw_tooltip(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let Some(idx) = state.highlight.tooltip_node() else {
		return;
	};
	let mut title = None;
	state.graph.visit_nodes(|node| {
		if node.index() == idx {
			title = node.data.user_data.title.clone();
		}
	});
	let (Some(title), Some((gx, gy))) = (title, state.position_of(idx)) else {
		return;
	};
	let lines: Vec<&str> = title.lines().collect();
	if lines.is_empty() {
		return;
	}

	let font_px = config.hover.tooltip_size;
	let (pad, line_h) = (5.0, font_px * 1.3);
	ctx.set_font(&format!("{}px Inter, sans-serif", font_px));
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");
	let text_w = lines
		.iter()
		.filter_map(|l| ctx.measure_text(l).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);
	let (box_w, box_h) = (text_w + pad * 2.0, line_h * lines.len() as f64 + pad * 2.0);

	let sx = gx * state.transform.k + state.transform.x + 12.0;
	let sy = gy * state.transform.k + state.transform.y + 12.0;
	// Keep the box inside the canvas.
	let bx = sx.min(state.width - box_w - 2.0).max(2.0);
	let by = sy.min(state.height - box_h - 2.0).max(2.0);

	ctx.set_fill_style_str(&theme.tooltip.background.to_css());
	ctx.fill_rect(bx, by, box_w, box_h);
	ctx.set_stroke_style_str(&theme.tooltip.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(bx, by, box_w, box_h);

	ctx.set_fill_style_str(&theme.tooltip.text.to_css());
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, bx + pad, by + pad + line_h * i as f64);
	}
}
