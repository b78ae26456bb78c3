use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::color_at;
use super::state::CanvasState;

const BACKGROUND: &str = "#ffffff";
const EDGE_COLOR: &str = "#888";
const EDGE_WIDTH: f64 = 0.5;
const MARKER_OUTLINE: f64 = 2.0;
const FONT: &str = "12px sans-serif";
const COLORBAR_STEPS: usize = 64;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_colorbar(state, ctx);
	draw_tooltip(state, ctx);
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(EDGE_WIDTH / state.transform.k);
	ctx.begin_path();
	for &((x1, y1), (x2, y2)) in &state.edges {
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
	}
	ctx.stroke();
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);

	for (idx, node) in state.nodes.iter().enumerate() {
		// Sizes are in screen pixels, so undo the zoom.
		let radius = node.radius / k;
		let hovered = state.is_hovered(idx);

		if hovered && t > 0.01 {
			let glow = radius * (1.4 + 0.8 * t);
			if let Ok(gradient) =
				ctx.create_radial_gradient(node.x, node.y, radius * 0.3, node.x, node.y, glow)
			{
				let _ = gradient.add_color_stop(0.0, &format!("rgba(30, 60, 120, {})", 0.35 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(30, 60, 120, 0)");
				ctx.begin_path();
				let _ = ctx.arc(node.x, node.y, glow, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color);
		ctx.fill();
		ctx.set_stroke_style_str(if hovered { "#222" } else { "#fff" });
		ctx.set_line_width(MARKER_OUTLINE / k);
		ctx.stroke();
	}
}

fn draw_colorbar(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let (bar_w, bar_h) = (15.0, (state.height * 0.5).max(80.0));
	let x = state.width - bar_w - 60.0;
	let y = (state.height - bar_h) / 2.0;
	let step_h = bar_h / COLORBAR_STEPS as f64;

	for i in 0..COLORBAR_STEPS {
		// Low values at the bottom.
		let t = i as f64 / (COLORBAR_STEPS - 1) as f64;
		ctx.set_fill_style_str(&color_at(t));
		ctx.fill_rect(x, y + bar_h - (i + 1) as f64 * step_h, bar_w, step_h + 0.5);
	}
	ctx.set_stroke_style_str("#444");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, bar_w, bar_h);

	ctx.set_fill_style_str("#222");
	ctx.set_font(FONT);
	let _ = ctx.fill_text("Community ID", x - 30.0, y - 10.0);
	let _ = ctx.fill_text(&format!("{}", state.colors.max), x + bar_w + 5.0, y + 10.0);
	let _ = ctx.fill_text(&format!("{}", state.colors.min), x + bar_w + 5.0, y + bar_h);
}

fn draw_tooltip(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let Some(label) = state.hovered_label() else {
		return;
	};
	let lines: Vec<&str> = label.lines().collect();
	ctx.set_font(FONT);
	let width = lines
		.iter()
		.filter_map(|line| ctx.measure_text(line).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);
	let (line_h, pad) = (16.0, 6.0);
	let (px, py) = state.pointer;
	let (x, y) = (px + 12.0, py + 12.0);

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
	ctx.fill_rect(x, y, width + 2.0 * pad, lines.len() as f64 * line_h + pad);
	ctx.set_stroke_style_str("#888");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, width + 2.0 * pad, lines.len() as f64 * line_h + pad);

	for (i, line) in lines.iter().enumerate() {
		// First line is the node id.
		ctx.set_font(if i == 0 { "bold 12px sans-serif" } else { FONT });
		ctx.set_fill_style_str("#222");
		let _ = ctx.fill_text(line, x + pad, y + (i + 1) as f64 * line_h);
	}
}
