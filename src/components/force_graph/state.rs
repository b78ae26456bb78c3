use crate::encoding::{GeometryBundle, Position};

use super::scale::ColorScale;

/// Extra pixels around a marker that still count as hovering it.
pub const HIT_SLOP: f64 = 3.0;
/// Share of the shorter canvas side covered by the layout box.
const FIT: f64 = 0.45;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
}

/// A node ready to draw: world position plus resolved color.
#[derive(Clone, Debug)]
pub struct NodeSprite {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub color: String,
	pub label: String,
}

pub struct CanvasState {
	pub nodes: Vec<NodeSprite>,
	pub edges: Vec<((f64, f64), (f64, f64))>,
	pub colors: ColorScale,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub pointer: (f64, f64),
	/// Pixels per layout unit at zoom 1.
	unit: f64,
}

impl CanvasState {
	pub fn new(bundle: &GeometryBundle, width: f64, height: f64) -> Self {
		let unit = width.min(height) * FIT;
		let world = |p: Position| (p.x * unit, p.y * unit);
		let colors = ColorScale::new(bundle.community_range);

		let nodes = bundle
			.nodes
			.iter()
			.map(|node| {
				let (x, y) = world(node.position);
				NodeSprite {
					x,
					y,
					radius: node.size_px / 2.0,
					color: colors.color(node.color_value),
					label: node.label.clone(),
				}
			})
			.collect();
		let edges = bundle
			.edges
			.iter()
			.map(|edge| (world(edge.from), world(edge.to)))
			.collect();

		Self {
			nodes,
			edges,
			colors,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			pointer: (0.0, 0.0),
			unit,
		}
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// Topmost node under a screen point. Markers keep their pixel size at
	/// any zoom, so the test runs in screen space.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		self.nodes.iter().enumerate().rev().find_map(|(idx, node)| {
			let (nx, ny) = self.graph_to_screen(node.x, node.y);
			let (dx, dy) = (nx - sx, ny - sy);
			((dx * dx + dy * dy).sqrt() <= node.radius + HIT_SLOP).then_some(idx)
		})
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		if self.hover.node.is_some() && node.is_none() {
			// Keep the old node around while it fades out.
			self.hover.prev_node = self.hover.node.take();
		} else {
			self.hover.prev_node = None;
		}
		self.hover.node = node;
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn hovered_label(&self) -> Option<&str> {
		self.hover
			.node
			.and_then(|idx| self.nodes.get(idx))
			.map(|n| n.label.as_str())
	}

	pub fn tick(&mut self, dt: f64) {
		let (target, speed) = if self.hover.node.is_some() {
			(1.0, 6.0)
		} else {
			(0.0, 4.0)
		};
		self.hover.highlight_t += (target - self.hover.highlight_t) * (speed * dt).min(1.0);
		if self.hover.node.is_none() && self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
			self.hover.prev_node = None;
		}
	}

	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Refit the layout to a new canvas size, keeping zoom and pan offset.
	pub fn resize(&mut self, width: f64, height: f64) {
		let unit = width.min(height) * FIT;
		if self.unit > 0.0 && unit > 0.0 {
			let ratio = unit / self.unit;
			for node in &mut self.nodes {
				node.x *= ratio;
				node.y *= ratio;
			}
			for ((x1, y1), (x2, y2)) in &mut self.edges {
				*x1 *= ratio;
				*y1 *= ratio;
				*x2 *= ratio;
				*y2 *= ratio;
			}
			self.unit = unit;
		}
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
