//! Seeded force-directed layout.
//!
//! Nodes start at pseudo-random positions drawn from a fixed seed and the
//! `force_graph` simulation runs a fixed number of iterations, each one a
//! fixed slice of simulated time, so the same graph always lands in the same
//! place. The result is centred on the origin
//! and scaled so the outermost coordinate sits at `scale`.

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Graph, NodeIdx};

/// Preferred node spacing in a unit-sized layout.
pub const DEFAULT_K: f64 = 0.3;
/// Layout iterations per call.
pub const DEFAULT_ITERATIONS: usize = 50;
/// Seed for the initial placement.
pub const DEFAULT_SEED: u64 = 42;

/// Simulation units per layout unit.
const WORLD_SCALE: f32 = 100.0;
const STEP: f32 = 0.016;
/// Simulation updates per layout iteration. Fifty iterations then cover
/// enough simulated time for clusters to pull together and apart.
const STEPS_PER_ITERATION: usize = 40;
const NODE_MASS: f32 = 10.0;
const BASE_CHARGE: f32 = 150.0;

/// A point in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Position {
	/// Point at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Knobs of [`spring_layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	/// Preferred node spacing, relative to a unit-sized layout.
	pub k: f64,
	/// Number of layout iterations.
	pub iterations: usize,
	/// Seed for the initial placement.
	pub seed: u64,
	/// Half-width of the output box.
	pub scale: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			k: DEFAULT_K,
			iterations: DEFAULT_ITERATIONS,
			seed: DEFAULT_SEED,
			scale: 1.0,
		}
	}
}

impl LayoutParams {
	// Repulsion grows with the square of the preferred spacing.
	fn simulation(&self) -> SimulationParameters {
		let spread = (self.k / DEFAULT_K) as f32;
		SimulationParameters {
			force_charge: BASE_CHARGE * spread * spread,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// Node positions indexed by [`NodeIdx`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	positions: Vec<Position>,
}

impl Layout {
	/// Position of node `idx`, if the layout covers it.
	pub fn position(&self, idx: NodeIdx) -> Option<Position> {
		self.positions.get(idx).copied()
	}

	/// Number of positioned nodes.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// Whether no node is positioned.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// All positions in node order.
	pub fn positions(&self) -> &[Position] {
		&self.positions
	}
}

/// Lay out `graph`, giving every node exactly one position.
pub fn spring_layout(graph: &Graph, params: &LayoutParams) -> Layout {
	let mut rng = StdRng::seed_from_u64(params.seed);
	let initial: Vec<(f32, f32)> = (0..graph.node_count())
		.map(|_| {
			(
				rng.gen_range(0.0..1.0f32) * WORLD_SCALE,
				rng.gen_range(0.0..1.0f32) * WORLD_SCALE,
			)
		})
		.collect();

	let mut sim: ForceGraph<NodeIdx, ()> = ForceGraph::new(params.simulation());
	let handles: Vec<_> = initial
		.iter()
		.enumerate()
		.map(|(idx, &(x, y))| {
			sim.add_node(NodeData {
				x,
				y,
				mass: NODE_MASS,
				is_anchor: false,
				user_data: idx,
			})
		})
		.collect();

	// A self-loop has no length to relax.
	for edge in graph.edges().iter().filter(|e| !e.is_self_loop()) {
		sim.add_edge(
			handles[edge.source],
			handles[edge.target],
			EdgeData::default(),
		);
	}

	for _ in 0..params.iterations * STEPS_PER_ITERATION {
		sim.update(STEP);
	}

	let mut raw: Vec<Position> = initial
		.iter()
		.map(|&(x, y)| Position::new(x as f64, y as f64))
		.collect();
	sim.visit_nodes(|node| {
		let (x, y) = (node.x(), node.y());
		// Keep the starting point if the simulation blew up.
		if x.is_finite() && y.is_finite() {
			raw[node.data.user_data] = Position::new(x as f64, y as f64);
		}
	});

	Layout {
		positions: rescale(raw, params.scale),
	}
}

/// Centre on the origin and scale the largest absolute coordinate to `scale`.
fn rescale(mut positions: Vec<Position>, scale: f64) -> Vec<Position> {
	if positions.is_empty() {
		return positions;
	}
	let n = positions.len() as f64;
	let (sx, sy) = positions
		.iter()
		.fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
	let (cx, cy) = (sx / n, sy / n);

	let mut lim: f64 = 0.0;
	for p in positions.iter_mut() {
		p.x -= cx;
		p.y -= cy;
		lim = lim.max(p.x.abs()).max(p.y.abs());
	}

	let factor = if lim > 0.0 { scale / lim } else { 0.0 };
	for p in positions.iter_mut() {
		p.x *= factor;
		p.y *= factor;
	}
	positions
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::NodeAttributes;

	fn path(n: usize) -> Graph {
		let mut g = Graph::new();
		for i in 0..n {
			g.add_node(i.to_string(), NodeAttributes::new());
		}
		for i in 1..n {
			g.add_edge(&(i - 1).to_string(), &i.to_string()).unwrap();
		}
		g
	}

	#[test]
	fn empty_graph_has_empty_layout() {
		let layout = spring_layout(&Graph::new(), &LayoutParams::default());
		assert!(layout.is_empty());
	}

	#[test]
	fn single_node_sits_at_origin() {
		let layout = spring_layout(&path(1), &LayoutParams::default());
		assert_eq!(layout.positions(), &[Position::new(0.0, 0.0)]);
	}

	#[test]
	fn same_seed_gives_same_positions() {
		let g = path(12);
		let params = LayoutParams::default();
		assert_eq!(spring_layout(&g, &params), spring_layout(&g, &params));
	}

	#[test]
	fn different_seed_moves_nodes() {
		let g = path(12);
		let a = spring_layout(&g, &LayoutParams::default());
		let b = spring_layout(
			&g,
			&LayoutParams {
				seed: 7,
				..LayoutParams::default()
			},
		);
		assert_ne!(a, b);
	}

	#[test]
	fn positions_are_finite_and_within_scale() {
		let mut g = path(20);
		g.add_edge("3", "3").unwrap();
		g.add_edge("4", "5").unwrap();
		let params = LayoutParams {
			scale: 2.0,
			..LayoutParams::default()
		};
		let layout = spring_layout(&g, &params);
		assert_eq!(layout.len(), 20);
		let mut outermost: f64 = 0.0;
		for p in layout.positions() {
			assert!(p.x.is_finite() && p.y.is_finite());
			assert!(p.x.abs() <= 2.0 + 1e-9 && p.y.abs() <= 2.0 + 1e-9);
			outermost = outermost.max(p.x.abs()).max(p.y.abs());
		}
		assert!((outermost - 2.0).abs() < 1e-9);
	}

	fn mean_distance(layout: &Layout, pairs: &[(usize, usize)]) -> f64 {
		let total: f64 = pairs
			.iter()
			.map(|&(a, b)| {
				let (p, q) = (layout.positions()[a], layout.positions()[b]);
				((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt()
			})
			.sum();
		total / pairs.len() as f64
	}

	#[test]
	fn joined_cliques_separate_into_clusters() {
		let mut g = Graph::new();
		for i in 0..10 {
			g.add_node(i.to_string(), NodeAttributes::new());
		}
		let (mut inner, mut across) = (Vec::new(), Vec::new());
		for a in 0..10usize {
			for b in a + 1..10 {
				if (a < 5) == (b < 5) {
					g.add_edge(&a.to_string(), &b.to_string()).unwrap();
					inner.push((a, b));
				} else {
					across.push((a, b));
				}
			}
		}
		g.add_edge("4", "5").unwrap();

		let layout = spring_layout(&g, &LayoutParams::default());
		let (within, between) = (mean_distance(&layout, &inner), mean_distance(&layout, &across));
		assert!(within * 2.0 < between, "within {within}, between {between}");
	}

	#[test]
	fn linked_nodes_end_up_closer_than_average() {
		let g = path(20);
		let linked: Vec<_> = (1..20).map(|i| (i - 1, i)).collect();
		let all: Vec<_> = (0..20)
			.flat_map(|a| (a + 1..20).map(move |b| (a, b)))
			.collect();

		let layout = spring_layout(&g, &LayoutParams::default());
		assert!(mean_distance(&layout, &linked) * 1.5 < mean_distance(&layout, &all));
	}

	#[test]
	fn rescale_collapses_coincident_points_to_origin() {
		let out = rescale(vec![Position::new(3.0, 3.0); 3], 1.0);
		assert!(out.iter().all(|p| *p == Position::new(0.0, 0.0)));
	}
}
