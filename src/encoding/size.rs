//! Degree-based node sizing.

use crate::graph::Graph;

/// Diameter of the least connected nodes, in pixels.
pub const MIN_NODE_PX: f64 = 10.0;
/// Diameter of the most connected nodes, in pixels.
pub const MAX_NODE_PX: f64 = 50.0;

/// Number of edge ends touching each node, in node order.
///
/// Counted from the edge list only; stored `degree` or centrality attributes
/// are ignored. A self-loop touches its node twice.
pub fn degrees(graph: &Graph) -> Vec<usize> {
	let mut degrees = vec![0; graph.node_count()];
	for edge in graph.edges() {
		degrees[edge.source] += 1;
		degrees[edge.target] += 1;
	}
	degrees
}

/// Min-max mapping from degree onto `[MIN_NODE_PX, MAX_NODE_PX]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeScale {
	/// Smallest degree in the graph.
	pub min_degree: usize,
	/// Largest degree in the graph.
	pub max_degree: usize,
}

impl Default for SizeScale {
	fn default() -> Self {
		Self {
			min_degree: 0,
			max_degree: 1,
		}
	}
}

impl SizeScale {
	/// Scale spanning the given degrees; `(0, 1)` when there are none.
	pub fn from_degrees(degrees: &[usize]) -> Self {
		match (degrees.iter().min(), degrees.iter().max()) {
			(Some(&min_degree), Some(&max_degree)) => Self {
				min_degree,
				max_degree,
			},
			_ => Self::default(),
		}
	}

	/// Degree spread, never zero.
	pub fn range(&self) -> f64 {
		match self.max_degree.saturating_sub(self.min_degree) {
			0 => 1.0,
			r => r as f64,
		}
	}

	/// Marker diameter for `degree`.
	pub fn pixel_size(&self, degree: usize) -> f64 {
		let normalized = (degree as f64 - self.min_degree as f64) / self.range();
		MIN_NODE_PX + normalized * (MAX_NODE_PX - MIN_NODE_PX)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{AttrValue, NodeAttributes};

	#[test]
	fn degree_counts_edges_not_attributes() {
		let mut g = Graph::new();
		g.add_node("a", NodeAttributes::new().with("degree", AttrValue::Float(0.9)));
		g.add_node("b", NodeAttributes::new());
		g.add_node("c", NodeAttributes::new());
		g.add_edge("a", "b").unwrap();
		g.add_edge("a", "b").unwrap();
		g.add_edge("c", "c").unwrap();
		assert_eq!(degrees(&g), vec![2, 2, 2]);
	}

	#[test]
	fn empty_defaults_to_zero_one() {
		assert_eq!(SizeScale::from_degrees(&[]), SizeScale::default());
		assert_eq!(SizeScale::default().range(), 1.0);
	}

	#[test]
	fn extremes_map_to_bounds() {
		let scale = SizeScale::from_degrees(&[1, 4, 2, 1]);
		assert_eq!(scale.pixel_size(1), MIN_NODE_PX);
		assert_eq!(scale.pixel_size(4), MAX_NODE_PX);
		assert!((scale.pixel_size(2) - (10.0 + 40.0 / 3.0)).abs() < 1e-9);
	}

	#[test]
	fn equal_degrees_all_map_to_minimum() {
		let scale = SizeScale::from_degrees(&[3, 3, 3]);
		assert_eq!(scale.range(), 1.0);
		assert_eq!(scale.pixel_size(3), MIN_NODE_PX);
	}
}
