//! Graph to geometry.

use log::debug;

use super::hover::hover_label;
use super::layout::{Layout, LayoutParams, Position, spring_layout};
use super::size::{SizeScale, degrees};
use crate::error::EncodeError;
use crate::graph::{Graph, NodeIdx};

/// One node ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedNode {
	/// Node id.
	pub id: String,
	/// Layout position.
	pub position: Position,
	/// Hover text.
	pub label: String,
	/// Number of incident edge ends.
	pub degree: usize,
	/// Marker diameter in pixels.
	pub size_px: f64,
	/// Raw `community_id`; mapped to a color by the renderer.
	pub color_value: f64,
}

/// Line segment between two node positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncodedEdge {
	/// Position of the source node.
	pub from: Position,
	/// Position of the target node.
	pub to: Position,
}

/// Everything needed to draw one graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryBundle {
	/// Dataset name.
	pub name: String,
	/// Nodes in graph order.
	pub nodes: Vec<EncodedNode>,
	/// Edges in graph order.
	pub edges: Vec<EncodedEdge>,
	/// `(min, max)` degree, `(0, 1)` for an empty graph.
	pub degree_range: (usize, usize),
	/// `(min, max)` color value, `(0.0, 1.0)` for an empty graph.
	pub community_range: (f64, f64),
}

impl Default for GeometryBundle {
	fn default() -> Self {
		Self {
			name: String::new(),
			nodes: Vec::new(),
			edges: Vec::new(),
			degree_range: (0, 1),
			community_range: (0.0, 1.0),
		}
	}
}

impl GeometryBundle {
	/// Number of encoded nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of encoded edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}
}

/// Encode `graph` with the default layout parameters.
///
/// `name` is carried into the bundle for labeling only.
pub fn encode(graph: &Graph, name: &str) -> Result<GeometryBundle, EncodeError> {
	encode_with(graph, name, &LayoutParams::default())
}

/// Encode `graph` with explicit layout parameters.
pub fn encode_with(
	graph: &Graph,
	name: &str,
	params: &LayoutParams,
) -> Result<GeometryBundle, EncodeError> {
	let layout = spring_layout(graph, params);
	let degrees = degrees(graph);
	let sizes = SizeScale::from_degrees(&degrees);

	let nodes = graph
		.nodes()
		.iter()
		.zip(&degrees)
		.enumerate()
		.map(|(idx, (node, &degree))| {
			let color_value = node.attributes.community_id();
			Ok(EncodedNode {
				id: node.id.clone(),
				position: position_of(graph, &layout, idx)?,
				label: hover_label(&node.id, degree, color_value),
				degree,
				size_px: sizes.pixel_size(degree),
				color_value,
			})
		})
		.collect::<Result<Vec<_>, EncodeError>>()?;

	let edges = graph
		.edges()
		.iter()
		.map(|edge| {
			Ok(EncodedEdge {
				from: position_of(graph, &layout, edge.source)?,
				to: position_of(graph, &layout, edge.target)?,
			})
		})
		.collect::<Result<Vec<_>, EncodeError>>()?;

	let community_range = nodes
		.iter()
		.map(|n| n.color_value)
		.fold(None, |acc: Option<(f64, f64)>, v| match acc {
			None => Some((v, v)),
			Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
		})
		.unwrap_or((0.0, 1.0));

	debug!(
		"encoded {name}: {} nodes, {} edges, degree {}..{}",
		nodes.len(),
		edges.len(),
		sizes.min_degree,
		sizes.max_degree
	);

	Ok(GeometryBundle {
		name: name.to_string(),
		nodes,
		edges,
		degree_range: (sizes.min_degree, sizes.max_degree),
		community_range,
	})
}

fn position_of(graph: &Graph, layout: &Layout, idx: NodeIdx) -> Result<Position, EncodeError> {
	layout.position(idx).ok_or_else(|| {
		let id = graph.node(idx).map(|n| n.id.clone()).unwrap_or_default();
		EncodeError::MissingPosition(id)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::encoding::size::{MAX_NODE_PX, MIN_NODE_PX};
	use crate::graph::{AttrValue, NodeAttributes};

	fn graph(nodes: &[(&str, i64)], edges: &[(&str, &str)]) -> Graph {
		let mut g = Graph::new();
		for &(id, community) in nodes {
			g.add_node(
				id,
				NodeAttributes::new().with("community_id", AttrValue::Int(community)),
			);
		}
		for &(a, b) in edges {
			g.add_edge(a, b).unwrap();
		}
		g
	}

	#[test]
	fn empty_graph_gives_empty_bundle_with_default_ranges() {
		let bundle = encode(&Graph::new(), "empty").unwrap();
		assert_eq!(bundle.node_count(), 0);
		assert_eq!(bundle.edge_count(), 0);
		assert_eq!(bundle.degree_range, (0, 1));
		assert_eq!(bundle.community_range, (0.0, 1.0));
		assert_eq!(bundle.name, "empty");
	}

	#[test]
	fn single_isolated_node() {
		let bundle = encode(&graph(&[("solo", 5)], &[]), "solo").unwrap();
		assert_eq!(bundle.nodes.len(), 1);
		let node = &bundle.nodes[0];
		assert_eq!(node.size_px, MIN_NODE_PX);
		assert_eq!(node.position, Position::new(0.0, 0.0));
		assert_eq!(bundle.community_range, (5.0, 5.0));
	}

	#[test]
	fn triangle_nodes_are_all_minimum_size() {
		let g = graph(
			&[("a", 0), ("b", 0), ("c", 1)],
			&[("a", "b"), ("b", "c"), ("c", "a")],
		);
		let bundle = encode(&g, "triangle").unwrap();
		assert_eq!(bundle.nodes.len(), 3);
		assert_eq!(bundle.edges.len(), 3);
		for node in &bundle.nodes {
			assert_eq!(node.size_px, MIN_NODE_PX);
			assert_eq!(node.degree, 2);
			assert!(node.label.contains("Degree: 2"));
		}
	}

	#[test]
	fn star_center_is_maximum_size() {
		let g = graph(
			&[("hub", 1), ("a", 2), ("b", 2), ("c", 3), ("d", 3)],
			&[("hub", "a"), ("hub", "b"), ("hub", "c"), ("hub", "d")],
		);
		let bundle = encode(&g, "star").unwrap();
		assert_eq!(bundle.nodes[0].size_px, MAX_NODE_PX);
		assert!(bundle.nodes[1..].iter().all(|n| n.size_px == MIN_NODE_PX));
		assert_eq!(bundle.degree_range, (1, 4));
		assert_eq!(bundle.community_range, (1.0, 3.0));
	}

	#[test]
	fn edges_follow_input_order_and_node_positions() {
		let g = graph(&[("a", 0), ("b", 0), ("c", 0)], &[("c", "a"), ("a", "b")]);
		let bundle = encode(&g, "order").unwrap();
		let pos = |i: usize| bundle.nodes[i].position;
		assert_eq!(bundle.edges[0], EncodedEdge { from: pos(2), to: pos(0) });
		assert_eq!(bundle.edges[1], EncodedEdge { from: pos(0), to: pos(1) });
	}

	#[test]
	fn color_value_is_raw_community_id() {
		let mut g = graph(&[("a", 7)], &[]);
		g.add_node("b", NodeAttributes::new());
		let bundle = encode(&g, "colors").unwrap();
		assert_eq!(bundle.nodes[0].color_value, 7.0);
		assert_eq!(bundle.nodes[1].color_value, 0.0);
		assert_eq!(bundle.community_range, (0.0, 7.0));
	}

	#[test]
	fn encoding_is_repeatable() {
		let g = graph(
			&[("a", 0), ("b", 1), ("c", 1), ("d", 2)],
			&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a"), ("a", "c")],
		);
		assert_eq!(encode(&g, "g").unwrap(), encode(&g, "g").unwrap());
	}
}
