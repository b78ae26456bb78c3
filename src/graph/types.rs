use std::collections::HashMap;

use super::attrs::NodeAttributes;
use crate::error::GraphError;

/// Dense index of a node inside its [`Graph`], in insertion order.
pub type NodeIdx = usize;

/// A node with its string id and attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Id as written in the source file.
	pub id: String,
	/// Attributes read from `<data>` children and key defaults.
	pub attributes: NodeAttributes,
}

/// Undirected edge between two existing nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Index of the first endpoint.
	pub source: NodeIdx,
	/// Index of the second endpoint.
	pub target: NodeIdx,
}

impl GraphEdge {
	/// Whether both endpoints are the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

/// An undirected multigraph with attributed nodes.
///
/// Edges hold node indices, so every endpoint refers to an existing node by
/// construction. Self-loops and parallel edges are kept as given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	id_to_idx: HashMap<String, NodeIdx>,
}

impl Graph {
	/// An empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a node, or merge `attributes` into an existing node with the same
	/// id. The node keeps its original position either way.
	pub fn add_node(&mut self, id: impl Into<String>, attributes: NodeAttributes) -> NodeIdx {
		let id = id.into();
		if let Some(&idx) = self.id_to_idx.get(&id) {
			self.nodes[idx].attributes.merge(attributes);
			return idx;
		}
		let idx = self.nodes.len();
		self.id_to_idx.insert(id.clone(), idx);
		self.nodes.push(GraphNode { id, attributes });
		idx
	}

	/// Add a node without attributes unless it already exists.
	pub fn ensure_node(&mut self, id: &str) -> NodeIdx {
		match self.id_to_idx.get(id) {
			Some(&idx) => idx,
			None => self.add_node(id, NodeAttributes::new()),
		}
	}

	/// Add an edge between two nodes that already exist.
	pub fn add_edge(&mut self, source: &str, target: &str) -> Result<(), GraphError> {
		let source = self.require(source)?;
		let target = self.require(target)?;
		self.edges.push(GraphEdge { source, target });
		Ok(())
	}

	fn require(&self, id: &str) -> Result<NodeIdx, GraphError> {
		self.id_to_idx
			.get(id)
			.copied()
			.ok_or_else(|| GraphError::UnknownEndpoint(id.to_string()))
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges, counting parallel edges and self-loops.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Node at `idx`, if any.
	pub fn node(&self, idx: NodeIdx) -> Option<&GraphNode> {
		self.nodes.get(idx)
	}

	/// Index of the node with this id.
	pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
		self.id_to_idx.get(id).copied()
	}

	/// Mutable attributes of the node at `idx`.
	pub fn attributes_of_mut(&mut self, idx: NodeIdx) -> Option<&mut NodeAttributes> {
		self.nodes.get_mut(idx).map(|n| &mut n.attributes)
	}

	/// Mutable access to every node's attributes, in node order.
	pub fn attributes_mut(&mut self) -> impl Iterator<Item = &mut NodeAttributes> {
		self.nodes.iter_mut().map(|n| &mut n.attributes)
	}
}
