//! GraphML reader.
//!
//! Reads `<key>` declarations, nodes, edges and node `<data>` values into a
//! [`Graph`]. Node data is typed by the declaring key's `attr.type`; edge and
//! graph data are skipped. Edges may name nodes that were never declared, in
//! which case those nodes are created without attributes.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::attrs::{AttrValue, NodeAttributes};
use super::types::{Graph, NodeIdx};
use crate::error::GraphmlError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttrType {
	Text,
	Int,
	Float,
	Bool,
}

impl AttrType {
	fn from_decl(decl: Option<&str>) -> Self {
		match decl {
			Some("int" | "long") => AttrType::Int,
			Some("float" | "double") => AttrType::Float,
			Some("boolean") => AttrType::Bool,
			_ => AttrType::Text,
		}
	}

	/// Values that do not parse as the declared type are kept as text.
	fn parse(self, raw: &str) -> AttrValue {
		let trimmed = raw.trim();
		let typed = match self {
			AttrType::Text => None,
			AttrType::Int => trimmed.parse().ok().map(AttrValue::Int),
			AttrType::Float => trimmed.parse().ok().map(AttrValue::Float),
			AttrType::Bool => match trimmed.to_ascii_lowercase().as_str() {
				"true" | "1" => Some(AttrValue::Bool(true)),
				"false" | "0" => Some(AttrValue::Bool(false)),
				_ => None,
			},
		};
		typed.unwrap_or_else(|| AttrValue::Text(raw.to_string()))
	}
}

#[derive(Clone, Debug)]
struct KeyDecl {
	name: String,
	ty: AttrType,
	for_nodes: bool,
	default: Option<String>,
}

enum Scope {
	Node(NodeIdx),
	Edge,
	Other,
}

struct GraphmlParser {
	graph: Graph,
	keys: HashMap<String, KeyDecl>,
	open_key: Option<(String, KeyDecl)>,
	scopes: Vec<Scope>,
	/// Key id and accumulated text of the `<data>` being read, if it targets a node.
	data: Option<(String, String)>,
	default_text: Option<String>,
	saw_graph: bool,
	/// Elements opened but not yet closed.
	depth: usize,
}

impl GraphmlParser {
	fn new() -> Self {
		Self {
			graph: Graph::new(),
			keys: HashMap::new(),
			open_key: None,
			scopes: Vec::new(),
			data: None,
			default_text: None,
			saw_graph: false,
			depth: 0,
		}
	}

	fn handle_start(&mut self, e: &BytesStart<'_>, position: u64) -> Result<(), GraphmlError> {
		let xml_err = |source| GraphmlError::Xml { position, source };
		match e.local_name().as_ref() {
			b"key" => {
				let id = required(e, "key", "id", position)?;
				let name = attribute(e, b"attr.name").map_err(xml_err)?;
				let ty = attribute(e, b"attr.type").map_err(xml_err)?;
				let domain = attribute(e, b"for").map_err(xml_err)?;
				let decl = KeyDecl {
					name: name.unwrap_or_else(|| id.clone()),
					ty: AttrType::from_decl(ty.as_deref()),
					for_nodes: matches!(domain.as_deref(), None | Some("node" | "all")),
					default: None,
				};
				self.open_key = Some((id, decl));
			}
			b"default" if self.open_key.is_some() => {
				self.default_text = Some(String::new());
			}
			b"graph" => {
				self.saw_graph = true;
				self.scopes.push(Scope::Other);
			}
			b"node" => {
				let id = required(e, "node", "id", position)?;
				let idx = self.graph.ensure_node(&id);
				self.scopes.push(Scope::Node(idx));
			}
			b"edge" => {
				let source = required(e, "edge", "source", position)?;
				let target = required(e, "edge", "target", position)?;
				self.graph.ensure_node(&source);
				self.graph.ensure_node(&target);
				self.graph.add_edge(&source, &target)?;
				self.scopes.push(Scope::Edge);
			}
			b"data" => {
				if let Some(Scope::Node(_)) = self.scopes.last() {
					let key = required(e, "data", "key", position)?;
					self.data = Some((key, String::new()));
				}
			}
			_ => {}
		}
		Ok(())
	}

	fn handle_text(&mut self, text: &str) {
		if let Some((_, buf)) = self.data.as_mut() {
			buf.push_str(text);
		} else if let Some(buf) = self.default_text.as_mut() {
			buf.push_str(text);
		}
	}

	fn handle_end(&mut self, local_name: &[u8]) {
		match local_name {
			b"key" => {
				if let Some((id, decl)) = self.open_key.take() {
					self.keys.insert(id, decl);
				}
			}
			b"default" => {
				if let (Some(text), Some((_, decl))) =
					(self.default_text.take(), self.open_key.as_mut())
				{
					decl.default = Some(text);
				}
			}
			b"data" => self.finish_data(),
			b"graph" | b"node" | b"edge" => {
				self.scopes.pop();
			}
			_ => {}
		}
	}

	fn finish_data(&mut self) {
		let Some((key, text)) = self.data.take() else {
			return;
		};
		let Some(Scope::Node(idx)) = self.scopes.last() else {
			return;
		};
		let (name, value) = match self.keys.get(&key) {
			Some(decl) if decl.for_nodes => (decl.name.clone(), decl.ty.parse(&text)),
			Some(_) => return,
			// Undeclared keys are kept verbatim under their id.
			None => (key, AttrValue::Text(text)),
		};
		if let Some(attrs) = self.graph.attributes_of_mut(*idx) {
			attrs.insert(name, value);
		}
	}

	fn finish(mut self) -> Result<Graph, GraphmlError> {
		if self.depth > 0 {
			return Err(GraphmlError::Truncated { open: self.depth });
		}
		if !self.saw_graph {
			return Err(GraphmlError::MissingGraph);
		}
		let defaults: Vec<(String, AttrValue)> = self
			.keys
			.values()
			.filter(|decl| decl.for_nodes)
			.filter_map(|decl| {
				let text = decl.default.as_ref()?;
				Some((decl.name.clone(), decl.ty.parse(text)))
			})
			.collect();
		if !defaults.is_empty() {
			self.graph.attributes_mut().for_each(|attrs| apply_defaults(attrs, &defaults));
		}
		Ok(self.graph)
	}
}

fn apply_defaults(attrs: &mut NodeAttributes, defaults: &[(String, AttrValue)]) {
	for (name, value) in defaults {
		if attrs.get(name).is_none() {
			attrs.insert(name.clone(), value.clone());
		}
	}
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, quick_xml::Error> {
	for attr in e.attributes() {
		let attr = attr.map_err(quick_xml::Error::from)?;
		if attr.key.local_name().as_ref() == name {
			return Ok(Some(attr.unescape_value()?.into_owned()));
		}
	}
	Ok(None)
}

fn required(
	e: &BytesStart<'_>,
	element: &'static str,
	name: &'static str,
	position: u64,
) -> Result<String, GraphmlError> {
	attribute(e, name.as_bytes())
		.map_err(|source| GraphmlError::Xml { position, source })?
		.ok_or(GraphmlError::MissingAttribute {
			element,
			attribute: name,
		})
}

/// Parse a GraphML document.
pub fn parse_graphml(xml: &str) -> Result<Graph, GraphmlError> {
	let mut reader = Reader::from_str(xml);
	let mut parser = GraphmlParser::new();

	loop {
		let event = reader.read_event();
		let position = reader.buffer_position() as u64;
		let event = event.map_err(|source| GraphmlError::Xml { position, source })?;
		match event {
			Event::Start(ref e) => {
				parser.depth += 1;
				parser.handle_start(e, position)?;
			}
			Event::Empty(ref e) => {
				parser.handle_start(e, position)?;
				parser.handle_end(e.local_name().as_ref());
			}
			Event::Text(ref e) => {
				let text = e
					.unescape()
					.map_err(|source| GraphmlError::Xml { position, source })?;
				parser.handle_text(&text);
			}
			Event::CData(ref e) => parser.handle_text(&String::from_utf8_lossy(e)),
			Event::End(ref e) => {
				parser.depth = parser.depth.saturating_sub(1);
				parser.handle_end(e.local_name().as_ref());
			}
			Event::Eof => break,
			_ => {}
		}
	}

	parser.finish()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::attrs::{COMMUNITY_ID, SIZE};

	const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="community_id" attr.type="long"/>
  <key id="d1" for="node" attr.name="size" attr.type="string"/>
  <key id="d2" for="node" attr.name="label" attr.type="string">
    <default>unnamed</default>
  </key>
  <key id="d3" for="edge" attr.name="weight" attr.type="double"/>
  <graph id="G" edgedefault="undirected">
    <node id="rust">
      <data key="d0">1</data>
      <data key="d1">12.5</data>
      <data key="d2">Rust &amp; Cargo</data>
    </node>
    <node id="python">
      <data key="d0">2</data>
    </node>
    <edge source="rust" target="python">
      <data key="d3">0.5</data>
    </edge>
  </graph>
</graphml>"#;

	#[test]
	fn reads_nodes_edges_and_typed_data() {
		let g = parse_graphml(SAMPLE).unwrap();
		assert_eq!(g.node_count(), 2);
		assert_eq!(g.edge_count(), 1);

		let rust = &g.nodes()[0];
		assert_eq!(rust.id, "rust");
		assert_eq!(rust.attributes.get(COMMUNITY_ID), Some(&AttrValue::Int(1)));
		assert_eq!(
			rust.attributes.get(SIZE),
			Some(&AttrValue::Text("12.5".into()))
		);
		assert_eq!(
			rust.attributes.get("label"),
			Some(&AttrValue::Text("Rust & Cargo".into()))
		);
		assert!(rust.attributes.get("weight").is_none());
	}

	#[test]
	fn applies_key_defaults() {
		let g = parse_graphml(SAMPLE).unwrap();
		let python = &g.nodes()[1];
		assert_eq!(
			python.attributes.get("label"),
			Some(&AttrValue::Text("unnamed".into()))
		);
	}

	#[test]
	fn mistyped_values_stay_text() {
		let xml = r#"<graphml>
  <key id="c" for="node" attr.name="community_id" attr.type="int"/>
  <graph><node id="a"><data key="c">blue</data></node></graph>
</graphml>"#;
		let g = parse_graphml(xml).unwrap();
		assert_eq!(
			g.nodes()[0].attributes.get(COMMUNITY_ID),
			Some(&AttrValue::Text("blue".into()))
		);
		assert_eq!(g.nodes()[0].attributes.community_id(), 0.0);
	}

	#[test]
	fn undeclared_edge_endpoints_become_nodes() {
		let xml = r#"<graphml><graph edgedefault="directed">
  <node id="a"/>
  <edge source="a" target="b"/>
</graph></graphml>"#;
		let g = parse_graphml(xml).unwrap();
		assert_eq!(g.node_count(), 2);
		assert_eq!(g.index_of("b"), Some(1));
		assert!(g.nodes()[1].attributes.is_empty());
	}

	#[test]
	fn missing_graph_element_is_an_error() {
		let err = parse_graphml("<graphml></graphml>").unwrap_err();
		assert!(matches!(err, GraphmlError::MissingGraph));
	}

	#[test]
	fn node_without_id_is_an_error() {
		let err = parse_graphml("<graphml><graph><node/></graph></graphml>").unwrap_err();
		assert!(matches!(
			err,
			GraphmlError::MissingAttribute {
				element: "node",
				attribute: "id"
			}
		));
	}

	#[test]
	fn truncated_document_is_an_error() {
		let xml = r#"<graphml><graph><node id="a"/><node id="b"/><edge source="a" target="b"/>"#;
		let err = parse_graphml(xml).unwrap_err();
		assert!(matches!(err, GraphmlError::Truncated { open: 2 }), "{err}");
	}

	#[test]
	fn mismatched_tags_are_an_error() {
		let err = parse_graphml("<graphml><graph><node id=\"a\"></graph></graphml>").unwrap_err();
		assert!(matches!(err, GraphmlError::Xml { .. }));
	}
}
