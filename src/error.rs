//! Error types for graph loading and encoding.

use std::path::PathBuf;

use thiserror::Error;

/// Violations of the graph model invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	/// An edge referenced a node id that was never added.
	#[error("edge endpoint `{0}` is not a node of the graph")]
	UnknownEndpoint(String),
}

/// Failures while reading a GraphML document.
#[derive(Debug, Error)]
pub enum GraphmlError {
	/// The XML reader rejected the input.
	#[error("malformed XML at byte {position}: {source}")]
	Xml {
		/// Byte offset where reading stopped.
		position: u64,
		/// Reader error.
		#[source]
		source: quick_xml::Error,
	},

	/// The document ended with elements still open.
	#[error("document ends with {open} unclosed element(s)")]
	Truncated {
		/// Elements left open.
		open: usize,
	},

	/// No `<graph>` element in the document.
	#[error("no <graph> element found")]
	MissingGraph,

	/// A `<key>`, `<node>`, `<edge>` or `<data>` lacks an attribute it needs.
	#[error("<{element}> is missing required attribute `{attribute}`")]
	MissingAttribute {
		/// Element name.
		element: &'static str,
		/// Missing attribute name.
		attribute: &'static str,
	},

	/// The document describes an invalid graph.
	#[error(transparent)]
	Graph(#[from] GraphError),
}

/// Failures while loading a single graph file. These are recovered by the
/// loader: the file is skipped and the batch continues.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The file could not be read.
	#[error("failed to read {path}: {source}")]
	Io {
		/// File that failed.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// The file was read but is not a usable GraphML graph.
	#[error("failed to parse {name}: {source}")]
	Parse {
		/// File name of the dataset.
		name: String,
		/// Parser error.
		#[source]
		source: GraphmlError,
	},
}

/// Contract violations detected while encoding a graph. These abort the
/// render instead of producing partial geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
	/// The layout has no entry for this node id.
	#[error("layout produced no position for node `{0}`")]
	MissingPosition(String),
}
