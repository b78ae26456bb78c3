//! Graph model, GraphML reading and folder loading.

pub mod attrs;
pub mod cache;
pub mod graphml;
pub mod loader;
mod types;

pub use attrs::{AttrValue, NodeAttributes, try_parse_numeric};
pub use cache::CatalogCache;
pub use loader::{Catalog, GRAPH_EXTENSION, LoadOutcome, load_folder, load_sources};
pub use types::{Graph, GraphEdge, GraphNode, NodeIdx};
