//! Visual encoding of a graph: layout, node sizes, colors and hover text.

mod hover;
pub mod layout;
mod pipeline;
pub mod size;

pub use hover::hover_label;
pub use layout::{Layout, LayoutParams, Position, spring_layout};
pub use pipeline::{EncodedEdge, EncodedNode, GeometryBundle, encode, encode_with};
pub use size::{MAX_NODE_PX, MIN_NODE_PX, SizeScale, degrees};
