mod component;
mod render;
pub mod scale;
mod state;

pub use component::ForceGraphCanvas;
