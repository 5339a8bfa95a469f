pub mod error;
pub mod marks;
#[cfg(feature = "png")]
pub mod png;
pub mod scene_graph;
pub mod svg;
