pub mod marching;
pub mod tables;
pub mod vertex;

pub use marching::{ExtractionStats, MarchingCubes};
pub use vertex::MeshVertex;
