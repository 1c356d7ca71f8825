pub mod constants;
pub mod direction;
pub mod error;
pub mod math;
pub mod settings;
pub mod types;

pub use error::CellmarchError;
pub use settings::SimSettings;
pub use types::{GenerationRules, GridDims, Neighbourhood};
