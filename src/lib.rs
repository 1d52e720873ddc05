pub mod error;
pub mod math;
pub mod meshing;
pub mod outline;
pub mod preset;
pub mod refine;

pub use error::{CavmeshError, Result};
