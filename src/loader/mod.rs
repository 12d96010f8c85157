pub mod json;

pub use crate::error::LoadError;
pub use json::{load_assessment, load_defects, load_solutions, validate_elements};
