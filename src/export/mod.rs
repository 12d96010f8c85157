pub mod atomic;
pub mod csv;
pub mod json;

pub use crate::error::ExportError;
pub use atomic::write_atomically;
pub use csv::export_wear_csv;
pub use json::save_assessment_json;
