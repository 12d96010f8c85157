use super::write_atomically;
use crate::error::ExportError;
use crate::model::{ConstructionElement, WearReport};
use crate::wear::{calculate_total_wear, round_one_decimal};
use std::path::Path;

/// Exports the wear table: one row per element plus a totals row.
pub fn export_wear_csv<P: AsRef<Path>>(report: &WearReport, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["Element", "Weight %", "Wear %", "Weighted Wear %"])?;

    let elements: Vec<ConstructionElement> =
        report.elements.iter().map(ConstructionElement::from).collect();
    for element in &elements {
        writer.write_record([
            element.name.clone(),
            format!("{:.1}", element.weight_percent),
            format!("{:.1}", element.wear_percent),
            format!("{:.2}", element.weighted_wear()),
        ])?;
    }

    let weight_sum: f64 = elements.iter().map(|e| e.weight_percent).sum();
    writer.write_record([
        "Total".to_string(),
        format!("{:.1}", round_one_decimal(weight_sum)),
        "-".to_string(),
        format!("{:.1}", calculate_total_wear(&elements)),
    ])?;

    let bytes = writer.into_inner().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    write_atomically(path_ref, &bytes).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    Ok(())
}
