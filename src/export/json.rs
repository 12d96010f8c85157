use super::write_atomically;
use crate::error::ExportError;
use crate::model::WearReport;
use std::path::Path;
use tracing::info;

/// Saves the wear snapshot as pretty JSON, replacing the file atomically.
pub fn save_assessment_json<P: AsRef<Path>>(report: &WearReport, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let json = serde_json::to_string_pretty(report)?;

    write_atomically(path_ref, json.as_bytes()).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    info!(path = %path_ref.display(), total_wear = report.total_wear, "saved wear assessment");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_assessment;
    use crate::model::{BuildingType, WearAssessment};
    use pretty_assertions::assert_eq;

    #[test]
    fn saved_snapshot_has_documented_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wear.json");

        let mut assessment = WearAssessment::new(BuildingType::Residential);
        assert!(assessment.update_element_wear("Фундаменты", 50.0));
        save_assessment_json(&assessment.report(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["elements"][0]["name"], "Фундаменты");
        assert_eq!(value["elements"][0]["weighted_wear"], 1.0);
        assert_eq!(value["total_wear"], 1.0);
        assert_eq!(value["technical_condition"]["category"], "Исправное");

        assert_eq!(load_assessment(&path).unwrap(), assessment);
    }
}
