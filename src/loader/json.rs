use crate::error::LoadError;
use crate::model::{
    BuildingType, ConstructionElement, ConstructiveSolutionItem, DefectRecord, ElementSnapshot,
    WearAssessment,
};
use crate::wear::WEAR_RANGE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

// Derived fields in the file (weighted_wear, total_wear, condition) are
// ignored and recomputed.
#[derive(Debug, Deserialize)]
struct PersistedAssessment {
    #[serde(default)]
    building_type: Option<BuildingType>,
    elements: Vec<ElementSnapshot>,
}

/// Loads a saved wear assessment.
///
/// Every element must have a unique non-empty name and weight/wear values
/// within 0..=100.
///
/// # Errors
///
/// Returns [`LoadError::FileRead`] if the file cannot be read,
/// [`LoadError::Json`] if it is not a valid assessment document and
/// [`LoadError::InvalidData`] if an element breaks the rules above.
pub fn load_assessment<P: AsRef<Path>>(path: P) -> Result<WearAssessment, LoadError> {
    let persisted: PersistedAssessment = read_json(path.as_ref())?;
    let elements: Vec<ConstructionElement> = persisted
        .elements
        .iter()
        .map(ConstructionElement::from)
        .collect();
    validate_elements(&elements)?;

    let assessment = WearAssessment::from_elements(persisted.building_type, elements);
    info!(
        path = %path.as_ref().display(),
        elements = assessment.elements().len(),
        total_wear = assessment.total_wear(),
        "loaded wear assessment"
    );
    Ok(assessment)
}

pub fn load_defects<P: AsRef<Path>>(path: P) -> Result<Vec<DefectRecord>, LoadError> {
    read_json(path.as_ref())
}

pub fn load_solutions<P: AsRef<Path>>(path: P) -> Result<Vec<ConstructiveSolutionItem>, LoadError> {
    read_json(path.as_ref())
}

pub fn validate_elements(elements: &[ConstructionElement]) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    for element in elements {
        if element.name.trim().is_empty() {
            return Err(invalid("element with empty name".to_string()));
        }
        if !seen.insert(element.name.as_str()) {
            return Err(invalid(format!("duplicate element '{}'", element.name)));
        }
        if !WEAR_RANGE.contains(&element.weight_percent) {
            return Err(invalid(format!(
                "weight of '{}' out of range: {}",
                element.name, element.weight_percent
            )));
        }
        if !WEAR_RANGE.contains(&element.wear_percent) {
            return Err(invalid(format!(
                "wear of '{}' out of range: {}",
                element.name, element.wear_percent
            )));
        }
    }
    Ok(())
}

fn invalid(message: String) -> LoadError {
    LoadError::InvalidData { message }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn stale_derived_values_are_recomputed() {
        let file = temp_json(
            r#"{
                "elements": [
                    {"name": "Фундаменты", "weight_percent": 50.0, "wear_percent": 20.0, "weighted_wear": 99.0},
                    {"name": "Стены", "weight_percent": 50.0, "wear_percent": 40.0, "weighted_wear": 0.0}
                ],
                "total_wear": 0.0,
                "technical_condition": {"category": "Исправное", "description": "", "recommendation": ""}
            }"#,
        );
        let assessment = load_assessment(file.path()).unwrap();
        assert!((assessment.total_wear() - 30.0).abs() < 1e-9);
        assert_eq!(assessment.building_type(), None);
        assert_eq!(assessment.technical_condition().category.label(), "Работоспособное");
    }

    #[test]
    fn out_of_range_wear_is_rejected() {
        let file = temp_json(
            r#"{"elements": [{"name": "Полы", "weight_percent": 8.0, "wear_percent": 120.0}]}"#,
        );
        let err = load_assessment(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidData { .. }), "{err}");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let file = temp_json(
            r#"{"elements": [
                {"name": "Полы", "weight_percent": 50.0, "wear_percent": 1.0},
                {"name": "Полы", "weight_percent": 50.0, "wear_percent": 2.0}
            ]}"#,
        );
        assert!(matches!(
            load_assessment(file.path()),
            Err(LoadError::InvalidData { .. })
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let file = temp_json("{ not json");
        assert!(matches!(load_assessment(file.path()), Err(LoadError::Json { .. })));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            load_defects("/definitely/not/here.json"),
            Err(LoadError::FileRead { .. })
        ));
    }

    #[test]
    fn loads_external_inputs() {
        let defects = temp_json(
            r#"[{"defect": "crack", "eliminating_method": "inject", "file_path": "a.jpg", "filename": "a.jpg", "analyzed": true}]"#,
        );
        let solutions = temp_json(r#"[{"category": "Walls", "text": "brick"}]"#);

        let defects = load_defects(defects.path()).unwrap();
        assert_eq!(defects.len(), 1);
        assert!(defects[0].analyzed);

        let solutions = load_solutions(solutions.path()).unwrap();
        assert_eq!(solutions, vec![ConstructiveSolutionItem::new("Walls", "brick")]);
    }
}
