use super::{BuildingType, ConditionCategory, ConstructionElement, ElementSnapshot, TechnicalCondition};
use crate::wear;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Tolerance used when checking that weights add up to 100.
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Ordered element list for one building inspection.
///
/// Derived figures (`total_wear`, condition) are always computed from the
/// elements on demand and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct WearAssessment {
    building_type: Option<BuildingType>,
    elements: Vec<ConstructionElement>,
}

impl WearAssessment {
    #[must_use]
    pub fn new(building_type: BuildingType) -> Self {
        Self {
            building_type: Some(building_type),
            elements: building_type.elements(),
        }
    }

    /// Assessment over an arbitrary element list (e.g. loaded from disk).
    #[must_use]
    pub fn from_elements(building_type: Option<BuildingType>, elements: Vec<ConstructionElement>) -> Self {
        Self {
            building_type,
            elements,
        }
    }

    #[must_use]
    pub fn building_type(&self) -> Option<BuildingType> {
        self.building_type
    }

    #[must_use]
    pub fn elements(&self) -> &[ConstructionElement] {
        &self.elements
    }

    #[must_use]
    pub fn element(&self, name: &str) -> Option<&ConstructionElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn total_wear(&self) -> f64 {
        wear::calculate_total_wear(&self.elements)
    }

    #[must_use]
    pub fn condition_category(&self) -> ConditionCategory {
        ConditionCategory::from_total_wear(self.total_wear())
    }

    #[must_use]
    pub fn technical_condition(&self) -> TechnicalCondition {
        wear::get_technical_condition(self.total_wear())
    }

    pub fn update_element_wear(&mut self, name: &str, new_value: f64) -> bool {
        wear::update_element_wear(&mut self.elements, name, new_value)
    }

    pub fn reset_all_wear(&mut self) {
        wear::reset_all_wear(&mut self.elements);
    }

    /// Replaces the element list with another preset.
    ///
    /// With `carry_forward`, wear values move over for elements whose names
    /// match exactly. Returns the number of carried values.
    pub fn switch_template(&mut self, building_type: BuildingType, carry_forward: bool) -> usize {
        let mut next = building_type.elements();
        let carried = if carry_forward {
            wear::carry_forward_wear(&self.elements, &mut next)
        } else {
            0
        };
        info!(
            from = ?self.building_type,
            to = %building_type,
            carried,
            "switched wear template"
        );
        self.elements = next;
        self.building_type = Some(building_type);
        carried
    }

    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.elements.iter().map(|e| e.weight_percent).sum()
    }

    /// Whether weights add up to 100. Reported, never enforced.
    #[must_use]
    pub fn weights_are_balanced(&self) -> bool {
        (self.weight_sum() - 100.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Snapshot with every derived value freshly computed.
    #[must_use]
    pub fn report(&self) -> WearReport {
        WearReport {
            building_type: self.building_type,
            elements: self.elements.iter().map(ElementSnapshot::from).collect(),
            total_wear: self.total_wear(),
            technical_condition: self.technical_condition(),
        }
    }
}

impl Default for WearAssessment {
    fn default() -> Self {
        Self::new(BuildingType::default())
    }
}

/// Persisted and reported form of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<BuildingType>,
    pub elements: Vec<ElementSnapshot>,
    pub total_wear: f64,
    pub technical_condition: TechnicalCondition,
}

impl WearReport {
    /// Rebuilds the live assessment; derived values are recomputed.
    #[must_use]
    pub fn to_assessment(&self) -> WearAssessment {
        WearAssessment::from_elements(
            self.building_type,
            self.elements.iter().map(ConstructionElement::from).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_assessment_is_balanced_and_unworn() {
        let assessment = WearAssessment::new(BuildingType::Industrial);
        assert!(assessment.weights_are_balanced());
        assert!(assessment.total_wear().abs() < f64::EPSILON);
        assert_eq!(assessment.condition_category(), ConditionCategory::Sound);
    }

    #[test]
    fn total_follows_element_edits() {
        let mut assessment = WearAssessment::new(BuildingType::Residential);
        assert!(assessment.update_element_wear("Стены и перегородки", 50.0));
        assert!((assessment.total_wear() - 14.0).abs() < 1e-9);
        assert!(assessment.update_element_wear("Стены и перегородки", 100.0));
        assert!((assessment.total_wear() - 28.0).abs() < 1e-9);
        assert_eq!(assessment.condition_category(), ConditionCategory::Serviceable);
    }

    #[test]
    fn switch_without_carry_forward_starts_clean() {
        let mut assessment = WearAssessment::new(BuildingType::Residential);
        assert!(assessment.update_element_wear("Полы", 40.0));
        let carried = assessment.switch_template(BuildingType::Office, false);
        assert_eq!(carried, 0);
        assert_eq!(assessment.building_type(), Some(BuildingType::Office));
        assert!(assessment.element("Каркас").is_some());
        assert!(assessment.total_wear().abs() < f64::EPSILON);
    }

    #[test]
    fn switch_with_carry_forward_keeps_shared_names() {
        let mut assessment = WearAssessment::new(BuildingType::Office);
        assert!(assessment.update_element_wear("Каркас", 60.0));
        assert!(assessment.update_element_wear("Полы", 40.0));
        assessment.switch_template(BuildingType::Industrial, true);
        assert!((assessment.element("Каркас").unwrap().wear_percent - 60.0).abs() < f64::EPSILON);
        assert!((assessment.element("Полы").unwrap().wear_percent - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn report_round_trips_through_assessment() {
        let mut assessment = WearAssessment::new(BuildingType::Residential);
        assert!(assessment.update_element_wear("Кровля", 70.0));
        let report = assessment.report();
        assert!((report.total_wear - 1.4).abs() < 1e-9);
        assert_eq!(report.to_assessment(), assessment);
    }
}
