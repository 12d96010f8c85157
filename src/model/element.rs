use serde::{Deserialize, Serialize};

/// One structural category of a building with its cost share and wear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionElement {
    pub name: String,
    pub weight_percent: f64,
    #[serde(default)]
    pub wear_percent: f64,
}

impl ConstructionElement {
    #[must_use]
    pub fn new(name: impl Into<String>, weight_percent: f64) -> Self {
        Self {
            name: name.into(),
            weight_percent,
            wear_percent: 0.0,
        }
    }

    #[must_use]
    pub fn with_wear(mut self, wear_percent: f64) -> Self {
        self.wear_percent = wear_percent;
        self
    }

    /// This element's contribution to the building's total wear.
    #[must_use]
    pub fn weighted_wear(&self) -> f64 {
        self.weight_percent * self.wear_percent / 100.0
    }
}

/// Serialized view of an element, carrying the derived `weighted_wear`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub name: String,
    pub weight_percent: f64,
    pub wear_percent: f64,
    #[serde(default)]
    pub weighted_wear: f64,
}

impl From<&ConstructionElement> for ElementSnapshot {
    fn from(element: &ConstructionElement) -> Self {
        Self {
            name: element.name.clone(),
            weight_percent: element.weight_percent,
            wear_percent: element.wear_percent,
            weighted_wear: element.weighted_wear(),
        }
    }
}

impl From<&ElementSnapshot> for ConstructionElement {
    fn from(snapshot: &ElementSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            weight_percent: snapshot.weight_percent,
            wear_percent: snapshot.wear_percent,
        }
    }
}
