pub mod assessment;
pub mod condition;
pub mod element;
pub mod inspection;
pub mod template;

pub use assessment::{WearAssessment, WearReport};
pub use condition::{ConditionCategory, TechnicalCondition};
pub use element::{ConstructionElement, ElementSnapshot};
pub use inspection::{ConstructiveSolutionItem, DefectRecord};
pub use template::BuildingType;
