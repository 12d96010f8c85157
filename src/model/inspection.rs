use serde::{Deserialize, Serialize};

/// One photo-analysis result produced by the external classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    #[serde(default)]
    pub defect: String,
    #[serde(default)]
    pub eliminating_method: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub analyzed: bool,
}

impl DefectRecord {
    /// Name shown for the photo, falling back to the last path component.
    #[must_use]
    pub fn display_filename(&self) -> &str {
        if !self.filename.is_empty() {
            return &self.filename;
        }
        self.file_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_path)
    }
}

/// A structural (constructive) solution recorded by the inspector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructiveSolutionItem {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub text: String,
}

impl ConstructiveSolutionItem {
    #[must_use]
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}
