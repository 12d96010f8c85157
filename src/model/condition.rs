use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-tier technical condition rating derived from total wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionCategory {
    #[serde(rename = "Исправное")]
    Sound,
    #[serde(rename = "Работоспособное")]
    Serviceable,
    #[serde(rename = "Ограниченно работоспособное")]
    Limited,
    #[serde(rename = "Аварийное")]
    Critical,
}

impl ConditionCategory {
    /// Bracket lookup; each upper bound is inclusive.
    #[must_use]
    pub fn from_total_wear(total_wear: f64) -> Self {
        if total_wear <= 20.0 {
            Self::Sound
        } else if total_wear <= 40.0 {
            Self::Serviceable
        } else if total_wear <= 60.0 {
            Self::Limited
        } else {
            Self::Critical
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sound => "Исправное",
            Self::Serviceable => "Работоспособное",
            Self::Limited => "Ограниченно работоспособное",
            Self::Critical => "Аварийное",
        }
    }

    #[must_use]
    pub fn english_label(self) -> &'static str {
        match self {
            Self::Sound => "Sound",
            Self::Serviceable => "Serviceable",
            Self::Limited => "Limited",
            Self::Critical => "Critical",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Sound => "Повреждений и деформаций нет, несущая способность обеспечена",
            Self::Serviceable => {
                "Имеются отдельные дефекты, не снижающие несущую способность конструкций"
            }
            Self::Limited => {
                "Имеются дефекты и повреждения, приведшие к снижению несущей способности"
            }
            Self::Critical => {
                "Повреждения и деформации свидетельствуют об опасности обрушения"
            }
        }
    }

    #[must_use]
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Sound => "Текущий ремонт и плановое содержание",
            Self::Serviceable => "Средний ремонт",
            Self::Limited => "Капитальный ремонт",
            Self::Critical => "Реконструкция или снос",
        }
    }

    /// Narrative paragraph used in the wear section of the report.
    #[must_use]
    pub fn narrative(self, total_wear: f64) -> String {
        match self {
            Self::Sound => format!(
                "Физический износ здания составляет {total_wear:.1}%. Техническое состояние \
                 оценивается как исправное. Конструкции эксплуатируются без ограничений, \
                 рекомендуется текущее содержание и плановые осмотры."
            ),
            Self::Serviceable => format!(
                "Физический износ здания составляет {total_wear:.1}%. Техническое состояние \
                 оценивается как работоспособное. Выявленные дефекты не препятствуют \
                 эксплуатации, рекомендуется проведение среднего ремонта."
            ),
            Self::Limited => format!(
                "Физический износ здания составляет {total_wear:.1}%. Техническое состояние \
                 оценивается как ограниченно работоспособное. Эксплуатация возможна при \
                 контроле состояния конструкций, необходим капитальный ремонт."
            ),
            Self::Critical => format!(
                "Физический износ здания составляет {total_wear:.1}%. Техническое состояние \
                 оценивается как аварийное. Требуется немедленное ограничение эксплуатации \
                 и решение о реконструкции или сносе."
            ),
        }
    }

    /// Presentation color (RGB hex) for the narrative text.
    #[must_use]
    pub fn color_hex(self) -> &'static str {
        match self {
            Self::Sound => "2E7D32",
            Self::Serviceable => "9E9D24",
            Self::Limited => "EF6C00",
            Self::Critical => "C62828",
        }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalCondition {
    pub category: ConditionCategory,
    pub description: String,
    pub recommendation: String,
}

impl From<ConditionCategory> for TechnicalCondition {
    fn from(category: ConditionCategory) -> Self {
        Self {
            category,
            description: category.description().to_string(),
            recommendation: category.recommendation().to_string(),
        }
    }
}
