use super::ConstructionElement;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Cost-weight shares per ВСН 53-86р, each preset sums to 100.
const RESIDENTIAL: &[(&str, f64)] = &[
    ("Фундаменты", 2.0),
    ("Стены и перегородки", 28.0),
    ("Перекрытия", 12.0),
    ("Крыша", 4.0),
    ("Кровля", 2.0),
    ("Полы", 8.0),
    ("Проёмы (окна, двери)", 10.0),
    ("Отделочные работы", 9.0),
    ("Внутренние инженерные системы", 18.0),
    ("Прочие работы", 7.0),
];

const OFFICE: &[(&str, f64)] = &[
    ("Фундаменты", 5.0),
    ("Каркас", 20.0),
    ("Стены и перегородки", 12.0),
    ("Перекрытия", 12.0),
    ("Крыша и кровля", 6.0),
    ("Полы", 8.0),
    ("Проёмы (окна, двери)", 10.0),
    ("Отделочные работы", 9.0),
    ("Внутренние инженерные системы", 15.0),
    ("Прочие работы", 3.0),
];

const INDUSTRIAL: &[(&str, f64)] = &[
    ("Фундаменты", 8.0),
    ("Каркас", 25.0),
    ("Стены и перегородки", 14.0),
    ("Перекрытия и покрытия", 15.0),
    ("Кровля", 5.0),
    ("Полы", 10.0),
    ("Проёмы (окна, ворота)", 6.0),
    ("Отделочные работы", 3.0),
    ("Внутренние инженерные системы", 11.0),
    ("Прочие работы", 3.0),
];

/// Building-type preset selecting the element list and weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    #[default]
    Residential,
    Office,
    Industrial,
}

impl BuildingType {
    pub const ALL: [BuildingType; 3] = [Self::Residential, Self::Office, Self::Industrial];

    fn weights(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Residential => RESIDENTIAL,
            Self::Office => OFFICE,
            Self::Industrial => INDUSTRIAL,
        }
    }

    /// Fresh element list for this preset, all wear values at zero.
    #[must_use]
    pub fn elements(self) -> Vec<ConstructionElement> {
        self.weights()
            .iter()
            .map(|(name, weight)| ConstructionElement::new(*name, *weight))
            .collect()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Office => "office",
            Self::Industrial => "industrial",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "residential" | "жилое" => Ok(Self::Residential),
            "office" | "офисное" => Ok(Self::Office),
            "industrial" | "производственное" => Ok(Self::Industrial),
            other => Err(format!("unknown building type '{other}'")),
        }
    }
}
