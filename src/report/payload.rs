//! Document model for the unified inspection report.
//!
//! The builder joins three independent inputs into at most three sections,
//! always ordered constructive solutions, physical wear, defect ledger. Any
//! input may be absent or empty; missing photos degrade to a placeholder.

use crate::model::{
    ConditionCategory, ConstructionElement, ConstructiveSolutionItem, DefectRecord, WearReport,
};
use crate::wear::{calculate_total_wear, round_one_decimal};
use chrono::NaiveDate;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const REPORT_TITLE: &str = "Отчёт об обследовании";
pub const PHOTO_ANALYSIS_NOTE: &str = "По результатам анализа фотографии";
pub const NO_TOTAL_PLACEHOLDER: &str = "-";

/// Photos larger than this (either side, px) are downscaled before embedding.
const MAX_PHOTO_PX: u32 = 1600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    ConstructiveSolutions,
    PhysicalWear,
    DefectLedger,
}

impl SectionKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::ConstructiveSolutions => "Конструктивные решения",
            Self::PhysicalWear => "Физический износ",
            Self::DefectLedger => "Ведомость дефектов",
        }
    }
}

/// Object metadata printed in the document header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportMeta {
    pub object_name: String,
    pub address: String,
    pub project_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub title: String,
    pub meta: ReportMeta,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionRow {
    pub index: usize,
    pub category: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WearRow {
    pub name: String,
    pub weight_percent: f64,
    pub wear_percent: f64,
    pub weighted_wear: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WearTotals {
    pub weight_sum: f64,
    pub wear: &'static str,
    pub total_wear: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WearSection {
    pub rows: Vec<WearRow>,
    pub totals: WearTotals,
    pub category: ConditionCategory,
    pub narrative: String,
    pub color_hex: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedPhoto {
    pub path: PathBuf,
    /// PNG-encoded image data.
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoCell {
    Embedded(EmbeddedPhoto),
    Missing { placeholder: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefectRow {
    pub index: usize,
    pub description: String,
    pub location_note: String,
    pub photo: PhotoCell,
    pub eliminating_method: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportSection {
    ConstructiveSolutions(Vec<SolutionRow>),
    PhysicalWear(WearSection),
    DefectLedger(Vec<DefectRow>),
}

impl ReportSection {
    #[must_use]
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::ConstructiveSolutions(_) => SectionKind::ConstructiveSolutions,
            Self::PhysicalWear(_) => SectionKind::PhysicalWear,
            Self::DefectLedger(_) => SectionKind::DefectLedger,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPayload {
    pub header: ReportHeader,
    pub sections: Vec<ReportSection>,
}

impl ReportPayload {
    #[must_use]
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(ReportSection::kind).collect()
    }

    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind() == kind)
    }
}

/// The three independently sourced report inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportInputs<'a> {
    pub defects: Option<&'a [DefectRecord]>,
    pub wear: Option<&'a WearReport>,
    pub solutions: Option<&'a [ConstructiveSolutionItem]>,
}

#[must_use]
pub fn build_report_payload(inputs: &ReportInputs<'_>, meta: &ReportMeta, date: NaiveDate) -> ReportPayload {
    let mut sections = Vec::new();

    if let Some(rows) = inputs.solutions.and_then(build_solution_rows) {
        sections.push(ReportSection::ConstructiveSolutions(rows));
    }
    if let Some(section) = inputs.wear.and_then(build_wear_section) {
        sections.push(ReportSection::PhysicalWear(section));
    }
    if let Some(rows) = inputs.defects.and_then(build_defect_rows) {
        sections.push(ReportSection::DefectLedger(rows));
    }

    ReportPayload {
        header: ReportHeader {
            title: REPORT_TITLE.to_string(),
            meta: meta.clone(),
            date,
        },
        sections,
    }
}

fn build_solution_rows(items: &[ConstructiveSolutionItem]) -> Option<Vec<SolutionRow>> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| SolutionRow {
                index: i + 1,
                category: item.category.clone(),
                text: item.text.clone(),
            })
            .collect(),
    )
}

fn build_wear_section(report: &WearReport) -> Option<WearSection> {
    if report.elements.is_empty() {
        return None;
    }

    // Recomputed from elements; the snapshot's stored totals are not trusted.
    let elements: Vec<ConstructionElement> =
        report.elements.iter().map(ConstructionElement::from).collect();
    let total_wear = calculate_total_wear(&elements);
    let category = ConditionCategory::from_total_wear(total_wear);

    let rows = elements
        .iter()
        .map(|e| WearRow {
            name: e.name.clone(),
            weight_percent: e.weight_percent,
            wear_percent: e.wear_percent,
            weighted_wear: e.weighted_wear(),
        })
        .collect();

    Some(WearSection {
        rows,
        totals: WearTotals {
            weight_sum: round_one_decimal(elements.iter().map(|e| e.weight_percent).sum()),
            wear: NO_TOTAL_PLACEHOLDER,
            total_wear,
        },
        category,
        narrative: category.narrative(total_wear),
        color_hex: category.color_hex(),
    })
}

fn build_defect_rows(defects: &[DefectRecord]) -> Option<Vec<DefectRow>> {
    let rows: Vec<DefectRow> = defects
        .iter()
        .filter(|d| d.analyzed)
        .enumerate()
        .map(|(i, d)| DefectRow {
            index: i + 1,
            description: d.defect.clone(),
            location_note: PHOTO_ANALYSIS_NOTE.to_string(),
            photo: resolve_photo(d),
            eliminating_method: d.eliminating_method.clone(),
        })
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(rows)
    }
}

#[must_use]
pub fn missing_photo_placeholder(filename: &str) -> String {
    format!("[Фото не найдено: {filename}]")
}

/// Loads the defect photo; any failure yields a placeholder cell.
#[must_use]
pub fn resolve_photo(record: &DefectRecord) -> PhotoCell {
    let filename = record.display_filename();
    if record.file_path.is_empty() {
        return PhotoCell::Missing {
            placeholder: missing_photo_placeholder(filename),
        };
    }

    let path = Path::new(&record.file_path);
    match load_photo(path) {
        Ok(photo) => PhotoCell::Embedded(photo),
        Err(reason) => {
            warn!(path = %path.display(), %reason, "defect photo unavailable, using placeholder");
            PhotoCell::Missing {
                placeholder: missing_photo_placeholder(filename),
            }
        }
    }
}

fn load_photo(path: &Path) -> Result<EmbeddedPhoto, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    let mut img: DynamicImage = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    if img.width() > MAX_PHOTO_PX || img.height() > MAX_PHOTO_PX {
        img = img.thumbnail(MAX_PHOTO_PX, MAX_PHOTO_PX);
    }

    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(EmbeddedPhoto {
        path: path.to_path_buf(),
        png: png.into_inner(),
        width_px: img.width(),
        height_px: img.height(),
    })
}
