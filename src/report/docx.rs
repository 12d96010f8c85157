//! DOCX rendering of a [`ReportPayload`].

use super::payload::{
    DefectRow, PhotoCell, ReportHeader, ReportPayload, ReportSection, SolutionRow, WearSection,
};
use crate::error::ReportError;
use docx_rs::{AlignmentType, Docx, Paragraph, Pic, Run, Table, TableCell, TableRow};
use std::io::Cursor;

// Run sizes are in half-points.
const TITLE_SIZE: usize = 32;
const HEADING_SIZE: usize = 28;
const BODY_SIZE: usize = 24;

const EMU_PER_CM: f64 = 360_000.0;
/// Width of an embedded defect photo.
const PHOTO_WIDTH_CM: f64 = 6.0;

/// Renders the payload into DOCX bytes.
pub fn render_docx(payload: &ReportPayload) -> Result<Vec<u8>, ReportError> {
    let mut docx = render_header(Docx::new(), &payload.header);

    for (number, section) in payload.sections.iter().enumerate() {
        let heading = format!("{}. {}", number + 1, section.kind().title());
        docx = docx.add_paragraph(heading_paragraph(&heading));
        docx = match section {
            ReportSection::ConstructiveSolutions(rows) => docx.add_table(solutions_table(rows)),
            ReportSection::PhysicalWear(wear) => render_wear(docx, wear),
            ReportSection::DefectLedger(rows) => docx.add_table(defects_table(rows)),
        };
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ReportError::Render {
            message: e.to_string(),
        })?;
    Ok(buffer.into_inner())
}

fn render_header(docx: Docx, header: &ReportHeader) -> Docx {
    let title = Paragraph::new()
        .add_run(Run::new().add_text(&header.title).bold().size(TITLE_SIZE))
        .align(AlignmentType::Center);

    let mut docx = docx.add_paragraph(title);
    let fields = [
        ("Объект", header.meta.object_name.as_str()),
        ("Адрес", header.meta.address.as_str()),
        ("Проект", header.meta.project_name.as_str()),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            docx = docx.add_paragraph(labelled_paragraph(label, value));
        }
    }
    let date = header.date.format("%d.%m.%Y").to_string();
    docx.add_paragraph(labelled_paragraph("Дата", &date))
}

fn render_wear(docx: Docx, wear: &WearSection) -> Docx {
    let condition = format!(
        "{} ({})",
        wear.category.label(),
        wear.category.recommendation().to_lowercase()
    );
    let narrative = Paragraph::new().add_run(
        Run::new()
            .add_text(&wear.narrative)
            .size(BODY_SIZE)
            .color(wear.color_hex),
    );

    docx.add_table(wear_table(wear))
        .add_paragraph(labelled_paragraph("Техническое состояние", &condition))
        .add_paragraph(narrative)
}

fn solutions_table(rows: &[SolutionRow]) -> Table {
    let mut table_rows = vec![header_row(&["№", "Категория", "Описание решения"])];
    table_rows.extend(rows.iter().map(|row| {
        TableRow::new(vec![
            text_cell(&row.index.to_string()),
            text_cell(&row.category),
            text_cell(&row.text),
        ])
    }));
    Table::new(table_rows).set_grid(vec![700, 2800, 6000])
}

fn wear_table(wear: &WearSection) -> Table {
    let mut table_rows = vec![header_row(&[
        "Конструктивный элемент",
        "Удельный вес, %",
        "Износ, %",
        "Средневзвешенный износ, %",
    ])];
    table_rows.extend(wear.rows.iter().map(|row| {
        TableRow::new(vec![
            text_cell(&row.name),
            text_cell(&format!("{:.1}", row.weight_percent)),
            text_cell(&format!("{:.1}", row.wear_percent)),
            text_cell(&format!("{:.2}", row.weighted_wear)),
        ])
    }));
    table_rows.push(TableRow::new(vec![
        bold_cell("Итого"),
        bold_cell(&format!("{:.1}", wear.totals.weight_sum)),
        bold_cell(wear.totals.wear),
        bold_cell(&format!("{:.1}", wear.totals.total_wear)),
    ]));
    Table::new(table_rows).set_grid(vec![4000, 1800, 1500, 2200])
}

fn defects_table(rows: &[DefectRow]) -> Table {
    let mut table_rows = vec![header_row(&[
        "№",
        "Описание дефекта",
        "Местоположение",
        "Фото",
        "Способ устранения",
    ])];
    table_rows.extend(rows.iter().map(|row| {
        TableRow::new(vec![
            text_cell(&row.index.to_string()),
            text_cell(&row.description),
            text_cell(&row.location_note),
            photo_cell(&row.photo),
            text_cell(&row.eliminating_method),
        ])
    }));
    Table::new(table_rows).set_grid(vec![500, 2300, 1700, 3500, 2300])
}

fn photo_cell(photo: &PhotoCell) -> TableCell {
    match photo {
        PhotoCell::Embedded(photo) => {
            let (width, height) = photo_size_emu(photo.width_px, photo.height_px);
            let pic = Pic::new(&photo.png).size(width, height);
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)))
        }
        PhotoCell::Missing { placeholder } => text_cell(placeholder),
    }
}

/// Fits a photo to [`PHOTO_WIDTH_CM`] wide, keeping the aspect ratio.
fn photo_size_emu(width_px: u32, height_px: u32) -> (u32, u32) {
    let width = PHOTO_WIDTH_CM * EMU_PER_CM;
    let width_px = f64::from(width_px.max(1));
    let height_px = f64::from(height_px.max(1));
    let height = width * height_px / width_px;
    (width.round() as u32, height.round() as u32)
}

fn heading_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(HEADING_SIZE))
}

fn labelled_paragraph(label: &str, value: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(format!("{label}: ")).bold().size(BODY_SIZE))
        .add_run(Run::new().add_text(value).size(BODY_SIZE))
}

fn header_row(titles: &[&str]) -> TableRow {
    TableRow::new(titles.iter().map(|&t| bold_cell(t)).collect())
}

fn text_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).size(BODY_SIZE)))
}

fn bold_cell(text: &str) -> TableCell {
    TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).bold().size(BODY_SIZE)))
}
