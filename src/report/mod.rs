//! Unified inspection report: constructive solutions, physical wear and
//! defect ledger assembled into one Word document.

pub mod docx;
pub mod payload;

pub use crate::error::ReportError;
pub use docx::render_docx;
pub use payload::{
    build_report_payload, DefectRow, PhotoCell, ReportInputs, ReportMeta, ReportPayload,
    ReportSection, SectionKind, SolutionRow, WearRow, WearSection,
};

use crate::export::write_atomically;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use tracing::{error, info};

/// Builds and renders the report for today's date.
///
/// Returns `None` when the document library fails to produce a document;
/// the failure is logged.
#[must_use]
pub fn build_report_document(inputs: &ReportInputs<'_>, meta: &ReportMeta) -> Option<Vec<u8>> {
    let today = chrono::Local::now().date_naive();
    let payload = build_report_payload(inputs, meta, today);

    // The document library panics on some malformed inputs instead of
    // returning an error.
    match catch_unwind(AssertUnwindSafe(|| render_docx(&payload))) {
        Ok(Ok(bytes)) => Some(bytes),
        Ok(Err(e)) => {
            error!(error = %e, "report rendering failed");
            None
        }
        Err(_) => {
            error!("report rendering panicked");
            None
        }
    }
}

/// Writes the unified report to `output_path`.
///
/// Returns `false` if the document could not be built or written; an
/// existing file at `output_path` is left untouched in that case.
pub fn generate_unified_report(inputs: &ReportInputs<'_>, meta: &ReportMeta, output_path: &Path) -> bool {
    let Some(bytes) = build_report_document(inputs, meta) else {
        return false;
    };

    match write_report(output_path, &bytes) {
        Ok(()) => {
            info!(
                path = %output_path.display(),
                bytes = bytes.len(),
                object = %meta.object_name,
                "report written"
            );
            true
        }
        Err(e) => {
            error!(error = %e, "failed to save report");
            false
        }
    }
}

fn write_report(path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    write_atomically(path, bytes).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
