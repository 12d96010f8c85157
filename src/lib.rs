//! # Wear Inspector
//!
//! Building inspection toolkit: physical wear calculation per ВСН 53-86р,
//! a unified Word report and upload of finished reports.
//!
//! ## Features
//!
//! - Residential, office and industrial element presets
//! - Weighted total wear and four-tier technical condition
//! - DOCX report joining constructive solutions, wear table and defect ledger
//! - Report sync over FTP, email, webhook or remote storage
//! - JSON and CSV export of the wear table
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use wear_inspector::model::{BuildingType, WearAssessment};
//! use wear_inspector::report::{generate_unified_report, ReportInputs, ReportMeta};
//!
//! let mut assessment = WearAssessment::new(BuildingType::Residential);
//! assessment.update_element_wear("Фундаменты", 20.0);
//! println!("Total wear: {}%", assessment.total_wear());
//!
//! let wear = assessment.report();
//! let inputs = ReportInputs { wear: Some(&wear), ..ReportInputs::default() };
//! let ok = generate_unified_report(&inputs, &ReportMeta::default(), Path::new("report.docx"));
//! assert!(ok);
//! ```

pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod report;
pub mod sync;
pub mod wear;
