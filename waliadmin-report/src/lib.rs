//! # waliadmin-report
//!
//! Turns a [`Dataset`](waliadmin_core::Dataset) snapshot into printable HTML
//! documents for the homeroom-teacher administration file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use waliadmin_core::Dataset;
//! use waliadmin_report::{Renderer, TemplateKind};
//!
//! fn render_all(dataset: &Dataset, today: NaiveDate) {
//!     if let Ok(renderer) = Renderer::new() {
//!         for kind in TemplateKind::all() {
//!             if let Ok(doc) = renderer.render(*kind, dataset, today) {
//!                 println!("{}: {} bytes", doc.title, doc.html.len());
//!             }
//!         }
//!     }
//! }
//! ```

pub mod aggregate;
pub mod catalog;
pub mod context;
pub mod engine;
pub mod error;
pub mod format;

pub use aggregate::{
    attendance_tally, classify, grade_average, AttendanceTally, Classification, GradeAverage,
    PASS_THRESHOLD,
};
pub use catalog::{catalog, TemplateInfo, TemplateKind};
pub use context::{DocumentContext, MISSING_STUDENT_LABEL};
pub use engine::{escape_markup, Document, Renderer};
pub use error::RenderError;
