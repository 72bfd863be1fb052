//! Waliadmin core library: dataset types, record operations, persistence.
//!
//! - [`types`]: newtypes, enums and record structs
//! - [`dataset`]: the [`Dataset`] snapshot and its mutation operations
//! - [`store`]: load / save / init of `data.json`
//! - [`config`]: `config.yaml` settings
//! - [`paths`]: on-disk layout
//! - [`error`]: [`StoreError`], [`RecordError`]

pub mod config;
pub mod dataset;
pub mod error;
pub mod paths;
pub mod store;
pub mod types;

pub use config::Settings;
pub use dataset::{parse_record_date, Dataset, DatasetSummary, DOCUMENT_COUNT, RECORD_DATE_FORMAT};
pub use error::{RecordError, StoreError};
pub use types::{
    AchievementEntry, AchievementLevel, AttendanceEntry, AttendanceStatus, CounselingEntry,
    CounselingKind, Gender, GradeEntry, InstitutionProfile, RecordId, SchoolType, Semester,
    StudentId, StudentRecord,
};
