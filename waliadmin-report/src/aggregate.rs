//! Per-student derived metrics.
//!
//! Every function is a pure read over the [`Dataset`]; nothing is cached, each
//! render recomputes from the raw logs.

use serde::Serialize;

use waliadmin_core::{AttendanceStatus, Dataset, StudentId};

use crate::format::DASH;

/// Minimum rounded average that counts as mastery (KKM). Fixed policy.
pub const PASS_THRESHOLD: f64 = 75.0;

/// Non-present attendance counts for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceTally {
    pub excused: u32,
    pub sick: u32,
    pub absent: u32,
    pub total_non_present: u32,
}

/// Mean score of a student, or `NoData` when nothing was recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeAverage {
    /// Rounded to one decimal place.
    Value(f64),
    NoData,
}

impl GradeAverage {
    /// `80.0`, or a dash for `NoData`.
    pub fn display(&self) -> String {
        match self {
            // `-0.0 + 0.0` is `+0.0`, so tiny negative means print as `0.0`.
            GradeAverage::Value(avg) => format!("{:.1}", avg + 0.0),
            GradeAverage::NoData => DASH.to_string(),
        }
    }
}

/// Mastery classification of a [`GradeAverage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Pass,
    NeedsImprovement,
    NoData,
}

impl Classification {
    /// Label printed in the grade recap.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Pass => "Tuntas",
            Classification::NeedsImprovement => "Perlu Perbaikan",
            Classification::NoData => DASH,
        }
    }
}

pub fn attendance_tally(dataset: &Dataset, student: &StudentId) -> AttendanceTally {
    let mut tally = AttendanceTally::default();
    for entry in dataset.attendance.iter().filter(|a| &a.student_id == student) {
        match entry.status {
            AttendanceStatus::Present => continue,
            AttendanceStatus::ExcusedLeave => tally.excused += 1,
            AttendanceStatus::Sick => tally.sick += 1,
            AttendanceStatus::Absent => tally.absent += 1,
        }
        tally.total_non_present += 1;
    }
    tally
}

pub fn grade_average(dataset: &Dataset, student: &StudentId) -> GradeAverage {
    let (sum, count) = dataset
        .grades
        .iter()
        .filter(|g| &g.student_id == student)
        .fold((0.0_f64, 0_u32), |(sum, n), g| (sum + g.score, n + 1));
    if count == 0 {
        return GradeAverage::NoData;
    }
    GradeAverage::Value(round_one_decimal(sum / f64::from(count)))
}

pub fn classify(average: GradeAverage) -> Classification {
    match average {
        GradeAverage::NoData => Classification::NoData,
        GradeAverage::Value(avg) if avg >= PASS_THRESHOLD => Classification::Pass,
        GradeAverage::Value(_) => Classification::NeedsImprovement,
    }
}

/// `f64::round` is half-away-from-zero.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
