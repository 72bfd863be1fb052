//! Template context: serializable rendering payload built from a [`Dataset`].
//!
//! All display text is computed here (fallbacks, date formatting, aggregates,
//! ordering); templates only lay it out.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use waliadmin_core::{CounselingEntry, Dataset, InstitutionProfile, StudentId};

use crate::aggregate::{attendance_tally, classify, grade_average};
use crate::catalog::TemplateKind;
use crate::error::RenderError;
use crate::format::{
    count_or_dash, display_date, join_present, long_date, month_year, or_placeholder,
    parse_date, DASH,
};

/// Printed where a log entry points at a student missing from the roster.
pub const MISSING_STUDENT_LABEL: &str = "Siswa tidak ditemukan";

const SCHOOL_NAME_FALLBACK: &str = "NAMA SEKOLAH";
const SCHOOL_ADDRESS_FALLBACK: &str = "Alamat Sekolah";
const CITY_FALLBACK: &str = "Kota";
const SIGNATORY_FALLBACK: &str = "________________";
const COVER_FALLBACK: &str = "____";

/// Full rendering payload for one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentContext {
    /// Catalog title.
    pub title: String,
    pub header: HeaderCtx,
    pub profile: ProfileCtx,
    pub cover: CoverCtx,
    pub signature: SignatureCtx,
    /// Long form of the render date.
    pub generated_on: String,
    /// Month and year of the render date, for the attendance recap.
    pub period: String,
    pub rows: Rows,
}

/// Centered institution header.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderCtx {
    pub school_name: String,
    pub school_address: String,
}

/// Profile fields printed as-is in document subtitles.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileCtx {
    pub class_name: String,
    pub academic_year: String,
    pub semester: String,
    pub curriculum: String,
}

/// Cover-sheet fields, each with a blank-line fallback.
#[derive(Debug, Clone, Serialize)]
pub struct CoverCtx {
    pub class_name: String,
    pub teacher_name: String,
    pub teacher_nip: String,
    pub school_name: String,
    pub school_address: String,
}

/// Two-signatory footer: principal and homeroom teacher.
#[derive(Debug, Clone, Serialize)]
pub struct SignatureCtx {
    pub principal_name: String,
    pub principal_nip: String,
    pub teacher_name: String,
    pub teacher_nip: String,
    /// `Sleman, 18 Oktober 2026`.
    pub place_date: String,
}

/// Table rows of the selected template.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Rows {
    None,
    Roster(Vec<RosterRow>),
    Attendance(Vec<AttendanceRow>),
    Grades(Vec<GradeRow>),
    Counseling(Vec<CounselingRow>),
    Achievements(Vec<AchievementRow>),
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterRow {
    pub no: usize,
    /// `NIS/NISN`.
    pub identifiers: String,
    pub name: String,
    pub sex: &'static str,
    pub birth: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRow {
    pub no: usize,
    pub name: String,
    pub sick: String,
    pub excused: String,
    pub absent: String,
    pub total: String,
    /// Reserved column; never populated.
    pub percentage: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeRow {
    pub no: usize,
    pub name: String,
    pub average: String,
    pub remark: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CounselingRow {
    pub no: usize,
    pub date: String,
    pub student: String,
    pub description: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementRow {
    pub no: usize,
    pub date: String,
    pub student: String,
    pub title: String,
    pub level: &'static str,
    pub rank: String,
}

impl DocumentContext {
    /// Build the payload for `kind` from a dataset snapshot.
    pub fn build(kind: TemplateKind, dataset: &Dataset, today: NaiveDate) -> Self {
        let setup = &dataset.setup;
        let rows = match kind {
            TemplateKind::Cover | TemplateKind::ParentCall => Rows::None,
            TemplateKind::StudentList => Rows::Roster(roster_rows(dataset)),
            TemplateKind::AttendanceMonthly => Rows::Attendance(attendance_rows(dataset)),
            TemplateKind::GradeRecap => Rows::Grades(grade_rows(dataset)),
            TemplateKind::GuidanceLog => Rows::Counseling(counseling_rows(dataset)),
            TemplateKind::AchievementReport => Rows::Achievements(achievement_rows(dataset)),
        };

        DocumentContext {
            title: kind.info().title.to_string(),
            header: HeaderCtx {
                school_name: or_placeholder(&setup.school_name, SCHOOL_NAME_FALLBACK),
                school_address: or_placeholder(&setup.school_address, SCHOOL_ADDRESS_FALLBACK),
            },
            profile: ProfileCtx {
                class_name: setup.class_name.trim().to_string(),
                academic_year: setup.academic_year.trim().to_string(),
                semester: setup.semester.to_string(),
                curriculum: setup.curriculum.trim().to_string(),
            },
            cover: CoverCtx {
                class_name: or_placeholder(&setup.class_name, COVER_FALLBACK),
                teacher_name: or_placeholder(&setup.teacher_name, COVER_FALLBACK),
                teacher_nip: or_placeholder(&setup.teacher_nip, COVER_FALLBACK),
                school_name: or_placeholder(&setup.school_name, COVER_FALLBACK),
                school_address: or_placeholder(&setup.school_address, COVER_FALLBACK),
            },
            signature: signature(setup, today),
            generated_on: long_date(today),
            period: month_year(today),
            rows,
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        let value = serde_json::to_value(self)?;
        Ok(tera::Context::from_value(value)?)
    }
}

fn signature(setup: &InstitutionProfile, today: NaiveDate) -> SignatureCtx {
    let city = setup.school_address.split(',').next().unwrap_or_default();
    SignatureCtx {
        principal_name: or_placeholder(&setup.principal_name, SIGNATORY_FALLBACK),
        principal_nip: or_placeholder(&setup.principal_nip, DASH),
        teacher_name: or_placeholder(&setup.teacher_name, SIGNATORY_FALLBACK),
        teacher_nip: or_placeholder(&setup.teacher_nip, DASH),
        place_date: format!("{}, {}", or_placeholder(city, CITY_FALLBACK), long_date(today)),
    }
}

fn student_name(dataset: &Dataset, id: &StudentId) -> String {
    dataset
        .find_student(id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| MISSING_STUDENT_LABEL.to_string())
}

fn roster_rows(dataset: &Dataset) -> Vec<RosterRow> {
    dataset
        .students
        .iter()
        .enumerate()
        .map(|(i, s)| RosterRow {
            no: i + 1,
            identifiers: format!("{}/{}", s.nis.trim(), s.nisn.trim()),
            name: s.name.clone(),
            sex: s.gender.code(),
            birth: join_present(&[&s.birth_place, &display_date(&s.birth_date)]),
        })
        .collect()
}

fn attendance_rows(dataset: &Dataset) -> Vec<AttendanceRow> {
    dataset
        .students
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let tally = attendance_tally(dataset, &s.id);
            AttendanceRow {
                no: i + 1,
                name: s.name.clone(),
                sick: count_or_dash(tally.sick),
                excused: count_or_dash(tally.excused),
                absent: count_or_dash(tally.absent),
                total: count_or_dash(tally.total_non_present),
                percentage: DASH,
            }
        })
        .collect()
}

fn grade_rows(dataset: &Dataset) -> Vec<GradeRow> {
    dataset
        .students
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let average = grade_average(dataset, &s.id);
            GradeRow {
                no: i + 1,
                name: s.name.clone(),
                average: average.display(),
                remark: classify(average).label(),
            }
        })
        .collect()
}

/// Most recent first. Ties keep storage order; unparseable dates sink to the end.
fn counseling_order(a: &CounselingEntry, b: &CounselingEntry) -> Ordering {
    match (parse_date(&a.date), parse_date(&b.date)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn counseling_rows(dataset: &Dataset) -> Vec<CounselingRow> {
    let mut entries: Vec<&CounselingEntry> = dataset.guidance.iter().collect();
    entries.sort_by(|a, b| counseling_order(a, b));
    entries
        .into_iter()
        .enumerate()
        .map(|(i, g)| CounselingRow {
            no: i + 1,
            date: display_date(&g.date),
            student: student_name(dataset, &g.student_id),
            description: g.description.clone(),
            action: g.action.clone(),
        })
        .collect()
}

fn achievement_rows(dataset: &Dataset) -> Vec<AchievementRow> {
    dataset
        .achievements
        .iter()
        .enumerate()
        .map(|(i, a)| AchievementRow {
            no: i + 1,
            date: display_date(&a.date),
            student: student_name(dataset, &a.student_id),
            title: a.title.clone(),
            level: a.level.label(),
            rank: a.rank.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use waliadmin_core::{CounselingKind, RecordId, StudentRecord};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn counseling(id: &str, date: &str, student: &str) -> CounselingEntry {
        CounselingEntry {
            id: RecordId::from(id),
            date: date.to_string(),
            student_id: StudentId::from(student),
            kind: CounselingKind::Counseling,
            description: format!("catatan {id}"),
            action: String::new(),
        }
    }

    #[test]
    fn blank_profile_uses_fallbacks() {
        let ctx = DocumentContext::build(TemplateKind::Cover, &Dataset::default(), today());
        assert_eq!(ctx.header.school_name, "NAMA SEKOLAH");
        assert_eq!(ctx.header.school_address, "Alamat Sekolah");
        assert_eq!(ctx.cover.class_name, "____");
        assert_eq!(ctx.signature.principal_name, "________________");
        assert_eq!(ctx.signature.teacher_nip, "-");
        assert_eq!(ctx.signature.place_date, "Kota, 18 Oktober 2026");
    }

    #[test]
    fn signature_city_is_first_address_segment() {
        let mut ds = Dataset::default();
        ds.setup.school_address = "Sleman, Daerah Istimewa Yogyakarta".to_string();
        let ctx = DocumentContext::build(TemplateKind::GradeRecap, &ds, today());
        assert_eq!(ctx.signature.place_date, "Sleman, 18 Oktober 2026");
    }

    #[test]
    fn counseling_rows_are_reverse_chronological() {
        let mut ds = Dataset::default();
        ds.add_counseling(counseling("a", "2024-01-10", "s1"));
        ds.add_counseling(counseling("b", "2024-03-01", "s1"));
        ds.add_counseling(counseling("c", "2024-02-15", "s1"));
        let rows = counseling_rows(&ds);
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["1 Maret 2024", "15 Februari 2024", "10 Januari 2024"]);
        assert_eq!(rows[0].no, 1);
    }

    #[test]
    fn counseling_ties_keep_storage_order_and_bad_dates_sink() {
        let mut ds = Dataset::default();
        ds.add_counseling(counseling("x", "kemarin", "s1"));
        ds.add_counseling(counseling("first", "2024-05-05", "s1"));
        ds.add_counseling(counseling("second", "2024-05-05", "s1"));
        let rows = counseling_rows(&ds);
        let notes: Vec<&str> = rows.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(notes, ["catatan first", "catatan second", "catatan x"]);
    }

    #[test]
    fn unknown_student_gets_placeholder_name() {
        let mut ds = Dataset::default();
        ds.add_student(StudentRecord {
            id: StudentId::from("s1"),
            name: "Ani".to_string(),
            ..Default::default()
        })
        .unwrap();
        ds.add_counseling(counseling("a", "2024-01-10", "ghost"));
        ds.add_counseling(counseling("b", "2024-01-09", "s1"));
        let rows = counseling_rows(&ds);
        assert_eq!(rows[0].student, MISSING_STUDENT_LABEL);
        assert_eq!(rows[1].student, "Ani");
    }

    #[test]
    fn roster_joins_identifiers_and_birth() {
        let mut ds = Dataset::default();
        ds.add_student(StudentRecord {
            id: StudentId::from("s1"),
            nis: "2201".to_string(),
            nisn: "0091234567".to_string(),
            birth_place: "Sleman".to_string(),
            birth_date: "2011-03-14".to_string(),
            ..Default::default()
        })
        .unwrap();
        let rows = roster_rows(&ds);
        assert_eq!(rows[0].identifiers, "2201/0091234567");
        assert_eq!(rows[0].birth, "Sleman, 14 Maret 2011");
        assert_eq!(rows[0].sex, "L");
    }

    #[test]
    fn tera_context_conversion_succeeds() {
        let ctx = DocumentContext::build(TemplateKind::StudentList, &Dataset::default(), today());
        ctx.to_tera_context().expect("context conversion");
    }
}
