//! The dataset snapshot and its record mutation operations.
//!
//! Mutations mirror the state updates of the original data-entry screens. They
//! never touch the filesystem; callers persist with [`crate::store::save_at`].

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::types::{
    AchievementEntry, AttendanceEntry, CounselingEntry, GradeEntry, InstitutionProfile, RecordId,
    StudentId, StudentRecord,
};

/// Number of document templates offered by the report engine.
///
/// Shown on the dashboard summary; the catalog itself lives in
/// `waliadmin-report`, which asserts the two agree.
pub const DOCUMENT_COUNT: usize = 7;

/// Storage format of every record date.
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a record date, rejecting anything but `YYYY-MM-DD`.
pub fn parse_record_date(raw: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(raw, RECORD_DATE_FORMAT)
        .map_err(|_| RecordError::InvalidDate(raw.to_string()))
}

/// Root of the JSON document: the full roster plus every log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Dataset {
    pub setup: InstitutionProfile,
    pub students: Vec<StudentRecord>,
    pub attendance: Vec<AttendanceEntry>,
    pub grades: Vec<GradeEntry>,
    /// Counseling book (buku bimbingan).
    pub guidance: Vec<CounselingEntry>,
    pub achievements: Vec<AchievementEntry>,
}

/// Dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub students: usize,
    pub achievements: usize,
    pub counseling_notes: usize,
    pub attendance_days: usize,
    pub grade_entries: usize,
    pub documents: usize,
}

impl Dataset {
    /// Look up a roster entry by id.
    pub fn find_student(&self, id: &StudentId) -> Option<&StudentRecord> {
        self.students.iter().find(|s| &s.id == id)
    }

    /// Replace the institution profile wholesale.
    pub fn set_profile(&mut self, profile: InstitutionProfile) {
        self.setup = profile;
    }

    /// Append a student to the roster.
    pub fn add_student(&mut self, student: StudentRecord) -> Result<(), RecordError> {
        if self.find_student(&student.id).is_some() {
            return Err(RecordError::DuplicateStudent(student.id.0));
        }
        self.students.push(student);
        Ok(())
    }

    /// Replace the roster entry with the same id in place.
    ///
    /// Returns `false` when no student matched.
    pub fn update_student(&mut self, student: StudentRecord) -> bool {
        match self.students.iter_mut().find(|s| s.id == student.id) {
            Some(slot) => {
                *slot = student;
                true
            }
            None => false,
        }
    }

    /// Remove a student from the roster.
    ///
    /// Log entries referencing the student are kept; documents render them
    /// with a placeholder name.
    pub fn remove_student(&mut self, id: &StudentId) -> bool {
        let before = self.students.len();
        self.students.retain(|s| &s.id != id);
        self.students.len() != before
    }

    /// Save one day of attendance, replacing every prior entry for that date.
    ///
    /// The batch must share one valid date and list each student at most once.
    pub fn save_attendance_batch(&mut self, batch: Vec<AttendanceEntry>) -> Result<(), RecordError> {
        let Some(first) = batch.first() else {
            return Ok(());
        };
        let date = first.date.clone();
        parse_record_date(&date)?;
        if let Some(other) = batch.iter().find(|e| e.date != date) {
            return Err(RecordError::MixedBatchDates {
                expected: date,
                found: other.date.clone(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(dup) = batch.iter().find(|e| !seen.insert(&e.student_id)) {
            return Err(RecordError::DuplicateAttendance {
                date,
                student: dup.student_id.0.clone(),
            });
        }
        self.attendance.retain(|e| e.date != date);
        self.attendance.extend(batch);
        Ok(())
    }

    pub fn add_grade(&mut self, grade: GradeEntry) {
        self.grades.push(grade);
    }

    pub fn add_counseling(&mut self, entry: CounselingEntry) {
        self.guidance.push(entry);
    }

    pub fn add_achievement(&mut self, entry: AchievementEntry) {
        self.achievements.push(entry);
    }

    /// Remove an achievement by id. Returns `false` when nothing matched.
    pub fn remove_achievement(&mut self, id: &RecordId) -> bool {
        let before = self.achievements.len();
        self.achievements.retain(|a| &a.id != id);
        self.achievements.len() != before
    }

    /// `s<n>`, one past the highest numeric student id.
    pub fn next_student_id(&self) -> StudentId {
        StudentId(next_id("s", self.students.iter().map(|s| s.id.0.as_str())))
    }

    pub fn next_grade_id(&self) -> RecordId {
        RecordId(next_id("g", self.grades.iter().map(|g| g.id.0.as_str())))
    }

    pub fn next_counseling_id(&self) -> RecordId {
        RecordId(next_id("c", self.guidance.iter().map(|g| g.id.0.as_str())))
    }

    pub fn next_achievement_id(&self) -> RecordId {
        RecordId(next_id("a", self.achievements.iter().map(|a| a.id.0.as_str())))
    }

    pub fn summary(&self) -> DatasetSummary {
        let mut days: Vec<&str> = self.attendance.iter().map(|a| a.date.as_str()).collect();
        days.sort_unstable();
        days.dedup();
        DatasetSummary {
            students: self.students.len(),
            achievements: self.achievements.len(),
            counseling_notes: self.guidance.len(),
            attendance_days: days.len(),
            grade_entries: self.grades.len(),
            documents: DOCUMENT_COUNT,
        }
    }
}

/// Ids that do not follow `<prefix><n>` (for example timestamps written by
/// the web app) are ignored.
fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let highest = existing
        .filter_map(|id| id.strip_prefix(prefix)?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{}", highest + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AchievementLevel, AttendanceStatus};

    fn student(id: &str, name: &str) -> StudentRecord {
        StudentRecord {
            id: StudentId::from(id),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn present(date: &str, id: &str) -> AttendanceEntry {
        AttendanceEntry {
            date: date.to_string(),
            student_id: StudentId::from(id),
            status: AttendanceStatus::Present,
            note: String::new(),
        }
    }

    #[test]
    fn add_student_rejects_duplicate_id() {
        let mut ds = Dataset::default();
        ds.add_student(student("s1", "Ani")).expect("first add");
        let err = ds.add_student(student("s1", "Budi")).unwrap_err();
        assert_eq!(err, RecordError::DuplicateStudent("s1".to_string()));
        assert_eq!(ds.students.len(), 1);
    }

    #[test]
    fn update_student_replaces_in_place() {
        let mut ds = Dataset::default();
        ds.add_student(student("s1", "Ani")).unwrap();
        ds.add_student(student("s2", "Budi")).unwrap();
        assert!(ds.update_student(student("s1", "Ani Lestari")));
        assert_eq!(ds.students[0].name, "Ani Lestari");
        assert!(!ds.update_student(student("s9", "Nobody")));
    }

    #[test]
    fn remove_student_keeps_log_entries() {
        let mut ds = Dataset::default();
        ds.add_student(student("s1", "Ani")).unwrap();
        ds.save_attendance_batch(vec![present("2024-01-10", "s1")]).unwrap();
        assert!(ds.remove_student(&StudentId::from("s1")));
        assert!(!ds.remove_student(&StudentId::from("s1")));
        assert_eq!(ds.attendance.len(), 1);
    }

    #[test]
    fn attendance_batch_replaces_only_its_day() {
        let mut ds = Dataset::default();
        ds.save_attendance_batch(vec![present("2024-01-10", "s1"), present("2024-01-10", "s2")])
            .unwrap();
        ds.save_attendance_batch(vec![present("2024-01-11", "s1")]).unwrap();

        let mut sick = present("2024-01-10", "s1");
        sick.status = AttendanceStatus::Sick;
        ds.save_attendance_batch(vec![sick]).unwrap();

        assert_eq!(ds.attendance.len(), 2);
        assert!(ds
            .attendance
            .iter()
            .any(|e| e.date == "2024-01-10" && e.status == AttendanceStatus::Sick));
        assert!(ds.attendance.iter().any(|e| e.date == "2024-01-11"));
    }

    #[test]
    fn attendance_batch_rejects_mixed_dates() {
        let mut ds = Dataset::default();
        let err = ds
            .save_attendance_batch(vec![present("2024-01-10", "s1"), present("2024-01-11", "s2")])
            .unwrap_err();
        assert!(matches!(err, RecordError::MixedBatchDates { .. }));
        assert!(ds.attendance.is_empty());
    }

    #[test]
    fn attendance_batch_rejects_repeated_student() {
        let mut ds = Dataset::default();
        let mut sick = present("2024-01-10", "s1");
        sick.status = AttendanceStatus::Sick;
        let err = ds
            .save_attendance_batch(vec![sick.clone(), sick])
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::DuplicateAttendance {
                date: "2024-01-10".to_string(),
                student: "s1".to_string(),
            }
        );
        assert!(ds.attendance.is_empty(), "a rejected batch must not be stored");
    }

    #[test]
    fn attendance_batch_rejects_unparseable_date() {
        let mut ds = Dataset::default();
        let err = ds
            .save_attendance_batch(vec![present("10/01/2024", "s1")])
            .unwrap_err();
        assert_eq!(err, RecordError::InvalidDate("10/01/2024".to_string()));
        assert!(ds.attendance.is_empty());
    }

    #[test]
    fn record_dates_parse_iso_only() {
        assert_eq!(
            parse_record_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_record_date("2023-02-29").is_err());
        assert!(parse_record_date("").is_err());
    }

    #[test]
    fn empty_attendance_batch_is_noop() {
        let mut ds = Dataset::default();
        ds.save_attendance_batch(vec![present("2024-01-10", "s1")]).unwrap();
        ds.save_attendance_batch(Vec::new()).unwrap();
        assert_eq!(ds.attendance.len(), 1);
    }

    #[test]
    fn remove_achievement_by_id() {
        let mut ds = Dataset::default();
        ds.add_achievement(AchievementEntry {
            id: RecordId::from("a1"),
            level: AchievementLevel::Provinsi,
            ..Default::default()
        });
        assert!(ds.remove_achievement(&RecordId::from("a1")));
        assert!(ds.achievements.is_empty());
        assert!(!ds.remove_achievement(&RecordId::from("a1")));
    }

    #[test]
    fn next_ids_skip_past_highest_number() {
        let mut ds = Dataset::default();
        assert_eq!(ds.next_student_id(), StudentId::from("s1"));
        ds.add_student(student("s7", "Ani")).unwrap();
        ds.add_student(student("1718000000000", "Budi")).unwrap();
        ds.add_student(student("s2", "Citra")).unwrap();
        assert_eq!(ds.next_student_id(), StudentId::from("s8"));

        ds.add_grade(GradeEntry {
            id: RecordId::from("g3"),
            ..Default::default()
        });
        assert_eq!(ds.next_grade_id(), RecordId::from("g4"));
        assert_eq!(ds.next_counseling_id(), RecordId::from("c1"));
        assert_eq!(ds.next_achievement_id(), RecordId::from("a1"));
    }

    #[test]
    fn summary_counts_distinct_attendance_days() {
        let mut ds = Dataset::default();
        ds.add_student(student("s1", "Ani")).unwrap();
        ds.save_attendance_batch(vec![present("2024-01-10", "s1")]).unwrap();
        ds.save_attendance_batch(vec![present("2024-01-11", "s1")]).unwrap();
        ds.add_counseling(CounselingEntry::default());
        let summary = ds.summary();
        assert_eq!(summary.students, 1);
        assert_eq!(summary.attendance_days, 2);
        assert_eq!(summary.counseling_notes, 1);
        assert_eq!(summary.documents, DOCUMENT_COUNT);
    }

    #[test]
    fn legacy_document_without_achievements_loads() {
        let json = r#"{
            "setup": {"schoolName": "SMP Negeri 1", "className": "VII-A"},
            "students": [],
            "attendance": [],
            "grades": [],
            "guidance": []
        }"#;
        let ds: Dataset = serde_json::from_str(json).expect("deserialize");
        assert!(ds.achievements.is_empty());
        assert_eq!(ds.setup.school_name, "SMP Negeri 1");
        assert_eq!(ds.setup.curriculum, "Kurikulum Merdeka");
    }
}
