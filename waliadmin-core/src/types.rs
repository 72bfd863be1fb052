//! Domain types for the homeroom dataset.
//!
//! Field names and enum codes follow the JSON document saved by the original
//! web application (camelCase keys, Indonesian status codes), so an existing
//! `data.json` loads unchanged. Every field carries a serde default: a document
//! written by an older version with fewer fields still deserializes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed student identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for StudentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifier of an append-only log record (grade, counseling, achievement).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Institution kind shown on the configuration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchoolType {
    #[default]
    Sekolah,
    Madrasah,
    Pesantren,
}

impl FromStr for SchoolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sekolah" => Ok(SchoolType::Sekolah),
            "madrasah" => Ok(SchoolType::Madrasah),
            "pesantren" => Ok(SchoolType::Pesantren),
            other => Err(format!(
                "unknown school type '{other}'; expected: sekolah, madrasah, pesantren"
            )),
        }
    }
}

/// Semester label of the academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Semester {
    #[default]
    Ganjil,
    Genap,
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semester::Ganjil => write!(f, "Ganjil"),
            Semester::Genap => write!(f, "Genap"),
        }
    }
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ganjil" => Ok(Semester::Ganjil),
            "genap" => Ok(Semester::Genap),
            other => Err(format!("unknown semester '{other}'; expected: ganjil, genap")),
        }
    }
}

/// Student sex, stored as the single-letter code used on Indonesian rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    /// Laki-laki.
    #[default]
    #[serde(rename = "L")]
    Male,
    /// Perempuan.
    #[serde(rename = "P")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "L",
            Gender::Female => "P",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(Gender::Male),
            "P" => Ok(Gender::Female),
            other => Err(format!("unknown sex code '{other}'; expected: L, P")),
        }
    }
}

/// Daily attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AttendanceStatus {
    /// Hadir.
    #[default]
    #[serde(rename = "H")]
    Present,
    /// Izin.
    #[serde(rename = "I")]
    ExcusedLeave,
    /// Sakit.
    #[serde(rename = "S")]
    Sick,
    /// Alfa.
    #[serde(rename = "A")]
    Absent,
}

impl AttendanceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "H",
            AttendanceStatus::ExcusedLeave => "I",
            AttendanceStatus::Sick => "S",
            AttendanceStatus::Absent => "A",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "H" => Ok(AttendanceStatus::Present),
            "I" => Ok(AttendanceStatus::ExcusedLeave),
            "S" => Ok(AttendanceStatus::Sick),
            "A" => Ok(AttendanceStatus::Absent),
            other => Err(format!("unknown attendance code '{other}'; expected: H, I, S, A")),
        }
    }
}

/// Category of a counseling-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CounselingKind {
    #[default]
    #[serde(rename = "konseling")]
    Counseling,
    #[serde(rename = "pelanggaran")]
    Infraction,
    #[serde(rename = "prestasi")]
    Commendation,
    #[serde(rename = "lainnya")]
    Other,
}

impl CounselingKind {
    pub fn label(&self) -> &'static str {
        match self {
            CounselingKind::Counseling => "Konseling",
            CounselingKind::Infraction => "Pelanggaran",
            CounselingKind::Commendation => "Prestasi",
            CounselingKind::Other => "Lainnya",
        }
    }
}

impl FromStr for CounselingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "konseling" => Ok(CounselingKind::Counseling),
            "pelanggaran" => Ok(CounselingKind::Infraction),
            "prestasi" => Ok(CounselingKind::Commendation),
            "lainnya" => Ok(CounselingKind::Other),
            other => Err(format!(
                "unknown counseling type '{other}'; expected: konseling, pelanggaran, prestasi, lainnya"
            )),
        }
    }
}

/// Competition tier of an achievement, ordered from school to international.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum AchievementLevel {
    #[default]
    Sekolah,
    Kecamatan,
    #[serde(rename = "Kabupaten/Kota")]
    KabupatenKota,
    Provinsi,
    Nasional,
    Internasional,
}

impl AchievementLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AchievementLevel::Sekolah => "Sekolah",
            AchievementLevel::Kecamatan => "Kecamatan",
            AchievementLevel::KabupatenKota => "Kabupaten/Kota",
            AchievementLevel::Provinsi => "Provinsi",
            AchievementLevel::Nasional => "Nasional",
            AchievementLevel::Internasional => "Internasional",
        }
    }
}

impl fmt::Display for AchievementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AchievementLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sekolah" => Ok(AchievementLevel::Sekolah),
            "kecamatan" => Ok(AchievementLevel::Kecamatan),
            "kabupaten/kota" | "kabupaten" | "kota" => Ok(AchievementLevel::KabupatenKota),
            "provinsi" => Ok(AchievementLevel::Provinsi),
            "nasional" => Ok(AchievementLevel::Nasional),
            "internasional" => Ok(AchievementLevel::Internasional),
            other => Err(format!(
                "unknown achievement level '{other}'; expected: sekolah, kecamatan, \
                 kabupaten/kota, provinsi, nasional, internasional"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Institution and homeroom configuration (`setup` in the JSON document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstitutionProfile {
    pub school_name: String,
    pub school_type: SchoolType,
    pub school_level: String,
    pub academic_year: String,
    pub semester: Semester,
    pub class_name: String,
    pub teacher_name: String,
    pub teacher_nip: String,
    /// Base64 data URL. Never rendered into documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_photo: Option<String>,
    pub principal_name: String,
    pub principal_nip: String,
    pub curriculum: String,
    pub school_address: String,
}

impl Default for InstitutionProfile {
    fn default() -> Self {
        Self {
            school_name: String::new(),
            school_type: SchoolType::Sekolah,
            school_level: "SMP/MTs".to_string(),
            academic_year: "2024/2025".to_string(),
            semester: Semester::Ganjil,
            class_name: String::new(),
            teacher_name: String::new(),
            teacher_nip: String::new(),
            teacher_photo: None,
            principal_name: String::new(),
            principal_nip: String::new(),
            curriculum: "Kurikulum Merdeka".to_string(),
            school_address: String::new(),
        }
    }
}

/// A student on the class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentRecord {
    pub id: StudentId,
    /// School-issued identifier (NIS).
    pub nis: String,
    /// National identifier (NISN).
    pub nisn: String,
    pub name: String,
    pub gender: Gender,
    pub birth_place: String,
    pub birth_date: String,
    pub religion: String,
    pub address: String,
    pub father_name: String,
    pub mother_name: String,
    pub parent_phone: String,
}

/// One student's status on one day. Keyed by `(date, student_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceEntry {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub student_id: StudentId,
    pub status: AttendanceStatus,
    pub note: String,
}

/// A single recorded score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeEntry {
    pub id: RecordId,
    pub student_id: StudentId,
    pub subject: String,
    /// Ulangan Harian, Tugas, PTS, PAS, Sikap, ...
    pub category: String,
    /// Expected 0–100; not enforced.
    pub score: f64,
    pub description: String,
    pub date: String,
}

/// A counseling-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CounselingEntry {
    pub id: RecordId,
    pub date: String,
    pub student_id: StudentId,
    #[serde(rename = "type")]
    pub kind: CounselingKind,
    pub description: String,
    /// Follow-up action (tindak lanjut).
    pub action: String,
}

/// An achievement-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementEntry {
    pub id: RecordId,
    pub student_id: StudentId,
    pub date: String,
    pub title: String,
    pub level: AchievementLevel,
    pub rank: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
