//! Template registry: the fixed, ordered catalog of document kinds.
//!
//! | Id                   | Title                    | Category   |
//! |----------------------|--------------------------|------------|
//! | `cover`              | Sampul Administrasi      | Umum       |
//! | `student_list`       | Daftar Peserta Didik     | Data Siswa |
//! | `attendance_monthly` | Rekap Absensi Bulanan    | Kehadiran  |
//! | `grade_recap`        | Rekap Nilai Semester     | Penilaian  |
//! | `guidance_log`       | Buku Bimbingan           | Bimbingan  |
//! | `achievement_report` | Buku Prestasi Siswa      | Prestasi   |
//! | `parent_call`        | Surat Panggilan Ortu     | Komunikasi |

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Catalog metadata for one document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub icon: &'static str,
}

/// Every document the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateKind {
    Cover,
    StudentList,
    AttendanceMonthly,
    GradeRecap,
    GuidanceLog,
    AchievementReport,
    ParentCall,
}

impl TemplateKind {
    /// All kinds in catalog order.
    pub fn all() -> &'static [TemplateKind] {
        &[
            TemplateKind::Cover,
            TemplateKind::StudentList,
            TemplateKind::AttendanceMonthly,
            TemplateKind::GradeRecap,
            TemplateKind::GuidanceLog,
            TemplateKind::AchievementReport,
            TemplateKind::ParentCall,
        ]
    }

    pub fn info(&self) -> TemplateInfo {
        match self {
            TemplateKind::Cover => TemplateInfo {
                id: "cover",
                title: "Sampul Administrasi",
                category: "Umum",
                icon: "📄",
            },
            TemplateKind::StudentList => TemplateInfo {
                id: "student_list",
                title: "Daftar Peserta Didik",
                category: "Data Siswa",
                icon: "📋",
            },
            TemplateKind::AttendanceMonthly => TemplateInfo {
                id: "attendance_monthly",
                title: "Rekap Absensi Bulanan",
                category: "Kehadiran",
                icon: "📅",
            },
            TemplateKind::GradeRecap => TemplateInfo {
                id: "grade_recap",
                title: "Rekap Nilai Semester",
                category: "Penilaian",
                icon: "📊",
            },
            TemplateKind::GuidanceLog => TemplateInfo {
                id: "guidance_log",
                title: "Buku Bimbingan",
                category: "Bimbingan",
                icon: "💬",
            },
            TemplateKind::AchievementReport => TemplateInfo {
                id: "achievement_report",
                title: "Buku Prestasi Siswa",
                category: "Prestasi",
                icon: "🏆",
            },
            TemplateKind::ParentCall => TemplateInfo {
                id: "parent_call",
                title: "Surat Panggilan Ortu",
                category: "Komunikasi",
                icon: "✉️",
            },
        }
    }

    pub fn id(&self) -> &'static str {
        self.info().id
    }

    pub fn from_id(id: &str) -> Option<TemplateKind> {
        TemplateKind::all().iter().copied().find(|k| k.id() == id)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::from_id(s).ok_or_else(|| {
            let ids: Vec<&str> = TemplateKind::all().iter().map(|k| k.id()).collect();
            format!("unknown template '{s}'; expected one of: {}", ids.join(", "))
        })
    }
}

/// The catalog as plain records, in offer order.
pub fn catalog() -> Vec<TemplateInfo> {
    TemplateKind::all().iter().map(|k| k.info()).collect()
}
