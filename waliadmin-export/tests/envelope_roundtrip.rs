use chrono::NaiveDate;

use waliadmin_core::{
    AchievementEntry, AchievementLevel, AttendanceEntry, AttendanceStatus, CounselingEntry,
    CounselingKind, Dataset, GradeEntry, InstitutionProfile, RecordId, StudentId, StudentRecord,
};
use waliadmin_export::wrap;
use waliadmin_report::{Renderer, TemplateKind};

fn dataset_with_markup() -> Dataset {
    let mut ds = Dataset::default();
    ds.set_profile(InstitutionProfile {
        school_name: "SMP \"Harapan\" & <Bangsa>".to_string(),
        school_address: "Jl. O'Neil 5, Sleman".to_string(),
        class_name: "VII-A".to_string(),
        teacher_name: "Bu Rina <Wali>".to_string(),
        ..Default::default()
    });
    ds.add_student(StudentRecord {
        id: StudentId::from("s1"),
        nis: "2201".to_string(),
        name: "Ahmad <b>Fauzi</b>".to_string(),
        birth_place: "Yogyakarta".to_string(),
        birth_date: "2012-05-04".to_string(),
        ..Default::default()
    })
    .expect("add student");
    ds.add_grade(GradeEntry {
        id: RecordId::from("g1"),
        student_id: StudentId::from("s1"),
        score: 88.0,
        ..Default::default()
    });
    ds.save_attendance_batch(vec![AttendanceEntry {
        date: "2026-10-01".to_string(),
        student_id: StudentId::from("s1"),
        status: AttendanceStatus::Sick,
        note: String::new(),
    }])
    .expect("attendance");
    ds.add_counseling(CounselingEntry {
        id: RecordId::from("c1"),
        date: "2026-09-12".to_string(),
        student_id: StudentId::from("s1"),
        kind: CounselingKind::Infraction,
        description: "Terlambat > 3 kali & bolos".to_string(),
        action: "Panggil \"orang tua\"".to_string(),
    });
    ds.add_achievement(AchievementEntry {
        id: RecordId::from("a1"),
        student_id: StudentId::from("s1"),
        date: "2026-08-17".to_string(),
        title: "Lomba <Cerdas> Cermat".to_string(),
        level: AchievementLevel::KabupatenKota,
        rank: "Juara 1".to_string(),
        ..Default::default()
    });
    ds
}

#[test]
fn every_rendered_document_survives_wrapping_verbatim() {
    let renderer = Renderer::new().expect("renderer");
    let dataset = dataset_with_markup();
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    for kind in TemplateKind::all() {
        let doc = renderer.render(*kind, &dataset, today).expect("render");
        let wrapped = wrap(&doc.html, "Dokumen Wali Kelas");

        let start = wrapped.find("<body>\n").expect("body open") + "<body>\n".len();
        let end = wrapped.rfind("\n</body>").expect("body close");
        assert_eq!(&wrapped[start..end], doc.html, "{kind} body changed by wrap");
        assert!(wrapped.starts_with("<html>"));
        assert!(wrapped.contains("<style>"));
        assert!(!doc.html.contains("<b>Fauzi</b>"), "{kind} leaked raw markup");
    }
}
