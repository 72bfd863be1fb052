//! Tera rendering engine: template lookup and [`Renderer`].
//!
//! # Template names
//!
//! | Kind                 | Template                                   |
//! |----------------------|--------------------------------------------|
//! | `cover`              | `documents/cover.html.tera`                |
//! | `student_list`       | `documents/student_list.html.tera`         |
//! | `attendance_monthly` | `documents/attendance_monthly.html.tera`   |
//! | `grade_recap`        | `documents/grade_recap.html.tera`          |
//! | `guidance_log`       | `documents/guidance_log.html.tera`         |
//! | `achievement_report` | `documents/achievement_report.html.tera`   |
//! | `parent_call`        | `documents/parent_call.html.tera`          |
//!
//! A file with the same relative name under the user template directory
//! replaces the embedded one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tera::Tera;
use tracing::debug;

use waliadmin_core::Dataset;

use crate::catalog::TemplateKind;
use crate::context::DocumentContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const PLACEHOLDER_TEMPLATE: &str = "documents/placeholder.html.tera";

const TPLS: &[(&str, &str)] = &[
    ("partials/header.html.tera", include_str!("templates/partials/header.html.tera")),
    (
        "partials/signature.html.tera",
        include_str!("templates/partials/signature.html.tera"),
    ),
    ("documents/cover.html.tera", include_str!("templates/documents/cover.html.tera")),
    (
        "documents/student_list.html.tera",
        include_str!("templates/documents/student_list.html.tera"),
    ),
    (
        "documents/attendance_monthly.html.tera",
        include_str!("templates/documents/attendance_monthly.html.tera"),
    ),
    (
        "documents/grade_recap.html.tera",
        include_str!("templates/documents/grade_recap.html.tera"),
    ),
    (
        "documents/guidance_log.html.tera",
        include_str!("templates/documents/guidance_log.html.tera"),
    ),
    (
        "documents/achievement_report.html.tera",
        include_str!("templates/documents/achievement_report.html.tera"),
    ),
    (
        "documents/parent_call.html.tera",
        include_str!("templates/documents/parent_call.html.tera"),
    ),
    (PLACEHOLDER_TEMPLATE, include_str!("templates/documents/placeholder.html.tera")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        debug!(template = %name, path = %path.display(), "loaded template override");
        templates.push((name, contents));
    }
    Ok(templates)
}

/// HTML escaping for interpolated text. Leaves `/` as is, so `2201/0091` stays readable.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(normalize_template_name(Path::new(name)), (*content).to_string());
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    tera.autoescape_on(vec![".html.tera"]);
    tera.set_escape_fn(escape_markup);
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

impl TemplateKind {
    /// Tera template rendered for this kind.
    pub fn template_name(&self) -> &'static str {
        match self {
            TemplateKind::Cover => "documents/cover.html.tera",
            TemplateKind::StudentList => "documents/student_list.html.tera",
            TemplateKind::AttendanceMonthly => "documents/attendance_monthly.html.tera",
            TemplateKind::GradeRecap => "documents/grade_recap.html.tera",
            TemplateKind::GuidanceLog => "documents/guidance_log.html.tera",
            TemplateKind::AchievementReport => "documents/achievement_report.html.tera",
            TemplateKind::ParentCall => "documents/parent_call.html.tera",
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// One rendered HTML body fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `None` for an unknown id rendered as a placeholder.
    pub kind: Option<TemplateKind>,
    pub title: String,
    pub html: String,
}

impl Document {
    /// Catalog id, or the requested id for placeholders.
    pub fn id(&self) -> &str {
        match self.kind {
            Some(kind) => kind.id(),
            None => &self.title,
        }
    }
}

/// Tera-based renderer for every document kind.
///
/// Build once and reuse. Rendering is a pure function of
/// `(kind, dataset, today)`: the same inputs always produce the same HTML.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Embedded templates only.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { tera: build_tera(None)? })
    }

    /// Embedded templates plus any `.tera` overrides under `dir`.
    /// A missing directory is not an error.
    pub fn with_overrides(dir: &Path) -> Result<Self, RenderError> {
        Ok(Renderer { tera: build_tera(Some(dir))? })
    }

    pub fn render(
        &self,
        kind: TemplateKind,
        dataset: &Dataset,
        today: NaiveDate,
    ) -> Result<Document, RenderError> {
        let ctx = DocumentContext::build(kind, dataset, today);
        let html = self.tera.render(kind.template_name(), &ctx.to_tera_context()?)?;
        debug!(template = kind.id(), bytes = html.len(), "rendered document");
        Ok(Document { kind: Some(kind), title: ctx.title, html })
    }

    /// Render by catalog id. Unknown ids produce a placeholder document instead
    /// of an error.
    pub fn render_id(
        &self,
        id: &str,
        dataset: &Dataset,
        today: NaiveDate,
    ) -> Result<Document, RenderError> {
        match TemplateKind::from_id(id) {
            Some(kind) => self.render(kind, dataset, today),
            None => {
                debug!(template = id, "unknown template id, rendering placeholder");
                let mut ctx = tera::Context::new();
                ctx.insert("template_id", id);
                let html = self.tera.render(PLACEHOLDER_TEMPLATE, &ctx)?;
                Ok(Document { kind: None, title: id.to_string(), html })
            }
        }
    }

    /// Every catalog document, in catalog order.
    pub fn render_all(
        &self,
        dataset: &Dataset,
        today: NaiveDate,
    ) -> Result<Vec<Document>, RenderError> {
        TemplateKind::all().iter().map(|k| self.render(*k, dataset, today)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn renderer_new_succeeds() {
        Renderer::new().expect("Renderer::new should succeed with embedded templates");
    }

    #[test]
    fn every_kind_has_an_embedded_template() {
        let names: Vec<&str> = TPLS.iter().map(|(n, _)| *n).collect();
        for kind in TemplateKind::all() {
            assert!(names.contains(&kind.template_name()), "no template for {kind}");
        }
    }

    #[test]
    fn escape_keeps_slashes() {
        assert_eq!(escape_markup("2201/0091"), "2201/0091");
        assert_eq!(
            escape_markup("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn unknown_id_renders_escaped_placeholder() {
        let renderer = Renderer::new().unwrap();
        let doc = renderer.render_id("<raport>", &Dataset::default(), today()).unwrap();
        assert_eq!(doc.kind, None);
        assert_eq!(doc.id(), "<raport>");
        assert!(doc.html.contains(r#"Template "&lt;raport&gt;" dalam pengembangan."#));
    }

    #[test]
    fn render_all_follows_catalog_order() {
        let renderer = Renderer::new().unwrap();
        let docs = renderer.render_all(&Dataset::default(), today()).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id()).collect();
        let expected: Vec<&str> = TemplateKind::all().iter().map(|k| k.id()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn no_crlf_in_any_rendered_output() {
        let renderer = Renderer::new().unwrap();
        for doc in renderer.render_all(&Dataset::default(), today()).unwrap() {
            assert!(!doc.html.contains('\r'), "{} contains CR", doc.id());
        }
    }
}
