//! `waliadmin narrate <student> <keywords>`: development narrative via the
//! Gemini `generateContent` API.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Value};

use waliadmin_core::{config, Settings};

use super::home_dir;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Printed when the request fails or the response carries no text.
pub const FALLBACK_NARRATIVE: &str = "Gagal menghasilkan narasi otomatis.";

#[derive(Args, Debug)]
pub struct NarrateArgs {
    /// Student name as it should appear in the narrative.
    pub student: String,

    /// Observation points, e.g. "aktif di kelas, perlu bimbingan matematika".
    pub keywords: String,
}

impl NarrateArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let settings = config::load_at(&home).context("failed to load settings")?;
        let key_env = &settings.narrative.api_key_env;
        let api_key = std::env::var(key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .with_context(|| format!("set {key_env} to call the narrative API"))?;

        let prompt = build_prompt(&self.student, &self.keywords);
        let text = match generate(&settings, &api_key, &prompt) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::warn!("narrative response contained no text");
                FALLBACK_NARRATIVE.to_string()
            }
            Err(e) => {
                tracing::warn!("narrative request failed: {e:#}");
                FALLBACK_NARRATIVE.to_string()
            }
        };
        println!("{}", text.trim_end());
        Ok(())
    }
}

pub fn build_prompt(student: &str, keywords: &str) -> String {
    format!(
        "Buatkan narasi perkembangan untuk siswa bernama {student} berdasarkan poin-poin berikut: \
         {keywords}. Gunakan bahasa formal pendidikan Indonesia untuk raport atau buku bimbingan."
    )
}

pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": { "temperature": 0.7, "topP": 0.95 },
    })
}

/// First candidate's text parts, concatenated.
pub fn extract_text(response: &Value) -> Option<String> {
    let parts = response
        .pointer("/candidates/0/content/parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn generate(settings: &Settings, api_key: &str, prompt: &str) -> Result<Option<String>> {
    let url = format!("{API_BASE}/{}:generateContent", settings.narrative.model);
    tracing::info!("requesting narrative from {url}");

    let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
    let response: Value = agent
        .post(&url)
        .set("x-goog-api-key", api_key)
        .send_json(request_body(prompt))
        .context("narrative request failed")?
        .into_json()
        .context("narrative response is not JSON")?;
    Ok(extract_text(&response))
}
