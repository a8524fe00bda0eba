use serde::{Deserialize, Serialize};

use crate::entity::Lang;

fn default_status() -> i32 {
    1
}

/// Inline template reference carried by an import record.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportTemplate {
    pub id: i32,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: i32,
    pub questions_count: Option<i32>,
}

/// One question record from a `lotin.json` / `rus.json` / `crill.json`
/// document. The document id is the stable external identity; re-importing
/// overwrites the stored question wholesale.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRecord {
    pub id: i32,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_option: Option<String>,
    pub image_path: Option<String>,
    #[serde(default)]
    pub lang: Lang,
    pub category_id: Option<i32>,
    pub r#type: Option<String>,
    pub answer_description: Option<String>,
    pub answer_video: Option<String>,
    pub video_duration: Option<i32>,
    pub comment: Option<String>,
    #[serde(default)]
    pub static_order_answers: i32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default = "default_status")]
    pub status: i32,
    #[serde(default)]
    pub templates: Vec<ImportTemplate>,
}

/// Aggregate outcome of one import run.
#[derive(Debug, Default, Serialize, utoipa::ToSchema)]
pub struct ImportSummary {
    /// Questions inserted for the first time.
    pub created: u64,
    /// Questions that already existed and were overwritten.
    pub updated: u64,
    /// Records skipped because of a per-record failure.
    pub errors: u64,
    /// Questions now in the store after the run.
    pub total: u64,
}

impl ImportSummary {
    pub fn absorb(&mut self, other: &ImportSummary) {
        self.created += other.created;
        self.updated += other.updated;
        self.errors += other.errors;
        // Runs are sequential; the last run saw the final store size.
        self.total = other.total;
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ImportResponse {
    pub message: String,
    pub summary: ImportSummary,
}
