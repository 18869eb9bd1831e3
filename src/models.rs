use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog symbol record. The derivation pipeline never mutates these;
/// graphs and timelines are rebuilt from scratch on every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub id: String,
    pub name: String,
    pub culture: String, // free-text label, e.g. "Celtique"
    pub period: String,  // free-text label, e.g. "Moyen Âge", "XVe siècle", "1515"
    pub description: String,
    pub tags: Vec<String>,
    pub functions: Vec<String>,
    pub cultural_taxonomy_code: String, // e.g. "EU-CELT"
    pub temporal_taxonomy_code: String, // e.g. "ANT"
    pub thematic_taxonomy_codes: Vec<String>,
}

/// One quest's collaborative-content arrays, pooled for timeline synthesis.
/// Any array may be empty; missing content kinds fetch as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestContent {
    pub clues: Vec<Clue>,
    pub sources: Vec<SourceRecord>,
    pub documents: Vec<DocumentRecord>,
    pub archives: Vec<ArchiveRecord>,
    pub figures: Vec<HistoricalFigure>,
    pub discussions: Vec<Discussion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub validation_score: f32, // [0.0, 1.0]
    pub created_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub submitted_by: Option<String>,
    pub validated_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub verified: bool,
    pub credibility: Option<f32>, // [0.0, 100.0]
    pub created_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub credibility: Option<f32>,
    pub created_at: Option<DateTime<Utc>>,
    pub date_created: Option<DateTime<Utc>>,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub credibility: Option<f32>, // defaults to 95 downstream when absent
    pub created_at: Option<DateTime<Utc>>,
    pub date_created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalFigure {
    pub id: String,
    pub name: String,
    pub description: String,
    pub relevance: f32, // [0.0, 1.0]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discussion {
    pub id: String,
    pub topic: String,
    pub description: String,
    pub pinned: bool,
    pub reply_count: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub last_activity_at: Option<DateTime<Utc>>,
}
