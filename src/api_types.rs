use serde::{Deserialize, Serialize};

// Wire shapes served by the hosted backend. Optional fields and arrays are
// defaulted so partially-filled community records still decode; timestamps
// arrive as RFC3339 strings and are parsed (or dropped) in fetch.rs.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSymbol {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub culture: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, rename = "function")]
    pub functions: Vec<String>,
    #[serde(default)]
    pub cultural_taxonomy_code: String,
    #[serde(default)]
    pub temporal_taxonomy_code: String,
    #[serde(default)]
    pub thematic_taxonomy_codes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiClue {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub validation_score: f32,
    pub created_at: Option<String>,
    pub submitted_at: Option<String>,
    pub submitted_by: Option<String>,
    pub validated_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub verified: bool,
    pub credibility: Option<f32>,
    pub created_at: Option<String>,
    pub submitted_at: Option<String>,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub credibility: Option<f32>,
    pub created_at: Option<String>,
    pub date_created: Option<String>,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiArchive {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub credibility: Option<f32>,
    pub created_at: Option<String>,
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFigure {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub relevance: f32,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDiscussion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub reply_count: u32,
    pub created_at: Option<String>,
    pub last_activity_at: Option<String>,
}
