use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;
use xxhash_rust::xxh3::xxh3_64;

use crate::api_types::*;
use crate::models::*;

/// Stable fallback id for records that arrive without one.
fn make_symbol_id(name: &str, culture: &str) -> String {
    format!("{:016x}", xxh3_64(format!("{}|{}", name, culture).as_bytes()))
}

fn parse_ts(s: &Option<String>) -> Option<DateTime<Utc>> {
    s.as_deref()
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Fetch the full symbol catalog.
pub async fn fetch_symbols(client: &Client, base: &Url) -> Result<Vec<CatalogEntity>> {
    let url = base.join("api/symbols.json")?;
    let start = std::time::Instant::now();

    debug!("Fetching catalog - url={}", url);

    let resp = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Request failed for {}", url))?
        .error_for_status()
        .with_context(|| format!("HTTP error for {}", url))?;

    let api_symbols: Vec<ApiSymbol> = resp
        .json()
        .await
        .with_context(|| format!("Decoding JSON for {}", url))?;

    let count = api_symbols.len();
    let symbols = api_symbols
        .into_iter()
        .map(|s| {
            let id = if s.id.is_empty() { make_symbol_id(&s.name, &s.culture) } else { s.id };
            CatalogEntity {
                id,
                name: s.name.trim().to_string(),
                culture: s.culture.trim().to_string(),
                period: s.period.trim().to_string(),
                description: s.description,
                tags: s.tags,
                functions: s.functions,
                cultural_taxonomy_code: s.cultural_taxonomy_code,
                temporal_taxonomy_code: s.temporal_taxonomy_code,
                thematic_taxonomy_codes: s.thematic_taxonomy_codes,
            }
        })
        .collect();

    let elapsed = start.elapsed();
    info!(
        "Catalog fetch completed - duration={:.2}s, symbols={}",
        elapsed.as_secs_f32(),
        count
    );

    Ok(symbols)
}

/// Try to fetch one quest content kind; Ok(None) on 404 (kind not contributed yet).
async fn fetch_kind_opt<T: DeserializeOwned>(
    client: &Client,
    base: &Url,
    quest_id: &str,
    kind: &str,
) -> Result<Option<Vec<T>>> {
    let url = base.join(&format!("api/quests/{}/{}.json", quest_id, kind))?;

    debug!("Fetching quest content - quest={}, kind={}", quest_id, kind);

    let resp = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Request failed for {}", url))?;

    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        warn!("Content kind not found (404) - quest={}, kind={}", quest_id, kind);
        return Ok(None);
    }

    let resp = resp
        .error_for_status()
        .with_context(|| format!("HTTP error for {}", url))?;

    let items: Vec<T> = resp
        .json()
        .await
        .with_context(|| format!("Decoding JSON for {}", url))?;

    Ok(Some(items))
}

/// Fetch all six collaborative-content arrays for one quest. Missing kinds
/// come back empty; the synthesizer treats them the same way.
pub async fn fetch_quest_content(
    client: &Client,
    base: &Url,
    quest_id: &str,
) -> Result<QuestContent> {
    let start = std::time::Instant::now();

    let clues: Vec<ApiClue> =
        fetch_kind_opt(client, base, quest_id, "clues").await?.unwrap_or_default();
    let sources: Vec<ApiSource> =
        fetch_kind_opt(client, base, quest_id, "sources").await?.unwrap_or_default();
    let documents: Vec<ApiDocument> =
        fetch_kind_opt(client, base, quest_id, "documents").await?.unwrap_or_default();
    let archives: Vec<ApiArchive> =
        fetch_kind_opt(client, base, quest_id, "archives").await?.unwrap_or_default();
    let figures: Vec<ApiFigure> =
        fetch_kind_opt(client, base, quest_id, "figures").await?.unwrap_or_default();
    let discussions: Vec<ApiDiscussion> =
        fetch_kind_opt(client, base, quest_id, "discussions").await?.unwrap_or_default();

    let content = QuestContent {
        clues: clues
            .into_iter()
            .map(|c| Clue {
                created_at: parse_ts(&c.created_at),
                submitted_at: parse_ts(&c.submitted_at),
                id: c.id,
                title: c.title,
                description: c.description,
                validation_score: c.validation_score,
                submitted_by: c.submitted_by,
                validated_by: c.validated_by,
            })
            .collect(),
        sources: sources
            .into_iter()
            .map(|s| SourceRecord {
                created_at: parse_ts(&s.created_at),
                submitted_at: parse_ts(&s.submitted_at),
                id: s.id,
                title: s.title,
                description: s.description,
                verified: s.verified,
                credibility: s.credibility,
                submitted_by: s.submitted_by,
            })
            .collect(),
        documents: documents
            .into_iter()
            .map(|d| DocumentRecord {
                created_at: parse_ts(&d.created_at),
                date_created: parse_ts(&d.date_created),
                id: d.id,
                title: d.title,
                description: d.description,
                credibility: d.credibility,
                submitted_by: d.submitted_by,
            })
            .collect(),
        archives: archives
            .into_iter()
            .map(|a| ArchiveRecord {
                created_at: parse_ts(&a.created_at),
                date_created: parse_ts(&a.date_created),
                id: a.id,
                title: a.title,
                description: a.description,
                credibility: a.credibility,
            })
            .collect(),
        figures: figures
            .into_iter()
            .map(|f| HistoricalFigure {
                created_at: parse_ts(&f.created_at),
                id: f.id,
                name: f.name,
                description: f.description,
                relevance: f.relevance,
            })
            .collect(),
        discussions: discussions
            .into_iter()
            .map(|d| Discussion {
                created_at: parse_ts(&d.created_at),
                last_activity_at: parse_ts(&d.last_activity_at),
                id: d.id,
                topic: d.topic,
                description: d.description,
                pinned: d.pinned,
                reply_count: d.reply_count,
            })
            .collect(),
    };

    let elapsed = start.elapsed();
    info!(
        "Quest content fetch completed - quest={}, duration={:.2}s, clues={}, sources={}, documents={}, archives={}, figures={}, discussions={}",
        quest_id,
        elapsed.as_secs_f32(),
        content.clues.len(),
        content.sources.len(),
        content.documents.len(),
        content.archives.len(),
        content.figures.len(),
        content.discussions.len()
    );

    Ok(content)
}
