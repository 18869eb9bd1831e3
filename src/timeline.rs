use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::QuestContent;

/// Fixed event-type enumeration; wire labels are the catalog's French tags.
/// `Carte` stays part of the enumeration for map contributions even though
/// none of the six pooled arrays currently produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Carte,
    Indice,
    Discussion,
    Source,
    Personnage,
    Archive,
    Decouverte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DebateStatus {
    Active,
    Consensus,
    Controversial,
    Resolved,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEvent {
    pub id: String, // "<kind>-<original id, or index when absent>"
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub consensus: Option<u8>, // 0..=100
    pub debate_status: DebateStatus,
    pub participants: Option<u32>,
    pub submitted_by: Option<String>,
    pub validated_by: Option<String>,
}

pub const DEFAULT_RECENT_HOURS: i64 = 24;

fn event_id(kind: &str, original: &str, index: usize) -> String {
    if original.is_empty() {
        format!("{}-{}", kind, index)
    } else {
        format!("{}-{}", kind, original)
    }
}

/// Timestamp fallback chain: creation stamp, else the type-specific alternate,
/// else the wall clock at synthesis time. The wall-clock fallback makes repeat
/// runs over stale unstamped data order differently; accepted as-is.
fn stamp(primary: Option<DateTime<Utc>>, alternate: Option<DateTime<Utc>>) -> DateTime<Utc> {
    primary.or(alternate).unwrap_or_else(Utc::now)
}

fn score_0_100(unit: f32) -> u8 {
    (unit * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Merge one quest's collaborative-content arrays into a single typed event
/// stream, sorted descending by timestamp.
pub fn synthesize_events(content: &QuestContent) -> Vec<TimelineEvent> {
    let mut events = Vec::new();

    for (i, c) in content.clues.iter().enumerate() {
        let debate_status = if c.validation_score > 0.8 {
            DebateStatus::Consensus
        } else if c.validation_score > 0.6 {
            DebateStatus::Active
        } else {
            DebateStatus::Controversial
        };
        events.push(TimelineEvent {
            id: event_id("indice", &c.id, i),
            kind: EventKind::Indice,
            title: c.title.clone(),
            description: c.description.clone(),
            timestamp: stamp(c.created_at, c.submitted_at),
            consensus: Some(score_0_100(c.validation_score)),
            debate_status,
            participants: None,
            submitted_by: c.submitted_by.clone(),
            validated_by: c.validated_by.clone(),
        });
    }

    for (i, s) in content.sources.iter().enumerate() {
        events.push(TimelineEvent {
            id: event_id("source", &s.id, i),
            kind: EventKind::Source,
            title: s.title.clone(),
            description: s.description.clone(),
            timestamp: stamp(s.created_at, s.submitted_at),
            consensus: s.credibility.map(|c| c.round().clamp(0.0, 100.0) as u8),
            debate_status: if s.verified { DebateStatus::Consensus } else { DebateStatus::Active },
            participants: None,
            submitted_by: s.submitted_by.clone(),
            validated_by: None,
        });
    }

    // documents and archives are authoritative once catalogued
    for (i, d) in content.documents.iter().enumerate() {
        events.push(TimelineEvent {
            id: event_id("decouverte", &d.id, i),
            kind: EventKind::Decouverte,
            title: d.title.clone(),
            description: d.description.clone(),
            timestamp: stamp(d.created_at, d.date_created),
            consensus: d.credibility.map(|c| c.round().clamp(0.0, 100.0) as u8),
            debate_status: DebateStatus::Resolved,
            participants: None,
            submitted_by: d.submitted_by.clone(),
            validated_by: None,
        });
    }

    for (i, a) in content.archives.iter().enumerate() {
        events.push(TimelineEvent {
            id: event_id("archive", &a.id, i),
            kind: EventKind::Archive,
            title: a.title.clone(),
            description: a.description.clone(),
            timestamp: stamp(a.created_at, a.date_created),
            consensus: Some(a.credibility.unwrap_or(95.0).round().clamp(0.0, 100.0) as u8),
            debate_status: DebateStatus::Resolved,
            participants: None,
            submitted_by: None,
            validated_by: None,
        });
    }

    for (i, f) in content.figures.iter().enumerate() {
        events.push(TimelineEvent {
            id: event_id("personnage", &f.id, i),
            kind: EventKind::Personnage,
            title: f.name.clone(),
            description: f.description.clone(),
            timestamp: stamp(f.created_at, None),
            consensus: Some(score_0_100(f.relevance)),
            debate_status: if f.relevance > 0.8 {
                DebateStatus::Consensus
            } else {
                DebateStatus::Active
            },
            participants: None,
            submitted_by: None,
            validated_by: None,
        });
    }

    for (i, d) in content.discussions.iter().enumerate() {
        events.push(TimelineEvent {
            id: event_id("discussion", &d.id, i),
            kind: EventKind::Discussion,
            title: d.topic.clone(),
            description: d.description.clone(),
            timestamp: stamp(d.created_at, d.last_activity_at),
            consensus: None,
            debate_status: if d.pinned { DebateStatus::Consensus } else { DebateStatus::Active },
            participants: Some(d.reply_count),
            submitted_by: None,
            validated_by: None,
        });
    }

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events
}

/* -------------------------------------------------------------------------- */
/* Query helpers over the materialized list                                   */
/* -------------------------------------------------------------------------- */

pub fn events_by_kind<'a>(events: &'a [TimelineEvent], kind: EventKind) -> Vec<&'a TimelineEvent> {
    events.iter().filter(|e| e.kind == kind).collect()
}

/// Events within the last `hours` hours (callers default to
/// [`DEFAULT_RECENT_HOURS`]).
pub fn recent_events<'a>(events: &'a [TimelineEvent], hours: i64) -> Vec<&'a TimelineEvent> {
    let cutoff = Utc::now() - Duration::hours(hours);
    events.iter().filter(|e| e.timestamp >= cutoff).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimelineStats {
    pub total_events: usize,
    pub active_debates: usize,
    pub consensus_events: usize,
    pub total_participants: u64,
    /// Rounded mean over events that carry a consensus score; 0 when none do
    /// (the empty mean must never surface as NaN).
    pub avg_consensus: u32,
}

pub fn statistics(events: &[TimelineEvent]) -> TimelineStats {
    let scored: Vec<u8> = events.iter().filter_map(|e| e.consensus).collect();
    let avg_consensus = if scored.is_empty() {
        0
    } else {
        let sum: u32 = scored.iter().map(|&s| s as u32).sum();
        (sum as f32 / scored.len() as f32).round() as u32
    };
    TimelineStats {
        total_events: events.len(),
        active_debates: events
            .iter()
            .filter(|e| e.debate_status == DebateStatus::Active)
            .count(),
        consensus_events: events
            .iter()
            .filter(|e| e.debate_status == DebateStatus::Consensus)
            .count(),
        total_participants: events
            .iter()
            .filter_map(|e| e.participants)
            .map(u64::from)
            .sum(),
        avg_consensus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArchiveRecord, Clue, Discussion, HistoricalFigure, QuestContent, SourceRecord};
    use chrono::TimeZone;

    fn ts(s: &str) -> Option<DateTime<Utc>> {
        Some(DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
    }

    fn clue(id: &str, score: f32, created: Option<DateTime<Utc>>) -> Clue {
        Clue {
            id: id.to_string(),
            title: format!("indice {id}"),
            description: String::new(),
            validation_score: score,
            created_at: created,
            submitted_at: None,
            submitted_by: Some("marie".to_string()),
            validated_by: None,
        }
    }

    #[test]
    fn merged_list_is_sorted_descending() {
        let content = QuestContent {
            clues: vec![
                clue("a", 0.5, ts("2025-01-01T10:00:00Z")),
                clue("b", 0.9, ts("2025-03-01T10:00:00Z")),
            ],
            discussions: vec![Discussion {
                id: "d1".to_string(),
                topic: "datation".to_string(),
                description: String::new(),
                pinned: true,
                reply_count: 7,
                created_at: ts("2025-02-01T10:00:00Z"),
                last_activity_at: None,
            }],
            ..QuestContent::default()
        };
        let events = synthesize_events(&content);
        assert_eq!(events.len(), 3);
        for pair in events.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        assert_eq!(events[0].id, "indice-b");
    }

    #[test]
    fn clue_debate_status_ladder() {
        let content = QuestContent {
            clues: vec![
                clue("high", 0.85, ts("2025-01-03T00:00:00Z")),
                clue("mid", 0.7, ts("2025-01-02T00:00:00Z")),
                clue("low", 0.4, ts("2025-01-01T00:00:00Z")),
            ],
            ..QuestContent::default()
        };
        let events = synthesize_events(&content);
        assert_eq!(events[0].debate_status, DebateStatus::Consensus);
        assert_eq!(events[1].debate_status, DebateStatus::Active);
        assert_eq!(events[2].debate_status, DebateStatus::Controversial);
        assert_eq!(events[0].consensus, Some(85));
    }

    #[test]
    fn archives_default_credibility_and_resolve() {
        let content = QuestContent {
            archives: vec![ArchiveRecord {
                id: "a1".to_string(),
                title: "registre paroissial".to_string(),
                description: String::new(),
                credibility: None,
                created_at: ts("2025-01-01T00:00:00Z"),
                date_created: None,
            }],
            ..QuestContent::default()
        };
        let events = synthesize_events(&content);
        assert_eq!(events[0].consensus, Some(95));
        assert_eq!(events[0].debate_status, DebateStatus::Resolved);
    }

    #[test]
    fn filter_by_kind_returns_only_that_kind() {
        let content = QuestContent {
            clues: vec![clue("a", 0.9, ts("2025-01-01T00:00:00Z"))],
            sources: vec![SourceRecord {
                id: "s1".to_string(),
                title: "chronique".to_string(),
                description: String::new(),
                verified: true,
                credibility: Some(80.0),
                created_at: ts("2025-01-02T00:00:00Z"),
                submitted_at: None,
                submitted_by: None,
            }],
            ..QuestContent::default()
        };
        let events = synthesize_events(&content);
        let indices = events_by_kind(&events, EventKind::Indice);
        assert_eq!(indices.len(), 1);
        assert!(indices.iter().all(|e| e.kind == EventKind::Indice));
        // wire label is the French tag
        assert_eq!(serde_json::to_value(EventKind::Indice).unwrap(), "indice");
    }

    #[test]
    fn missing_timestamps_fall_back_to_now() {
        let content = QuestContent {
            figures: vec![HistoricalFigure {
                id: "f1".to_string(),
                name: "Aliénor".to_string(),
                description: String::new(),
                relevance: 0.9,
                created_at: None,
            }],
            ..QuestContent::default()
        };
        let before = Utc::now();
        let events = synthesize_events(&content);
        assert!(events[0].timestamp >= before);
        let recent = recent_events(&events, DEFAULT_RECENT_HOURS);
        assert_eq!(recent.len(), 1);
    }

    #[test]
    fn recent_window_excludes_old_events() {
        let content = QuestContent {
            clues: vec![
                clue("old", 0.9, Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())),
            ],
            ..QuestContent::default()
        };
        let events = synthesize_events(&content);
        assert!(recent_events(&events, DEFAULT_RECENT_HOURS).is_empty());
    }

    #[test]
    fn statistics_on_empty_input_are_all_zero() {
        let stats = statistics(&[]);
        assert_eq!(
            stats,
            TimelineStats {
                total_events: 0,
                active_debates: 0,
                consensus_events: 0,
                total_participants: 0,
                avg_consensus: 0,
            }
        );
    }

    #[test]
    fn statistics_aggregate_participants_and_scores() {
        let content = QuestContent {
            clues: vec![clue("a", 0.9, ts("2025-01-01T00:00:00Z"))], // score 90, consensus
            discussions: vec![Discussion {
                id: "d1".to_string(),
                topic: "datation".to_string(),
                description: String::new(),
                pinned: false,
                reply_count: 12,
                created_at: ts("2025-01-02T00:00:00Z"),
                last_activity_at: None,
            }],
            ..QuestContent::default()
        };
        let events = synthesize_events(&content);
        let stats = statistics(&events);
        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.active_debates, 1);
        assert_eq!(stats.consensus_events, 1);
        assert_eq!(stats.total_participants, 12);
        assert_eq!(stats.avg_consensus, 90);
    }
}
