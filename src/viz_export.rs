// src/viz_export.rs
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::{fs, path::Path};

use crate::filter::FilteredGraph;
use crate::graph::SymbolGraph;
use crate::models::CatalogEntity;
use crate::period::{map_period_to_year, Confidence};
use crate::timeline::{TimelineEvent, TimelineStats};

/* -------------------------------------------------------------------------- */
/* Entry point                                                                */
/* -------------------------------------------------------------------------- */

/// Public entry point: write all D3-ready visualization JSONs into `out/<date>/`.
pub fn write_all_viz(
    out_dir_for_date: &Path, // e.g., out/2026-08-07
    date: &str,              // "YYYY-MM-DD" (anchor 'today')
    entities: &[CatalogEntity],
    graph: &SymbolGraph,
    explored: &FilteredGraph,
    events: &[TimelineEvent],
    stats: &TimelineStats,
) -> Result<()> {
    fs::create_dir_all(out_dir_for_date).with_context(|| format!("create {:?}", out_dir_for_date))?;

    // 1) Full relationship graph
    write_json(out_dir_for_date.join("viz.graph.json"), graph)?;

    // 2) Filtered exploration subgraph (+ pre-cap match count)
    write_json(out_dir_for_date.join("viz.explore.json"), explored)?;

    // 3) Chronology (estimated year per entity, for the timeline strip)
    let chronology = build_chronology(entities);
    write_json(out_dir_for_date.join("viz.chronology.json"), &chronology)?;

    // 4) Quest timeline events
    write_json(out_dir_for_date.join("viz.timeline.json"), &json!({ "events": events }))?;

    // 5) Timeline statistics
    write_json(out_dir_for_date.join("viz.stats.json"), stats)?;

    // 6) Per-day index
    let counts = json!({
        "symbols": entities.len(),
        "nodes": graph.nodes.len(),
        "edges": graph.edges.len(),
        "events": events.len(),
    });
    let idx = json!({
        "date": date,
        "version": 1,
        "counts": counts,
        "files": [
            "viz.graph.json",
            "viz.explore.json",
            "viz.chronology.json",
            "viz.timeline.json",
            "viz.stats.json"
        ]
    });
    write_json(out_dir_for_date.join("viz.index.json"), &idx)?;

    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .map(|_| ())
        .map_err(|e| e.into())
}

/* -------------------------------------------------------------------------- */
/* Chronology                                                                 */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
struct VChronoPoint {
    id: String,
    name: String,
    year: i32,
    confidence: Confidence,
}

#[derive(Serialize)]
struct VChronology {
    points: Vec<VChronoPoint>,
}

/// One estimated year per entity. The per-entity ordinal spreads entities
/// sharing the same period label across the culture's step range.
fn build_chronology(entities: &[CatalogEntity]) -> VChronology {
    use std::collections::HashMap;

    let mut ordinal_within_period: HashMap<&str, usize> = HashMap::new();
    let mut points = Vec::with_capacity(entities.len());

    for ent in entities {
        let slot = ordinal_within_period.entry(ent.period.as_str()).or_insert(0);
        let est = map_period_to_year(&ent.period, &ent.culture, *slot);
        *slot += 1;

        points.push(VChronoPoint {
            id: ent.id.clone(),
            name: ent.name.clone(),
            year: est.year,
            confidence: est.confidence,
        });
    }

    VChronology { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, culture: &str, period: &str) -> CatalogEntity {
        CatalogEntity {
            id: id.to_string(),
            name: id.to_uppercase(),
            culture: culture.to_string(),
            period: period.to_string(),
            description: String::new(),
            tags: vec![],
            functions: vec![],
            cultural_taxonomy_code: String::new(),
            temporal_taxonomy_code: String::new(),
            thematic_taxonomy_codes: vec![],
        }
    }

    #[test]
    fn shared_period_labels_get_spread_apart() {
        let entities = vec![
            entity("s1", "Égyptienne", "Nouvel Empire"),
            entity("s2", "Égyptienne", "Nouvel Empire"),
            entity("s3", "Égyptienne", "Ancien Empire"),
        ];
        let chrono = build_chronology(&entities);
        assert_eq!(chrono.points[0].year, -1500);
        assert_eq!(chrono.points[1].year, -1450); // same label, next ordinal
        assert_eq!(chrono.points[2].year, -2600); // different label restarts at 0
    }
}
