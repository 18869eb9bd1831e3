use anyhow::bail;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashSet;

use crate::graph::{GraphEdge, GraphNode, NodeKind, RelationKind, SymbolGraph};
use crate::models::CatalogEntity;

/// Facet value meaning "no filtering on this axis".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExploreMode {
    Explorer,
    Thematic,
    Cultural,
    Temporal,
}

impl std::str::FromStr for ExploreMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explorer" => Ok(ExploreMode::Explorer),
            "thematic" => Ok(ExploreMode::Thematic),
            "cultural" => Ok(ExploreMode::Cultural),
            "temporal" => Ok(ExploreMode::Temporal),
            other => bail!("unknown exploration mode: {} (expected explorer|thematic|cultural|temporal)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub cultural_region: String,   // taxonomy-code prefix, or "all"
    pub temporal_period: String,   // exact taxonomy code, or "all"
    pub thematic_category: String, // contained taxonomy code, or "all"
    pub mode: ExploreMode,
    pub max_nodes: usize,
    pub connection_strength: u32, // > 2 keeps culture edges only
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            cultural_region: ALL.to_string(),
            temporal_period: ALL.to_string(),
            thematic_category: ALL.to_string(),
            mode: ExploreMode::Explorer,
            max_nodes: 40,
            connection_strength: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilteredGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Facet-filtered entity count before any node capping, for "N results".
    pub matching_entities: usize,
}

fn matches_facets(e: &CatalogEntity, cfg: &FilterConfig) -> bool {
    if cfg.cultural_region != ALL && !e.cultural_taxonomy_code.starts_with(&cfg.cultural_region) {
        return false;
    }
    if cfg.temporal_period != ALL && e.temporal_taxonomy_code != cfg.temporal_period {
        return false;
    }
    if cfg.thematic_category != ALL
        && !e.thematic_taxonomy_codes.iter().any(|c| c == &cfg.thematic_category)
    {
        return false;
    }
    true
}

/// Derive a bounded subgraph of the full graph for one filter configuration.
///
/// Facet predicates first, then a per-mode entity selection, then a node pass
/// keeping selected entities plus the category nodes any edge connects them
/// to, capped at `max_nodes`. Edges survive only with both endpoints kept.
/// The second 60% truncation after mode selection is redundant for some modes
/// and kept that way on purpose; `temporal` performs no temporal bucketing
/// (plain truncation in original order).
pub fn filter_graph(
    graph: &SymbolGraph,
    entities: &[CatalogEntity],
    cfg: &FilterConfig,
) -> FilteredGraph {
    let filtered: Vec<&CatalogEntity> =
        entities.iter().filter(|e| matches_facets(e, cfg)).collect();
    let matching_entities = filtered.len();

    let budget = (cfg.max_nodes as f32 * 0.6) as usize;
    let mut selected: Vec<&CatalogEntity> = match cfg.mode {
        ExploreMode::Explorer => filtered
            .iter()
            .copied()
            .sorted_by_key(|e| std::cmp::Reverse(e.tags.len() + e.thematic_taxonomy_codes.len()))
            .take(budget)
            .collect(),
        ExploreMode::Thematic => {
            if cfg.thematic_category != ALL {
                filtered.iter().copied().take((cfg.max_nodes as f32 * 0.7) as usize).collect()
            } else {
                filtered.clone()
            }
        }
        ExploreMode::Cultural => {
            let buckets = filtered.iter().copied().into_group_map_by(|e| e.culture.clone());
            let quota = if buckets.is_empty() { 0 } else { budget / buckets.len() };
            let order: Vec<&String> = buckets.keys().sorted().collect();
            let mut take = Vec::new();
            for round in 0..quota {
                for key in &order {
                    if let Some(e) = buckets[*key].get(round) {
                        take.push(*e);
                    }
                }
            }
            take
        }
        ExploreMode::Temporal => filtered.iter().copied().take(budget).collect(),
    };
    selected.truncate(budget);

    let selected_ids: HashSet<&str> = selected.iter().map(|e| e.id.as_str()).collect();

    // category nodes reachable from a selected entity via any full-graph edge
    let mut connected: HashSet<&str> = HashSet::new();
    for e in &graph.edges {
        if selected_ids.contains(e.source.as_str()) {
            connected.insert(e.target.as_str());
        }
        if selected_ids.contains(e.target.as_str()) {
            connected.insert(e.source.as_str());
        }
    }

    let mut nodes: Vec<GraphNode> = graph
        .nodes
        .iter()
        .filter(|n| {
            selected_ids.contains(n.id.as_str())
                || (n.kind != NodeKind::Entity && connected.contains(n.id.as_str()))
        })
        .cloned()
        .collect();
    nodes.truncate(cfg.max_nodes);

    let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut edges: Vec<GraphEdge> = graph
        .edges
        .iter()
        .filter(|e| kept.contains(e.source.as_str()) && kept.contains(e.target.as_str()))
        .cloned()
        .collect();
    if cfg.connection_strength > 2 {
        edges.retain(|e| e.relation == RelationKind::Culture);
    }

    FilteredGraph { nodes, edges, matching_entities }
}
