use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::models::CatalogEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Entity,
    Culture,
    Period,
    Tag,
}

impl NodeKind {
    /// Display color, a pure function of the kind.
    pub fn color_class(self) -> &'static str {
        match self {
            NodeKind::Entity => "#d4a03c",
            NodeKind::Culture => "#7c5cbf",
            NodeKind::Period => "#3c8dd4",
            NodeKind::Tag => "#4caf7d",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Culture,
    Period,
    Tag,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub color: &'static str,
    pub connections: u32, // filled by the final counting pass
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub relation: RelationKind,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SymbolGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

fn node(id: String, label: String, kind: NodeKind) -> GraphNode {
    GraphNode { id, label, kind, color: kind.color_class(), connections: 0 }
}

/// Build the full `{nodes, edges}` graph from a flat entity list.
///
/// One entity node per input item (ids are unique upstream), then one
/// culture/period/tag node per distinct non-empty value in first-seen order.
/// Category nodes only exist for values that actually occur, so no node is
/// ever emitted without at least one touching edge. The whole graph is
/// rebuilt from scratch whenever the entity list changes.
pub fn build_graph(entities: &[CatalogEntity]) -> SymbolGraph {
    let mut nodes = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for ent in entities {
        nodes.push(node(ent.id.clone(), ent.name.clone(), NodeKind::Entity));
    }
    for ent in entities {
        if !ent.culture.is_empty() {
            let id = format!("culture-{}", ent.culture);
            if seen.insert(id.clone()) {
                nodes.push(node(id, ent.culture.clone(), NodeKind::Culture));
            }
        }
    }
    for ent in entities {
        if !ent.period.is_empty() {
            let id = format!("period-{}", ent.period);
            if seen.insert(id.clone()) {
                nodes.push(node(id, ent.period.clone(), NodeKind::Period));
            }
        }
    }
    for ent in entities {
        for tag in &ent.tags {
            if tag.is_empty() {
                continue;
            }
            let id = format!("tag-{}", tag);
            if seen.insert(id.clone()) {
                nodes.push(node(id, tag.clone(), NodeKind::Tag));
            }
        }
    }

    let mut edges = Vec::new();
    for ent in entities {
        if !ent.culture.is_empty() {
            edges.push(GraphEdge {
                source: ent.id.clone(),
                target: format!("culture-{}", ent.culture),
                relation: RelationKind::Culture,
            });
        }
        if !ent.period.is_empty() {
            edges.push(GraphEdge {
                source: ent.id.clone(),
                target: format!("period-{}", ent.period),
                relation: RelationKind::Period,
            });
        }
        for tag in &ent.tags {
            if tag.is_empty() {
                continue;
            }
            edges.push(GraphEdge {
                source: ent.id.clone(),
                target: format!("tag-{}", tag),
                relation: RelationKind::Tag,
            });
        }
    }

    // single counting pass: +1 per edge touching each endpoint
    let mut touches: HashMap<&str, u32> = HashMap::new();
    for e in &edges {
        *touches.entry(e.source.as_str()).or_insert(0) += 1;
        *touches.entry(e.target.as_str()).or_insert(0) += 1;
    }
    for n in &mut nodes {
        n.connections = touches.get(n.id.as_str()).copied().unwrap_or(0);
    }

    SymbolGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, culture: &str, period: &str, tags: &[&str]) -> CatalogEntity {
        CatalogEntity {
            id: id.to_string(),
            name: id.to_uppercase(),
            culture: culture.to_string(),
            period: period.to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            functions: vec![],
            cultural_taxonomy_code: String::new(),
            temporal_taxonomy_code: String::new(),
            thematic_taxonomy_codes: vec![],
        }
    }

    #[test]
    fn node_count_is_entities_plus_distinct_categories() {
        let entities = vec![
            entity("s1", "Celtique", "Antiquité", &["spirituel"]),
            entity("s2", "Celtique", "Moyen Âge", &["spirituel", "royal"]),
            entity("s3", "Nordique", "Antiquité", &["royal"]),
        ];
        let g = build_graph(&entities);
        // 3 entities + 2 cultures + 2 periods + 2 tags
        assert_eq!(g.nodes.len(), 9);
        // per entity: 1 culture + 1 period + n tags
        assert_eq!(g.edges.len(), 3 + 3 + 4);
    }

    #[test]
    fn category_connections_count_referencing_entities() {
        let entities = vec![
            entity("s1", "Celtique", "Antiquité", &["spirituel"]),
            entity("s2", "Celtique", "Moyen Âge", &["spirituel", "royal"]),
        ];
        let g = build_graph(&entities);
        let by_id = |id: &str| g.nodes.iter().find(|n| n.id == id).unwrap();
        assert_eq!(by_id("culture-Celtique").connections, 2);
        assert_eq!(by_id("tag-spirituel").connections, 2);
        assert_eq!(by_id("tag-royal").connections, 1);
        assert_eq!(by_id("period-Antiquité").connections, 1);
        // entity s2 touches its culture, period and two tags
        assert_eq!(by_id("s2").connections, 4);
    }

    #[test]
    fn empty_values_emit_no_category_node() {
        let entities = vec![entity("s1", "", "", &[""])];
        let g = build_graph(&entities);
        assert_eq!(g.nodes.len(), 1);
        assert!(g.edges.is_empty());
        assert_eq!(g.nodes[0].connections, 0);
    }

    #[test]
    fn color_is_derived_from_kind_alone() {
        let entities = vec![entity("s1", "Celtique", "Antiquité", &["spirituel"])];
        let g = build_graph(&entities);
        for n in &g.nodes {
            assert_eq!(n.color, n.kind.color_class());
        }
    }
}
