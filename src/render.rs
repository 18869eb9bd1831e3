// src/render.rs
use crate::filter::FilteredGraph;
use crate::graph::{NodeKind, SymbolGraph};
use crate::timeline::{TimelineEvent, TimelineStats};

pub fn render_summary_markdown(
    date: &str,
    graph: &SymbolGraph,
    explored: &FilteredGraph,
    events: &[TimelineEvent],
    stats: &TimelineStats,
) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Symbolica Exploration — {}\n\n", date));

    md.push_str("## Catalog\n");
    let entity_count = graph.nodes.iter().filter(|n| n.kind == NodeKind::Entity).count();
    md.push_str(&format!(
        "- {} symbols, {} graph nodes, {} relations\n",
        entity_count,
        graph.nodes.len(),
        graph.edges.len()
    ));
    md.push_str(&format!(
        "- current filters match {} symbols ({} nodes kept)\n\n",
        explored.matching_entities,
        explored.nodes.len()
    ));

    let mut top: Vec<_> = graph.nodes.iter().filter(|n| n.kind != NodeKind::Entity).collect();
    top.sort_by_key(|n| std::cmp::Reverse(n.connections));
    if !top.is_empty() {
        md.push_str("## Most Connected\n");
        for n in top.iter().take(5) {
            md.push_str(&format!("- **{}** — {} symbols\n", n.label, n.connections));
        }
        md.push('\n');
    }

    if !events.is_empty() {
        md.push_str("## Latest Contributions\n");
        for e in events.iter().take(5) {
            md.push_str(&format!(
                "- {} — **{}** ({:?})\n",
                e.timestamp.format("%Y-%m-%d"),
                e.title,
                e.debate_status
            ));
        }
        md.push('\n');
    }

    md.push_str("## Debates\n");
    md.push_str(&format!(
        "- {} events, {} active debates, {} at consensus\n",
        stats.total_events, stats.active_debates, stats.consensus_events
    ));
    md.push_str(&format!(
        "- {} participants, mean consensus {}\n",
        stats.total_participants, stats.avg_consensus
    ));

    md
}
