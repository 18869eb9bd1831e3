use anyhow::{bail, Result};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

use crate::fetch::{fetch_quest_content, fetch_symbols};
use crate::filter::{filter_graph, FilterConfig};
use crate::graph::build_graph;
use crate::models::QuestContent;
use crate::render::render_summary_markdown;
use crate::timeline::{statistics, synthesize_events};
use crate::viz_export::write_all_viz;

pub async fn run_export(
    base: &Url,
    quest_id: Option<&str>,
    cfg: &FilterConfig,
    ymd_today: &str,
    output_dir: &str,
) -> Result<()> {
    let pipeline_start = std::time::Instant::now();
    info!("Pipeline started - date={}, output_dir={}", ymd_today, output_dir);

    let client = Client::builder().build()?;

    // 1) full catalog
    let mut symbols = fetch_symbols(&client, base).await?;
    if symbols.is_empty() {
        bail!("Catalog is empty - nothing to derive (checked {})", base);
    }

    // 1.5) deduplicate by id, keeping the first occurrence
    use std::collections::HashSet;
    let before = symbols.len();
    let mut seen: HashSet<String> = HashSet::new();
    symbols.retain(|s| seen.insert(s.id.clone()));
    let removed = before - symbols.len();
    if removed > 0 {
        info!("Deduplication - removed={} duplicate ids, retained={} symbols", removed, symbols.len());
    } else {
        debug!("Deduplication - no duplicates found, retained={} symbols", symbols.len());
    }

    // 2) full relationship graph, rebuilt from scratch
    let build_start = std::time::Instant::now();
    let graph = build_graph(&symbols);
    info!(
        "Graph built - duration={:.2}s, nodes={}, edges={}",
        build_start.elapsed().as_secs_f32(),
        graph.nodes.len(),
        graph.edges.len()
    );

    // 3) bounded exploration subgraph for the requested facets/mode
    let explored = filter_graph(&graph, &symbols, cfg);
    info!(
        "Exploration subgraph - mode={:?}, matching={}, nodes={}, edges={}",
        cfg.mode,
        explored.matching_entities,
        explored.nodes.len(),
        explored.edges.len()
    );

    // 4) quest timeline (empty when no quest selected)
    let content = match quest_id {
        Some(q) => fetch_quest_content(&client, base, q).await?,
        None => {
            debug!("No quest selected - timeline will be empty");
            QuestContent::default()
        }
    };
    let events = synthesize_events(&content);
    let stats = statistics(&events);
    info!(
        "Timeline synthesized - events={}, active_debates={}, consensus={}",
        stats.total_events, stats.active_debates, stats.consensus_events
    );

    // 5) write viz battery + human-readable summary
    let out_dir_for_date = Path::new(output_dir).join(ymd_today);
    write_all_viz(&out_dir_for_date, ymd_today, &symbols, &graph, &explored, &events, &stats)?;
    let md = render_summary_markdown(ymd_today, &graph, &explored, &events, &stats);
    std::fs::write(out_dir_for_date.join("explore.md"), md)?;

    info!(
        "Pipeline completed - duration={:.2}s, output={:?}",
        pipeline_start.elapsed().as_secs_f32(),
        out_dir_for_date
    );
    Ok(())
}
