use anyhow::Result;
use chrono::{Datelike, Utc};
use chrono_tz::Europe::Paris;
use clap::Parser;
use symbolica_explorer::filter::FilterConfig;
use symbolica_explorer::orchestrator::run_export;
use tracing::{debug, info};
use url::Url;

/// Symbolica Explorer - derived-graph and timeline exporter for the symbol catalog
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory for generated files (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: String,

    /// Backend base URL (overrides SYMBOLICA_BACKEND environment variable)
    #[arg(long)]
    backend_url: Option<String>,

    /// Quest whose collaborative content feeds the timeline
    #[arg(long)]
    quest: Option<String>,

    /// Exploration mode: explorer | thematic | cultural | temporal
    #[arg(long, default_value = "explorer")]
    mode: String,

    /// Cultural-region taxonomy prefix ("all" disables the facet)
    #[arg(long, default_value = "all")]
    region: String,

    /// Temporal-period taxonomy code ("all" disables the facet)
    #[arg(long, default_value = "all")]
    period: String,

    /// Thematic taxonomy code ("all" disables the facet)
    #[arg(long, default_value = "all")]
    theme: String,

    /// Node cap for the exploration subgraph
    #[arg(long, default_value_t = 40)]
    max_nodes: usize,

    /// Connection strength; above 2 only culture relations are kept
    #[arg(long, default_value_t = 1)]
    connection_strength: u32,
}

const DEFAULT_BACKEND: &str = "https://atlas.symbolica.app/";

fn resolve_backend(args: &Args) -> Result<Url> {
    // CLI arg > env override > default
    let raw = if let Some(ref u) = args.backend_url {
        debug!("Using backend URL from --backend-url argument: {}", u);
        u.clone()
    } else if let Ok(u) = std::env::var("SYMBOLICA_BACKEND") {
        debug!("Using backend URL from SYMBOLICA_BACKEND: {}", u);
        u
    } else {
        DEFAULT_BACKEND.to_string()
    };

    // a trailing slash keeps Url::join from eating the last path segment
    let raw = if raw.ends_with('/') { raw } else { format!("{}/", raw) };
    Url::parse(&raw).map_err(|e| anyhow::anyhow!("invalid backend URL {}: {}", raw, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting symbolica_explorer");

    let args = Args::parse();
    let base = resolve_backend(&args)?;

    let cfg = FilterConfig {
        cultural_region: args.region.clone(),
        temporal_period: args.period.clone(),
        thematic_category: args.theme.clone(),
        mode: args.mode.parse()?,
        max_nodes: args.max_nodes,
        connection_strength: args.connection_strength,
    };

    // Date anchoring - the catalog is Paris-authored, so the output day is too
    let utc_now = Utc::now();
    let paris_now = utc_now.with_timezone(&Paris);
    let today = paris_now.date_naive();
    let ymd_today = format!("{:04}-{:02}-{:02}", today.year(), today.month(), today.day());

    info!(
        "Run parameters - date={}, backend={}, quest={:?}, output_dir={}",
        ymd_today, base, args.quest, args.output_dir
    );
    debug!(
        "Using Paris timezone - current_time={}",
        paris_now.format("%Y-%m-%d %H:%M:%S %Z")
    );

    run_export(&base, args.quest.as_deref(), &cfg, &ymd_today, &args.output_dir).await
}
