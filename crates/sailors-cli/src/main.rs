// ============================================================================
// star-sailors — terminal front-end for the Star Sailors client core
// ============================================================================
// Usage:
//   star-sailors synthesize [--lat L --lon L] [--radius KM] [--count N]
//   star-sailors anomalies [--lat L --lon L] [--radius KM] [--limit N] [--json]
//   star-sailors inventory [--limit N] [--json]
//   star-sailors catalog [--json]
//   star-sailors classifications [--limit N]
//   star-sailors profile <USER_ID>
//
// Backend settings come from the environment (.env is loaded first); see
// sailors_core::config for the variable names.
// ============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sailors_core::{
    best_effort_location, great_circle_distance_km, group_by_initial, map, section_titles,
    service, synthesize_with, AnomalyService, CatalogSource, DefinitionCache, FixedLocation,
    GeoPoint, InventoryService, SailorsConfig,
};
use tracing::{debug, info};
use uuid::Uuid;

/// Star Sailors client core tool
#[derive(Parser)]
#[command(name = "star-sailors", version, about = "Inspect anomalies and inventory from the Star Sailors backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OriginArgs {
    /// Origin latitude (defaults to STAR_SAILORS_ORIGIN, then Port Melbourne)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Origin longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Maximum distance from the origin in km (defaults to STAR_SAILORS_RADIUS_KM)
    #[arg(long)]
    radius: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random points around an origin without touching the network
    Synthesize {
        #[command(flatten)]
        origin: OriginArgs,

        /// Number of points to generate
        #[arg(long, default_value = "5")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List linked anomalies with synthetic locations
    Anomalies {
        #[command(flatten)]
        origin: OriginArgs,

        /// Maximum rows to fetch
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the inventory grouped by leading letter
    Inventory {
        /// Maximum rows to fetch
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of sections
        #[arg(long)]
        json: bool,
    },

    /// Dump the item catalog
    Catalog {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List recent classifications
    Classifications {
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show a player profile
    Profile {
        /// Profile (auth user) id
        user_id: Uuid,
    },
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sailors_core=info".parse()?)
                .add_directive("star_sailors=info".parse()?),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Could not load .env file: {}", e);
    }
    init_logging()?;

    let cli = Cli::parse();
    let config = SailorsConfig::from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Synthesize {
            origin,
            count,
            seed,
        } => cmd_synthesize(&config, &origin, count, seed),
        Commands::Anomalies {
            origin,
            limit,
            json,
        } => cmd_anomalies(&config, &origin, limit, json).await,
        Commands::Inventory { limit, json } => cmd_inventory(&config, limit, json).await,
        Commands::Catalog { json } => cmd_catalog(&config, json).await,
        Commands::Classifications { limit } => cmd_classifications(&config, limit).await,
        Commands::Profile { user_id } => cmd_profile(&config, user_id).await,
    }
}

/// Flag origin, else configured origin, else the fallback point
fn resolve_origin(config: &SailorsConfig, args: &OriginArgs) -> Result<GeoPoint> {
    let origin = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => GeoPoint::new(lat, lon)?,
        _ => best_effort_location(&FixedLocation(config.origin)),
    };
    debug!("Using origin {}", origin);
    Ok(origin)
}

fn resolve_radius(config: &SailorsConfig, args: &OriginArgs) -> Result<f64> {
    let radius = args.radius.unwrap_or(config.radius_km);
    if !(radius >= 0.0) {
        anyhow::bail!("Radius must be non-negative, got {}", radius);
    }
    Ok(radius)
}

fn cmd_synthesize(
    config: &SailorsConfig,
    args: &OriginArgs,
    count: usize,
    seed: Option<u64>,
) -> Result<()> {
    let origin = resolve_origin(config, args)?;
    let radius = resolve_radius(config, args)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("Origin: {}  (radius {} km)", origin, radius);
    for i in 0..count {
        let point = synthesize_with(&mut rng, origin, radius);
        println!(
            "{:>3}  {}  ({:.2} km)",
            i + 1,
            point,
            great_circle_distance_km(origin, point)
        );
    }
    Ok(())
}

async fn cmd_anomalies(
    config: &SailorsConfig,
    args: &OriginArgs,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let origin = resolve_origin(config, args)?;
    let radius = resolve_radius(config, args)?;
    let query = Arc::new(config.query_service()?);

    let service = AnomalyService::new(query)
        .with_radius_km(radius)
        .with_limit(limit.unwrap_or(config.anomaly_limit));
    service
        .refresh(origin)
        .await
        .context("Failed to fetch anomalies")?;

    let anomalies = service.snapshot().data;

    if json {
        println!("{}", serde_json::to_string_pretty(&anomalies)?);
        return Ok(());
    }

    if anomalies.is_empty() {
        println!("No linked anomalies.");
        return Ok(());
    }

    let center = map::initial_center(&anomalies, origin);
    println!("=== Linked Anomalies ===");
    println!("Map centre: {}", center);
    println!();

    for (linked, pin) in anomalies.iter().zip(map::annotations(origin, &anomalies)) {
        println!("Anomaly ID: {}", linked.anomaly.id);
        println!(
            "  {}",
            linked.anomaly.content.as_deref().unwrap_or("No content")
        );
        println!("  {}  ({})", linked.anomaly.coordinate, pin.subtitle);
    }

    println!("\nTotal: {} anomalies", anomalies.len());
    Ok(())
}

async fn cmd_inventory(config: &SailorsConfig, limit: Option<usize>, json: bool) -> Result<()> {
    let query = Arc::new(config.query_service()?);
    let definitions = Arc::new(DefinitionCache::new(Arc::new(config.catalog())));

    let service = InventoryService::new(query, definitions)
        .with_limit(limit.unwrap_or(config.inventory_limit));
    service
        .refresh()
        .await
        .context("Failed to fetch inventory")?;

    let items = service.snapshot().data;
    let groups = group_by_initial(&items);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("Inventory is empty.");
        return Ok(());
    }

    println!("=== Inventory ===");
    println!("Sections: {}", section_titles(&groups).join(" "));
    for (title, section) in &groups {
        println!("\n[{}]", title);
        for item in section {
            let icon = if item.icon_url.is_empty() { "?" } else { "*" };
            println!("  {} {:<30}  #{}", icon, item.name, item.id);
        }
    }

    println!("\nTotal: {} items", items.len());
    Ok(())
}

async fn cmd_catalog(config: &SailorsConfig, json: bool) -> Result<()> {
    let catalog = config.catalog();
    info!("Fetching catalog from {}", catalog.url());
    let mut definitions = catalog
        .fetch_definitions()
        .await
        .context("Failed to fetch item catalog")?;
    definitions.sort_by_key(|d| d.id);

    if json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    println!("{:<6}  {:<28}  {:<16}  {}", "ID", "NAME", "CATEGORY", "COST");
    println!("{}", "-".repeat(60));
    for def in &definitions {
        println!(
            "{:<6}  {:<28}  {:<16}  {}",
            def.id,
            def.name,
            def.category,
            def.cost.map(|c| c.to_string()).unwrap_or_else(|| "-".into())
        );
    }
    println!("\nTotal: {} definitions", definitions.len());
    Ok(())
}

async fn cmd_classifications(config: &SailorsConfig, limit: usize) -> Result<()> {
    let query = config.query_service()?;
    let classifications = service::fetch_classifications(&query, limit)
        .await
        .context("Failed to fetch classifications")?;

    if classifications.is_empty() {
        println!("No classifications found.");
        return Ok(());
    }

    println!(
        "{:<8}  {:<20}  {:<10}  {:<14}  {}",
        "ID", "CREATED", "ANOMALY", "TYPE", "CONTENT"
    );
    println!("{}", "-".repeat(80));
    for c in &classifications {
        let content = c
            .content
            .as_deref()
            .unwrap_or("-")
            .chars()
            .take(30)
            .collect::<String>();
        println!(
            "{:<8}  {:<20}  {:<10}  {:<14}  {}",
            c.id,
            c.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            c.anomaly.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
            c.classification_type.as_deref().unwrap_or("-"),
            content
        );
    }

    println!("\nTotal: {} classifications", classifications.len());
    Ok(())
}

async fn cmd_profile(config: &SailorsConfig, user_id: Uuid) -> Result<()> {
    let query = config.query_service()?;
    let Some(profile) = service::fetch_profile(&query, user_id)
        .await
        .context("Failed to fetch profile")?
    else {
        println!("No profile for {}", user_id);
        return Ok(());
    };

    let field = |value: Option<String>| value.unwrap_or_else(|| "-".into());
    println!("=== Profile {} ===", profile.id);
    println!("  Username:        {}", field(profile.username));
    println!("  Full name:       {}", field(profile.full_name));
    println!("  Website:         {}", field(profile.website));
    println!("  Location:        {}", field(profile.location.map(|l| l.to_string())));
    println!("  Active mission:  {}", field(profile.active_mission.map(|m| m.to_string())));
    println!(
        "  Points:          {}",
        profile.classification_points.unwrap_or(0)
    );
    if let Some(updated) = profile.updated_at {
        println!("  Updated:         {}", updated.format("%Y-%m-%d %H:%M:%S"));
    }
    Ok(())
}
