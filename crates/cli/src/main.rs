use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use remedy_catalog::{CatalogConfig, CatalogId, CatalogStore};
use remedy_engine::RecommendationEngine;
use remedy_protocol::InvokeResponse;
use std::env;
use std::path::PathBuf;

mod serve;

#[derive(Parser)]
#[command(name = "remedy")]
#[command(about = "Fuzzy-matched remediation advice for HR load errors", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for results)
    #[arg(long, global = true)]
    quiet: bool,

    /// Base URL of the catalog object store (overrides REMEDY_CATALOG_URL)
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// Local directory holding the catalog files (overrides REMEDY_CATALOG_DIR)
    #[arg(long, global = true)]
    catalog_dir: Option<PathBuf>,

    /// Object key of the CVR catalog (overrides REMEDY_CVR_KEY)
    #[arg(long, global = true)]
    cvr_key: Option<String>,

    /// Object key of the common-errors catalog (overrides REMEDY_COMMON_KEY)
    #[arg(long, global = true)]
    common_key: Option<String>,

    /// Path to a remedy.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up remediation advice for an error message
    Lookup(LookupArgs),

    /// Serve the invocation API over HTTP (POST /invocations)
    Serve(ServeArgs),

    /// Load both catalogs and report their row counts
    Catalogs(CatalogsArgs),
}

#[derive(Args)]
struct LookupArgs {
    /// Error message to look up
    query: String,

    /// Print the invocation envelope as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:8080
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,
}

#[derive(Args)]
struct CatalogsArgs {
    /// Print row counts as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    if let Some(url) = &cli.catalog_url {
        env::set_var(remedy_catalog::ENV_CATALOG_URL, url);
    }
    if let Some(dir) = &cli.catalog_dir {
        env::set_var(remedy_catalog::ENV_CATALOG_DIR, dir);
    }
    if let Some(key) = &cli.cvr_key {
        env::set_var(remedy_catalog::ENV_CVR_KEY, key);
    }
    if let Some(key) = &cli.common_key {
        env::set_var(remedy_catalog::ENV_COMMON_KEY, key);
    }

    // Keep stdout clean when it carries JSON.
    let json_output = match &cli.command {
        Commands::Lookup(args) => args.json,
        Commands::Catalogs(args) => args.json,
        Commands::Serve(_) => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config =
        CatalogConfig::load(cli.config.as_deref()).context("Invalid catalog configuration")?;

    match cli.command {
        Commands::Lookup(args) => run_lookup(args, config).await?,
        Commands::Serve(args) => serve::run(&args.bind, config).await?,
        Commands::Catalogs(args) => run_catalogs(args, config).await?,
    }

    Ok(())
}

async fn run_lookup(args: LookupArgs, config: CatalogConfig) -> Result<()> {
    let engine = RecommendationEngine::new(CatalogStore::new(config.fetcher()?));
    let result = engine.lookup(&args.query).await;
    if args.json {
        let response = InvokeResponse::new(result, None);
        println!("{}", remedy_protocol::serialize_json(&response)?);
    } else {
        println!("{result}");
    }
    Ok(())
}

async fn run_catalogs(args: CatalogsArgs, config: CatalogConfig) -> Result<()> {
    let store = CatalogStore::new(config.fetcher()?);
    let mut counts = Vec::new();
    for id in CatalogId::ALL {
        let rows = store
            .rows(id)
            .await
            .with_context(|| format!("Failed to load {id} catalog"))?;
        counts.push((id, rows.len()));
    }

    if args.json {
        let mut report = serde_json::Map::new();
        for (id, count) in &counts {
            report.insert(id.as_str().to_string(), serde_json::Value::from(*count));
        }
        println!("{}", serde_json::Value::Object(report));
    } else {
        for (id, count) in counts {
            println!("{id}: {count} rows");
        }
    }
    Ok(())
}
