// CLI Interface
//
// Command-line entry point for the decision service: run the HTTP server, or run ranking and
// planning once and print the JSON result.

use anyhow::{Context, Result as AnyhowResult};
use chrono::Utc;
use clap::{Parser, Subcommand};
use ledecision::{planner, scorer, Catalog, PlanRequest, RankRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;
use crate::server::AiServiceServer;

/// Blue Ship Sync decision service
#[derive(Parser, Debug)]
#[command(name = "ai-service")]
#[command(author = "Blue Ship Sync Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rank warehouse recommendations and plan JIT transfers", long_about = None)]
pub struct Cli {
    /// Path to a TOML service configuration file
    #[arg(global = true, long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP service (default)
    Serve {
        /// Host address to bind to
        #[arg(long = "host")]
        host: Option<String>,

        /// Port to listen on
        #[arg(long = "port")]
        port: Option<u16>,
    },

    /// Print the ranked recommendations
    Rank,

    /// Print a JIT transfer plan
    Plan {
        /// SKU to move
        #[arg(long = "sku")]
        sku: String,

        /// Units to move
        #[arg(long = "qty", allow_negative_numbers = true)]
        qty: i64,

        /// Destination warehouse
        #[arg(long = "dest")]
        dest: String,

        /// Seed for the random source
        #[arg(long = "seed")]
        seed: Option<u64>,
    },

    /// Print the effective catalog as TOML
    Catalog,
}

impl Cli {
    /// Run the CLI
    pub async fn run(self) -> AnyhowResult<()> {
        let mut config = ServiceConfig::resolve(self.config.as_deref())?;
        if self.verbose {
            config.log_level = "debug".to_string();
        }

        init_logging_impl(&config.log_level);

        let command = self.command.unwrap_or(Commands::Serve {
            host: None,
            port: None,
        });

        match command {
            Commands::Serve { host, port } => cmd_serve_impl(config, host, port).await,
            Commands::Rank => cmd_rank_impl(&config),
            Commands::Plan {
                sku,
                qty,
                dest,
                seed,
            } => cmd_plan_impl(&config, PlanRequest::new(sku, qty, dest), seed),
            Commands::Catalog => cmd_catalog_impl(&config),
        }
    }
}

/// Initialize logging implementation
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging_impl(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Catalog named by the config, or the built-in one
fn load_catalog(config: &ServiceConfig) -> AnyhowResult<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog: {:?}", path)),
        None => Ok(Catalog::default()),
    }
}

/// Serve command implementation
async fn cmd_serve_impl(
    mut config: ServiceConfig,
    host: Option<String>,
    port: Option<u16>,
) -> AnyhowResult<()> {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    info!(
        host = %config.host,
        port = config.port,
        strict = config.strict_validation,
        "Starting ai-service"
    );

    let server = AiServiceServer::new(config).context("Failed to create server")?;

    eprintln!("\nBlue Ship Sync AI Service\n");
    eprintln!("Server starting on {}\n", server.server_url());
    eprintln!("Available endpoints:");
    eprintln!("  POST /rank      - Ranked recommendations");
    eprintln!("  POST /plan_jit  - JIT transfer plan");
    eprintln!("  GET  /health    - Health check");
    eprintln!("\nPress Ctrl+C to stop the server\n");

    server.start().await.context("Server error")?;

    Ok(())
}

/// Rank command implementation
fn cmd_rank_impl(config: &ServiceConfig) -> AnyhowResult<()> {
    let catalog = load_catalog(config)?;
    let ranked = scorer::rank(&catalog, &RankRequest::default());
    println!(
        "{}",
        serde_json::to_string_pretty(&ranked).context("Failed to serialize ranking")?
    );
    Ok(())
}

/// Plan command implementation
fn cmd_plan_impl(
    config: &ServiceConfig,
    request: PlanRequest,
    seed: Option<u64>,
) -> AnyhowResult<()> {
    let catalog = load_catalog(config)?;

    if config.strict_validation {
        ledecision::validate_plan_request(&catalog, &request)
            .context("Plan request rejected")?;
    }

    let mut rng = match seed.or(config.rng_seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plan = planner::plan_jit(&catalog, &request, Utc::now(), &mut rng)
        .context("Planning failed")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?
    );
    Ok(())
}

/// Catalog command implementation
fn cmd_catalog_impl(config: &ServiceConfig) -> AnyhowResult<()> {
    let catalog = load_catalog(config)?;
    print!("{}", catalog.to_toml_string().context("Failed to render catalog")?);
    Ok(())
}
