use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

use profile_api::domain::service::ProfileService;
use profile_api::infra::facts::HttpFactClient;
use profile_api::ProfileApiConfig;

/// Profile Server - serves a static profile with a fresh cat fact
#[derive(Parser)]
#[command(name = "profile-server")]
#[command(about = "Profile Server - serves a static profile with a fresh cat fact")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Figment silently skips missing YAML files; an explicitly requested
    // config file that does not exist must be a hard error instead.
    if let Some(path) = &cli.config {
        if !path.is_file() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }
    }

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Profile Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Resolve the wired-up pieces from config: module section, fact client,
/// service and bind address. Shared by `run` and `check`.
fn prepare(config: &AppConfig) -> Result<(ProfileApiConfig, Arc<ProfileService>, SocketAddr)> {
    let module_cfg = ProfileApiConfig::from_modules_bag(&config.modules)?;

    let facts_url = Url::parse(&module_cfg.facts.url)
        .map_err(|e| anyhow!("Invalid facts URL '{}': {}", module_cfg.facts.url, e))?;
    let facts = HttpFactClient::new(facts_url, module_cfg.facts.timeout)?;

    let service = Arc::new(ProfileService::new(
        module_cfg.identity.clone().into(),
        Arc::new(facts),
    ));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            anyhow!(
                "Invalid bind address '{}:{}': {}",
                config.server.host,
                config.server.port,
                e
            )
        })?;

    Ok((module_cfg, service, addr))
}

async fn run_server(config: AppConfig) -> Result<()> {
    let (module_cfg, service, addr) = prepare(&config)?;

    let router = profile_api::build_router(service, &module_cfg);

    // Cancel the server when a shutdown signal arrives
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = runtime::wait_for_shutdown().await {
                tracing::error!("Shutdown signal handling failed: {e}");
            }
            cancel.cancel();
        });
    }

    profile_api::serve(addr, router, cancel).await
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // Validates the module section, facts URL and bind address without
    // starting anything.
    let _ = prepare(&config)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
