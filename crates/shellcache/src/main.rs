//! shellcache - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `shellcache check` | Print the effective configuration |
//! | `shellcache build <tenant>` | Build a tenant's session factory and report it |

use clap::{Parser, Subcommand};
use shellcache::domain::ports::SessionFactoryHolderInterface;
use shellcache::domain::value_objects::{ShellBlueprint, ShellSettings};
use shellcache::infrastructure::config::ConfigLoader;
use shellcache::infrastructure::logging::init_logging;
use shellcache::infrastructure::{ErrorContext, TimedOperation};
use std::path::PathBuf;
use tracing::info;

/// Command line interface for shellcache
#[derive(Parser, Debug)]
#[command(name = "shellcache")]
#[command(about = "Per-tenant resource cache and typed settings host")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load and validate the configuration, then print it as JSON
    Check,

    /// Build the session factory of a tenant shell
    Build {
        /// Tenant name
        tenant: String,

        /// Data provider name
        #[arg(short, long, default_value = "memory")]
        provider: String,

        /// Data connection string
        #[arg(long)]
        connection_string: Option<String>,

        /// JSON file describing the tenant's records
        #[arg(short, long)]
        blueprint: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;

    match cli.command {
        Command::Check => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Build {
            tenant,
            provider,
            connection_string,
            blueprint,
        } => {
            init_logging(&config.logging)?;
            let blueprint = match blueprint {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .io_context(format!("Failed to read blueprint {}", path.display()))?;
                    serde_json::from_str::<ShellBlueprint>(&content)?
                }
                None => ShellBlueprint::default(),
            };
            let mut shell = ShellSettings::new(&tenant, &provider);
            if let Some(connection_string) = connection_string {
                shell = shell.with_connection_string(connection_string);
            }

            let context = shellcache::init_app(config).await?;
            let holder = context.shell(shell, blueprint).await?;

            let timer = TimedOperation::start(format!("{}/session-factory", tenant));
            let factory = timer.finish(holder.get_session_factory().await)?;
            info!(tenant = %tenant, "Session factory ready");

            println!("tenant:   {}", tenant);
            println!("provider: {}", factory.provider_name());
            for entity in factory.entity_names() {
                println!("entity:   {}", entity);
            }
            context.shutdown();
        }
    }
    Ok(())
}
