//! Zonesync CLI
//!
//! Applies a YAML zone declaration to PowerDNS or Scaleway, or only checks it.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CheckCommand, MigrateCommand, SyncCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "ZONESYNC_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "ZONESYNC_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a declaration to a DNS backend
    Sync(SyncCommand),
    /// Validate a declaration without touching any backend
    Check(CheckCommand),
    /// Create the PowerDNS tables in an empty database
    Migrate(MigrateCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = cli.log_level.clone();

    // RUST_LOG takes full control when set
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()?
    } else {
        tracing_subscriber::EnvFilter::try_new(format!(
            "zonesync={level},\
             zonesync_core={level},\
             zonesync_dns={level},\
             zonesync_entities={level},\
             zonesync_migrations={level},\
             sea_orm_migration={level},\
             sqlx=warn,\
             sea_orm=warn,\
             hyper=warn,\
             reqwest=warn,\
             rustls=warn",
            level = log_level
        ))?
    };

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Sync(sync_cmd) => sync_cmd.execute(),
        Commands::Check(check_cmd) => check_cmd.execute(),
        Commands::Migrate(migrate_cmd) => migrate_cmd.execute(),
    }
}
