use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info};
use zonesync_core::MapperConfig;
use zonesync_dns::PowerDnsStore;
use zonesync_migrations::{Migrator, MigratorTrait};

#[derive(Args)]
pub struct MigrateCommand {
    /// Mapper configuration file with the database settings
    #[arg(long, short, env = "ZONESYNC_CONFIG")]
    pub config: PathBuf,
}

impl MigrateCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        info!("Running PowerDNS schema migrations");

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())?;

        println!("{}", "✅ PowerDNS schema is up to date".bright_green());

        Ok(())
    }

    pub(crate) async fn run(&self) -> anyhow::Result<()> {
        let config = MapperConfig::from_path(&self.config)?;
        let store = PowerDnsStore::connect(&config.database.connection_url()).await?;

        debug!("Applying pending migrations");
        let result = Migrator::up(store.connection(), None).await;
        store.close().await?;
        result?;

        Ok(())
    }
}
