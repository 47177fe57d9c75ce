use anyhow::Context;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info};
use zonesync_core::MapperConfig;
use zonesync_dns::{
    DryMapper, MapReport, Mapper, MapperKind, PdnsMapper, PowerDnsStore, ScalewayApi,
    ScalewayCredentials, ScalewayMapper,
};

#[derive(Args)]
pub struct SyncCommand {
    /// Mapper to use: pdns, scaleway or dry
    #[arg(long, short, default_value = "scaleway")]
    pub mapper: String,

    /// Mapper configuration file (database settings, required by pdns)
    #[arg(long, short, env = "ZONESYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// DNS declaration (YAML)
    pub definition: PathBuf,
}

impl SyncCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let kind = MapperKind::from_str(&self.mapper)?;
        info!(
            "Synchronizing {} with the {} mapper",
            self.definition.display(),
            kind
        );

        let rt = tokio::runtime::Runtime::new()?;
        let report = rt.block_on(self.run(kind))?;

        print_report(kind, &report);

        Ok(())
    }

    async fn run(&self, kind: MapperKind) -> anyhow::Result<MapReport> {
        if kind.requires_config() && self.config.is_none() {
            anyhow::bail!("The {} mapper requires --config", kind);
        }

        match kind {
            MapperKind::Dry => Ok(DryMapper::new().map_path(&self.definition).await?),
            MapperKind::PowerDns => {
                let config_path = self.config.as_deref().context("Missing --config")?;
                let config = MapperConfig::from_path(config_path)?;

                debug!("Connecting to PowerDNS database");
                let store = PowerDnsStore::connect(&config.database.connection_url()).await?;
                let mapper = PdnsMapper::new(store);

                let result = mapper.map_path(&self.definition).await;
                mapper.close().await?;
                Ok(result?)
            }
            MapperKind::Scaleway => {
                let credentials = ScalewayCredentials::from_env(|key| std::env::var(key).ok())?;
                let mapper = ScalewayMapper::new(ScalewayApi::new(credentials)?);
                Ok(mapper.map_path(&self.definition).await?)
            }
        }
    }
}

pub(crate) fn print_warnings(report: &MapReport) {
    for warning in &report.warnings {
        println!("{} {}", "⚠".bright_yellow(), warning.to_string().yellow());
    }
}

fn print_report(kind: MapperKind, report: &MapReport) {
    print_warnings(report);

    if kind == MapperKind::Dry {
        println!("{}", "✅ Declaration is valid".bright_green());
        return;
    }

    println!(
        "{} {} domain(s) synchronized: {} record(s) written, {} removed",
        "✅".bright_green(),
        report.domains_synced.to_string().bright_white().bold(),
        report.records_created.to_string().bright_cyan(),
        report.records_deleted.to_string().bright_cyan()
    );
}
