use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;
use zonesync_dns::{DryMapper, Mapper};

use super::sync::print_warnings;

#[derive(Args)]
pub struct CheckCommand {
    /// DNS declaration (YAML)
    pub definition: PathBuf,
}

impl CheckCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        info!("Checking {}", self.definition.display());

        let rt = tokio::runtime::Runtime::new()?;
        let report = rt.block_on(DryMapper::new().map_path(&self.definition))?;

        print_warnings(&report);
        println!(
            "{} {}",
            "✅".bright_green(),
            format!(
                "{} is valid ({} warning(s))",
                self.definition.display(),
                report.warnings.len()
            )
            .bright_white()
        );

        Ok(())
    }
}
