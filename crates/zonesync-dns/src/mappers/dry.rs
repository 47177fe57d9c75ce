//! Validate-only mapper

use async_trait::async_trait;
use std::path::Path;
use tracing::info;
use zonesync_core::{Root, SyncError};

use super::{validate_root, MapReport, Mapper, MapperKind};

/// Checks a declaration without contacting any backend
#[derive(Debug, Clone, Copy, Default)]
pub struct DryMapper;

impl DryMapper {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mapper for DryMapper {
    fn kind(&self) -> MapperKind {
        MapperKind::Dry
    }

    async fn map(&self, directory: &Path, root: &Root) -> Result<MapReport, SyncError> {
        let report = validate_root(directory, root)?;

        info!(
            "Declaration is valid: {} domain(s), {} warning(s)",
            root.domains.len(),
            report.warnings.len()
        );

        Ok(report)
    }
}
