//! Reconciliation strategies
//!
//! A mapper takes a parsed declaration and brings one kind of backend in line
//! with it. All mappers validate the whole declaration before the first
//! backend call.

pub mod diff;
pub mod dry;
pub mod full_replace;

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;
use zonesync_core::{Root, SyncError, ValidationWarning, Validator};

pub use diff::ScalewayMapper;
pub use dry::DryMapper;
pub use full_replace::PdnsMapper;

/// TTL of synthesized SOA records and of records declared without a TTL
pub const DEFAULT_TTL: u32 = 86400;

/// Available mappers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperKind {
    /// Validate only, no backend
    Dry,
    /// Full replace against a PowerDNS database
    PowerDns,
    /// Computed diff against the Scaleway DNS API
    Scaleway,
}

impl std::fmt::Display for MapperKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperKind::Dry => write!(f, "dry"),
            MapperKind::PowerDns => write!(f, "pdns"),
            MapperKind::Scaleway => write!(f, "scaleway"),
        }
    }
}

impl MapperKind {
    pub fn from_str(s: &str) -> Result<Self, SyncError> {
        match s.to_lowercase().as_str() {
            "dry" | "validate" => Ok(MapperKind::Dry),
            "pdns" | "powerdns" => Ok(MapperKind::PowerDns),
            "scaleway" | "scw" => Ok(MapperKind::Scaleway),
            _ => Err(SyncError::Config(format!(
                "Unknown mapper \"{}\". Available mappers: dry, pdns, scaleway",
                s
            ))),
        }
    }

    /// Whether this mapper needs the database config file
    pub fn requires_config(&self) -> bool {
        matches!(self, MapperKind::PowerDns)
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapReport {
    pub domains_synced: usize,
    pub records_created: usize,
    pub records_deleted: usize,
    pub warnings: Vec<ValidationWarning>,
}

/// One reconciliation entry point per backend
#[async_trait]
pub trait Mapper: Send + Sync {
    fn kind(&self) -> MapperKind;

    /// Reconcile every domain of `root`, in document order.
    ///
    /// `directory` is the base for relative `file` contents. The first error
    /// aborts the run.
    async fn map(&self, directory: &Path, root: &Root) -> Result<MapReport, SyncError>;

    /// Parse a YAML declaration and map it
    async fn map_yaml(&self, directory: &Path, yaml: &str) -> Result<MapReport, SyncError> {
        let root = Root::from_yaml(yaml)?;
        self.map(directory, &root).await
    }

    /// Read a declaration file and map it, resolving files next to it
    async fn map_path(&self, path: &Path) -> Result<MapReport, SyncError> {
        let root = Root::from_path(path)?;
        let directory = declaration_directory(path);
        debug!("Resolving file contents relative to {}", directory.display());
        self.map(directory, &root).await
    }
}

/// Directory containing a declaration file
pub fn declaration_directory(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Validate the complete declaration up front
pub(crate) fn validate_root(directory: &Path, root: &Root) -> Result<MapReport, SyncError> {
    let validation = Validator::new(directory).validate(root)?;
    Ok(MapReport {
        warnings: validation.warnings,
        ..Default::default()
    })
}
