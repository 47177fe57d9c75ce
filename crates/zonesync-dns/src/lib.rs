//! DNS backends and reconciliation for zonesync
//!
//! This crate turns a parsed declaration into the record set held by a DNS
//! backend.
//!
//! # Mappers
//!
//! - **Dry**: validates the declaration without contacting any backend
//! - **PowerDNS**: full replace against the PowerDNS generic SQL schema. Every
//!   run inserts the complete desired record set, then deletes the records
//!   that existed before the run
//! - **Scaleway**: computes a change set against the records currently held by
//!   the Scaleway DNS API and submits it as one batch per zone
//!
//! # Usage
//!
//! ```ignore
//! use zonesync_dns::{Mapper, PdnsMapper, PowerDnsStore};
//!
//! let store = PowerDnsStore::connect(&config.database.connection_url()).await?;
//! let mapper = PdnsMapper::new(store);
//! let report = mapper.map_path(Path::new("zones.yml")).await?;
//! mapper.close().await?;
//! ```
//!
//! Domains are processed one at a time in document order. The first error
//! aborts the run; domains already reconciled are left as they are.

pub mod mappers;
pub mod providers;

// Re-export main types
pub use mappers::{
    DryMapper, MapReport, Mapper, MapperKind, PdnsMapper, ScalewayMapper, DEFAULT_TTL,
};
pub use providers::{
    ChangeSet, PowerDnsStore, RecordStore, RemoteRecord, RemoteZone, ScalewayApi,
    ScalewayCredentials, StoredRecord, StoredZone, ZoneApi,
};
pub use zonesync_core::{SyncError, SyncResult};
