//! Backend gateway trait definitions
//!
//! The mappers only consume the operations below. Each backend implements
//! exactly one of the two traits: a relational store is rewritten record by
//! record, a remote API receives one batched change set per zone.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zonesync_core::SyncError;

/// A zone row of the relational store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredZone {
    pub id: i32,

    /// Zone apex, e.g. "example.com"
    pub name: String,

    /// NATIVE, MASTER or SLAVE
    pub kind: String,
}

/// A record to insert into the relational store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub zone_id: i32,
    pub record_type: String,

    /// Fully qualified owner name
    pub name: String,

    pub content: String,
    pub priority: u32,
    pub ttl: u32,
}

/// Gateway to a relational authoritative-DNS database
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a zone by its apex name
    async fn find_zone(&self, name: &str) -> Result<Option<StoredZone>, SyncError>;

    /// Create a MASTER zone
    async fn create_zone(&self, name: &str) -> Result<StoredZone, SyncError>;

    /// IDs of every record currently stored for a zone
    async fn list_record_ids(&self, zone_id: i32) -> Result<Vec<i64>, SyncError>;

    async fn insert_record(&self, record: &StoredRecord) -> Result<(), SyncError>;

    async fn delete_record(&self, id: i64) -> Result<(), SyncError>;
}

/// A zone as reported by a remote DNS API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteZone {
    /// Registered domain, e.g. "example.com"
    pub domain: String,

    /// Label below `domain`; empty for the apex zone
    #[serde(default)]
    pub subdomain: String,

    #[serde(default)]
    pub status: String,
}

impl RemoteZone {
    /// Name used to address the zone in API calls
    pub fn dns_zone(&self) -> String {
        if self.subdomain.is_empty() {
            self.domain.clone()
        } else {
            format!("{}.{}", self.subdomain, self.domain)
        }
    }
}

/// A record as held by a remote DNS API
///
/// Names are relative to the zone apex: "www" for "www.example.com", an empty
/// string for the apex itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Backend ID; `None` for records not yet created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(rename = "type")]
    pub record_type: String,

    pub data: String,

    pub ttl: u32,

    #[serde(default)]
    pub priority: u32,
}

/// One batched update of a remote zone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Backend IDs of records to delete
    pub deletions: Vec<String>,

    /// Records to create
    pub additions: Vec<RemoteRecord>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.additions.is_empty()
    }
}

/// Gateway to a managed DNS provider's API
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// Zones registered for a domain; more than one is an ambiguous state
    async fn list_zones(&self, domain: &str) -> Result<Vec<RemoteZone>, SyncError>;

    async fn create_zone(&self, domain: &str) -> Result<RemoteZone, SyncError>;

    async fn list_records(&self, zone: &RemoteZone) -> Result<Vec<RemoteRecord>, SyncError>;

    /// Apply deletions and additions together; partial application is up to the backend
    async fn submit_changes(&self, zone: &RemoteZone, changes: &ChangeSet)
        -> Result<(), SyncError>;
}
