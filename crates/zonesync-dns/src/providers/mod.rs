//! Backend gateways
//!
//! This module contains the gateway traits consumed by the mappers and their
//! implementations for PowerDNS (relational store) and Scaleway (remote API).

pub mod credentials;
pub mod powerdns;
pub mod scaleway;
pub mod traits;

// Re-export commonly used types
pub use credentials::ScalewayCredentials;
pub use powerdns::PowerDnsStore;
pub use scaleway::ScalewayApi;
pub use traits::{
    ChangeSet, RecordStore, RemoteRecord, RemoteZone, StoredRecord, StoredZone, ZoneApi,
};
