//! Full-replace reconciliation against a relational store
//!
//! Every run writes the complete desired record set of a zone, then removes
//! the rows that existed before the run. Inserts come first so the zone is
//! never empty; an interrupted run leaves duplicates rather than a gap. No
//! transaction spans the two phases.

use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};
use zonesync_core::{Domain, Root, SyncError};

use super::{validate_root, MapReport, Mapper, MapperKind, DEFAULT_TTL};
use crate::providers::{PowerDnsStore, RecordStore, StoredRecord, StoredZone};

const SOA_TYPE: &str = "SOA";

/// Reconciles declared domains into a PowerDNS-style record store
pub struct PdnsMapper<S: RecordStore = PowerDnsStore> {
    store: S,
}

impl<S: RecordStore> PdnsMapper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look the zone up, creating it on a miss; the lookup is retried once
    async fn get_or_create_zone(&self, name: &str) -> Result<StoredZone, SyncError> {
        if let Some(zone) = self.store.find_zone(name).await? {
            return Ok(zone);
        }

        info!("Zone {} does not exist, creating it", name);
        self.store.create_zone(name).await?;

        self.store.find_zone(name).await?.ok_or_else(|| {
            SyncError::Backend(format!("Zone {} not found after creating it", name))
        })
    }

    /// SOA record first, then one row per resolved value of every record
    fn desired_records(
        &self,
        directory: &Path,
        root: &Root,
        zone: &StoredZone,
        domain_name: &str,
        domain: &Domain,
    ) -> Result<Vec<StoredRecord>, SyncError> {
        let mut records = vec![StoredRecord {
            zone_id: zone.id,
            record_type: SOA_TYPE.to_string(),
            name: domain_name.to_string(),
            content: domain.soa_record.to_content(),
            priority: 0,
            ttl: DEFAULT_TTL,
        }];

        for record in &domain.records {
            let ttl = if record.ttl == 0 { DEFAULT_TTL } else { record.ttl };

            for value in record.content.resolve_values(directory, &root.round_robins)? {
                records.push(StoredRecord {
                    zone_id: zone.id,
                    record_type: record.record_type.clone(),
                    name: record.name.clone(),
                    content: value,
                    priority: record.priority,
                    ttl,
                });
            }
        }

        Ok(records)
    }

    /// Insert everything, then delete the rows present before this call
    async fn apply_records(
        &self,
        zone: &StoredZone,
        records: &[StoredRecord],
    ) -> Result<(usize, usize), SyncError> {
        let existing_ids = self.store.list_record_ids(zone.id).await?;
        info!(
            "Replacing {} records for zone {}",
            existing_ids.len(),
            zone.name
        );

        for record in records {
            debug!(
                "Inserting {} record {} \"{}\"",
                record.record_type, record.name, record.content
            );
            self.store.insert_record(record).await?;
        }

        for id in &existing_ids {
            self.store.delete_record(*id).await?;
        }

        Ok((records.len(), existing_ids.len()))
    }
}

impl PdnsMapper<PowerDnsStore> {
    /// Release the database connection
    pub async fn close(self) -> Result<(), SyncError> {
        self.store.close().await
    }
}

fn require_soa(domain_name: &str, domain: &Domain) -> Result<(), SyncError> {
    if domain.soa_record.is_complete() {
        return Ok(());
    }

    Err(SyncError::Config(format!(
        "Either one of the required SOA fields hostmaster or primary is not set for {}. \
         See https://doc.powerdns.com/authoritative/appendices/types.html#soa",
        domain_name
    )))
}

#[async_trait]
impl<S: RecordStore> Mapper for PdnsMapper<S> {
    fn kind(&self) -> MapperKind {
        MapperKind::PowerDns
    }

    async fn map(&self, directory: &Path, root: &Root) -> Result<MapReport, SyncError> {
        let mut report = validate_root(directory, root)?;

        for (domain_name, domain) in &root.domains {
            require_soa(domain_name, domain)?;

            let zone = self.get_or_create_zone(domain_name).await?;
            let records = self.desired_records(directory, root, &zone, domain_name, domain)?;
            let (created, deleted) = self.apply_records(&zone, &records).await?;

            debug!(
                "Wrote {} records to {}, removed {}",
                created, domain_name, deleted
            );

            report.domains_synced += 1;
            report.records_created += created;
            report.records_deleted += deleted;
        }

        Ok(report)
    }
}
