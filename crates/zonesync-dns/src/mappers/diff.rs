//! Diff reconciliation against a remote DNS API
//!
//! The remote record list is compared with the declaration by
//! (name, type, data). Remote records missing from the declaration are
//! deleted; every declared record is submitted for creation, including those
//! that already exist. Deletions and creations go out as one change set per
//! zone.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info};
use zonesync_core::{Domain, RecordType, Root, SyncError};

use super::{validate_root, MapReport, Mapper, MapperKind, DEFAULT_TTL};
use crate::providers::{ChangeSet, RemoteRecord, RemoteZone, ScalewayApi, ZoneApi};

/// Identity of a record when comparing desired and existing state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub name: String,
    pub record_type: String,
    pub data: String,
}

impl From<&RemoteRecord> for RecordKey {
    fn from(record: &RemoteRecord) -> Self {
        Self {
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            data: record.data.clone(),
        }
    }
}

/// Desired records of a zone, deduplicated by [`RecordKey`], first one wins
#[derive(Debug, Clone, Default)]
pub struct DesiredRecords {
    records: IndexMap<RecordKey, RemoteRecord>,
}

impl DesiredRecords {
    pub fn insert(&mut self, record: RemoteRecord) {
        self.records
            .entry(RecordKey::from(&record))
            .or_insert(record);
    }

    pub fn contains(&self, key: &RecordKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteRecord> {
        self.records.values()
    }
}

/// Strip the zone apex from a fully qualified name: "www.example.com" -> "www"
pub fn relative_name(name: &str, domain: &str) -> String {
    let name = name.strip_suffix(domain).unwrap_or(name);
    name.strip_suffix('.').unwrap_or(name).to_string()
}

/// Make hostname targets absolute so the backend does not append the zone
pub fn qualify_data(record_type: RecordType, data: &str) -> String {
    if record_type.targets_hostname() && !data.ends_with('.') {
        format!("{}.", data)
    } else {
        data.to_string()
    }
}

/// Deletions for every existing record not desired, additions for every desired one
pub fn compute_change_set(existing: &[RemoteRecord], desired: &DesiredRecords) -> ChangeSet {
    let deletions = existing
        .iter()
        .filter(|record| !desired.contains(&RecordKey::from(*record)))
        .filter_map(|record| record.id.clone())
        .collect();

    ChangeSet {
        deletions,
        additions: desired.iter().cloned().collect(),
    }
}

/// Reconciles declared domains against the Scaleway DNS API
pub struct ScalewayMapper<A: ZoneApi = ScalewayApi> {
    api: A,
}

impl<A: ZoneApi> ScalewayMapper<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    async fn get_or_create_zone(&self, domain_name: &str) -> Result<RemoteZone, SyncError> {
        debug!("Retrieving existing DNS zones for {}", domain_name);
        let mut zones = self.api.list_zones(domain_name).await?;

        match zones.len() {
            0 => {
                info!("No zone found for {}, requesting creation", domain_name);
                self.api.create_zone(domain_name).await
            }
            1 => Ok(zones.remove(0)),
            count => Err(SyncError::Backend(format!(
                "More than one zone detected for {} ({} found). This is not supported.",
                domain_name, count
            ))),
        }
    }

    fn desired_records(
        &self,
        directory: &Path,
        root: &Root,
        domain_name: &str,
        domain: &Domain,
    ) -> Result<DesiredRecords, SyncError> {
        let mut desired = DesiredRecords::default();

        for record in &domain.records {
            let record_type = RecordType::from_str(&record.record_type)?;
            let ttl = if record.ttl == 0 { DEFAULT_TTL } else { record.ttl };
            let priority = if record_type.uses_priority() {
                record.priority
            } else {
                0
            };

            for value in record.content.resolve_values(directory, &root.round_robins)? {
                debug!(
                    "Ensuring presence of {} record {} \"{}\"",
                    record.record_type, record.name, value
                );
                desired.insert(RemoteRecord {
                    id: None,
                    name: relative_name(&record.name, domain_name),
                    record_type: record_type.to_string(),
                    data: qualify_data(record_type, &value),
                    ttl,
                    priority,
                });
            }
        }

        Ok(desired)
    }
}

#[async_trait]
impl<A: ZoneApi> Mapper for ScalewayMapper<A> {
    fn kind(&self) -> MapperKind {
        MapperKind::Scaleway
    }

    async fn map(&self, directory: &Path, root: &Root) -> Result<MapReport, SyncError> {
        let mut report = validate_root(directory, root)?;

        for (domain_name, domain) in &root.domains {
            let zone = self.get_or_create_zone(domain_name).await?;

            debug!("Retrieving existing records for zone {}", zone.dns_zone());
            let existing = self.api.list_records(&zone).await?;

            let desired = self.desired_records(directory, root, domain_name, domain)?;
            let changes = compute_change_set(&existing, &desired);

            if changes.is_empty() {
                info!("Nothing to change for {}", domain_name);
            } else {
                self.api.submit_changes(&zone, &changes).await?;
                info!(
                    "Synchronized {}: {} records submitted, {} deleted",
                    domain_name,
                    changes.additions.len(),
                    changes.deletions.len()
                );
            }

            report.domains_synced += 1;
            report.records_created += changes.additions.len();
            report.records_deleted += changes.deletions.len();
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use zonesync_core::ErrorKind;

    /// In-memory ZoneApi recording every call
    #[derive(Default)]
    struct FakeApi {
        zones: Mutex<Vec<RemoteZone>>,
        records: Vec<RemoteRecord>,
        created: Mutex<Vec<String>>,
        submitted: Mutex<Vec<ChangeSet>>,
    }

    impl FakeApi {
        fn with_zones(zones: Vec<RemoteZone>, records: Vec<RemoteRecord>) -> Self {
            Self {
                zones: Mutex::new(zones),
                records,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ZoneApi for FakeApi {
        async fn list_zones(&self, domain: &str) -> Result<Vec<RemoteZone>, SyncError> {
            Ok(self
                .zones
                .lock()
                .unwrap()
                .iter()
                .filter(|zone| zone.domain == domain)
                .cloned()
                .collect())
        }

        async fn create_zone(&self, domain: &str) -> Result<RemoteZone, SyncError> {
            self.created.lock().unwrap().push(domain.to_string());
            let zone = zone(domain);
            self.zones.lock().unwrap().push(zone.clone());
            Ok(zone)
        }

        async fn list_records(&self, _zone: &RemoteZone) -> Result<Vec<RemoteRecord>, SyncError> {
            Ok(self.records.clone())
        }

        async fn submit_changes(
            &self,
            _zone: &RemoteZone,
            changes: &ChangeSet,
        ) -> Result<(), SyncError> {
            self.submitted.lock().unwrap().push(changes.clone());
            Ok(())
        }
    }

    fn zone(domain: &str) -> RemoteZone {
        RemoteZone {
            domain: domain.to_string(),
            subdomain: String::new(),
            status: "active".to_string(),
        }
    }

    fn remote(id: &str, name: &str, record_type: &str, data: &str) -> RemoteRecord {
        RemoteRecord {
            id: Some(id.to_string()),
            name: name.to_string(),
            record_type: record_type.to_string(),
            data: data.to_string(),
            ttl: 3600,
            priority: 0,
        }
    }

    fn keys(records: &[RemoteRecord]) -> Vec<(String, String, String)> {
        records
            .iter()
            .map(|r| (r.name.clone(), r.record_type.clone(), r.data.clone()))
            .collect()
    }

    const DECLARATION: &str = r#"
domains:
  example.com:
    records:
      - type: A
        name: www.example.com
        content: { type: raw, value: 1.2.3.4 }
      - type: MX
        name: mail.example.com
        priority: 10
        content: { type: raw, value: mx1. }
"#;

    #[test]
    fn test_relative_name() {
        assert_eq!(relative_name("www.example.com", "example.com"), "www");
        assert_eq!(relative_name("a.b.example.com", "example.com"), "a.b");
        assert_eq!(relative_name("example.com", "example.com"), "");
    }

    #[test]
    fn test_qualify_data() {
        assert_eq!(qualify_data(RecordType::CNAME, "target.example.net"), "target.example.net.");
        assert_eq!(qualify_data(RecordType::MX, "mx1."), "mx1.");
        assert_eq!(qualify_data(RecordType::A, "192.0.2.1"), "192.0.2.1");
        assert_eq!(qualify_data(RecordType::TXT, "v=spf1 -all"), "v=spf1 -all");
    }

    #[test]
    fn test_desired_records_are_deduplicated() {
        let mut desired = DesiredRecords::default();
        let mut first = remote("x", "www", "A", "192.0.2.1");
        first.id = None;
        let mut duplicate = first.clone();
        duplicate.ttl = 60;

        desired.insert(first.clone());
        desired.insert(duplicate);

        assert_eq!(desired.len(), 1);
        assert_eq!(desired.iter().next().unwrap().ttl, first.ttl);
    }

    #[tokio::test]
    async fn test_adds_missing_record_without_deleting() {
        let api = FakeApi::with_zones(
            vec![zone("example.com")],
            vec![remote("rec-1", "www", "A", "1.2.3.4")],
        );
        let mapper = ScalewayMapper::new(api);

        let report = mapper.map_yaml(Path::new("."), DECLARATION).await.unwrap();

        let submitted = mapper.api().submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert!(submitted[0].deletions.is_empty());
        assert_eq!(
            keys(&submitted[0].additions),
            vec![
                ("www".to_string(), "A".to_string(), "1.2.3.4".to_string()),
                ("mail".to_string(), "MX".to_string(), "mx1.".to_string()),
            ]
        );
        assert_eq!(submitted[0].additions[1].priority, 10);
        assert_eq!(submitted[0].additions[0].ttl, DEFAULT_TTL);
        assert_eq!(report.records_deleted, 0);
    }

    #[tokio::test]
    async fn test_stale_records_are_deleted() {
        let api = FakeApi::with_zones(
            vec![zone("example.com")],
            vec![
                remote("rec-1", "www", "A", "1.2.3.4"),
                remote("rec-2", "old", "A", "192.0.2.99"),
                remote("rec-3", "www", "A", "5.6.7.8"),
            ],
        );
        let mapper = ScalewayMapper::new(api);

        let report = mapper.map_yaml(Path::new("."), DECLARATION).await.unwrap();

        let submitted = mapper.api().submitted.lock().unwrap();
        assert_eq!(submitted[0].deletions, vec!["rec-2", "rec-3"]);
        assert_eq!(report.records_deleted, 2);
    }

    #[tokio::test]
    async fn test_missing_zone_is_created() {
        let mapper = ScalewayMapper::new(FakeApi::default());

        mapper.map_yaml(Path::new("."), DECLARATION).await.unwrap();

        assert_eq!(*mapper.api().created.lock().unwrap(), vec!["example.com"]);
        assert_eq!(mapper.api().submitted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ambiguous_zone_is_backend_error() {
        let api = FakeApi::with_zones(vec![zone("example.com"), zone("example.com")], vec![]);
        let mapper = ScalewayMapper::new(api);

        let err = mapper
            .map_yaml(Path::new("."), DECLARATION)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Backend);
        assert!(mapper.api().submitted.lock().unwrap().is_empty());
        assert!(mapper.api().created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_robin_fan_out_and_dedup() {
        let declaration = r#"
domains:
  example.com:
    records:
      - type: A
        name: example.com
        ttl: 300
        content: { type: round-robin, value: web }
      - type: A
        name: example.com
        content: { type: raw, value: 192.0.2.1 }
      - type: CNAME
        name: www.example.com
        content: { type: raw, value: example.com }
round_robins:
  web: [192.0.2.1, 192.0.2.2, 192.0.2.1]
"#;
        let mapper = ScalewayMapper::new(FakeApi::with_zones(vec![zone("example.com")], vec![]));

        mapper.map_yaml(Path::new("."), declaration).await.unwrap();

        let submitted = mapper.api().submitted.lock().unwrap();
        assert_eq!(
            keys(&submitted[0].additions),
            vec![
                ("".to_string(), "A".to_string(), "192.0.2.1".to_string()),
                ("".to_string(), "A".to_string(), "192.0.2.2".to_string()),
                ("www".to_string(), "CNAME".to_string(), "example.com.".to_string()),
            ]
        );
        assert_eq!(submitted[0].additions[0].ttl, 300);
    }

    #[tokio::test]
    async fn test_priority_only_for_mx_and_srv() {
        let declaration = r#"
domains:
  example.com:
    records:
      - type: TXT
        name: example.com
        priority: 5
        content: { type: raw, value: hello }
"#;
        let mapper = ScalewayMapper::new(FakeApi::with_zones(vec![zone("example.com")], vec![]));

        mapper.map_yaml(Path::new("."), declaration).await.unwrap();

        let submitted = mapper.api().submitted.lock().unwrap();
        assert_eq!(submitted[0].additions[0].priority, 0);
    }

    #[tokio::test]
    async fn test_validation_runs_before_any_call() {
        let declaration = DECLARATION.replace("www.example.com", "www.other.com");
        let mapper = ScalewayMapper::new(FakeApi::with_zones(vec![zone("example.com")], vec![]));

        let err = mapper
            .map_yaml(Path::new("."), &declaration)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(mapper.api().submitted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_compute_change_set_skips_records_without_id() {
        let mut unsaved = remote("x", "old", "A", "192.0.2.9");
        unsaved.id = None;

        let changes = compute_change_set(&[unsaved], &DesiredRecords::default());
        assert!(changes.is_empty());
    }
}
