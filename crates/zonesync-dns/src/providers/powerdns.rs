//! PowerDNS relational store
//!
//! Talks to the PowerDNS generic SQL schema (`domains` and `records` tables)
//! through sea-orm. MySQL, PostgreSQL and SQLite URLs are accepted.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, QuerySelect,
};
use tracing::{debug, info};
use zonesync_core::SyncError;
use zonesync_entities::{domains, records};

use super::traits::{RecordStore, StoredRecord, StoredZone};

/// PowerDNS database gateway
pub struct PowerDnsStore {
    db: DatabaseConnection,
}

impl PowerDnsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open a connection pool for `database_url`
    pub async fn connect(database_url: &str) -> Result<Self, SyncError> {
        let mut opt = ConnectOptions::new(database_url);
        opt.max_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| SyncError::backend("Failed to connect to PowerDNS database", e))?;

        debug!("Connected to PowerDNS database");

        Ok(Self::new(db))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the connection pool
    pub async fn close(self) -> Result<(), SyncError> {
        self.db
            .close()
            .await
            .map_err(|e| SyncError::backend("Failed to close PowerDNS database", e))
    }
}

impl From<domains::Model> for StoredZone {
    fn from(model: domains::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: model.kind,
        }
    }
}

#[async_trait]
impl RecordStore for PowerDnsStore {
    async fn find_zone(&self, name: &str) -> Result<Option<StoredZone>, SyncError> {
        let zone = domains::Entity::find()
            .filter(domains::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| SyncError::backend("Failed to look up zone", e))?;

        Ok(zone.map(StoredZone::from))
    }

    async fn create_zone(&self, name: &str) -> Result<StoredZone, SyncError> {
        let zone = domains::ActiveModel {
            name: Set(name.to_string()),
            kind: Set(domains::KIND_MASTER.to_string()),
            ..Default::default()
        };

        let result = domains::Entity::insert(zone)
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::backend("Failed to create zone", e))?;

        info!("Created zone {} with id: {}", name, result.last_insert_id);

        Ok(StoredZone {
            id: result.last_insert_id,
            name: name.to_string(),
            kind: domains::KIND_MASTER.to_string(),
        })
    }

    async fn list_record_ids(&self, zone_id: i32) -> Result<Vec<i64>, SyncError> {
        records::Entity::find()
            .select_only()
            .column(records::Column::Id)
            .filter(records::Column::DomainId.eq(zone_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| SyncError::backend("Failed to list records", e))
    }

    async fn insert_record(&self, record: &StoredRecord) -> Result<(), SyncError> {
        let model = records::ActiveModel {
            domain_id: Set(Some(record.zone_id)),
            name: Set(Some(record.name.clone())),
            record_type: Set(Some(record.record_type.clone())),
            content: Set(Some(record.content.clone())),
            ttl: Set(Some(to_column(record.ttl, "ttl")?)),
            prio: Set(Some(to_column(record.priority, "priority")?)),
            disabled: Set(false),
            auth: Set(true),
            ..Default::default()
        };

        records::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::backend("Failed to insert record", e))?;

        Ok(())
    }

    async fn delete_record(&self, id: i64) -> Result<(), SyncError> {
        records::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::backend("Failed to delete record", e))?;

        Ok(())
    }
}

fn to_column(value: u32, field: &str) -> Result<i32, SyncError> {
    i32::try_from(value)
        .map_err(|_| SyncError::Validation(format!("{} {} is out of range", field, value)))
}
