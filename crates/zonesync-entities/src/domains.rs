//! PowerDNS domains entity
//!
//! One row per zone served by PowerDNS. zonesync creates rows with type
//! `MASTER` and never updates or deletes them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Zone type written for zones created by zonesync
pub const KIND_MASTER: &str = "MASTER";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "domains")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Zone apex, e.g. "example.com"
    #[sea_orm(unique)]
    pub name: String,

    /// Primary server(s) for SLAVE zones
    pub master: Option<String>,

    pub last_check: Option<i32>,

    /// NATIVE, MASTER or SLAVE
    #[sea_orm(column_name = "type")]
    pub kind: String,

    pub notified_serial: Option<i64>,

    pub account: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::records::Entity")]
    Records,
}

impl Related<super::records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
