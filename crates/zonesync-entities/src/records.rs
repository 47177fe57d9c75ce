//! PowerDNS records entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub domain_id: Option<i32>,

    /// Fully qualified owner name, without trailing dot
    pub name: Option<String>,

    #[sea_orm(column_name = "type")]
    pub record_type: Option<String>,

    pub content: Option<String>,

    pub ttl: Option<i32>,

    pub prio: Option<i32>,

    pub disabled: bool,

    pub ordername: Option<String>,

    pub auth: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::domains::Entity",
        from = "Column::DomainId",
        to = "super::domains::Column::Id",
        on_delete = "Cascade"
    )]
    Domain,
}

impl Related<super::domains::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Domain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
