//! Schema bootstrap for the PowerDNS generic SQL backend
//!
//! PowerDNS normally ships its own schema. These migrations create an
//! equivalent `domains`/`records` pair for fresh databases and tests.

pub use sea_orm_migration::prelude::*;

mod migration;
pub use migration::Migrator;
