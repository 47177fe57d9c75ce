//! sea-orm entities for the PowerDNS generic SQL schema
//!
//! Only the columns zonesync reads or writes are modelled; the tables are
//! owned by PowerDNS.

pub mod domains;
pub mod records;

pub mod prelude;
