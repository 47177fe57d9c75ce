//! Core types shared across all zonesync crates
//!
//! A zonesync run starts from a declaration document (see [`document::Root`])
//! that lists the domains to publish, their records and the SOA settings of
//! each zone. This crate owns everything that does not talk to a backend:
//!
//! - **Document model**: the parsed declaration
//! - **Content resolution**: turning `raw`, `file` and `round-robin` content
//!   declarations into literal record values
//! - **SOA synthesis**: building SOA record content with default timings
//! - **Validation**: read-only checks used before touching a live target
//! - **Configuration**: the mapper configuration file

pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod record_type;
pub mod soa;
pub mod validation;

// Re-export commonly used types
pub use config::{DatabaseConfig, DatabaseDriver, MapperConfig};
pub use document::{ContentKind, Domain, Record, RecordContent, Root, RoundRobin, RoundRobins};
pub use error::{ErrorKind, SyncError, SyncResult};
pub use record_type::RecordType;
pub use soa::SoaRecord;
pub use validation::{ValidationReport, ValidationWarning, Validator, MAX_PRIORITY, MAX_TTL};

// Re-export external dependencies
pub use indexmap;
pub use tracing;
