//! Declaration document model
//!
//! The declaration is parsed fresh on every run; none of these types carry a
//! persisted identity. Backend zones are looked up by domain name instead.
//!
//! ```yaml
//! domains:
//!   example.com:
//!     soa:
//!       primary: ns1.example.com
//!       hostmaster: hostmaster@example.com
//!     records:
//!       - type: A
//!         name: www.example.com
//!         content: { type: round-robin, value: web }
//! round_robins:
//!   web: [192.0.2.1, 192.0.2.2]
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::SyncError;
use crate::soa::SoaRecord;

/// A named, ordered list of values one declared record expands into
pub type RoundRobin = Vec<String>;

/// Round robins by name
pub type RoundRobins = HashMap<String, RoundRobin>;

/// Root of a declaration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Root {
    /// Domains by name, kept in document order
    #[serde(default)]
    pub domains: IndexMap<String, Domain>,

    #[serde(default)]
    pub round_robins: RoundRobins,
}

impl Root {
    pub fn from_yaml(yaml: &str) -> Result<Self, SyncError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a declaration file
    pub fn from_path(path: &Path) -> Result<Self, SyncError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }
}

/// A declared zone: its records and SOA settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default)]
    pub records: Vec<Record>,

    #[serde(default, rename = "soa")]
    pub soa_record: SoaRecord,
}

/// A declared record
///
/// The type is kept as written so that an unsupported value can be reported
/// verbatim; see [`crate::RecordType::from_str`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub record_type: String,

    /// Fully qualified name; must end with the owning domain's name
    pub name: String,

    pub content: RecordContent,

    /// Only meaningful for MX and SRV
    #[serde(default)]
    pub priority: u32,

    /// 0 means "use the backend default"
    #[serde(default)]
    pub ttl: u32,
}

/// How a record's value is obtained
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordContent {
    #[serde(rename = "type")]
    pub kind: ContentKind,

    pub value: String,
}

impl RecordContent {
    pub fn raw(value: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Raw,
            value: value.into(),
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::File,
            value: path.into(),
        }
    }

    pub fn round_robin(name: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::RoundRobin,
            value: name.into(),
        }
    }
}

/// Content source kind
///
/// Unknown kinds are preserved so resolution can reject them by name instead
/// of failing the whole document parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentKind {
    Raw,
    File,
    RoundRobin,
    Unknown(String),
}

impl From<String> for ContentKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "raw" => ContentKind::Raw,
            "file" => ContentKind::File,
            "round-robin" => ContentKind::RoundRobin,
            _ => ContentKind::Unknown(s),
        }
    }
}

impl From<ContentKind> for String {
    fn from(kind: ContentKind) -> Self {
        kind.to_string()
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Raw => write!(f, "raw"),
            ContentKind::File => write!(f, "file"),
            ContentKind::RoundRobin => write!(f, "round-robin"),
            ContentKind::Unknown(s) => write!(f, "{}", s),
        }
    }
}
