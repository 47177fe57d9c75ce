//! Supported DNS record types

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Record types a declaration may use
///
/// SOA is deliberately absent: SOA content is synthesized from the domain's
/// `soa` block and never declared as a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    MX,
    CNAME,
    A,
    AAAA,
    DNAME,
    TXT,
    SRV,
    PTR,
    NS,
    ALIAS,
    NAPTR,
    TLSA,
}

impl RecordType {
    pub const ALL: [RecordType; 12] = [
        RecordType::MX,
        RecordType::CNAME,
        RecordType::A,
        RecordType::AAAA,
        RecordType::DNAME,
        RecordType::TXT,
        RecordType::SRV,
        RecordType::PTR,
        RecordType::NS,
        RecordType::ALIAS,
        RecordType::NAPTR,
        RecordType::TLSA,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::MX => "MX",
            RecordType::CNAME => "CNAME",
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::DNAME => "DNAME",
            RecordType::TXT => "TXT",
            RecordType::SRV => "SRV",
            RecordType::PTR => "PTR",
            RecordType::NS => "NS",
            RecordType::ALIAS => "ALIAS",
            RecordType::NAPTR => "NAPTR",
            RecordType::TLSA => "TLSA",
        }
    }

    /// Parse a declared type. Matching is exact: "mx" is not "MX".
    pub fn from_str(s: &str) -> Result<Self, SyncError> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SyncError::Validation(format!("Invalid record type \"{}\"", s)))
    }

    pub fn is_supported(s: &str) -> bool {
        Self::from_str(s).is_ok()
    }

    /// Whether the record data is a host name that must be sent fully qualified
    pub fn targets_hostname(&self) -> bool {
        matches!(
            self,
            RecordType::CNAME
                | RecordType::DNAME
                | RecordType::ALIAS
                | RecordType::NS
                | RecordType::MX
                | RecordType::PTR
        )
    }

    /// Whether the declared priority is meaningful for this type
    pub fn uses_priority(&self) -> bool {
        matches!(self, RecordType::MX | RecordType::SRV)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
