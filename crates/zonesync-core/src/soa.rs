//! SOA record settings and content synthesis

use serde::{Deserialize, Serialize};

pub const DEFAULT_REFRESH: u32 = 10800;
pub const DEFAULT_RETRY: u32 = 3600;
pub const DEFAULT_EXPIRE: u32 = 604800;
pub const DEFAULT_TTL: u32 = 3600;

/// SOA settings of a declared domain
///
/// Zero-valued timings are replaced with the defaults above when the content
/// is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaRecord {
    #[serde(default)]
    pub primary: String,

    /// Contact address; "@" is written as "." in the SOA content
    #[serde(default)]
    pub hostmaster: String,

    #[serde(default)]
    pub refresh: u32,

    #[serde(default)]
    pub retry: u32,

    #[serde(default)]
    pub expire: u32,

    #[serde(default)]
    pub default_ttl: u32,
}

impl SoaRecord {
    /// Whether both required fields are set
    pub fn is_complete(&self) -> bool {
        !self.primary.is_empty() && !self.hostmaster.is_empty()
    }

    /// Copy with zero timings replaced by their defaults
    pub fn with_defaults(&self) -> Self {
        fn or_default(value: u32, default: u32) -> u32 {
            if value == 0 {
                default
            } else {
                value
            }
        }

        Self {
            primary: self.primary.clone(),
            hostmaster: self.hostmaster.clone(),
            refresh: or_default(self.refresh, DEFAULT_REFRESH),
            retry: or_default(self.retry, DEFAULT_RETRY),
            expire: or_default(self.expire, DEFAULT_EXPIRE),
            default_ttl: or_default(self.default_ttl, DEFAULT_TTL),
        }
    }

    /// SOA content with the current unix time as serial
    ///
    /// Two runs within the same second produce the same serial.
    pub fn to_content(&self) -> String {
        self.to_content_with_serial(chrono::Utc::now().timestamp())
    }

    /// `primary hostmaster serial refresh retry expire default_ttl`
    pub fn to_content_with_serial(&self, serial: i64) -> String {
        let soa = self.with_defaults();
        format!(
            "{} {} {} {} {} {} {}",
            soa.primary,
            soa.hostmaster.replace('@', "."),
            serial,
            soa.refresh,
            soa.retry,
            soa.expire,
            soa.default_ttl
        )
    }
}
