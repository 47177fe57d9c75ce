//! Scaleway DNS provider implementation
//!
//! Uses the Scaleway Domains and DNS API (v2beta1). Requests authenticate with
//! the secret key in the `X-Auth-Token` header.
//!
//! Create an API key at: https://console.scaleway.com/iam/api-keys

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zonesync_core::SyncError;

use super::credentials::ScalewayCredentials;
use super::traits::{ChangeSet, RemoteRecord, RemoteZone, ZoneApi};

const SCW_API_BASE: &str = "https://api.scaleway.com";
const DNS_ZONES_PATH: &str = "/domain/v2beta1/dns-zones";
const PAGE_SIZE: usize = 100;

/// Scaleway DNS API client
pub struct ScalewayApi {
    client: Client,
    credentials: ScalewayCredentials,
    base_url: String,
}

/// Scaleway API response structures
#[derive(Debug, Deserialize)]
struct ListDnsZonesResponse {
    #[serde(default)]
    dns_zones: Vec<RemoteZone>,
    #[serde(default)]
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct ListDnsZoneRecordsResponse {
    #[serde(default)]
    records: Vec<RemoteRecord>,
    #[serde(default)]
    total_count: u64,
}

#[derive(Debug, Serialize)]
struct CreateDnsZoneRequest<'a> {
    domain: &'a str,
    subdomain: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct UpdateDnsZoneRecordsRequest {
    changes: Vec<RecordChange>,
    return_all_records: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum RecordChange {
    Add { records: Vec<RemoteRecord> },
    Delete { id: String },
}

#[derive(Debug, Deserialize)]
struct ScwErrorResponse {
    message: String,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
}

/// Placeholder for responses whose body is not needed
#[derive(Debug, Deserialize)]
struct Ignored {}

impl ScalewayApi {
    /// Create a client, honoring `api_url` from the credentials when set
    pub fn new(credentials: ScalewayCredentials) -> Result<Self, SyncError> {
        let base_url = credentials
            .api_url
            .clone()
            .unwrap_or_else(|| SCW_API_BASE.to_string());
        Self::with_base_url(credentials, base_url)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(
        credentials: ScalewayCredentials,
        base_url: String,
    ) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| SyncError::backend("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make an authenticated request to the Scaleway API
    async fn api_request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<T, SyncError> {
        let url = format!("{}{}", self.base_url, path);

        debug!("Scaleway API request: {} {}", method, path);

        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PATCH" => self.client.patch(&url),
            _ => {
                return Err(SyncError::Backend(format!(
                    "Unsupported method: {}",
                    method
                )))
            }
        };

        request = request
            .header("X-Auth-Token", &self.credentials.secret_key)
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::backend("API request failed", e))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if let Ok(error) = serde_json::from_str::<ScwErrorResponse>(&error_body) {
                return Err(SyncError::Backend(format!(
                    "Scaleway API error ({}{}): {}",
                    status,
                    error
                        .error_type
                        .map(|t| format!(", {}", t))
                        .unwrap_or_default(),
                    error.message
                )));
            }
            return Err(SyncError::Backend(format!(
                "API returned status {}: {}",
                status, error_body
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| SyncError::backend("Failed to read response", e))?;

        if response_text.is_empty() {
            return serde_json::from_str("{}").map_err(|e| SyncError::Backend(e.to_string()));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            SyncError::Backend(format!(
                "Failed to parse response: {} - Body: {}",
                e, response_text
            ))
        })
    }

    fn records_path(zone: &RemoteZone) -> String {
        format!(
            "{}/{}/records",
            DNS_ZONES_PATH,
            urlencoding::encode(&zone.dns_zone())
        )
    }
}

#[async_trait]
impl ZoneApi for ScalewayApi {
    async fn list_zones(&self, domain: &str) -> Result<Vec<RemoteZone>, SyncError> {
        let encoded = urlencoding::encode(domain);
        let path = format!(
            "{}?domain={}&dns_zone={}",
            DNS_ZONES_PATH, encoded, encoded
        );

        let response: ListDnsZonesResponse =
            self.api_request("GET", &path, None::<&()>).await?;

        debug!(
            "Found {} Scaleway zone(s) for {}",
            response.total_count, domain
        );

        Ok(response.dns_zones)
    }

    async fn create_zone(&self, domain: &str) -> Result<RemoteZone, SyncError> {
        let request = CreateDnsZoneRequest {
            domain,
            subdomain: "",
            project_id: self.credentials.project_id.as_deref(),
        };

        let zone: RemoteZone = self
            .api_request("POST", DNS_ZONES_PATH, Some(&request))
            .await?;

        info!("Created Scaleway zone {}", zone.dns_zone());

        Ok(zone)
    }

    async fn list_records(&self, zone: &RemoteZone) -> Result<Vec<RemoteRecord>, SyncError> {
        let base_path = Self::records_path(zone);
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let path = format!("{}?page={}&page_size={}", base_path, page, PAGE_SIZE);
            let response: ListDnsZoneRecordsResponse =
                self.api_request("GET", &path, None::<&()>).await?;

            let received = response.records.len();
            records.extend(response.records);

            if received == 0 || records.len() as u64 >= response.total_count {
                break;
            }
            page += 1;
        }

        debug!("Fetched {} records of {}", records.len(), zone.dns_zone());

        Ok(records)
    }

    async fn submit_changes(
        &self,
        zone: &RemoteZone,
        changes: &ChangeSet,
    ) -> Result<(), SyncError> {
        let mut request = UpdateDnsZoneRecordsRequest {
            changes: changes
                .deletions
                .iter()
                .map(|id| RecordChange::Delete { id: id.clone() })
                .collect(),
            return_all_records: false,
        };

        if !changes.additions.is_empty() {
            let records = changes
                .additions
                .iter()
                .cloned()
                .map(|mut record| {
                    record.id = None;
                    record
                })
                .collect();
            request.changes.push(RecordChange::Add { records });
        }

        let _: Ignored = self
            .api_request("PATCH", &Self::records_path(zone), Some(&request))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_serialization() {
        let request = UpdateDnsZoneRecordsRequest {
            changes: vec![
                RecordChange::Delete {
                    id: "rec-1".to_string(),
                },
                RecordChange::Add {
                    records: vec![RemoteRecord {
                        id: None,
                        name: "www".to_string(),
                        record_type: "A".to_string(),
                        data: "192.0.2.1".to_string(),
                        ttl: 300,
                        priority: 0,
                    }],
                },
            ],
            return_all_records: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["changes"][0]["delete"]["id"], "rec-1");
        assert_eq!(json["changes"][1]["add"]["records"][0]["type"], "A");
        assert_eq!(json["changes"][1]["add"]["records"][0]["name"], "www");
    }

    #[test]
    fn test_new_uses_api_url_override() {
        let api = ScalewayApi::new(ScalewayCredentials {
            access_key: "SCW".to_string(),
            secret_key: "secret".to_string(),
            project_id: None,
            api_url: Some("http://localhost:9999/".to_string()),
        })
        .unwrap();
        assert_eq!(api.base_url, "http://localhost:9999");
    }
}
