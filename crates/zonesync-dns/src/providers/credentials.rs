//! Remote API credentials
//!
//! Scaleway credentials are read from the environment so they never end up in
//! a versioned declaration or config file.

use serde::{Deserialize, Serialize};
use zonesync_core::SyncError;

pub const ENV_SCW_ACCESS_KEY: &str = "ZONESYNC_SCW_ACCESS_KEY";
pub const ENV_SCW_SECRET_KEY: &str = "ZONESYNC_SCW_SECRET_KEY";
pub const ENV_SCW_PROJECT_ID: &str = "ZONESYNC_SCW_PROJECT_ID";
pub const ENV_SCW_API_URL: &str = "ZONESYNC_SCW_API_URL";

/// Scaleway credentials
///
/// Create an API key at: https://console.scaleway.com/iam/api-keys
/// Required permissions: DomainsDNSFullAccess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalewayCredentials {
    /// Access key ID (SCW...)
    pub access_key: String,

    /// Secret key, sent as X-Auth-Token
    pub secret_key: String,

    /// Project new zones are created in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Override for the API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl ScalewayCredentials {
    /// Read credentials through `env`, normally `|key| std::env::var(key).ok()`
    pub fn from_env<F>(env: F) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| env(key).filter(|value| !value.is_empty());

        match (get(ENV_SCW_ACCESS_KEY), get(ENV_SCW_SECRET_KEY)) {
            (Some(access_key), Some(secret_key)) => Ok(Self {
                access_key,
                secret_key,
                project_id: get(ENV_SCW_PROJECT_ID),
                api_url: get(ENV_SCW_API_URL),
            }),
            _ => Err(SyncError::Config(format!(
                "At least one config parameter is not set. All of the following environment variables must be set:\n\
                 - {}: Scaleway access key\n\
                 - {}: Scaleway secret key\n\
                 - {}: Scaleway project ID (optional)",
                ENV_SCW_ACCESS_KEY, ENV_SCW_SECRET_KEY, ENV_SCW_PROJECT_ID
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_env() {
        let creds = ScalewayCredentials::from_env(env_from(&[
            (ENV_SCW_ACCESS_KEY, "SCWXXXXXXXXXXXXXXXXX"),
            (ENV_SCW_SECRET_KEY, "secret"),
            (ENV_SCW_PROJECT_ID, "project-1"),
        ]))
        .unwrap();

        assert_eq!(creds.access_key, "SCWXXXXXXXXXXXXXXXXX");
        assert_eq!(creds.secret_key, "secret");
        assert_eq!(creds.project_id.as_deref(), Some("project-1"));
        assert!(creds.api_url.is_none());
    }

    #[test]
    fn test_from_env_missing_secret() {
        let err = ScalewayCredentials::from_env(env_from(&[(ENV_SCW_ACCESS_KEY, "SCW")]))
            .unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
        assert!(err.to_string().contains(ENV_SCW_SECRET_KEY));
    }

    #[test]
    fn test_from_env_empty_values_count_as_missing() {
        let result = ScalewayCredentials::from_env(env_from(&[
            (ENV_SCW_ACCESS_KEY, ""),
            (ENV_SCW_SECRET_KEY, "secret"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_project_id_is_optional() {
        let creds = ScalewayCredentials::from_env(env_from(&[
            (ENV_SCW_ACCESS_KEY, "SCW"),
            (ENV_SCW_SECRET_KEY, "secret"),
            (ENV_SCW_API_URL, "http://localhost:8080"),
        ]))
        .unwrap();
        assert!(creds.project_id.is_none());
        assert_eq!(creds.api_url.as_deref(), Some("http://localhost:8080"));
    }
}
