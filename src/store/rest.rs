//! REST-backed record store client.
//!
//! Talks to the document store's HTTP gateway: one `PATCH` per write-back,
//! body carrying the flat status fields plus store-assigned timestamps.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::store::{unix_now, update_fields, RecordStore, RecordUpdate, StoreError};

/// Record store client over the document store's REST gateway.
#[derive(Debug, Clone)]
pub struct RestRecordStore {
    client: reqwest::Client,
    base_url: url::Url,
    auth_token: Option<String>,
}

impl RestRecordStore {
    /// Build the client from configuration.
    ///
    /// The bearer token, if configured, is read once from the named
    /// environment variable.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let base_url: url::Url = config
            .base_url
            .parse()
            .map_err(|e| StoreError::Request(format!("invalid store base URL: {}", e)))?;

        let auth_token = match &config.auth_token_env {
            Some(var) => Some(std::env::var(var).map_err(|_| {
                StoreError::Request(format!("environment variable {} not set", var))
            })?),
            None => None,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            auth_token,
        })
    }

    fn record_url(&self, record_id: &str) -> Result<url::Url, StoreError> {
        self.base_url
            .join(&format!("cylinders/{}", record_id))
            .map_err(|e| StoreError::Request(format!("invalid record id: {}", e)))
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn update_record(
        &self,
        record_id: &str,
        update: &RecordUpdate,
    ) -> Result<(), StoreError> {
        let url = self.record_url(record_id)?;
        let body = update_fields(update, unix_now())?;

        let mut request = self.client.patch(url).json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Rejected(response.status().as_u16()));
        }

        tracing::debug!(record_id, "Record status written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_record_urls() {
        let store = RestRecordStore::new(&StoreConfig {
            base_url: "http://localhost:4000/api/".to_string(),
            auth_token_env: None,
            request_timeout_secs: 5,
        })
        .unwrap();

        let url = store.record_url("cyl-123").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/cylinders/cyl-123");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = RestRecordStore::new(&StoreConfig {
            base_url: "not a url".to_string(),
            auth_token_env: None,
            request_timeout_secs: 5,
        });
        assert!(matches!(result, Err(StoreError::Request(_))));
    }
}
